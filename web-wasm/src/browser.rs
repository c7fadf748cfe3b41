//! ブラウザ側の通知・保存・プレビュー

use faceguard_common::{FileSink, Notifier, PreviewFactory, SelectedFile};
use gloo::console;
use wasm_bindgen::prelude::*;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// window.alert / window.confirm
pub struct BrowserNotifier;

impl Notifier for BrowserNotifier {
    fn alert(&self, message: &str) {
        gloo::dialogs::alert(message);
    }

    fn confirm(&self, message: &str) -> bool {
        gloo::dialogs::confirm(message)
    }
}

/// アンカー要素のクリックでダウンロードさせる
pub struct DownloadSink;

impl FileSink for DownloadSink {
    fn save(&self, file_name: &str, mime_type: &str, bytes: &[u8]) -> Result<(), String> {
        let url = object_url(mime_type, bytes).map_err(describe)?;
        let result = click_download(&url, file_name);
        let _ = Url::revoke_object_url(&url);
        result.map_err(describe)
    }
}

fn click_download(url: &str, file_name: &str) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document is unavailable"))?;
    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(url);
    anchor.set_download(file_name);

    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("body is unavailable"))?;
    body.append_child(&anchor)?;
    anchor.click();
    body.remove_child(&anchor)?;
    Ok(())
}

/// バイト列からblob URLを作る（不要になったら `revoke_object_url`）
pub fn object_url(mime_type: &str, bytes: &[u8]) -> Result<String, JsValue> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::of1(&array);
    let bag = BlobPropertyBag::new();
    bag.set_type(mime_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &bag)?;
    Url::create_object_url_with_blob(&blob)
}

fn describe(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

/// 選択画像のプレビュー（blob URL）
pub struct BlobUrlPreview;

impl PreviewFactory for BlobUrlPreview {
    type Handle = String;

    fn create(&self, file: &SelectedFile) -> Option<String> {
        match object_url(&file.mime_type, &file.bytes) {
            Ok(url) => Some(url),
            Err(e) => {
                console::warn!("preview unavailable:", e);
                None
            }
        }
    }

    fn release(&self, handle: String) {
        let _ = Url::revoke_object_url(&handle);
    }
}

/// `<input type=file>` の1ファイルを読み込む
pub async fn read_file(file: web_sys::File) -> Result<SelectedFile, String> {
    let file = gloo::file::File::from(file);
    let bytes = gloo::file::futures::read_as_bytes(&file)
        .await
        .map_err(|e| e.to_string())?;
    Ok(SelectedFile::new(file.name(), file.raw_mime_type(), bytes))
}
