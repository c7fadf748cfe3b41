//! fetchによるTransport実装
//!
//! レスポンス本文はバイト列のまま返し、JSONの解釈は共通ライブラリに任せる。

use async_trait::async_trait;
use faceguard_common::{ApiConfig, MultipartBody, Transport, TransportError};
use futures::future::{select, Either};
use futures::pin_mut;
use gloo::timers::future::TimeoutFuture;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Request, RequestInit, RequestMode, Response};

pub struct FetchTransport {
    config: ApiConfig,
}

impl FetchTransport {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    /// タイムアウト付きでfetchする
    async fn fetch(
        &self,
        url: &str,
        opts: RequestInit,
        content_type: Option<&str>,
    ) -> Result<Vec<u8>, TransportError> {
        let request = Request::new_with_str_and_init(url, &opts).map_err(network_error)?;
        if let Some(content_type) = content_type {
            request
                .headers()
                .set("Content-Type", content_type)
                .map_err(network_error)?;
        }

        let millis = u32::try_from(self.config.timeout_millis()).unwrap_or(u32::MAX);
        let response = send(request);
        let timeout = TimeoutFuture::new(millis);
        pin_mut!(response, timeout);

        match select(response, timeout).await {
            Either::Left((result, _)) => result,
            Either::Right(_) => Err(TransportError::Timeout),
        }
    }
}

async fn send(request: Request) -> Result<Vec<u8>, TransportError> {
    let window = web_sys::window().ok_or_else(|| TransportError::Network("window is unavailable".into()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(network_error)?;
    let resp: Response = resp_value
        .dyn_into()
        .map_err(|_| TransportError::Decode("fetch did not return a Response".into()))?;

    if !resp.ok() {
        return Err(TransportError::Status(resp.status()));
    }

    let buffer = JsFuture::from(resp.array_buffer().map_err(decode_error)?)
        .await
        .map_err(decode_error)?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

fn network_error(e: JsValue) -> TransportError {
    TransportError::Network(format!("{:?}", e))
}

fn decode_error(e: JsValue) -> TransportError {
    TransportError::Decode(format!("{:?}", e))
}

/// `file` パートと追加フィールドからFormDataを作る
fn form_data(body: &MultipartBody) -> Result<FormData, JsValue> {
    let form = FormData::new()?;

    let bytes = js_sys::Uint8Array::from(body.file.bytes.as_slice());
    let parts = js_sys::Array::of1(&bytes);
    let bag = BlobPropertyBag::new();
    bag.set_type(&body.file.mime_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &bag)?;
    form.append_with_blob_and_filename("file", &blob, &body.file.file_name)?;

    for (name, value) in &body.fields {
        form.append_with_str(name, value)?;
    }
    Ok(form)
}

fn request_init(method: &str) -> RequestInit {
    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);
    opts
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn post_multipart(&self, path: &str, body: MultipartBody) -> Result<Vec<u8>, TransportError> {
        let form = form_data(&body).map_err(network_error)?;
        let opts = request_init("POST");
        opts.set_body(&form.into());
        // Content-Typeはブラウザがboundary付きで設定する
        self.fetch(&self.config.endpoint_url(path), opts, None).await
    }

    async fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<Vec<u8>, TransportError> {
        let json = serde_json::to_string(body).map_err(|e| TransportError::Decode(e.to_string()))?;
        let opts = request_init("POST");
        opts.set_body(&JsValue::from_str(&json));
        self.fetch(&self.config.endpoint_url(path), opts, Some("application/json"))
            .await
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        self.fetch(&self.config.endpoint_url(url), request_init("GET"), None)
            .await
    }
}
