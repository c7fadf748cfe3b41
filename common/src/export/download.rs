//! 復元/生成画像のダウンロード
//!
//! 確認ダイアログ → 画像取得 → 固定ファイル名で保存。

use super::{FileSink, Notifier};
use crate::controller::WorkflowController;
use crate::data_url::{decode_data_url, extract_mime_type_from_data_url, is_data_url};
use crate::error::{ExportError, TransportError};
use crate::operation::ImageOperation;
use crate::transport::Transport;

pub const DONE_MESSAGE: &str = "Download complete.";
pub const FAILED_MESSAGE: &str = "An error occurred while downloading.";

const IMAGE_MIME_TYPE: &str = "image/png";

/// 成功結果の画像を保存する（ワークフローの結果は変更しない）
pub async fn download_image<O: ImageOperation, T: Transport>(
    controller: &WorkflowController<O, T>,
    notifier: &dyn Notifier,
    sink: &dyn FileSink,
) -> Result<(), ExportError> {
    let reference = controller.with_state(|wf| {
        wf.success()
            .and_then(O::image_reference)
            .filter(|url| !url.trim().is_empty())
            .map(str::to_string)
    });
    let Some(reference) = reference else {
        notifier.alert(O::NO_IMAGE_MESSAGE);
        return Err(ExportError::NoResult);
    };

    if !notifier.confirm(O::CONFIRM_MESSAGE) {
        return Err(ExportError::Cancelled);
    }

    match fetch_and_save::<O, T>(controller.transport(), &reference, sink).await {
        Ok(()) => {
            tracing::info!(file = O::DOWNLOAD_FILE_NAME, "image saved");
            notifier.alert(DONE_MESSAGE);
            Ok(())
        }
        Err(e) => {
            tracing::warn!(error = %e, "image download failed");
            notifier.alert(FAILED_MESSAGE);
            Err(e)
        }
    }
}

async fn fetch_and_save<O: ImageOperation, T: Transport>(
    transport: &T,
    reference: &str,
    sink: &dyn FileSink,
) -> Result<(), ExportError> {
    let (bytes, mime_type) = if is_data_url(reference) {
        let bytes = decode_data_url(reference)
            .ok_or_else(|| TransportError::Decode("invalid data URL".to_string()))?;
        (bytes, extract_mime_type_from_data_url(reference))
    } else {
        (transport.get_bytes(reference).await?, IMAGE_MIME_TYPE)
    };

    if bytes.is_empty() {
        return Err(TransportError::Decode("empty image body".to_string()).into());
    }
    sink.save(O::DOWNLOAD_FILE_NAME, mime_type, &bytes)
        .map_err(ExportError::Save)
}
