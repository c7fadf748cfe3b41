//! サブコマンドの実行
//!
//! 入力 → 同意 → 送信 → 表示 → エクスポートの流れ。
//! 状態遷移はすべて `WorkflowController` に任せる。

use crate::error::{FaceguardError, Result};
use crate::terminal::{self, DirectorySink, TerminalNotifier};
use faceguard_common::data_url::decode_base64;
use faceguard_common::export::{download_image, export_report};
use faceguard_common::{
    ConsentItem, Detection, DetectionView, ExportError, FileSink, ImageOperation, ImageView,
    Operation, PredictResponse, SelectedFile, Settlement, Transport, WorkflowController,
};

pub const GRADCAM_FILE_NAME: &str = "gradcam.png";

/// 出力先と確認の扱い
pub struct RunOptions {
    pub assume_yes: bool,
    pub sink: DirectorySink,
}

/// ファイル選択・同意・パラメータを反映して1回送信する
///
/// 同意不足などの拒否はネットワーク呼び出しなしで `Rejected` になる。
pub async fn submit_once<O: Operation, T: Transport>(
    controller: &WorkflowController<O, T>,
    file: SelectedFile,
    params: O::Params,
    accepted: &[ConsentItem],
) -> Result<Settlement> {
    controller.select_file(file);
    controller.set_params(params);
    for &item in O::required_consent() {
        controller.set_consent(item, accepted.contains(&item));
    }

    let pb = terminal::spinner(O::BUSY_LABEL);
    let result = controller.submit().await;
    pb.finish_and_clear();

    let settlement = result?;
    tracing::debug!(operation = O::NAME, ?settlement, "submission settled");
    Ok(settlement)
}

/// 判別を実行して結果を表示し、必要ならレポートを出力する
pub async fn detect<T: Transport>(
    controller: &WorkflowController<Detection, T>,
    file: SelectedFile,
    model: faceguard_common::ModelType,
    report: bool,
    options: &RunOptions,
) -> Result<DetectionView> {
    let accepted = terminal::collect_consent(Detection::required_consent(), options.assume_yes)?;
    submit_once(controller, file, model, &accepted).await?;

    let view = controller.with_state(DetectionView::from_workflow);
    terminal::print_detection(&view);

    if let Some(payload) = controller.with_state(|wf| wf.success().cloned()) {
        if let Some(path) = save_gradcam(&payload, &options.sink)? {
            println!("✔ ヒートマップを保存: {}", path);
        }
        if report {
            let notifier = TerminalNotifier::new(options.assume_yes);
            tolerate_export(export_report(controller, &notifier, &options.sink).await);
        }
    }

    Ok(view)
}

/// 復元/生成を実行して結果を表示し、必要なら画像を保存する
pub async fn transform<O: ImageOperation<Params = ()>, T: Transport>(
    controller: &WorkflowController<O, T>,
    file: SelectedFile,
    download: bool,
    options: &RunOptions,
) -> Result<ImageView> {
    let accepted = terminal::collect_consent(O::required_consent(), options.assume_yes)?;
    submit_once(controller, file, (), &accepted).await?;

    let view = controller.with_state(ImageView::from_workflow);
    terminal::print_image(&view);

    if download && view.download_enabled {
        let notifier = TerminalNotifier::new(options.assume_yes);
        tolerate_export(download_image(controller, &notifier, &options.sink).await);
    }

    Ok(view)
}

/// ヒートマップ（base64 PNG）をファイルに書き出す
pub fn save_gradcam(payload: &PredictResponse, sink: &dyn FileSink) -> Result<Option<String>> {
    let Some(gradcam) = payload.gradcam.as_deref().filter(|g| !g.is_empty()) else {
        return Ok(None);
    };
    let Some(bytes) = decode_base64(gradcam) else {
        tracing::warn!("gradcam is not valid base64");
        return Ok(None);
    };
    sink.save(GRADCAM_FILE_NAME, "image/png", &bytes)
        .map_err(|e| FaceguardError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;
    Ok(Some(GRADCAM_FILE_NAME.to_string()))
}

// エクスポートの失敗は解析結果に影響しない（通知済み）
fn tolerate_export(result: std::result::Result<(), ExportError>) {
    match result {
        Ok(()) | Err(ExportError::Cancelled) => {}
        Err(e) => tracing::debug!(error = %e, "export did not complete"),
    }
}
