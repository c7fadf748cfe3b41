//! PDFレポート出力（Detectionのみ）
//!
//! 判別結果から `ReportRequest` を組み立てて `/api/report` へ送り、
//! 返ってきたPDFを固定ファイル名で保存する。

use super::{FileSink, Notifier};
use crate::controller::WorkflowController;
use crate::error::{ExportError, TransportError};
use crate::operation::Detection;
use crate::transport::Transport;
use crate::types::{ModelType, PredictResponse, ReportRequest};
use crate::workflow::Workflow;

pub const REPORT_ENDPOINT: &str = "/api/report";
pub const REPORT_FILE_NAME: &str = "Deepfake_Heatmap_Report.pdf";
pub const REPORT_MIME_TYPE: &str = "application/pdf";
pub const MODEL_NAME: &str = "MobileNetV3-Small";

pub const NO_RESULT_MESSAGE: &str = "There is no analysis result.";
pub const CONFIRM_MESSAGE: &str = "Download the PDF report?";
pub const DONE_MESSAGE: &str = "PDF report downloaded.";
pub const FAILED_MESSAGE: &str = "An error occurred while generating the PDF.";

/// 判別応答 → レポートリクエスト
///
/// `model_type` はサーバーが返した値を優先し、なければ選択中のモデル。
pub fn build_report_request(payload: &PredictResponse, selected: ModelType) -> ReportRequest {
    let label = payload.pred_label.as_deref().unwrap_or("Unknown");
    let confidence = match payload.confidence {
        Some(confidence) => format!("{:.2}", confidence),
        None => "0".to_string(),
    };
    let model_type = payload
        .model_type
        .clone()
        .filter(|model| !model.trim().is_empty())
        .unwrap_or_else(|| selected.as_str().to_string());

    ReportRequest {
        result: format!("{} ({}%)", label, confidence),
        fake_probability: payload.fake_probability.unwrap_or(0.0),
        gradcam: payload.gradcam.clone(),
        model_type,
        model_name: MODEL_NAME.to_string(),
    }
}

/// 成功結果がなければ `NoResult`
///
/// モデルは結果を出した送信時のもの（結果表示後にラジオを切り替えても変わらない）。
pub fn prepare_report(workflow: &Workflow<Detection>) -> Result<ReportRequest, ExportError> {
    let payload = workflow.success().ok_or(ExportError::NoResult)?;
    let model = workflow.result_params().unwrap_or(workflow.params());
    Ok(build_report_request(payload, *model))
}

/// PDFレポートを生成して保存する
///
/// 何度呼んでもよく、ワークフローの結果は変更しない。
pub async fn export_report<T: Transport>(
    controller: &WorkflowController<Detection, T>,
    notifier: &dyn Notifier,
    sink: &dyn FileSink,
) -> Result<(), ExportError> {
    let request = match controller.with_state(prepare_report) {
        Ok(request) => request,
        Err(e) => {
            notifier.alert(NO_RESULT_MESSAGE);
            return Err(e);
        }
    };

    if !notifier.confirm(CONFIRM_MESSAGE) {
        return Err(ExportError::Cancelled);
    }

    match request_pdf(controller.transport(), &request, sink).await {
        Ok(()) => {
            tracing::info!(file = REPORT_FILE_NAME, "report saved");
            notifier.alert(DONE_MESSAGE);
            Ok(())
        }
        Err(e) => {
            tracing::warn!(error = %e, "report export failed");
            notifier.alert(FAILED_MESSAGE);
            Err(e)
        }
    }
}

async fn request_pdf<T: Transport>(
    transport: &T,
    request: &ReportRequest,
    sink: &dyn FileSink,
) -> Result<(), ExportError> {
    let body = serde_json::to_value(request)
        .map_err(|e| TransportError::Decode(e.to_string()))?;
    let bytes = transport.post_json(REPORT_ENDPOINT, &body).await?;
    if bytes.is_empty() {
        return Err(TransportError::Decode("empty report body".to_string()).into());
    }
    sink.save(REPORT_FILE_NAME, REPORT_MIME_TYPE, &bytes)
        .map_err(ExportError::Save)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consent::ConsentItem;
    use crate::testing::{jpeg, MemorySink, MockTransport, RecordingNotifier, Reply};
    use futures::executor::block_on;

    const PREDICTION: &str = r#"{
        "pred_label": "Fake",
        "confidence": 87.5,
        "fake_probability": 0.875,
        "gradcam": "iVBORw0KGgo=",
        "model_type": "foreign"
    }"#;

    fn settled_controller(transport: MockTransport) -> WorkflowController<Detection, MockTransport> {
        let controller = WorkflowController::new(transport);
        controller.select_file(jpeg("face.jpg"));
        controller.set_consent(ConsentItem::Rights, true);
        controller.set_consent(ConsentItem::Disclaimer, true);
        block_on(controller.submit()).expect("送信できるはず");
        controller
    }

    // =============================================
    // リクエスト組み立て
    // =============================================

    #[test]
    fn test_build_report_request_full() {
        let payload: PredictResponse = serde_json::from_str(PREDICTION).unwrap();
        let request = build_report_request(&payload, ModelType::Korean);

        assert_eq!(request.result, "Fake (87.50%)");
        assert!((request.fake_probability - 0.875).abs() < 1e-9);
        assert_eq!(request.gradcam.as_deref(), Some("iVBORw0KGgo="));
        assert_eq!(request.model_type, "foreign");
        assert_eq!(request.model_name, "MobileNetV3-Small");
    }

    #[test]
    fn test_build_report_request_defaults() {
        let request = build_report_request(&PredictResponse::default(), ModelType::Foreign);

        assert_eq!(request.result, "Unknown (0%)");
        assert_eq!(request.fake_probability, 0.0);
        assert!(request.gradcam.is_none());
        assert_eq!(request.model_type, "foreign");
    }

    #[test]
    fn test_prepare_report_uses_model_of_settled_submission() {
        let transport = MockTransport::new().reply(
            "/api/predict",
            Reply::json(r#"{"pred_label": "Fake", "confidence": 87.5}"#),
        );
        let controller = settled_controller(transport);
        controller.set_params(ModelType::Foreign);

        let request = controller.with_state(prepare_report).expect("結果があるはず");

        assert_eq!(request.model_type, "korean");
    }

    #[test]
    fn test_prepare_report_without_result() {
        let workflow = Workflow::<Detection>::new();
        assert_eq!(prepare_report(&workflow), Err(ExportError::NoResult));
    }

    // =============================================
    // 出力
    // =============================================

    #[test]
    fn test_export_without_result_issues_no_request() {
        let transport = MockTransport::new();
        let controller = WorkflowController::<Detection, _>::new(transport.clone());
        let notifier = RecordingNotifier::accepting();
        let sink = MemorySink::default();

        let result = block_on(export_report(&controller, &notifier, &sink));

        assert_eq!(result, Err(ExportError::NoResult));
        assert!(transport.calls().is_empty());
        assert_eq!(*notifier.alerts.borrow(), vec![NO_RESULT_MESSAGE.to_string()]);
    }

    #[test]
    fn test_export_without_result_after_failure() {
        let transport = MockTransport::new()
            .reply("/api/predict", Reply::Error(TransportError::Status(500)));
        let controller = settled_controller(transport.clone());

        let result = block_on(export_report(
            &controller,
            &RecordingNotifier::accepting(),
            &MemorySink::default(),
        ));

        assert_eq!(result, Err(ExportError::NoResult));
        assert_eq!(transport.calls_to(REPORT_ENDPOINT), 0);
    }

    #[test]
    fn test_export_twice_issues_two_requests_and_keeps_result() {
        let transport = MockTransport::new()
            .reply("/api/predict", Reply::json(PREDICTION))
            .reply(REPORT_ENDPOINT, Reply::Bytes(b"%PDF-1.7".to_vec()));
        let controller = settled_controller(transport.clone());
        let before = controller.with_state(|wf| wf.success().cloned());
        let notifier = RecordingNotifier::accepting();
        let sink = MemorySink::default();

        block_on(export_report(&controller, &notifier, &sink)).expect("1回目");
        block_on(export_report(&controller, &notifier, &sink)).expect("2回目");

        assert_eq!(transport.calls_to(REPORT_ENDPOINT), 2);
        assert_eq!(controller.with_state(|wf| wf.success().cloned()), before);

        let saved = sink.saved.borrow();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].0, "Deepfake_Heatmap_Report.pdf");
        assert_eq!(saved[0].1, "application/pdf");
        assert_eq!(saved[0].2, b"%PDF-1.7");

        let json = transport.calls()[1].json.clone().expect("JSON本文");
        assert_eq!(json["result"], "Fake (87.50%)");
        assert_eq!(json["model_name"], "MobileNetV3-Small");
        assert_eq!(notifier.alerts.borrow().last().map(String::as_str), Some(DONE_MESSAGE));
    }

    #[test]
    fn test_export_declined_issues_no_request() {
        let transport = MockTransport::new().reply("/api/predict", Reply::json(PREDICTION));
        let controller = settled_controller(transport.clone());
        let notifier = RecordingNotifier::declining();

        let result = block_on(export_report(&controller, &notifier, &MemorySink::default()));

        assert_eq!(result, Err(ExportError::Cancelled));
        assert_eq!(transport.calls_to(REPORT_ENDPOINT), 0);
        assert_eq!(*notifier.confirms.borrow(), vec![CONFIRM_MESSAGE.to_string()]);
    }

    #[test]
    fn test_export_failure_saves_nothing_and_keeps_result() {
        let transport = MockTransport::new()
            .reply("/api/predict", Reply::json(PREDICTION))
            .reply(REPORT_ENDPOINT, Reply::Error(TransportError::Status(500)));
        let controller = settled_controller(transport);
        let notifier = RecordingNotifier::accepting();
        let sink = MemorySink::default();

        let result = block_on(export_report(&controller, &notifier, &sink));

        assert_eq!(result, Err(ExportError::Transport(TransportError::Status(500))));
        assert!(sink.saved.borrow().is_empty());
        assert_eq!(notifier.alerts.borrow().last().map(String::as_str), Some(FAILED_MESSAGE));
        controller.with_state(|wf| assert!(wf.success().is_some()));
    }

    #[test]
    fn test_export_empty_body_is_failure() {
        let transport = MockTransport::new()
            .reply("/api/predict", Reply::json(PREDICTION))
            .reply(REPORT_ENDPOINT, Reply::Bytes(Vec::new()));
        let controller = settled_controller(transport);
        let sink = MemorySink::default();

        let result = block_on(export_report(&controller, &RecordingNotifier::accepting(), &sink));

        assert!(matches!(result, Err(ExportError::Transport(TransportError::Decode(_)))));
        assert!(sink.saved.borrow().is_empty());
    }

    #[test]
    fn test_export_save_failure() {
        let transport = MockTransport::new()
            .reply("/api/predict", Reply::json(PREDICTION))
            .reply(REPORT_ENDPOINT, Reply::Bytes(b"%PDF".to_vec()));
        let controller = settled_controller(transport);
        let sink = MemorySink {
            fail: true,
            ..Default::default()
        };

        let result = block_on(export_report(&controller, &RecordingNotifier::accepting(), &sink));

        assert_eq!(result, Err(ExportError::Save("disk full".to_string())));
    }
}
