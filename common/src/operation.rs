//! ワークフローの種類（Detection / Restoration / Generation）
//!
//! 状態機械は共通で、エンドポイント・送信パラメータ・応答の形だけが異なる。

use crate::consent::ConsentItem;
use crate::types::{GenerateResponse, ModelType, PredictResponse, RestoreResponse};
use crate::workflow::Failure;
use serde::de::DeserializeOwned;
use std::fmt;

pub const UPLOAD_ENDPOINT: &str = "/api/upload";

/// 1リソースを送信して結果を受け取る操作
pub trait Operation: fmt::Debug + 'static {
    /// ログ用の名前
    const NAME: &'static str;
    const ENDPOINT: &'static str;
    /// 送信ボタンの文言
    const ACTION_LABEL: &'static str;
    /// 送信中の文言
    const BUSY_LABEL: &'static str;
    /// 結果エリアの初期表示
    const PLACEHOLDER: &'static str;
    /// `/api/upload` を並行して呼べる操作か
    const ADVISORY_UPLOAD: bool = false;

    type Params: Clone + Default + fmt::Debug;
    type Payload: DeserializeOwned + Clone + fmt::Debug;

    fn required_consent() -> &'static [ConsentItem];

    /// `file` 以外のmultipartフィールド
    fn form_fields(params: &Self::Params) -> Vec<(&'static str, String)>;

    /// 2xxで受け取った応答を検証する
    fn validate(payload: Self::Payload) -> Result<Self::Payload, Failure>;
}

/// 結果が画像参照になる操作（ダウンロード可能）
pub trait ImageOperation: Operation {
    const DOWNLOAD_FILE_NAME: &'static str;
    const CONFIRM_MESSAGE: &'static str;
    const NO_IMAGE_MESSAGE: &'static str;

    fn image_reference(payload: &Self::Payload) -> Option<&str>;
}

/// ディープフェイク判別
#[derive(Debug, Clone, Copy, Default)]
pub struct Detection;

impl Operation for Detection {
    const NAME: &'static str = "detect";
    const ENDPOINT: &'static str = "/api/predict";
    const ACTION_LABEL: &'static str = "Detect";
    const BUSY_LABEL: &'static str = "Analyzing...";
    const PLACEHOLDER: &'static str = "The analysis image will appear here.";
    const ADVISORY_UPLOAD: bool = true;

    type Params = ModelType;
    type Payload = PredictResponse;

    fn required_consent() -> &'static [ConsentItem] {
        &[ConsentItem::Rights, ConsentItem::Disclaimer]
    }

    fn form_fields(params: &ModelType) -> Vec<(&'static str, String)> {
        vec![("model_type", params.as_str().to_string())]
    }

    // ラベル/信頼度の欠落は失敗にしない（要約文で扱う）
    fn validate(payload: PredictResponse) -> Result<PredictResponse, Failure> {
        match payload.error.as_deref() {
            Some(message) => Err(Failure::domain(message)),
            None => Ok(payload),
        }
    }
}

/// 顔画像の復元
#[derive(Debug, Clone, Copy, Default)]
pub struct Restoration;

impl Operation for Restoration {
    const NAME: &'static str = "restore";
    const ENDPOINT: &'static str = "/api/restore";
    const ACTION_LABEL: &'static str = "Restore";
    const BUSY_LABEL: &'static str = "Generating...";
    const PLACEHOLDER: &'static str = "The restored image will appear here.";

    type Params = ();
    type Payload = RestoreResponse;

    fn required_consent() -> &'static [ConsentItem] {
        &[ConsentItem::Ethics]
    }

    fn form_fields(_: &()) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    fn validate(payload: RestoreResponse) -> Result<RestoreResponse, Failure> {
        if let Some(message) = payload.error.as_deref() {
            return Err(Failure::domain(message));
        }
        match payload.restored_image_url.as_deref() {
            Some(url) if !url.trim().is_empty() => Ok(payload),
            _ => Err(Failure::server()),
        }
    }
}

impl ImageOperation for Restoration {
    const DOWNLOAD_FILE_NAME: &'static str = "restored_image.png";
    const CONFIRM_MESSAGE: &'static str = "Download the restored image?";
    const NO_IMAGE_MESSAGE: &'static str = "There is no restored image.";

    fn image_reference(payload: &RestoreResponse) -> Option<&str> {
        payload.restored_image_url.as_deref()
    }
}

/// 顔画像の生成
#[derive(Debug, Clone, Copy, Default)]
pub struct Generation;

impl Operation for Generation {
    const NAME: &'static str = "generate";
    const ENDPOINT: &'static str = "/api/generate";
    const ACTION_LABEL: &'static str = "Generate";
    const BUSY_LABEL: &'static str = "Generating...";
    const PLACEHOLDER: &'static str = "No image has been generated yet.";

    type Params = ();
    type Payload = GenerateResponse;

    fn required_consent() -> &'static [ConsentItem] {
        &[ConsentItem::Ethics]
    }

    fn form_fields(_: &()) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    fn validate(payload: GenerateResponse) -> Result<GenerateResponse, Failure> {
        if let Some(message) = payload.error.as_deref() {
            return Err(Failure::domain(message));
        }
        match payload.generated_image_url.as_deref() {
            Some(url) if !url.trim().is_empty() => Ok(payload),
            _ => Err(Failure::server()),
        }
    }
}

impl ImageOperation for Generation {
    const DOWNLOAD_FILE_NAME: &'static str = "generated_image.png";
    const CONFIRM_MESSAGE: &'static str = "Download the generated image?";
    const NO_IMAGE_MESSAGE: &'static str = "There is no generated image.";

    fn image_reference(payload: &GenerateResponse) -> Option<&str> {
        payload.generated_image_url.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::{FailureKind, SERVER_ERROR_MESSAGE};

    #[test]
    fn test_detection_form_fields() {
        let fields = Detection::form_fields(&ModelType::Foreign);
        assert_eq!(fields, vec![("model_type", "foreign".to_string())]);
    }

    #[test]
    fn test_restoration_has_no_extra_fields() {
        assert!(Restoration::form_fields(&()).is_empty());
        assert_eq!(Restoration::required_consent(), &[ConsentItem::Ethics]);
    }

    #[test]
    fn test_detection_error_field_is_domain_failure() {
        let payload = PredictResponse {
            error: Some("no face detected".to_string()),
            ..Default::default()
        };
        let failure = Detection::validate(payload).unwrap_err();
        assert_eq!(failure.kind, FailureKind::Domain);
        assert_eq!(failure.message, "no face detected");
    }

    #[test]
    fn test_detection_partial_payload_is_success() {
        let payload = PredictResponse {
            pred_label: Some("Real".to_string()),
            ..Default::default()
        };
        assert!(Detection::validate(payload).is_ok());
    }

    #[test]
    fn test_restoration_missing_url_is_server_failure() {
        let failure = Restoration::validate(RestoreResponse::default()).unwrap_err();
        assert_eq!(failure.kind, FailureKind::Server);
        assert_eq!(failure.message, SERVER_ERROR_MESSAGE);
    }

    #[test]
    fn test_generation_error_wins_over_url() {
        let payload = GenerateResponse {
            generated_image_url: Some("http://x/a.png".to_string()),
            error: Some("quota exceeded".to_string()),
        };
        let failure = Generation::validate(payload).unwrap_err();
        assert_eq!(failure.message, "quota exceeded");
    }

    #[test]
    fn test_image_reference() {
        let payload = RestoreResponse {
            restored_image_url: Some("http://x/r.png".to_string()),
            error: None,
        };
        assert_eq!(Restoration::image_reference(&payload), Some("http://x/r.png"));
    }
}
