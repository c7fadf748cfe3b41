//! 判別結果の要約文
//!
//! 応答値だけから決まる純粋関数。

use crate::types::PredictResponse;
use crate::workflow::{FailureKind, Outcome};

pub const UNAVAILABLE_SUMMARY: &str = "Could not retrieve analysis results.";
pub const UNCLASSIFIED_SUMMARY: &str = "Could not classify the image.";
pub const SERVER_ERROR_SUMMARY: &str = "Analysis could not be completed due to a server error.";

/// 判別応答から要約文を作る
///
/// - `error` あり / `pred_label` なし → 取得不可
/// - Fake / Real + 信頼度 → `"Fake! (confidence: 87.50%)"`
/// - それ以外のラベル、信頼度なし → 判別不可
pub fn derive_summary(payload: &PredictResponse) -> String {
    if payload.error.is_some() {
        return UNAVAILABLE_SUMMARY.to_string();
    }
    let Some(label) = payload.pred_label.as_deref() else {
        return UNAVAILABLE_SUMMARY.to_string();
    };

    match (label, payload.confidence) {
        ("Fake", Some(confidence)) => format!("Fake! (confidence: {:.2}%)", confidence),
        ("Real", Some(confidence)) => format!("Real! (confidence: {:.2}%)", confidence),
        _ => UNCLASSIFIED_SUMMARY.to_string(),
    }
}

/// 確定した結果に対する要約文
pub fn summary_for(outcome: &Outcome<PredictResponse>) -> String {
    match outcome {
        Outcome::Success(payload) => derive_summary(payload),
        Outcome::Failure(failure) => match failure.kind {
            FailureKind::Server => SERVER_ERROR_SUMMARY.to_string(),
            FailureKind::Domain => UNAVAILABLE_SUMMARY.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::Failure;

    fn payload(json: &str) -> PredictResponse {
        serde_json::from_str(json).expect("デシリアライズ失敗")
    }

    #[test]
    fn test_fake_summary() {
        let summary = derive_summary(&payload(r#"{"pred_label": "Fake", "confidence": 87.5}"#));
        assert_eq!(summary, "Fake! (confidence: 87.50%)");
    }

    #[test]
    fn test_real_summary() {
        let summary = derive_summary(&payload(r#"{"pred_label": "Real", "confidence": 60}"#));
        assert_eq!(summary, "Real! (confidence: 60.00%)");
    }

    #[test]
    fn test_summary_rounds_to_two_decimals() {
        let summary = derive_summary(&payload(r#"{"pred_label": "Fake", "confidence": 99.999}"#));
        assert_eq!(summary, "Fake! (confidence: 100.00%)");
    }

    #[test]
    fn test_unknown_label() {
        let summary = derive_summary(&payload(r#"{"pred_label": "Unknown"}"#));
        assert_eq!(summary, UNCLASSIFIED_SUMMARY);
    }

    #[test]
    fn test_other_label_with_confidence() {
        let summary = derive_summary(&payload(r#"{"pred_label": "fake", "confidence": 50}"#));
        assert_eq!(summary, UNCLASSIFIED_SUMMARY);
    }

    #[test]
    fn test_known_label_missing_confidence() {
        let summary = derive_summary(&payload(r#"{"pred_label": "Real"}"#));
        assert_eq!(summary, UNCLASSIFIED_SUMMARY);
    }

    #[test]
    fn test_error_payload() {
        let summary = derive_summary(&payload(r#"{"error": "x"}"#));
        assert_eq!(summary, UNAVAILABLE_SUMMARY);
    }

    #[test]
    fn test_error_wins_over_label() {
        let summary = derive_summary(&payload(
            r#"{"pred_label": "Fake", "confidence": 90, "error": "partial"}"#,
        ));
        assert_eq!(summary, UNAVAILABLE_SUMMARY);
    }

    #[test]
    fn test_empty_payload() {
        assert_eq!(derive_summary(&PredictResponse::default()), UNAVAILABLE_SUMMARY);
    }

    #[test]
    fn test_summary_for_failures() {
        assert_eq!(summary_for(&Outcome::Failure(Failure::server())), SERVER_ERROR_SUMMARY);
        assert_eq!(
            summary_for(&Outcome::Failure(Failure::domain("no face"))),
            UNAVAILABLE_SUMMARY
        );
    }
}
