//! 結果表示用のビューモデル
//!
//! ワークフローの状態から表示内容を作る純粋関数群。
//! UI（Leptos）はこの値だけを読む。

use crate::consent::ConsentItem;
use crate::data_url::png_data_url;
use crate::operation::{Detection, ImageOperation, Operation};
use crate::summary::summary_for;
use crate::types::{ModelType, PredictResponse};
use crate::workflow::{Outcome, Phase, Workflow};

pub const ACTIVATION_NA: &str = "Visual activation: N/A";
pub const SUMMARY_PLACEHOLDER: &str = "Check the analysis result here.";

/// 結果エリアの表示
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultArea {
    Placeholder(String),
    Image(String),
    Notice(String),
    Error(String),
}

impl Default for ResultArea {
    fn default() -> Self {
        ResultArea::Placeholder(String::new())
    }
}

/// 送信ボタン
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitControl {
    pub label: String,
    pub enabled: bool,
    pub busy: bool,
}

impl SubmitControl {
    fn from_workflow<O: Operation>(workflow: &Workflow<O>) -> Self {
        let busy = workflow.is_busy();
        Self {
            label: if busy { O::BUSY_LABEL } else { O::ACTION_LABEL }.to_string(),
            enabled: workflow.can_submit(),
            busy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsentRow {
    pub item: ConsentItem,
    pub checked: bool,
}

fn consent_rows<O: Operation>(workflow: &Workflow<O>) -> Vec<ConsentRow> {
    workflow
        .consent()
        .items()
        .map(|(item, checked)| ConsentRow { item, checked })
        .collect()
}

/// Detection画面の表示内容
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectionView {
    pub phase: &'static str,
    pub has_file: bool,
    pub model: ModelType,
    pub consent: Vec<ConsentRow>,
    pub submit: SubmitControl,
    pub result_area: ResultArea,
    /// Settledのときだけ
    pub summary: Option<String>,
    /// 成功時のみ
    pub activation: Option<String>,
    pub report_enabled: bool,
}

impl DetectionView {
    pub fn from_workflow(workflow: &Workflow<Detection>) -> Self {
        let outcome = workflow.outcome();
        Self {
            phase: workflow.phase().name(),
            has_file: workflow.file().is_some(),
            model: *workflow.params(),
            consent: consent_rows(workflow),
            submit: SubmitControl::from_workflow(workflow),
            result_area: detection_result_area(workflow.phase()),
            summary: outcome.map(summary_for),
            activation: workflow.success().map(activation_text),
            report_enabled: workflow.success().is_some(),
        }
    }

    /// 要約ボックスに出す文言
    pub fn summary_text(&self) -> &str {
        self.summary.as_deref().unwrap_or(SUMMARY_PLACEHOLDER)
    }
}

fn detection_result_area(phase: &Phase<PredictResponse>) -> ResultArea {
    match phase {
        Phase::Settled { outcome: Outcome::Success(payload), .. } => match payload.gradcam.as_deref() {
            Some(gradcam) if !gradcam.is_empty() => ResultArea::Image(png_data_url(gradcam)),
            _ => ResultArea::Notice(ACTIVATION_NA.to_string()),
        },
        Phase::Settled { outcome: Outcome::Failure(failure), .. } => {
            ResultArea::Error(failure.message.clone())
        }
        _ => ResultArea::Placeholder(Detection::PLACEHOLDER.to_string()),
    }
}

/// `fake_probability` を百分率で表示（0や欠落はN/A）
pub fn activation_text(payload: &PredictResponse) -> String {
    match payload.fake_probability {
        Some(probability) if probability != 0.0 => {
            format!("Visual activation: {:.1}%", probability * 100.0)
        }
        _ => ACTIVATION_NA.to_string(),
    }
}

/// Restoration / Generation画面の表示内容
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageView {
    pub phase: &'static str,
    pub has_file: bool,
    pub consent: Vec<ConsentRow>,
    pub submit: SubmitControl,
    pub result_area: ResultArea,
    pub download_enabled: bool,
}

impl ImageView {
    pub fn from_workflow<O: ImageOperation>(workflow: &Workflow<O>) -> Self {
        let result_area = match workflow.outcome() {
            Some(Outcome::Success(payload)) => match O::image_reference(payload) {
                Some(url) => ResultArea::Image(url.to_string()),
                None => ResultArea::Placeholder(O::PLACEHOLDER.to_string()),
            },
            Some(Outcome::Failure(failure)) => ResultArea::Error(failure.message.clone()),
            None => ResultArea::Placeholder(O::PLACEHOLDER.to_string()),
        };

        Self {
            phase: workflow.phase().name(),
            has_file: workflow.file().is_some(),
            consent: consent_rows(workflow),
            submit: SubmitControl::from_workflow(workflow),
            result_area,
            download_enabled: workflow
                .success()
                .and_then(O::image_reference)
                .is_some(),
        }
    }
}
