//! ワークフローで扱う型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - SelectedFile: 利用者が選択した画像
//! - ModelType: 判別モデルの種類（Detectionのみ）
//! - PredictResponse / RestoreResponse / GenerateResponse: サーバー応答
//! - ReportRequest: PDFレポート生成リクエスト

use serde::{Deserialize, Serialize};
use std::fmt;

/// 選択された画像ファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// 判別モデル
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelType {
    #[default]
    Korean,
    Foreign,
}

impl ModelType {
    pub const ALL: [ModelType; 2] = [ModelType::Korean, ModelType::Foreign];

    /// multipartの `model_type` フィールドに載せる値
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelType::Korean => "korean",
            ModelType::Foreign => "foreign",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ModelType::Korean => "Korean images",
            ModelType::Foreign => "Foreign images",
        }
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `/api/predict` の応答
///
/// サーバーのリビジョンによって欠けるフィールドがあるため全てOption。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pred_label: Option<String>,

    /// 信頼度（パーセント）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    /// Fake確率（0.0〜1.0）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fake_probability: Option<f64>,

    /// Grad-CAMヒートマップ（base64 PNG）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gradcam: Option<String>,

    /// サーバーが使用したモデル
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// `/api/restore` の応答
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestoreResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restored_image_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// `/api/generate` の応答
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_image_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// `/api/report` へ送るJSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub result: String,
    pub fake_probability: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gradcam: Option<String>,
    pub model_type: String,
    pub model_name: String,
}
