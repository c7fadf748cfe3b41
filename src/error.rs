use thiserror::Error;

#[derive(Error, Debug)]
pub enum FaceguardError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("対応していない画像形式です: {0}")]
    UnsupportedImage(String),

    #[error("送信できません: {0}")]
    Rejected(#[from] faceguard_common::Rejection),

    #[error("HTTPクライアントの初期化に失敗: {0}")]
    HttpClient(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FaceguardError>;
