//! エラー型定義
//!
//! - TransportError: 通信層のエラー（ネットワーク、ステータス、タイムアウト、デコード）
//! - Rejection: 送信前の検証エラー（ネットワーク呼び出しは発生しない）
//! - ExportError: レポート/画像ダウンロードのエラー（解析結果には影響しない）

use thiserror::Error;

/// 通信エラー
///
/// 利用者には表示しない。ワークフロー側で `Failure::server()` に正規化される。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected status: {0}")]
    Status(u16),

    #[error("request timed out")]
    Timeout,

    #[error("decode error: {0}")]
    Decode(String),
}

/// 送信拒否（同期的に判定され、状態は変化しない）
///
/// Displayはそのまま利用者向けの通知文として使う。
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    #[error("Please select a file first.")]
    NoFile,

    #[error("Please agree to all of the consent items.")]
    ConsentIncomplete,

    #[error("A request is already in progress.")]
    InFlight,
}

/// エクスポート（PDFレポート/画像保存）のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    #[error("no successful result to export")]
    NoResult,

    #[error("export cancelled by user")]
    Cancelled,

    #[error("export request failed: {0}")]
    Transport(#[from] TransportError),

    #[error("failed to save file: {0}")]
    Save(String),
}
