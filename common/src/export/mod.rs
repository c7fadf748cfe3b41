//! エクスポート（PDFレポート / 画像ダウンロード）
//!
//! どちらも解析結果を読むだけで、ワークフローの状態は変更しない。

pub mod download;
pub mod report;

pub use download::download_image;
pub use report::{build_report_request, export_report, prepare_report};

/// 利用者への通知（ブラウザではalert/confirm）
pub trait Notifier {
    /// 閉じるまで待つ通知
    fn alert(&self, message: &str);

    /// はい/いいえの確認
    fn confirm(&self, message: &str) -> bool;
}

/// ファイル保存（ブラウザではダウンロード）
pub trait FileSink {
    fn save(&self, file_name: &str, mime_type: &str, bytes: &[u8]) -> Result<(), String>;
}
