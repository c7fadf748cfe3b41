//! 端末向けの通知・保存・表示
//!
//! ブラウザのalert/confirm/ダウンロードに相当するものを端末で提供する。

use crate::error::Result;
use dialoguer::Confirm;
use faceguard_common::presenter::{DetectionView, ImageView, ResultArea};
use faceguard_common::{ConsentItem, FileSink, Notifier};
use indicatif::{ProgressBar, ProgressStyle};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// dialoguerによる確認（`--yes` なら常に承諾）
pub struct TerminalNotifier {
    assume_yes: bool,
}

impl TerminalNotifier {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Notifier for TerminalNotifier {
    fn alert(&self, message: &str) {
        println!("ℹ {}", message);
    }

    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        Confirm::new()
            .with_prompt(message)
            .default(true)
            .interact()
            .unwrap_or(false)
    }
}

/// 出力ディレクトリへの保存
pub struct DirectorySink {
    dir: PathBuf,
    saved: RefCell<Vec<PathBuf>>,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            saved: RefCell::new(Vec::new()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 保存したファイルのパス
    pub fn saved(&self) -> Vec<PathBuf> {
        self.saved.borrow().clone()
    }
}

impl FileSink for DirectorySink {
    fn save(&self, file_name: &str, _mime_type: &str, bytes: &[u8]) -> std::result::Result<(), String> {
        std::fs::create_dir_all(&self.dir).map_err(|e| e.to_string())?;
        let path = self.dir.join(file_name);
        std::fs::write(&path, bytes).map_err(|e| e.to_string())?;
        tracing::debug!(path = %path.display(), size = bytes.len(), "file written");
        self.saved.borrow_mut().push(path);
        Ok(())
    }
}

/// 必須の同意項目を1つずつ確認する
///
/// 承諾された項目だけを返す。`--yes` なら全項目。
pub fn collect_consent(required: &[ConsentItem], assume_yes: bool) -> Result<Vec<ConsentItem>> {
    if assume_yes {
        return Ok(required.to_vec());
    }

    let mut accepted = Vec::new();
    for &item in required {
        let agreed = Confirm::new()
            .with_prompt(item.statement())
            .default(false)
            .interact()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        if agreed {
            accepted.push(item);
        }
    }
    Ok(accepted)
}

/// 送信中のスピナー
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// 結果エリアの1行表示（画像本体は出さない）
pub fn describe_result_area(area: &ResultArea) -> String {
    match area {
        ResultArea::Placeholder(text) | ResultArea::Notice(text) => text.clone(),
        ResultArea::Image(url) if url.starts_with("data:") => "[image attached]".to_string(),
        ResultArea::Image(url) => url.clone(),
        ResultArea::Error(message) => format!("✖ {}", message),
    }
}

pub fn print_detection(view: &DetectionView) {
    println!("{}", view.summary_text());
    if let Some(activation) = &view.activation {
        println!("{}", activation);
    }
    if let ResultArea::Error(_) = view.result_area {
        println!("{}", describe_result_area(&view.result_area));
    }
}

pub fn print_image(view: &ImageView) {
    println!("{}", describe_result_area(&view.result_area));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assume_yes_confirms() {
        let notifier = TerminalNotifier::new(true);
        assert!(notifier.confirm("Download?"));
    }

    #[test]
    fn test_collect_consent_assume_yes() {
        let items = [ConsentItem::Rights, ConsentItem::Disclaimer];
        let accepted = collect_consent(&items, true).unwrap();
        assert_eq!(accepted, items.to_vec());
    }

    #[test]
    fn test_describe_result_area() {
        assert_eq!(
            describe_result_area(&ResultArea::Image("data:image/png;base64,AAAA".into())),
            "[image attached]"
        );
        assert_eq!(
            describe_result_area(&ResultArea::Image("http://x/r.png".into())),
            "http://x/r.png"
        );
        assert_eq!(
            describe_result_area(&ResultArea::Error("server error occurred".into())),
            "✖ server error occurred"
        );
    }
}
