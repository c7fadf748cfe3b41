//! アップロードボックス
//!
//! 選択中のファイルとそのプレビューを保持する。ネットワークには触れない。
//! プレビュー（ブラウザではblob URL）は差し替え・クリア・破棄のたびに解放する。

use crate::types::SelectedFile;
use std::sync::Arc;

/// プレビュー生成/解放の実装
pub trait PreviewFactory {
    type Handle;

    /// プレビューを作れない場合はNone
    fn create(&self, file: &SelectedFile) -> Option<Self::Handle>;

    fn release(&self, handle: Self::Handle);
}

/// 読み込み中のファイル選択（`begin_read` の順番）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingRead(u64);

/// 選択中のファイル + プレビュー
pub struct UploadBox<F: PreviewFactory> {
    factory: F,
    file: Option<Arc<SelectedFile>>,
    preview: Option<F::Handle>,
    reads: u64,
}

impl<F: PreviewFactory> UploadBox<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            file: None,
            preview: None,
            reads: 0,
        }
    }

    /// ファイルの読み込み開始を記録する（読み込みは非同期で、完了順は選択順と限らない）
    pub fn begin_read(&mut self) -> PendingRead {
        self.reads += 1;
        PendingRead(self.reads)
    }

    /// 読み込み完了: 最後に始めた読み込みなら選択する。後から選ばれたファイルがあればNone
    pub fn finish_read(&mut self, read: PendingRead, file: SelectedFile) -> Option<Arc<SelectedFile>> {
        if read.0 != self.reads {
            return None;
        }
        Some(self.select(file))
    }

    /// 新しいファイルを選択する（前のプレビューは解放）
    pub fn select(&mut self, file: SelectedFile) -> Arc<SelectedFile> {
        self.release_preview();
        let file = Arc::new(file);
        self.preview = self.factory.create(&file);
        self.file = Some(Arc::clone(&file));
        file
    }

    pub fn clear(&mut self) {
        self.release_preview();
        self.file = None;
    }

    pub fn file(&self) -> Option<&Arc<SelectedFile>> {
        self.file.as_ref()
    }

    pub fn preview(&self) -> Option<&F::Handle> {
        self.preview.as_ref()
    }

    fn release_preview(&mut self) {
        if let Some(handle) = self.preview.take() {
            self.factory.release(handle);
        }
    }
}

impl<F: PreviewFactory> Drop for UploadBox<F> {
    fn drop(&mut self) {
        self.release_preview();
    }
}
