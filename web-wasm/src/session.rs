//! ページごとのワークフロー保持
//!
//! コントローラ（Rc、非Send）はLocalStorageのStoredValueに置き、
//! 表示はSendなビューモデルをシグナルへ写して行う。

use crate::api::FetchTransport;
use crate::browser::{read_file, BlobUrlPreview, BrowserNotifier};
use faceguard_common::{
    ApiConfig, Notifier, Operation, PendingRead, SelectedFile, UploadBox, Workflow, WorkflowController,
};
use gloo::console;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;

pub type Controller<O> = WorkflowController<O, FetchTransport>;

/// 状態変化のたびに `project` の結果を返すシグナルを作る
pub fn start<O, V>(
    api: &ApiConfig,
    project: fn(&Workflow<O>) -> V,
) -> (StoredValue<Rc<Controller<O>>, LocalStorage>, RwSignal<V>)
where
    O: Operation,
    V: Default + Send + Sync + 'static,
{
    let controller = WorkflowController::<O, _>::new(FetchTransport::new(api.clone()))
        .with_advisory_upload(api.advisory_upload);

    let view_state = RwSignal::new(V::default());
    // ページ破棄後に完了した送信の通知は捨てる
    controller.subscribe(move |wf| {
        let _ = view_state.try_set(project(wf));
    });

    (StoredValue::new_local(Rc::new(controller)), view_state)
}

/// 送信（拒否されたら通知）
pub fn submit<O: Operation>(controller: StoredValue<Rc<Controller<O>>, LocalStorage>) {
    let Some(controller) = controller.try_get_value() else {
        return;
    };
    spawn_local(async move {
        match controller.submit().await {
            Ok(settlement) => console::debug!(O::NAME, format!("{:?}", settlement)),
            Err(rejection) => BrowserNotifier.alert(&rejection.to_string()),
        }
    });
}

/// 選択中のファイルとプレビューURL
#[derive(Clone, Copy)]
pub struct FileSlot {
    uploads: StoredValue<UploadBox<BlobUrlPreview>>,
    preview: RwSignal<Option<String>>,
}

impl Default for FileSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSlot {
    pub fn new() -> Self {
        Self {
            uploads: StoredValue::new(UploadBox::new(BlobUrlPreview)),
            preview: RwSignal::new(None),
        }
    }

    pub fn preview(&self) -> ReadSignal<Option<String>> {
        self.preview.read_only()
    }

    /// 選択されたファイルを読み込んでコントローラへ渡す
    ///
    /// 読み込み中に別のファイルが選ばれた場合、先の読み込み結果は捨てる。
    pub fn pick<O: Operation>(
        &self,
        controller: StoredValue<Rc<Controller<O>>, LocalStorage>,
        file: web_sys::File,
    ) {
        let Some(read) = self.uploads.try_update_value(|uploads| uploads.begin_read()) else {
            return;
        };
        let slot = *self;
        spawn_local(async move {
            match read_file(file).await {
                Ok(selected) => slot.finish(controller, read, selected),
                Err(e) => console::error!("failed to read file:", e),
            }
        });
    }

    /// 前のプレビューを解放して差し替える
    fn finish<O: Operation>(
        &self,
        controller: StoredValue<Rc<Controller<O>>, LocalStorage>,
        read: PendingRead,
        file: SelectedFile,
    ) {
        let name = file.file_name.clone();
        let selected = self
            .uploads
            .try_update_value(|uploads| {
                uploads
                    .finish_read(read, file)
                    .map(|file| (file, uploads.preview().cloned()))
            })
            .flatten();

        let Some((file, preview)) = selected else {
            console::debug!("superseded file read discarded:", name);
            return;
        };
        console::log!("file selected:", file.file_name.clone());
        let _ = self.preview.try_set(preview);
        controller.with_value(|c| c.select_file(file));
    }
}
