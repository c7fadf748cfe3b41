//! 顔画像の復元/生成ページ
//!
//! 2つのページは操作の種類が違うだけで、画面構成は同じ。

use crate::browser::{BrowserNotifier, DownloadSink};
use crate::components::{
    consent_gate::ConsentGate, result_box::ResultBox, upload_panel::UploadPanel,
};
use crate::session::{self, FileSlot};
use faceguard_common::export::download_image;
use faceguard_common::{
    ApiConfig, ConsentItem, Generation, ImageOperation, ImageView, Restoration,
};
use gloo::console;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn RestorePage() -> impl IntoView {
    image_page::<Restoration>(
        "Face Restoration",
        "Restore a blurred or damaged face image.",
        "Download restored image",
    )
}

#[component]
pub fn GeneratePage() -> impl IntoView {
    image_page::<Generation>(
        "Face Generation",
        "Generate a new face image from an uploaded photo.",
        "Download generated image",
    )
}

fn image_page<O: ImageOperation<Params = ()>>(
    title: &'static str,
    description: &'static str,
    download_label: &'static str,
) -> impl IntoView {
    let api = use_context::<ApiConfig>().unwrap_or_default();
    let (controller, state) = session::start::<O, _>(&api, ImageView::from_workflow::<O>);
    let slot = FileSlot::new();

    let on_file = move |file: web_sys::File| slot.pick(controller, file);
    let on_consent =
        move |item: ConsentItem, checked: bool| controller.with_value(|c| c.set_consent(item, checked));
    let on_submit = move |_| session::submit(controller);

    let on_download = move |_| {
        let Some(controller) = controller.try_get_value() else {
            return;
        };
        spawn_local(async move {
            if let Err(e) = download_image(&*controller, &BrowserNotifier, &DownloadSink).await {
                console::debug!("image not downloaded:", e.to_string());
            }
        });
    };

    let rows = Signal::derive(move || state.with(|v| v.consent.clone()));
    let area = Signal::derive(move || state.with(|v| v.result_area.clone()));

    view! {
        <section class="page">
            <h2>{title}</h2>
            <p class="text-muted">{description}</p>

            <UploadPanel preview=slot.preview() on_file=on_file />

            <ConsentGate items=O::required_consent() rows=rows on_change=on_consent />

            <button
                class="btn btn-primary"
                disabled=move || state.with(|v| v.submit.busy)
                on:click=on_submit
            >
                {move || state.with(|v| v.submit.label.clone())}
            </button>

            <ResultBox area=area />

            <button
                class="btn btn-secondary"
                disabled=move || !state.with(|v| v.download_enabled)
                on:click=on_download
            >
                {download_label}
            </button>
        </section>
    }
}
