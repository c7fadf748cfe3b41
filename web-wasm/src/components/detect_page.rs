//! ディープフェイク判別ページ

use crate::browser::{BrowserNotifier, DownloadSink};
use crate::components::{
    consent_gate::ConsentGate, result_box::ResultBox, upload_panel::UploadPanel,
};
use crate::session::{self, FileSlot};
use faceguard_common::export::export_report;
use faceguard_common::{
    ApiConfig, ConsentItem, Detection, DetectionView, ModelType, Operation,
};
use gloo::console;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn DetectPage() -> impl IntoView {
    let api = use_context::<ApiConfig>().unwrap_or_default();
    let (controller, state) = session::start::<Detection, _>(&api, DetectionView::from_workflow);
    let slot = FileSlot::new();

    let on_file = move |file: web_sys::File| slot.pick(controller, file);
    let on_consent = move |item: ConsentItem, checked: bool| controller.with_value(|c| c.set_consent(item, checked));
    let on_submit = move |_| session::submit(controller);

    let on_report = move |_| {
        let Some(controller) = controller.try_get_value() else {
            return;
        };
        spawn_local(async move {
            if let Err(e) = export_report(&*controller, &BrowserNotifier, &DownloadSink).await {
                console::debug!("report not exported:", e.to_string());
            }
        });
    };

    let rows = Signal::derive(move || state.with(|v| v.consent.clone()));
    let area = Signal::derive(move || state.with(|v| v.result_area.clone()));

    view! {
        <section class="page">
            <h2>"Deepfake Detection"</h2>
            <p class="text-muted">"Upload a face image to check whether it has been manipulated."</p>

            <UploadPanel preview=slot.preview() on_file=on_file />

            <div class="model-select">
                {ModelType::ALL
                    .iter()
                    .map(|&model| {
                        view! {
                            <label class="model-option">
                                <input
                                    type="radio"
                                    name="model_type"
                                    prop:checked=move || state.with(|v| v.model == model)
                                    on:change=move |_| controller.with_value(|c| c.set_params(model))
                                />
                                {model.label()}
                            </label>
                        }
                    })
                    .collect_view()}
            </div>

            <ConsentGate items=Detection::required_consent() rows=rows on_change=on_consent />

            <button
                class="btn btn-primary"
                disabled=move || state.with(|v| v.submit.busy)
                on:click=on_submit
            >
                {move || state.with(|v| v.submit.label.clone())}
            </button>

            <ResultBox area=area />

            <div class="summary-box">
                <p class="summary">{move || state.with(|v| v.summary_text().to_string())}</p>
                <p class="activation">
                    {move || state.with(|v| v.activation.clone().unwrap_or_default())}
                </p>
            </div>

            <button
                class="btn btn-secondary"
                disabled=move || !state.with(|v| v.report_enabled)
                on:click=on_report
            >
                "Download PDF report"
            </button>
        </section>
    }
}
