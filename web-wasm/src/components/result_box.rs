//! 結果エリア

use faceguard_common::ResultArea;
use leptos::prelude::*;

#[component]
pub fn ResultBox(area: Signal<ResultArea>) -> impl IntoView {
    view! {
        <div class="result-box">
            {move || match area.get() {
                ResultArea::Placeholder(text) => view! { <p class="text-muted">{text}</p> }.into_any(),
                ResultArea::Image(url) => view! { <img class="result-image" src=url alt="result" /> }.into_any(),
                ResultArea::Notice(text) => view! { <p class="notice">{text}</p> }.into_any(),
                ResultArea::Error(message) => view! { <p class="error">{message}</p> }.into_any(),
            }}
        </div>
    }
}
