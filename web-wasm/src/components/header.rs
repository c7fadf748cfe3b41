//! ヘッダーコンポーネント（ページ切り替え）

use crate::app::Page;
use leptos::prelude::*;

#[component]
pub fn Header(page: ReadSignal<Page>, set_page: WriteSignal<Page>) -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Faceguard"</h1>
            <nav class="nav">
                {Page::ALL
                    .iter()
                    .map(|&target| {
                        view! {
                            <button
                                class=move || if page.get() == target { "nav-item active" } else { "nav-item" }
                                on:click=move |_| set_page.set(target)
                            >
                                {target.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>
        </header>
    }
}
