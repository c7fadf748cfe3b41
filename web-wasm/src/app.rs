//! メインアプリケーションコンポーネント

use crate::components::{
    detect_page::DetectPage,
    header::Header,
    image_page::{GeneratePage, RestorePage},
};
use faceguard_common::ApiConfig;
use leptos::prelude::*;

/// 表示中のページ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Detect,
    Restore,
    Generate,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Detect, Page::Restore, Page::Generate];

    pub fn label(&self) -> &'static str {
        match self {
            Page::Detect => "Detect",
            Page::Restore => "Restore",
            Page::Generate => "Generate",
        }
    }
}

/// ビルド時の `FACEGUARD_API_URL`（未設定ならデフォルト）
pub fn api_config() -> ApiConfig {
    ApiConfig::from_base_url(option_env!("FACEGUARD_API_URL"))
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    provide_context(api_config());

    let (page, set_page) = signal(Page::Detect);

    view! {
        <div class="container">
            <Header page=page set_page=set_page />

            <main>
                {move || match page.get() {
                    Page::Detect => view! { <DetectPage /> }.into_any(),
                    Page::Restore => view! { <RestorePage /> }.into_any(),
                    Page::Generate => view! { <GeneratePage /> }.into_any(),
                }}
            </main>
        </div>
    }
}
