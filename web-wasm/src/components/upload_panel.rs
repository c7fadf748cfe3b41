//! アップロードエリアコンポーネント

use leptos::html::Input;
use leptos::prelude::*;
use web_sys::HtmlInputElement;

#[component]
pub fn UploadPanel<F>(preview: ReadSignal<Option<String>>, on_file: F) -> impl IntoView
where
    F: Fn(web_sys::File) + 'static,
{
    let input_ref = NodeRef::<Input>::new();

    let on_click = move |_| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    let on_change = move |ev: web_sys::Event| {
        let input: HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        // 同じファイルを選び直せるようにする
        input.set_value("");
        on_file(file);
    };

    view! {
        <div class="upload-area" on:click=on_click>
            <input
                type="file"
                accept="image/*"
                class="hidden"
                node_ref=input_ref
                on:change=on_change
                on:click=|ev| ev.stop_propagation()
            />
            {move || match preview.get() {
                Some(url) => view! { <img class="preview" src=url alt="preview" /> }.into_any(),
                None => view! {
                    <div class="upload-icon">"📷"</div>
                    <p>"Click to select an image"</p>
                    <p class="text-muted">"Supported: JPEG, PNG, WEBP"</p>
                }
                .into_any(),
            }}
        </div>
    }
}
