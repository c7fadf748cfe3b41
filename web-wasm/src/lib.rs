//! Faceguard Web App (Leptos + WASM)

mod api;
mod app;
mod browser;
mod components;
mod session;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    gloo::console::log!("faceguard", env!("CARGO_PKG_VERSION"));
    leptos::mount::mount_to_body(app::App);
}
