//! Visual Diff Web App (Leptos + WASM)

mod app;
mod components;
mod drag;
mod images;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    gloo::console::debug!("visual-diff web starting");
    leptos::mount::mount_to_body(app::App);
}
