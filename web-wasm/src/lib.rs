//! Crash Symbolizer Web App (Leptos + WASM)

mod api;
mod app;
mod browser;
mod components;
mod logger;
mod poller;
mod state;
mod storage;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Debug);
    leptos::mount::mount_to_body(app::App);
}
