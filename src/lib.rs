/// Tab Deduplicator - Chrome Extension that closes duplicate tabs
/// Built with Rust + WASM + Yew

mod background;
pub mod badge;
pub mod chrome;
pub mod commands;
pub mod error;
pub mod exclusions;
pub mod host;
pub mod operations;
pub mod reactor;
pub mod settings;
pub mod tab_data;
pub mod ui;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Badge text for a given state, exposed for JavaScript callers
#[wasm_bindgen]
pub fn badge_text(active: bool, prevented_duplicates_count: u32) -> String {
    badge::badge_text(&settings::Settings {
        active,
        prevented_duplicates_count: prevented_duplicates_count.into(),
        exclusion_patterns: Vec::new(),
    })
}

// Check popup text the way Save does; returns the error message, if any
#[wasm_bindgen]
pub fn validate_exclusions(text: &str) -> Option<String> {
    exclusions::validate_patterns(&exclusions::parse_pattern_lines(text))
        .err()
        .map(|e| e.to_string())
}

// Background service worker start-up: paints the badge from storage
#[wasm_bindgen]
pub fn start_background() {
    background::start();
}

// Event entry points, called by the listeners in background.js once the
// module has loaded

#[wasm_bindgen]
pub async fn on_installed() {
    background::installed().await;
}

#[wasm_bindgen]
pub async fn on_message(message: JsValue) {
    background::message(message).await;
}

#[wasm_bindgen]
pub async fn on_tab_created(tab: JsValue) {
    background::tab_created(tab).await;
}

#[wasm_bindgen]
pub async fn on_tab_updated(tab_id: Option<i32>, change: JsValue) {
    background::tab_updated(tab_id, change).await;
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}
