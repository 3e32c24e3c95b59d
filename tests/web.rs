//! Browser tests for the exported functions; run with `wasm-pack test --headless --chrome`
#![cfg(target_arch = "wasm32")]

use tab_deduplicator::{badge_text, validate_exclusions};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn badge_text_matches_state() {
    assert_eq!(badge_text(true, 0), "");
    assert_eq!(badge_text(true, 7), "7");
    assert_eq!(badge_text(false, 7), "OFF");
}

#[wasm_bindgen_test]
fn validate_exclusions_reports_bad_regex() {
    assert_eq!(validate_exclusions("^chrome://\n\nyoutube"), None);

    let message = validate_exclusions("ok\n(broken").unwrap();
    assert!(message.starts_with("Invalid Regex: "));
}
