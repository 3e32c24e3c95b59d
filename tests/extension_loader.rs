//! Checks on the service worker loader in `extension/background.js`
//!
//! MV3 only delivers the event that woke a worker to listeners registered
//! synchronously on its first turn, before any promise settles.

const BACKGROUND_JS: &str = include_str!("../extension/background.js");

const LISTENERS: [&str; 4] = [
    "chrome.runtime.onInstalled.addListener(",
    "chrome.runtime.onMessage.addListener(",
    "chrome.tabs.onCreated.addListener(",
    "chrome.tabs.onUpdated.addListener(",
];

#[test]
fn listeners_registered_at_top_level() {
    for listener in LISTENERS {
        let line = BACKGROUND_JS
            .lines()
            .find(|line| line.contains(listener))
            .unwrap_or_else(|| panic!("{} missing", listener));
        assert!(
            line.starts_with(listener),
            "{} is not registered at top level: {:?}",
            listener,
            line
        );
    }
}

#[test]
fn listeners_not_registered_after_init() {
    let (before_init, _) = BACKGROUND_JS
        .split_once("init()")
        .expect("loader calls init()");
    assert!(!before_init.contains("addListener"));

    let after_init = BACKGROUND_JS
        .lines()
        .skip_while(|line| !line.contains("init()"))
        .collect::<Vec<_>>()
        .join("\n");
    let wiring = after_init
        .split_once(';')
        .map(|(init_statement, _)| init_statement)
        .unwrap_or_default();
    assert!(!wiring.contains("addListener"), "{}", wiring);
}

#[test]
fn listeners_forward_to_exported_handlers() {
    for handler in [
        "wasm.on_installed(",
        "wasm.on_message(",
        "wasm.on_tab_created(",
        "wasm.on_tab_updated(",
    ] {
        assert!(BACKGROUND_JS.contains(handler), "{} not called", handler);
    }
}
