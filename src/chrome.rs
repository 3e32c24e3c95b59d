/// Bindings to the Chrome extension APIs and the host implementations
/// backed by them
use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

use crate::commands::Command;
use crate::error::HostError;
use crate::host::{Indicator, SettingsStore, TabHost};
use crate::reactor::Reactor;
use crate::settings::{ALL_KEYS, PartialSettings};
use crate::tab_data::TabInfo;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "local"], js_name = get)]
    async fn storage_get(keys: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "local"], js_name = set)]
    async fn storage_set(items: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = query)]
    async fn tabs_query(query_info: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = update)]
    async fn tabs_update(tab_id: i32, update_properties: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = reload)]
    async fn tabs_reload(tab_id: i32) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = remove)]
    async fn tabs_remove(tab_ids: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "windows"], js_name = update)]
    async fn windows_update(window_id: i32, update_info: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "action"], js_name = setBadgeText)]
    async fn action_set_badge_text(details: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "action"], js_name = setBadgeBackgroundColor)]
    async fn action_set_badge_background_color(details: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "runtime"], js_name = sendMessage)]
    async fn runtime_send_message(message: JsValue) -> Result<JsValue, JsValue>;
}

#[derive(Serialize)]
struct TabUpdate {
    active: bool,
}

#[derive(Serialize)]
struct WindowUpdate {
    focused: bool,
}

#[derive(Serialize)]
struct BadgeText<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct BadgeColor<'a> {
    color: &'a str,
}

pub type ChromeReactor = Reactor<ChromeStorage, ChromeTabs, ChromeAction>;

pub fn reactor() -> ChromeReactor {
    Reactor::new(ChromeStorage, ChromeTabs, ChromeAction)
}

pub fn to_js<T: Serialize>(operation: &'static str, value: &T) -> Result<JsValue, HostError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| HostError::new(operation, e.to_string()))
}

pub fn from_js<T: DeserializeOwned>(operation: &'static str, value: JsValue) -> Result<T, HostError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| HostError::new(operation, e.to_string()))
}

/// Send a command to the background worker
pub async fn send_command(command: Command) -> Result<(), HostError> {
    let message = to_js("runtime.sendMessage", &command)?;
    runtime_send_message(message)
        .await
        .map_err(|e| HostError::from_js("runtime.sendMessage", e))?;
    Ok(())
}

/// `chrome.storage.local`
pub struct ChromeStorage;

impl SettingsStore for ChromeStorage {
    async fn read(&self) -> Result<PartialSettings, HostError> {
        let keys = to_js("storage.local.get", &ALL_KEYS)?;
        let items = storage_get(keys)
            .await
            .map_err(|e| HostError::from_js("storage.local.get", e))?;
        from_js("storage.local.get", items)
    }

    async fn write(&self, patch: &PartialSettings) -> Result<(), HostError> {
        let items = to_js("storage.local.set", patch)?;
        storage_set(items)
            .await
            .map_err(|e| HostError::from_js("storage.local.set", e))?;
        Ok(())
    }
}

/// `chrome.tabs` and `chrome.windows`
pub struct ChromeTabs;

impl TabHost for ChromeTabs {
    async fn query_all(&self) -> Result<Vec<TabInfo>, HostError> {
        let tabs = tabs_query(js_sys::Object::new().into())
            .await
            .map_err(|e| HostError::from_js("tabs.query", e))?;
        from_js("tabs.query", tabs)
    }

    async fn activate(&self, tab_id: i32) -> Result<(), HostError> {
        let props = to_js("tabs.update", &TabUpdate { active: true })?;
        tabs_update(tab_id, props)
            .await
            .map_err(|e| HostError::from_js("tabs.update", e))?;
        Ok(())
    }

    async fn focus_window(&self, window_id: i32) -> Result<(), HostError> {
        let info = to_js("windows.update", &WindowUpdate { focused: true })?;
        windows_update(window_id, info)
            .await
            .map_err(|e| HostError::from_js("windows.update", e))?;
        Ok(())
    }

    async fn reload(&self, tab_id: i32) -> Result<(), HostError> {
        tabs_reload(tab_id)
            .await
            .map_err(|e| HostError::from_js("tabs.reload", e))?;
        Ok(())
    }

    async fn close(&self, tab_ids: &[i32]) -> Result<(), HostError> {
        let ids = to_js("tabs.remove", &tab_ids)?;
        tabs_remove(ids)
            .await
            .map_err(|e| HostError::from_js("tabs.remove", e))?;
        Ok(())
    }
}

/// `chrome.action` badge
pub struct ChromeAction;

impl Indicator for ChromeAction {
    async fn set_text(&self, text: &str) -> Result<(), HostError> {
        let details = to_js("action.setBadgeText", &BadgeText { text })?;
        action_set_badge_text(details)
            .await
            .map_err(|e| HostError::from_js("action.setBadgeText", e))?;
        Ok(())
    }

    async fn set_color(&self, color: &str) -> Result<(), HostError> {
        let details = to_js("action.setBadgeBackgroundColor", &BadgeColor { color })?;
        action_set_badge_background_color(details)
            .await
            .map_err(|e| HostError::from_js("action.setBadgeBackgroundColor", e))?;
        Ok(())
    }
}
