/// Background service worker: browser events in, reactor calls out
///
/// The listeners themselves live in `extension/background.js`, registered
/// synchronously on the worker's first turn so a waking event is not lost.
/// Each one waits for the module to load and then calls in here.
use std::fmt::Debug;

use log::{debug, error, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::chrome::{self, from_js};
use crate::commands::Command;
use crate::error::DedupError;
use crate::tab_data::{TabChange, TabInfo};

/// Errors from event handling end here, in the log
fn settle<T: Debug>(event: &'static str, result: Result<T, DedupError>) {
    match result {
        Ok(result) => debug!("{}: {:?}", event, result),
        Err(e) => error!("{}: {}", event, e),
    }
}

/// Paint the badge from stored state when the worker starts
pub fn start() {
    spawn_local(async {
        settle("startup", chrome::reactor().start().await);
    });
}

pub async fn installed() {
    settle("onInstalled", chrome::reactor().on_installed().await);
}

pub async fn message(message: JsValue) {
    let command: Command = match from_js("runtime.onMessage", message) {
        Ok(command) => command,
        Err(e) => {
            debug!("Ignoring message: {}", e);
            return;
        }
    };
    settle("onMessage", chrome::reactor().handle_command(command).await);
}

pub async fn tab_created(tab: JsValue) {
    let tab: TabInfo = match from_js("tabs.onCreated", tab) {
        Ok(tab) => tab,
        Err(e) => {
            warn!("{}", e);
            return;
        }
    };
    settle("tabs.onCreated", chrome::reactor().on_tab_created(&tab).await);
}

pub async fn tab_updated(tab_id: Option<i32>, change: JsValue) {
    let change: TabChange = match from_js("tabs.onUpdated", change) {
        Ok(change) => change,
        Err(e) => {
            warn!("{}", e);
            return;
        }
    };
    settle(
        "tabs.onUpdated",
        chrome::reactor().on_tab_updated(tab_id, &change).await,
    );
}
