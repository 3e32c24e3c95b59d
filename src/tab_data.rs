/// Data structures for browser tabs as seen by the deduplicator
use serde::{Deserialize, Serialize};

/// Chrome uses -1 (`TAB_ID_NONE` / `WINDOW_ID_NONE`) for "no id"
const ID_NONE: i32 = -1;

/// Information about a browser tab
///
/// Only the fields the deduplicator reads are kept; everything else Chrome
/// sends along is ignored on deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TabInfo {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub window_id: Option<i32>,
}

impl TabInfo {
    pub fn new(id: i32, url: &str, window_id: i32) -> TabInfo {
        TabInfo {
            id: Some(id),
            url: Some(url.to_string()),
            window_id: Some(window_id),
        }
    }

    /// The tab id, unless absent or `TAB_ID_NONE`
    pub fn tab_id(&self) -> Option<i32> {
        self.id.filter(|&id| id != ID_NONE)
    }

    /// The owning window id, unless absent or `WINDOW_ID_NONE`
    pub fn window(&self) -> Option<i32> {
        self.window_id.filter(|&id| id != ID_NONE)
    }

    /// The URL, unless absent or empty
    pub fn page_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.is_empty())
    }
}

/// The `changeInfo` object delivered with `tabs.onUpdated`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TabChange {
    #[serde(default)]
    pub url: Option<String>,
}
