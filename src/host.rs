/// Browser collaborators the reactor talks to
///
/// Every call is an asynchronous round trip to the host. The extension runs
/// single-threaded, so the futures are not `Send`.
use crate::error::HostError;
use crate::settings::PartialSettings;
use crate::tab_data::TabInfo;

/// Persistent key-value settings store
#[allow(async_fn_in_trait)]
pub trait SettingsStore {
    /// Read every known key; absent keys come back as `None`
    async fn read(&self) -> Result<PartialSettings, HostError>;

    /// Write the keys present in `patch`, leaving the others alone
    async fn write(&self, patch: &PartialSettings) -> Result<(), HostError>;
}

#[allow(async_fn_in_trait)]
pub trait TabHost {
    async fn query_all(&self) -> Result<Vec<TabInfo>, HostError>;

    /// Make `tab_id` the active tab of its window
    async fn activate(&self, tab_id: i32) -> Result<(), HostError>;

    async fn focus_window(&self, window_id: i32) -> Result<(), HostError>;

    async fn reload(&self, tab_id: i32) -> Result<(), HostError>;

    async fn close(&self, tab_ids: &[i32]) -> Result<(), HostError>;
}

/// The toolbar badge
#[allow(async_fn_in_trait)]
pub trait Indicator {
    async fn set_text(&self, text: &str) -> Result<(), HostError>;

    async fn set_color(&self, color: &str) -> Result<(), HostError>;
}
