/// Event reactor: decides per browser event whether to deduplicate, and
/// carries out the resolution against the injected hosts
///
/// Nothing here locks. Two events can interleave at any `.await` and both
/// act on stale settings; the worst outcome is an off-by-one counter.
use log::{debug, info, warn};

use crate::badge::{BADGE_COLOR, badge_text};
use crate::commands::Command;
use crate::error::DedupError;
use crate::exclusions::{parse_pattern_lines, validate_patterns};
use crate::host::{Indicator, SettingsStore, TabHost};
use crate::operations::{Gate, dedup_gate, find_duplicate, plan_bulk_deduplicate};
use crate::settings::{PartialSettings, Settings};
use crate::tab_data::{TabChange, TabInfo};

/// What a tab event ended up doing
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// No usable tab id or URL on the event
    Ignored,
    Inactive,
    Excluded,
    NoDuplicate,
    /// The matched tab could not be brought forward; current tab left open
    Unresolvable,
    /// Focused `kept`, closed the current tab
    Resolved { kept: i32 },
}

pub struct Reactor<S, T, I> {
    store: S,
    tabs: T,
    indicator: I,
}

impl<S, T, I> Reactor<S, T, I>
where
    S: SettingsStore,
    T: TabHost,
    I: Indicator,
{
    pub fn new(store: S, tabs: T, indicator: I) -> Self {
        Reactor {
            store,
            tabs,
            indicator,
        }
    }

    pub async fn settings(&self) -> Result<Settings, DedupError> {
        Ok(Settings::from(self.store.read().await?))
    }

    /// Worker start-up: badge colour and current text
    pub async fn start(&self) -> Result<(), DedupError> {
        self.indicator.set_color(BADGE_COLOR).await?;
        self.refresh_indicator().await
    }

    /// First install (or update): seed missing keys without touching
    /// values already present
    pub async fn on_installed(&self) -> Result<(), DedupError> {
        self.indicator.set_color(BADGE_COLOR).await?;

        let stored = self.store.read().await?;
        let patch = stored.missing_install_defaults();
        if !patch.is_empty() {
            debug!("Initializing settings: {:?}", patch);
            self.store.write(&patch).await?;
        }

        self.refresh_indicator().await
    }

    pub async fn on_tab_created(&self, tab: &TabInfo) -> Result<Outcome, DedupError> {
        match (tab.tab_id(), tab.page_url()) {
            (Some(id), Some(url)) => self.check_and_resolve(id, url).await,
            _ => Ok(Outcome::Ignored),
        }
    }

    /// Only navigations count: updates whose change info carries no URL
    /// (title, loading status, ...) are ignored
    pub async fn on_tab_updated(
        &self,
        tab_id: Option<i32>,
        change: &TabChange,
    ) -> Result<Outcome, DedupError> {
        let url = change.url.as_deref().filter(|url| !url.is_empty());
        match (tab_id.filter(|&id| id >= 0), url) {
            (Some(id), Some(url)) => self.check_and_resolve(id, url).await,
            _ => Ok(Outcome::Ignored),
        }
    }

    pub async fn check_and_resolve(&self, tab_id: i32, url: &str) -> Result<Outcome, DedupError> {
        let settings = self.settings().await?;
        match dedup_gate(&settings, url) {
            Gate::Proceed => self.resolve_duplicate(tab_id, url).await,
            Gate::Inactive => Ok(Outcome::Inactive),
            Gate::NoUrl => Ok(Outcome::Ignored),
            Gate::Excluded => {
                debug!("{} matches an exclusion, duplicate allowed", url);
                Ok(Outcome::Excluded)
            }
        }
    }

    /// Look for another tab already showing `url`; if found, bring it
    /// forward, reload it and close `tab_id`
    pub async fn resolve_duplicate(&self, tab_id: i32, url: &str) -> Result<Outcome, DedupError> {
        let tabs = self.tabs.query_all().await?;

        let Some(existing) = find_duplicate(&tabs, tab_id, url) else {
            return Ok(Outcome::NoDuplicate);
        };
        let (Some(kept), Some(window_id)) = (existing.tab_id(), existing.window()) else {
            debug!("Duplicate of {} has no window, leaving tab {} open", url, tab_id);
            return Ok(Outcome::Unresolvable);
        };

        if let Err(e) = self.tabs.activate(kept).await {
            debug!("Tab {} vanished before activation: {}", kept, e);
            return Ok(Outcome::Unresolvable);
        }
        if let Err(e) = self.tabs.focus_window(window_id).await {
            warn!("{}", e);
        }
        if let Err(e) = self.tabs.reload(kept).await {
            warn!("{}", e);
        }
        if let Err(e) = self.tabs.close(&[tab_id]).await {
            warn!("{}", e);
            return Ok(Outcome::Resolved { kept });
        }

        info!("Closed duplicate tab {} of tab {} ({})", tab_id, kept, url);
        self.add_prevented(1).await?;
        Ok(Outcome::Resolved { kept })
    }

    pub async fn handle_command(&self, command: Command) -> Result<(), DedupError> {
        match command {
            Command::TurnOnOff => self.toggle().await.map(|_| ()),
            Command::Deduplicate => self.deduplicate_all().await.map(|_| ()),
        }
    }

    /// Flip the active flag; returns the new value
    pub async fn toggle(&self) -> Result<bool, DedupError> {
        let active = !self.settings().await?.active;
        self.store.write(&PartialSettings::with_active(active)).await?;
        info!("Deduplication {}", if active { "on" } else { "off" });
        self.refresh_indicator().await?;
        Ok(active)
    }

    /// Close every tab whose URL is already open in an older tab; returns
    /// how many were closed
    pub async fn deduplicate_all(&self) -> Result<usize, DedupError> {
        let tabs = self.tabs.query_all().await?;
        let remove_ids = plan_bulk_deduplicate(&tabs);

        if remove_ids.is_empty() {
            debug!("No duplicates found");
            return Ok(0);
        }

        self.tabs.close(&remove_ids).await?;
        info!("Closed {} duplicate tabs", remove_ids.len());
        self.add_prevented(remove_ids.len() as u64).await?;
        Ok(remove_ids.len())
    }

    /// Validate and persist the popup's exclusion text
    ///
    /// Nothing is written if any line fails to compile.
    pub async fn save_exclusions(&self, text: &str) -> Result<Vec<String>, DedupError> {
        let patterns = parse_pattern_lines(text);
        validate_patterns(&patterns)?;
        self.store
            .write(&PartialSettings::with_exclusions(patterns.clone()))
            .await?;
        Ok(patterns)
    }

    pub async fn refresh_indicator(&self) -> Result<(), DedupError> {
        let settings = self.settings().await?;
        self.indicator.set_text(&badge_text(&settings)).await?;
        Ok(())
    }

    async fn add_prevented(&self, increment: u64) -> Result<(), DedupError> {
        let count = self.settings().await?.prevented_duplicates_count;
        self.store
            .write(&PartialSettings::with_prevented_count(count + increment))
            .await?;
        self.refresh_indicator().await
    }
}
