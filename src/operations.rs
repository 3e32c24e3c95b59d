/// Tab operations: duplicate lookup, bulk deduplication planning, gating

use std::collections::HashSet;

use crate::exclusions::ExclusionFilter;
use crate::settings::Settings;
use crate::tab_data::TabInfo;

/// Order tabs by creation (ascending tab id)
///
/// Chrome hands out tab ids monotonically, so this pins "first" to "oldest"
/// whatever order the host enumerated in. Tabs without an id go last, in
/// their original relative order.
pub fn in_creation_order(tabs: &[TabInfo]) -> Vec<&TabInfo> {
    let mut ordered: Vec<&TabInfo> = tabs.iter().collect();
    ordered.sort_by_key(|tab| (tab.tab_id().is_none(), tab.tab_id()));
    ordered
}

/// Why automatic deduplication does or does not run for a URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Proceed,
    Inactive,
    NoUrl,
    Excluded,
}

/// Decide whether automatic deduplication runs for `url`
///
/// Exclusion patterns are only compiled once the flag and URL pass.
pub fn dedup_gate(settings: &Settings, url: &str) -> Gate {
    if !settings.active {
        return Gate::Inactive;
    }
    if url.is_empty() {
        return Gate::NoUrl;
    }
    if ExclusionFilter::from_patterns(&settings.exclusion_patterns).is_excluded(url) {
        return Gate::Excluded;
    }
    Gate::Proceed
}

/// Find the oldest other tab showing exactly `url`
pub fn find_duplicate<'a>(tabs: &'a [TabInfo], self_id: i32, url: &str) -> Option<&'a TabInfo> {
    in_creation_order(tabs)
        .into_iter()
        .find(|tab| tab.tab_id() != Some(self_id) && tab.url.as_deref() == Some(url))
}

/// Ids to close so that every URL is left open exactly once
///
/// The oldest tab of each URL is kept. Tabs without a URL never count as
/// duplicates, and tabs without an id cannot be closed.
pub fn plan_bulk_deduplicate(tabs: &[TabInfo]) -> Vec<i32> {
    let mut seen_urls = HashSet::new();
    let mut remove_ids = Vec::new();

    for tab in in_creation_order(tabs) {
        let Some(url) = tab.page_url() else {
            continue;
        };
        if !seen_urls.insert(url) {
            if let Some(id) = tab.tab_id() {
                remove_ids.push(id);
            }
        }
    }

    remove_ids
}
