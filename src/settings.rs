/// Persisted settings for chrome.storage.local
use serde::{Deserialize, Serialize};

pub const KEY_ACTIVE: &str = "active";
pub const KEY_PREVENTED_COUNT: &str = "preventedDuplicatesCount";
pub const KEY_EXCLUSIONS: &str = "exclusionRegexes";
/// Older name for the exclusion list; read, never written
pub const KEY_LEGACY_EXCLUSIONS: &str = "exclusionPatterns";

/// Every key read from storage
pub const ALL_KEYS: [&str; 4] = [
    KEY_ACTIVE,
    KEY_PREVENTED_COUNT,
    KEY_EXCLUSIONS,
    KEY_LEGACY_EXCLUSIONS,
];

/// Settings with defaults applied for missing keys
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub active: bool,
    pub prevented_duplicates_count: u64,
    pub exclusion_patterns: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            active: true,
            prevented_duplicates_count: 0,
            exclusion_patterns: Vec::new(),
        }
    }
}

impl From<PartialSettings> for Settings {
    fn from(stored: PartialSettings) -> Self {
        let defaults = Settings::default();
        Settings {
            active: stored.active.unwrap_or(defaults.active),
            prevented_duplicates_count: stored
                .prevented_duplicates_count
                .unwrap_or(defaults.prevented_duplicates_count),
            exclusion_patterns: stored
                .exclusion_patterns
                .or(stored.legacy_exclusion_patterns)
                .unwrap_or(defaults.exclusion_patterns),
        }
    }
}

/// The key-value bag as stored: a missing field is a missing key
///
/// Used both for what a read returns and for what a write should change.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PartialSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prevented_duplicates_count: Option<u64>,
    #[serde(
        default,
        rename = "exclusionRegexes",
        skip_serializing_if = "Option::is_none"
    )]
    pub exclusion_patterns: Option<Vec<String>>,
    /// Only consulted when `exclusionRegexes` is absent
    #[serde(default, rename = "exclusionPatterns", skip_serializing)]
    pub legacy_exclusion_patterns: Option<Vec<String>>,
}

impl PartialSettings {
    pub fn with_active(active: bool) -> Self {
        PartialSettings {
            active: Some(active),
            ..Default::default()
        }
    }

    pub fn with_prevented_count(count: u64) -> Self {
        PartialSettings {
            prevented_duplicates_count: Some(count),
            ..Default::default()
        }
    }

    pub fn with_exclusions(patterns: Vec<String>) -> Self {
        PartialSettings {
            exclusion_patterns: Some(patterns),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_none()
            && self.prevented_duplicates_count.is_none()
            && self.exclusion_patterns.is_none()
    }

    /// The install-time writes: defaults for the counter and active flag,
    /// only where the stored bag lacks them
    pub fn missing_install_defaults(&self) -> PartialSettings {
        let defaults = Settings::default();
        PartialSettings {
            active: self.active.is_none().then_some(defaults.active),
            prevented_duplicates_count: self
                .prevented_duplicates_count
                .is_none()
                .then_some(defaults.prevented_duplicates_count),
            ..Default::default()
        }
    }

    /// Overlay `patch` on top of `self`, as a storage write would
    pub fn merge(&mut self, patch: &PartialSettings) {
        if let Some(active) = patch.active {
            self.active = Some(active);
        }
        if let Some(count) = patch.prevented_duplicates_count {
            self.prevented_duplicates_count = Some(count);
        }
        if let Some(patterns) = &patch.exclusion_patterns {
            self.exclusion_patterns = Some(patterns.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_empty_storage() {
        let settings = Settings::from(PartialSettings::default());

        assert!(settings.active);
        assert_eq!(settings.prevented_duplicates_count, 0);
        assert!(settings.exclusion_patterns.is_empty());
    }

    #[test]
    fn test_stored_values_win() {
        let stored: PartialSettings = serde_json::from_str(
            r#"{"active": false, "preventedDuplicatesCount": 7, "exclusionRegexes": ["^chrome://"]}"#,
        )
        .unwrap();

        let settings = Settings::from(stored);

        assert!(!settings.active);
        assert_eq!(settings.prevented_duplicates_count, 7);
        assert_eq!(settings.exclusion_patterns, vec!["^chrome://".to_string()]);
    }

    #[test]
    fn test_legacy_exclusion_key_read() {
        let stored: PartialSettings =
            serde_json::from_str(r#"{"exclusionPatterns": ["a", "b"]}"#).unwrap();

        assert_eq!(
            Settings::from(stored).exclusion_patterns,
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn test_both_exclusion_keys_current_wins() {
        let stored: PartialSettings = serde_json::from_str(
            r#"{"exclusionRegexes": ["new"], "exclusionPatterns": ["old"]}"#,
        )
        .unwrap();

        assert_eq!(Settings::from(stored).exclusion_patterns, vec!["new".to_string()]);
    }

    #[test]
    fn test_legacy_exclusion_key_never_written() {
        let patch = PartialSettings {
            legacy_exclusion_patterns: Some(vec!["old".to_string()]),
            ..PartialSettings::with_active(true)
        };

        assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"active":true}"#);
    }

    #[test]
    fn test_read_requests_legacy_key() {
        assert!(ALL_KEYS.contains(&KEY_LEGACY_EXCLUSIONS));
    }

    #[test]
    fn test_patch_serializes_only_present_keys() {
        let json = serde_json::to_string(&PartialSettings::with_prevented_count(3)).unwrap();
        assert_eq!(json, r#"{"preventedDuplicatesCount":3}"#);

        let json = serde_json::to_string(&PartialSettings::with_exclusions(vec![])).unwrap();
        assert_eq!(json, r#"{"exclusionRegexes":[]}"#);
    }

    #[test]
    fn test_install_defaults_fill_only_missing_keys() {
        let stored = PartialSettings {
            active: Some(false),
            ..Default::default()
        };

        let patch = stored.missing_install_defaults();

        assert_eq!(patch.active, None);
        assert_eq!(patch.prevented_duplicates_count, Some(0));
        assert_eq!(patch.exclusion_patterns, None);
    }

    #[test]
    fn test_install_defaults_empty_when_initialized() {
        let stored = PartialSettings {
            active: Some(true),
            prevented_duplicates_count: Some(12),
            ..Default::default()
        };

        assert!(stored.missing_install_defaults().is_empty());
    }

    #[test]
    fn test_merge() {
        let mut stored = PartialSettings::with_active(true);
        stored.merge(&PartialSettings::with_prevented_count(4));
        stored.merge(&PartialSettings::with_active(false));

        assert_eq!(stored.active, Some(false));
        assert_eq!(stored.prevented_duplicates_count, Some(4));
    }
}
