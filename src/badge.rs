/// Toolbar badge text and colour
use crate::settings::Settings;

pub const BADGE_COLOR: &str = "#933EC5";

/// "OFF" when inactive, the prevented count when active and non-zero,
/// otherwise empty
pub fn badge_text(settings: &Settings) -> String {
    if !settings.active {
        "OFF".to_string()
    } else if settings.prevented_duplicates_count > 0 {
        settings.prevented_duplicates_count.to_string()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(active: bool, count: u64) -> Settings {
        Settings {
            active,
            prevented_duplicates_count: count,
            exclusion_patterns: Vec::new(),
        }
    }

    #[test]
    fn test_badge_text_active() {
        assert_eq!(badge_text(&settings(true, 0)), "");
        assert_eq!(badge_text(&settings(true, 7)), "7");
        assert_eq!(badge_text(&settings(true, 1234)), "1234");
    }

    #[test]
    fn test_badge_text_inactive_ignores_count() {
        assert_eq!(badge_text(&settings(false, 0)), "OFF");
        assert_eq!(badge_text(&settings(false, 7)), "OFF");
    }
}
