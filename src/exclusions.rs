/// Exclusion filter: URLs matching any predicate are never deduplicated
use fancy_regex::Regex;
use log::warn;

use crate::error::DedupError;

/// Anything that can decide whether a URL is exempt
pub trait UrlPredicate {
    fn matches(&self, url: &str) -> bool;
}

/// A pattern that gives up (backtrack limit) counts as not matching
impl UrlPredicate for Regex {
    fn matches(&self, url: &str) -> bool {
        self.is_match(url).unwrap_or_else(|e| {
            warn!("Exclusion {:?} failed on {}: {}", self.as_str(), url, e);
            false
        })
    }
}

/// Ordered list of exclusion predicates
#[derive(Default)]
pub struct ExclusionFilter {
    predicates: Vec<Box<dyn UrlPredicate>>,
}

impl ExclusionFilter {
    pub fn new() -> Self {
        ExclusionFilter::default()
    }

    /// Build from stored regex sources
    ///
    /// A malformed source is logged and left out; it never stops the rest
    /// of the list from applying.
    pub fn from_patterns<S: AsRef<str>>(patterns: &[S]) -> Self {
        let mut filter = ExclusionFilter::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            match Regex::new(pattern) {
                Ok(regex) => filter.push(regex),
                Err(e) => warn!("Invalid regex in storage: {:?}: {}", pattern, e),
            }
        }
        filter
    }

    pub fn push(&mut self, predicate: impl UrlPredicate + 'static) {
        self.predicates.push(Box::new(predicate));
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// True on the first predicate that matches, in list order
    pub fn is_excluded(&self, url: &str) -> bool {
        self.predicates.iter().any(|p| p.matches(url))
    }
}

/// Split the popup text area into pattern lines, dropping blank ones
///
/// Kept lines are returned exactly as written.
pub fn parse_pattern_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.to_string())
        .collect()
}

/// Compile every pattern, failing on the first malformed one
pub fn validate_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<(), DedupError> {
    for pattern in patterns {
        let pattern = pattern.as_ref();
        Regex::new(pattern).map_err(|source| DedupError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_excludes_nothing() {
        let filter = ExclusionFilter::from_patterns::<&str>(&[]);

        assert!(filter.is_empty());
        assert!(!filter.is_excluded("https://example.com"));
    }

    #[test]
    fn test_unanchored_match() {
        let filter = ExclusionFilter::from_patterns(&["mail\\.google"]);

        assert!(filter.is_excluded("https://mail.google.com/mail/u/0/"));
        assert!(!filter.is_excluded("https://www.google.com/"));
    }

    #[test]
    fn test_any_pattern_excludes() {
        let filter = ExclusionFilter::from_patterns(&["^chrome://", "localhost:\\d+"]);

        assert!(filter.is_excluded("chrome://settings"));
        assert!(filter.is_excluded("http://localhost:3000/app"));
        assert!(!filter.is_excluded("https://github.com"));
    }

    #[test]
    fn test_malformed_pattern_is_skipped() {
        let filter = ExclusionFilter::from_patterns(&["(unclosed", "example\\.org"]);

        assert_eq!(filter.len(), 1);
        assert!(filter.is_excluded("https://example.org/"));
        assert!(!filter.is_excluded("(unclosed"));
    }

    struct Suffix(&'static str);

    impl UrlPredicate for Suffix {
        fn matches(&self, url: &str) -> bool {
            url.ends_with(self.0)
        }
    }

    #[test]
    fn test_custom_predicate() {
        let mut filter = ExclusionFilter::new();
        filter.push(Suffix(".pdf"));

        assert!(filter.is_excluded("https://a.com/paper.pdf"));
        assert!(!filter.is_excluded("https://a.com/paper.html"));
    }

    #[test]
    fn test_parse_pattern_lines() {
        let lines = parse_pattern_lines("^chrome://\n\n   \nyoutube\\.com \n");

        assert_eq!(
            lines,
            vec!["^chrome://".to_string(), "youtube\\.com ".to_string()]
        );
    }

    #[test]
    fn test_parse_empty_text() {
        assert!(parse_pattern_lines("").is_empty());
    }

    #[test]
    fn test_lookaround_and_backreference_patterns() {
        let filter = ExclusionFilter::from_patterns(&[
            "^https://(?!www\\.)[^/]*example\\.com",
            "/(\\w+)/\\1$",
        ]);

        assert_eq!(filter.len(), 2);
        assert!(filter.is_excluded("https://docs.example.com/"));
        assert!(!filter.is_excluded("https://www.example.com/"));
        assert!(filter.is_excluded("https://a.org/repeat/repeat"));
        assert!(!filter.is_excluded("https://a.org/repeat/other"));
    }

    #[test]
    fn test_validate_patterns_ok() {
        assert!(validate_patterns(&["^https://", "a|b", "x{2,3}", "(?<=/)api"]).is_ok());
    }

    #[test]
    fn test_validate_patterns_reports_first_bad_line() {
        let err = validate_patterns(&["ok", "[bad", "(also bad"]).unwrap_err();

        match err {
            DedupError::InvalidPattern { pattern, .. } => assert_eq!(pattern, "[bad"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
