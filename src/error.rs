/// Error types for the deduplicator
use thiserror::Error;
use wasm_bindgen::JsValue;

/// A browser API call failed or returned something we could not decode
#[derive(Error, Debug)]
#[error("{operation} failed: {message}")]
pub struct HostError {
    pub operation: &'static str,
    pub message: String,
}

impl HostError {
    pub fn new(operation: &'static str, message: impl Into<String>) -> Self {
        HostError {
            operation,
            message: message.into(),
        }
    }

    pub fn from_js(operation: &'static str, err: JsValue) -> Self {
        HostError::new(operation, format!("{:?}", err))
    }
}

#[derive(Error, Debug)]
pub enum DedupError {
    #[error(transparent)]
    Host(#[from] HostError),
    #[error("Invalid Regex: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: fancy_regex::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_error_display() {
        let err = HostError::new("tabs.remove", "No tab with id: 3.");
        assert_eq!(err.to_string(), "tabs.remove failed: No tab with id: 3.");
    }

    #[test]
    fn test_invalid_pattern_display() {
        let source = fancy_regex::Regex::new("(").unwrap_err();
        let err = DedupError::InvalidPattern {
            pattern: "(".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("Invalid Regex: "));
    }
}
