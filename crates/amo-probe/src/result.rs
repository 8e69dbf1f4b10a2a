//! Result and error types for amo-probe.

use thiserror::Error;

/// Result type for amo-probe operations
pub type ProbeResult<T> = Result<T, ProbeError>;

/// Errors that can occur while driving the marketplace
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Browser executable not found
    #[error("Browser not found. Install Chromium or set chromium_path in the suite config")]
    BrowserNotFound,

    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunchError {
        /// Error message
        message: String,
    },

    /// Driver-level failure not covered by another variant
    #[error("Driver error: {message}")]
    DriverError {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    NavigationError {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// No element matched after the implicit presence wait
    #[error("No element matches {selector:?} on {url}")]
    ElementNotFound {
        /// Selector that was queried
        selector: String,
        /// URL the query ran against
        url: String,
    },

    /// Element handle no longer resolves (page changed underneath it)
    #[error("Stale element {id}")]
    StaleElement {
        /// Handle id
        id: String,
    },

    /// Operation timed out
    #[error("Timed out after {ms}ms waiting for {waited_for}")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
        /// What was being waited for
        waited_for: String,
    },

    /// An action landed on a page of the wrong type
    #[error("Expected the {expected} page but landed on {url}")]
    UnexpectedPage {
        /// Page object name that was expected
        expected: String,
        /// URL actually reached
        url: String,
    },

    /// Assertion failed, with the concrete values that disagreed
    #[error("Assertion failed: {message} (expected {expected}, got {actual}) at {url}")]
    AssertionFailed {
        /// What was checked
        message: String,
        /// Expected value
        expected: String,
        /// Actual value
        actual: String,
        /// Page URL when the check ran
        url: String,
    },

    /// Rendered content could not be parsed into a typed value
    #[error("Cannot parse {what} from {text:?}")]
    ParseError {
        /// Kind of value being parsed
        what: String,
        /// Raw text
        text: String,
    },

    /// Scenario cannot run with the given configuration
    #[error("Skipped: {reason}")]
    Skipped {
        /// Reason
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl ProbeError {
    /// Build an assertion failure
    #[must_use]
    pub fn assertion(
        message: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::AssertionFailed {
            message: message.into(),
            expected: expected.into(),
            actual: actual.into(),
            url: url.into(),
        }
    }

    /// Build a parse error
    #[must_use]
    pub fn parse(what: impl Into<String>, text: impl Into<String>) -> Self {
        Self::ParseError {
            what: what.into(),
            text: text.into(),
        }
    }

    /// Fill in the page URL on an assertion raised without one
    #[must_use]
    pub fn at_url(self, page_url: &str) -> Self {
        match self {
            Self::AssertionFailed {
                message,
                expected,
                actual,
                url,
            } if url.is_empty() => Self::AssertionFailed {
                message,
                expected,
                actual,
                url: page_url.to_string(),
            },
            other => other,
        }
    }

    /// Whether this error means the scenario did not run rather than failed
    #[must_use]
    pub const fn is_skip(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assertion_message_carries_values() {
        let err = ProbeError::assertion("sort label", "Newest", "Featured", "/extensions/");
        let text = err.to_string();
        assert!(text.contains("Newest"));
        assert!(text.contains("Featured"));
        assert!(text.contains("/extensions/"));
    }

    #[test]
    fn test_at_url_fills_only_empty_url() {
        let err = ProbeError::assertion("x", "1", "2", "").at_url("/a/");
        assert!(err.to_string().ends_with("at /a/"));

        let err = ProbeError::assertion("x", "1", "2", "/b/").at_url("/a/");
        assert!(err.to_string().ends_with("at /b/"));
    }

    #[test]
    fn test_skip_detection() {
        let skip = ProbeError::Skipped {
            reason: "no credentials".into(),
        };
        assert!(skip.is_skip());
        assert!(!ProbeError::BrowserNotFound.is_skip());
    }
}
