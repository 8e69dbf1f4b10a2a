//! Suite configuration
//!
//! Everything a scenario needs from outside is passed in here: the site under
//! test, driver options and the accounts used by the login flows. Nothing is
//! read from ambient state.

use crate::driver::DriverConfig;
use crate::result::{ProbeError, ProbeResult};
use crate::wait::WaitOptions;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Account used by the login scenarios
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Login email
    pub email: String,
    /// Password
    pub password: String,
    /// Name shown in the header once logged in
    #[serde(default)]
    pub display_name: Option<String>,
}

impl Credentials {
    /// Create credentials without a display name
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            display_name: None,
        }
    }

    /// Set the display name
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("display_name", &self.display_name)
            .finish()
    }
}

/// Configuration for one suite run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Scheme and host of the marketplace, without a trailing slash
    pub base_url: String,
    /// Locale path segment
    pub locale: String,
    /// Application path segment
    pub app: String,
    /// Browser options
    pub driver: DriverConfig,
    /// Account with a stable profile, used for login/logout
    pub existing_user: Option<Credentials>,
    /// Account whose profile the edit scenarios may change
    pub editable_user: Option<Credentials>,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://addons.mozilla.org".to_string(),
            locale: "en-US".to_string(),
            app: "firefox".to_string(),
            driver: DriverConfig::default(),
            existing_user: None,
            editable_user: None,
        }
    }
}

impl SuiteConfig {
    /// Create config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate YAML
    ///
    /// # Errors
    ///
    /// Returns error if the YAML is malformed or the values are unusable
    pub fn from_yaml(yaml: &str) -> ProbeResult<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: &Path) -> ProbeResult<Self> {
        let yaml = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading suite config");
        Self::from_yaml(&yaml)
    }

    /// Serialize to YAML
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails
    pub fn to_yaml(&self) -> ProbeResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Check the values make sense together
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::ConfigError`] naming the offending field
    pub fn validate(&self) -> ProbeResult<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ProbeError::ConfigError {
                message: format!("base_url must be an http(s) URL, got {:?}", self.base_url),
            });
        }
        if self.locale.is_empty() || self.app.is_empty() {
            return Err(ProbeError::ConfigError {
                message: "locale and app must not be empty".to_string(),
            });
        }
        if self.driver.poll_interval_ms == 0 {
            return Err(ProbeError::ConfigError {
                message: "driver.poll_interval_ms must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Point at another site
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the login account
    #[must_use]
    pub fn with_existing_user(mut self, credentials: Credentials) -> Self {
        self.existing_user = Some(credentials);
        self
    }

    /// Set the profile-editing account
    #[must_use]
    pub fn with_editable_user(mut self, credentials: Credentials) -> Self {
        self.editable_user = Some(credentials);
        self
    }

    /// Set driver options
    #[must_use]
    pub fn with_driver(mut self, driver: DriverConfig) -> Self {
        self.driver = driver;
        self
    }

    /// Absolute URL of the application home page
    #[must_use]
    pub fn home_url(&self) -> String {
        format!("{}/{}/{}/", self.base_url, self.locale, self.app)
    }

    /// Absolute URL of a path below the application root
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.home_url(), path.trim_start_matches('/'))
    }

    /// Implicit wait used by every locator of a session
    #[must_use]
    pub fn wait_options(&self) -> WaitOptions {
        WaitOptions::new()
            .with_timeout(self.driver.element_timeout_ms)
            .with_poll_interval(self.driver.poll_interval_ms)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::io::Write;

    mod yaml_tests {
        use super::*;

        #[test]
        fn test_partial_yaml_uses_defaults() {
            let config = SuiteConfig::from_yaml("base_url: https://addons.example.test\n").unwrap();
            assert_eq!(config.locale, "en-US");
            assert_eq!(config.driver.element_timeout_ms, 10_000);
            assert!(config.existing_user.is_none());
        }

        #[test]
        fn test_credentials_parse() {
            let yaml = "
existing_user:
  email: a@example.test
  password: pw
  display_name: Alice
driver:
  headless: false
  element_timeout_ms: 500
";
            let config = SuiteConfig::from_yaml(yaml).unwrap();
            let user = config.existing_user.as_ref().unwrap();
            assert_eq!(user.display_name.as_deref(), Some("Alice"));
            assert!(!config.driver.headless);
            assert_eq!(config.wait_options().timeout_ms, 500);
        }

        #[test]
        fn test_round_trip_through_file() {
            let config = SuiteConfig::new().with_base_url("http://localhost:8000/");
            let mut file = tempfile::NamedTempFile::new().unwrap();
            file.write_all(config.to_yaml().unwrap().as_bytes()).unwrap();
            let loaded = SuiteConfig::load(file.path()).unwrap();
            assert_eq!(loaded, config);
        }

        #[test]
        fn test_invalid_base_url_rejected() {
            let err = SuiteConfig::from_yaml("base_url: addons.example.test\n").unwrap_err();
            assert!(matches!(err, ProbeError::ConfigError { .. }));
        }

        #[test]
        fn test_malformed_yaml_is_yaml_error() {
            let err = SuiteConfig::from_yaml("base_url: [unclosed").unwrap_err();
            assert!(matches!(err, ProbeError::Yaml(_)));
        }
    }

    mod url_tests {
        use super::*;

        #[test]
        fn test_home_and_paths() {
            let config = SuiteConfig::new().with_base_url("https://addons.example.test/");
            assert_eq!(config.home_url(), "https://addons.example.test/en-US/firefox/");
            assert_eq!(
                config.url("/extensions/"),
                "https://addons.example.test/en-US/firefox/extensions/"
            );
        }

        #[test]
        fn test_password_not_in_debug() {
            let creds = Credentials::new("a@example.test", "hunter2");
            assert!(!format!("{creds:?}").contains("hunter2"));
        }
    }
}
