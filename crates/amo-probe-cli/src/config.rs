//! CLI configuration

use crate::commands::SiteArgs;
use crate::error::{CliError, CliResult};
use amo_probe::{mock_config, Credentials, SuiteConfig};

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Quiet - failures only
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - info logs
    Verbose,
    /// Debug - debug logs and below
    Debug,
}

impl Verbosity {
    /// From the `-q` flag and the `-v` count
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: u8) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, 0) => Self::Normal,
            (false, 1) => Self::Verbose,
            (false, _) => Self::Debug,
        }
    }

    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Default log filter when `RUST_LOG` is unset
    #[must_use]
    pub const fn log_filter(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "amo_probe=info,amo_probe_cli=info,warn",
            Self::Debug => "amo_probe=debug,amo_probe_cli=debug,info",
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Always use colors
    Always,
    /// Use colors when output is a terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Should use colors based on output detection
    #[must_use]
    pub fn should_color(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::io::IsTerminal::is_terminal(&std::io::stderr()),
        }
    }
}

/// Suite configuration from the config file, then flags and environment.
///
/// With `--mock` the site is pointed at the built-in marketplace and any
/// missing account is filled in.
///
/// # Errors
///
/// Returns error if the file cannot be loaded or the result is invalid
pub fn suite_config(site: &SiteArgs) -> CliResult<SuiteConfig> {
    let mut config = match &site.config {
        Some(path) => SuiteConfig::load(path)?,
        None => SuiteConfig::new(),
    };
    if let Some(url) = &site.base_url {
        config = config.with_base_url(url.as_str());
    }
    if let Some(user) = credentials("user", site.user_email.as_deref(), site.user_password.as_deref())? {
        config = config.with_existing_user(user);
    }
    if let Some(user) = credentials("editor", site.editor_email.as_deref(), site.editor_password.as_deref())? {
        config = config.with_editable_user(user);
    }
    if site.headed {
        config.driver.headless = false;
    }
    if let Some(ms) = site.timeout {
        config.driver.element_timeout_ms = ms;
    }
    if site.mock {
        config = mock_config(config);
    }
    config.validate()?;
    Ok(config)
}

/// A password arriving (usually from the environment) without its email is
/// a setup mistake, not something to ignore.
fn credentials(
    role: &str,
    email: Option<&str>,
    password: Option<&str>,
) -> CliResult<Option<Credentials>> {
    match (email, password) {
        (Some(email), Some(password)) => Ok(Some(Credentials::new(email, password))),
        (None, Some(_)) => Err(CliError::config(format!(
            "{role} password is set without an email (--{role}-email)"
        ))),
        _ => Ok(None),
    }
}

/// Copy of `config` safe to print
#[must_use]
pub fn redacted(config: &SuiteConfig) -> SuiteConfig {
    let mut shown = config.clone();
    for user in [&mut shown.existing_user, &mut shown.editable_user]
        .into_iter()
        .flatten()
    {
        user.password = "<redacted>".to_string();
    }
    shown
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(true, 3), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, 0), Verbosity::Normal);
        assert_eq!(Verbosity::from_flags(false, 1), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(false, 2), Verbosity::Debug);
        assert_eq!(Verbosity::Normal.log_filter(), "warn");
    }

    #[test]
    fn test_color_choice_fixed_values() {
        assert!(ColorChoice::Always.should_color());
        assert!(!ColorChoice::Never.should_color());
    }

    #[test]
    fn test_flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url: https://addons.example.org\nlocale: de").unwrap();
        let site = SiteArgs {
            config: Some(file.path().to_path_buf()),
            base_url: Some("https://addons.allizom.org/".to_string()),
            user_email: Some("qa@example.test".to_string()),
            user_password: Some("secret".to_string()),
            headed: true,
            timeout: Some(2_500),
            ..SiteArgs::default()
        };
        let config = suite_config(&site).unwrap();
        assert_eq!(config.base_url, "https://addons.allizom.org");
        assert_eq!(config.locale, "de");
        assert_eq!(config.existing_user.unwrap().email, "qa@example.test");
        assert!(config.editable_user.is_none());
        assert!(!config.driver.headless);
        assert_eq!(config.driver.element_timeout_ms, 2_500);
    }

    #[test]
    fn test_mock_fills_accounts() {
        let site = SiteArgs {
            mock: true,
            ..SiteArgs::default()
        };
        let config = suite_config(&site).unwrap();
        assert_eq!(config.base_url, amo_probe::MOCK_BASE_URL);
        assert!(config.existing_user.is_some());
        assert!(config.editable_user.is_some());
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let site = SiteArgs {
            base_url: Some("addons.example.org".to_string()),
            ..SiteArgs::default()
        };
        assert!(suite_config(&site).is_err());
    }

    #[test]
    fn test_password_without_email_is_rejected() {
        let site = SiteArgs {
            editor_password: Some("secret".to_string()),
            ..SiteArgs::default()
        };
        let err = suite_config(&site).unwrap_err();
        assert!(matches!(err, CliError::Config { .. }), "{err}");
        assert!(err.to_string().contains("--editor-email"));
    }

    #[test]
    fn test_redacted_hides_passwords() {
        let config = SuiteConfig::new()
            .with_existing_user(Credentials::new("a@example.test", "hunter2"))
            .with_editable_user(Credentials::new("b@example.test", "hunter3"));
        let yaml = redacted(&config).to_yaml().unwrap();
        assert!(!yaml.contains("hunter"));
        assert!(yaml.contains("<redacted>"));
    }
}
