//! Suite report
//!
//! One [`ScenarioResult`] per scenario, collected into a [`SuiteReport`]
//! that renders as plain text, JSON or JUnit XML.

use crate::result::{ProbeError, ProbeResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;
use std::time::Duration;
use uuid::Uuid;

/// Outcome of one scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Every assertion held
    Passed,
    /// An assertion or an action failed
    Failed,
    /// Not run (missing credentials, filtered by fail-fast)
    Skipped,
}

impl Status {
    /// Label used in the text report
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Passed => "PASS",
            Self::Failed => "FAIL",
            Self::Skipped => "SKIP",
        }
    }
}

/// Result of running one scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Scenario name
    pub name: String,
    /// Outcome
    pub status: Status,
    /// Wall time in milliseconds
    pub duration_ms: u64,
    /// Failure or skip reason
    pub message: Option<String>,
    /// Page the browser was on when it failed
    pub url: Option<String>,
}

impl ScenarioResult {
    /// Passing result
    #[must_use]
    pub fn passed(name: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            status: Status::Passed,
            duration_ms: millis(duration),
            message: None,
            url: None,
        }
    }

    /// Result for a scenario that returned `error`; skips stay skips
    #[must_use]
    pub fn from_error(name: impl Into<String>, duration: Duration, error: &ProbeError) -> Self {
        let url = match error {
            ProbeError::AssertionFailed { url, .. }
            | ProbeError::ElementNotFound { url, .. }
            | ProbeError::UnexpectedPage { url, .. }
            | ProbeError::NavigationError { url, .. }
                if !url.is_empty() =>
            {
                Some(url.clone())
            }
            _ => None,
        };
        let message = match error {
            ProbeError::Skipped { reason } => reason.clone(),
            other => other.to_string(),
        };
        Self {
            name: name.into(),
            status: if error.is_skip() {
                Status::Skipped
            } else {
                Status::Failed
            },
            duration_ms: millis(duration),
            message: Some(message),
            url,
        }
    }

    /// Skipped without running
    #[must_use]
    pub fn skipped(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: Status::Skipped,
            duration_ms: 0,
            message: Some(reason.into()),
            url: None,
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Results of one suite run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteReport {
    /// Unique id of this run
    pub run_id: Uuid,
    /// Site the suite ran against
    pub base_url: String,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// Scenario results in run order
    pub results: Vec<ScenarioResult>,
}

impl SuiteReport {
    /// Empty report for a run starting now
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            base_url: base_url.into(),
            started_at: Utc::now(),
            results: Vec::new(),
        }
    }

    /// Add a result
    pub fn record(&mut self, result: ScenarioResult) {
        self.results.push(result);
    }

    fn count(&self, status: Status) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }

    /// Number of passing scenarios
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.count(Status::Passed)
    }

    /// Number of failing scenarios
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.count(Status::Failed)
    }

    /// Number of skipped scenarios
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.count(Status::Skipped)
    }

    /// True when nothing failed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed_count() == 0
    }

    /// Failing results
    #[must_use]
    pub fn failures(&self) -> Vec<&ScenarioResult> {
        self.results
            .iter()
            .filter(|r| r.status == Status::Failed)
            .collect()
    }

    /// Total wall time
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        Duration::from_millis(self.results.iter().map(|r| r.duration_ms).sum())
    }

    /// One-line summary
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} passed, {} failed, {} skipped ({} scenarios, {:.2}s)",
            self.passed_count(),
            self.failed_count(),
            self.skipped_count(),
            self.results.len(),
            self.total_duration().as_secs_f64()
        )
    }

    /// Plain-text report
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "run {} against {}", self.run_id, self.base_url);
        for result in &self.results {
            let _ = writeln!(
                out,
                "{} {} ({} ms)",
                result.status.label(),
                result.name,
                result.duration_ms
            );
            if let Some(message) = &result.message {
                let _ = writeln!(out, "     {message}");
            }
            if let Some(url) = &result.url {
                let _ = writeln!(out, "     at {url}");
            }
        }
        let _ = writeln!(out, "{}", self.summary());
        out
    }

    /// Pretty JSON report
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails
    pub fn to_json(&self) -> ProbeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a JSON report
    ///
    /// # Errors
    ///
    /// Returns error if the JSON does not describe a report
    pub fn from_json(json: &str) -> ProbeResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// JUnit XML report
    #[must_use]
    pub fn render_junit(&self) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        let _ = writeln!(
            xml,
            r#"<testsuite name="amo-probe" tests="{}" failures="{}" skipped="{}" time="{:.3}">"#,
            self.results.len(),
            self.failed_count(),
            self.skipped_count(),
            self.total_duration().as_secs_f64()
        );
        for result in &self.results {
            let _ = writeln!(
                xml,
                r#"  <testcase name="{}" time="{:.3}">"#,
                escape_xml(&result.name),
                Duration::from_millis(result.duration_ms).as_secs_f64()
            );
            let message = result.message.as_deref().map(escape_xml).unwrap_or_default();
            match result.status {
                Status::Failed => {
                    let _ = writeln!(xml, r#"    <failure message="{message}">{message}</failure>"#);
                }
                Status::Skipped => {
                    let _ = writeln!(xml, r#"    <skipped message="{message}"/>"#);
                }
                Status::Passed => {}
            }
            xml.push_str("  </testcase>\n");
        }
        xml.push_str("</testsuite>\n");
        xml
    }

    /// Write the report to `path`, choosing the format by extension
    /// (`.json`, `.xml`, anything else as text)
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be written
    pub fn write(&self, path: &Path) -> ProbeResult<()> {
        let body = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => self.to_json()?,
            Some("xml") => self.render_junit(),
            _ => self.render_text(),
        };
        std::fs::write(path, body)?;
        Ok(())
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn sample() -> SuiteReport {
        let mut report = SuiteReport::new("https://addons.example.test");
        report.record(ScenarioResult::passed("home::most_popular", Duration::from_millis(40)));
        report.record(ScenarioResult::from_error(
            "extensions::sort_by_most_users",
            Duration::from_millis(60),
            &ProbeError::assertion(
                "users not descending",
                "a",
                "b",
                "https://addons.example.test/en-US/firefox/extensions/",
            ),
        ));
        report.record(ScenarioResult::skipped("account::login", "no credentials"));
        report
    }

    mod count_tests {
        use super::*;

        #[test]
        fn test_counts() {
            let report = sample();
            assert_eq!(report.passed_count(), 1);
            assert_eq!(report.failed_count(), 1);
            assert_eq!(report.skipped_count(), 1);
            assert!(!report.all_passed());
            assert_eq!(report.total_duration(), Duration::from_millis(100));
        }

        #[test]
        fn test_skip_error_is_not_a_failure() {
            let result = ScenarioResult::from_error(
                "x",
                Duration::ZERO,
                &ProbeError::Skipped {
                    reason: "no credentials".into(),
                },
            );
            assert_eq!(result.status, Status::Skipped);
            assert_eq!(result.message.as_deref(), Some("no credentials"));
        }
    }

    mod render_tests {
        use super::*;

        #[test]
        fn test_text_lists_failure_url() {
            let text = sample().render_text();
            assert!(text.contains("FAIL extensions::sort_by_most_users"));
            assert!(text.contains("at https://addons.example.test/en-US/firefox/extensions/"));
            assert!(text.ends_with("1 passed, 1 failed, 1 skipped (3 scenarios, 0.10s)\n"));
        }

        #[test]
        fn test_json_round_trip() {
            let report = sample();
            let parsed = SuiteReport::from_json(&report.to_json().unwrap()).unwrap();
            assert_eq!(parsed, report);
        }

        #[test]
        fn test_junit_escapes() {
            let mut report = SuiteReport::new("x");
            report.record(ScenarioResult::from_error(
                "a<b>",
                Duration::ZERO,
                &ProbeError::DriverError {
                    message: "\"quoted\" & more".into(),
                },
            ));
            let xml = report.render_junit();
            assert!(xml.contains("a&lt;b&gt;"));
            assert!(xml.contains("&quot;quoted&quot; &amp; more"));
            assert!(xml.contains(r#"failures="1""#));
        }

        #[test]
        fn test_write_picks_format_by_extension() {
            let dir = tempfile::tempdir().unwrap();
            let report = sample();
            let json = dir.path().join("report.json");
            report.write(&json).unwrap();
            assert!(std::fs::read_to_string(&json).unwrap().starts_with('{'));
            let text = dir.path().join("report.txt");
            report.write(&text).unwrap();
            assert!(std::fs::read_to_string(&text).unwrap().starts_with("run "));
        }
    }
}
