//! Progress reporting and result output

use amo_probe::{ScenarioResult, Status, SuiteReport};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};

use crate::commands::ReportFormat;
use crate::error::CliResult;

/// Progress reporter for a suite run
#[derive(Debug)]
pub struct ProgressReporter {
    term: Term,
    progress_bar: Option<ProgressBar>,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl ProgressReporter {
    /// Create a new progress reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            progress_bar: None,
            use_color,
            quiet,
        }
    }

    /// Start a progress bar over `total` scenarios
    pub fn start_progress(&mut self, total: u64, message: &str) {
        if self.quiet || !self.term.is_term() {
            return;
        }

        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        pb.set_message(message.to_string());
        self.progress_bar = Some(pb);
    }

    /// Report one finished scenario
    pub fn scenario_done(&self, result: &ScenarioResult) {
        let line = self.result_line(result);
        let show = result.status == Status::Failed || !self.quiet;
        match &self.progress_bar {
            Some(pb) => {
                if show {
                    pb.println(line);
                }
                pb.set_message(result.name.clone());
                pb.inc(1);
            }
            None if show => {
                let _ = self.term.write_line(&line);
            }
            None => {}
        }
    }

    /// Finish progress bar
    pub fn finish(&self) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish_and_clear();
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("⚠").yellow().bold().to_string()
        } else {
            "WARN".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    fn result_line(&self, result: &ScenarioResult) -> String {
        let label = result.status.label();
        let prefix = if self.use_color {
            match result.status {
                Status::Passed => style(label).green().bold().to_string(),
                Status::Failed => style(label).red().bold().to_string(),
                Status::Skipped => style(label).yellow().to_string(),
            }
        } else {
            label.to_string()
        };
        let mut line = format!("{prefix} {} ({}ms)", result.name, result.duration_ms);
        if result.status != Status::Passed {
            if let Some(message) = &result.message {
                line.push_str(&format!("\n     {message}"));
            }
        }
        line
    }
}

/// Render the report in `format`
///
/// # Errors
///
/// Returns error if JSON serialization fails
pub fn render(report: &SuiteReport, format: ReportFormat) -> CliResult<String> {
    Ok(match format {
        ReportFormat::Text => report.render_text(),
        ReportFormat::Json => report.to_json()?,
        ReportFormat::Junit => report.render_junit(),
    })
}
