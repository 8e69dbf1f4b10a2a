//! amo-probe CLI library
//!
//! Command-line front end for the marketplace acceptance suite: scenario
//! listing, suite runs against a browser or the mock marketplace, and
//! configuration inspection.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::format_push_string)]

mod commands;
mod config;
mod error;
mod output;
mod runner;

pub use commands::{
    Cli, ColorArg, Commands, ConfigArgs, FaultArg, ListArgs, ReportFormat, RunArgs, SelectArgs,
    SiteArgs,
};
pub use config::{redacted, suite_config, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{render, ProgressReporter};
pub use runner::{listed, run_suite, selection};

/// Install the global tracing subscriber on stderr.
///
/// `RUST_LOG` wins over the verbosity flags.
pub fn init_logging(verbosity: Verbosity, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(verbosity.log_filter()));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
