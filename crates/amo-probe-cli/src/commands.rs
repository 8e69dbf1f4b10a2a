//! CLI command definitions using clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// amo-probe: acceptance suite for the add-ons marketplace
#[derive(Parser, Debug)]
#[command(name = "amo-probe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the scenarios in the catalog
    List(ListArgs),

    /// Run scenarios against the marketplace
    Run(RunArgs),

    /// Print the effective suite configuration
    Config(ConfigArgs),
}

/// Scenario selection shared by `list` and `run`
#[derive(Args, Debug, Clone, Default)]
pub struct SelectArgs {
    /// Only scenarios whose name contains this text
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Only scenarios with one of these tags (repeatable)
    #[arg(short, long = "tag")]
    pub tags: Vec<String>,
}

/// Where the suite configuration comes from
#[derive(Args, Debug, Clone, Default)]
pub struct SiteArgs {
    /// Suite configuration file (YAML)
    #[arg(short, long, env = "AMO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Marketplace to test, e.g. https://addons.allizom.org
    #[arg(long, env = "AMO_BASE_URL")]
    pub base_url: Option<String>,

    /// Email of the login account
    #[arg(long, env = "AMO_USER_EMAIL", requires = "user_password")]
    pub user_email: Option<String>,

    /// Password of the login account
    #[arg(long, env = "AMO_USER_PASSWORD", hide_env_values = true)]
    pub user_password: Option<String>,

    /// Email of the profile-editing account
    #[arg(long, env = "AMO_EDITOR_EMAIL", requires = "editor_password")]
    pub editor_email: Option<String>,

    /// Password of the profile-editing account
    #[arg(long, env = "AMO_EDITOR_PASSWORD", hide_env_values = true)]
    pub editor_password: Option<String>,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,

    /// Implicit element wait in milliseconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Run against the built-in mock marketplace instead of a browser
    #[arg(long)]
    pub mock: bool,
}

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Scenario selection
    #[command(flatten)]
    pub select: SelectArgs,

    /// Print the tags next to each name
    #[arg(long)]
    pub tags_column: bool,
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Scenario selection
    #[command(flatten)]
    pub select: SelectArgs,

    /// Site and accounts
    #[command(flatten)]
    pub site: SiteArgs,

    /// Stop after the first failure
    #[arg(long)]
    pub fail_fast: bool,

    /// Report format on stdout
    #[arg(long, default_value = "text")]
    pub format: ReportFormat,

    /// Also write the report here (.json, .xml or text)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Defect to build the mock marketplace with (needs --mock)
    #[arg(long, requires = "mock")]
    pub fault: Option<FaultArg>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Site and accounts
    #[command(flatten)]
    pub site: SiteArgs,
}

/// Report format on stdout
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Human-readable summary
    #[default]
    Text,
    /// JSON report
    Json,
    /// `JUnit` XML
    Junit,
}

/// Mock marketplace defects
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaultArg {
    /// Listing pages 1 and 2 swapped
    BrokenPageBoundary,
    /// Repeated name on every listing page
    DuplicateName,
    /// Sorting keeps the current page
    StickyPagination,
    /// Theme categories include an extension category
    SharedCategories,
    /// Public profiles never show the location
    ProfileDropsLocation,
    /// Public profiles show hidden emails
    ProfileLeaksEmail,
}

impl From<FaultArg> for amo_probe::Fault {
    fn from(arg: FaultArg) -> Self {
        match arg {
            FaultArg::BrokenPageBoundary => Self::BrokenPageBoundary,
            FaultArg::DuplicateName => Self::DuplicateName,
            FaultArg::StickyPagination => Self::StickyPagination,
            FaultArg::SharedCategories => Self::SharedCategories,
            FaultArg::ProfileDropsLocation => Self::ProfileDropsLocation,
            FaultArg::ProfileLeaksEmail => Self::ProfileLeaksEmail,
        }
    }
}

/// Color choice argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorArg {
    /// Detect from the terminal
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod parse_tests {
        use super::*;

        #[test]
        fn test_cli_definition_is_valid() {
            use clap::CommandFactory;
            Cli::command().debug_assert();
        }

        #[test]
        fn test_run_with_selection() {
            let cli = Cli::try_parse_from([
                "amo-probe", "run", "--mock", "--tag", "themes", "--tag", "home", "-f", "sort",
                "--fail-fast", "--format", "json",
            ])
            .unwrap();
            let Commands::Run(args) = cli.command else {
                panic!("expected run");
            };
            assert!(args.site.mock);
            assert!(args.fail_fast);
            assert_eq!(args.select.tags, vec!["themes", "home"]);
            assert_eq!(args.select.filter.as_deref(), Some("sort"));
            assert_eq!(args.format, ReportFormat::Json);
        }

        #[test]
        fn test_fault_requires_mock() {
            let result = Cli::try_parse_from(["amo-probe", "run", "--fault", "duplicate-name"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_user_email_requires_password() {
            let result = Cli::try_parse_from([
                "amo-probe",
                "run",
                "--user-email",
                "someone@example.test",
            ]);
            assert!(result.is_err());
        }

        #[test]
        fn test_global_flags_after_subcommand() {
            let cli = Cli::try_parse_from(["amo-probe", "list", "-vv", "--color", "never"]).unwrap();
            assert_eq!(cli.verbose, 2);
            assert_eq!(cli.color, ColorArg::Never);
        }
    }

    mod conversion_tests {
        use super::*;

        #[test]
        fn test_fault_mapping() {
            assert_eq!(
                amo_probe::Fault::from(FaultArg::StickyPagination),
                amo_probe::Fault::StickyPagination
            );
        }
    }
}
