//! Suite execution for the `run` and `list` commands

use crate::commands::{RunArgs, SelectArgs};
use crate::error::CliResult;
use crate::output::ProgressReporter;
use amo_probe::{catalog, Driver, MockSite, ProbeResult, Runner, Scenario, SuiteConfig, SuiteReport};

/// Apply the name filter and tags to a runner
#[must_use]
pub fn selection<F>(runner: Runner<F>, select: &SelectArgs) -> Runner<F> {
    let runner = match &select.filter {
        Some(pattern) => runner.with_filter(pattern.as_str()),
        None => runner,
    };
    select
        .tags
        .iter()
        .fold(runner, |runner, tag| runner.with_tag(tag.as_str()))
}

/// Scenarios `select` picks, in catalog order
#[must_use]
pub fn listed(select: &SelectArgs) -> Vec<Scenario<MockSite>> {
    let all = catalog::<MockSite>();
    let runner = selection(Runner::new(SuiteConfig::new(), ()), select);
    runner.select(&all).into_iter().copied().collect()
}

/// Run the selected scenarios with the driver `args` ask for
///
/// # Errors
///
/// Returns error if no driver is available for the requested mode
pub fn run_suite(
    config: SuiteConfig,
    args: &RunArgs,
    reporter: &mut ProgressReporter,
) -> CliResult<SuiteReport> {
    if args.site.mock {
        let mut site = MockSite::builder().accounts_from(&config);
        if let Some(fault) = args.fault {
            tracing::info!(?fault, "mock site with a fault");
            site = site.fault(fault.into());
        }
        let runner = Runner::new(config, move || -> ProbeResult<MockSite> {
            Ok(site.clone().build())
        });
        return Ok(execute(runner, args, reporter));
    }
    run_browser(config, args, reporter)
}

#[cfg(feature = "browser")]
fn run_browser(
    config: SuiteConfig,
    args: &RunArgs,
    reporter: &mut ProgressReporter,
) -> CliResult<SuiteReport> {
    let driver = config.driver.clone();
    let runner = Runner::new(config, move || amo_probe::ChromiumDriver::launch(&driver));
    Ok(execute(runner, args, reporter))
}

#[cfg(not(feature = "browser"))]
fn run_browser(
    _config: SuiteConfig,
    _args: &RunArgs,
    _reporter: &mut ProgressReporter,
) -> CliResult<SuiteReport> {
    Err(crate::error::CliError::invalid_argument(
        "built without browser support; pass --mock or rebuild with --features browser",
    ))
}

fn execute<D, F>(runner: Runner<F>, args: &RunArgs, reporter: &mut ProgressReporter) -> SuiteReport
where
    D: Driver,
    F: FnMut() -> ProbeResult<D>,
{
    let mut runner = selection(runner, &args.select).with_fail_fast(args.fail_fast);
    let scenarios = catalog::<D>();
    let total = runner.select(&scenarios).len();
    if total == 0 {
        reporter.warning("no scenario matches the filter and tags");
    }
    reporter.start_progress(total as u64, "running");
    let report = runner.run_with(&scenarios, |result| reporter.scenario_done(result));
    reporter.finish();
    report
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::{FaultArg, ReportFormat, SiteArgs};
    use amo_probe::Status;

    fn args(select: SelectArgs) -> RunArgs {
        RunArgs {
            select,
            site: SiteArgs {
                mock: true,
                timeout: Some(200),
                ..SiteArgs::default()
            },
            fail_fast: false,
            format: ReportFormat::Text,
            output: None,
            fault: None,
        }
    }

    fn config(args: &RunArgs) -> SuiteConfig {
        let mut config = crate::config::suite_config(&args.site).unwrap();
        config.driver.navigation_timeout_ms = 200;
        config.driver.poll_interval_ms = 5;
        config
    }

    #[test]
    fn test_listed_by_tag() {
        let select = SelectArgs {
            filter: None,
            tags: vec!["account".to_string()],
        };
        let names: Vec<_> = listed(&select).iter().map(|s| s.name).collect();
        assert!(!names.is_empty());
        assert!(names.iter().all(|n| n.starts_with("account::")));
    }

    #[test]
    fn test_mock_run_passes() {
        let args = args(SelectArgs {
            filter: Some("home::".to_string()),
            tags: Vec::new(),
        });
        let mut reporter = ProgressReporter::new(false, true);
        let report = run_suite(config(&args), &args, &mut reporter).unwrap();
        assert!(report.all_passed(), "{}", report.render_text());
        assert!(!report.results.is_empty());
    }

    #[test]
    fn test_mock_fault_fails_its_scenario() {
        let mut args = args(SelectArgs {
            filter: Some("sort_resets_page".to_string()),
            tags: Vec::new(),
        });
        args.fault = Some(FaultArg::StickyPagination);
        let mut reporter = ProgressReporter::new(false, true);
        let report = run_suite(config(&args), &args, &mut reporter).unwrap();
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.results[0].status, Status::Failed);
    }
}
