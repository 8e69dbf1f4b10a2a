//! Scenario catalog and runner.
//!
//! A [`Scenario`] is a named function over a fresh [`Session`]. The
//! [`Runner`] builds one driver per scenario from a factory, so scenarios
//! never share browser state, and collects the outcomes into a
//! [`SuiteReport`].

mod account;
mod details;
mod extensions;
mod home;
mod themes;

use crate::config::{Credentials, SuiteConfig};
use crate::driver::Driver;
use crate::model::{ListingSnapshot, SortKey};
use crate::pages::{Listing, ListingKind, PageObject, PageTurn, Session};
use crate::report::{ScenarioResult, Status, SuiteReport};
use crate::result::{ProbeError, ProbeResult};
use crate::verify::{verify_unique_names, AssertionResult, OrderAccumulator};
use std::fmt;
use std::time::Instant;

/// Scenario tags
pub mod tags {
    /// Extensions listing
    pub const EXTENSIONS: &str = "extensions";
    /// Complete themes listing
    pub const THEMES: &str = "themes";
    /// Home page
    pub const HOME: &str = "home";
    /// Add-on detail pages
    pub const DETAILS: &str = "details";
    /// Account pages
    pub const ACCOUNT: &str = "account";
    /// Sorting
    pub const SORTING: &str = "sorting";
    /// Pagination
    pub const PAGINATION: &str = "pagination";
    /// Navigation and breadcrumbs
    pub const NAVIGATION: &str = "navigation";
    /// Needs configured credentials
    pub const LOGIN: &str = "login";
}

/// Body of a scenario
pub type ScenarioFn<D> = fn(&mut Session<D>) -> ProbeResult<()>;

/// One named acceptance check
pub struct Scenario<D> {
    /// Unique name, `area::what`
    pub name: &'static str,
    /// Tags for filtering
    pub tags: &'static [&'static str],
    /// Body
    pub run: ScenarioFn<D>,
}

impl<D> Scenario<D> {
    /// Create a scenario
    #[must_use]
    pub const fn new(name: &'static str, tags: &'static [&'static str], run: ScenarioFn<D>) -> Self {
        Self { name, tags, run }
    }

    /// Whether the scenario carries `tag`
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Whether the scenario logs in
    #[must_use]
    pub fn needs_login(&self) -> bool {
        self.has_tag(tags::LOGIN)
    }
}

impl<D> Clone for Scenario<D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D> Copy for Scenario<D> {}

impl<D> fmt::Debug for Scenario<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.name)
            .field("tags", &self.tags)
            .finish_non_exhaustive()
    }
}

/// Every scenario, grouped by area
#[must_use]
pub fn catalog<D: Driver>() -> Vec<Scenario<D>> {
    let mut all = Vec::new();
    all.extend(home::scenarios());
    all.extend(extensions::scenarios());
    all.extend(themes::scenarios());
    all.extend(details::scenarios());
    all.extend(account::scenarios());
    all
}

/// Runs scenarios, one fresh driver each
pub struct Runner<F> {
    config: SuiteConfig,
    factory: F,
    filter: Option<String>,
    tags: Vec<String>,
    fail_fast: bool,
}

impl<F> fmt::Debug for Runner<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runner")
            .field("base_url", &self.config.base_url)
            .field("filter", &self.filter)
            .field("tags", &self.tags)
            .field("fail_fast", &self.fail_fast)
            .finish_non_exhaustive()
    }
}

impl<F> Runner<F> {
    /// Runner over `config`; `factory` launches one driver per scenario
    #[must_use]
    pub fn new(config: SuiteConfig, factory: F) -> Self {
        Self {
            config,
            factory,
            filter: None,
            tags: Vec::new(),
            fail_fast: false,
        }
    }

    /// Only run scenarios whose name contains `pattern`
    #[must_use]
    pub fn with_filter(mut self, pattern: impl Into<String>) -> Self {
        self.filter = Some(pattern.into());
        self
    }

    /// Only run scenarios carrying `tag` (any of the added tags)
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Stop after the first failure; the rest are reported as skipped
    #[must_use]
    pub const fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Configuration every session gets
    #[must_use]
    pub const fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// Scenarios passing the name and tag filters, in catalog order
    #[must_use]
    pub fn select<'c, D>(&self, scenarios: &'c [Scenario<D>]) -> Vec<&'c Scenario<D>> {
        scenarios
            .iter()
            .filter(|s| self.filter.as_deref().map_or(true, |p| s.name.contains(p)))
            .filter(|s| self.tags.is_empty() || self.tags.iter().any(|t| s.has_tag(t)))
            .collect()
    }

    fn has_credentials(&self) -> bool {
        self.config.existing_user.is_some() || self.config.editable_user.is_some()
    }

    /// Run the selected scenarios
    pub fn run<D>(&mut self, scenarios: &[Scenario<D>]) -> SuiteReport
    where
        D: Driver,
        F: FnMut() -> ProbeResult<D>,
    {
        self.run_with(scenarios, |_| {})
    }

    /// Run the selected scenarios, calling `on_result` after each
    pub fn run_with<D, C>(&mut self, scenarios: &[Scenario<D>], mut on_result: C) -> SuiteReport
    where
        D: Driver,
        F: FnMut() -> ProbeResult<D>,
        C: FnMut(&ScenarioResult),
    {
        let selected = self.select(scenarios);
        let mut report = SuiteReport::new(self.config.base_url.clone());
        tracing::info!(run_id = %report.run_id, scenarios = selected.len(), "suite start");

        let mut stopped = false;
        for scenario in selected {
            let result = if stopped {
                ScenarioResult::skipped(scenario.name, "fail-fast: an earlier scenario failed")
            } else if scenario.needs_login() && !self.has_credentials() {
                ScenarioResult::skipped(scenario.name, "no credentials configured")
            } else {
                self.run_one(scenario)
            };
            if result.status == Status::Failed && self.fail_fast {
                stopped = true;
            }
            on_result(&result);
            report.record(result);
        }

        tracing::info!(run_id = %report.run_id, summary = %report.summary(), "suite done");
        report
    }

    fn run_one<D>(&mut self, scenario: &Scenario<D>) -> ScenarioResult
    where
        D: Driver,
        F: FnMut() -> ProbeResult<D>,
    {
        let span = tracing::info_span!("scenario", name = scenario.name);
        let _entered = span.enter();
        let start = Instant::now();

        let outcome = (self.factory)().and_then(|driver| {
            let mut session = Session::new(driver, self.config.clone());
            let outcome = (scenario.run)(&mut session);
            if let Err(e) = session.close() {
                tracing::warn!(error = %e, "closing the browser failed");
            }
            outcome
        });

        let elapsed = start.elapsed();
        let result = match &outcome {
            Ok(()) => ScenarioResult::passed(scenario.name, elapsed),
            Err(e) => ScenarioResult::from_error(scenario.name, elapsed, e),
        };
        match outcome {
            Ok(()) => tracing::info!(ms = result.duration_ms, "passed"),
            Err(e) if e.is_skip() => tracing::info!(reason = %e, "skipped"),
            Err(e) => tracing::warn!(ms = result.duration_ms, error = %e, "failed"),
        }
        result
    }
}

/// Turn a check into a result, attaching the current URL
pub(crate) fn ensure<D: Driver>(session: &mut Session<D>, check: AssertionResult) -> ProbeResult<()> {
    if check.passed {
        return Ok(());
    }
    let url = session.current_url()?;
    check.check(&url)
}

/// Attach the current URL to a failed pure check
pub(crate) fn located<D: Driver, T>(session: &mut Session<D>, result: ProbeResult<T>) -> ProbeResult<T> {
    match result {
        Err(e @ ProbeError::AssertionFailed { .. }) => {
            let url = session.current_url()?;
            Err(e.at_url(&url))
        }
        other => other,
    }
}

/// Login account from the config, or skip
pub(crate) fn existing_user<D: Driver>(session: &Session<D>) -> ProbeResult<Credentials> {
    session
        .config()
        .existing_user
        .clone()
        .ok_or_else(|| ProbeError::Skipped {
            reason: "no existing_user configured".to_string(),
        })
}

/// Profile-editing account from the config, or skip
pub(crate) fn editable_user<D: Driver>(session: &Session<D>) -> ProbeResult<Credentials> {
    session
        .config()
        .editable_user
        .clone()
        .ok_or_else(|| ProbeError::Skipped {
            reason: "no editable_user configured".to_string(),
        })
}

/// Sort a listing by `key` and walk up to `max_pages` pages.
///
/// Every page must hold unique names; when the key orders an observable
/// field, the keys must be monotonic across the concatenated pages.
/// Returns the snapshots in navigation order.
pub(crate) fn sort_and_walk<D: Driver, K: ListingKind>(
    listing: &mut Listing<'_, D, K>,
    key: SortKey,
    max_pages: usize,
) -> ProbeResult<Vec<ListingSnapshot>> {
    let first = listing.sorter().sort_by(key)?;
    let url = listing.current_url()?;
    ensure(
        listing.session(),
        crate::verify::Assertion::ends_with(
            "sorted URL",
            &url,
            &format!("sort={}", key.query_value()),
        ),
    )?;
    let label = listing.sorter().sorted_by()?;
    ensure(
        listing.session(),
        crate::verify::Assertion::equals("selected sort", key.label(), label.as_str()),
    )?;

    let mut order = key
        .ordering()
        .map(|(field, direction)| (field, OrderAccumulator::new(direction, format!("{key} order"))));
    let mut pages = Vec::new();
    let mut current = first;
    loop {
        located(listing.session(), verify_unique_names(&current.names()))?;
        if let Some((field, acc)) = order.as_mut() {
            let keys = current.keys(*field);
            located(listing.session(), acc.push_page(keys))?;
        }
        pages.push(current);
        if pages.len() >= max_pages || !listing.is_paginator_present()? {
            break;
        }
        match listing.paginator().next()? {
            PageTurn::Moved(snapshot) => current = snapshot,
            PageTurn::AtBoundary => break,
        }
    }
    tracing::debug!(sort = %key, pages = pages.len(), "walked listing");
    Ok(pages)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::site::{mock_config, Fault, MockSite};
    use std::collections::HashSet;

    fn runner(
        config: SuiteConfig,
        site: MockSite,
    ) -> Runner<impl FnMut() -> ProbeResult<MockSite>> {
        Runner::new(config, move || Ok(site.clone()))
    }

    fn mock_runner() -> Runner<impl FnMut() -> ProbeResult<MockSite>> {
        let config = mock_config(SuiteConfig::new());
        let site = MockSite::builder().accounts_from(&config).build();
        runner(config, site)
    }

    mod catalog_tests {
        use super::*;

        #[test]
        fn test_names_are_unique_and_tagged() {
            let all = catalog::<MockSite>();
            let names: HashSet<_> = all.iter().map(|s| s.name).collect();
            assert_eq!(names.len(), all.len());
            for scenario in &all {
                let area = scenario.name.split("::").next().unwrap();
                assert!(scenario.has_tag(area), "{} lacks its area tag", scenario.name);
            }
        }

        #[test]
        fn test_every_area_present() {
            let all = catalog::<MockSite>();
            for tag in [tags::HOME, tags::EXTENSIONS, tags::THEMES, tags::DETAILS, tags::ACCOUNT] {
                assert!(all.iter().any(|s| s.has_tag(tag)), "no {tag} scenarios");
            }
        }
    }

    mod selection_tests {
        use super::*;

        #[test]
        fn test_filter_and_tags() {
            let all = catalog::<MockSite>();
            let r = mock_runner().with_filter("sort_by");
            assert!(r.select(&all).iter().all(|s| s.name.contains("sort_by")));

            let r = mock_runner().with_tag("pagination");
            let picked = r.select(&all);
            assert!(!picked.is_empty());
            assert!(picked.iter().all(|s| s.has_tag(tags::PAGINATION)));
        }
    }

    mod run_tests {
        use super::*;

        #[test]
        fn test_login_scenarios_skip_without_credentials() {
            let mut r = runner(SuiteConfig::new().with_base_url(crate::site::MOCK_BASE_URL), MockSite::new())
                .with_tag(tags::LOGIN);
            let report = r.run(&catalog());
            assert!(!report.results.is_empty());
            assert_eq!(report.skipped_count(), report.results.len());
        }

        #[test]
        fn test_fail_fast_skips_the_rest() {
            let config = mock_config(SuiteConfig::new());
            let site = MockSite::builder().fault(Fault::DuplicateName).build();
            let mut r = runner(config, site)
                .with_tag(tags::EXTENSIONS)
                .with_fail_fast(true);
            let report = r.run(&catalog());
            assert_eq!(report.failed_count(), 1);
            let failed_at = report
                .results
                .iter()
                .position(|r| r.status == Status::Failed)
                .unwrap();
            assert!(report.results[failed_at + 1..]
                .iter()
                .all(|r| r.status == Status::Skipped));
        }

        #[test]
        fn test_factory_error_is_a_failure() {
            let config = mock_config(SuiteConfig::new());
            let mut r = Runner::new(config, || -> ProbeResult<MockSite> {
                Err(ProbeError::BrowserNotFound)
            })
            .with_filter("home::");
            let mut seen = 0;
            let report = r.run_with(&catalog(), |_| seen += 1);
            assert_eq!(seen, report.results.len());
            assert_eq!(report.failed_count(), report.results.len());
        }
    }
}
