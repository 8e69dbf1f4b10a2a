//! Whole-catalog runs against the in-memory marketplace
//!
//! A clean site must pass every scenario; each injected fault must be caught
//! by the scenario that checks for it.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use amo_probe::suite::tags;
use amo_probe::{
    catalog, mock_config, Fault, MockSite, MockSiteBuilder, ProbeResult, Runner, Status,
    SuiteConfig, SuiteReport,
};
use proptest::prelude::*;

fn fast_config() -> SuiteConfig {
    let mut config = mock_config(SuiteConfig::new());
    config.driver.element_timeout_ms = 200;
    config.driver.navigation_timeout_ms = 200;
    config.driver.poll_interval_ms = 5;
    config
}

fn runner(
    config: SuiteConfig,
    site: MockSiteBuilder,
) -> Runner<impl FnMut() -> ProbeResult<MockSite>> {
    let site = site.accounts_from(&config);
    Runner::new(config, move || Ok(site.clone().build()))
}

fn run(site: MockSiteBuilder) -> SuiteReport {
    runner(fast_config(), site).run(&catalog::<MockSite>())
}

fn status_of(report: &SuiteReport, name: &str) -> Status {
    report
        .results
        .iter()
        .find(|r| r.name == name)
        .unwrap_or_else(|| panic!("{name} did not run"))
        .status
}

// ============================================================================
// Clean site
// ============================================================================

#[test]
fn test_clean_site_passes_everything() {
    let report = run(MockSite::builder());
    assert!(report.all_passed(), "{}", report.render_text());
    assert_eq!(report.results.len(), catalog::<MockSite>().len());
    assert_eq!(report.skipped_count(), 0);
}

#[test]
fn test_without_credentials_login_scenarios_skip() {
    let mut config = fast_config();
    config.existing_user = None;
    config.editable_user = None;
    let report = runner(config, MockSite::builder()).run(&catalog::<MockSite>());

    assert_eq!(report.failed_count(), 0, "{}", report.render_text());
    for result in &report.results {
        let login = catalog::<MockSite>()
            .iter()
            .any(|s| s.name == result.name && s.needs_login());
        let expected = if login { Status::Skipped } else { Status::Passed };
        assert_eq!(result.status, expected, "{}", result.name);
    }
}

#[test]
fn test_tag_selection_runs_only_that_area() {
    let report = runner(fast_config(), MockSite::builder())
        .with_tag(tags::THEMES)
        .run(&catalog::<MockSite>());
    assert!(report.all_passed(), "{}", report.render_text());
    assert!(!report.results.is_empty());
    assert!(report.results.iter().all(|r| r.name.starts_with("themes::")));
}

// ============================================================================
// Injected faults
// ============================================================================

#[test]
fn test_page_boundary_fault_is_caught() {
    let report = run(MockSite::builder().fault(Fault::BrokenPageBoundary));
    assert_eq!(
        status_of(&report, "extensions::sort_by_most_users"),
        Status::Failed
    );
    let failure = report
        .failures()
        .into_iter()
        .find(|r| r.name == "extensions::sort_by_most_users")
        .unwrap();
    assert!(failure.url.as_deref().unwrap_or_default().contains("page=2"));
}

#[test]
fn test_duplicate_name_fault_is_caught() {
    let report = run(MockSite::builder().fault(Fault::DuplicateName));
    assert_eq!(status_of(&report, "themes::sort_by_name"), Status::Failed);
    assert_eq!(
        status_of(&report, "extensions::default_is_featured"),
        Status::Failed
    );
}

#[test]
fn test_sticky_pagination_fault_is_caught() {
    let report = run(MockSite::builder().fault(Fault::StickyPagination));
    assert_eq!(
        status_of(&report, "extensions::sort_resets_page"),
        Status::Failed
    );
    assert_eq!(
        status_of(&report, "home::sections_present"),
        Status::Passed
    );
}

#[test]
fn test_fail_fast_stops_after_first_failure() {
    let report = runner(fast_config(), MockSite::builder().fault(Fault::DuplicateName))
        .with_fail_fast(true)
        .run(&catalog::<MockSite>());
    assert_eq!(report.failed_count(), 1, "{}", report.render_text());
    let first_failed = report
        .results
        .iter()
        .position(|r| r.status == Status::Failed)
        .unwrap();
    assert!(report.results[first_failed + 1..]
        .iter()
        .all(|r| r.status == Status::Skipped));
}

#[test]
fn test_report_round_trips_through_json_file() {
    let report = run(MockSite::builder().fault(Fault::StickyPagination));
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    report.write(&path).unwrap();
    let loaded = SuiteReport::from_json(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(loaded.run_id, report.run_id);
    assert_eq!(loaded.failed_count(), report.failed_count());
}

// ============================================================================
// Catalog sizes around the page size
// ============================================================================

fn pagination_report(count: usize) -> SuiteReport {
    runner(fast_config(), MockSite::builder().extensions(count))
        .with_tag(tags::PAGINATION)
        .run(&catalog::<MockSite>())
}

#[test]
fn test_pagination_flow_at_the_page_size() {
    for count in [19, 20, 21] {
        let report = pagination_report(count);
        assert!(report.results.len() >= 4);
        assert!(report.all_passed(), "{count} extensions\n{}", report.render_text());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Every pagination scenario holds for any catalog size
    #[test]
    fn prop_pagination_holds_for_any_size(count in prop_oneof![19usize..=21, 1usize..70]) {
        let report = pagination_report(count);
        prop_assert!(!report.results.is_empty());
        prop_assert!(report.all_passed(), "{}", report.render_text());
    }
}
