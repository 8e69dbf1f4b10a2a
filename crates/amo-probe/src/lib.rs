//! amo-probe: acceptance suite for the add-ons marketplace
//!
//! Page objects model the marketplace pages a visitor walks through: the
//! home page, extension and theme listings with their sorter and paginator,
//! add-on details with the image viewer, and the account pages. Scenarios
//! drive them through a [`Driver`] and check what the site renders:
//! orderings across page boundaries, breadcrumbs, paginator presence,
//! navigation targets and profile edits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    AMO-PROBE Architecture                        │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Scenarios  │    │ Page       │    │ Driver     │            │
//! │   │ + Runner   │───►│ Objects    │───►│ Chromium / │            │
//! │   │            │    │ (Session)  │    │ MockSite   │            │
//! │   └────────────┘    └────────────┘    └────────────┘            │
//! │         │                                                       │
//! │         ▼                                                       │
//! │   ┌────────────┐                                                │
//! │   │ SuiteReport│  text / JSON / JUnit                           │
//! │   └────────────┘                                                │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use amo_probe::{catalog, mock_config, MockSite, ProbeResult, Runner, SuiteConfig};
//!
//! let config = mock_config(SuiteConfig::new());
//! let accounts = config.clone();
//! let mut runner = Runner::new(config, move || -> ProbeResult<MockSite> {
//!     Ok(MockSite::builder().accounts_from(&accounts).build())
//! })
//! .with_tag("home");
//! let report = runner.run(&catalog::<MockSite>());
//! assert!(report.all_passed(), "{}", report.render_text());
//! ```

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::large_stack_arrays, clippy::large_stack_frames))]

#[cfg(feature = "browser")]
#[allow(clippy::missing_const_for_fn, clippy::cast_possible_truncation)]
mod browser;
mod config;
mod driver;
#[allow(clippy::missing_const_for_fn, clippy::doc_markdown)]
mod locator;
mod model;
#[allow(clippy::missing_errors_doc, clippy::must_use_candidate)]
mod pages;
#[allow(clippy::cast_precision_loss, clippy::format_push_string)]
mod report;
mod result;
mod site;
mod verify;
mod wait;

#[allow(missing_docs)]
pub mod selectors;
pub mod suite;

#[cfg(feature = "browser")]
pub use browser::ChromiumDriver;
pub use config::{Credentials, SuiteConfig};
pub use driver::{Driver, DriverConfig, ElementHandle};
pub use locator::{Locator, LocatorOptions, Selector};
pub use model::{
    format_count, format_date, parse_count, parse_date, parse_position, query_param, Breadcrumb,
    Direction, ExploreFilter, ItemSummary, ListingSnapshot, SortField, SortKey, SortValue,
    DATE_FORMAT, PAGE_SIZE,
};
pub use pages::{
    check_presence, CategoryRegion, CompleteThemes, Details, Extensions, ExtensionsListing,
    Header, Home, ImageViewer, Listing, ListingKind, Login, PageObject, PageTurn, Paginator,
    Session, Sorter, ThemeListing, UrlMatcher, UserEdit, UserProfile,
};
pub use report::{ScenarioResult, Status, SuiteReport};
pub use result::{ProbeError, ProbeResult};
pub use site::{mock_config, Fault, MockSite, MockSiteBuilder, MOCK_BASE_URL};
pub use suite::{catalog, Runner, Scenario, ScenarioFn};
pub use verify::{
    verify_breadcrumbs, verify_names_ascending, verify_order, verify_unique_names, Assertion,
    AssertionResult, OrderAccumulator,
};
pub use wait::{poll, wait_until, WaitOptions, WaitResult, DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::{
        catalog, mock_config, Assertion, Credentials, Direction, Driver, DriverConfig, MockSite,
        PageObject, ProbeError, ProbeResult, Runner, Scenario, Session, SortKey, SuiteConfig,
        SuiteReport,
    };
    #[cfg(feature = "browser")]
    pub use super::ChromiumDriver;
}
