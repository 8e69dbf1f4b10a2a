//! Page objects
//!
//! One type per page or page region. A page object mutably borrows the
//! [`Session`]; action methods that navigate consume the page object and
//! return the destination type, so a page cannot be queried after it has
//! been navigated away from.
//!
//! ```text
//!   Home ──header()──► Header ──click_extensions()──► ExtensionsListing
//!    │                    └──click_complete_themes()─► ThemeListing
//!    └─click_on_first_addon()──► Details ──image_viewer()──► ImageViewer
//! ```

/// Implements [`PageObject`] for a struct holding `session: &'s mut Session<D>`.
macro_rules! page_object {
    ($ty:ident, $name:expr, [$($pattern:expr),+ $(,)?], $loaded:expr) => {
        impl<'s, D: $crate::driver::Driver + 's> $crate::pages::PageObject<'s, D> for $ty<'s, D> {
            const NAME: &'static str = $name;
            const URL_PATTERNS: &'static [&'static str] = &[$($pattern),+];
            const LOADED: &'static str = $loaded;

            fn from_session(session: &'s mut $crate::pages::Session<D>) -> Self {
                Self { session }
            }

            fn session(&mut self) -> &mut $crate::pages::Session<D> {
                self.session
            }

            fn into_session(self) -> &'s mut $crate::pages::Session<D> {
                self.session
            }
        }
    };
}
pub(crate) use page_object;

mod account;
mod category;
mod details;
mod header;
mod home;
mod image_viewer;
mod listing;
mod paginator;
mod sorter;

pub use account::{Login, UserEdit, UserProfile};
pub use category::CategoryRegion;
pub use details::Details;
pub use header::Header;
pub use home::Home;
pub use image_viewer::ImageViewer;
pub use listing::{CompleteThemes, Extensions, ExtensionsListing, Listing, ListingKind, ThemeListing};
pub use paginator::{check_presence, PageTurn, Paginator};
pub use sorter::Sorter;

use crate::config::SuiteConfig;
use crate::driver::Driver;
use crate::locator::Locator;
use crate::model::Breadcrumb;
use crate::result::{ProbeError, ProbeResult};
use crate::selectors as sel;
use crate::wait::{self, WaitOptions};

/// One browser session plus the configuration it runs under.
///
/// Scenarios never share a session; the runner builds a fresh one for each.
#[derive(Debug)]
pub struct Session<D> {
    driver: D,
    config: SuiteConfig,
}

impl<D: Driver> Session<D> {
    /// Wrap a driver
    #[must_use]
    pub const fn new(driver: D, config: SuiteConfig) -> Self {
        Self { driver, config }
    }

    /// The underlying driver
    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Give the driver back
    #[must_use]
    pub fn into_driver(self) -> D {
        self.driver
    }

    /// Configuration
    #[must_use]
    pub const fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// Locator using the session's implicit wait
    #[must_use]
    pub fn locator(&self, css: &str) -> Locator {
        Locator::new(css).with_wait(self.config.wait_options())
    }

    fn navigation_wait(&self) -> WaitOptions {
        WaitOptions::new()
            .with_timeout(self.config.driver.navigation_timeout_ms)
            .with_poll_interval(self.config.driver.poll_interval_ms)
    }

    /// Navigate to a path below the application root
    ///
    /// # Errors
    ///
    /// Returns error if the driver cannot navigate
    pub fn goto(&mut self, path: &str) -> ProbeResult<()> {
        let url = self.config.url(path);
        tracing::info!(%url, "navigate");
        self.driver.navigate(&url)
    }

    /// Current URL
    ///
    /// # Errors
    ///
    /// Returns error if the driver cannot report it
    pub fn current_url(&mut self) -> ProbeResult<String> {
        self.driver.current_url()
    }

    /// Path of `url` below the application root, without query or
    /// fragment; `None` when `url` is elsewhere
    #[must_use]
    pub fn app_path(&self, url: &str) -> Option<String> {
        let rest = url.strip_prefix(&self.config.home_url())?;
        let path = rest.split(['?', '#']).next().unwrap_or(rest);
        Some(path.to_string())
    }

    /// Text of the first match, waiting for it
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::ElementNotFound`] if nothing matches in time
    pub fn text(&mut self, css: &str) -> ProbeResult<String> {
        self.locator(css).text(&mut self.driver)
    }

    /// Texts of all current matches
    ///
    /// # Errors
    ///
    /// Returns error if the driver fails
    pub fn texts(&mut self, css: &str) -> ProbeResult<Vec<String>> {
        self.locator(css).texts(&mut self.driver)
    }

    /// Number of current matches
    ///
    /// # Errors
    ///
    /// Returns error if the driver fails
    pub fn count(&mut self, css: &str) -> ProbeResult<usize> {
        self.locator(css).count(&mut self.driver)
    }

    /// Whether anything matches right now
    ///
    /// # Errors
    ///
    /// Returns error if the driver fails
    pub fn is_present(&mut self, css: &str) -> ProbeResult<bool> {
        self.locator(css).is_present(&mut self.driver)
    }

    /// Whether any match is visible right now
    ///
    /// # Errors
    ///
    /// Returns error if the driver fails
    pub fn is_visible(&mut self, css: &str) -> ProbeResult<bool> {
        self.locator(css).is_visible(&mut self.driver)
    }

    /// Attribute of the first match
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::ElementNotFound`] if nothing matches in time
    pub fn attribute(&mut self, css: &str, name: &str) -> ProbeResult<Option<String>> {
        self.locator(css).attribute(&mut self.driver, name)
    }

    /// Whether the first match carries `class`
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::ElementNotFound`] if nothing matches in time
    pub fn has_class(&mut self, css: &str, class: &str) -> ProbeResult<bool> {
        Ok(self
            .attribute(css, "class")?
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class)))
    }

    /// Click without waiting for a navigation
    ///
    /// # Errors
    ///
    /// Returns error if the element is missing or not interactable
    pub fn click(&mut self, locator: &Locator) -> ProbeResult<()> {
        locator.click(&mut self.driver)
    }

    /// Hover over the first match
    ///
    /// # Errors
    ///
    /// Returns error if the element is missing
    pub fn hover(&mut self, css: &str) -> ProbeResult<()> {
        self.locator(css).hover(&mut self.driver)
    }

    /// Type into the first match
    ///
    /// # Errors
    ///
    /// Returns error if the element is missing or not an input
    pub fn fill(&mut self, css: &str, text: &str) -> ProbeResult<()> {
        self.locator(css).fill(&mut self.driver, text)
    }

    /// Click a link and wait until the browser has left the current URL
    /// (or arrived at the link target)
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Timeout`] if the navigation does not happen
    pub fn follow(&mut self, locator: &Locator) -> ProbeResult<String> {
        self.follow_nth(locator, 0)
    }

    /// [`follow`](Self::follow) the `index`-th match
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::ElementNotFound`] if there is no such match
    pub fn follow_nth(&mut self, locator: &Locator, index: usize) -> ProbeResult<String> {
        let handle = locator.nth(&mut self.driver, index)?;
        let before = self.driver.current_url()?;
        let href = self.driver.attribute(&handle, "href")?;
        tracing::debug!(selector = %locator.selector(), href = ?href, "follow");
        self.driver.click(&handle)?;

        let options = self.navigation_wait();
        let driver = &mut self.driver;
        let waited = wait::poll(options, &format!("navigation away from {before}"), || {
            let now = driver.current_url()?;
            let arrived = now != before || href.as_deref() == Some(now.as_str());
            Ok(arrived.then_some(now))
        })?;
        Ok(waited.value)
    }

    /// Poll `predicate` with the implicit wait
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Timeout`] if it never holds
    pub fn wait_until<F>(&mut self, waited_for: &str, mut predicate: F) -> ProbeResult<()>
    where
        F: FnMut(&mut Self) -> ProbeResult<bool>,
    {
        let options = self.config.wait_options();
        wait::wait_until(options, waited_for, || predicate(&mut *self))
    }

    /// Open the application home page
    ///
    /// # Errors
    ///
    /// Returns error if navigation fails or the page does not load
    pub fn home(&mut self) -> ProbeResult<Home<'_, D>> {
        Home::open(self)
    }

    /// Close the browser
    ///
    /// # Errors
    ///
    /// Returns error if the driver fails to shut down
    pub fn close(mut self) -> ProbeResult<()> {
        self.driver.close()
    }
}

/// URL path matcher for page objects.
///
/// Patterns are relative to the application root and support literal
/// segments, `*` and named `:param` segments, each consuming exactly one
/// path segment. The empty pattern matches the root itself.
#[derive(Debug, Clone)]
pub struct UrlMatcher {
    pattern: String,
    segments: Vec<UrlSegment>,
}

#[derive(Debug, Clone)]
enum UrlSegment {
    Literal(String),
    Wildcard,
    Parameter(String),
}

impl UrlMatcher {
    /// Compile a pattern such as `addon/:slug`
    #[must_use]
    pub fn new(pattern: &str) -> Self {
        let segments = pattern
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| {
                if s == "*" {
                    UrlSegment::Wildcard
                } else if let Some(name) = s.strip_prefix(':') {
                    UrlSegment::Parameter(name.to_string())
                } else {
                    UrlSegment::Literal(s.to_string())
                }
            })
            .collect();
        Self {
            pattern: pattern.to_string(),
            segments,
        }
    }

    /// Check if a path matches
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        parts.len() == self.segments.len()
            && self.segments.iter().zip(&parts).all(|(seg, part)| match seg {
                UrlSegment::Literal(lit) => lit == part,
                UrlSegment::Wildcard | UrlSegment::Parameter(_) => true,
            })
    }

    /// Value of a named parameter in `path`
    #[must_use]
    pub fn param<'p>(&self, path: &'p str, name: &str) -> Option<&'p str> {
        if !self.matches(path) {
            return None;
        }
        self.segments
            .iter()
            .zip(path.split('/').filter(|s| !s.is_empty()))
            .find_map(|(seg, part)| match seg {
                UrlSegment::Parameter(p) if p == name => Some(part),
                _ => None,
            })
    }

    /// Get the pattern string
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

/// A page or page region bound to a session.
pub trait PageObject<'s, D: Driver + 's>: Sized {
    /// Name used in errors and logs
    const NAME: &'static str;
    /// Paths (below the application root) this page lives at
    const URL_PATTERNS: &'static [&'static str];
    /// Selector present once the page has loaded
    const LOADED: &'static str;

    /// Bind to a session without checks
    fn from_session(session: &'s mut Session<D>) -> Self;

    /// Borrow the session
    fn session(&mut self) -> &mut Session<D>;

    /// Give the session back
    fn into_session(self) -> &'s mut Session<D>;

    /// Whether `url` is one of this page's URLs
    fn matches_url(session: &Session<D>, url: &str) -> bool {
        session.app_path(url).is_some_and(|path| {
            Self::URL_PATTERNS
                .iter()
                .any(|p| UrlMatcher::new(p).matches(&path))
        })
    }

    /// Bind to the page the browser is showing.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::UnexpectedPage`] if the URL belongs to another
    /// page, or [`ProbeError::ElementNotFound`] if the page never loads
    fn attach(session: &'s mut Session<D>) -> ProbeResult<Self> {
        let url = session.current_url()?;
        if !Self::matches_url(session, &url) {
            return Err(ProbeError::UnexpectedPage {
                expected: Self::NAME.to_string(),
                url,
            });
        }
        let marker = session.locator(Self::LOADED);
        let _ = marker
            .first(session.driver())
            .map_err(|e| e.at_url(&url))?;
        tracing::debug!(page = Self::NAME, %url, "attached");
        Ok(Self::from_session(session))
    }

    /// Current URL
    ///
    /// # Errors
    ///
    /// Returns error if the driver cannot report it
    fn current_url(&mut self) -> ProbeResult<String> {
        self.session().current_url()
    }

    /// Document title
    ///
    /// # Errors
    ///
    /// Returns error if the driver cannot report it
    fn title(&mut self) -> ProbeResult<String> {
        self.session().driver().title()
    }

    /// Breadcrumb trail, root first
    ///
    /// # Errors
    ///
    /// Returns error if the driver fails
    fn breadcrumbs(&mut self) -> ProbeResult<Vec<Breadcrumb>> {
        read_breadcrumbs(self.session())
    }

    /// Site header
    fn header(&mut self) -> Header<'_, D> {
        Header::new(self.session())
    }

    /// Browser back, landing on a `P`
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::UnexpectedPage`] if history leads elsewhere
    fn go_back<P: PageObject<'s, D>>(self) -> ProbeResult<P> {
        let session = self.into_session();
        let before = session.current_url()?;
        session.driver().go_back()?;
        session.wait_until("history navigation", |s| {
            Ok(s.current_url()? != before)
        })?;
        P::attach(session)
    }
}

/// Read `#breadcrumbs`: every crumb but the current one carries a link.
pub(crate) fn read_breadcrumbs<D: Driver>(session: &mut Session<D>) -> ProbeResult<Vec<Breadcrumb>> {
    let labels = session.texts(sel::BREADCRUMBS)?;
    let links = session.locator(sel::BREADCRUMB_LINKS).all(session.driver())?;
    let mut hrefs = Vec::with_capacity(links.len());
    for link in &links {
        let text = session.driver().text(link)?;
        let href = session.driver().attribute(link, "href")?;
        hrefs.push((text, href));
    }
    Ok(labels
        .into_iter()
        .enumerate()
        .map(|(i, label)| {
            let href = hrefs
                .get(i)
                .filter(|(text, _)| *text == label)
                .and_then(|(_, href)| href.clone());
            Breadcrumb { label, href }
        })
        .collect())
}
