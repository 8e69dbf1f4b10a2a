//! Locator abstraction for element selection and interaction.
//!
//! Locators resolve through a [`Driver`] and wait implicitly for presence,
//! so page objects can query an element right after a click without
//! sprinkling sleeps around.

use crate::driver::{Driver, ElementHandle};
use crate::result::{ProbeError, ProbeResult};
use crate::wait::{self, WaitOptions};
use std::time::Duration;

/// Selector type for locating elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// CSS selector (e.g., "#sorter li.selected a")
    Css(String),
    /// CSS selector narrowed to elements whose text contains `text`
    CssWithText {
        /// Base CSS selector
        css: String,
        /// Text content to match
        text: String,
    },
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// The CSS part of the selector
    #[must_use]
    pub fn css_part(&self) -> &str {
        match self {
            Self::Css(css) | Self::CssWithText { css, .. } => css,
        }
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Css(css) => write!(f, "{css}"),
            Self::CssWithText { css, text } => write!(f, "{css} (text {text:?})"),
        }
    }
}

/// Locator options for customizing behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LocatorOptions {
    /// Presence wait
    pub wait: WaitOptions,
}

/// A locator for finding and interacting with elements.
#[derive(Debug, Clone)]
pub struct Locator {
    selector: Selector,
    options: LocatorOptions,
}

impl Locator {
    /// Create a new locator with a CSS selector
    #[must_use]
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: Selector::Css(selector.into()),
            options: LocatorOptions::default(),
        }
    }

    /// Create a locator from a selector
    #[must_use]
    pub fn from_selector(selector: Selector) -> Self {
        Self {
            selector,
            options: LocatorOptions::default(),
        }
    }

    /// Filter by text content
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        let css = match self.selector {
            Selector::Css(css) | Selector::CssWithText { css, .. } => css,
        };
        Self {
            selector: Selector::CssWithText {
                css,
                text: text.into(),
            },
            options: self.options,
        }
    }

    /// Set the presence wait
    #[must_use]
    pub const fn with_wait(mut self, wait: WaitOptions) -> Self {
        self.options.wait = wait;
        self
    }

    /// Set a custom timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.options.wait.timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Get the selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Get the options
    #[must_use]
    pub const fn options(&self) -> &LocatorOptions {
        &self.options
    }

    /// All current matches, without waiting
    pub fn all<D: Driver + ?Sized>(&self, driver: &mut D) -> ProbeResult<Vec<ElementHandle>> {
        let found = driver.find_all(self.selector.css_part())?;
        match &self.selector {
            Selector::Css(_) => Ok(found),
            Selector::CssWithText { text, .. } => {
                let mut kept = Vec::with_capacity(found.len());
                for handle in found {
                    if driver.text(&handle)?.contains(text.as_str()) {
                        kept.push(handle);
                    }
                }
                Ok(kept)
            }
        }
    }

    /// Number of current matches, without waiting
    pub fn count<D: Driver + ?Sized>(&self, driver: &mut D) -> ProbeResult<usize> {
        Ok(self.all(driver)?.len())
    }

    /// Whether at least one element matches right now
    pub fn is_present<D: Driver + ?Sized>(&self, driver: &mut D) -> ProbeResult<bool> {
        Ok(!self.all(driver)?.is_empty())
    }

    /// The `index`-th match, waiting for it to appear
    pub fn nth<D: Driver + ?Sized>(
        &self,
        driver: &mut D,
        index: usize,
    ) -> ProbeResult<ElementHandle> {
        let waited = wait::poll(self.options.wait, &self.selector.to_string(), || {
            Ok(self.all(driver)?.into_iter().nth(index))
        });
        match waited {
            Ok(result) => Ok(result.value),
            Err(ProbeError::Timeout { .. }) => Err(ProbeError::ElementNotFound {
                selector: format!("{}[{index}]", self.selector),
                url: driver.current_url().unwrap_or_default(),
            }),
            Err(other) => Err(other),
        }
    }

    /// The first match, waiting for it to appear
    pub fn first<D: Driver + ?Sized>(&self, driver: &mut D) -> ProbeResult<ElementHandle> {
        self.nth(driver, 0)
    }

    /// The first match, waiting for it to become visible
    pub fn wait_visible<D: Driver + ?Sized>(
        &self,
        driver: &mut D,
    ) -> ProbeResult<ElementHandle> {
        let description = format!("{} to be visible", self.selector);
        let waited = wait::poll(self.options.wait, &description, || {
            for handle in self.all(driver)? {
                if driver.is_visible(&handle)? {
                    return Ok(Some(handle));
                }
            }
            Ok(None)
        });
        match waited {
            Ok(result) => Ok(result.value),
            Err(ProbeError::Timeout { .. }) => Err(ProbeError::ElementNotFound {
                selector: description,
                url: driver.current_url().unwrap_or_default(),
            }),
            Err(other) => Err(other),
        }
    }

    /// Whether any match is visible right now
    pub fn is_visible<D: Driver + ?Sized>(&self, driver: &mut D) -> ProbeResult<bool> {
        for handle in self.all(driver)? {
            if driver.is_visible(&handle)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Text of the first match
    pub fn text<D: Driver + ?Sized>(&self, driver: &mut D) -> ProbeResult<String> {
        let handle = self.first(driver)?;
        driver.text(&handle)
    }

    /// Text of every current match, in document order
    pub fn texts<D: Driver + ?Sized>(&self, driver: &mut D) -> ProbeResult<Vec<String>> {
        self.all(driver)?
            .iter()
            .map(|handle| driver.text(handle))
            .collect()
    }

    /// Attribute of the first match
    pub fn attribute<D: Driver + ?Sized>(
        &self,
        driver: &mut D,
        name: &str,
    ) -> ProbeResult<Option<String>> {
        let handle = self.first(driver)?;
        driver.attribute(&handle, name)
    }

    /// Click the first match
    pub fn click<D: Driver + ?Sized>(&self, driver: &mut D) -> ProbeResult<()> {
        let handle = self.first(driver)?;
        tracing::debug!(selector = %self.selector, "click");
        driver.click(&handle)
    }

    /// Hover over the first match
    pub fn hover<D: Driver + ?Sized>(&self, driver: &mut D) -> ProbeResult<()> {
        let handle = self.first(driver)?;
        tracing::debug!(selector = %self.selector, "hover");
        driver.hover(&handle)
    }

    /// Replace the value of the first match
    pub fn fill<D: Driver + ?Sized>(&self, driver: &mut D, text: &str) -> ProbeResult<()> {
        let handle = self.first(driver)?;
        driver.fill(&handle, text)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::site::MockSite;

    fn fast() -> WaitOptions {
        WaitOptions::new().with_timeout(0)
    }

    mod selector_tests {
        use super::*;

        #[test]
        fn test_css_part() {
            assert_eq!(Selector::css("#a").css_part(), "#a");
            let with_text = Locator::new("#sorter li a").with_text("Newest");
            assert_eq!(with_text.selector().css_part(), "#sorter li a");
        }

        #[test]
        fn test_display() {
            let sel = Selector::CssWithText {
                css: "a".into(),
                text: "Next".into(),
            };
            assert_eq!(sel.to_string(), "a (text \"Next\")");
        }
    }

    mod resolve_tests {
        use super::*;

        #[test]
        fn test_text_filter() {
            let mut site = MockSite::new();
            site.navigate("https://addons.example.test/en-US/firefox/")
                .unwrap();
            let nav = Locator::new("#site-nav > li > a").with_wait(fast());
            let all = nav.count(&mut site).unwrap();
            let themes = nav.clone().with_text("Complete Themes");
            assert!(all >= 2);
            assert_eq!(themes.count(&mut site).unwrap(), 1);
        }

        #[test]
        fn test_missing_element_reports_selector_and_url() {
            let mut site = MockSite::new();
            site.navigate("https://addons.example.test/en-US/firefox/")
                .unwrap();
            let err = Locator::new("#does-not-exist")
                .with_wait(fast())
                .first(&mut site)
                .unwrap_err();
            match err {
                ProbeError::ElementNotFound { selector, url } => {
                    assert!(selector.contains("#does-not-exist"));
                    assert!(url.ends_with("/en-US/firefox/"));
                }
                other => panic!("unexpected error: {other}"),
            }
        }

        #[test]
        fn test_wait_visible_skips_hidden_matches() {
            let mut site = MockSite::new();
            site.navigate("https://addons.example.test/en-US/firefox/")
                .unwrap();
            let dropdown = Locator::new("#other-apps ul").with_wait(fast());
            assert!(dropdown.is_present(&mut site).unwrap());
            assert!(!dropdown.is_visible(&mut site).unwrap());
            assert!(dropdown.wait_visible(&mut site).is_err());

            Locator::new("#other-apps > a").hover(&mut site).unwrap();
            assert!(dropdown.wait_visible(&mut site).is_ok());
        }
    }
}
