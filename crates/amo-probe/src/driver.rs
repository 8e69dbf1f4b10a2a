//! Driver - abstract browser capability set
//!
//! Page objects never talk to a browser directly. They consume the small
//! capability set below, which lets the same scenarios run against Chromium
//! (feature `browser`) or the in-memory [`MockSite`](crate::MockSite).
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Driver (trait)                                              │
//! ├──────────────────────────────────────────────────────────────┤
//! │   ┌──────────────────────┐      ┌──────────────────────┐     │
//! │   │  ChromiumDriver      │      │  MockSite            │     │
//! │   │  CDP via             │      │  rendered in memory  │     │
//! │   │  chromiumoxide       │      │  from a catalog      │     │
//! │   └──────────────────────┘      └──────────────────────┘     │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every call blocks until the browser reports the result.

use crate::result::ProbeResult;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Handle to one element matched by a selector.
///
/// Handles are cheap and are only valid until the next navigation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementHandle {
    /// Driver-unique identifier
    pub id: String,
    /// Selector the element was found with
    pub selector: String,
    /// Position among the matches of `selector`
    pub index: usize,
}

impl ElementHandle {
    /// Create a new element handle
    #[must_use]
    pub fn new(id: impl Into<String>, selector: impl Into<String>, index: usize) -> Self {
        Self {
            id: id.into(),
            selector: selector.into(),
            index,
        }
    }
}

/// Browser configuration for a driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Disable the Chromium sandbox (containers/CI)
    pub no_sandbox: bool,
    /// Executable path override
    pub chromium_path: Option<String>,
    /// Timeout for navigation, in milliseconds
    pub navigation_timeout_ms: u64,
    /// Timeout for the implicit element presence wait, in milliseconds
    pub element_timeout_ms: u64,
    /// Poll interval for the implicit wait, in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1280,
            viewport_height: 1024,
            no_sandbox: false,
            chromium_path: None,
            navigation_timeout_ms: 30_000,
            element_timeout_ms: 10_000,
            poll_interval_ms: 100,
        }
    }
}

impl DriverConfig {
    /// Create new config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set headless mode
    #[must_use]
    pub const fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set viewport dimensions
    #[must_use]
    pub const fn viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set the implicit element wait
    #[must_use]
    pub const fn element_timeout(mut self, timeout: Duration) -> Self {
        self.element_timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Set the navigation timeout
    #[must_use]
    pub const fn navigation_timeout(mut self, timeout: Duration) -> Self {
        self.navigation_timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Element wait as a `Duration`
    #[must_use]
    pub const fn element_wait(&self) -> Duration {
        Duration::from_millis(self.element_timeout_ms)
    }

    /// Poll interval as a `Duration`
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Abstract browser automation capability set.
///
/// # Implementations
///
/// - `ChromiumDriver` - real browser over CDP (feature `browser`)
/// - `MockSite` - deterministic in-memory marketplace
pub trait Driver {
    /// Navigate to an absolute URL
    fn navigate(&mut self, url: &str) -> ProbeResult<()>;

    /// Current absolute URL
    fn current_url(&mut self) -> ProbeResult<String>;

    /// Document title
    fn title(&mut self) -> ProbeResult<String>;

    /// All elements matching a CSS selector, in document order.
    ///
    /// An empty result is not an error; presence waits live in
    /// [`Locator`](crate::Locator).
    fn find_all(&mut self, css: &str) -> ProbeResult<Vec<ElementHandle>>;

    /// Click an element
    fn click(&mut self, element: &ElementHandle) -> ProbeResult<()>;

    /// Move the pointer over an element
    fn hover(&mut self, element: &ElementHandle) -> ProbeResult<()>;

    /// Replace the value of an input element
    fn fill(&mut self, element: &ElementHandle, text: &str) -> ProbeResult<()>;

    /// Visible text of an element, trimmed
    fn text(&mut self, element: &ElementHandle) -> ProbeResult<String>;

    /// Attribute value, `None` when absent
    fn attribute(&mut self, element: &ElementHandle, name: &str) -> ProbeResult<Option<String>>;

    /// Whether the element is rendered and visible
    fn is_visible(&mut self, element: &ElementHandle) -> ProbeResult<bool>;

    /// Go back in history
    fn go_back(&mut self) -> ProbeResult<()>;

    /// Release the browser
    fn close(&mut self) -> ProbeResult<()> {
        Ok(())
    }
}

impl<D: Driver + ?Sized> Driver for Box<D> {
    fn navigate(&mut self, url: &str) -> ProbeResult<()> {
        (**self).navigate(url)
    }

    fn current_url(&mut self) -> ProbeResult<String> {
        (**self).current_url()
    }

    fn title(&mut self) -> ProbeResult<String> {
        (**self).title()
    }

    fn find_all(&mut self, css: &str) -> ProbeResult<Vec<ElementHandle>> {
        (**self).find_all(css)
    }

    fn click(&mut self, element: &ElementHandle) -> ProbeResult<()> {
        (**self).click(element)
    }

    fn hover(&mut self, element: &ElementHandle) -> ProbeResult<()> {
        (**self).hover(element)
    }

    fn fill(&mut self, element: &ElementHandle, text: &str) -> ProbeResult<()> {
        (**self).fill(element, text)
    }

    fn text(&mut self, element: &ElementHandle) -> ProbeResult<String> {
        (**self).text(element)
    }

    fn attribute(&mut self, element: &ElementHandle, name: &str) -> ProbeResult<Option<String>> {
        (**self).attribute(element, name)
    }

    fn is_visible(&mut self, element: &ElementHandle) -> ProbeResult<bool> {
        (**self).is_visible(element)
    }

    fn go_back(&mut self) -> ProbeResult<()> {
        (**self).go_back()
    }

    fn close(&mut self) -> ProbeResult<()> {
        (**self).close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod element_handle_tests {
        use super::*;

        #[test]
        fn test_element_handle_creation() {
            let elem = ElementHandle::new("sel#0", ".items .item", 0);
            assert_eq!(elem.id, "sel#0");
            assert_eq!(elem.selector, ".items .item");
            assert_eq!(elem.index, 0);
        }
    }

    mod driver_config_tests {
        use super::*;

        #[test]
        fn test_config_default() {
            let config = DriverConfig::default();
            assert!(config.headless);
            assert_eq!(config.viewport_width, 1280);
            assert_eq!(config.element_wait(), Duration::from_secs(10));
        }

        #[test]
        fn test_config_builder() {
            let config = DriverConfig::new()
                .headless(false)
                .viewport(800, 600)
                .element_timeout(Duration::from_millis(250));

            assert!(!config.headless);
            assert_eq!(config.viewport_width, 800);
            assert_eq!(config.viewport_height, 600);
            assert_eq!(config.element_timeout_ms, 250);
        }

        #[test]
        fn test_config_partial_yaml() {
            let config: DriverConfig = serde_yaml_ng::from_str("headless: false\n").unwrap();
            assert!(!config.headless);
            assert_eq!(config.poll_interval_ms, 100);
        }
    }
}
