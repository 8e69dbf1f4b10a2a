//! MockSite - in-memory marketplace implementing [`Driver`].
//!
//! Renders home, listing, category, detail and account pages from a
//! deterministic catalog so the scenario catalog can run without a browser.
//! Faults can be injected to prove the suite catches a broken site.

mod catalog;
mod dom;
mod render;

use crate::config::{Credentials, SuiteConfig};
use crate::driver::{Driver, ElementHandle};
use crate::result::{ProbeError, ProbeResult};
use dom::{Action, Node};
use std::collections::{HashMap, HashSet};

/// Base URL the mock site answers on
pub const MOCK_BASE_URL: &str = "https://addons.example.test";

/// Path of the Firefox application root
pub(crate) const APP_ROOT: &str = "/en-US/firefox/";

/// Point `config` at the mock site, filling in the accounts it lacks.
///
/// Pair with [`MockSiteBuilder::accounts_from`] so the accounts exist.
#[must_use]
pub fn mock_config(config: SuiteConfig) -> SuiteConfig {
    let mut config = config.with_base_url(MOCK_BASE_URL);
    config.locale = "en-US".to_string();
    config.app = "firefox".to_string();
    if config.existing_user.is_none() {
        config.existing_user = Some(Credentials::new("regular@example.test", "regular-pass"));
    }
    if config.editable_user.is_none() {
        config.editable_user = Some(Credentials::new("editor@example.test", "editor-pass"));
    }
    config
}

/// Deliberate defects the mock site can be built with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fault {
    /// Listing pages 1 and 2 are served swapped: each page is sorted,
    /// the run across the boundary is not
    BrokenPageBoundary,
    /// The second row of every listing page repeats the first row's name
    DuplicateName,
    /// Sort links keep the current `page` parameter instead of resetting
    StickyPagination,
    /// The complete-themes side navigation lists an extension category
    SharedCategories,
    /// Public profiles never show the location
    ProfileDropsLocation,
    /// Public profiles show the email even when it is hidden
    ProfileLeaksEmail,
}

#[derive(Debug, Clone)]
struct Profile {
    display_name: String,
    location: String,
    occupation: String,
    homepage: String,
    hide_email: bool,
}

#[derive(Debug, Clone)]
struct Account {
    credentials: Credentials,
    profile: Profile,
}

#[derive(Debug, Clone, Default)]
struct UiState {
    hovered: Option<String>,
    expanded: HashSet<&'static str>,
    viewer: Option<(usize, usize)>,
    form: HashMap<String, String>,
    hide_email: Option<bool>,
    success: Option<String>,
    error: Option<String>,
}

/// Builder for [`MockSite`]
#[derive(Debug, Clone)]
pub struct MockSiteBuilder {
    base_url: String,
    extensions: usize,
    themes: usize,
    accounts: Vec<Credentials>,
    faults: HashSet<Fault>,
}

impl Default for MockSiteBuilder {
    fn default() -> Self {
        Self {
            base_url: MOCK_BASE_URL.to_string(),
            extensions: 47,
            themes: 53,
            accounts: Vec::new(),
            faults: HashSet::new(),
        }
    }
}

impl MockSiteBuilder {
    /// Serve under another base URL
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Number of extensions in the catalog
    #[must_use]
    pub const fn extensions(mut self, count: usize) -> Self {
        self.extensions = count;
        self
    }

    /// Number of complete themes in the catalog
    #[must_use]
    pub const fn themes(mut self, count: usize) -> Self {
        self.themes = count;
        self
    }

    /// Register an account that can log in
    #[must_use]
    pub fn account(mut self, credentials: Credentials) -> Self {
        self.accounts.push(credentials);
        self
    }

    /// Register the accounts `config` names
    #[must_use]
    pub fn accounts_from(mut self, config: &SuiteConfig) -> Self {
        for credentials in [&config.existing_user, &config.editable_user]
            .into_iter()
            .flatten()
        {
            if !self.accounts.iter().any(|a| a.email == credentials.email) {
                self.accounts.push(credentials.clone());
            }
        }
        self
    }

    /// Inject a fault
    #[must_use]
    pub fn fault(mut self, fault: Fault) -> Self {
        let _ = self.faults.insert(fault);
        self
    }

    /// Build the site
    #[must_use]
    pub fn build(self) -> MockSite {
        let accounts = self
            .accounts
            .into_iter()
            .map(|credentials| {
                let display_name = credentials.display_name.clone().unwrap_or_else(|| {
                    credentials
                        .email
                        .split('@')
                        .next()
                        .unwrap_or_default()
                        .to_string()
                });
                Account {
                    credentials,
                    profile: Profile {
                        display_name,
                        location: String::new(),
                        occupation: String::new(),
                        homepage: String::new(),
                        hide_email: true,
                    },
                }
            })
            .collect();
        MockSite {
            base_url: self.base_url,
            catalog: catalog::Catalog::generate(self.extensions, self.themes),
            faults: self.faults,
            accounts,
            logged_in: None,
            path: None,
            history: Vec::new(),
            generation: 0,
            ui: UiState::default(),
            calls: Vec::new(),
        }
    }
}

/// In-memory marketplace implementing [`Driver`]
#[derive(Debug, Clone)]
pub struct MockSite {
    base_url: String,
    catalog: catalog::Catalog,
    faults: HashSet<Fault>,
    accounts: Vec<Account>,
    logged_in: Option<usize>,
    path: Option<String>,
    history: Vec<String>,
    generation: u64,
    ui: UiState,
    calls: Vec<String>,
}

impl Default for MockSite {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSite {
    /// Site with the default catalog and no accounts
    #[must_use]
    pub fn new() -> Self {
        MockSiteBuilder::default().build()
    }

    /// Start configuring a site
    #[must_use]
    pub fn builder() -> MockSiteBuilder {
        MockSiteBuilder::default()
    }

    /// Base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Driver calls so far, e.g. `"click:#site-nav > li > a"`
    #[must_use]
    pub fn calls(&self) -> &[String] {
        &self.calls
    }

    /// Check if a driver method was called
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.calls.iter().any(|c| c.starts_with(method))
    }

    fn has_fault(&self, fault: Fault) -> bool {
        self.faults.contains(&fault)
    }

    fn absolute(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            path.to_string()
        }
    }

    fn go(&mut self, path: &str) {
        let mut target = if path.is_empty() { "/" } else { path }.to_string();
        if render::requires_login(&target) && self.logged_in.is_none() {
            target = format!("{APP_ROOT}users/login?to={target}");
        }
        tracing::trace!(path = %target, "mock navigation");
        if let Some(previous) = self.path.replace(target) {
            self.history.push(previous);
        }
        self.generation += 1;
        self.ui = UiState::default();
    }

    fn handle_id(&self, selector: &str, index: usize) -> String {
        format!("{}:{index}:{selector}", self.generation)
    }

    fn resolve(&self, handle: &ElementHandle) -> ProbeResult<Node> {
        let stale = || ProbeError::StaleElement {
            id: handle.id.clone(),
        };
        let generation = handle
            .id
            .split_once(':')
            .and_then(|(g, _)| g.parse::<u64>().ok())
            .ok_or_else(stale)?;
        if generation != self.generation {
            return Err(stale());
        }
        self.render()
            .nth(&handle.selector, handle.index)
            .cloned()
            .ok_or_else(stale)
    }

    fn perform(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Go(path) => self.go(&path),
            Action::Toggle(section) => {
                if !self.ui.expanded.remove(section) {
                    let _ = self.ui.expanded.insert(section);
                }
            }
            Action::ViewerOpen(index) => {
                self.ui.viewer = Some((index, render::preview_count(self)));
            }
            Action::ViewerNext => {
                if let Some((i, n)) = self.ui.viewer {
                    self.ui.viewer = Some(((i + 1).min(n.saturating_sub(1)), n));
                }
            }
            Action::ViewerPrev => {
                if let Some((i, n)) = self.ui.viewer {
                    self.ui.viewer = Some((i.saturating_sub(1), n));
                }
            }
            Action::ViewerClose => self.ui.viewer = None,
            Action::Login => self.submit_login(),
            Action::Logout => {
                self.logged_in = None;
                self.go(APP_ROOT);
            }
            Action::Check(_) => {
                let current = self.effective_hide_email();
                self.ui.hide_email = Some(!current);
            }
            Action::SubmitProfile => self.submit_profile(),
        }
    }

    fn form_value(&self, selector: &str) -> Option<&str> {
        self.ui.form.get(selector).map(String::as_str)
    }

    fn submit_login(&mut self) {
        let email = self.form_value(crate::selectors::LOGIN_EMAIL).unwrap_or_default();
        let password = self
            .form_value(crate::selectors::LOGIN_PASSWORD)
            .unwrap_or_default();
        let found = self.accounts.iter().position(|a| {
            a.credentials.email == email && a.credentials.password == password
        });
        match found {
            Some(index) => {
                self.logged_in = Some(index);
                let to = self
                    .path
                    .as_deref()
                    .and_then(|p| crate::model::query_param(p, "to"))
                    .unwrap_or(APP_ROOT)
                    .to_string();
                self.go(&to);
            }
            None => {
                self.ui.error = Some("Please enter a correct username and password.".into());
            }
        }
    }

    fn effective_hide_email(&self) -> bool {
        self.ui.hide_email.unwrap_or_else(|| {
            self.logged_in
                .and_then(|i| self.accounts.get(i))
                .is_some_and(|a| a.profile.hide_email)
        })
    }

    fn submit_profile(&mut self) {
        let Some(index) = self.logged_in else {
            return;
        };
        let hide_email = self.effective_hide_email();
        let form = std::mem::take(&mut self.ui.form);
        let profile = &mut self.accounts[index].profile;
        for (selector, value) in form {
            match selector.as_str() {
                crate::selectors::EDIT_DISPLAY_NAME => profile.display_name = value,
                crate::selectors::EDIT_LOCATION => profile.location = value,
                crate::selectors::EDIT_OCCUPATION => profile.occupation = value,
                crate::selectors::EDIT_HOMEPAGE => profile.homepage = value,
                _ => {}
            }
        }
        profile.hide_email = hide_email;
        let here = self.path.clone().unwrap_or_else(|| APP_ROOT.to_string());
        self.go(&here);
        self.ui.success = Some("Profile Updated".into());
    }
}

impl Driver for MockSite {
    fn navigate(&mut self, url: &str) -> ProbeResult<()> {
        self.calls.push(format!("navigate:{url}"));
        let path = url
            .strip_prefix(self.base_url.as_str())
            .ok_or_else(|| ProbeError::NavigationError {
                url: url.to_string(),
                message: format!("mock site only serves {}", self.base_url),
            })?
            .to_string();
        self.go(&path);
        Ok(())
    }

    fn current_url(&mut self) -> ProbeResult<String> {
        Ok(self
            .path
            .as_deref()
            .map_or_else(|| "about:blank".to_string(), |p| self.absolute(p)))
    }

    fn title(&mut self) -> ProbeResult<String> {
        Ok(self.render().title)
    }

    fn find_all(&mut self, css: &str) -> ProbeResult<Vec<ElementHandle>> {
        let count = self.render().matches(css).len();
        Ok((0..count)
            .map(|i| ElementHandle::new(self.handle_id(css, i), css, i))
            .collect())
    }

    fn click(&mut self, element: &ElementHandle) -> ProbeResult<()> {
        self.calls.push(format!("click:{}", element.selector));
        let node = self.resolve(element)?;
        if !node.visible {
            return Err(ProbeError::DriverError {
                message: format!("element not interactable: {}", element.selector),
            });
        }
        self.perform(node.action);
        Ok(())
    }

    fn hover(&mut self, element: &ElementHandle) -> ProbeResult<()> {
        self.calls.push(format!("hover:{}", element.selector));
        let _ = self.resolve(element)?;
        self.ui.hovered = Some(element.selector.clone());
        Ok(())
    }

    fn fill(&mut self, element: &ElementHandle, text: &str) -> ProbeResult<()> {
        self.calls.push(format!("fill:{}", element.selector));
        let node = self.resolve(element)?;
        if node.tag != "input" {
            return Err(ProbeError::DriverError {
                message: format!("cannot type into <{}>", node.tag),
            });
        }
        let _ = self
            .ui
            .form
            .insert(element.selector.clone(), text.to_string());
        Ok(())
    }

    fn text(&mut self, element: &ElementHandle) -> ProbeResult<String> {
        let node = self.resolve(element)?;
        // Hidden elements report no text, as WebDriver does.
        Ok(if node.visible {
            node.text.trim().to_string()
        } else {
            String::new()
        })
    }

    fn attribute(&mut self, element: &ElementHandle, name: &str) -> ProbeResult<Option<String>> {
        let node = self.resolve(element)?;
        Ok(match name {
            "value" if node.tag == "input" => Some(
                self.form_value(&element.selector)
                    .map(str::to_string)
                    .or_else(|| node.get_attr("value").map(str::to_string))
                    .unwrap_or_default(),
            ),
            "checked" => node.get_attr("checked").map(|_| "true".to_string()),
            "href" | "src" => node.get_attr(name).map(|v| self.absolute(v)),
            _ => node.get_attr(name).map(str::to_string),
        })
    }

    fn is_visible(&mut self, element: &ElementHandle) -> ProbeResult<bool> {
        Ok(self.resolve(element)?.visible)
    }

    fn go_back(&mut self) -> ProbeResult<()> {
        self.calls.push("go_back".to_string());
        if let Some(previous) = self.history.pop() {
            self.path = Some(previous);
            self.generation += 1;
            self.ui = UiState::default();
        }
        Ok(())
    }

    fn close(&mut self) -> ProbeResult<()> {
        self.calls.push("close".to_string());
        Ok(())
    }
}
