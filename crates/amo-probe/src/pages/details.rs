//! Add-on detail page.

use super::{page_object, ImageViewer, PageObject, Session, UserProfile};
use crate::driver::Driver;
use crate::result::ProbeResult;
use crate::selectors as sel;

/// Detail page of one add-on
#[derive(Debug)]
pub struct Details<'s, D> {
    session: &'s mut Session<D>,
}

page_object!(Details, "Details", ["addon/:slug"], sel::ADDON_NAME);

impl<'s, D: Driver> Details<'s, D> {
    /// Navigate straight to an add-on by slug
    ///
    /// # Errors
    ///
    /// Returns error if the page does not load
    pub fn open(session: &'s mut Session<D>, slug: &str) -> ProbeResult<Self> {
        session.goto(&format!("addon/{slug}/"))?;
        Self::attach(session)
    }

    /// Add-on name
    ///
    /// # Errors
    ///
    /// Returns error if the name is missing
    pub fn name(&mut self) -> ProbeResult<String> {
        self.session.text(sel::ADDON_NAME)
    }

    /// Version shown next to the name
    ///
    /// # Errors
    ///
    /// Returns error if the version is missing
    pub fn version(&mut self) -> ProbeResult<String> {
        self.session.text(sel::ADDON_VERSION)
    }

    /// Name and version, as the page heading shows them
    ///
    /// # Errors
    ///
    /// Returns error if either part is missing
    pub fn addon_title(&mut self) -> ProbeResult<String> {
        Ok(format!("{} {}", self.name()?, self.version()?))
    }

    /// Short summary
    ///
    /// # Errors
    ///
    /// Returns error if the summary is missing
    pub fn summary(&mut self) -> ProbeResult<String> {
        self.session.text(sel::ADDON_SUMMARY)
    }

    /// "About this Add-on" heading
    ///
    /// # Errors
    ///
    /// Returns error if the section is missing
    pub fn about_heading(&mut self) -> ProbeResult<String> {
        self.session.text(sel::ABOUT_ADDON)
    }

    /// Full description
    ///
    /// # Errors
    ///
    /// Returns error if the description is missing
    pub fn description(&mut self) -> ProbeResult<String> {
        self.session.text(sel::ADDON_DESCRIPTION)
    }

    /// Whether the version information section is expanded
    ///
    /// # Errors
    ///
    /// Returns error if the driver fails
    pub fn is_version_info_expanded(&mut self) -> ProbeResult<bool> {
        self.session.is_visible(sel::RELNOTES_VERSION)
    }

    /// Expand or collapse the version information; returns the new state
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Timeout`](crate::ProbeError) if the section
    /// does not change
    pub fn toggle_version_info(&mut self) -> ProbeResult<bool> {
        let before = self.is_version_info_expanded()?;
        let toggle = self.session.locator(sel::RELNOTES_TOGGLE);
        self.session.click(&toggle)?;
        self.session.wait_until("version information to toggle", |s| {
            Ok(s.is_visible(sel::RELNOTES_VERSION)? != before)
        })?;
        Ok(!before)
    }

    /// Version line inside the expanded version information
    ///
    /// # Errors
    ///
    /// Returns error if the section is missing
    pub fn version_info(&mut self) -> ProbeResult<String> {
        self.session.text(sel::RELNOTES_VERSION)
    }

    /// Tags
    ///
    /// # Errors
    ///
    /// Returns error if the driver fails
    pub fn tags(&mut self) -> ProbeResult<Vec<String>> {
        self.session.texts(sel::TAGS)
    }

    /// Number of reviews shown
    ///
    /// # Errors
    ///
    /// Returns error if the driver fails
    pub fn review_count(&mut self) -> ProbeResult<usize> {
        self.session.count(sel::REVIEWS)
    }

    /// Reviewer names, one per review
    ///
    /// # Errors
    ///
    /// Returns error if the driver fails
    pub fn reviewers(&mut self) -> ProbeResult<Vec<String>> {
        self.session.texts(sel::REVIEW_USERS)
    }

    /// Open the profile of the `n`-th reviewer (0-based)
    ///
    /// # Errors
    ///
    /// Returns error if there is no such review or the profile does not load
    pub fn click_reviewer(self, n: usize) -> ProbeResult<UserProfile<'s, D>> {
        let users = self.session.locator(sel::REVIEW_USERS);
        let _ = self.session.follow_nth(&users, n)?;
        UserProfile::attach(self.session)
    }

    /// Heading of the other-add-ons section, if shown
    ///
    /// # Errors
    ///
    /// Returns error if the driver fails
    pub fn other_addons_label(&mut self) -> ProbeResult<Option<String>> {
        Ok(self
            .session
            .texts(sel::OTHER_ADDONS_LABEL)?
            .into_iter()
            .next())
    }

    /// Names of other add-ons by the same author(s)
    ///
    /// # Errors
    ///
    /// Returns error if the driver fails
    pub fn other_addons(&mut self) -> ProbeResult<Vec<String>> {
        self.session.texts(sel::OTHER_ADDONS)
    }

    /// Open the `n`-th other add-on (0-based)
    ///
    /// # Errors
    ///
    /// Returns error if there is no such add-on
    pub fn click_other_addon(self, n: usize) -> ProbeResult<Self> {
        let others = self.session.locator(sel::OTHER_ADDONS);
        let _ = self.session.follow_nth(&others, n)?;
        Self::attach(self.session)
    }

    /// Follow the `n`-th breadcrumb link (0-based), landing on a `P`
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::UnexpectedPage`](crate::ProbeError) if the crumb
    /// leads somewhere other than `P`
    pub fn click_breadcrumb<P: PageObject<'s, D>>(self, n: usize) -> ProbeResult<P> {
        let links = self.session.locator(sel::BREADCRUMB_LINKS);
        let _ = self.session.follow_nth(&links, n)?;
        P::attach(self.session)
    }

    /// Number of preview images
    ///
    /// # Errors
    ///
    /// Returns error if the driver fails
    pub fn preview_count(&mut self) -> ProbeResult<usize> {
        self.session.count(sel::PREVIEWS)
    }

    /// Preview lightbox
    pub fn image_viewer(&mut self) -> ImageViewer<'_, D> {
        ImageViewer::new(self.session)
    }
}
