//! Site header: navigation menus, other-applications dropdown, account menu.

use super::{ExtensionsListing, Home, Login, PageObject, Session, ThemeListing, UserEdit, UserProfile};
use crate::config::Credentials;
use crate::driver::Driver;
use crate::result::ProbeResult;
use crate::selectors as sel;

/// Header region of any page
#[derive(Debug)]
pub struct Header<'a, D> {
    session: &'a mut Session<D>,
}

impl<'a, D: Driver> Header<'a, D> {
    pub(crate) fn new(session: &'a mut Session<D>) -> Self {
        Self { session }
    }

    /// Names of the top-level navigation menus
    ///
    /// # Errors
    ///
    /// Returns error if the driver fails
    pub fn site_navigation_menus(&mut self) -> ProbeResult<Vec<String>> {
        self.session.texts(sel::SITE_NAV_MENUS)
    }

    fn follow_menu(&mut self, name: &str) -> ProbeResult<()> {
        let menu = self.session.locator(sel::SITE_NAV_MENUS).with_text(name);
        let _ = self.session.follow(&menu)?;
        Ok(())
    }

    /// Open the extensions listing from the navigation menu
    ///
    /// # Errors
    ///
    /// Returns error if the menu is missing or the listing does not load
    pub fn click_extensions(mut self) -> ProbeResult<ExtensionsListing<'a, D>> {
        self.follow_menu("Extensions")?;
        ExtensionsListing::attach(self.session)
    }

    /// Open the complete-themes listing from the navigation menu
    ///
    /// # Errors
    ///
    /// Returns error if the menu is missing or the listing does not load
    pub fn click_complete_themes(mut self) -> ProbeResult<ThemeListing<'a, D>> {
        self.follow_menu("Complete Themes")?;
        ThemeListing::attach(self.session)
    }

    /// Follow the logo home
    ///
    /// # Errors
    ///
    /// Returns error if the home page does not load
    pub fn click_logo(self) -> ProbeResult<Home<'a, D>> {
        let logo = self.session.locator(sel::LOGO);
        let _ = self.session.follow(&logo)?;
        Home::attach(self.session)
    }

    /// Logo text and its `title` tooltip
    ///
    /// # Errors
    ///
    /// Returns error if the logo is missing
    pub fn logo(&mut self) -> ProbeResult<(String, Option<String>)> {
        let text = self.session.text(sel::LOGO)?;
        let title = self.session.attribute(sel::LOGO, "title")?;
        Ok((text, title))
    }

    /// Whether the search box and its button both show
    ///
    /// # Errors
    ///
    /// Returns error if the driver fails
    pub fn is_search_box_visible(&mut self) -> ProbeResult<bool> {
        Ok(self.session.is_visible(sel::SEARCH_INPUT)?
            && self.session.is_visible(sel::SEARCH_BUTTON)?)
    }

    /// Placeholder of the search field
    ///
    /// # Errors
    ///
    /// Returns error if the driver fails
    pub fn search_placeholder(&mut self) -> ProbeResult<Option<String>> {
        self.session.attribute(sel::SEARCH_INPUT, "placeholder")
    }

    /// Tooltip of the other-applications menu
    ///
    /// # Errors
    ///
    /// Returns error if the menu is missing
    pub fn other_applications_tooltip(&mut self) -> ProbeResult<Option<String>> {
        self.session.attribute(sel::OTHER_APPS, "title")
    }

    /// Hover the other-applications menu until its dropdown shows
    ///
    /// # Errors
    ///
    /// Returns error if the dropdown never becomes visible
    pub fn hover_other_apps(&mut self) -> ProbeResult<()> {
        self.session.hover(sel::OTHER_APPS)?;
        let dropdown = self.session.locator(sel::OTHER_APPS_DROPDOWN);
        let _ = dropdown.wait_visible(self.session.driver())?;
        Ok(())
    }

    /// Whether the other-applications dropdown is showing
    ///
    /// # Errors
    ///
    /// Returns error if the driver fails
    pub fn is_other_apps_dropdown_visible(&mut self) -> ProbeResult<bool> {
        self.session.is_visible(sel::OTHER_APPS_DROPDOWN)
    }

    /// Applications listed in the dropdown (empty while it is closed)
    ///
    /// # Errors
    ///
    /// Returns error if the driver fails
    pub fn other_applications(&mut self) -> ProbeResult<Vec<String>> {
        Ok(self
            .session
            .texts(sel::OTHER_APPS_LINKS)?
            .into_iter()
            .filter(|t| !t.is_empty())
            .collect())
    }

    /// Whether the "Log in" link shows
    ///
    /// # Errors
    ///
    /// Returns error if the driver fails
    pub fn is_login_link_visible(&mut self) -> ProbeResult<bool> {
        self.session.is_visible(sel::LOGIN_LINK)
    }

    /// Whether the "Register" link shows
    ///
    /// # Errors
    ///
    /// Returns error if the driver fails
    pub fn is_register_link_visible(&mut self) -> ProbeResult<bool> {
        self.session.is_visible(sel::REGISTER_LINK)
    }

    /// Whether a user is logged in
    ///
    /// # Errors
    ///
    /// Returns error if the driver fails
    pub fn is_logged_in(&mut self) -> ProbeResult<bool> {
        self.session.is_present(sel::ACCOUNT_USER)
    }

    /// Display name of the logged-in user
    ///
    /// # Errors
    ///
    /// Returns error if nobody is logged in
    pub fn user_name(&mut self) -> ProbeResult<String> {
        self.session.text(sel::ACCOUNT_USER)
    }

    /// Log in through the header link
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::AssertionFailed`](crate::ProbeError) if the site
    /// rejects the credentials
    pub fn login(self, credentials: &Credentials) -> ProbeResult<Home<'a, D>> {
        self.click_login()?.login(credentials)
    }

    /// Open the login page
    ///
    /// # Errors
    ///
    /// Returns error if the login page does not load
    pub fn click_login(self) -> ProbeResult<Login<'a, D>> {
        let link = self.session.locator(sel::LOGIN_LINK);
        let _ = self.session.follow(&link)?;
        Login::attach(self.session)
    }

    fn open_account_menu(&mut self) -> ProbeResult<()> {
        self.session.hover(sel::ACCOUNT_USER)?;
        let menu = self.session.locator(sel::ACCOUNT_MENU);
        let _ = menu.wait_visible(self.session.driver())?;
        Ok(())
    }

    /// Log out from the account menu
    ///
    /// # Errors
    ///
    /// Returns error if nobody is logged in or the home page does not load
    pub fn logout(mut self) -> ProbeResult<Home<'a, D>> {
        self.open_account_menu()?;
        let link = self.session.locator(sel::LOGOUT_LINK);
        self.session.click(&link)?;
        self.session
            .wait_until("logout", |s| s.is_present(sel::LOGIN_LINK))?;
        Home::attach(self.session)
    }

    /// Open the profile editor from the account menu
    ///
    /// # Errors
    ///
    /// Returns error if nobody is logged in
    pub fn click_edit_profile(mut self) -> ProbeResult<UserEdit<'a, D>> {
        self.open_account_menu()?;
        let link = self.session.locator(sel::EDIT_PROFILE_LINK);
        let _ = self.session.follow(&link)?;
        UserEdit::attach(self.session)
    }

    /// Open the public profile from the account menu
    ///
    /// # Errors
    ///
    /// Returns error if nobody is logged in
    pub fn click_view_profile(mut self) -> ProbeResult<UserProfile<'a, D>> {
        self.open_account_menu()?;
        let link = self.session.locator(sel::VIEW_PROFILE_LINK);
        let _ = self.session.follow(&link)?;
        UserProfile::attach(self.session)
    }
}
