//! Login, profile editor and public profile pages.

use super::{page_object, Home, PageObject, Session};
use crate::config::Credentials;
use crate::driver::Driver;
use crate::result::{ProbeError, ProbeResult};
use crate::selectors as sel;

/// Login form
#[derive(Debug)]
pub struct Login<'s, D> {
    session: &'s mut Session<D>,
}

page_object!(Login, "Login", ["users/login"], sel::LOGIN_SUBMIT);

impl<'s, D: Driver> Login<'s, D> {
    /// Log in and land on the home page
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::AssertionFailed`] if the site rejects the
    /// credentials
    pub fn login(self, credentials: &Credentials) -> ProbeResult<Home<'s, D>> {
        self.login_to(credentials)
    }

    /// Log in and land on `P`, the page that asked for the login
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::AssertionFailed`] if the site rejects the
    /// credentials, or [`ProbeError::UnexpectedPage`] if it redirects
    /// somewhere other than `P`
    pub fn login_to<P: PageObject<'s, D>>(self, credentials: &Credentials) -> ProbeResult<P> {
        tracing::info!(email = %credentials.email, "log in");
        self.session.fill(sel::LOGIN_EMAIL, &credentials.email)?;
        self.session.fill(sel::LOGIN_PASSWORD, &credentials.password)?;
        let submit = self.session.locator(sel::LOGIN_SUBMIT);
        self.session.click(&submit)?;

        self.session.wait_until("login to complete", |s| {
            let url = s.current_url()?;
            Ok(!Self::matches_url(s, &url) || s.is_present(sel::NOTICE_ERROR)?)
        })?;
        if self.session.is_present(sel::NOTICE_ERROR)? {
            let notice = self.session.text(sel::NOTICE_ERROR)?;
            let url = self.session.current_url()?;
            return Err(ProbeError::assertion(
                format!("log in as {}", credentials.email),
                "logged in",
                notice,
                url,
            ));
        }
        P::attach(self.session)
    }
}

/// Profile editor of the logged-in user
#[derive(Debug)]
pub struct UserEdit<'s, D> {
    session: &'s mut Session<D>,
}

page_object!(UserEdit, "UserEdit", ["users/edit"], sel::EDIT_SUBMIT);

impl<'s, D: Driver> UserEdit<'s, D> {
    /// Open the editor directly; asks for a login first if needed
    ///
    /// # Errors
    ///
    /// Returns error if the page does not load
    pub fn open(session: &'s mut Session<D>, credentials: &Credentials) -> ProbeResult<Self> {
        session.goto("users/edit")?;
        let url = session.current_url()?;
        if Login::matches_url(session, &url) {
            Login::attach(session)?.login_to(credentials)
        } else {
            Self::attach(session)
        }
    }

    fn value(&mut self, css: &str) -> ProbeResult<String> {
        Ok(self.session.attribute(css, "value")?.unwrap_or_default())
    }

    /// Display name field
    ///
    /// # Errors
    ///
    /// Returns error if the field is missing
    pub fn display_name(&mut self) -> ProbeResult<String> {
        self.value(sel::EDIT_DISPLAY_NAME)
    }

    /// Location field
    ///
    /// # Errors
    ///
    /// Returns error if the field is missing
    pub fn location(&mut self) -> ProbeResult<String> {
        self.value(sel::EDIT_LOCATION)
    }

    /// Occupation field
    ///
    /// # Errors
    ///
    /// Returns error if the field is missing
    pub fn occupation(&mut self) -> ProbeResult<String> {
        self.value(sel::EDIT_OCCUPATION)
    }

    /// Homepage field
    ///
    /// # Errors
    ///
    /// Returns error if the field is missing
    pub fn homepage(&mut self) -> ProbeResult<String> {
        self.value(sel::EDIT_HOMEPAGE)
    }

    /// Replace the display name
    ///
    /// # Errors
    ///
    /// Returns error if the field is missing
    pub fn set_display_name(&mut self, value: &str) -> ProbeResult<()> {
        self.session.fill(sel::EDIT_DISPLAY_NAME, value)
    }

    /// Replace the location
    ///
    /// # Errors
    ///
    /// Returns error if the field is missing
    pub fn set_location(&mut self, value: &str) -> ProbeResult<()> {
        self.session.fill(sel::EDIT_LOCATION, value)
    }

    /// Replace the occupation
    ///
    /// # Errors
    ///
    /// Returns error if the field is missing
    pub fn set_occupation(&mut self, value: &str) -> ProbeResult<()> {
        self.session.fill(sel::EDIT_OCCUPATION, value)
    }

    /// Replace the homepage
    ///
    /// # Errors
    ///
    /// Returns error if the field is missing
    pub fn set_homepage(&mut self, value: &str) -> ProbeResult<()> {
        self.session.fill(sel::EDIT_HOMEPAGE, value)
    }

    /// Whether "hide email address" is checked
    ///
    /// # Errors
    ///
    /// Returns error if the checkbox is missing
    pub fn is_email_hidden(&mut self) -> ProbeResult<bool> {
        Ok(self
            .session
            .attribute(sel::EDIT_HIDE_EMAIL, "checked")?
            .is_some_and(|v| v != "false"))
    }

    /// Check or uncheck "hide email address"
    ///
    /// # Errors
    ///
    /// Returns error if the checkbox does not change
    pub fn set_email_hidden(&mut self, hidden: bool) -> ProbeResult<()> {
        if self.is_email_hidden()? == hidden {
            return Ok(());
        }
        let checkbox = self.session.locator(sel::EDIT_HIDE_EMAIL);
        self.session.click(&checkbox)?;
        self.session.wait_until("email visibility checkbox", |s| {
            let checked = s
                .attribute(sel::EDIT_HIDE_EMAIL, "checked")?
                .is_some_and(|v| v != "false");
            Ok(checked == hidden)
        })
    }

    /// Submit the form; returns the confirmation notice
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Timeout`] if no confirmation appears
    pub fn update(&mut self) -> ProbeResult<String> {
        let submit = self.session.locator(sel::EDIT_SUBMIT);
        self.session.click(&submit)?;
        self.session
            .wait_until("profile update notice", |s| s.is_present(sel::NOTICE_SUCCESS))?;
        let notice = self.session.text(sel::NOTICE_SUCCESS)?;
        tracing::info!(%notice, "profile updated");
        Ok(notice)
    }
}

/// Public profile of a user
#[derive(Debug)]
pub struct UserProfile<'s, D> {
    session: &'s mut Session<D>,
}

page_object!(UserProfile, "UserProfile", ["user/:id"], sel::PROFILE_NAME);

impl<D: Driver> UserProfile<'_, D> {
    /// Display name
    ///
    /// # Errors
    ///
    /// Returns error if the name is missing
    pub fn name(&mut self) -> ProbeResult<String> {
        self.session.text(sel::PROFILE_NAME)
    }

    /// Whether the email address is shown
    ///
    /// # Errors
    ///
    /// Returns error if the driver fails
    pub fn is_email_visible(&mut self) -> ProbeResult<bool> {
        self.session.is_visible(sel::PROFILE_EMAIL)
    }

    /// Email address, when shown
    ///
    /// # Errors
    ///
    /// Returns error if the driver fails
    pub fn email(&mut self) -> ProbeResult<Option<String>> {
        Ok(self.session.texts(sel::PROFILE_EMAIL)?.into_iter().next())
    }

    /// Location, when set
    ///
    /// # Errors
    ///
    /// Returns error if the driver fails
    pub fn location(&mut self) -> ProbeResult<Option<String>> {
        Ok(self.session.texts(sel::PROFILE_LOCATION)?.into_iter().next())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::pages::tests::mock_session;
    use crate::site::MockSite;

    fn user() -> Credentials {
        Credentials::new("reviewer@example.test", "hunter22")
    }

    fn site() -> MockSite {
        MockSite::builder().account(user()).build()
    }

    mod login_tests {
        use super::*;

        #[test]
        fn test_login_lands_on_home() {
            let mut session = mock_session(site());
            let mut page = session.home().unwrap();
            let mut home = page.header().login(&user()).unwrap();
            assert!(home.header().is_logged_in().unwrap());
            assert_eq!(home.header().user_name().unwrap(), "reviewer");
        }

        #[test]
        fn test_rejected_login_is_reported() {
            let mut session = mock_session(site());
            let mut home = session.home().unwrap();
            let login = home.header().click_login().unwrap();
            let wrong = Credentials::new("reviewer@example.test", "nope");
            let err = login.login(&wrong).unwrap_err();
            match err {
                ProbeError::AssertionFailed { actual, .. } => {
                    assert!(actual.contains("correct username and password"));
                }
                other => panic!("unexpected error: {other}"),
            }
        }

        #[test]
        fn test_protected_page_redirects_back_after_login() {
            let mut session = mock_session(site());
            let mut edit = UserEdit::open(&mut session, &user()).unwrap();
            assert_eq!(edit.display_name().unwrap(), "reviewer");
            assert!(edit.current_url().unwrap().ends_with("/users/edit"));
        }
    }

    mod profile_tests {
        use super::*;

        #[test]
        fn test_edit_then_view_profile() {
            let mut session = mock_session(site());
            let mut edit = UserEdit::open(&mut session, &user()).unwrap();
            edit.set_display_name("Night Owl").unwrap();
            edit.set_location("Lisbon").unwrap();
            assert_eq!(edit.update().unwrap(), "Profile Updated");
            assert_eq!(edit.display_name().unwrap(), "Night Owl");
            assert_eq!(edit.location().unwrap(), "Lisbon");

            let mut profile = edit.header().click_view_profile().unwrap();
            assert_eq!(profile.name().unwrap(), "Night Owl");
            assert_eq!(profile.location().unwrap().as_deref(), Some("Lisbon"));
        }

        #[test]
        fn test_email_visibility_follows_checkbox() {
            let mut session = mock_session(site());
            let mut edit = UserEdit::open(&mut session, &user()).unwrap();
            assert!(edit.is_email_hidden().unwrap());
            edit.set_email_hidden(false).unwrap();
            assert!(!edit.is_email_hidden().unwrap());
            let _ = edit.update().unwrap();
            assert!(!edit.is_email_hidden().unwrap());

            let mut profile = edit.header().click_view_profile().unwrap();
            assert!(profile.is_email_visible().unwrap());
            assert_eq!(
                profile.email().unwrap().as_deref(),
                Some("reviewer@example.test")
            );
        }

        #[test]
        fn test_hidden_email_stays_off_profile() {
            let mut session = mock_session(site());
            let mut edit = UserEdit::open(&mut session, &user()).unwrap();
            let mut profile = edit.header().click_view_profile().unwrap();
            assert!(!profile.is_email_visible().unwrap());
            assert_eq!(profile.email().unwrap(), None);
        }
    }
}
