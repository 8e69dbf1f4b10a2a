//! Category list in the side navigation.

use super::{ExtensionsListing, PageObject, Session};
use crate::driver::Driver;
use crate::result::ProbeResult;
use crate::selectors as sel;

/// Side-navigation category list of the home page
#[derive(Debug)]
pub struct CategoryRegion<'a, D> {
    session: &'a mut Session<D>,
}

impl<'a, D: Driver> CategoryRegion<'a, D> {
    pub(crate) fn new(session: &'a mut Session<D>) -> Self {
        Self { session }
    }

    /// Category names in display order
    ///
    /// # Errors
    ///
    /// Returns error if the driver fails
    pub fn names(&mut self) -> ProbeResult<Vec<String>> {
        self.session.texts(sel::SIDE_CATEGORIES)
    }

    /// Number of categories
    ///
    /// # Errors
    ///
    /// Returns error if the driver fails
    pub fn count(&mut self) -> ProbeResult<usize> {
        self.session.count(sel::SIDE_CATEGORIES)
    }

    /// Open the `n`-th category (0-based)
    ///
    /// # Errors
    ///
    /// Returns error if there is no such category or its listing does not load
    pub fn click(self, n: usize) -> ProbeResult<ExtensionsListing<'a, D>> {
        let categories = self.session.locator(sel::SIDE_CATEGORIES);
        let _ = self.session.follow_nth(&categories, n)?;
        ExtensionsListing::attach(self.session)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::pages::tests::mock_session;
    use crate::site::MockSite;

    #[test]
    fn test_category_click_lands_on_category_listing() {
        let mut session = mock_session(MockSite::new());
        let home = session.home().unwrap();
        let mut region = home.category_region();
        let names = region.names().unwrap();
        assert_eq!(region.count().unwrap(), names.len());

        let mut listing = region.click(2).unwrap();
        assert_eq!(listing.heading().unwrap(), names[2]);
        let trail: Vec<_> = listing
            .breadcrumbs()
            .unwrap()
            .into_iter()
            .map(|b| b.label)
            .collect();
        assert_eq!(trail, vec!["Add-ons for Firefox", "Extensions", names[2].as_str()]);
    }
}
