//! Application home page.

use super::{page_object, CategoryRegion, Details, ExtensionsListing, PageObject, Session, ThemeListing};
use crate::driver::Driver;
use crate::model::{parse_count, ExploreFilter};
use crate::result::ProbeResult;
use crate::selectors as sel;

/// Home page of the application
#[derive(Debug)]
pub struct Home<'s, D> {
    session: &'s mut Session<D>,
}

page_object!(Home, "Home", [""], sel::PROMOS);

impl<'s, D: Driver> Home<'s, D> {
    /// Navigate to the home page
    ///
    /// # Errors
    ///
    /// Returns error if the page does not load
    pub fn open(session: &'s mut Session<D>) -> ProbeResult<Self> {
        session.goto("/")?;
        Self::attach(session)
    }

    /// Whether the promo box is rendered
    ///
    /// # Errors
    ///
    /// Returns error if the driver fails
    pub fn is_promo_box_present(&mut self) -> ProbeResult<bool> {
        self.session.is_present(sel::PROMOS)
    }

    /// Names in the most-popular list, in display order
    ///
    /// # Errors
    ///
    /// Returns error if the driver fails
    pub fn most_popular_names(&mut self) -> ProbeResult<Vec<String>> {
        self.session.texts(sel::POPULAR_NAMES)
    }

    /// User counts in the most-popular list, in display order
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::ParseError`](crate::ProbeError) on malformed counts
    pub fn most_popular_user_counts(&mut self) -> ProbeResult<Vec<u64>> {
        self.session
            .texts(sel::POPULAR_USERS)?
            .iter()
            .map(|t| parse_count(t))
            .collect()
    }

    /// Featured extension names
    ///
    /// # Errors
    ///
    /// Returns error if the driver fails
    pub fn featured_extensions(&mut self) -> ProbeResult<Vec<String>> {
        self.session.texts(sel::FEATURED_EXTENSIONS)
    }

    /// Featured theme names
    ///
    /// # Errors
    ///
    /// Returns error if the driver fails
    pub fn featured_themes(&mut self) -> ProbeResult<Vec<String>> {
        self.session.texts(sel::FEATURED_THEMES)
    }

    /// Featured collection names
    ///
    /// # Errors
    ///
    /// Returns error if the driver fails
    pub fn featured_collections(&mut self) -> ProbeResult<Vec<String>> {
        self.session.texts(sel::FEATURED_COLLECTIONS)
    }

    /// Number of up-and-coming entries
    ///
    /// # Errors
    ///
    /// Returns error if the driver fails
    pub fn up_and_coming_count(&mut self) -> ProbeResult<usize> {
        self.session.count(sel::UP_AND_COMING)
    }

    /// Explore filter labels in the side navigation
    ///
    /// # Errors
    ///
    /// Returns error if the driver fails
    pub fn explore_filters(&mut self) -> ProbeResult<Vec<String>> {
        self.session.texts(sel::EXPLORE_LINKS)
    }

    /// Open the first featured extension
    ///
    /// # Errors
    ///
    /// Returns error if there is none or its page does not load
    pub fn click_on_first_addon(self) -> ProbeResult<Details<'s, D>> {
        let first = self.session.locator(sel::FEATURED_EXTENSIONS);
        let _ = self.session.follow(&first)?;
        Details::attach(self.session)
    }

    /// Open the `n`-th featured theme (0-based)
    ///
    /// # Errors
    ///
    /// Returns error if there is no such theme
    pub fn click_featured_theme(self, n: usize) -> ProbeResult<Details<'s, D>> {
        let themes = self.session.locator(sel::FEATURED_THEMES);
        let _ = self.session.follow_nth(&themes, n)?;
        Details::attach(self.session)
    }

    /// Follow an explore filter
    ///
    /// # Errors
    ///
    /// Returns error if the filter link is missing or the listing does not load
    pub fn click_to_explore(self, filter: ExploreFilter) -> ProbeResult<ExtensionsListing<'s, D>> {
        let link = self
            .session
            .locator(sel::EXPLORE_LINKS)
            .with_text(filter.label());
        let _ = self.session.follow(&link)?;
        ExtensionsListing::attach(self.session)
    }

    /// Follow the featured extensions "See all" link
    ///
    /// # Errors
    ///
    /// Returns error if the listing does not load
    pub fn click_featured_extensions_see_all(self) -> ProbeResult<ExtensionsListing<'s, D>> {
        let link = self.session.locator(sel::FEATURED_EXTENSIONS_SEE_ALL);
        let _ = self.session.follow(&link)?;
        ExtensionsListing::attach(self.session)
    }

    /// Follow the featured themes "See all" link
    ///
    /// # Errors
    ///
    /// Returns error if the listing does not load
    pub fn click_featured_themes_see_all(self) -> ProbeResult<ThemeListing<'s, D>> {
        let link = self.session.locator(sel::FEATURED_THEMES_SEE_ALL);
        let _ = self.session.follow(&link)?;
        ThemeListing::attach(self.session)
    }

    /// Category list in the side navigation
    pub fn category_region(self) -> CategoryRegion<'s, D> {
        CategoryRegion::new(self.session)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::model::{Direction, SortKey};
    use crate::pages::tests::mock_session;
    use crate::site::MockSite;
    use crate::verify::verify_order;

    #[test]
    fn test_most_popular_sorted_by_users() {
        let mut session = mock_session(MockSite::new());
        let mut home = session.home().unwrap();
        assert_eq!(home.most_popular_names().unwrap().len(), 10);
        let users = home.most_popular_user_counts().unwrap();
        verify_order(&users, Direction::Descending, "most popular users").unwrap();
    }

    #[test]
    fn test_sections_present() {
        let mut session = mock_session(MockSite::new());
        let mut home = session.home().unwrap();
        assert!(home.is_promo_box_present().unwrap());
        assert_eq!(home.featured_extensions().unwrap().len(), 6);
        assert_eq!(home.featured_themes().unwrap().len(), 6);
        assert_eq!(home.featured_collections().unwrap().len(), 4);
        assert_eq!(home.up_and_coming_count().unwrap(), 5);
        assert_eq!(
            home.explore_filters().unwrap(),
            vec!["Featured", "Most Popular", "Top Rated"]
        );
    }

    #[test]
    fn test_explore_lands_on_sorted_listing() {
        let mut session = mock_session(MockSite::new());
        let home = session.home().unwrap();
        let mut listing = home.click_to_explore(ExploreFilter::TopRated).unwrap();
        assert!(listing.current_url().unwrap().ends_with("sort=rating"));
        assert_eq!(listing.sorter().sorted_by().unwrap(), SortKey::TopRated.label());
    }

    #[test]
    fn test_first_addon_opens_details() {
        let mut session = mock_session(MockSite::new());
        let mut home = session.home().unwrap();
        let expected = home.featured_extensions().unwrap().remove(0);
        let mut details = home.click_on_first_addon().unwrap();
        assert_eq!(details.name().unwrap(), expected);
    }

    #[test]
    fn test_featured_theme_by_index() {
        let mut session = mock_session(MockSite::new());
        let mut home = session.home().unwrap();
        let expected = home.featured_themes().unwrap().remove(2);
        let mut details = home.click_featured_theme(2).unwrap();
        assert_eq!(details.name().unwrap(), expected);
    }
}
