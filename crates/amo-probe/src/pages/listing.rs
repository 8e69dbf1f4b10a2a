//! Paginated add-on listings (extensions, complete themes, categories).

use super::{Details, PageObject, Paginator, Session, Sorter};
use crate::driver::Driver;
use crate::model::{parse_count, parse_date, parse_position, ItemSummary, ListingSnapshot, SortKey};
use crate::result::{ProbeError, ProbeResult};
use crate::selectors as sel;
use chrono::NaiveDate;
use std::marker::PhantomData;

/// Which listing a [`Listing`] shows
pub trait ListingKind {
    /// Page name in errors
    const NAME: &'static str;
    /// Path segment below the application root
    const SECTION: &'static str;
    /// Navigation label, also the second breadcrumb
    const LABEL: &'static str;
    /// Sort applied when the URL names none
    const DEFAULT_SORT: SortKey;
    /// Path of one category of this listing
    const CATEGORY_PATTERN: &'static str;
}

/// Extensions marker
#[derive(Debug, Clone, Copy)]
pub struct Extensions;

impl ListingKind for Extensions {
    const NAME: &'static str = "ExtensionsListing";
    const SECTION: &'static str = "extensions";
    const LABEL: &'static str = "Extensions";
    const DEFAULT_SORT: SortKey = SortKey::Featured;
    const CATEGORY_PATTERN: &'static str = "extensions/:category";
}

/// Complete themes marker
#[derive(Debug, Clone, Copy)]
pub struct CompleteThemes;

impl ListingKind for CompleteThemes {
    const NAME: &'static str = "ThemeListing";
    const SECTION: &'static str = "complete-themes";
    const LABEL: &'static str = "Complete Themes";
    const DEFAULT_SORT: SortKey = SortKey::MostUsers;
    const CATEGORY_PATTERN: &'static str = "complete-themes/:category";
}

/// A listing page, with or without a category
#[derive(Debug)]
pub struct Listing<'s, D, K> {
    session: &'s mut Session<D>,
    kind: PhantomData<K>,
}

/// Extensions listing
pub type ExtensionsListing<'s, D> = Listing<'s, D, Extensions>;

/// Complete themes listing
pub type ThemeListing<'s, D> = Listing<'s, D, CompleteThemes>;

impl<'s, D: Driver + 's, K: ListingKind> PageObject<'s, D> for Listing<'s, D, K> {
    const NAME: &'static str = K::NAME;
    const URL_PATTERNS: &'static [&'static str] = &[K::SECTION, K::CATEGORY_PATTERN];
    const LOADED: &'static str = sel::SORTER_SELECTED;

    fn from_session(session: &'s mut Session<D>) -> Self {
        Self {
            session,
            kind: PhantomData,
        }
    }

    fn session(&mut self) -> &mut Session<D> {
        self.session
    }

    fn into_session(self) -> &'s mut Session<D> {
        self.session
    }
}

impl<'s, D: Driver, K: ListingKind> Listing<'s, D, K> {
    /// Navigate straight to the listing
    ///
    /// # Errors
    ///
    /// Returns error if the page does not load
    pub fn open(session: &'s mut Session<D>) -> ProbeResult<Self> {
        session.goto(&format!("{}/", K::SECTION))?;
        Self::attach(session)
    }

    /// Page heading
    ///
    /// # Errors
    ///
    /// Returns error if the heading is missing
    pub fn heading(&mut self) -> ProbeResult<String> {
        self.session.text(sel::HEADING)
    }

    /// Rows as typed summaries
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::ParseError`] on malformed rows
    pub fn items(&mut self) -> ProbeResult<Vec<ItemSummary>> {
        read_items(self.session)
    }

    /// Rows plus position and active sort
    ///
    /// # Errors
    ///
    /// Returns error if a row or the sorter cannot be read
    pub fn snapshot(&mut self) -> ProbeResult<ListingSnapshot> {
        read_snapshot(self.session)
    }

    /// Number of rows on this page
    ///
    /// # Errors
    ///
    /// Returns error if the driver fails
    pub fn item_count(&mut self) -> ProbeResult<usize> {
        self.session.count(sel::ITEMS)
    }

    /// Names in display order
    ///
    /// # Errors
    ///
    /// Returns error if the driver fails
    pub fn names(&mut self) -> ProbeResult<Vec<String>> {
        self.session.texts(sel::ITEM_NAMES)
    }

    /// Name of the `n`-th row (0-based)
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::ElementNotFound`] if there is no such row
    pub fn item_name(&mut self, n: usize) -> ProbeResult<String> {
        let handle = self
            .session
            .locator(sel::ITEM_NAMES)
            .nth(self.session.driver(), n)?;
        self.session.driver().text(&handle)
    }

    /// Last-updated dates in display order
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::ParseError`] on malformed dates
    pub fn updated_dates(&mut self) -> ProbeResult<Vec<NaiveDate>> {
        read_dates(self.session, sel::ITEM_UPDATED)
    }

    /// Creation dates in display order
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::ParseError`] on malformed dates
    pub fn created_dates(&mut self) -> ProbeResult<Vec<NaiveDate>> {
        read_dates(self.session, sel::ITEM_CREATED)
    }

    /// Weekly downloads in display order
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::ParseError`] on malformed counts
    pub fn downloads(&mut self) -> ProbeResult<Vec<u64>> {
        read_counts(self.session, sel::ITEM_DOWNLOADS)
    }

    /// User counts in display order
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::ParseError`] on malformed counts
    pub fn users(&mut self) -> ProbeResult<Vec<u64>> {
        read_counts(self.session, sel::ITEM_USERS)
    }

    /// Text of the feed subscription link
    ///
    /// # Errors
    ///
    /// Returns error if the link is missing
    pub fn subscribe_link_text(&mut self) -> ProbeResult<String> {
        self.session.text(sel::SUBSCRIBE)
    }

    /// Categories in the side navigation
    ///
    /// # Errors
    ///
    /// Returns error if the driver fails
    pub fn categories(&mut self) -> ProbeResult<Vec<String>> {
        self.session.texts(sel::SIDE_CATEGORIES)
    }

    /// Selected explore filter in the side navigation, if any
    ///
    /// # Errors
    ///
    /// Returns error if the driver fails
    pub fn selected_explore_filter(&mut self) -> ProbeResult<Option<String>> {
        Ok(self
            .session
            .texts(sel::SIDE_EXPLORE_SELECTED)?
            .into_iter()
            .next())
    }

    /// Whether the paginator is rendered
    ///
    /// # Errors
    ///
    /// Returns error if the driver fails
    pub fn is_paginator_present(&mut self) -> ProbeResult<bool> {
        self.session.is_present(sel::PAGINATOR)
    }

    /// Sorter region
    pub fn sorter(&mut self) -> Sorter<'_, D> {
        Sorter::new(self.session)
    }

    /// Paginator region
    pub fn paginator(&mut self) -> Paginator<'_, D> {
        Paginator::new(self.session)
    }

    /// Open the detail page of the `n`-th row (0-based)
    ///
    /// # Errors
    ///
    /// Returns error if there is no such row or its page does not load
    pub fn click_addon(self, n: usize) -> ProbeResult<Details<'s, D>> {
        let names = self.session.locator(sel::ITEM_NAMES);
        let _ = self.session.follow_nth(&names, n)?;
        Details::attach(self.session)
    }

    /// Open the detail page of the first row
    ///
    /// # Errors
    ///
    /// Returns error if the listing is empty
    pub fn click_on_first_addon(self) -> ProbeResult<Details<'s, D>> {
        self.click_addon(0)
    }

    /// Open the `n`-th category of this listing (0-based)
    ///
    /// # Errors
    ///
    /// Returns error if there is no such category
    pub fn click_category(self, n: usize) -> ProbeResult<Self> {
        let categories = self.session.locator(sel::SIDE_CATEGORIES);
        let _ = self.session.follow_nth(&categories, n)?;
        Self::attach(self.session)
    }
}

fn read_counts<D: Driver>(session: &mut Session<D>, css: &str) -> ProbeResult<Vec<u64>> {
    session.texts(css)?.iter().map(|t| parse_count(t)).collect()
}

fn read_dates<D: Driver>(session: &mut Session<D>, css: &str) -> ProbeResult<Vec<NaiveDate>> {
    session.texts(css)?.iter().map(|t| parse_date(t)).collect()
}

fn read_items<D: Driver>(session: &mut Session<D>) -> ProbeResult<Vec<ItemSummary>> {
    let names = session.texts(sel::ITEM_NAMES)?;
    let updated = read_dates(session, sel::ITEM_UPDATED)?;
    let created = read_dates(session, sel::ITEM_CREATED)?;
    let downloads = read_counts(session, sel::ITEM_DOWNLOADS)?;
    let users = read_counts(session, sel::ITEM_USERS)?;

    let rows = names.len();
    if [updated.len(), created.len(), downloads.len(), users.len()]
        .iter()
        .any(|&n| n != rows)
    {
        let url = session.current_url()?;
        return Err(ProbeError::assertion(
            "every listing row shows name, dates, downloads and users",
            format!("{rows} of each"),
            format!(
                "{} updated, {} created, {} downloads, {} users",
                updated.len(),
                created.len(),
                downloads.len(),
                users.len()
            ),
            url,
        ));
    }

    Ok(names
        .into_iter()
        .zip(updated)
        .zip(created)
        .zip(downloads)
        .zip(users)
        .map(|((((name, updated), created), downloads), users)| ItemSummary {
            name,
            updated,
            created,
            downloads,
            users,
        })
        .collect())
}

/// Read the listing the browser is showing
pub(crate) fn read_snapshot<D: Driver>(session: &mut Session<D>) -> ProbeResult<ListingSnapshot> {
    let items = read_items(session)?;
    let (page, total_pages) = if session.is_present(sel::PAGINATOR_POSITION)? {
        parse_position(&session.text(sel::PAGINATOR_POSITION)?)?
    } else {
        (1, 1)
    };
    let sort = session
        .texts(sel::SORTER_SELECTED)?
        .first()
        .and_then(|label| label.parse::<SortKey>().ok());
    Ok(ListingSnapshot {
        items,
        page,
        total_pages,
        sort,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::pages::tests::mock_session;
    use crate::site::MockSite;

    #[test]
    fn test_listing_url_patterns() {
        let session = mock_session(MockSite::new());
        let url = |path: &str| session.config().url(path);
        assert!(ExtensionsListing::matches_url(&session, &url("extensions/?sort=users")));
        assert!(ExtensionsListing::matches_url(&session, &url("extensions/tabs/")));
        assert!(!ExtensionsListing::matches_url(&session, &url("complete-themes/")));
        assert!(!ExtensionsListing::matches_url(&session, &url("extensions/tabs/extra/")));
        assert!(ThemeListing::matches_url(&session, &url("complete-themes/nature/")));
        assert!(!ThemeListing::matches_url(&session, &url("addon/tab-helper/")));
    }

    #[test]
    fn test_open_default_listing() {
        let mut session = mock_session(MockSite::new());
        let mut listing = ExtensionsListing::open(&mut session).unwrap();
        assert_eq!(listing.heading().unwrap(), "Featured Extensions");
        assert_eq!(listing.item_count().unwrap(), 20);
        let snapshot = listing.snapshot().unwrap();
        assert_eq!(snapshot.items.len(), 20);
        assert_eq!((snapshot.page, snapshot.total_pages), (1, 3));
        assert_eq!(snapshot.sort, Some(SortKey::Featured));
        assert_eq!(listing.item_name(0).unwrap(), snapshot.items[0].name);
    }

    #[test]
    fn test_small_listing_has_single_page() {
        let mut session = mock_session(MockSite::builder().extensions(12).build());
        let mut listing = ExtensionsListing::open(&mut session).unwrap();
        assert!(!listing.is_paginator_present().unwrap());
        let snapshot = listing.snapshot().unwrap();
        assert_eq!((snapshot.page, snapshot.total_pages), (1, 1));
        assert!(snapshot.is_first() && snapshot.is_last());
    }

    #[test]
    fn test_theme_listing_defaults() {
        let mut session = mock_session(MockSite::new());
        let mut themes = ThemeListing::open(&mut session).unwrap();
        assert_eq!(
            themes.title().unwrap(),
            "Most Popular Complete Themes :: Add-ons for Firefox"
        );
        assert_eq!(themes.selected_explore_filter().unwrap().as_deref(), Some("Most Popular"));
        assert_eq!(themes.categories().unwrap().len(), 9);
        assert!(themes.subscribe_link_text().unwrap().contains("Subscribe"));
    }

    #[test]
    fn test_wrong_kind_is_unexpected_page() {
        let mut session = mock_session(MockSite::new());
        session.goto("extensions/").unwrap();
        let err = ThemeListing::attach(&mut session).unwrap_err();
        assert!(matches!(err, ProbeError::UnexpectedPage { .. }));
    }

    #[test]
    fn test_click_category_keeps_kind() {
        let mut session = mock_session(MockSite::new());
        let mut themes = ThemeListing::open(&mut session).unwrap();
        let first = themes.categories().unwrap().remove(0);
        let mut category = themes.click_category(0).unwrap();
        assert_eq!(category.heading().unwrap(), first);
        assert!(category.current_url().unwrap().ends_with("/complete-themes/animals/"));
        assert_eq!(category.breadcrumbs().unwrap().len(), 3);
    }

    #[test]
    fn test_click_addon_opens_matching_details() {
        let mut session = mock_session(MockSite::new());
        let mut listing = ExtensionsListing::open(&mut session).unwrap();
        let name = listing.item_name(3).unwrap();
        let mut details = listing.click_addon(3).unwrap();
        assert_eq!(details.name().unwrap(), name);
    }
}
