//! Listing sorter.

use super::listing::read_snapshot;
use super::Session;
use crate::driver::Driver;
use crate::model::{query_param, ListingSnapshot, SortKey};
use crate::result::{ProbeError, ProbeResult};
use crate::selectors as sel;

/// Sort control of a listing
#[derive(Debug)]
pub struct Sorter<'a, D> {
    session: &'a mut Session<D>,
}

impl<'a, D: Driver> Sorter<'a, D> {
    pub(crate) fn new(session: &'a mut Session<D>) -> Self {
        Self { session }
    }

    /// Label of the active sort
    ///
    /// # Errors
    ///
    /// Returns error if no option is marked selected
    pub fn sorted_by(&mut self) -> ProbeResult<String> {
        self.session.text(sel::SORTER_SELECTED)
    }

    /// Labels of every sort option
    ///
    /// # Errors
    ///
    /// Returns error if the driver fails
    pub fn options(&mut self) -> ProbeResult<Vec<String>> {
        self.session.texts(sel::SORTER_OPTIONS)
    }

    /// Sort by `key` and read the first page of the result.
    ///
    /// The resulting URL must carry `sort=<key>` and no page other than 1.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::AssertionFailed`] if the site keeps a later page
    pub fn sort_by(&mut self, key: SortKey) -> ProbeResult<ListingSnapshot> {
        let option = self
            .session
            .locator(sel::SORTER_OPTIONS)
            .with_text(key.label());
        tracing::info!(sort = %key, "sort listing");
        self.session.click(&option)?;
        self.session.wait_until(&format!("sort={}", key.query_value()), |s| {
            let url = s.current_url()?;
            Ok(query_param(&url, "sort") == Some(key.query_value()))
        })?;

        let url = self.session.current_url()?;
        if let Some(page) = query_param(&url, "page").filter(|p| *p != "1") {
            return Err(ProbeError::assertion(
                format!("sorting by {key} resets to the first page"),
                "page=1",
                format!("page={page}"),
                url,
            ));
        }
        read_snapshot(self.session)
    }
}
