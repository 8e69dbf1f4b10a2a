//! Listing paginator.
//!
//! Rendered only when a listing holds at least one full page
//! ([`PAGE_SIZE`] items). Previous is disabled exactly on page 1 and next
//! exactly on the last page.

use super::listing::read_snapshot;
use super::Session;
use crate::driver::Driver;
use crate::model::{parse_position, query_param, ListingSnapshot, PAGE_SIZE};
use crate::result::{ProbeError, ProbeResult};
use crate::selectors as sel;

/// Outcome of a relative page move
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageTurn {
    /// Moved; the new page's contents
    Moved(ListingSnapshot),
    /// Already at the first (prev) or last (next) page; nothing was clicked
    AtBoundary,
}

impl PageTurn {
    /// The snapshot, if the page moved
    #[must_use]
    pub fn moved(self) -> Option<ListingSnapshot> {
        match self {
            Self::Moved(snapshot) => Some(snapshot),
            Self::AtBoundary => None,
        }
    }
}

/// Paginator control of a listing
#[derive(Debug)]
pub struct Paginator<'a, D> {
    session: &'a mut Session<D>,
}

impl<'a, D: Driver> Paginator<'a, D> {
    pub(crate) fn new(session: &'a mut Session<D>) -> Self {
        Self { session }
    }

    /// `(current page, total pages)`
    ///
    /// # Errors
    ///
    /// Returns error if the paginator is missing
    pub fn position(&mut self) -> ProbeResult<(usize, usize)> {
        parse_position(&self.session.text(sel::PAGINATOR_POSITION)?)
    }

    /// Current page, 1-based
    ///
    /// # Errors
    ///
    /// Returns error if the paginator is missing
    pub fn current_page(&mut self) -> ProbeResult<usize> {
        Ok(self.position()?.0)
    }

    /// Whether "previous" is disabled
    ///
    /// # Errors
    ///
    /// Returns error if the paginator is missing
    pub fn is_prev_disabled(&mut self) -> ProbeResult<bool> {
        self.session.has_class(sel::PAGINATOR_PREV, "disabled")
    }

    /// Whether "next" is disabled
    ///
    /// # Errors
    ///
    /// Returns error if the paginator is missing
    pub fn is_next_disabled(&mut self) -> ProbeResult<bool> {
        self.session.has_class(sel::PAGINATOR_NEXT, "disabled")
    }

    fn go(&mut self, control: &str, page: usize) -> ProbeResult<ListingSnapshot> {
        let link = self.session.locator(control);
        let url = self.session.follow(&link)?;
        tracing::debug!(page, %url, "paginate");
        self.session.wait_until(&format!("page={page}"), |s| {
            let url = s.current_url()?;
            Ok(query_param(&url, "page").and_then(|p| p.parse().ok()) == Some(page))
        })?;
        read_snapshot(self.session)
    }

    /// Move one page forward
    ///
    /// # Errors
    ///
    /// Returns error if the paginator is missing or the page does not load
    pub fn next(&mut self) -> ProbeResult<PageTurn> {
        if self.is_next_disabled()? {
            return Ok(PageTurn::AtBoundary);
        }
        let page = self.current_page()? + 1;
        self.go(sel::PAGINATOR_NEXT, page).map(PageTurn::Moved)
    }

    /// Move one page back
    ///
    /// # Errors
    ///
    /// Returns error if the paginator is missing or the page does not load
    pub fn prev(&mut self) -> ProbeResult<PageTurn> {
        if self.is_prev_disabled()? {
            return Ok(PageTurn::AtBoundary);
        }
        let current = self.current_page()?;
        let page = current
            .checked_sub(1)
            .filter(|p| *p > 0)
            .ok_or_else(|| ProbeError::parse("previous page", format!("page {current}")))?;
        self.go(sel::PAGINATOR_PREV, page).map(PageTurn::Moved)
    }

    /// Jump to the first page
    ///
    /// # Errors
    ///
    /// Returns error if the paginator is missing or the page does not load
    pub fn first(&mut self) -> ProbeResult<ListingSnapshot> {
        if self.is_prev_disabled()? {
            return read_snapshot(self.session);
        }
        self.go(sel::PAGINATOR_FIRST, 1)
    }

    /// Jump to the last page
    ///
    /// # Errors
    ///
    /// Returns error if the paginator is missing or the page does not load
    pub fn last(&mut self) -> ProbeResult<ListingSnapshot> {
        if self.is_next_disabled()? {
            return read_snapshot(self.session);
        }
        let (_, total) = self.position()?;
        self.go(sel::PAGINATOR_LAST, total)
    }

    /// Check both boundary flags against the position
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::AssertionFailed`] naming the flag that is wrong
    pub fn check_boundaries(&mut self) -> ProbeResult<()> {
        let (page, total) = self.position()?;
        let prev = self.is_prev_disabled()?;
        let next = self.is_next_disabled()?;
        let url = self.session.current_url()?;
        if prev != (page == 1) {
            return Err(ProbeError::assertion(
                format!("previous is disabled iff on page 1 (page {page} of {total})"),
                (page == 1).to_string(),
                prev.to_string(),
                url,
            ));
        }
        if next != (page == total) {
            return Err(ProbeError::assertion(
                format!("next is disabled iff on the last page (page {page} of {total})"),
                (page == total).to_string(),
                next.to_string(),
                url,
            ));
        }
        Ok(())
    }
}

/// Check the presence rule: a paginator is rendered iff the listing holds
/// at least [`PAGE_SIZE`] items.
///
/// # Errors
///
/// Returns [`ProbeError::AssertionFailed`] when presence disagrees with the
/// item count
pub fn check_presence(item_count: usize, present: bool) -> ProbeResult<()> {
    let expected = item_count >= PAGE_SIZE;
    if expected == present {
        Ok(())
    } else {
        Err(ProbeError::assertion(
            format!("paginator shown iff at least {PAGE_SIZE} items ({item_count} items)"),
            if expected { "present" } else { "absent" },
            if present { "present" } else { "absent" },
            "",
        ))
    }
}
