//! Extensions listing scenarios.

use super::{ensure, located, sort_and_walk, tags, Scenario};
use crate::driver::Driver;
use crate::model::{SortKey, PAGE_SIZE};
use crate::pages::{check_presence, ExtensionsListing, PageObject, PageTurn, Session};
use crate::result::{ProbeError, ProbeResult};
use crate::verify::{verify_breadcrumbs, verify_unique_names, Assertion};

pub(super) fn scenarios<D: Driver>() -> Vec<Scenario<D>> {
    vec![
        Scenario::new(
            "extensions::default_is_featured",
            &[tags::EXTENSIONS, tags::SORTING],
            default_is_featured,
        ),
        Scenario::new(
            "extensions::sort_by_most_users",
            &[tags::EXTENSIONS, tags::SORTING, tags::PAGINATION],
            sort_by_most_users,
        ),
        Scenario::new(
            "extensions::sort_by_newest",
            &[tags::EXTENSIONS, tags::SORTING],
            sort_by_newest,
        ),
        Scenario::new(
            "extensions::sort_by_recently_updated",
            &[tags::EXTENSIONS, tags::SORTING],
            sort_by_recently_updated,
        ),
        Scenario::new(
            "extensions::sort_by_top_rated",
            &[tags::EXTENSIONS, tags::SORTING],
            sort_by_top_rated,
        ),
        Scenario::new(
            "extensions::sort_by_up_and_coming",
            &[tags::EXTENSIONS, tags::SORTING],
            sort_by_up_and_coming,
        ),
        Scenario::new(
            "extensions::sort_resets_page",
            &[tags::EXTENSIONS, tags::SORTING, tags::PAGINATION],
            sort_resets_page,
        ),
        Scenario::new(
            "extensions::pagination_round_trip",
            &[tags::EXTENSIONS, tags::PAGINATION],
            pagination_round_trip,
        ),
        Scenario::new(
            "extensions::paginator_boundaries",
            &[tags::EXTENSIONS, tags::PAGINATION],
            paginator_boundaries,
        ),
        Scenario::new(
            "extensions::paginator_presence",
            &[tags::EXTENSIONS, tags::PAGINATION],
            paginator_presence,
        ),
        Scenario::new(
            "extensions::category_listing",
            &[tags::EXTENSIONS, tags::NAVIGATION],
            category_listing,
        ),
    ]
}

fn default_is_featured<D: Driver>(session: &mut Session<D>) -> ProbeResult<()> {
    let mut listing = ExtensionsListing::open(session)?;
    let heading = listing.heading()?;
    ensure(
        listing.session(),
        Assertion::equals("listing heading", "Featured Extensions", heading.as_str()),
    )?;
    let sorted_by = listing.sorter().sorted_by()?;
    ensure(
        listing.session(),
        Assertion::equals("default sort", SortKey::Featured.label(), sorted_by.as_str()),
    )?;
    let title = listing.title()?;
    ensure(
        listing.session(),
        Assertion::ends_with("listing title", &title, ":: Add-ons for Firefox"),
    )?;
    let trail = listing.breadcrumbs()?;
    located(
        listing.session(),
        verify_breadcrumbs(&trail, &["Add-ons for Firefox", "Extensions"]),
    )?;
    let names = listing.names()?;
    ensure(
        listing.session(),
        Assertion::at_least("featured extensions", 1, names.len()),
    )?;
    located(listing.session(), verify_unique_names(&names))
}

fn sort_by_most_users<D: Driver>(session: &mut Session<D>) -> ProbeResult<()> {
    let mut listing = ExtensionsListing::open(session)?;
    let _ = sort_and_walk(&mut listing, SortKey::MostUsers, usize::MAX)?;
    Ok(())
}

fn sort_by_newest<D: Driver>(session: &mut Session<D>) -> ProbeResult<()> {
    let mut listing = ExtensionsListing::open(session)?;
    let _ = sort_and_walk(&mut listing, SortKey::Newest, 2)?;
    Ok(())
}

fn sort_by_recently_updated<D: Driver>(session: &mut Session<D>) -> ProbeResult<()> {
    let mut listing = ExtensionsListing::open(session)?;
    let _ = sort_and_walk(&mut listing, SortKey::RecentlyUpdated, 2)?;
    Ok(())
}

fn sort_by_top_rated<D: Driver>(session: &mut Session<D>) -> ProbeResult<()> {
    let mut listing = ExtensionsListing::open(session)?;
    let pages = sort_and_walk(&mut listing, SortKey::TopRated, 1)?;
    let rows = pages.first().map_or(0, |page| page.items.len());
    ensure(listing.session(), Assertion::at_least("top rated extensions", 1, rows))?;
    let heading = listing.heading()?;
    ensure(
        listing.session(),
        Assertion::equals("listing heading", "Top Rated Extensions", heading.as_str()),
    )
}

fn sort_by_up_and_coming<D: Driver>(session: &mut Session<D>) -> ProbeResult<()> {
    let mut listing = ExtensionsListing::open(session)?;
    let pages = sort_and_walk(&mut listing, SortKey::UpAndComing, 1)?;
    let rows = pages.first().map_or(0, |page| page.items.len());
    ensure(
        listing.session(),
        Assertion::at_least("up and coming extensions", 1, rows),
    )
}

fn sort_resets_page<D: Driver>(session: &mut Session<D>) -> ProbeResult<()> {
    let mut listing = ExtensionsListing::open(session)?;
    let _ = listing.sorter().sort_by(SortKey::MostUsers)?;
    if !listing.is_paginator_present()? {
        return Ok(());
    }
    // A single full page has nowhere to move; sorting must still land on page 1.
    if let PageTurn::Moved(second) = listing.paginator().next()? {
        ensure(
            listing.session(),
            Assertion::equals("page after next", &2, &second.page),
        )?;
    }
    let snapshot = listing.sorter().sort_by(SortKey::Name)?;
    ensure(
        listing.session(),
        Assertion::equals("page after sorting", &1, &snapshot.page),
    )?;
    let prev_disabled = listing.paginator().is_prev_disabled()?;
    ensure(
        listing.session(),
        Assertion::is_true("previous disabled after sorting", prev_disabled),
    )
}

fn pagination_round_trip<D: Driver>(session: &mut Session<D>) -> ProbeResult<()> {
    let mut listing = ExtensionsListing::open(session)?;
    let first = listing.sorter().sort_by(SortKey::MostUsers)?;
    if !listing.is_paginator_present()? {
        return Ok(());
    }

    let Some(second) = listing.paginator().next()?.moved() else {
        // Single page; nothing to round-trip.
        return Ok(());
    };
    let url = listing.current_url()?;
    ensure(
        listing.session(),
        Assertion::contains("URL after next", &url, "page=2"),
    )?;
    ensure(
        listing.session(),
        Assertion::equals("page after next", &2, &second.page),
    )?;
    ensure(
        listing.session(),
        Assertion::not_equals("second page rows", &first.names(), &second.names()),
    )?;

    let back = match listing.paginator().prev()? {
        PageTurn::Moved(snapshot) => snapshot,
        PageTurn::AtBoundary => {
            return ensure(
                listing.session(),
                Assertion::is_false("previous disabled on page 2", true),
            )
        }
    };
    let url = listing.current_url()?;
    ensure(
        listing.session(),
        Assertion::contains("URL after previous", &url, "page=1"),
    )?;
    ensure(
        listing.session(),
        Assertion::equals("first page rows", &first.names(), &back.names()),
    )
}

fn paginator_boundaries<D: Driver>(session: &mut Session<D>) -> ProbeResult<()> {
    let mut listing = ExtensionsListing::open(session)?;
    let _ = listing.sorter().sort_by(SortKey::MostUsers)?;
    if !listing.is_paginator_present()? {
        return Ok(());
    }
    let mut pager = listing.paginator();
    pager.check_boundaries()?;

    let last = pager.last()?;
    pager.check_boundaries()?;
    let next_disabled = pager.is_next_disabled()?;
    let at_boundary = pager.next()? == PageTurn::AtBoundary;
    let first = pager.first()?;
    pager.check_boundaries()?;
    let prev_disabled = pager.is_prev_disabled()?;

    ensure(
        listing.session(),
        Assertion::is_true("last page reached", last.is_last()),
    )?;
    ensure(
        listing.session(),
        Assertion::is_true("next disabled on the last page", next_disabled && at_boundary),
    )?;
    ensure(
        listing.session(),
        Assertion::is_true("first page reached", first.is_first()),
    )?;
    ensure(
        listing.session(),
        Assertion::is_true("previous disabled on the first page", prev_disabled),
    )?;
    ensure(
        listing.session(),
        Assertion::at_least("rows on the last page", 1, last.items.len()),
    )
}

fn paginator_presence<D: Driver>(session: &mut Session<D>) -> ProbeResult<()> {
    let mut listing = ExtensionsListing::open(session)?;
    let present = listing.is_paginator_present()?;
    let total = if present {
        let last = listing.paginator().last()?;
        let full_pages = last
            .total_pages
            .checked_sub(1)
            .ok_or_else(|| ProbeError::parse("page count", last.total_pages.to_string()))?;
        full_pages * PAGE_SIZE + last.items.len()
    } else {
        listing.item_count()?
    };
    tracing::debug!(total, present, "paginator presence");
    ensure(listing.session(), Assertion::at_least("extensions listed", 1, total))?;
    located(listing.session(), check_presence(total, present))
}

fn category_listing<D: Driver>(session: &mut Session<D>) -> ProbeResult<()> {
    let mut listing = ExtensionsListing::open(session)?;
    let categories = listing.categories()?;
    ensure(
        listing.session(),
        Assertion::at_least("extension categories", 1, categories.len()),
    )?;
    let n = categories.len() / 2;
    let mut category = listing.click_category(n)?;
    let heading = category.heading()?;
    ensure(
        category.session(),
        Assertion::equals("category heading", categories[n].as_str(), heading.as_str()),
    )?;
    let trail = category.breadcrumbs()?;
    located(
        category.session(),
        verify_breadcrumbs(
            &trail,
            &["Add-ons for Firefox", "Extensions", categories[n].as_str()],
        ),
    )?;
    let names = category.names()?;
    located(category.session(), verify_unique_names(&names))?;
    if names.is_empty() {
        return Ok(());
    }
    let mut details = category.click_addon(0)?;
    let name = details.name()?;
    ensure(
        details.session(),
        Assertion::equals("detail page name", names[0].as_str(), name.as_str()),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::pages::tests::mock_session;
    use crate::site::{Fault, MockSite};

    fn run(name: &str, site: MockSite) -> ProbeResult<()> {
        let scenario = scenarios::<MockSite>()
            .into_iter()
            .find(|s| s.name == name)
            .unwrap();
        let mut session = mock_session(site);
        (scenario.run)(&mut session)
    }

    #[test]
    fn test_extension_scenarios_pass_on_mock() {
        for scenario in scenarios::<MockSite>() {
            let mut session = mock_session(MockSite::new());
            if let Err(e) = (scenario.run)(&mut session) {
                panic!("{} failed: {e}", scenario.name);
            }
        }
    }

    #[test]
    fn test_boundary_inversion_is_caught() {
        let site = MockSite::builder().fault(Fault::BrokenPageBoundary).build();
        let err = run("extensions::sort_by_most_users", site).unwrap_err();
        match err {
            ProbeError::AssertionFailed { message, url, .. } => {
                assert!(message.contains("Most Users order"), "{message}");
                assert!(url.contains("page=2"), "{url}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_pagination_on_threshold_sites() {
        let paginated: Vec<_> = scenarios::<MockSite>()
            .into_iter()
            .filter(|s| s.tags.contains(&tags::PAGINATION))
            .collect();
        assert!(paginated.len() >= 4);
        for count in [19, 20, 21] {
            for scenario in &paginated {
                let mut session = mock_session(MockSite::builder().extensions(count).build());
                if let Err(e) = (scenario.run)(&mut session) {
                    panic!("{} failed with {count} extensions: {e}", scenario.name);
                }
            }
        }
    }

    #[test]
    fn test_empty_marketplace_is_caught() {
        for name in [
            "extensions::default_is_featured",
            "extensions::sort_by_top_rated",
            "extensions::sort_by_up_and_coming",
            "extensions::paginator_presence",
        ] {
            let site = MockSite::builder().extensions(0).build();
            let err = run(name, site).unwrap_err();
            assert!(matches!(err, ProbeError::AssertionFailed { .. }), "{name}: {err}");
        }
    }
}
