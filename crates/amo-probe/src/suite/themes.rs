//! Complete themes listing scenarios.

use super::{ensure, located, sort_and_walk, tags, Scenario};
use crate::driver::Driver;
use crate::model::SortKey;
use crate::pages::{ExtensionsListing, PageObject, Session, ThemeListing};
use crate::result::ProbeResult;
use crate::verify::{verify_breadcrumbs, verify_names_ascending, Assertion};

pub(super) fn scenarios<D: Driver>() -> Vec<Scenario<D>> {
    vec![
        Scenario::new(
            "themes::default_sort",
            &[tags::THEMES, tags::SORTING],
            default_sort,
        ),
        Scenario::new(
            "themes::sort_by_name",
            &[tags::THEMES, tags::SORTING, tags::PAGINATION],
            sort_by_name,
        ),
        Scenario::new(
            "themes::sort_by_recently_updated",
            &[tags::THEMES, tags::SORTING, tags::PAGINATION],
            sort_by_recently_updated,
        ),
        Scenario::new(
            "themes::sort_by_newest",
            &[tags::THEMES, tags::SORTING, tags::PAGINATION],
            sort_by_newest,
        ),
        Scenario::new(
            "themes::sort_by_weekly_downloads",
            &[tags::THEMES, tags::SORTING, tags::PAGINATION],
            sort_by_weekly_downloads,
        ),
        Scenario::new(
            "themes::categories",
            &[tags::THEMES, tags::NAVIGATION],
            categories,
        ),
        Scenario::new(
            "themes::last_page_not_empty",
            &[tags::THEMES, tags::PAGINATION],
            last_page_not_empty,
        ),
        Scenario::new(
            "themes::open_theme",
            &[tags::THEMES, tags::NAVIGATION],
            open_theme,
        ),
    ]
}

fn default_sort<D: Driver>(session: &mut Session<D>) -> ProbeResult<()> {
    let mut themes = ThemeListing::open(session)?;
    let sorted_by = themes.sorter().sorted_by()?;
    ensure(
        themes.session(),
        Assertion::equals("default sort", SortKey::MostUsers.label(), sorted_by.as_str()),
    )?;
    let title = themes.title()?;
    ensure(
        themes.session(),
        Assertion::equals(
            "theme listing title",
            "Most Popular Complete Themes :: Add-ons for Firefox",
            title.as_str(),
        ),
    )?;
    let explore = themes.selected_explore_filter()?;
    ensure(
        themes.session(),
        Assertion::equals("selected explore filter", &Some("Most Popular"), &explore.as_deref()),
    )?;
    let subscribe = themes.subscribe_link_text()?;
    ensure(
        themes.session(),
        Assertion::contains("subscribe link", &subscribe, "Subscribe"),
    )?;
    let options = themes.sorter().options()?;
    ensure(
        themes.session(),
        Assertion::is_false(
            "themes cannot be sorted by Featured",
            options.iter().any(|o| o == SortKey::Featured.label()),
        ),
    )?;
    let trail = themes.breadcrumbs()?;
    located(
        themes.session(),
        verify_breadcrumbs(&trail, &["Add-ons for Firefox", "Complete Themes"]),
    )
}

fn sort_by_name<D: Driver>(session: &mut Session<D>) -> ProbeResult<()> {
    let mut themes = ThemeListing::open(session)?;
    let pages = sort_and_walk(&mut themes, SortKey::Name, 2)?;
    let names: Vec<String> = pages.iter().flat_map(|p| p.names()).collect();
    located(themes.session(), verify_names_ascending(&names))
}

fn sort_by_recently_updated<D: Driver>(session: &mut Session<D>) -> ProbeResult<()> {
    let mut themes = ThemeListing::open(session)?;
    let _ = sort_and_walk(&mut themes, SortKey::RecentlyUpdated, 2)?;
    Ok(())
}

fn sort_by_newest<D: Driver>(session: &mut Session<D>) -> ProbeResult<()> {
    let mut themes = ThemeListing::open(session)?;
    let _ = sort_and_walk(&mut themes, SortKey::Newest, 2)?;
    Ok(())
}

fn sort_by_weekly_downloads<D: Driver>(session: &mut Session<D>) -> ProbeResult<()> {
    let mut themes = ThemeListing::open(session)?;
    let _ = sort_and_walk(&mut themes, SortKey::WeeklyDownloads, 2)?;
    Ok(())
}

fn categories<D: Driver>(session: &mut Session<D>) -> ProbeResult<()> {
    let names = ThemeListing::open(&mut *session)?.categories()?;
    ensure(
        session,
        Assertion::at_least("theme categories", 1, names.len()),
    )?;
    let extension_names = ExtensionsListing::open(&mut *session)?.categories()?;
    ensure(
        session,
        Assertion::not_equals(
            "theme and extension category counts",
            &extension_names.len(),
            &names.len(),
        ),
    )?;
    let shared: Vec<String> = names
        .iter()
        .filter(|name| extension_names.contains(*name))
        .cloned()
        .collect();
    ensure(
        session,
        Assertion::equals("categories shared with extensions", &Vec::new(), &shared),
    )?;
    for (n, name) in names.iter().enumerate() {
        let themes = ThemeListing::open(&mut *session)?;
        let mut category = themes.click_category(n)?;
        let heading = category.heading()?;
        ensure(
            category.session(),
            Assertion::equals("category heading", name.as_str(), heading.as_str()),
        )?;
        let title = category.title()?;
        ensure(
            category.session(),
            Assertion::contains("category title", &title, name),
        )?;
        let trail = category.breadcrumbs()?;
        located(
            category.session(),
            verify_breadcrumbs(
                &trail,
                &["Add-ons for Firefox", "Complete Themes", name.as_str()],
            ),
        )?;
    }
    Ok(())
}

fn last_page_not_empty<D: Driver>(session: &mut Session<D>) -> ProbeResult<()> {
    let mut themes = ThemeListing::open(session)?;
    if !themes.is_paginator_present()? {
        let rows = themes.item_count()?;
        return ensure(themes.session(), Assertion::at_least("rows", 1, rows));
    }
    let last = themes.paginator().last()?;
    ensure(
        themes.session(),
        Assertion::is_true("last page reached", last.is_last()),
    )?;
    ensure(
        themes.session(),
        Assertion::at_least("rows on the last page", 1, last.items.len()),
    )
}

fn open_theme<D: Driver>(session: &mut Session<D>) -> ProbeResult<()> {
    let mut themes = ThemeListing::open(session)?;
    let n = themes.item_count()?.min(3).saturating_sub(1);
    let name = themes.item_name(n)?;
    let mut details = themes.click_addon(n)?;
    let shown = details.name()?;
    ensure(
        details.session(),
        Assertion::equals("detail page name", name.as_str(), shown.as_str()),
    )?;
    let trail = details.breadcrumbs()?;
    located(
        details.session(),
        verify_breadcrumbs(&trail, &["Add-ons for Firefox", "Complete Themes", name.as_str()]),
    )
}
