//! Home page scenarios.

use super::{ensure, located, tags, Scenario};
use crate::driver::Driver;
use crate::model::{Direction, ExploreFilter};
use crate::pages::{Home, PageObject, Session};
use crate::result::ProbeResult;
use crate::verify::{verify_breadcrumbs, verify_order, verify_unique_names, Assertion};

pub(super) fn scenarios<D: Driver>() -> Vec<Scenario<D>> {
    vec![
        Scenario::new(
            "home::most_popular_by_users",
            &[tags::HOME, tags::SORTING],
            most_popular_by_users,
        ),
        Scenario::new("home::sections_present", &[tags::HOME], sections_present),
        Scenario::new(
            "home::explore_filters",
            &[tags::HOME, tags::NAVIGATION],
            explore_filters,
        ),
        Scenario::new(
            "home::see_all_links",
            &[tags::HOME, tags::NAVIGATION],
            see_all_links,
        ),
        Scenario::new(
            "home::category_navigation",
            &[tags::HOME, tags::NAVIGATION],
            category_navigation,
        ),
        Scenario::new(
            "home::header_menus",
            &[tags::HOME, tags::NAVIGATION],
            header_menus,
        ),
        Scenario::new("home::logo_and_search", &[tags::HOME], logo_and_search),
        Scenario::new(
            "home::other_applications",
            &[tags::HOME],
            other_applications,
        ),
    ]
}

fn most_popular_by_users<D: Driver>(session: &mut Session<D>) -> ProbeResult<()> {
    let mut home = session.home()?;
    let names = home.most_popular_names()?;
    let users = home.most_popular_user_counts()?;
    ensure(
        home.session(),
        Assertion::equals("most popular entries", &10, &names.len()),
    )?;
    ensure(
        home.session(),
        Assertion::equals("user counts per entry", &names.len(), &users.len()),
    )?;
    located(home.session(), verify_unique_names(&names))?;
    located(
        home.session(),
        verify_order(&users, Direction::Descending, "most popular users"),
    )
}

fn sections_present<D: Driver>(session: &mut Session<D>) -> ProbeResult<()> {
    let mut home = session.home()?;
    let promo = home.is_promo_box_present()?;
    ensure(home.session(), Assertion::is_true("promo box present", promo))?;
    let extensions = home.featured_extensions()?.len();
    ensure(
        home.session(),
        Assertion::at_least("featured extensions", 1, extensions),
    )?;
    let themes = home.featured_themes()?.len();
    ensure(home.session(), Assertion::at_least("featured themes", 1, themes))?;
    let collections = home.featured_collections()?.len();
    ensure(
        home.session(),
        Assertion::at_least("featured collections", 1, collections),
    )?;
    let hot = home.up_and_coming_count()?;
    ensure(home.session(), Assertion::at_least("up & coming", 1, hot))?;
    let title = home.title()?;
    ensure(
        home.session(),
        Assertion::ends_with("home title", &title, "Add-ons for Firefox"),
    )
}

fn explore_filters<D: Driver>(session: &mut Session<D>) -> ProbeResult<()> {
    let labels = session.home()?.explore_filters()?;
    let expected: Vec<String> = ExploreFilter::ALL
        .iter()
        .map(|f| f.label().to_string())
        .collect();
    ensure(session, Assertion::equals("explore filters", &expected, &labels))?;

    for filter in ExploreFilter::ALL {
        let home = session.home()?;
        let mut listing = home.click_to_explore(filter)?;
        let url = listing.current_url()?;
        let query = format!("sort={}", filter.sort_key().query_value());
        ensure(
            listing.session(),
            Assertion::ends_with("explore URL", &url, &query),
        )?;
        let sorted_by = listing.sorter().sorted_by()?;
        ensure(
            listing.session(),
            Assertion::equals("explore sort", filter.sort_key().label(), sorted_by.as_str()),
        )?;
        let selected = listing.selected_explore_filter()?;
        ensure(
            listing.session(),
            Assertion::equals(
                "selected explore filter",
                &Some(filter.label()),
                &selected.as_deref(),
            ),
        )?;
    }
    Ok(())
}

fn see_all_links<D: Driver>(session: &mut Session<D>) -> ProbeResult<()> {
    let mut extensions = session.home()?.click_featured_extensions_see_all()?;
    let heading = extensions.heading()?;
    ensure(
        extensions.session(),
        Assertion::equals(
            "featured extensions heading",
            "Featured Extensions",
            heading.as_str(),
        ),
    )?;
    let trail = extensions.breadcrumbs()?;
    located(
        extensions.session(),
        verify_breadcrumbs(&trail, &["Add-ons for Firefox", "Extensions"]),
    )?;

    let mut themes = session.home()?.click_featured_themes_see_all()?;
    let trail = themes.breadcrumbs()?;
    located(
        themes.session(),
        verify_breadcrumbs(&trail, &["Add-ons for Firefox", "Complete Themes"]),
    )
}

fn category_navigation<D: Driver>(session: &mut Session<D>) -> ProbeResult<()> {
    let count = session.home()?.category_region().count()?;
    ensure(session, Assertion::at_least("categories", 1, count))?;

    // First, a middle one and the last.
    for n in [0, count / 2, count - 1] {
        let mut region = session.home()?.category_region();
        let name = region.names()?.remove(n);
        let mut listing = region.click(n)?;
        let heading = listing.heading()?;
        ensure(
            listing.session(),
            Assertion::equals("category heading", name.as_str(), heading.as_str()),
        )?;
        let trail = listing.breadcrumbs()?;
        located(
            listing.session(),
            verify_breadcrumbs(&trail, &["Add-ons for Firefox", "Extensions", name.as_str()]),
        )?;
    }
    Ok(())
}

fn header_menus<D: Driver>(session: &mut Session<D>) -> ProbeResult<()> {
    let mut home = session.home()?;
    let menus = home.header().site_navigation_menus()?;
    ensure(
        home.session(),
        Assertion::equals(
            "site navigation menus",
            &["Extensions", "Complete Themes", "Collections"].map(String::from)[..],
            &menus[..],
        ),
    )?;

    let mut extensions = home.header().click_extensions()?;
    let trail = extensions.breadcrumbs()?;
    located(
        extensions.session(),
        verify_breadcrumbs(&trail, &["Add-ons for Firefox", "Extensions"]),
    )?;
    let mut home: Home<'_, D> = extensions.header().click_logo()?;
    let mut themes = home.header().click_complete_themes()?;
    let trail = themes.breadcrumbs()?;
    located(
        themes.session(),
        verify_breadcrumbs(&trail, &["Add-ons for Firefox", "Complete Themes"]),
    )
}

fn logo_and_search<D: Driver>(session: &mut Session<D>) -> ProbeResult<()> {
    let mut home = session.home()?;
    let mut header = home.header();
    let (logo, title) = header.logo()?;
    let search_visible = header.is_search_box_visible()?;
    let placeholder = header.search_placeholder()?;

    ensure(home.session(), Assertion::equals("logo text", "ADD-ONS", logo.as_str()))?;
    ensure(
        home.session(),
        Assertion::equals(
            "logo title",
            &Some("Return to the Firefox Add-ons homepage"),
            &title.as_deref(),
        ),
    )?;
    ensure(home.session(), Assertion::is_true("search box visible", search_visible))?;
    ensure(
        home.session(),
        Assertion::equals(
            "search placeholder",
            &Some("search for add-ons"),
            &placeholder.as_deref(),
        ),
    )
}

fn other_applications<D: Driver>(session: &mut Session<D>) -> ProbeResult<()> {
    let mut home = session.home()?;
    let mut header = home.header();
    let tooltip = header.other_applications_tooltip()?.unwrap_or_default();
    let visible_before = header.is_other_apps_dropdown_visible()?;
    header.hover_other_apps()?;
    let visible_after = header.is_other_apps_dropdown_visible()?;
    let apps = header.other_applications()?;

    ensure(
        home.session(),
        Assertion::equals(
            "other applications tooltip",
            "Find add-ons for other applications",
            tooltip.as_str(),
        ),
    )?;
    ensure(
        home.session(),
        Assertion::is_false("dropdown hidden before hover", visible_before),
    )?;
    ensure(
        home.session(),
        Assertion::is_true("dropdown shown on hover", visible_after),
    )?;
    ensure(
        home.session(),
        Assertion::is_false(
            "Firefox not listed as another application",
            apps.iter().any(|a| a == "Firefox"),
        ),
    )?;
    ensure(home.session(), Assertion::at_least("other applications", 1, apps.len()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::pages::tests::mock_session;
    use crate::site::MockSite;

    #[test]
    fn test_home_scenarios_pass_on_mock() {
        for scenario in scenarios::<MockSite>() {
            let mut session = mock_session(MockSite::new());
            if let Err(e) = (scenario.run)(&mut session) {
                panic!("{} failed: {e}", scenario.name);
            }
        }
    }
}
