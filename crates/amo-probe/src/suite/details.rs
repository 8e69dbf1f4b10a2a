//! Add-on detail page scenarios.

use super::{ensure, located, tags, Scenario};
use crate::driver::Driver;
use crate::pages::{Details, ExtensionsListing, Home, PageObject, Session};
use crate::result::ProbeResult;
use crate::verify::{verify_breadcrumbs, Assertion};

pub(super) fn scenarios<D: Driver>() -> Vec<Scenario<D>> {
    vec![
        Scenario::new(
            "details::breadcrumbs",
            &[tags::DETAILS, tags::NAVIGATION],
            breadcrumbs,
        ),
        Scenario::new("details::text_sections", &[tags::DETAILS], text_sections),
        Scenario::new("details::version_info", &[tags::DETAILS], version_info),
        Scenario::new("details::image_viewer", &[tags::DETAILS], image_viewer),
        Scenario::new(
            "details::reviews",
            &[tags::DETAILS, tags::NAVIGATION],
            reviews,
        ),
        Scenario::new(
            "details::other_addons",
            &[tags::DETAILS, tags::NAVIGATION],
            other_addons,
        ),
        Scenario::new("details::theme_preview", &[tags::DETAILS], theme_preview),
    ]
}

fn first_addon<D: Driver>(session: &mut Session<D>) -> ProbeResult<Details<'_, D>> {
    session.home()?.click_on_first_addon()
}

fn breadcrumbs<D: Driver>(session: &mut Session<D>) -> ProbeResult<()> {
    let mut details = first_addon(session)?;
    let name = details.name()?;
    let trail = details.breadcrumbs()?;
    located(
        details.session(),
        verify_breadcrumbs(&trail, &["Add-ons for Firefox", "Extensions", name.as_str()]),
    )?;
    ensure(
        details.session(),
        Assertion::is_true(
            "only ancestors are links",
            trail[..trail.len() - 1].iter().all(|c| c.href.is_some())
                && trail[trail.len() - 1].href.is_none(),
        ),
    )?;

    let mut listing: ExtensionsListing<'_, D> = details.click_breadcrumb(1)?;
    let trail = listing.breadcrumbs()?;
    located(
        listing.session(),
        verify_breadcrumbs(&trail, &["Add-ons for Firefox", "Extensions"]),
    )?;

    let mut details: Details<'_, D> = listing.go_back()?;
    let back = details.name()?;
    ensure(
        details.session(),
        Assertion::equals("name after going back", name.as_str(), back.as_str()),
    )?;
    let mut home: Home<'_, D> = details.click_breadcrumb(0)?;
    let promo = home.is_promo_box_present()?;
    ensure(home.session(), Assertion::is_true("home reached", promo))
}

fn text_sections<D: Driver>(session: &mut Session<D>) -> ProbeResult<()> {
    let mut details = first_addon(session)?;
    let name = details.name()?;
    let title = details.title()?;
    ensure(
        details.session(),
        Assertion::contains("detail title", &title, &name),
    )?;
    let about = details.about_heading()?;
    ensure(
        details.session(),
        Assertion::equals("about heading", "About this Add-on", about.as_str()),
    )?;
    let summary = details.summary()?;
    ensure(
        details.session(),
        Assertion::is_false("summary is empty", summary.is_empty()),
    )?;
    let description = details.description()?;
    ensure(
        details.session(),
        Assertion::is_false("description is empty", description.is_empty()),
    )?;
    let tags = details.tags()?;
    ensure(details.session(), Assertion::at_least("tags", 1, tags.len()))
}

fn version_info<D: Driver>(session: &mut Session<D>) -> ProbeResult<()> {
    let mut details = first_addon(session)?;
    let version = details.version()?;
    let collapsed = details.is_version_info_expanded()?;
    ensure(
        details.session(),
        Assertion::is_false("version information starts collapsed", collapsed),
    )?;

    let expanded = details.toggle_version_info()?;
    let line = details.version_info()?;
    ensure(
        details.session(),
        Assertion::is_true("version information expands", expanded),
    )?;
    ensure(
        details.session(),
        Assertion::contains("version information", &line, &version),
    )?;

    let expanded = details.toggle_version_info()?;
    ensure(
        details.session(),
        Assertion::is_false("version information collapses", expanded),
    )
}

fn image_viewer<D: Driver>(session: &mut Session<D>) -> ProbeResult<()> {
    let mut details = first_addon(session)?;
    let previews = details.preview_count()?;
    if previews == 0 {
        return Ok(());
    }

    let mut viewer = details.image_viewer();
    viewer.open(0)?;
    let count = viewer.image_count()?;
    let prev_enabled = viewer.is_prev_enabled()?;
    let mut sources = vec![viewer.image_src()?];
    while viewer.next()? {
        sources.push(viewer.image_src()?);
    }
    let last = viewer.current_index()?;
    let next_enabled = viewer.is_next_enabled()?;
    let stepped_back = if count > 1 { viewer.prev()? } else { true };
    viewer.close()?;
    let closed = !viewer.is_visible()?;

    ensure(
        details.session(),
        Assertion::equals("images in viewer", &previews, &count),
    )?;
    ensure(
        details.session(),
        Assertion::is_false("previous enabled on the first image", prev_enabled),
    )?;
    ensure(
        details.session(),
        Assertion::equals("images visited", &count, &sources.len()),
    )?;
    ensure(
        details.session(),
        Assertion::equals("last image index", &(count - 1), &last),
    )?;
    ensure(
        details.session(),
        Assertion::is_false("next enabled on the last image", next_enabled),
    )?;
    ensure(
        details.session(),
        Assertion::is_true("previous works from the last image", stepped_back),
    )?;
    ensure(details.session(), Assertion::is_true("viewer closed", closed))
}

fn reviews<D: Driver>(session: &mut Session<D>) -> ProbeResult<()> {
    let mut details = first_addon(session)?;
    let count = details.review_count()?;
    let reviewers = details.reviewers()?;
    ensure(
        details.session(),
        Assertion::equals("one reviewer per review", &count, &reviewers.len()),
    )?;
    let Some(reviewer) = reviewers.into_iter().next() else {
        return Ok(());
    };
    let mut profile = details.click_reviewer(0)?;
    let name = profile.name()?;
    ensure(
        profile.session(),
        Assertion::equals("reviewer profile", reviewer.as_str(), name.as_str()),
    )
}

fn other_addons<D: Driver>(session: &mut Session<D>) -> ProbeResult<()> {
    let mut details = first_addon(session)?;
    let Some(label) = details.other_addons_label()? else {
        return Ok(());
    };
    ensure(
        details.session(),
        Assertion::contains("other add-ons label", &label, "Other add-ons by"),
    )?;
    let others = details.other_addons()?;
    let current = details.name()?;
    ensure(
        details.session(),
        Assertion::is_false(
            "an add-on lists itself among the others",
            others.contains(&current),
        ),
    )?;
    let Some(first) = others.into_iter().next() else {
        return Ok(());
    };
    let mut other = details.click_other_addon(0)?;
    let name = other.name()?;
    ensure(
        other.session(),
        Assertion::equals("other add-on page", first.as_str(), name.as_str()),
    )
}

fn theme_preview<D: Driver>(session: &mut Session<D>) -> ProbeResult<()> {
    let mut home = session.home()?;
    let themes = home.featured_themes()?;
    let Some(expected) = themes.into_iter().next() else {
        return Ok(());
    };
    let mut details = home.click_featured_theme(0)?;
    let name = details.name()?;
    ensure(
        details.session(),
        Assertion::equals("featured theme page", expected.as_str(), name.as_str()),
    )?;
    let previews = details.preview_count()?;
    ensure(details.session(), Assertion::at_least("theme previews", 1, previews))?;
    let trail = details.breadcrumbs()?;
    located(
        details.session(),
        verify_breadcrumbs(&trail, &["Add-ons for Firefox", "Complete Themes", name.as_str()]),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::pages::tests::mock_session;
    use crate::site::MockSite;

    #[test]
    fn test_detail_scenarios_pass_on_mock() {
        for scenario in scenarios::<MockSite>() {
            let mut session = mock_session(MockSite::new());
            if let Err(e) = (scenario.run)(&mut session) {
                panic!("{} failed: {e}", scenario.name);
            }
        }
    }
}
