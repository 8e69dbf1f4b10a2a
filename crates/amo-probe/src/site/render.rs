//! Routing and markup for the mock site.

use super::catalog::{page_count, reviewer_name, slugify, Addon, Kind, COLLECTIONS};
use super::dom::{Action, Document, Node};
use super::{Fault, MockSite, APP_ROOT};
use crate::model::{format_count, format_date, query_param, ExploreFilter, SortKey, PAGE_SIZE};
use crate::selectors as sel;

const SITE_LABEL: &str = "Add-ons for Firefox";
const LOGO_TITLE: &str = "Return to the Firefox Add-ons homepage";

const OTHER_APPS: [(&str, &str); 3] = [
    ("Thunderbird", "thunderbird"),
    ("Android", "android"),
    ("SeaMonkey", "seamonkey"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Route<'a> {
    Home { app: &'a str },
    Listing { kind: Kind, category: Option<usize> },
    Details { slug: &'a str },
    Login,
    UserEdit,
    UserProfile { id: &'a str },
    Collections,
    NotFound,
}

pub(super) fn route(path: &str) -> Route<'_> {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let category = |kind: Kind, slug: &str| {
        kind.categories()
            .iter()
            .position(|c| slugify(c) == slug)
            .map_or(Route::NotFound, |i| Route::Listing {
                kind,
                category: Some(i),
            })
    };
    match segments.as_slice() {
        [_, app] => Route::Home { app: *app },
        [_, "firefox", "extensions"] => Route::Listing {
            kind: Kind::Extension,
            category: None,
        },
        [_, "firefox", "extensions", slug] => category(Kind::Extension, *slug),
        [_, "firefox", "complete-themes"] => Route::Listing {
            kind: Kind::Theme,
            category: None,
        },
        [_, "firefox", "complete-themes", slug] => category(Kind::Theme, *slug),
        [_, "firefox", "addon", slug] => Route::Details { slug: *slug },
        [_, "firefox", "users", "login"] => Route::Login,
        [_, "firefox", "users", "edit"] => Route::UserEdit,
        [_, "firefox", "user", id] => Route::UserProfile { id: *id },
        [_, "firefox", "collections"] => Route::Collections,
        _ => Route::NotFound,
    }
}

pub(super) fn requires_login(path: &str) -> bool {
    route(path) == Route::UserEdit
}

/// Previews of the add-on whose detail page is showing
pub(super) fn preview_count(site: &MockSite) -> usize {
    match site.path.as_deref().map(route) {
        Some(Route::Details { slug }) => site.catalog.by_slug(slug).map_or(0, |a| a.previews),
        _ => 0,
    }
}

fn title(heading: &str) -> String {
    format!("{heading} :: {SITE_LABEL}")
}

fn listing_path(kind: Kind, category: Option<usize>) -> String {
    match category {
        Some(c) => format!(
            "{APP_ROOT}{}/{}/",
            kind.section(),
            slugify(kind.categories()[c])
        ),
        None => format!("{APP_ROOT}{}/", kind.section()),
    }
}

fn details_path(addon: &Addon) -> String {
    format!("{APP_ROOT}addon/{}/", addon.slug)
}

const THEME_SORTS: [SortKey; 7] = [
    SortKey::MostUsers,
    SortKey::TopRated,
    SortKey::Newest,
    SortKey::Name,
    SortKey::WeeklyDownloads,
    SortKey::RecentlyUpdated,
    SortKey::UpAndComing,
];

fn sort_keys(kind: Kind) -> &'static [SortKey] {
    match kind {
        Kind::Extension => &SortKey::ALL,
        Kind::Theme => &THEME_SORTS,
    }
}

fn listing_heading(kind: Kind, sort: SortKey) -> String {
    match sort {
        SortKey::Featured => format!("Featured {}", kind.label()),
        SortKey::MostUsers => format!("Most Popular {}", kind.label()),
        SortKey::TopRated => format!("Top Rated {}", kind.label()),
        _ => kind.label().to_string(),
    }
}

fn add_breadcrumbs(doc: &mut Document, trail: &[(&str, Option<String>)]) {
    for (label, href) in trail {
        doc.add(sel::BREADCRUMBS, Node::new("li", *label));
        if let Some(href) = href {
            doc.add(sel::BREADCRUMB_LINKS, Node::link(*label, href.clone()));
        }
    }
}

impl MockSite {
    fn add_categories(&self, doc: &mut Document, kind: Kind) {
        for (i, &name) in kind.categories().iter().enumerate() {
            let name = if kind == Kind::Theme && i == 1 && self.has_fault(Fault::SharedCategories) {
                Kind::Extension.categories()[1]
            } else {
                name
            };
            doc.add(
                sel::SIDE_CATEGORIES,
                Node::link(name, listing_path(kind, Some(i))),
            );
        }
    }

    pub(super) fn render(&self) -> Document {
        let Some(path) = self.path.as_deref() else {
            return Document::default();
        };
        let mut doc = match route(path) {
            Route::Home { app } => self.render_home(app),
            Route::Listing { kind, category } => self.render_listing(path, kind, category),
            Route::Details { slug } => match self.catalog.by_slug(slug) {
                Some(addon) => self.render_details(addon),
                None => Self::render_not_found(),
            },
            Route::Login => self.render_login(),
            Route::UserEdit => self.render_user_edit(),
            Route::UserProfile { id } => self.render_profile(id),
            Route::Collections => {
                let mut doc = Document::new(title("Featured Collections"));
                doc.add(sel::HEADING, Node::new("h1", "Featured Collections"));
                doc
            }
            Route::NotFound => Self::render_not_found(),
        };
        self.render_header(&mut doc);
        if let Some(message) = &self.ui.success {
            doc.add(sel::NOTICE_SUCCESS, Node::new("div", message.clone()));
        }
        if let Some(message) = &self.ui.error {
            doc.add(sel::NOTICE_ERROR, Node::new("div", message.clone()));
        }
        doc
    }

    fn hovered(&self, selector: &str) -> bool {
        self.ui.hovered.as_deref() == Some(selector)
    }

    fn render_header(&self, doc: &mut Document) {
        doc.add(
            sel::LOGO,
            Node::link("ADD-ONS", APP_ROOT).attr("title", LOGO_TITLE),
        );
        doc.add(
            sel::SITE_NAV_MENUS,
            Node::link("Extensions", listing_path(Kind::Extension, None)),
        );
        doc.add(
            sel::SITE_NAV_MENUS,
            Node::link("Complete Themes", listing_path(Kind::Theme, None)),
        );
        doc.add(
            sel::SITE_NAV_MENUS,
            Node::link("Collections", format!("{APP_ROOT}collections/?sort=featured")),
        );

        let apps_open = self.hovered(sel::OTHER_APPS);
        doc.add(
            sel::OTHER_APPS,
            Node::new("a", "Other Applications")
                .attr("title", "Find add-ons for other applications")
                .attr("href", "#"),
        );
        doc.add(
            sel::OTHER_APPS_DROPDOWN,
            Node::new("ul", "").visible(apps_open),
        );
        for (label, app) in OTHER_APPS {
            doc.add(
                sel::OTHER_APPS_LINKS,
                Node::link(label, format!("/en-US/{app}/"))
                    .attr("class", app)
                    .visible(apps_open),
            );
        }

        match self.logged_in.and_then(|i| self.accounts.get(i).map(|a| (i, a))) {
            Some((index, account)) => {
                let menu_open = self.hovered(sel::ACCOUNT_USER);
                let profile = format!("{APP_ROOT}user/{}/", index + 1);
                doc.add(
                    sel::ACCOUNT_USER,
                    Node::link(account.profile.display_name.clone(), profile.clone()),
                );
                doc.add(sel::ACCOUNT_MENU, Node::new("ul", "").visible(menu_open));
                doc.add(
                    sel::VIEW_PROFILE_LINK,
                    Node::link("View Profile", profile).visible(menu_open),
                );
                doc.add(
                    sel::EDIT_PROFILE_LINK,
                    Node::link("Edit Profile", format!("{APP_ROOT}users/edit"))
                        .visible(menu_open),
                );
                doc.add(
                    sel::LOGOUT_LINK,
                    Node::new("a", "Log out")
                        .attr("href", format!("{APP_ROOT}users/logout"))
                        .action(Action::Logout)
                        .visible(menu_open),
                );
            }
            None => {
                doc.add(
                    sel::LOGIN_LINK,
                    Node::link("Log in", format!("{APP_ROOT}users/login")),
                );
                doc.add(
                    sel::REGISTER_LINK,
                    Node::link("Register", format!("{APP_ROOT}users/register")),
                );
            }
        }

        doc.add(
            sel::SEARCH_INPUT,
            Node::input("").attr("placeholder", "search for add-ons"),
        );
        doc.add(
            sel::SEARCH_BUTTON,
            Node::new("button", "Search").attr("title", "Search"),
        );
    }

    fn render_home(&self, app: &str) -> Document {
        if app != "firefox" {
            let label = OTHER_APPS
                .iter()
                .find(|(_, a)| *a == app)
                .map_or(app, |(l, _)| *l);
            let heading = format!("Add-ons for {label}");
            let mut doc = Document::new(heading.clone());
            doc.add(sel::HEADING, Node::new("h1", heading));
            return doc;
        }

        let mut doc = Document::new(SITE_LABEL);
        doc.add(sel::PROMOS, Node::new("div", "Make Firefox your own"));

        let popular = self
            .catalog
            .listing(Kind::Extension, None, SortKey::MostUsers);
        for addon in popular.iter().take(10) {
            doc.add(sel::POPULAR_NAMES, Node::new("span", addon.name.clone()));
            doc.add(
                sel::POPULAR_USERS,
                Node::new("small", format!("{} users", format_count(addon.users))),
            );
        }

        let featured = self
            .catalog
            .listing(Kind::Extension, None, SortKey::Featured);
        for addon in featured.iter().filter(|a| a.featured).take(6) {
            doc.add(
                sel::FEATURED_EXTENSIONS,
                Node::link(addon.name.clone(), details_path(addon)),
            );
        }
        doc.add(
            sel::FEATURED_EXTENSIONS_SEE_ALL,
            Node::link(
                "See all",
                format!("{}?sort=featured", listing_path(Kind::Extension, None)),
            ),
        );

        let themes = self.catalog.listing(Kind::Theme, None, SortKey::MostUsers);
        for addon in themes.iter().take(6) {
            doc.add(
                sel::FEATURED_THEMES,
                Node::link(addon.name.clone(), details_path(addon)),
            );
        }
        doc.add(
            sel::FEATURED_THEMES_SEE_ALL,
            Node::link("See all", listing_path(Kind::Theme, None)),
        );

        for name in COLLECTIONS {
            doc.add(sel::FEATURED_COLLECTIONS, Node::new("li", name));
        }

        let hot = self
            .catalog
            .listing(Kind::Extension, None, SortKey::UpAndComing);
        for addon in hot.iter().take(5) {
            doc.add(sel::UP_AND_COMING, Node::new("div", addon.name.clone()));
        }

        for filter in ExploreFilter::ALL {
            doc.add(
                sel::EXPLORE_LINKS,
                Node::link(
                    filter.label(),
                    format!(
                        "{}?sort={}",
                        listing_path(Kind::Extension, None),
                        filter.sort_key().query_value()
                    ),
                ),
            );
        }
        self.add_categories(&mut doc, Kind::Extension);
        doc
    }

    fn render_listing(&self, path: &str, kind: Kind, category: Option<usize>) -> Document {
        let sort = query_param(path, "sort")
            .and_then(SortKey::from_query_value)
            .unwrap_or_else(|| kind.default_sort());
        let items = self.catalog.listing(kind, category, sort);
        let total = page_count(items.len());
        let page = query_param(path, "page")
            .and_then(|p| p.parse::<usize>().ok())
            .unwrap_or(1)
            .clamp(1, total);
        let source_page = match page {
            1 if total >= 2 && self.has_fault(Fault::BrokenPageBoundary) => 2,
            2 if self.has_fault(Fault::BrokenPageBoundary) => 1,
            p => p,
        };
        let start = (source_page - 1) * PAGE_SIZE;
        let window = &items[start.min(items.len())..(start + PAGE_SIZE).min(items.len())];

        let heading = match category {
            Some(c) => kind.categories()[c].to_string(),
            None => listing_heading(kind, sort),
        };
        let mut doc = Document::new(title(&heading));
        doc.add(sel::HEADING, Node::new("h1", heading.clone()));

        match category {
            Some(_) => add_breadcrumbs(
                &mut doc,
                &[
                    (SITE_LABEL, Some(APP_ROOT.to_string())),
                    (kind.label(), Some(listing_path(kind, None))),
                    (heading.as_str(), None),
                ],
            ),
            None => add_breadcrumbs(
                &mut doc,
                &[(SITE_LABEL, Some(APP_ROOT.to_string())), (kind.label(), None)],
            ),
        }

        let base = listing_path(kind, category);
        for &key in sort_keys(kind) {
            let mut href = format!("{base}?sort={}", key.query_value());
            if page > 1 && self.has_fault(Fault::StickyPagination) {
                href = format!("{href}&page={page}");
            }
            let link = Node::link(key.label(), href);
            if key == sort {
                doc.add(sel::SORTER_SELECTED, link.clone());
            }
            doc.add(sel::SORTER_OPTIONS, link);
        }

        for (i, addon) in window.iter().enumerate() {
            let name = if i == 1 && self.has_fault(Fault::DuplicateName) {
                window[0].name.clone()
            } else {
                addon.name.clone()
            };
            doc.add(sel::ITEMS, Node::new("div", ""));
            doc.add(sel::ITEM_NAMES, Node::link(name, details_path(addon)));
            doc.add(
                sel::ITEM_UPDATED,
                Node::new("span", format!("Updated {}", format_date(addon.updated))),
            );
            doc.add(
                sel::ITEM_CREATED,
                Node::new("span", format!("Added {}", format_date(addon.created))),
            );
            doc.add(
                sel::ITEM_DOWNLOADS,
                Node::new(
                    "span",
                    format!("{} weekly downloads", format_count(addon.downloads)),
                ),
            );
            doc.add(
                sel::ITEM_USERS,
                Node::new("span", format!("{} users", format_count(addon.users))),
            );
        }

        doc.add(
            sel::SUBSCRIBE,
            Node::new("a", "Subscribe")
                .attr("href", format!("{base}format:rss?sort={}", sort.query_value())),
        );
        self.add_categories(&mut doc, kind);
        if let Some(filter) = ExploreFilter::ALL.iter().find(|f| f.sort_key() == sort) {
            doc.add(
                sel::SIDE_EXPLORE_SELECTED,
                Node::link(filter.label(), format!("{base}?sort={}", sort.query_value())),
            );
        }

        if items.len() >= PAGE_SIZE {
            let page_link = |n: usize| format!("{base}?sort={}&page={n}", sort.query_value());
            doc.add(sel::PAGINATOR, Node::new("nav", ""));
            let control = |class: &str, label: &str, target: usize, disabled: bool| {
                if disabled {
                    Node::new("a", label)
                        .attr("class", format!("button {class} disabled"))
                        .attr("href", "#")
                } else {
                    Node::link(label, page_link(target)).attr("class", format!("button {class}"))
                }
            };
            doc.add(sel::PAGINATOR_FIRST, control("first", "«", 1, page == 1));
            doc.add(
                sel::PAGINATOR_PREV,
                control("prev", "‹ Previous", page.saturating_sub(1), page == 1),
            );
            doc.add(
                sel::PAGINATOR_NEXT,
                control("next", "Next ›", page + 1, page == total),
            );
            doc.add(sel::PAGINATOR_LAST, control("last", "»", total, page == total));
            doc.add(
                sel::PAGINATOR_POSITION,
                Node::new("span", format!("Page {page} of {total}")),
            );
        }
        doc
    }

    fn render_details(&self, addon: &Addon) -> Document {
        let mut doc = Document::new(title(&addon.name));
        doc.add(sel::ADDON_NAME, Node::new("span", addon.name.clone()));
        doc.add(sel::ADDON_VERSION, Node::new("span", addon.version.clone()));
        add_breadcrumbs(
            &mut doc,
            &[
                (SITE_LABEL, Some(APP_ROOT.to_string())),
                (addon.kind.label(), Some(listing_path(addon.kind, None))),
                (addon.name.as_str(), None),
            ],
        );
        doc.add(sel::ADDON_SUMMARY, Node::new("p", addon.summary.clone()));
        doc.add(sel::ABOUT_ADDON, Node::new("h2", "About this Add-on"));
        doc.add(
            sel::ADDON_DESCRIPTION,
            Node::new("div", addon.description.clone()),
        );

        let expanded = self.ui.expanded.contains("relnotes");
        doc.add(
            sel::RELNOTES_TOGGLE,
            Node::new("a", "Version Information")
                .attr("href", "#")
                .action(Action::Toggle("relnotes")),
        );
        doc.add(
            sel::RELNOTES_VERSION,
            Node::new("div", format!("Version {}", addon.version)).visible(expanded),
        );

        for tag in &addon.tags {
            doc.add(sel::TAGS, Node::link(*tag, format!("{APP_ROOT}tag/{tag}")));
        }
        for review in &addon.reviews {
            doc.add(sel::REVIEWS, Node::new("div", review.body.clone()));
            doc.add(
                sel::REVIEW_USERS,
                Node::link(review.reviewer, format!("{APP_ROOT}user/{}/", review.reviewer)),
            );
        }

        let others = self.catalog.by_same_authors(addon);
        if !others.is_empty() {
            let authors = addon.author_names();
            let label = match authors.as_slice() {
                [only] => format!("Other add-ons by {only}"),
                _ => "Other add-ons by these authors".to_string(),
            };
            doc.add(sel::OTHER_ADDONS_LABEL, Node::new("h2", label));
            for other in others {
                doc.add(
                    sel::OTHER_ADDONS,
                    Node::link(other.name.clone(), details_path(other)),
                );
            }
        }

        for i in 0..addon.previews {
            doc.add(
                sel::PREVIEWS,
                Node::new("a", "")
                    .attr("href", format!("/img/previews/{}-{i}.png", addon.slug))
                    .action(Action::ViewerOpen(i)),
            );
        }
        let open = self.ui.viewer;
        let (current, count) = open.unwrap_or((0, addon.previews));
        let shown = open.is_some();
        doc.add(sel::LIGHTBOX, Node::new("div", "").visible(shown));
        doc.add(
            sel::LIGHTBOX_IMAGE,
            Node::new("img", "")
                .attr("src", format!("/img/previews/{}-{current}.png", addon.slug))
                .visible(shown),
        );
        doc.add(
            sel::LIGHTBOX_CAPTION,
            Node::new(
                "span",
                format!("{} screenshot {} of {count}", addon.name, current + 1),
            )
            .visible(shown),
        );
        let control = |class: &str, action: Action, disabled: bool| {
            let class = if disabled {
                format!("control {class} disabled")
            } else {
                format!("control {class}")
            };
            Node::new("a", "")
                .attr("class", class)
                .attr("href", "#")
                .action(if disabled { Action::None } else { action })
                .visible(shown)
        };
        doc.add(
            sel::LIGHTBOX_NEXT,
            control("next", Action::ViewerNext, current + 1 >= count),
        );
        doc.add(
            sel::LIGHTBOX_PREV,
            control("prev", Action::ViewerPrev, current == 0),
        );
        doc.add(
            sel::LIGHTBOX_CLOSE,
            Node::new("a", "Close")
                .attr("href", "#")
                .action(Action::ViewerClose)
                .visible(shown),
        );
        doc
    }

    fn render_login(&self) -> Document {
        let mut doc = Document::new(title("User Login"));
        doc.add(sel::HEADING, Node::new("h1", "Log in"));
        doc.add(sel::LOGIN_EMAIL, Node::input("").attr("type", "email"));
        doc.add(sel::LOGIN_PASSWORD, Node::input("").attr("type", "password"));
        doc.add(
            sel::LOGIN_SUBMIT,
            Node::new("button", "Log in").action(Action::Login),
        );
        doc
    }

    fn render_user_edit(&self) -> Document {
        let mut doc = Document::new(title("Account Settings"));
        doc.add(sel::HEADING, Node::new("h1", "Account Settings"));
        let Some(account) = self.logged_in.and_then(|i| self.accounts.get(i)) else {
            return doc;
        };
        let profile = &account.profile;
        for (selector, value) in [
            (sel::EDIT_DISPLAY_NAME, &profile.display_name),
            (sel::EDIT_LOCATION, &profile.location),
            (sel::EDIT_OCCUPATION, &profile.occupation),
            (sel::EDIT_HOMEPAGE, &profile.homepage),
        ] {
            doc.add(selector, Node::input(value.clone()));
        }
        let mut checkbox = Node::input("")
            .attr("type", "checkbox")
            .action(Action::Check("emailhidden"));
        if self.effective_hide_email() {
            checkbox = checkbox.attr("checked", "checked");
        }
        doc.add(sel::EDIT_HIDE_EMAIL, checkbox);
        doc.add(
            sel::EDIT_SUBMIT,
            Node::new("button", "Update").action(Action::SubmitProfile),
        );
        doc
    }

    fn render_profile(&self, id: &str) -> Document {
        let account = id
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| self.accounts.get(i));
        if let Some(account) = account {
            let profile = &account.profile;
            let mut doc = Document::new(title(&profile.display_name));
            doc.add(
                sel::PROFILE_NAME,
                Node::new("h2", profile.display_name.clone()),
            );
            if !profile.hide_email || self.has_fault(Fault::ProfileLeaksEmail) {
                doc.add(
                    sel::PROFILE_EMAIL,
                    Node::new("a", account.credentials.email.clone())
                        .attr("href", format!("mailto:{}", account.credentials.email)),
                );
            }
            if !profile.location.is_empty() && !self.has_fault(Fault::ProfileDropsLocation) {
                doc.add(
                    sel::PROFILE_LOCATION,
                    Node::new("span", profile.location.clone()),
                );
            }
            return doc;
        }
        match reviewer_name(id) {
            Some(name) => {
                let mut doc = Document::new(title(name));
                doc.add(sel::PROFILE_NAME, Node::new("h2", name));
                doc
            }
            None => Self::render_not_found(),
        }
    }

    fn render_not_found() -> Document {
        let mut doc = Document::new(title("Page not found"));
        doc.add(
            sel::HEADING,
            Node::new("h1", "We're sorry, but we can't find what you're looking for."),
        );
        doc
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_routes() {
        assert_eq!(route("/en-US/firefox/"), Route::Home { app: "firefox" });
        assert_eq!(
            route("/en-US/firefox/extensions/?sort=users&page=2"),
            Route::Listing {
                kind: Kind::Extension,
                category: None
            }
        );
        assert_eq!(
            route("/en-US/firefox/complete-themes/os-integration/"),
            Route::Listing {
                kind: Kind::Theme,
                category: Some(6)
            }
        );
        assert_eq!(
            route("/en-US/firefox/complete-themes/no-such-thing/"),
            Route::NotFound
        );
        assert_eq!(
            route("/en-US/firefox/addon/tab-blocker/"),
            Route::Details {
                slug: "tab-blocker"
            }
        );
        assert!(requires_login("/en-US/firefox/users/edit"));
        assert!(!requires_login("/en-US/firefox/users/login"));
    }

    fn listing(site: &MockSite, query: &str) -> Document {
        site.render_listing(
            &format!("{APP_ROOT}extensions/{query}"),
            Kind::Extension,
            None,
        )
    }

    #[test]
    fn test_paginator_threshold() {
        for (count, present) in [(19, false), (20, true), (21, true)] {
            let site = MockSite::builder().extensions(count).build();
            let doc = listing(&site, "");
            assert_eq!(
                !doc.matches(sel::PAGINATOR).is_empty(),
                present,
                "{count} items"
            );
        }
    }

    #[test]
    fn test_disabled_controls_are_inert() {
        let site = MockSite::builder().extensions(21).build();
        let doc = listing(&site, "?sort=users");
        let prev = doc.nth(sel::PAGINATOR_PREV, 0).unwrap();
        assert_eq!(prev.action, Action::None);
        assert!(prev.get_attr("class").unwrap().contains("disabled"));
        let next = doc.nth(sel::PAGINATOR_NEXT, 0).unwrap();
        assert_eq!(
            next.action,
            Action::Go(format!("{APP_ROOT}extensions/?sort=users&page=2"))
        );
    }

    #[test]
    fn test_page_is_clamped() {
        let site = MockSite::new();
        let doc = listing(&site, "?sort=users&page=99");
        let position = doc.nth(sel::PAGINATOR_POSITION, 0).unwrap();
        assert_eq!(position.text, "Page 3 of 3");
        assert_eq!(doc.matches(sel::ITEMS).len(), 7);
    }

    #[test]
    fn test_sorter_marks_one_selected() {
        let site = MockSite::new();
        let doc = listing(&site, "?sort=created");
        assert_eq!(doc.matches(sel::SORTER_SELECTED).len(), 1);
        assert_eq!(doc.nth(sel::SORTER_SELECTED, 0).unwrap().text, "Newest");
    }

    #[test]
    fn test_theme_default_title() {
        let site = MockSite::new();
        let doc = site.render_listing(&format!("{APP_ROOT}complete-themes/"), Kind::Theme, None);
        assert_eq!(doc.title, "Most Popular Complete Themes :: Add-ons for Firefox");
        assert_eq!(doc.matches(sel::SIDE_CATEGORIES).len(), 9);
    }
}
