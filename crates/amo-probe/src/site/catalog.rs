//! Deterministic add-on catalog behind the mock site.

use crate::model::{SortKey, PAGE_SIZE};
use chrono::{Duration, NaiveDate};

pub(crate) const EXTENSION_CATEGORIES: [&str; 14] = [
    "Alerts & Updates",
    "Appearance",
    "Bookmarks",
    "Download Management",
    "Feeds, News & Blogging",
    "Games & Entertainment",
    "Language Support",
    "Photos, Music & Videos",
    "Privacy & Security",
    "Shopping",
    "Social & Communication",
    "Tabs",
    "Web Development",
    "Other",
];

pub(crate) const THEME_CATEGORIES: [&str; 9] = [
    "Animals",
    "Compact",
    "Large",
    "Miscellaneous",
    "Modern",
    "Nature",
    "OS Integration",
    "Retro",
    "Sports",
];

const EXTENSION_WORDS: ([&str; 12], [&str; 9]) = (
    [
        "Ad", "Tab", "Web", "Color", "Dark", "Quick", "Smart", "Secure", "Fast", "Zen", "mini",
        "ultra",
    ],
    [
        "Blocker", "Manager", "Helper", "Toolkit", "Notes", "Sync", "Reader", "Search",
        "Switcher",
    ],
);

const THEME_WORDS: ([&str; 11], [&str; 6]) = (
    [
        "Autumn", "Blue", "Crimson", "Desert", "ember", "Forest", "Glacier", "Harbor", "Ivory",
        "Jade", "Lunar",
    ],
    ["Sky", "Night", "Dream", "Wave", "Glow", "Mist"],
);

const AUTHORS: [&str; 8] = [
    "Joe Hewitt",
    "Rob Campbell",
    "Anna Kowalska",
    "Mateo Ruiz",
    "Priya Natarajan",
    "Lena Fischer",
    "Tomás Oliveira",
    "Kenji Sato",
];

const REVIEWERS: [&str; 6] = [
    "firefox-fan",
    "tabhoarder",
    "quietreader",
    "devtools-dan",
    "night-owl",
    "pixelpusher",
];

const TAGS: [&str; 8] = [
    "privacy",
    "productivity",
    "tabs",
    "developer",
    "dark",
    "search",
    "social",
    "minimal",
];

pub(crate) const COLLECTIONS: [&str; 4] = [
    "Privacy Matters",
    "Tab Tamers",
    "Web Developer's Toolbox",
    "Reading Made Easy",
];

/// Kind of add-on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Kind {
    Extension,
    Theme,
}

impl Kind {
    pub const fn section(self) -> &'static str {
        match self {
            Self::Extension => "extensions",
            Self::Theme => "complete-themes",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Extension => "Extensions",
            Self::Theme => "Complete Themes",
        }
    }

    pub const fn default_sort(self) -> SortKey {
        match self {
            Self::Extension => SortKey::Featured,
            Self::Theme => SortKey::MostUsers,
        }
    }

    pub fn categories(self) -> &'static [&'static str] {
        match self {
            Self::Extension => &EXTENSION_CATEGORIES,
            Self::Theme => &THEME_CATEGORIES,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Review {
    pub reviewer: &'static str,
    pub body: String,
}

#[derive(Debug, Clone)]
pub(crate) struct Addon {
    pub slug: String,
    pub name: String,
    pub kind: Kind,
    pub category: usize,
    pub created: NaiveDate,
    pub updated: NaiveDate,
    pub downloads: u64,
    pub users: u64,
    pub rating: u64,
    pub hotness: u64,
    pub featured: bool,
    pub authors: Vec<usize>,
    pub summary: String,
    pub description: String,
    pub version: String,
    pub tags: Vec<&'static str>,
    pub previews: usize,
    pub reviews: Vec<Review>,
}

impl Addon {
    pub fn author_names(&self) -> Vec<&'static str> {
        self.authors.iter().map(|&a| AUTHORS[a]).collect()
    }
}

/// splitmix64 over the item index; stable across runs and platforms
fn mix(i: usize, salt: u64) -> u64 {
    let mut z = (i as u64)
        .wrapping_add(salt)
        .wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn name_for<const A: usize, const N: usize>(words: &([&str; A], [&str; N]), i: usize) -> String {
    let base = format!("{} {}", words.0[i % A], words.1[(i / A) % N]);
    if i < A * N {
        base
    } else {
        format!("{base} {}", i / (A * N) + 1)
    }
}

pub(crate) fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

#[derive(Debug, Clone)]
pub(crate) struct Catalog {
    pub addons: Vec<Addon>,
}

impl Catalog {
    pub fn generate(extensions: usize, themes: usize) -> Self {
        let epoch = NaiveDate::from_ymd_opt(2010, 1, 1).unwrap_or_default();
        let mut addons = Vec::with_capacity(extensions + themes);

        for (kind, count) in [(Kind::Extension, extensions), (Kind::Theme, themes)] {
            for i in 0..count {
                let name = match kind {
                    Kind::Extension => name_for(&EXTENSION_WORDS, i),
                    Kind::Theme => name_for(&THEME_WORDS, i),
                };
                let salt = match kind {
                    Kind::Extension => 0,
                    Kind::Theme => 0x5EED,
                };
                let created = epoch + Duration::days((mix(i, salt) % 1_200) as i64);
                let updated = created + Duration::days((mix(i, salt + 1) % 600) as i64);
                let mut authors = vec![i % AUTHORS.len()];
                if i % 5 == 0 {
                    authors.push((i + 3) % AUTHORS.len());
                }
                let version = format!("{}.{}.{}", 1 + i % 3, i % 10, i % 7);
                let previews = match kind {
                    Kind::Extension => 3,
                    Kind::Theme => 1,
                };
                let reviews = (0..2)
                    .map(|r| Review {
                        reviewer: REVIEWERS[(i + r * 3) % REVIEWERS.len()],
                        body: format!("Review {} of {name}: does what it says.", r + 1),
                    })
                    .collect();
                addons.push(Addon {
                    slug: slugify(&name),
                    summary: format!("{name} keeps your browser tidy and quick every day."),
                    description: format!(
                        "{name} is maintained by volunteers. It works on every page you open \
                         and respects your privacy settings."
                    ),
                    name,
                    kind,
                    category: i % kind.categories().len(),
                    created,
                    updated,
                    // Coarse buckets so equal keys show up on every page.
                    downloads: (mix(i, salt + 2) % 300) * 10,
                    users: (mix(i, salt + 3) % 40) * 250,
                    rating: 10 + mix(i, salt + 4) % 41,
                    hotness: mix(i, salt + 5) % 10_000,
                    featured: i % 3 == 0,
                    authors,
                    version,
                    tags: vec![TAGS[i % TAGS.len()], TAGS[(i + 3) % TAGS.len()]],
                    previews,
                    reviews,
                });
            }
        }

        Self { addons }
    }

    pub fn by_slug(&self, slug: &str) -> Option<&Addon> {
        self.addons.iter().find(|a| a.slug == slug)
    }

    /// Add-ons of `kind` (optionally one category) in `sort` order
    pub fn listing(&self, kind: Kind, category: Option<usize>, sort: SortKey) -> Vec<&Addon> {
        let mut items: Vec<&Addon> = self
            .addons
            .iter()
            .filter(|a| a.kind == kind && category.map_or(true, |c| a.category == c))
            .collect();
        let by_name = |a: &&Addon, b: &&Addon| a.name.to_lowercase().cmp(&b.name.to_lowercase());
        items.sort_by(|a, b| {
            let primary = match sort {
                SortKey::Featured => b.featured.cmp(&a.featured).then(b.users.cmp(&a.users)),
                SortKey::MostUsers => b.users.cmp(&a.users),
                SortKey::TopRated => b.rating.cmp(&a.rating),
                SortKey::Newest => b.created.cmp(&a.created),
                SortKey::Name => std::cmp::Ordering::Equal,
                SortKey::WeeklyDownloads => b.downloads.cmp(&a.downloads),
                SortKey::RecentlyUpdated => b.updated.cmp(&a.updated),
                SortKey::UpAndComing => b.hotness.cmp(&a.hotness),
            };
            primary.then_with(|| by_name(a, b))
        });
        items
    }

    /// Other add-ons sharing an author with `addon`
    pub fn by_same_authors(&self, addon: &Addon) -> Vec<&Addon> {
        self.addons
            .iter()
            .filter(|a| {
                a.slug != addon.slug
                    && a.kind == addon.kind
                    && a.authors.iter().any(|x| addon.authors.contains(x))
            })
            .take(6)
            .collect()
    }
}

/// Number of listing pages for `count` items
pub(crate) const fn page_count(count: usize) -> usize {
    if count == 0 {
        1
    } else {
        count.div_ceil(PAGE_SIZE)
    }
}

pub(crate) fn reviewer_name(slug: &str) -> Option<&'static str> {
    REVIEWERS.iter().copied().find(|r| *r == slug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_and_slugs_unique() {
        let catalog = Catalog::generate(150, 80);
        let names: HashSet<_> = catalog.addons.iter().map(|a| a.name.as_str()).collect();
        let slugs: HashSet<_> = catalog.addons.iter().map(|a| a.slug.as_str()).collect();
        assert_eq!(names.len(), 230);
        assert_eq!(slugs.len(), 230);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = Catalog::generate(30, 10);
        let b = Catalog::generate(30, 10);
        let users_a: Vec<_> = a.addons.iter().map(|x| x.users).collect();
        let users_b: Vec<_> = b.addons.iter().map(|x| x.users).collect();
        assert_eq!(users_a, users_b);
    }

    #[test]
    fn test_listing_sorted_by_users() {
        let catalog = Catalog::generate(47, 0);
        let items = catalog.listing(Kind::Extension, None, SortKey::MostUsers);
        assert_eq!(items.len(), 47);
        assert!(items.windows(2).all(|w| w[0].users >= w[1].users));
    }

    #[test]
    fn test_featured_first() {
        let catalog = Catalog::generate(30, 0);
        let items = catalog.listing(Kind::Extension, None, SortKey::Featured);
        let first_plain = items.iter().position(|a| !a.featured).unwrap_or(items.len());
        assert!(items[first_plain..].iter().all(|a| !a.featured));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Feeds, News & Blogging"), "feeds-news-blogging");
        assert_eq!(slugify("OS Integration"), "os-integration");
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0), 1);
        assert_eq!(page_count(19), 1);
        assert_eq!(page_count(20), 1);
        assert_eq!(page_count(21), 2);
        assert_eq!(page_count(47), 3);
    }
}
