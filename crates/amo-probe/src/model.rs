//! Typed values read off rendered pages.

use crate::result::{ProbeError, ProbeResult};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Date format used by listing and detail pages ("March 3, 2013")
pub const DATE_FORMAT: &str = "%B %d, %Y";

/// Items rendered per listing page
pub const PAGE_SIZE: usize = 20;

/// Ordering direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Non-decreasing
    Ascending,
    /// Non-increasing
    Descending,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "ascending"),
            Self::Descending => write!(f, "descending"),
        }
    }
}

/// Field of an [`ItemSummary`] that a sort orders by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortField {
    /// Add-on name, case-folded
    Name,
    /// Last update date
    Updated,
    /// Creation date
    Created,
    /// Weekly downloads
    Downloads,
    /// Average daily users
    Users,
}

/// Sort options offered by the listing sorter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    /// Featured add-ons first
    Featured,
    /// Most average daily users
    MostUsers,
    /// Highest rating
    TopRated,
    /// Most recently created
    Newest,
    /// Alphabetical by name
    Name,
    /// Most weekly downloads
    WeeklyDownloads,
    /// Most recently updated
    RecentlyUpdated,
    /// Trending
    UpAndComing,
}

impl SortKey {
    /// Every sort key, in sorter order
    pub const ALL: [Self; 8] = [
        Self::Featured,
        Self::MostUsers,
        Self::TopRated,
        Self::Newest,
        Self::Name,
        Self::WeeklyDownloads,
        Self::RecentlyUpdated,
        Self::UpAndComing,
    ];

    /// Label shown in the sorter
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Featured => "Featured",
            Self::MostUsers => "Most Users",
            Self::TopRated => "Top Rated",
            Self::Newest => "Newest",
            Self::Name => "Name",
            Self::WeeklyDownloads => "Weekly Downloads",
            Self::RecentlyUpdated => "Recently Updated",
            Self::UpAndComing => "Up & Coming",
        }
    }

    /// Value of the `sort` query parameter
    #[must_use]
    pub const fn query_value(self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::MostUsers => "users",
            Self::TopRated => "rating",
            Self::Newest => "created",
            Self::Name => "name",
            Self::WeeklyDownloads => "popular",
            Self::RecentlyUpdated => "updated",
            Self::UpAndComing => "hotness",
        }
    }

    /// The field and direction this key orders by, when that order is
    /// observable from the rendered summaries
    #[must_use]
    pub const fn ordering(self) -> Option<(SortField, Direction)> {
        match self {
            Self::MostUsers => Some((SortField::Users, Direction::Descending)),
            Self::Newest => Some((SortField::Created, Direction::Descending)),
            Self::Name => Some((SortField::Name, Direction::Ascending)),
            Self::WeeklyDownloads => Some((SortField::Downloads, Direction::Descending)),
            Self::RecentlyUpdated => Some((SortField::Updated, Direction::Descending)),
            Self::Featured | Self::TopRated | Self::UpAndComing => None,
        }
    }

    /// Look a key up by its query value
    #[must_use]
    pub fn from_query_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.query_value() == value)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn normalize_label(raw: &str) -> String {
    raw.to_lowercase()
        .replace('&', " and ")
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

impl FromStr for SortKey {
    type Err = ProbeError;

    /// Accepts the label ("Most Users"), a snake-case form ("most_users")
    /// or the query value ("users"), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        Self::ALL
            .into_iter()
            .find(|k| normalize_label(k.label()) == wanted || k.query_value() == wanted)
            .ok_or_else(|| ProbeError::parse("sort key", s))
    }
}

/// Explore filters in the home page side navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExploreFilter {
    /// Featured add-ons
    Featured,
    /// Most popular (by users)
    MostPopular,
    /// Top rated
    TopRated,
}

impl ExploreFilter {
    /// Every filter, in navigation order
    pub const ALL: [Self; 3] = [Self::Featured, Self::MostPopular, Self::TopRated];

    /// Link label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Featured => "Featured",
            Self::MostPopular => "Most Popular",
            Self::TopRated => "Top Rated",
        }
    }

    /// Sort the filter lands on
    #[must_use]
    pub const fn sort_key(self) -> SortKey {
        match self {
            Self::Featured => SortKey::Featured,
            Self::MostPopular => SortKey::MostUsers,
            Self::TopRated => SortKey::TopRated,
        }
    }
}

/// Immutable snapshot of one listing row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSummary {
    /// Add-on name
    pub name: String,
    /// Last update date
    pub updated: NaiveDate,
    /// Creation date
    pub created: NaiveDate,
    /// Weekly downloads
    pub downloads: u64,
    /// Average daily users
    pub users: u64,
}

/// Comparable key extracted from a summary
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SortValue {
    /// Case-folded text
    Text(String),
    /// Date
    Date(NaiveDate),
    /// Count
    Count(u64),
}

impl fmt::Display for SortValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Date(d) => write!(f, "{d}"),
            Self::Count(n) => write!(f, "{n}"),
        }
    }
}

impl ItemSummary {
    /// The value this summary contributes to an ordering on `field`
    #[must_use]
    pub fn key(&self, field: SortField) -> SortValue {
        match field {
            SortField::Name => SortValue::Text(self.name.to_lowercase()),
            SortField::Updated => SortValue::Date(self.updated),
            SortField::Created => SortValue::Date(self.created),
            SortField::Downloads => SortValue::Count(self.downloads),
            SortField::Users => SortValue::Count(self.users),
        }
    }
}

/// Items of one listing page as currently rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingSnapshot {
    /// Rows in display order
    pub items: Vec<ItemSummary>,
    /// 1-based page index
    pub page: usize,
    /// Number of pages
    pub total_pages: usize,
    /// Active sort
    pub sort: Option<SortKey>,
}

impl ListingSnapshot {
    /// Names in display order
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.items.iter().map(|i| i.name.clone()).collect()
    }

    /// Keys for `field` in display order
    #[must_use]
    pub fn keys(&self, field: SortField) -> Vec<SortValue> {
        self.items.iter().map(|i| i.key(field)).collect()
    }

    /// Whether this is the first page
    #[must_use]
    pub const fn is_first(&self) -> bool {
        self.page <= 1
    }

    /// Whether this is the last page
    #[must_use]
    pub const fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }
}

/// One entry of a breadcrumb trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    /// Visible label
    pub label: String,
    /// Link target; the current page's crumb has none
    pub href: Option<String>,
}

fn count_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d[\d,]*)").expect("static regex"))
}

fn date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([A-Z][a-z]+ \d{1,2}, \d{4})").expect("static regex"))
}

fn position_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)\s+of\s+(\d+)").expect("static regex"))
}

/// Parse the first grouped number in text such as "12,345 users"
pub fn parse_count(text: &str) -> ProbeResult<u64> {
    count_re()
        .captures(text)
        .and_then(|c| c[1].replace(',', "").parse().ok())
        .ok_or_else(|| ProbeError::parse("count", text))
}

/// Parse the date in text such as "Updated March 3, 2013"
pub fn parse_date(text: &str) -> ProbeResult<NaiveDate> {
    date_re()
        .captures(text)
        .and_then(|c| NaiveDate::parse_from_str(&c[1], DATE_FORMAT).ok())
        .ok_or_else(|| ProbeError::parse("date", text))
}

/// Parse "Page 2 of 3" (or "screenshot 2 of 3") into `(2, 3)`
pub fn parse_position(text: &str) -> ProbeResult<(usize, usize)> {
    position_re()
        .captures(text)
        .and_then(|c| Some((c[1].parse().ok()?, c[2].parse().ok()?)))
        .filter(|&(page, total)| page >= 1 && page <= total)
        .ok_or_else(|| ProbeError::parse("page position", text))
}

/// Format a count the way listings render it ("12,345")
#[must_use]
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a date the way listings render it ("March 3, 2013")
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Value of a query parameter in a URL
#[must_use]
pub fn query_param<'a>(url: &'a str, name: &str) -> Option<&'a str> {
    let query = url.split_once('?')?.1;
    let query = query.split('#').next().unwrap_or(query);
    query.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
        (k == name).then_some(v)
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod sort_key_tests {
        use super::*;

        #[test]
        fn test_parse_variants() {
            assert_eq!("most_users".parse::<SortKey>().unwrap(), SortKey::MostUsers);
            assert_eq!("Most Users".parse::<SortKey>().unwrap(), SortKey::MostUsers);
            assert_eq!("users".parse::<SortKey>().unwrap(), SortKey::MostUsers);
            assert_eq!(
                "recently updated".parse::<SortKey>().unwrap(),
                SortKey::RecentlyUpdated
            );
            assert_eq!(
                "up and coming".parse::<SortKey>().unwrap(),
                SortKey::UpAndComing
            );
            assert_eq!("Up & Coming".parse::<SortKey>().unwrap(), SortKey::UpAndComing);
            assert_eq!(
                "weekly downloads".parse::<SortKey>().unwrap(),
                SortKey::WeeklyDownloads
            );
            assert!("loudest".parse::<SortKey>().is_err());
        }

        #[test]
        fn test_query_value_round_trip() {
            for key in SortKey::ALL {
                assert_eq!(SortKey::from_query_value(key.query_value()), Some(key));
            }
        }

        #[test]
        fn test_orderings() {
            assert_eq!(
                SortKey::Name.ordering(),
                Some((SortField::Name, Direction::Ascending))
            );
            assert_eq!(SortKey::Featured.ordering(), None);
        }
    }

    mod parse_tests {
        use super::*;

        #[test]
        fn test_parse_count() {
            assert_eq!(parse_count("12,345 users").unwrap(), 12_345);
            assert_eq!(parse_count("7 weekly downloads").unwrap(), 7);
            assert!(parse_count("no users").is_err());
        }

        #[test]
        fn test_parse_date() {
            let d = parse_date("Updated March 3, 2013").unwrap();
            assert_eq!(d, NaiveDate::from_ymd_opt(2013, 3, 3).unwrap());
            let d = parse_date("Added December 25, 2011").unwrap();
            assert_eq!(d, NaiveDate::from_ymd_opt(2011, 12, 25).unwrap());
            assert!(parse_date("Updated recently").is_err());
        }

        #[test]
        fn test_format_date_parses_back() {
            let d = NaiveDate::from_ymd_opt(2012, 7, 4).unwrap();
            assert_eq!(format_date(d), "July 4, 2012");
            assert_eq!(parse_date(&format_date(d)).unwrap(), d);
        }

        #[test]
        fn test_format_count() {
            assert_eq!(format_count(0), "0");
            assert_eq!(format_count(999), "999");
            assert_eq!(format_count(1_000), "1,000");
            assert_eq!(format_count(1_234_567), "1,234,567");
        }

        #[test]
        fn test_parse_position() {
            assert_eq!(parse_position("Page 2 of 3").unwrap(), (2, 3));
            assert_eq!(parse_position("Tab Helper screenshot 1 of 3").unwrap(), (1, 3));
            assert!(parse_position("Page two").is_err());
            assert!(parse_position("Page 0 of 3").is_err());
            assert!(parse_position("Page 4 of 3").is_err());
            assert!(parse_position("Page 1 of 0").is_err());
        }

        #[test]
        fn test_query_param() {
            let url = "https://x.test/en-US/firefox/extensions/?sort=users&page=2";
            assert_eq!(query_param(url, "sort"), Some("users"));
            assert_eq!(query_param(url, "page"), Some("2"));
            assert_eq!(query_param(url, "missing"), None);
            assert_eq!(query_param("https://x.test/", "sort"), None);
        }
    }

    mod snapshot_tests {
        use super::*;

        fn item(name: &str, users: u64) -> ItemSummary {
            let d = NaiveDate::from_ymd_opt(2013, 1, 1).unwrap();
            ItemSummary {
                name: name.into(),
                updated: d,
                created: d,
                downloads: 0,
                users,
            }
        }

        #[test]
        fn test_keys_fold_case() {
            let snap = ListingSnapshot {
                items: vec![item("Beta", 2), item("alpha", 1)],
                page: 1,
                total_pages: 1,
                sort: None,
            };
            assert_eq!(
                snap.keys(SortField::Name),
                vec![SortValue::Text("beta".into()), SortValue::Text("alpha".into())]
            );
            assert_eq!(snap.names(), vec!["Beta", "alpha"]);
            assert!(snap.is_first() && snap.is_last());
        }
    }
}
