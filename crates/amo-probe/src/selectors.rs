//! CSS selectors for the marketplace markup.
//!
//! Page objects query these; the mock site renders under the same strings.

// Header
pub const LOGO: &str = "#masthead h1 a";
pub const SITE_NAV_MENUS: &str = "#site-nav > li > a";
pub const OTHER_APPS: &str = "#other-apps > a";
pub const OTHER_APPS_DROPDOWN: &str = "#other-apps ul";
pub const OTHER_APPS_LINKS: &str = "#other-apps ul li a";
pub const LOGIN_LINK: &str = "#aux-nav .account a.login";
pub const REGISTER_LINK: &str = "#aux-nav .account a.register";
pub const ACCOUNT_USER: &str = "#aux-nav .account a.user";
pub const ACCOUNT_MENU: &str = "#aux-nav .account ul";
pub const EDIT_PROFILE_LINK: &str = "#aux-nav .account ul a.edit-profile";
pub const VIEW_PROFILE_LINK: &str = "#aux-nav .account ul a.view-profile";
pub const LOGOUT_LINK: &str = "#aux-nav .account ul a.logout";
pub const SEARCH_INPUT: &str = "#search-q";
pub const SEARCH_BUTTON: &str = "#search .search-button";

// Shared
pub const BREADCRUMBS: &str = "#breadcrumbs li";
pub const BREADCRUMB_LINKS: &str = "#breadcrumbs li a";
pub const HEADING: &str = "#page h1";
pub const SIDE_CATEGORIES: &str = "#side-categories li a";
pub const NOTICE_SUCCESS: &str = ".notification-box.success";
pub const NOTICE_ERROR: &str = ".notification-box.error";

// Home
pub const PROMOS: &str = "#promos";
pub const POPULAR_NAMES: &str = "#popular-extensions li .name";
pub const POPULAR_USERS: &str = "#popular-extensions li .users";
pub const FEATURED_EXTENSIONS: &str = "#featured-extensions .item h3 a";
pub const FEATURED_EXTENSIONS_SEE_ALL: &str = "#featured-extensions .seeall";
pub const FEATURED_THEMES: &str = "#featured-themes li a";
pub const FEATURED_THEMES_SEE_ALL: &str = "#featured-themes .seeall";
pub const FEATURED_COLLECTIONS: &str = "#featured-collections li";
pub const UP_AND_COMING: &str = "#upandcoming .item";
pub const EXPLORE_LINKS: &str = "#side-nav .explore li a";

// Listing
pub const ITEMS: &str = ".items .item";
pub const ITEM_NAMES: &str = ".items .item h3 a";
pub const ITEM_UPDATED: &str = ".items .item .meta .updated";
pub const ITEM_CREATED: &str = ".items .item .meta .created";
pub const ITEM_DOWNLOADS: &str = ".items .item .meta .downloads";
pub const ITEM_USERS: &str = ".items .item .meta .adu";
pub const SORTER_OPTIONS: &str = "#sorter li a";
pub const SORTER_SELECTED: &str = "#sorter li.selected a";
pub const SUBSCRIBE: &str = "#subscribe";
pub const SIDE_EXPLORE_SELECTED: &str = "#side-explore li.selected a";
pub const PAGINATOR: &str = ".paginator";
pub const PAGINATOR_FIRST: &str = ".paginator .rel a.first";
pub const PAGINATOR_PREV: &str = ".paginator .rel a.prev";
pub const PAGINATOR_NEXT: &str = ".paginator .rel a.next";
pub const PAGINATOR_LAST: &str = ".paginator .rel a.last";
pub const PAGINATOR_POSITION: &str = ".paginator .pos";

// Details
pub const ADDON_NAME: &str = "#addon h1 .name";
pub const ADDON_VERSION: &str = "#addon h1 .version";
pub const ADDON_SUMMARY: &str = "#addon-summary p";
pub const ABOUT_ADDON: &str = "#about-addon h2";
pub const ADDON_DESCRIPTION: &str = "#addon-description";
pub const RELNOTES_TOGGLE: &str = "#detail-relnotes h2 a";
pub const RELNOTES_VERSION: &str = "#detail-relnotes .version-number";
pub const TAGS: &str = "#tagbox li a";
pub const REVIEWS: &str = "#reviews .review";
pub const REVIEW_USERS: &str = "#reviews .review .byline a";
pub const OTHER_ADDONS_LABEL: &str = ".other-author-addons h2";
pub const OTHER_ADDONS: &str = ".other-author-addons li a";
pub const PREVIEWS: &str = "#preview li a.screenshot";
pub const LIGHTBOX: &str = "#lightbox";
pub const LIGHTBOX_IMAGE: &str = "#lightbox .content img";
pub const LIGHTBOX_CAPTION: &str = "#lightbox .caption span";
pub const LIGHTBOX_NEXT: &str = "#lightbox .control.next";
pub const LIGHTBOX_PREV: &str = "#lightbox .control.prev";
pub const LIGHTBOX_CLOSE: &str = "#lightbox .close";

// Account
pub const LOGIN_EMAIL: &str = "#id_username";
pub const LOGIN_PASSWORD: &str = "#id_password";
pub const LOGIN_SUBMIT: &str = "#login-submit";
pub const EDIT_DISPLAY_NAME: &str = "#id_display_name";
pub const EDIT_LOCATION: &str = "#id_location";
pub const EDIT_OCCUPATION: &str = "#id_occupation";
pub const EDIT_HOMEPAGE: &str = "#id_homepage";
pub const EDIT_HIDE_EMAIL: &str = "#id_emailhidden";
pub const EDIT_SUBMIT: &str = "#user-edit button.update";
pub const PROFILE_NAME: &str = ".vcard h2.fn";
pub const PROFILE_EMAIL: &str = ".vcard .email";
pub const PROFILE_LOCATION: &str = ".vcard .location";
