use serde::{Deserialize, Serialize};

/// Default number of posts per listing page.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Categories per page on the public category index.
pub const CATEGORY_INDEX_PAGE_SIZE: u64 = 12;

/// Tags per page on the public tag index.
pub const TAG_INDEX_PAGE_SIZE: u64 = 12;

/// Home page preview sizes.
pub const HOME_POPULAR_POSTS: u64 = 6;
pub const HOME_RECENT_POSTS: u64 = 3;
pub const HOME_TOP_CATEGORIES: u64 = 8;
pub const HOME_TOP_TAGS: u64 = 12;

/// Which audience a post query serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Published posts with a publish timestamp only.
    Public,
    /// Every post regardless of state.
    All,
}

/// Sort order for post listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostOrder {
    /// Publish timestamp descending.
    Recent,
    /// View count descending.
    Popular,
}

/// A filtered, ordered, paginated view over posts.
///
/// The audience is always explicit: handlers construct either a public or a
/// management query and hand it down, never relying on ambient state.
#[derive(Debug, Clone)]
pub struct PostQuery {
    pub visibility: Visibility,
    /// Case-insensitive substring matched against title, excerpt, or content.
    pub search: Option<String>,
    /// Exact category slug.
    pub category_slug: Option<String>,
    /// Exact tag slug; a post matches when any of its tags carries it.
    pub tag_slug: Option<String>,
    pub order: PostOrder,
    /// 1-indexed page number.
    pub page: u64,
    pub per_page: u64,
}

impl PostQuery {
    /// Query for the public surface: visible posts, newest first.
    pub fn public() -> Self {
        Self {
            visibility: Visibility::Public,
            search: None,
            category_slug: None,
            tag_slug: None,
            order: PostOrder::Recent,
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }

    /// Query for the management surface: every post, newest first.
    pub fn management() -> Self {
        Self {
            visibility: Visibility::All,
            ..Self::public()
        }
    }
}

/// One page of results with the counts needed to render pagination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: u64,
    pub per_page: u64,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, current_page: u64, per_page: u64, total: u64) -> Self {
        Self {
            items,
            current_page,
            per_page,
            total,
        }
    }

    /// Total number of pages. Never less than 1, even with no matches.
    pub fn last_page(&self) -> u64 {
        self.total.div_ceil(self.per_page.max(1)).max(1)
    }

    /// Map the items while keeping the pagination metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            current_page: self.current_page,
            per_page: self.per_page,
            total: self.total,
        }
    }
}
