//! Domain entities - the core business objects.

mod category;
mod post;
mod query;
mod tag;
mod user;

pub use category::{Category, CategoryDraft, DEFAULT_CATEGORY_COLOR};
pub use post::{NewPost, Post, PostChanges, PostRecord, PostStatus, reading_time};
pub use query::{
    CATEGORY_INDEX_PAGE_SIZE, DEFAULT_PAGE_SIZE, HOME_POPULAR_POSTS, HOME_RECENT_POSTS,
    HOME_TOP_CATEGORIES, HOME_TOP_TAGS, Page, PostOrder, PostQuery, TAG_INDEX_PAGE_SIZE,
    Visibility,
};
pub use tag::{DEFAULT_TAG_COLOR, Tag, TagDraft};
pub use user::User;
