use async_trait::async_trait;

use crate::domain::{
    Category, CategoryDraft, NewPost, Page, PostChanges, PostOrder, PostQuery, PostRecord, Tag,
    TagDraft, User, Visibility,
};
use crate::error::RepoError;

/// Generic repository trait for lookups and deletes by primary key.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Author lookups. Accounts are managed elsewhere; posts only reference them.
#[async_trait]
pub trait UserRepository: BaseRepository<User, i64> {}

/// Category repository with listing, counting, and write methods.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, i64> {
    /// All categories, name ascending.
    async fn find_all(&self) -> Result<Vec<Category>, RepoError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError>;

    /// One page of categories annotated with their publicly visible post
    /// count, name ascending. Zero-count categories are included.
    async fn page_with_visible_counts(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<Page<(Category, u64)>, RepoError>;

    /// The categories with the most publicly visible posts, count descending.
    /// Categories without a visible post are excluded.
    async fn top_by_visible_posts(&self, limit: u64) -> Result<Vec<(Category, u64)>, RepoError>;

    /// Whether a slug is already taken, optionally ignoring one row.
    async fn slug_in_use(&self, slug: &str, exclude_id: Option<i64>) -> Result<bool, RepoError>;

    /// Slugs starting with the given base, for derived-slug disambiguation.
    async fn sibling_slugs(&self, base: &str) -> Result<Vec<String>, RepoError>;

    async fn create(&self, draft: CategoryDraft) -> Result<Category, RepoError>;

    async fn update(&self, id: i64, draft: CategoryDraft) -> Result<Category, RepoError>;
}

/// Tag repository. Mirrors the category repository, plus an existence count
/// used to validate tag id lists.
#[async_trait]
pub trait TagRepository: BaseRepository<Tag, i64> {
    /// All tags, name ascending.
    async fn find_all(&self) -> Result<Vec<Tag>, RepoError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError>;

    async fn page_with_visible_counts(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<Page<(Tag, u64)>, RepoError>;

    async fn top_by_visible_posts(&self, limit: u64) -> Result<Vec<(Tag, u64)>, RepoError>;

    async fn slug_in_use(&self, slug: &str, exclude_id: Option<i64>) -> Result<bool, RepoError>;

    async fn sibling_slugs(&self, base: &str) -> Result<Vec<String>, RepoError>;

    /// How many of the given ids exist.
    async fn count_by_ids(&self, ids: &[i64]) -> Result<u64, RepoError>;

    async fn create(&self, draft: TagDraft) -> Result<Tag, RepoError>;

    async fn update(&self, id: i64, draft: TagDraft) -> Result<Tag, RepoError>;
}

/// Post repository: the listing pipeline plus the write path.
///
/// Reads return [`PostRecord`]s with author, category, and tags attached.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Run the listing pipeline for one page of posts.
    async fn find_page(&self, query: &PostQuery) -> Result<Page<PostRecord>, RepoError>;

    /// Flat top-N slice in the given order, no pagination.
    async fn find_top(
        &self,
        visibility: Visibility,
        order: PostOrder,
        limit: u64,
    ) -> Result<Vec<PostRecord>, RepoError>;

    /// Look up one post by slug within the given audience. A draft is
    /// invisible to `Visibility::Public` even when the slug matches.
    async fn find_by_slug(
        &self,
        slug: &str,
        visibility: Visibility,
    ) -> Result<Option<PostRecord>, RepoError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<PostRecord>, RepoError>;

    /// Whether a slug is already taken, optionally ignoring one row.
    async fn slug_in_use(&self, slug: &str, exclude_id: Option<i64>) -> Result<bool, RepoError>;

    /// Slugs starting with the given base, for derived-slug disambiguation.
    async fn sibling_slugs(&self, base: &str) -> Result<Vec<String>, RepoError>;

    /// Insert the post and its tag associations in one transaction.
    async fn create(&self, draft: NewPost) -> Result<PostRecord, RepoError>;

    /// Apply the changes and, when a tag list is given, replace the tag
    /// associations wholesale in the same transaction.
    async fn update(&self, id: i64, changes: PostChanges) -> Result<PostRecord, RepoError>;

    async fn delete(&self, id: i64) -> Result<(), RepoError>;

    /// Atomically add one to the view counter.
    async fn increment_views(&self, id: i64) -> Result<(), RepoError>;
}
