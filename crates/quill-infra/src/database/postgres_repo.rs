//! PostgreSQL category, tag, and user repositories.

use async_trait::async_trait;
use sea_orm::sea_query::{Alias, Condition, Expr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, FromQueryResult, IntoActiveModel, Iterable,
    JoinType, NotSet, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationDef,
    RelationTrait, Select, Set,
};

use quill_core::domain::{Category, CategoryDraft, Page, PostStatus, Tag, TagDraft};
use quill_core::error::RepoError;
use quill_core::ports::{CategoryRepository, TagRepository, UserRepository};

use super::entity::{category, post, tag, user};
use super::post_repo::escape_like;
use super::postgres_base::{PostgresBaseRepository, constraint_or_query};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<user::Entity>;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<category::Entity>;

/// PostgreSQL tag repository.
pub type PostgresTagRepository = PostgresBaseRepository<tag::Entity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {}

/// Category row annotated with its visible-post count.
#[derive(Debug, FromQueryResult)]
struct CategoryCountRow {
    id: i64,
    name: String,
    slug: String,
    description: Option<String>,
    color: String,
    created_at: sea_orm::prelude::DateTimeWithTimeZone,
    updated_at: sea_orm::prelude::DateTimeWithTimeZone,
    posts_count: i64,
}

impl CategoryCountRow {
    fn into_pair(self) -> (Category, u64) {
        let count = self.posts_count.max(0) as u64;
        (
            Category {
                id: self.id,
                name: self.name,
                slug: self.slug,
                description: self.description,
                color: self.color,
                created_at: self.created_at.into(),
                updated_at: self.updated_at.into(),
            },
            count,
        )
    }
}

/// Tag row annotated with its visible-post count.
#[derive(Debug, FromQueryResult)]
struct TagCountRow {
    id: i64,
    name: String,
    slug: String,
    color: String,
    created_at: sea_orm::prelude::DateTimeWithTimeZone,
    updated_at: sea_orm::prelude::DateTimeWithTimeZone,
    posts_count: i64,
}

impl TagCountRow {
    fn into_pair(self) -> (Tag, u64) {
        let count = self.posts_count.max(0) as u64;
        (
            Tag {
                id: self.id,
                name: self.name,
                slug: self.slug,
                color: self.color,
                created_at: self.created_at.into(),
                updated_at: self.updated_at.into(),
            },
            count,
        )
    }
}

/// Join to posts restricted to the publicly visible ones. The restriction
/// lives in the join condition: with a LEFT JOIN, categories keep a zero
/// count; with an INNER JOIN, they drop out entirely.
fn visible_posts_join() -> RelationDef {
    category::Relation::Post.def().on_condition(|_left, right| {
        Condition::all()
            .add(
                Expr::col((right.clone(), post::Column::Status))
                    .eq(PostStatus::Published.as_str()),
            )
            .add(Expr::col((right, post::Column::PublishedAt)).is_not_null())
    })
}

/// Same join for tags, through the junction table.
fn visible_posts_join_for_tags() -> (RelationDef, RelationDef) {
    let to_junction = super::entity::post_tag::Relation::Tag.def().rev();
    let to_posts = super::entity::post_tag::Relation::Post
        .def()
        .on_condition(|_left, right| {
            Condition::all()
                .add(
                    Expr::col((right.clone(), post::Column::Status))
                        .eq(PostStatus::Published.as_str()),
                )
                .add(Expr::col((right, post::Column::PublishedAt)).is_not_null())
        });
    (to_junction, to_posts)
}

/// Categories with their visible-post counts.
pub(crate) fn categories_with_counts(join: JoinType) -> Select<category::Entity> {
    category::Entity::find()
        .join(join, visible_posts_join())
        .select_only()
        .columns(category::Column::iter())
        .column_as(post::Column::Id.count(), "posts_count")
        .group_by(category::Column::Id)
}

/// Tags with their visible-post counts.
pub(crate) fn tags_with_counts(join: JoinType) -> Select<tag::Entity> {
    let (to_junction, to_posts) = visible_posts_join_for_tags();
    tag::Entity::find()
        .join(join, to_junction)
        .join(join, to_posts)
        .select_only()
        .columns(tag::Column::iter())
        .column_as(post::Column::Id.count(), "posts_count")
        .group_by(tag::Column::Id)
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn find_all(&self) -> Result<Vec<Category>, RepoError> {
        let result = category::Entity::find()
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        let result = category::Entity::find()
            .filter(category::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn page_with_visible_counts(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<Page<(Category, u64)>, RepoError> {
        let per_page = per_page.max(1);
        let paginator = categories_with_counts(JoinType::LeftJoin)
            .order_by_asc(category::Column::Name)
            .into_model::<CategoryCountRow>()
            .paginate(&self.db, per_page);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;
        let rows = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(Page::new(
            rows.into_iter().map(CategoryCountRow::into_pair).collect(),
            page.max(1),
            per_page,
            total,
        ))
    }

    async fn top_by_visible_posts(&self, limit: u64) -> Result<Vec<(Category, u64)>, RepoError> {
        let rows = categories_with_counts(JoinType::InnerJoin)
            .order_by_desc(Expr::col(Alias::new("posts_count")))
            .order_by_asc(category::Column::Name)
            .limit(limit)
            .into_model::<CategoryCountRow>()
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(rows.into_iter().map(CategoryCountRow::into_pair).collect())
    }

    async fn slug_in_use(&self, slug: &str, exclude_id: Option<i64>) -> Result<bool, RepoError> {
        let mut select = category::Entity::find().filter(category::Column::Slug.eq(slug));
        if let Some(id) = exclude_id {
            select = select.filter(category::Column::Id.ne(id));
        }

        let count = select
            .count(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;
        Ok(count > 0)
    }

    async fn sibling_slugs(&self, base: &str) -> Result<Vec<String>, RepoError> {
        let pattern = format!("{}%", escape_like(base));
        category::Entity::find()
            .select_only()
            .column(category::Column::Slug)
            .filter(category::Column::Slug.like(pattern))
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))
    }

    async fn create(&self, draft: CategoryDraft) -> Result<Category, RepoError> {
        let now = chrono::Utc::now();
        let model = category::ActiveModel {
            id: NotSet,
            name: Set(draft.name),
            slug: Set(draft.slug),
            description: Set(draft.description),
            color: Set(draft.color),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&self.db)
        .await
        .map_err(constraint_or_query)?;

        Ok(model.into())
    }

    async fn update(&self, id: i64, draft: CategoryDraft) -> Result<Category, RepoError> {
        let current = category::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?
            .ok_or(RepoError::NotFound)?;

        let mut model = current.into_active_model();
        model.name = Set(draft.name);
        model.slug = Set(draft.slug);
        model.description = Set(draft.description);
        model.color = Set(draft.color);
        model.updated_at = Set(chrono::Utc::now().into());

        let model = model.update(&self.db).await.map_err(constraint_or_query)?;
        Ok(model.into())
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn find_all(&self) -> Result<Vec<Tag>, RepoError> {
        let result = tag::Entity::find()
            .order_by_asc(tag::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError> {
        let result = tag::Entity::find()
            .filter(tag::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn page_with_visible_counts(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<Page<(Tag, u64)>, RepoError> {
        let per_page = per_page.max(1);
        let paginator = tags_with_counts(JoinType::LeftJoin)
            .order_by_asc(tag::Column::Name)
            .into_model::<TagCountRow>()
            .paginate(&self.db, per_page);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;
        let rows = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(Page::new(
            rows.into_iter().map(TagCountRow::into_pair).collect(),
            page.max(1),
            per_page,
            total,
        ))
    }

    async fn top_by_visible_posts(&self, limit: u64) -> Result<Vec<(Tag, u64)>, RepoError> {
        let rows = tags_with_counts(JoinType::InnerJoin)
            .order_by_desc(Expr::col(Alias::new("posts_count")))
            .order_by_asc(tag::Column::Name)
            .limit(limit)
            .into_model::<TagCountRow>()
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(rows.into_iter().map(TagCountRow::into_pair).collect())
    }

    async fn slug_in_use(&self, slug: &str, exclude_id: Option<i64>) -> Result<bool, RepoError> {
        let mut select = tag::Entity::find().filter(tag::Column::Slug.eq(slug));
        if let Some(id) = exclude_id {
            select = select.filter(tag::Column::Id.ne(id));
        }

        let count = select
            .count(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;
        Ok(count > 0)
    }

    async fn sibling_slugs(&self, base: &str) -> Result<Vec<String>, RepoError> {
        let pattern = format!("{}%", escape_like(base));
        tag::Entity::find()
            .select_only()
            .column(tag::Column::Slug)
            .filter(tag::Column::Slug.like(pattern))
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))
    }

    async fn count_by_ids(&self, ids: &[i64]) -> Result<u64, RepoError> {
        if ids.is_empty() {
            return Ok(0);
        }

        tag::Entity::find()
            .filter(tag::Column::Id.is_in(ids.iter().copied()))
            .count(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))
    }

    async fn create(&self, draft: TagDraft) -> Result<Tag, RepoError> {
        let now = chrono::Utc::now();
        let model = tag::ActiveModel {
            id: NotSet,
            name: Set(draft.name),
            slug: Set(draft.slug),
            color: Set(draft.color),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&self.db)
        .await
        .map_err(constraint_or_query)?;

        Ok(model.into())
    }

    async fn update(&self, id: i64, draft: TagDraft) -> Result<Tag, RepoError> {
        let current = tag::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?
            .ok_or(RepoError::NotFound)?;

        let mut model = current.into_active_model();
        model.name = Set(draft.name);
        model.slug = Set(draft.slug);
        model.color = Set(draft.color);
        model.updated_at = Set(chrono::Utc::now().into());

        let model = model.update(&self.db).await.map_err(constraint_or_query)?;
        Ok(model.into())
    }
}
