//! PostgreSQL post repository - the listing pipeline and the write path.

use async_trait::async_trait;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Condition, Expr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, IntoActiveModel, JoinType,
    LoaderTrait, NotSet, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
    Select, Set, TransactionTrait, UpdateMany,
};

use quill_core::domain::{
    NewPost, Page, PostChanges, PostOrder, PostQuery, PostRecord, PostStatus, Visibility,
};
use quill_core::error::RepoError;
use quill_core::ports::PostRepository;

use super::entity::{category, post, post_tag, tag, user};
use super::postgres_base::{PostgresBaseRepository, constraint_or_query};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<post::Entity>;

/// Predicate selecting publicly visible posts: published status with a
/// publish timestamp. Always applied as a unit.
pub(crate) fn visibility_filter() -> Condition {
    Condition::all()
        .add(post::Column::Status.eq(PostStatus::Published.as_str()))
        .add(post::Column::PublishedAt.is_not_null())
}

/// Escape LIKE metacharacters so search terms match literally.
pub(crate) fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Build the listing statement: visibility scope first, then search,
/// category, and tag predicates, then a deterministic order.
pub(crate) fn compose(query: &PostQuery) -> Select<post::Entity> {
    let mut select = post::Entity::find();

    if query.visibility == Visibility::Public {
        select = select.filter(visibility_filter());
    }

    if let Some(term) = query.search.as_deref().filter(|t| !t.is_empty()) {
        let pattern = format!("%{}%", escape_like(term));
        select = select.filter(
            Condition::any()
                .add(Expr::col((post::Entity, post::Column::Title)).ilike(pattern.clone()))
                .add(Expr::col((post::Entity, post::Column::Excerpt)).ilike(pattern.clone()))
                .add(Expr::col((post::Entity, post::Column::Content)).ilike(pattern)),
        );
    }

    if let Some(slug) = query.category_slug.as_deref() {
        select = select
            .join(JoinType::InnerJoin, post::Relation::Category.def())
            .filter(category::Column::Slug.eq(slug));
    }

    // Tag slugs are unique, so the existential filter cannot duplicate rows.
    if let Some(slug) = query.tag_slug.as_deref() {
        select = select
            .join(JoinType::InnerJoin, post_tag::Relation::Post.def().rev())
            .join(JoinType::InnerJoin, post_tag::Relation::Tag.def())
            .filter(tag::Column::Slug.eq(slug));
    }

    ordered(select, query.order)
}

/// Apply the requested order plus an id tie-break so pages are stable.
fn ordered(select: Select<post::Entity>, order: PostOrder) -> Select<post::Entity> {
    let select = match order {
        PostOrder::Popular => select.order_by_desc(post::Column::ViewsCount),
        PostOrder::Recent => select.order_by_desc(post::Column::PublishedAt),
    };
    select.order_by_asc(post::Column::Id)
}

/// Build the view-count bump. A single self-referential UPDATE; a
/// read-modify-write would drop concurrent views.
pub(crate) fn bump_views(id: i64) -> UpdateMany<post::Entity> {
    post::Entity::update_many()
        .col_expr(
            post::Column::ViewsCount,
            Expr::col(post::Column::ViewsCount).add(1),
        )
        .filter(post::Column::Id.eq(id))
}

impl PostgresPostRepository {
    /// Load authors, categories, and tags for a batch of post rows.
    async fn attach_relations(
        &self,
        models: Vec<post::Model>,
    ) -> Result<Vec<PostRecord>, RepoError> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let authors = models
            .load_one(user::Entity, &self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;
        let categories = models
            .load_one(category::Entity, &self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;
        let tags = models
            .load_many_to_many(tag::Entity, post_tag::Entity, &self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        let mut records = Vec::with_capacity(models.len());
        for (((model, author), category), tags) in
            models.into_iter().zip(authors).zip(categories).zip(tags)
        {
            let author =
                author.ok_or_else(|| RepoError::Query("post author row missing".to_string()))?;
            let category = category
                .ok_or_else(|| RepoError::Query("post category row missing".to_string()))?;
            records.push(PostRecord {
                post: model.into(),
                author: author.into(),
                category: category.into(),
                tags: tags.into_iter().map(Into::into).collect(),
            });
        }

        Ok(records)
    }
}

/// Replace the full tag set for a post.
async fn replace_tags(
    txn: &DatabaseTransaction,
    post_id: i64,
    tag_ids: &[i64],
) -> Result<(), RepoError> {
    post_tag::Entity::delete_many()
        .filter(post_tag::Column::PostId.eq(post_id))
        .exec(txn)
        .await
        .map_err(|e| RepoError::Query(e.to_string()))?;

    let mut tag_ids = tag_ids.to_vec();
    tag_ids.sort_unstable();
    tag_ids.dedup();

    if tag_ids.is_empty() {
        return Ok(());
    }

    let rows = tag_ids.into_iter().map(|tag_id| post_tag::ActiveModel {
        post_id: Set(post_id),
        tag_id: Set(tag_id),
    });
    post_tag::Entity::insert_many(rows)
        .exec(txn)
        .await
        .map_err(constraint_or_query)?;

    Ok(())
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_page(&self, query: &PostQuery) -> Result<Page<PostRecord>, RepoError> {
        let per_page = query.per_page.max(1);
        let paginator = compose(query).paginate(&self.db, per_page);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;
        let models = paginator
            .fetch_page(query.page.saturating_sub(1))
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        let records = self.attach_relations(models).await?;
        Ok(Page::new(records, query.page.max(1), per_page, total))
    }

    async fn find_top(
        &self,
        visibility: Visibility,
        order: PostOrder,
        limit: u64,
    ) -> Result<Vec<PostRecord>, RepoError> {
        let query = PostQuery {
            visibility,
            order,
            ..PostQuery::public()
        };
        let models = compose(&query)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        self.attach_relations(models).await
    }

    async fn find_by_slug(
        &self,
        slug: &str,
        visibility: Visibility,
    ) -> Result<Option<PostRecord>, RepoError> {
        let mut select = post::Entity::find().filter(post::Column::Slug.eq(slug));
        if visibility == Visibility::Public {
            select = select.filter(visibility_filter());
        }

        let model = select
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        match model {
            Some(model) => {
                let mut records = self.attach_relations(vec![model]).await?;
                Ok(records.pop())
            }
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<PostRecord>, RepoError> {
        let model = post::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        match model {
            Some(model) => {
                let mut records = self.attach_relations(vec![model]).await?;
                Ok(records.pop())
            }
            None => Ok(None),
        }
    }

    async fn slug_in_use(&self, slug: &str, exclude_id: Option<i64>) -> Result<bool, RepoError> {
        let mut select = post::Entity::find().filter(post::Column::Slug.eq(slug));
        if let Some(id) = exclude_id {
            select = select.filter(post::Column::Id.ne(id));
        }

        let count = select
            .count(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;
        Ok(count > 0)
    }

    async fn sibling_slugs(&self, base: &str) -> Result<Vec<String>, RepoError> {
        let pattern = format!("{}%", escape_like(base));
        post::Entity::find()
            .select_only()
            .column(post::Column::Slug)
            .filter(post::Column::Slug.like(pattern))
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))
    }

    async fn create(&self, draft: NewPost) -> Result<PostRecord, RepoError> {
        tracing::debug!(slug = %draft.slug, "Creating post");

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;

        let now = chrono::Utc::now();
        let model = post::ActiveModel {
            id: NotSet,
            title: Set(draft.title),
            slug: Set(draft.slug),
            excerpt: Set(draft.excerpt),
            content: Set(draft.content),
            featured_image: Set(draft.featured_image),
            status: Set(draft.status.as_str().to_string()),
            views_count: Set(0),
            published_at: Set(draft.published_at.map(Into::into)),
            user_id: Set(draft.user_id),
            category_id: Set(draft.category_id),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&txn)
        .await
        .map_err(constraint_or_query)?;

        replace_tags(&txn, model.id, &draft.tag_ids).await?;

        txn.commit()
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        self.find_by_id(model.id).await?.ok_or(RepoError::NotFound)
    }

    async fn update(&self, id: i64, changes: PostChanges) -> Result<PostRecord, RepoError> {
        tracing::debug!(post_id = id, "Updating post");

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;

        let current = post::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?
            .ok_or(RepoError::NotFound)?;

        let mut model = current.into_active_model();
        if let Some(title) = changes.title {
            model.title = Set(title);
        }
        if let Some(slug) = changes.slug {
            model.slug = Set(slug);
        }
        if let Some(excerpt) = changes.excerpt {
            model.excerpt = Set(excerpt);
        }
        if let Some(content) = changes.content {
            model.content = Set(content);
        }
        if let Some(image) = changes.featured_image {
            model.featured_image = Set(image);
        }
        if let Some(status) = changes.status {
            model.status = Set(status.as_str().to_string());
        }
        if let Some(at) = changes.published_at {
            model.published_at = Set(Some(at.into()));
        }
        if let Some(category_id) = changes.category_id {
            model.category_id = Set(category_id);
        }
        model.updated_at = Set(chrono::Utc::now().into());

        let model = model.update(&txn).await.map_err(constraint_or_query)?;

        if let Some(tag_ids) = changes.tag_ids {
            replace_tags(&txn, model.id, &tag_ids).await?;
        }

        txn.commit()
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        self.find_by_id(model.id).await?.ok_or(RepoError::NotFound)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        // Association rows go with the post via the FK cascade.
        let result = post::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn increment_views(&self, id: i64) -> Result<(), RepoError> {
        let result = bump_views(id)
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
