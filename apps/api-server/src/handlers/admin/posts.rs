//! Post management endpoints.

use actix_web::{HttpResponse, web};

use quill_core::domain::{NewPost, PostChanges, PostQuery, PostStatus};
use quill_core::slug::{slugify, unique_slug};
use quill_core::validation::{PostInput, validate_post};
use quill_shared::dto::{PostDto, StorePostRequest, UpdatePostRequest};
use quill_shared::pagination::PaginatedResponse;

use crate::handlers::PageParams;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/admin/posts
///
/// Every post regardless of publication state, newest first.
pub async fn index(
    state: web::Data<AppState>,
    params: web::Query<PageParams>,
) -> AppResult<HttpResponse> {
    let query = PostQuery {
        page: params.page(),
        ..PostQuery::management()
    };

    let page = state.posts.find_page(&query).await?;
    let response = PaginatedResponse::<PostDto>::from_page(page, "/api/admin/posts", &[]);

    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/admin/posts/{id}
pub async fn show(state: web::Data<AppState>, id: web::Path<i64>) -> AppResult<HttpResponse> {
    let id = id.into_inner();

    let record = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No post with id {id}")))?;

    Ok(HttpResponse::Ok().json(PostDto::from(record)))
}

/// POST /api/admin/posts
///
/// All field failures are collected into a single 422 response rather
/// than reported one at a time.
pub async fn store(
    state: web::Data<AppState>,
    body: web::Json<StorePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let mut errors = validate_post(&PostInput {
        title: req.title.as_deref(),
        slug: req.slug.as_deref(),
        excerpt: req.excerpt.as_deref(),
        content: req.content.as_deref(),
        featured_image: req.featured_image.as_deref(),
        status: req.status.as_deref(),
        category_id: req.category_id,
        user_id: req.user_id,
    });

    if let Some(category_id) = req.category_id {
        if state.categories.find_by_id(category_id).await?.is_none() {
            errors.add("category_id", "Selected category does not exist.");
        }
    }
    if let Some(user_id) = req.user_id {
        if state.users.find_by_id(user_id).await?.is_none() {
            errors.add("user_id", "Selected author does not exist.");
        }
    }

    let mut tag_ids = req.tags;
    tag_ids.sort_unstable();
    tag_ids.dedup();
    if state.tags.count_by_ids(&tag_ids).await? != tag_ids.len() as u64 {
        errors.add("tags", "One or more selected tags do not exist.");
    }

    let slug = match req.slug.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(explicit) => {
            if state.posts.slug_in_use(explicit, None).await? {
                errors.add("slug", "A post with this slug already exists.");
            }
            explicit.to_owned()
        }
        None => {
            let base = slugify(req.title.as_deref().unwrap_or_default());
            let taken = state.posts.sibling_slugs(&base).await?;
            unique_slug(&base, &taken)
        }
    };

    errors.into_result()?;

    let status = PostStatus::parse(req.status.as_deref().unwrap_or_default());
    let published_at = match req.published_at {
        Some(at) => Some(at),
        None => (status == PostStatus::Published).then(chrono::Utc::now),
    };

    let record = state
        .posts
        .create(NewPost {
            user_id: req.user_id.unwrap_or_default(),
            category_id: req.category_id.unwrap_or_default(),
            title: req.title.unwrap_or_default(),
            slug,
            excerpt: req.excerpt.unwrap_or_default(),
            content: req.content.unwrap_or_default(),
            featured_image: req.featured_image,
            status,
            published_at,
            tag_ids,
        })
        .await?;

    Ok(HttpResponse::Created().json(PostDto::from(record)))
}

/// PATCH /api/admin/posts/{id}
///
/// Full-form update. The author never changes; an explicit slug wins
/// over derivation, and a title change without one re-derives the slug.
pub async fn update(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    let req = body.into_inner();

    let current = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No post with id {id}")))?;

    let mut errors = validate_post(&PostInput {
        title: req.title.as_deref(),
        slug: req.slug.as_deref(),
        excerpt: req.excerpt.as_deref(),
        content: req.content.as_deref(),
        featured_image: req.featured_image.as_ref().and_then(|v| v.as_deref()),
        status: req.status.as_deref(),
        category_id: req.category_id,
        user_id: Some(current.post.user_id),
    });

    if let Some(category_id) = req.category_id {
        if state.categories.find_by_id(category_id).await?.is_none() {
            errors.add("category_id", "Selected category does not exist.");
        }
    }

    // Absent tags mean "no tags": associations are fully replaced.
    let mut tag_ids = req.tags.unwrap_or_default();
    tag_ids.sort_unstable();
    tag_ids.dedup();
    if state.tags.count_by_ids(&tag_ids).await? != tag_ids.len() as u64 {
        errors.add("tags", "One or more selected tags do not exist.");
    }

    let title = req.title.unwrap_or_default();
    let title_changed = title != current.post.title;

    let slug = match req.slug.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(explicit) => {
            if state.posts.slug_in_use(explicit, Some(id)).await? {
                errors.add("slug", "A post with this slug already exists.");
            }
            Some(explicit.to_owned())
        }
        None if title_changed => {
            let base = slugify(&title);
            let mut taken = state.posts.sibling_slugs(&base).await?;
            taken.retain(|slug| slug != &current.post.slug);
            Some(unique_slug(&base, &taken))
        }
        None => None,
    };

    errors.into_result()?;

    let status = PostStatus::parse(req.status.as_deref().unwrap_or_default());
    let mut published_at = req.published_at;
    if status == PostStatus::Published && current.post.published_at.is_none() {
        published_at = Some(chrono::Utc::now());
    }

    let record = state
        .posts
        .update(
            id,
            PostChanges {
                title: Some(title),
                slug,
                excerpt: Some(req.excerpt.unwrap_or_default()),
                content: Some(req.content.unwrap_or_default()),
                featured_image: req.featured_image,
                status: Some(status),
                published_at,
                category_id: Some(req.category_id.unwrap_or_default()),
                tag_ids: Some(tag_ids),
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(PostDto::from(record)))
}

/// DELETE /api/admin/posts/{id}
pub async fn destroy(state: web::Data<AppState>, id: web::Path<i64>) -> AppResult<HttpResponse> {
    state.posts.delete(id.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}
