//! Public post endpoints.

use actix_web::{HttpResponse, web};

use quill_core::domain::{PostQuery, Visibility};
use quill_shared::dto::PostDto;
use quill_shared::pagination::PaginatedResponse;

use crate::handlers::PageParams;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/posts
///
/// Published posts, newest first.
pub async fn index(
    state: web::Data<AppState>,
    params: web::Query<PageParams>,
) -> AppResult<HttpResponse> {
    let query = PostQuery {
        page: params.page(),
        ..PostQuery::public()
    };

    let page = state.posts.find_page(&query).await?;
    let response = PaginatedResponse::<PostDto>::from_page(page, "/api/posts", &[]);

    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/posts/{slug}
///
/// Post detail. Every hit bumps the view counter, and the returned
/// record reflects the bumped value.
pub async fn show(state: web::Data<AppState>, slug: web::Path<String>) -> AppResult<HttpResponse> {
    let slug = slug.into_inner();

    let mut record = state
        .posts
        .find_by_slug(&slug, Visibility::Public)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No published post with slug '{slug}'")))?;

    state.posts.increment_views(record.post.id).await?;
    record.post.views_count += 1;

    Ok(HttpResponse::Ok().json(PostDto::from(record)))
}
