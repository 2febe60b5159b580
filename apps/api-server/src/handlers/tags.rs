//! Public tag endpoints.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use quill_core::domain::{PostQuery, TAG_INDEX_PAGE_SIZE};
use quill_shared::dto::{PostDto, TagDto, TagWithCountDto};
use quill_shared::pagination::PaginatedResponse;

use crate::handlers::PageParams;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/tags
///
/// Every tag with its published-post count, including unused ones.
pub async fn index(
    state: web::Data<AppState>,
    params: web::Query<PageParams>,
) -> AppResult<HttpResponse> {
    let page = state
        .tags
        .page_with_visible_counts(params.page(), TAG_INDEX_PAGE_SIZE)
        .await?;
    let response = PaginatedResponse::<TagWithCountDto>::from_page(page, "/api/tags", &[]);

    Ok(HttpResponse::Ok().json(response))
}

#[derive(Debug, Serialize)]
pub struct TagPayload {
    pub tag: TagDto,
    pub posts: PaginatedResponse<PostDto>,
}

/// GET /api/tags/{slug}
///
/// Tag detail plus the published posts carrying it, newest first.
pub async fn show(
    state: web::Data<AppState>,
    slug: web::Path<String>,
    params: web::Query<PageParams>,
) -> AppResult<HttpResponse> {
    let slug = slug.into_inner();

    let tag = state
        .tags
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No tag with slug '{slug}'")))?;

    let query = PostQuery {
        tag_slug: Some(slug.clone()),
        page: params.page(),
        ..PostQuery::public()
    };
    let posts = state.posts.find_page(&query).await?;

    let base_path = format!("/api/tags/{slug}");
    let posts = PaginatedResponse::<PostDto>::from_page(posts, &base_path, &[]);

    Ok(HttpResponse::Ok().json(TagPayload {
        tag: tag.into(),
        posts,
    }))
}
