//! Public category endpoints.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use quill_core::domain::{CATEGORY_INDEX_PAGE_SIZE, PostQuery};
use quill_shared::dto::{CategoryDto, CategoryWithCountDto, PostDto};
use quill_shared::pagination::PaginatedResponse;

use crate::handlers::PageParams;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/categories
///
/// Every category with its published-post count, including empty ones.
pub async fn index(
    state: web::Data<AppState>,
    params: web::Query<PageParams>,
) -> AppResult<HttpResponse> {
    let page = state
        .categories
        .page_with_visible_counts(params.page(), CATEGORY_INDEX_PAGE_SIZE)
        .await?;
    let response =
        PaginatedResponse::<CategoryWithCountDto>::from_page(page, "/api/categories", &[]);

    Ok(HttpResponse::Ok().json(response))
}

#[derive(Debug, Serialize)]
pub struct CategoryPayload {
    pub category: CategoryDto,
    pub posts: PaginatedResponse<PostDto>,
}

/// GET /api/categories/{slug}
///
/// Category detail plus its published posts, newest first.
pub async fn show(
    state: web::Data<AppState>,
    slug: web::Path<String>,
    params: web::Query<PageParams>,
) -> AppResult<HttpResponse> {
    let slug = slug.into_inner();

    let category = state
        .categories
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No category with slug '{slug}'")))?;

    let query = PostQuery {
        category_slug: Some(slug.clone()),
        page: params.page(),
        ..PostQuery::public()
    };
    let posts = state.posts.find_page(&query).await?;

    let base_path = format!("/api/categories/{slug}");
    let posts = PaginatedResponse::<PostDto>::from_page(posts, &base_path, &[]);

    Ok(HttpResponse::Ok().json(CategoryPayload {
        category: category.into(),
        posts,
    }))
}
