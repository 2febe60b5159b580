//! Search endpoint.

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};

use quill_core::domain::PostQuery;
use quill_shared::dto::{CategoryDto, PostDto, TagDto};
use quill_shared::pagination::PaginatedResponse;

use crate::middleware::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub category: Option<String>,
    pub tag: Option<String>,
    pub page: Option<u64>,
}

/// The filters exactly as applied, echoed back for form state.
#[derive(Debug, Serialize)]
pub struct SearchFilters {
    pub query: String,
    pub category: String,
    pub tag: String,
}

#[derive(Debug, Serialize)]
pub struct SearchPayload {
    pub posts: PaginatedResponse<PostDto>,
    pub categories: Vec<CategoryDto>,
    pub tags: Vec<TagDto>,
    pub filters: SearchFilters,
}

/// GET /api/search
///
/// Free-text search over published posts, optionally narrowed by
/// category and tag. The full category and tag lists ride along for
/// rendering filter controls.
pub async fn index(
    state: web::Data<AppState>,
    params: web::Query<SearchParams>,
) -> AppResult<HttpResponse> {
    let params = params.into_inner();

    let term = params.q.unwrap_or_default();
    let category = params.category.unwrap_or_default();
    let tag = params.tag.unwrap_or_default();

    let query = PostQuery {
        search: non_empty(&term),
        category_slug: non_empty(&category),
        tag_slug: non_empty(&tag),
        page: params.page.unwrap_or(1).max(1),
        ..PostQuery::public()
    };

    // Page links repeat the applied filters so navigation keeps them.
    let mut link_params: Vec<(&str, String)> = Vec::new();
    if !term.is_empty() {
        link_params.push(("q", term.clone()));
    }
    if !category.is_empty() {
        link_params.push(("category", category.clone()));
    }
    if !tag.is_empty() {
        link_params.push(("tag", tag.clone()));
    }

    let posts = state.posts.find_page(&query).await?;
    let categories = state.categories.find_all().await?;
    let tags = state.tags.find_all().await?;

    Ok(HttpResponse::Ok().json(SearchPayload {
        posts: PaginatedResponse::from_page(posts, "/api/search", &link_params),
        categories: categories.into_iter().map(Into::into).collect(),
        tags: tags.into_iter().map(Into::into).collect(),
        filters: SearchFilters {
            query: term,
            category,
            tag,
        },
    }))
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_owned())
    }
}
