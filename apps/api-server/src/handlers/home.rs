//! Home feed endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use quill_core::domain::{
    HOME_POPULAR_POSTS, HOME_RECENT_POSTS, HOME_TOP_CATEGORIES, HOME_TOP_TAGS, PostOrder,
    Visibility,
};
use quill_shared::dto::{CategoryWithCountDto, PostDto, TagWithCountDto};

use crate::middleware::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HomePayload {
    pub popular_posts: Vec<PostDto>,
    pub recent_posts: Vec<PostDto>,
    pub categories: Vec<CategoryWithCountDto>,
    pub tags: Vec<TagWithCountDto>,
}

/// GET /api/home
///
/// Landing feed: the most-viewed posts, the latest posts, and the
/// categories and tags with the most published material.
pub async fn index(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let popular = state
        .posts
        .find_top(Visibility::Public, PostOrder::Popular, HOME_POPULAR_POSTS)
        .await?;
    let recent = state
        .posts
        .find_top(Visibility::Public, PostOrder::Recent, HOME_RECENT_POSTS)
        .await?;
    let categories = state
        .categories
        .top_by_visible_posts(HOME_TOP_CATEGORIES)
        .await?;
    let tags = state.tags.top_by_visible_posts(HOME_TOP_TAGS).await?;

    Ok(HttpResponse::Ok().json(HomePayload {
        popular_posts: popular.into_iter().map(Into::into).collect(),
        recent_posts: recent.into_iter().map(Into::into).collect(),
        categories: categories.into_iter().map(Into::into).collect(),
        tags: tags.into_iter().map(Into::into).collect(),
    }))
}
