//! Tag management endpoints.

use actix_web::{HttpResponse, web};

use quill_core::domain::{DEFAULT_TAG_COLOR, TagDraft};
use quill_core::slug::{slugify, unique_slug};
use quill_core::validation::validate_tag;
use quill_shared::dto::{TagDto, TagRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/admin/tags
pub async fn index(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let tags = state.tags.find_all().await?;
    let payload: Vec<TagDto> = tags.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(payload))
}

/// POST /api/admin/tags
pub async fn store(
    state: web::Data<AppState>,
    body: web::Json<TagRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let mut errors = validate_tag(req.name.as_deref(), req.slug.as_deref());

    let slug = match req.slug.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(explicit) => {
            if state.tags.slug_in_use(explicit, None).await? {
                errors.add("slug", "A tag with this slug already exists.");
            }
            explicit.to_owned()
        }
        None => {
            let base = slugify(req.name.as_deref().unwrap_or_default());
            let taken = state.tags.sibling_slugs(&base).await?;
            unique_slug(&base, &taken)
        }
    };

    errors.into_result()?;

    let tag = state
        .tags
        .create(TagDraft {
            name: req.name.unwrap_or_default(),
            slug,
            color: req.color.unwrap_or_else(|| DEFAULT_TAG_COLOR.to_owned()),
        })
        .await?;

    Ok(HttpResponse::Created().json(TagDto::from(tag)))
}

/// PATCH /api/admin/tags/{id}
pub async fn update(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    body: web::Json<TagRequest>,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    let req = body.into_inner();

    let current = state
        .tags
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No tag with id {id}")))?;

    let mut errors = validate_tag(req.name.as_deref(), req.slug.as_deref());

    let name = req.name.unwrap_or_default();
    let slug = match req.slug.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(explicit) => {
            if state.tags.slug_in_use(explicit, Some(id)).await? {
                errors.add("slug", "A tag with this slug already exists.");
            }
            explicit.to_owned()
        }
        None if name != current.name => {
            let base = slugify(&name);
            let mut taken = state.tags.sibling_slugs(&base).await?;
            taken.retain(|slug| slug != &current.slug);
            unique_slug(&base, &taken)
        }
        None => current.slug.clone(),
    };

    errors.into_result()?;

    let tag = state
        .tags
        .update(
            id,
            TagDraft {
                name,
                slug,
                color: req.color.unwrap_or(current.color),
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(TagDto::from(tag)))
}

/// DELETE /api/admin/tags/{id}
///
/// Association rows disappear with the tag; posts themselves are kept.
pub async fn destroy(state: web::Data<AppState>, id: web::Path<i64>) -> AppResult<HttpResponse> {
    state.tags.delete(id.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}
