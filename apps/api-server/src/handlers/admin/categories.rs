//! Category management endpoints.

use actix_web::{HttpResponse, web};

use quill_core::domain::{CategoryDraft, DEFAULT_CATEGORY_COLOR};
use quill_core::slug::{slugify, unique_slug};
use quill_core::validation::validate_category;
use quill_shared::dto::{CategoryDto, CategoryRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/admin/categories
pub async fn index(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let categories = state.categories.find_all().await?;
    let payload: Vec<CategoryDto> = categories.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(payload))
}

/// POST /api/admin/categories
pub async fn store(
    state: web::Data<AppState>,
    body: web::Json<CategoryRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let mut errors = validate_category(req.name.as_deref(), req.slug.as_deref());

    let slug = match req.slug.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(explicit) => {
            if state.categories.slug_in_use(explicit, None).await? {
                errors.add("slug", "A category with this slug already exists.");
            }
            explicit.to_owned()
        }
        None => {
            let base = slugify(req.name.as_deref().unwrap_or_default());
            let taken = state.categories.sibling_slugs(&base).await?;
            unique_slug(&base, &taken)
        }
    };

    errors.into_result()?;

    let category = state
        .categories
        .create(CategoryDraft {
            name: req.name.unwrap_or_default(),
            slug,
            description: req.description,
            color: req
                .color
                .unwrap_or_else(|| DEFAULT_CATEGORY_COLOR.to_owned()),
        })
        .await?;

    Ok(HttpResponse::Created().json(CategoryDto::from(category)))
}

/// PATCH /api/admin/categories/{id}
pub async fn update(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    body: web::Json<CategoryRequest>,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    let req = body.into_inner();

    let current = state
        .categories
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No category with id {id}")))?;

    let mut errors = validate_category(req.name.as_deref(), req.slug.as_deref());

    let name = req.name.unwrap_or_default();
    let slug = match req.slug.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(explicit) => {
            if state.categories.slug_in_use(explicit, Some(id)).await? {
                errors.add("slug", "A category with this slug already exists.");
            }
            explicit.to_owned()
        }
        None if name != current.name => {
            let base = slugify(&name);
            let mut taken = state.categories.sibling_slugs(&base).await?;
            taken.retain(|slug| slug != &current.slug);
            unique_slug(&base, &taken)
        }
        None => current.slug.clone(),
    };

    errors.into_result()?;

    let category = state
        .categories
        .update(
            id,
            CategoryDraft {
                name,
                slug,
                description: req.description,
                color: req.color.unwrap_or(current.color),
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(CategoryDto::from(category)))
}

/// DELETE /api/admin/categories/{id}
///
/// Posts in the category are removed with it by the FK cascade.
pub async fn destroy(state: web::Data<AppState>, id: web::Path<i64>) -> AppResult<HttpResponse> {
    state.categories.delete(id.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}
