//! HTTP handlers and route configuration.

mod admin;
mod categories;
mod health;
mod home;
mod posts;
mod search;
mod tags;


use actix_web::{HttpResponse, web};
use serde::Deserialize;

use quill_shared::ErrorResponse;

use crate::observability::RequestId;

/// Query parameters shared by every paginated listing.
#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<u64>,
}

impl PageParams {
    /// Requested page, clamped to 1-indexed.
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .route("/home", web::get().to(home::index))
            .route("/posts", web::get().to(posts::index))
            .route("/posts/{slug}", web::get().to(posts::show))
            .route("/categories", web::get().to(categories::index))
            .route("/categories/{slug}", web::get().to(categories::show))
            .route("/tags", web::get().to(tags::index))
            .route("/tags/{slug}", web::get().to(tags::show))
            .route("/search", web::get().to(search::index))
            // Management routes
            .service(
                web::scope("/admin")
                    .route("/posts", web::get().to(admin::posts::index))
                    .route("/posts", web::post().to(admin::posts::store))
                    .route("/posts/{id}", web::get().to(admin::posts::show))
                    .route("/posts/{id}", web::patch().to(admin::posts::update))
                    .route("/posts/{id}", web::delete().to(admin::posts::destroy))
                    .route("/categories", web::get().to(admin::categories::index))
                    .route("/categories", web::post().to(admin::categories::store))
                    .route("/categories/{id}", web::patch().to(admin::categories::update))
                    .route("/categories/{id}", web::delete().to(admin::categories::destroy))
                    .route("/tags", web::get().to(admin::tags::index))
                    .route("/tags", web::post().to(admin::tags::store))
                    .route("/tags/{id}", web::patch().to(admin::tags::update))
                    .route("/tags/{id}", web::delete().to(admin::tags::destroy)),
            ),
    )
    .default_service(web::route().to(not_found));
}

/// Fallback for unmatched paths.
async fn not_found(request_id: RequestId) -> HttpResponse {
    HttpResponse::NotFound().json(
        ErrorResponse::not_found("The requested resource does not exist.")
            .with_request_id(request_id.as_str()),
    )
}
