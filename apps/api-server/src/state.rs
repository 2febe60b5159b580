//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{CategoryRepository, PostRepository, TagRepository, UserRepository};
use quill_infra::database::{
    DbConn, PostgresCategoryRepository, PostgresPostRepository, PostgresTagRepository,
    PostgresUserRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl AppState {
    /// Build the application state over a live database connection.
    pub fn new(db: DbConn) -> Self {
        let state = Self {
            posts: Arc::new(PostgresPostRepository::new(db.clone())),
            categories: Arc::new(PostgresCategoryRepository::new(db.clone())),
            tags: Arc::new(PostgresTagRepository::new(db.clone())),
            users: Arc::new(PostgresUserRepository::new(db)),
        };

        tracing::info!("Application state initialized");

        state
    }
}
