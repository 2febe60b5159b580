//! Database connection management and PostgreSQL repositories.

mod connections;
mod postgres_base;

pub mod entity;
pub mod post_repo;
pub mod postgres_repo;

pub use connections::{DatabaseConfig, connect};
pub use sea_orm::DbConn;
pub use post_repo::PostgresPostRepository;
pub use postgres_repo::{
    PostgresCategoryRepository, PostgresTagRepository, PostgresUserRepository,
};

#[cfg(test)]
mod tests;
