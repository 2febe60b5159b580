//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//! This crate contains the SeaORM entities and the PostgreSQL repositories
//! behind the publishing pipeline.

pub mod database;

pub use database::{
    DatabaseConfig, PostgresCategoryRepository, PostgresPostRepository, PostgresTagRepository,
    PostgresUserRepository, connect,
};
