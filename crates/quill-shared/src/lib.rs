//! # Quill Shared
//!
//! Shared types between frontend and backend.
//! In a full-stack Rust setup, this crate is compiled for both server and WASM.

pub mod dto;
pub mod pagination;
pub mod response;

pub use pagination::{PageLink, PaginatedResponse};
pub use response::ErrorResponse;
