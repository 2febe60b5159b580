//! Management endpoints for posts, categories, and tags.

pub mod categories;
pub mod posts;
pub mod tags;
