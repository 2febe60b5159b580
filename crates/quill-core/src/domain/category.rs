use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display color assigned to categories created without one.
pub const DEFAULT_CATEGORY_COLOR: &str = "#6366f1";

/// Category entity - a named grouping each post belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field set for creating or reworking a category. The slug is final here,
/// as with posts.
#[derive(Debug, Clone)]
pub struct CategoryDraft {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub color: String,
}
