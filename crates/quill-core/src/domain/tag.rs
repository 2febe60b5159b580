use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display color assigned to tags created without one.
pub const DEFAULT_TAG_COLOR: &str = "#10b981";

/// Tag entity - a free-form label attached to any number of posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field set for creating or reworking a tag.
#[derive(Debug, Clone)]
pub struct TagDraft {
    pub name: String,
    pub slug: String,
    pub color: String,
}
