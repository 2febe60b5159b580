use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity - an author referenced by posts. Account management lives
/// elsewhere; this side only resolves authors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
