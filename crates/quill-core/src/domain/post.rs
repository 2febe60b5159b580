use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Category, Tag, User};

/// Publication state of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }

    /// Parse a stored status string. Unrecognized values are treated as drafts.
    pub fn parse(value: &str) -> Self {
        match value {
            "published" => PostStatus::Published,
            _ => PostStatus::Draft,
        }
    }
}

/// Post entity - a single article with its publication state and counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub category_id: i64,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub featured_image: Option<String>,
    pub status: PostStatus,
    pub views_count: i64,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// A post is publicly visible when it is published and carries a publish
    /// timestamp. Both halves are required.
    pub fn is_publicly_visible(&self) -> bool {
        self.status == PostStatus::Published && self.published_at.is_some()
    }

    /// Estimated reading time of the post content.
    pub fn reading_time(&self) -> String {
        reading_time(&self.content)
    }
}

/// A post with its author, category, and tags attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRecord {
    pub post: Post,
    pub author: User,
    pub category: Category,
    pub tags: Vec<Tag>,
}

/// Field set for creating a post.
///
/// The slug is final here: derivation and uniqueness are resolved before the
/// record reaches the store.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub user_id: i64,
    pub category_id: i64,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub featured_image: Option<String>,
    pub status: PostStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub tag_ids: Vec<i64>,
}

/// Field set for updating a post. `None` keeps the stored value; the double
/// option on `featured_image` distinguishes clearing from keeping.
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub featured_image: Option<Option<String>>,
    pub status: Option<PostStatus>,
    pub published_at: Option<DateTime<Utc>>,
    pub category_id: Option<i64>,
    pub tag_ids: Option<Vec<i64>>,
}

/// Estimated reading time for a body of content, assuming 200 words per
/// minute. Markup tags are stripped before counting.
pub fn reading_time(content: &str) -> String {
    let words = strip_tags(content).split_whitespace().count();
    let minutes = words.div_ceil(200);
    format!("{minutes} min read")
}

fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;
    for ch in input.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                out.push(' ');
            }
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}
