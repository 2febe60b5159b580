//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use quill_core::domain::{Category, PostRecord, PostStatus, Tag, User};

/// Post author as embedded in post payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorDto {
    pub id: i64,
    pub name: String,
}

impl From<User> for AuthorDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
        }
    }
}

/// Category as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryDto {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            slug: category.slug,
            description: category.description,
            color: category.color,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

/// Tag as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagDto {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Tag> for TagDto {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
            slug: tag.slug,
            color: tag.color,
            created_at: tag.created_at,
            updated_at: tag.updated_at,
        }
    }
}

/// Category annotated with its published-post count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryWithCountDto {
    #[serde(flatten)]
    pub category: CategoryDto,
    pub posts_count: u64,
}

impl From<(Category, u64)> for CategoryWithCountDto {
    fn from((category, posts_count): (Category, u64)) -> Self {
        Self {
            category: category.into(),
            posts_count,
        }
    }
}

/// Tag annotated with its published-post count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagWithCountDto {
    #[serde(flatten)]
    pub tag: TagDto,
    pub posts_count: u64,
}

impl From<(Tag, u64)> for TagWithCountDto {
    fn from((tag, posts_count): (Tag, u64)) -> Self {
        Self {
            tag: tag.into(),
            posts_count,
        }
    }
}

/// Post payload with embedded author, category, and tags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDto {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub featured_image: Option<String>,
    pub status: PostStatus,
    pub views_count: i64,
    pub reading_time: String,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author: AuthorDto,
    pub category: CategoryDto,
    pub tags: Vec<TagDto>,
}

impl From<PostRecord> for PostDto {
    fn from(record: PostRecord) -> Self {
        let reading_time = record.post.reading_time();
        let post = record.post;
        Self {
            id: post.id,
            title: post.title,
            slug: post.slug,
            excerpt: post.excerpt,
            content: post.content,
            featured_image: post.featured_image,
            status: post.status,
            views_count: post.views_count,
            reading_time,
            published_at: post.published_at,
            created_at: post.created_at,
            updated_at: post.updated_at,
            author: record.author.into(),
            category: record.category.into(),
            tags: record.tags.into_iter().map(Into::into).collect(),
        }
    }
}

/// Request to create a post. Fields arrive unchecked and are validated
/// before anything touches the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorePostRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub featured_image: Option<String>,
    pub status: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub category_id: Option<i64>,
    pub user_id: Option<i64>,
    #[serde(default)]
    pub tags: Vec<i64>,
}

/// Request to update a post. Updates are full-form: required fields must be
/// resubmitted, and an absent `tags` list clears every association. Only
/// `featured_image` treats an absent key as "keep"; an explicit `null`
/// clears the image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    #[serde(default, deserialize_with = "some_if_present")]
    pub featured_image: Option<Option<String>>,
    pub status: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub category_id: Option<i64>,
    pub tags: Option<Vec<i64>>,
}

/// Distinguishes an absent key (outer `None`) from an explicit `null`
/// (inner `None`).
fn some_if_present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Request to create or replace a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
}

/// Request to create or replace a tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub color: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn featured_image_distinguishes_absent_from_null() {
        let absent: UpdatePostRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(absent.featured_image, None);

        let cleared: UpdatePostRequest =
            serde_json::from_value(json!({ "featured_image": null })).unwrap();
        assert_eq!(cleared.featured_image, Some(None));

        let replaced: UpdatePostRequest =
            serde_json::from_value(json!({ "featured_image": "cover.webp" })).unwrap();
        assert_eq!(replaced.featured_image, Some(Some("cover.webp".into())));
    }
}
