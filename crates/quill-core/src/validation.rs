//! Write-path validation with per-field messages.
//!
//! Field checks that need no store access live here; referential checks
//! (does the category exist, is the slug taken) are merged in by the caller
//! so a single response carries every failure.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

const MAX_TITLE: usize = 255;
const MAX_SLUG: usize = 255;
const MAX_EXCERPT: usize = 500;
const MAX_FEATURED_IMAGE: usize = 255;
const MAX_NAME: usize = 255;

/// Per-field validation failures, keyed by field name.
#[derive(Debug, Clone, Default, Error, Serialize)]
#[error("validation failed for {} field(s)", .0.len())]
pub struct ValidationErrors(pub BTreeMap<&'static str, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Ok(())` when no failures were recorded.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// Raw post fields as submitted, before any defaulting.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostInput<'a> {
    pub title: Option<&'a str>,
    pub slug: Option<&'a str>,
    pub excerpt: Option<&'a str>,
    pub content: Option<&'a str>,
    pub featured_image: Option<&'a str>,
    pub status: Option<&'a str>,
    pub category_id: Option<i64>,
    pub user_id: Option<i64>,
}

/// Check the submitted post fields: presence, length limits, and the status
/// vocabulary. Blank strings count as missing.
pub fn validate_post(input: &PostInput) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    match present(input.title) {
        None => errors.add("title", "Post title is required."),
        Some(title) if title.chars().count() > MAX_TITLE => {
            errors.add(
                "title",
                format!("The title field must not be greater than {MAX_TITLE} characters."),
            );
        }
        Some(_) => {}
    }

    if let Some(slug) = present(input.slug) {
        if slug.chars().count() > MAX_SLUG {
            errors.add(
                "slug",
                format!("The slug field must not be greater than {MAX_SLUG} characters."),
            );
        }
    }

    match present(input.excerpt) {
        None => errors.add("excerpt", "Post excerpt is required."),
        Some(excerpt) if excerpt.chars().count() > MAX_EXCERPT => {
            errors.add(
                "excerpt",
                format!("The excerpt field must not be greater than {MAX_EXCERPT} characters."),
            );
        }
        Some(_) => {}
    }

    if present(input.content).is_none() {
        errors.add("content", "Post content is required.");
    }

    if let Some(image) = present(input.featured_image) {
        if image.chars().count() > MAX_FEATURED_IMAGE {
            errors.add(
                "featured_image",
                format!(
                    "The featured image field must not be greater than {MAX_FEATURED_IMAGE} characters."
                ),
            );
        }
    }

    match present(input.status) {
        None => errors.add("status", "Post status is required."),
        Some("draft") | Some("published") => {}
        Some(_) => errors.add("status", "Post status must be either draft or published."),
    }

    if input.category_id.is_none() {
        errors.add("category_id", "Post category is required.");
    }

    if input.user_id.is_none() {
        errors.add("user_id", "Post author is required.");
    }

    errors
}

/// Check submitted category fields.
pub fn validate_category(name: Option<&str>, slug: Option<&str>) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    check_name(&mut errors, name, "Category name is required.");
    check_slug(&mut errors, slug);
    errors
}

/// Check submitted tag fields.
pub fn validate_tag(name: Option<&str>, slug: Option<&str>) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    check_name(&mut errors, name, "Tag name is required.");
    check_slug(&mut errors, slug);
    errors
}

fn check_name(errors: &mut ValidationErrors, name: Option<&str>, required_message: &str) {
    match present(name) {
        None => errors.add("name", required_message.to_string()),
        Some(name) if name.chars().count() > MAX_NAME => {
            errors.add(
                "name",
                format!("The name field must not be greater than {MAX_NAME} characters."),
            );
        }
        Some(_) => {}
    }
}

fn check_slug(errors: &mut ValidationErrors, slug: Option<&str>) {
    if let Some(slug) = present(slug) {
        if slug.chars().count() > MAX_SLUG {
            errors.add(
                "slug",
                format!("The slug field must not be greater than {MAX_SLUG} characters."),
            );
        }
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input<'a>() -> PostInput<'a> {
        PostInput {
            title: Some("A Title"),
            slug: None,
            excerpt: Some("An excerpt"),
            content: Some("Body"),
            featured_image: None,
            status: Some("draft"),
            category_id: Some(1),
            user_id: Some(1),
        }
    }

    #[test]
    fn valid_post_input_passes() {
        assert!(validate_post(&valid_input()).is_empty());
    }

    #[test]
    fn missing_required_fields_are_reported_per_field() {
        let errors = validate_post(&PostInput::default());
        assert_eq!(
            errors.0.get("title"),
            Some(&vec!["Post title is required.".to_string()])
        );
        assert_eq!(
            errors.0.get("excerpt"),
            Some(&vec!["Post excerpt is required.".to_string()])
        );
        assert_eq!(
            errors.0.get("content"),
            Some(&vec!["Post content is required.".to_string()])
        );
        assert_eq!(
            errors.0.get("status"),
            Some(&vec!["Post status is required.".to_string()])
        );
        assert_eq!(
            errors.0.get("category_id"),
            Some(&vec!["Post category is required.".to_string()])
        );
        assert_eq!(
            errors.0.get("user_id"),
            Some(&vec!["Post author is required.".to_string()])
        );
    }

    #[test]
    fn blank_strings_count_as_missing() {
        let mut input = valid_input();
        input.title = Some("   ");
        let errors = validate_post(&input);
        assert_eq!(
            errors.0.get("title"),
            Some(&vec!["Post title is required.".to_string()])
        );
    }

    #[test]
    fn unknown_status_is_rejected() {
        let mut input = valid_input();
        input.status = Some("archived");
        let errors = validate_post(&input);
        assert_eq!(
            errors.0.get("status"),
            Some(&vec![
                "Post status must be either draft or published.".to_string()
            ])
        );
    }

    #[test]
    fn overlong_fields_are_rejected() {
        let long_title = "t".repeat(256);
        let long_excerpt = "e".repeat(501);
        let mut input = valid_input();
        input.title = Some(&long_title);
        input.excerpt = Some(&long_excerpt);

        let errors = validate_post(&input);
        assert!(errors.0.contains_key("title"));
        assert!(errors.0.contains_key("excerpt"));

        let boundary_title = "t".repeat(255);
        let mut input = valid_input();
        input.title = Some(&boundary_title);
        assert!(!validate_post(&input).0.contains_key("title"));
    }

    #[test]
    fn category_and_tag_names_are_required() {
        let errors = validate_category(None, None);
        assert_eq!(
            errors.0.get("name"),
            Some(&vec!["Category name is required.".to_string()])
        );

        let errors = validate_tag(Some(""), None);
        assert_eq!(
            errors.0.get("name"),
            Some(&vec!["Tag name is required.".to_string()])
        );

        assert!(validate_category(Some("Tech"), Some("tech")).is_empty());
    }

    #[test]
    fn into_result_distinguishes_empty_from_failed() {
        assert!(ValidationErrors::new().into_result().is_ok());

        let mut errors = ValidationErrors::new();
        errors.add("title", "Post title is required.");
        assert!(errors.into_result().is_err());
    }
}
