//! Slug derivation for posts, categories, and tags.

/// Derive a URL-safe slug from a human title.
///
/// Lowercases ASCII alphanumeric runs and joins them with single hyphens;
/// everything else is dropped. A title with no usable characters falls back
/// to `untitled`.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_separator = false;
    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    if slug.is_empty() {
        return "untitled".to_string();
    }
    slug
}

/// Disambiguate a derived slug against the slugs already taken.
///
/// Returns `base` untouched when free, otherwise the first free numeric
/// suffix: `base-2`, `base-3`, and so on. Only derived slugs go through
/// this; an explicitly supplied slug is never rewritten.
pub fn unique_slug(base: &str, taken: &[String]) -> String {
    if !taken.iter().any(|slug| slug == base) {
        return base.to_string();
    }

    let mut n: u64 = 2;
    loop {
        let candidate = format!("{base}-{n}");
        if !taken.iter().any(|slug| slug == &candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_basic_title() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
    }

    #[test]
    fn slugify_collapses_separator_runs() {
        assert_eq!(slugify("Rust   --  Async / Await"), "rust-async-await");
        assert_eq!(slugify("snake_case_title"), "snake-case-title");
    }

    #[test]
    fn slugify_trims_leading_and_trailing_punctuation() {
        assert_eq!(slugify("...Leading and trailing..."), "leading-and-trailing");
    }

    #[test]
    fn slugify_keeps_digits() {
        assert_eq!(slugify("Top 10 Tips for 2024"), "top-10-tips-for-2024");
    }

    #[test]
    fn slugify_empty_input_falls_back() {
        assert_eq!(slugify(""), "untitled");
        assert_eq!(slugify("!!! ???"), "untitled");
    }

    #[test]
    fn unique_slug_returns_base_when_free() {
        let taken = vec!["other".to_string()];
        assert_eq!(unique_slug("hello-world", &taken), "hello-world");
    }

    #[test]
    fn unique_slug_appends_first_free_suffix() {
        let taken = vec!["hello-world".to_string()];
        assert_eq!(unique_slug("hello-world", &taken), "hello-world-2");

        let taken = vec![
            "hello-world".to_string(),
            "hello-world-2".to_string(),
            "hello-world-3".to_string(),
        ];
        assert_eq!(unique_slug("hello-world", &taken), "hello-world-4");
    }

    #[test]
    fn unique_slug_skips_holes_to_first_free() {
        let taken = vec!["post".to_string(), "post-3".to_string()];
        assert_eq!(unique_slug("post", &taken), "post-2");
    }
}
