//! Paginated collection envelope with navigation links.

use serde::{Deserialize, Serialize};

use quill_core::domain::Page;

/// One entry in the navigation link list. `url` is `None` for the
/// Previous link on the first page and the Next link on the last.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageLink {
    pub url: Option<String>,
    pub label: String,
    pub active: bool,
}

/// Page of items plus the metadata a client needs to render a pager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub current_page: u64,
    pub last_page: u64,
    pub per_page: u64,
    pub total: u64,
    pub links: Vec<PageLink>,
}

impl<T> PaginatedResponse<T> {
    /// Wrap a result page. Links point at `base_path` and carry `params`
    /// so that filters survive page navigation.
    pub fn from_page<U>(page: Page<U>, base_path: &str, params: &[(&str, String)]) -> Self
    where
        T: From<U>,
    {
        let last_page = page.last_page();
        let links = page_links(base_path, params, page.current_page, last_page);

        Self {
            data: page.items.into_iter().map(T::from).collect(),
            current_page: page.current_page,
            last_page,
            per_page: page.per_page,
            total: page.total,
            links,
        }
    }
}

/// Link list in the order clients render it: Previous, one entry per
/// page, Next.
pub fn page_links(
    base_path: &str,
    params: &[(&str, String)],
    current: u64,
    last: u64,
) -> Vec<PageLink> {
    let mut links = Vec::with_capacity(last as usize + 2);

    links.push(PageLink {
        url: (current > 1).then(|| page_url(base_path, params, current - 1)),
        label: "&laquo; Previous".to_owned(),
        active: false,
    });

    for page in 1..=last {
        links.push(PageLink {
            url: Some(page_url(base_path, params, page)),
            label: page.to_string(),
            active: page == current,
        });
    }

    links.push(PageLink {
        url: (current < last).then(|| page_url(base_path, params, current + 1)),
        label: "Next &raquo;".to_owned(),
        active: false,
    });

    links
}

fn page_url(base_path: &str, params: &[(&str, String)], page: u64) -> String {
    let mut query: Vec<(&str, String)> = params.to_vec();
    query.push(("page", page.to_string()));

    match serde_urlencoded::to_string(&query) {
        Ok(encoded) => format!("{base_path}?{encoded}"),
        Err(_) => format!("{base_path}?page={page}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_has_no_previous_url() {
        let links = page_links("/api/posts", &[], 1, 3);

        assert_eq!(links.len(), 5);
        assert_eq!(links[0].label, "&laquo; Previous");
        assert!(links[0].url.is_none());
        assert!(links[1].active);
        assert_eq!(links[4].url.as_deref(), Some("/api/posts?page=2"));
    }

    #[test]
    fn last_page_has_no_next_url() {
        let links = page_links("/api/posts", &[], 3, 3);

        assert_eq!(links[0].url.as_deref(), Some("/api/posts?page=2"));
        assert!(links[3].active);
        assert!(links[4].url.is_none());
    }

    #[test]
    fn links_preserve_filter_params() {
        let params = [("query", "rust lang".to_owned())];
        let links = page_links("/api/search", &params, 1, 2);

        assert_eq!(
            links[2].url.as_deref(),
            Some("/api/search?query=rust+lang&page=2")
        );
    }
}
