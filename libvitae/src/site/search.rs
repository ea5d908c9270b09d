//! Post search and pagination.

use super::post::BlogPost;

/// Posts shown per page unless configured otherwise.
pub const ITEMS_PER_PAGE: usize = 10;

/// Posts matching `query`: title, summary or any tag contains it, ignoring
/// case. A blank query matches every post.
pub fn filter_posts<'a>(posts: &'a [BlogPost], query: &str) -> Vec<&'a BlogPost> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return posts.iter().collect();
    }
    let contains = |text: &str| text.to_lowercase().contains(&query);
    posts
        .iter()
        .filter(|post| {
            contains(&post.title)
                || post.summary.as_deref().is_some_and(contains)
                || post.tags.iter().any(|tag| contains(tag))
        })
        .collect()
}

/// One page of results.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number that was asked for.
    pub number: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }
}

/// Cut page `page` (1-based) of `per_page` items out of `items`.
///
/// Pages past the end, and page 0, are empty.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_pages = items.len().div_ceil(per_page);
    let start = page.saturating_sub(1).saturating_mul(per_page);
    let slice = if page == 0 || start >= items.len() {
        &[][..]
    } else {
        &items[start..(start + per_page).min(items.len())]
    };
    Page {
        items: slice.to_vec(),
        number: page,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str, summary: Option<&str>, tags: &[&str]) -> BlogPost {
        BlogPost {
            id: title.to_string(),
            title: title.to_string(),
            date: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            summary: summary.map(str::to_string),
            content: String::new(),
        }
    }

    #[test]
    fn test_filter_matches_title_summary_and_tags() {
        let posts = vec![
            post("Rust Parsing", None, &[]),
            post("Other", Some("About RUST"), &[]),
            post("Third", None, &["rustlang"]),
            post("Unrelated", None, &["go"]),
        ];
        let found: Vec<&str> = filter_posts(&posts, "  Rust ")
            .iter()
            .map(|p| p.title.as_str())
            .collect();
        assert_eq!(found, vec!["Rust Parsing", "Other", "Third"]);
    }

    #[test]
    fn test_blank_query_matches_all() {
        let posts = vec![post("A", None, &[]), post("B", None, &[])];
        assert_eq!(filter_posts(&posts, "   ").len(), 2);
    }

    #[test]
    fn test_paginate() {
        let items: Vec<usize> = (1..=23).collect();
        let first = paginate(&items, 1, ITEMS_PER_PAGE);
        assert_eq!(first.items, (1..=10).collect::<Vec<_>>());
        assert_eq!(first.total_pages, 3);
        assert!(!first.has_previous());
        assert!(first.has_next());

        let last = paginate(&items, 3, ITEMS_PER_PAGE);
        assert_eq!(last.items, vec![21, 22, 23]);
        assert!(last.has_previous());
        assert!(!last.has_next());

        assert!(paginate(&items, 4, ITEMS_PER_PAGE).items.is_empty());
        assert!(paginate(&items, 0, ITEMS_PER_PAGE).items.is_empty());
    }

    #[test]
    fn test_paginate_empty() {
        let page = paginate::<u8>(&[], 1, ITEMS_PER_PAGE);
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
        assert!(!page.has_next());
    }
}
