//! Application state for a loaded site.

use super::post::BlogPost;
use super::profile::Profile;
use super::route::Route;
use super::search::{filter_posts, paginate, Page, ITEMS_PER_PAGE};

/// Everything a renderer needs: the profile, the posts (newest first) and
/// the listing's search and page position.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteState {
    pub profile: Profile,
    pub posts: Vec<BlogPost>,
    pub current_page: usize,
    /// Lowercased, trimmed search text.
    pub search_query: String,
    pub posts_per_page: usize,
}

impl SiteState {
    pub fn new(profile: Profile, posts: Vec<BlogPost>) -> Self {
        Self {
            profile,
            posts,
            current_page: 1,
            search_query: String::new(),
            posts_per_page: ITEMS_PER_PAGE,
        }
    }

    pub fn with_posts_per_page(mut self, per_page: usize) -> Self {
        self.posts_per_page = per_page.max(1);
        self
    }

    /// Set the search text and go back to the first page.
    pub fn set_search(&mut self, query: &str) {
        self.search_query = query.trim().to_lowercase();
        self.current_page = 1;
    }

    pub fn change_page(&mut self, page: usize) {
        self.current_page = page;
    }

    /// Current page of posts matching the search.
    pub fn visible_posts(&self) -> Page<&BlogPost> {
        let matching = filter_posts(&self.posts, &self.search_query);
        paginate(&matching, self.current_page, self.posts_per_page)
    }

    pub fn find_post(&self, id: &str) -> Option<&BlogPost> {
        self.posts.iter().find(|post| post.id == id)
    }

    /// The route to show, falling back to the listing for unknown posts.
    pub fn resolve_route(&self, route: Route) -> Route {
        match route {
            Route::BlogDetail(id) if self.find_post(&id).is_none() => Route::Blog,
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posts(n: usize) -> Vec<BlogPost> {
        (1..=n)
            .map(|i| BlogPost {
                id: format!("p{}/index.md", i),
                title: format!("Post {}", i),
                date: String::new(),
                tags: if i % 2 == 0 { vec!["even".to_string()] } else { Vec::new() },
                summary: None,
                content: String::new(),
            })
            .collect()
    }

    #[test]
    fn test_search_resets_page() {
        let mut state = SiteState::new(Profile::default(), posts(25));
        state.change_page(3);
        assert_eq!(state.visible_posts().items.len(), 5);

        state.set_search("  EVEN ");
        assert_eq!(state.search_query, "even");
        assert_eq!(state.current_page, 1);
        let page = state.visible_posts();
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items[0].id, "p2/index.md");
    }

    #[test]
    fn test_posts_per_page() {
        let state = SiteState::new(Profile::default(), posts(5)).with_posts_per_page(2);
        assert_eq!(state.visible_posts().total_pages, 3);
    }

    #[test]
    fn test_resolve_route() {
        let state = SiteState::new(Profile::default(), posts(1));
        assert_eq!(
            state.resolve_route(Route::parse("#blog/p1/index.md")),
            Route::BlogDetail("p1/index.md".to_string())
        );
        assert_eq!(state.resolve_route(Route::parse("#blog/missing")), Route::Blog);
        assert_eq!(state.resolve_route(Route::Cv), Route::Cv);
    }
}
