//! Site model built on parsed documents.
//!
//! A site is one profile document plus a directory of blog posts. This module
//! turns their parsed frontmatter into the views a renderer needs; it does no
//! I/O and produces no HTML.

pub mod assets;
pub mod post;
pub mod profile;
pub mod route;
pub mod search;
pub mod state;

pub use assets::{post_base_path, resolve_image_paths, PROFILE_BASE_PATH};
pub use post::{excerpt, format_date, sort_newest_first, BlogPost, DEFAULT_EXCERPT_LENGTH};
pub use profile::{ContactLink, Paper, PaperLink, Profile, Section, SectionEntry};
pub use route::Route;
pub use search::{filter_posts, paginate, Page, ITEMS_PER_PAGE};
pub use state::SiteState;
