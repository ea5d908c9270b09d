//! Relative image path rewriting.
//!
//! Documents refer to images relative to their own folder. Before a document
//! is parsed, every such reference is rewritten to be relative to the site
//! root so that it resolves the same way wherever the text ends up.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Base path for the profile document, which lives at the site root.
pub const PROFILE_BASE_PATH: &str = "./";

// ![alt](src) or ![alt](src "title")
static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").expect("valid regex"));

const ABSOLUTE_PREFIXES: [&str; 4] = ["http", "/", "#", "mailto:"];

/// Prefix every relative markdown image source in `text` with `base`.
///
/// Sources starting with `http`, `/`, `#` or `mailto:` are left alone, as is
/// everything that is not a markdown image.
pub fn resolve_image_paths(text: &str, base: &str) -> String {
    IMAGE_RE
        .replace_all(text, |caps: &Captures<'_>| {
            let alt = &caps[1];
            let src = &caps[2];
            if ABSOLUTE_PREFIXES.iter().any(|p| src.starts_with(p)) {
                return caps[0].to_string();
            }
            let (url, title) = match src.split_once(" \"") {
                Some((url, title)) => (url, format!(" \"{}", title)),
                None => (src, String::new()),
            };
            format!("![{}]({}{}{})", alt, base, url, title)
        })
        .into_owned()
}

/// Base path for a blog document listed in the index as `id`.
///
/// `folder/index.md` resolves against `<blog_dir>/folder/`; a bare file name
/// resolves against `<blog_dir>/`.
pub fn post_base_path(blog_dir: &str, id: &str) -> String {
    let blog_dir = blog_dir.trim_end_matches('/');
    match id.rsplit_once('/') {
        Some((folder, _)) if !folder.is_empty() => format!("{}/{}/", blog_dir, folder),
        _ => format!("{}/", blog_dir),
    }
}
