//! Blog posts.

use std::cmp::Ordering;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate};
use regex::Regex;

use super::assets::{post_base_path, resolve_image_paths};
use crate::frontmatter::Document;
use crate::options::ParseOptions;
use crate::value::Value;
use crate::{parse_frontmatter_with, Diagnostic};

/// Excerpt length used by post listings.
pub const DEFAULT_EXCERPT_LENGTH: usize = 300;

const UNTITLED: &str = "Untitled";

/// A blog post ready for listing and display.
#[derive(Debug, Clone, PartialEq)]
pub struct BlogPost {
    /// Path of the document relative to the blog directory.
    pub id: String,
    pub title: String,
    /// Date as written, or empty.
    pub date: String,
    pub tags: Vec<String>,
    pub summary: Option<String>,
    /// Markdown body with image paths resolved.
    pub content: String,
}

impl BlogPost {
    /// Build a post from the raw text of the document listed as `id`.
    pub fn from_document(id: &str, text: &str, blog_dir: &str) -> Self {
        Self::from_document_with(id, text, blog_dir, &ParseOptions::default()).0
    }

    /// Build a post with explicit parse options, returning any diagnostics.
    pub fn from_document_with(
        id: &str,
        text: &str,
        blog_dir: &str,
        options: &ParseOptions,
    ) -> (Self, Vec<Diagnostic>) {
        let text = resolve_image_paths(text, &post_base_path(blog_dir, id));
        let parsed = parse_frontmatter_with(&text, options);
        (Self::from_parsed(id, parsed.value), parsed.diagnostics)
    }

    /// Build a post from an already split document.
    pub fn from_parsed(id: &str, document: Document) -> Self {
        let metadata = document.metadata;
        let text_of = |key: &str| metadata.get(key).and_then(Value::truthy_text);

        let tags = match metadata.get("tags") {
            Some(Value::Sequence(items)) => items.iter().filter_map(Value::to_text).collect(),
            Some(other) => other.truthy_text().into_iter().collect(),
            None => Vec::new(),
        };

        BlogPost {
            id: id.to_string(),
            title: text_of("title").unwrap_or_else(|| UNTITLED.to_string()),
            date: text_of("date").unwrap_or_default(),
            tags,
            summary: text_of("summary"),
            content: document.body,
        }
    }

    /// The post date, if it can be read as a calendar date.
    pub fn published(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }
}

/// Read `YYYY-MM-DD` or an RFC 3339 timestamp.
fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.date_naive()))
}

/// Order posts newest first. Posts without a readable date go last and keep
/// their relative order.
pub fn sort_newest_first(posts: &mut [BlogPost]) {
    posts.sort_by(|a, b| match (a.published(), b.published()) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Long form of a date, e.g. `January 15, 2024`.
///
/// Text that is not a date is returned unchanged.
pub fn format_date(text: &str) -> String {
    match parse_date(text) {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => text.to_string(),
    }
}

static MD_IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[[^\]]*\]\([^)]+\)").expect("valid regex"));
static HTML_IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<img[^>]*>").expect("valid regex"));
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#+\s+").expect("valid regex"));
static CODE_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```.*?```").expect("valid regex"));
static INLINE_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`[^`]+`").expect("valid regex"));
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").expect("valid regex"));
static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("valid regex"));
static ITALIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*]+)\*").expect("valid regex"));

/// Plain-text teaser for a post.
///
/// An explicit summary wins. Otherwise the first paragraph of the body with
/// markdown markup removed, cut to `max_len` characters followed by `...`.
pub fn excerpt(post: &BlogPost, max_len: usize) -> String {
    if let Some(summary) = &post.summary {
        return summary.clone();
    }

    let text = MD_IMAGE_RE.replace_all(&post.content, "");
    let text = HTML_IMAGE_RE.replace_all(&text, "");
    let text = HEADING_RE.replace_all(&text, "");
    let text = CODE_BLOCK_RE.replace_all(&text, "");
    let text = INLINE_CODE_RE.replace_all(&text, "");
    let text = LINK_RE.replace_all(&text, "$1");
    let text = BOLD_RE.replace_all(&text, "$1");
    let text = ITALIC_RE.replace_all(&text, "$1");

    let paragraph = text.trim().split("\n\n").next().unwrap_or_default();
    if paragraph.chars().count() > max_len {
        let cut: String = paragraph.chars().take(max_len).collect();
        format!("{}...", cut)
    } else {
        paragraph.to_string()
    }
}
