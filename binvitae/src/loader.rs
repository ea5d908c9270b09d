//! Retrieval of the profile and blog documents.
//!
//! Blog documents are read concurrently and settle independently: a post that
//! cannot be read is logged and left out, it never fails the listing.

use std::path::{Path, PathBuf};

use libvitae::site::{sort_newest_first, BlogPost, Profile, SiteState, PROFILE_BASE_PATH};
use libvitae::{parse_frontmatter_with, ParseOptions};
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::config::SiteConfig;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {0}: {1}")]
    Read(String, #[source] std::io::Error),

    #[error("failed to parse blog index {0}: {1}")]
    BadIndex(String, #[source] serde_json::Error),

    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

async fn read_text(path: &Path) -> Result<String, LoadError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| LoadError::Read(path.display().to_string(), e))
}

/// Read and parse the profile document.
pub async fn load_profile(site: &SiteConfig, options: &ParseOptions) -> Result<Profile, LoadError> {
    let path = site.profile_path();
    let text = read_text(&path).await?;
    let text = libvitae::site::resolve_image_paths(&text, PROFILE_BASE_PATH);
    let options = options.clone().with_filename(site.profile.clone());
    let parsed = parse_frontmatter_with(&text, &options);
    info!(path = %path.display(), fields = parsed.value.metadata.len(), "loaded profile");
    Ok(Profile::from_metadata(parsed.value.metadata))
}

/// Read the blog index: a JSON array of paths relative to the blog directory.
pub async fn read_index(path: &Path) -> Result<Vec<String>, LoadError> {
    let text = read_text(path).await?;
    serde_json::from_str(&text).map_err(|e| LoadError::BadIndex(path.display().to_string(), e))
}

async fn load_post(
    blog_path: PathBuf,
    blog_dir: String,
    id: String,
    options: ParseOptions,
) -> Result<BlogPost, LoadError> {
    let text = read_text(&blog_path.join(&id)).await?;
    let options = options.with_filename(id.clone());
    let (post, diagnostics) = BlogPost::from_document_with(&id, &text, &blog_dir, &options);
    for diagnostic in &diagnostics {
        debug!("{}", diagnostic);
    }
    Ok(post)
}

/// Load every post listed in the index, newest first.
///
/// A missing or unreadable index yields no posts.
pub async fn load_blog_posts(site: &SiteConfig, options: &ParseOptions) -> Vec<BlogPost> {
    let index_path = site.index_path();
    let ids = match read_index(&index_path).await {
        Ok(ids) => ids,
        Err(e) => {
            warn!("Blog index unavailable: {}", e);
            return Vec::new();
        }
    };

    let mut tasks = JoinSet::new();
    for (position, id) in ids.into_iter().enumerate() {
        let blog_path = site.blog_path();
        let blog_dir = site.blog_dir.clone();
        let options = options.clone();
        tasks.spawn(async move {
            let result = load_post(blog_path, blog_dir, id.clone(), options).await;
            (position, id, result)
        });
    }

    let mut loaded = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((position, _, Ok(post))) => loaded.push((position, post)),
            Ok((_, id, Err(e))) => warn!("Could not load blog post {}: {}", id, e),
            Err(e) => warn!("{}", LoadError::from(e)),
        }
    }

    // Completion order is arbitrary; restore index order before the stable sort.
    loaded.sort_by_key(|(position, _)| *position);
    let mut posts: Vec<BlogPost> = loaded.into_iter().map(|(_, post)| post).collect();
    sort_newest_first(&mut posts);
    info!(count = posts.len(), "loaded blog posts");
    posts
}

/// Load the profile and posts together.
pub async fn load_site(site: &SiteConfig, options: &ParseOptions) -> Result<SiteState, LoadError> {
    let (profile, posts) = tokio::join!(load_profile(site, options), load_blog_posts(site, options));
    Ok(SiteState::new(profile?, posts).with_posts_per_page(site.posts_per_page))
}
