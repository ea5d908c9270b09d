//! Blog index generation.

use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::info;
use walkdir::WalkDir;

const POST_FILE: &str = "index.md";

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("blog directory not found at {0}")]
    MissingBlogDir(String),

    #[error("failed to walk {0}: {1}")]
    Walk(String, #[source] walkdir::Error),

    #[error("failed to write {0}: {1}")]
    Write(String, #[source] std::io::Error),

    #[error("failed to encode index: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Paths of every `index.md` under `blog_dir`, relative to it with `/`
/// separators, in reverse lexical order.
pub fn generate_index(blog_dir: &Path) -> Result<Vec<String>, IndexError> {
    if !blog_dir.is_dir() {
        return Err(IndexError::MissingBlogDir(blog_dir.display().to_string()));
    }

    let mut entries = Vec::new();
    for entry in WalkDir::new(blog_dir) {
        let entry = entry.map_err(|e| IndexError::Walk(blog_dir.display().to_string(), e))?;
        if !entry.file_type().is_file() || entry.file_name() != POST_FILE {
            continue;
        }
        if let Ok(relative) = entry.path().strip_prefix(blog_dir) {
            let parts: Vec<String> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            entries.push(parts.join("/"));
        }
    }

    entries.sort_by(|a, b| b.cmp(a));
    Ok(entries)
}

/// Render the index as pretty JSON.
pub fn render_index(entries: &[String]) -> Result<String, IndexError> {
    Ok(serde_json::to_string_pretty(entries)?)
}

/// Generate the index for `blog_dir` and write it to `output`.
pub fn write_index(blog_dir: &Path, output: &Path) -> Result<Vec<String>, IndexError> {
    let entries = generate_index(blog_dir)?;
    let json = render_index(&entries)?;
    fs::write(output, json).map_err(|e| IndexError::Write(output.display().to_string(), e))?;
    info!(count = entries.len(), output = %output.display(), "wrote blog index");
    Ok(entries)
}
