//! `vitae.toml` configuration.

use std::fs;
use std::path::{Path, PathBuf};

use libvitae::{ParseOptions, QuotedScalars};
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "vitae.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found at {0}")]
    NotFound(String),

    #[error("failed to read config file {0}: {1}")]
    ReadError(String, #[source] std::io::Error),

    #[error("failed to parse TOML in {0}: {1}")]
    ParseError(String, #[source] toml::de::Error),

    #[error("invalid [parser] quoted_scalars in {0}: {1}")]
    BadPolicy(String, String),

    #[error("posts_per_page must be at least 1")]
    ZeroPageSize,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub parser: ParserConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    pub root: PathBuf,
    pub profile: String,
    pub blog_dir: String,
    pub index: String,
    pub posts_per_page: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            profile: "profile.md".to_string(),
            blog_dir: "blog".to_string(),
            index: "blog-index.json".to_string(),
            posts_per_page: libvitae::site::ITEMS_PER_PAGE,
        }
    }
}

impl SiteConfig {
    pub fn profile_path(&self) -> PathBuf {
        self.root.join(&self.profile)
    }

    pub fn blog_path(&self) -> PathBuf {
        self.root.join(&self.blog_dir)
    }

    pub fn index_path(&self) -> PathBuf {
        self.root.join(&self.index)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ParserConfig {
    pub quoted_scalars: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            quoted_scalars: QuotedScalars::default().to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `vitae.toml` in the current
    /// directory is used when present, else the built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
        let path = match explicit {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.display().to_string()));
                }
                p.to_path_buf()
            }
            None => {
                let p = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !p.exists() {
                    return Ok(Config::default());
                }
                p
            }
        };

        let s = fs::read_to_string(&path)
            .map_err(|e| ConfigError::ReadError(path.display().to_string(), e))?;
        Config::from_toml(&s, &path.display().to_string())
    }

    /// Parse and validate configuration text; `origin` names it in errors.
    pub fn from_toml(s: &str, origin: &str) -> Result<Config, ConfigError> {
        let config: Config =
            toml::from_str(s).map_err(|e| ConfigError::ParseError(origin.to_string(), e))?;
        config
            .quoted_scalars()
            .map_err(|e| ConfigError::BadPolicy(origin.to_string(), e))?;
        if config.site.posts_per_page == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        Ok(config)
    }

    pub fn quoted_scalars(&self) -> Result<QuotedScalars, String> {
        self.parser.quoted_scalars.parse()
    }

    /// Parse options for site documents.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions::default().with_quoted_scalars(self.quoted_scalars().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_toml("", "test").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.site.profile_path(), PathBuf::from("./profile.md"));
        assert_eq!(config.site.posts_per_page, 10);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.quoted_scalars(), Ok(QuotedScalars::Coerce));
    }

    #[test]
    fn test_partial_sections() {
        let config = Config::from_toml(
            "[site]\nroot = \"site\"\nposts_per_page = 5\n[parser]\nquoted_scalars = \"preserve\"\n",
            "test",
        )
        .unwrap();
        assert_eq!(config.site.blog_path(), PathBuf::from("site/blog"));
        assert_eq!(config.site.index, "blog-index.json");
        assert_eq!(config.site.posts_per_page, 5);
        assert_eq!(
            config.parse_options().quoted_scalars,
            QuotedScalars::Preserve
        );
    }

    #[test]
    fn test_bad_policy() {
        let err = Config::from_toml("[parser]\nquoted_scalars = \"maybe\"\n", "vitae.toml")
            .unwrap_err();
        assert!(matches!(err, ConfigError::BadPolicy(_, _)));
    }

    #[test]
    fn test_zero_page_size() {
        let err = Config::from_toml("[site]\nposts_per_page = 0\n", "vitae.toml").unwrap_err();
        assert!(matches!(err, ConfigError::ZeroPageSize));
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/nonexistent/vitae.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::from_toml("[site\n", "vitae.toml").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_, _)));
    }
}
