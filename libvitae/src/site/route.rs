//! Hash routes.

/// A page of the site, addressed by the URL fragment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    /// The profile page (`""` or anything unrecognised).
    #[default]
    Cv,
    /// The post listing (`#blog`).
    Blog,
    /// A single post (`#blog/<id>`).
    BlogDetail(String),
}

impl Route {
    /// Parse a fragment, with or without its leading `#`.
    pub fn parse(hash: &str) -> Self {
        let hash = hash.strip_prefix('#').unwrap_or(hash);
        match hash.strip_prefix("blog/") {
            Some(id) if !id.is_empty() => Route::BlogDetail(id.to_string()),
            _ if hash == "blog" || hash == "blog/" => Route::Blog,
            _ => Route::Cv,
        }
    }

    pub fn to_hash(&self) -> String {
        match self {
            Route::Cv => String::new(),
            Route::Blog => "#blog".to_string(),
            Route::BlogDetail(id) => format!("#blog/{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Route::parse(""), Route::Cv);
        assert_eq!(Route::parse("#cv"), Route::Cv);
        assert_eq!(Route::parse("#blog"), Route::Blog);
        assert_eq!(
            Route::parse("#blog/intro/index.md"),
            Route::BlogDetail("intro/index.md".to_string())
        );
        assert_eq!(Route::parse("#blogroll"), Route::Cv);
    }

    #[test]
    fn test_to_hash_inverts_parse() {
        for route in [
            Route::Cv,
            Route::Blog,
            Route::BlogDetail("a/index.md".to_string()),
        ] {
            assert_eq!(Route::parse(&route.to_hash()), route);
        }
    }
}
