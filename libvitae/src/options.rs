//! Parser options.

use std::fmt;
use std::str::FromStr;

/// What happens to a value that was wrapped in matching quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuotedScalars {
    /// Strip the quotes, then coerce like any other value, so `"42"` becomes
    /// the number 42. Existing content files rely on this.
    #[default]
    Coerce,
    /// Quoted values are always strings.
    Preserve,
}

impl FromStr for QuotedScalars {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "coerce" => Ok(QuotedScalars::Coerce),
            "preserve" => Ok(QuotedScalars::Preserve),
            other => Err(format!(
                "unknown quoted scalar policy \"{}\" (expected \"coerce\" or \"preserve\")",
                other
            )),
        }
    }
}

impl fmt::Display for QuotedScalars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuotedScalars::Coerce => write!(f, "coerce"),
            QuotedScalars::Preserve => write!(f, "preserve"),
        }
    }
}

/// Options for a single parse.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Collect a diagnostic for every line that was skipped or reinterpreted.
    /// The parsed value is the same either way.
    pub strict: bool,
    /// Coercion policy for quoted values.
    pub quoted_scalars: QuotedScalars,
    /// Name of the source document, used in diagnostics.
    pub filename: Option<String>,
}

impl ParseOptions {
    /// Options with diagnostics enabled.
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    /// Set the source document name.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Set the quoted scalar policy.
    pub fn with_quoted_scalars(mut self, policy: QuotedScalars) -> Self {
        self.quoted_scalars = policy;
        self
    }
}
