//! Frontmatter parser and site model for a static personal site.
//!
//! Profile and blog documents are markdown with a `---`-fenced header written
//! in a small, forgiving YAML subset: scalars, nested mappings, nested
//! sequences, sequences of mappings, and single-line `[a, b]` arrays.
//!
//! # Parsing Pipeline
//!
//! 1. **Splitter**: Separates the fenced header from the body. A missing or
//!    malformed header means "no metadata", never an error.
//!
//! 2. **Scanner**: Converts the header into significant lines with their
//!    indentation, dropping blank and comment lines.
//!
//! 3. **Stack Parser**: Places each line into the container opened by the
//!    nearest shallower line, building a [`Mapping`] tree.
//!
//! Parsing never fails. Lines that do not fit are skipped; pass
//! [`ParseOptions::strict`] to get a [`Diagnostic`] for each of them.
//!
//! The [`site`] module turns parsed documents into the profile, blog posts,
//! search results and pages that a renderer consumes.

mod encode;
mod error;
mod frontmatter;
mod inline;
mod options;
mod parser;
mod scalar;
mod scanner;
pub mod site;
mod value;

pub use encode::{encode, encode_document, Format};
pub use error::{Diagnostic, DiagnosticKind};
pub use frontmatter::Document;
pub use options::{ParseOptions, QuotedScalars};
pub use scalar::parse_number;
pub use value::{Mapping, Value};

use error::{Diagnostics, ParseContext};

/// A parse result together with any diagnostics collected in strict mode.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    pub value: T,
    pub diagnostics: Vec<Diagnostic>,
}

/// Split a document into its frontmatter metadata and body.
///
/// # Example
///
/// ```
/// use libvitae::{parse_frontmatter, Value};
///
/// let doc = parse_frontmatter("---\ntitle: Hello\n---\nBody\n");
/// assert_eq!(doc.metadata.get("title"), Some(&Value::from("Hello")));
/// assert_eq!(doc.body, "Body\n");
/// ```
pub fn parse_frontmatter(text: &str) -> Document {
    parse_frontmatter_with(text, &ParseOptions::default()).value
}

/// Split a document with explicit options.
pub fn parse_frontmatter_with(text: &str, options: &ParseOptions) -> Parsed<Document> {
    let mut diagnostics = Diagnostics::new(options.strict);
    let document = frontmatter::parse_document(text, options, &mut diagnostics);
    Parsed {
        value: document,
        diagnostics: diagnostics.into_vec(),
    }
}

/// Parse a YAML-subset block (without fences) into its root mapping.
///
/// # Example
///
/// ```
/// use libvitae::{parse_yaml, Value};
///
/// let map = parse_yaml("contact:\n  email: a@b.com\n");
/// let email = map.get("contact").and_then(|c| c.get("email"));
/// assert_eq!(email, Some(&Value::from("a@b.com")));
/// ```
pub fn parse_yaml(block: &str) -> Mapping {
    parse_yaml_with(block, &ParseOptions::default()).value
}

/// Parse a YAML-subset block with explicit options.
pub fn parse_yaml_with(block: &str, options: &ParseOptions) -> Parsed<Mapping> {
    let mut diagnostics = Diagnostics::new(options.strict);
    let ctx = ParseContext::new(options.filename.as_deref(), 0);
    let mapping = parser::parse_block(block, options, &ctx, &mut diagnostics);
    Parsed {
        value: mapping,
        diagnostics: diagnostics.into_vec(),
    }
}
