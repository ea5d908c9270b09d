//! Diagnostics for frontmatter parsing.
//!
//! Parsing never fails. Lines that cannot be placed are dropped and parsing
//! carries on; in strict mode each of those decisions is also recorded as a
//! [`Diagnostic`] so authors can find out why a field went missing.

use thiserror::Error;
use tracing::debug;

/// Parse context carrying the filename and line offset for diagnostics.
#[derive(Clone, Debug, Default)]
pub struct ParseContext {
    pub filename: Option<String>,
    /// Lines in the document that precede the block being parsed.
    pub line_offset: usize,
}

impl ParseContext {
    /// Create a new parse context.
    pub fn new(filename: Option<&str>, line_offset: usize) -> Self {
        Self {
            filename: filename.map(String::from),
            line_offset,
        }
    }

    /// One-based document line for a zero-based block line.
    pub fn document_line(&self, block_line: usize) -> usize {
        block_line + self.line_offset + 1
    }
}

/// What the parser did with a line it could not take at face value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Neither `key: value` nor `- item`.
    #[error("Unrecognized line (expected \"key: value\" or \"- item\"), skipped")]
    UnrecognizedLine,

    /// A `- item` line with no sequence to append to.
    #[error("Sequence item has no sequence to belong to, skipped")]
    OrphanSequenceItem,

    /// A key inside a sequence rather than a mapping.
    #[error("Key \"{0}\" appears inside a sequence, dropped")]
    KeyInSequence(String),

    /// A key had an inline value but the next line was nested deeper.
    #[error("Inline value of \"{0}\" discarded in favour of the nested block")]
    DiscardedInlineValue(String),

    /// A value opened with a quote but did not close with the same one.
    #[error("Mismatched quotes, value kept verbatim")]
    MismatchedQuotes,

    /// A key was repeated within one mapping.
    #[error("Duplicate key \"{0}\", later value wins")]
    DuplicateKey(String),

    /// An opening `---` without a closing one.
    #[error("Opening \"---\" has no closing delimiter, whole text treated as body")]
    UnclosedFrontmatter,
}

/// A located diagnostic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}line {line}: {kind}", file_prefix(.filename))]
pub struct Diagnostic {
    /// One-based line number within the document.
    pub line: usize,
    pub kind: DiagnosticKind,
    pub filename: Option<String>,
}

fn file_prefix(filename: &Option<String>) -> String {
    match filename {
        Some(name) => format!("{}: ", name),
        None => String::new(),
    }
}

/// Collects diagnostics when enabled; always logs them at debug level.
#[derive(Debug, Default)]
pub(crate) struct Diagnostics {
    enabled: bool,
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            enabled,
            items: Vec::new(),
        }
    }

    /// Record `kind` at a zero-based line of the block described by `ctx`.
    pub(crate) fn report(&mut self, ctx: &ParseContext, block_line: usize, kind: DiagnosticKind) {
        let diagnostic = Diagnostic {
            line: ctx.document_line(block_line),
            kind,
            filename: ctx.filename.clone(),
        };
        debug!("{}", diagnostic);
        if self.enabled {
            self.items.push(diagnostic);
        }
    }

    pub(crate) fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}
