//! Frontmatter splitting.
//!
//! A document may open with a header fenced by two `---` lines:
//!
//! ```text
//! ---
//! title: Hello
//! ---
//! Body text
//! ```
//!
//! The opening fence must be the very first line (a byte order mark before it
//! is tolerated). Both fences may carry trailing whitespace. Anything that is
//! not a well-formed header leaves the whole text as body.

use crate::error::{DiagnosticKind, Diagnostics, ParseContext};
use crate::options::ParseOptions;
use crate::parser::parse_block;
use crate::value::Mapping;

const DELIMITER: &str = "---";

/// A document split into metadata and body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Parsed frontmatter; empty when there is none.
    pub metadata: Mapping,
    /// Everything after the closing fence, or the whole text.
    pub body: String,
}

/// Where a document's header was found, if anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Header<'a> {
    Absent,
    Unclosed,
    Found { block: &'a str, body: &'a str },
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

/// Locate the fenced header at the start of `text`.
pub(crate) fn find_header(text: &str) -> Header<'_> {
    let source = text.strip_prefix('\u{feff}').unwrap_or(text);
    let Some(first_end) = source.find('\n') else {
        return Header::Absent;
    };
    if !is_delimiter(&source[..first_end]) {
        return Header::Absent;
    }

    let rest = &source[first_end + 1..];
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let content = line.strip_suffix('\n').unwrap_or(line);
        if is_delimiter(content) {
            let block = &rest[..offset];
            return Header::Found {
                block: block.strip_suffix('\n').unwrap_or(block),
                body: &rest[offset + line.len()..],
            };
        }
        offset += line.len();
    }
    Header::Unclosed
}

/// Split and parse a document.
pub(crate) fn parse_document(
    text: &str,
    options: &ParseOptions,
    diagnostics: &mut Diagnostics,
) -> Document {
    match find_header(text) {
        Header::Found { block, body } => {
            // The block starts on the line after the opening fence.
            let ctx = ParseContext::new(options.filename.as_deref(), 1);
            Document {
                metadata: parse_block(block, options, &ctx, diagnostics),
                body: body.to_string(),
            }
        }
        Header::Unclosed => {
            let ctx = ParseContext::new(options.filename.as_deref(), 0);
            diagnostics.report(&ctx, 0, DiagnosticKind::UnclosedFrontmatter);
            Document {
                metadata: Mapping::new(),
                body: text.to_string(),
            }
        }
        Header::Absent => Document {
            metadata: Mapping::new(),
            body: text.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_header() {
        assert_eq!(
            find_header("---\ntitle: Hi\n---\n# Body\n"),
            Header::Found {
                block: "title: Hi",
                body: "# Body\n"
            }
        );
    }

    #[test]
    fn test_trailing_whitespace_and_crlf_fences() {
        assert_eq!(
            find_header("---  \r\na: 1\r\n---\t\r\nbody"),
            Header::Found {
                block: "a: 1\r",
                body: "body"
            }
        );
    }

    #[test]
    fn test_empty_header() {
        assert_eq!(
            find_header("---\n---\nbody"),
            Header::Found {
                block: "",
                body: "body"
            }
        );
    }

    #[test]
    fn test_blank_lines_after_closing_fence_stay_in_body() {
        assert_eq!(
            find_header("---\ntitle: Hi\n---\n\n\n# Title\n"),
            Header::Found {
                block: "title: Hi",
                body: "\n\n# Title\n"
            }
        );
    }

    #[test]
    fn test_closing_fence_at_end_of_text() {
        assert_eq!(
            find_header("---\na: 1\n---"),
            Header::Found {
                block: "a: 1",
                body: ""
            }
        );
    }

    #[test]
    fn test_not_a_header() {
        assert_eq!(find_header("# Title\n---\na: 1\n---\n"), Header::Absent);
        assert_eq!(find_header(" ---\na: 1\n---\n"), Header::Absent);
        assert_eq!(find_header("----\na: 1\n----\n"), Header::Absent);
        assert_eq!(find_header("---"), Header::Absent);
        assert_eq!(find_header("---\na: 1\nno closing"), Header::Unclosed);
    }

    #[test]
    fn test_byte_order_mark_is_tolerated() {
        assert_eq!(
            find_header("\u{feff}---\na: 1\n---\nbody"),
            Header::Found {
                block: "a: 1",
                body: "body"
            }
        );
    }

    #[test]
    fn test_unclosed_header_is_reported() {
        let mut diagnostics = Diagnostics::new(true);
        let text = "---\ntitle: x\n";
        let document = parse_document(text, &ParseOptions::strict(), &mut diagnostics);
        assert!(document.metadata.is_empty());
        assert_eq!(document.body, text);
        let items = diagnostics.into_vec();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].line, 1);
        assert_eq!(items[0].kind, DiagnosticKind::UnclosedFrontmatter);
    }

    #[test]
    fn test_block_lines_are_numbered_from_the_document() {
        let mut diagnostics = Diagnostics::new(true);
        parse_document(
            "---\ntitle: x\nnonsense\n---\n",
            &ParseOptions::strict(),
            &mut diagnostics,
        );
        let items = diagnostics.into_vec();
        assert_eq!(items[0].line, 3);
    }
}
