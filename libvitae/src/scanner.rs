//! Phase 1: Scanner
//!
//! The scanner converts a frontmatter block into scan lines. It performs:
//! - Line splitting (on `\n`; a trailing `\r` is trimmed with the rest)
//! - Indentation counting (every leading whitespace character counts as one)
//! - Blank line and comment filtering
//!
//! Because blank and comment lines never reach the parser, the parser's
//! one-line lookahead always sees the next line that carries content.

/// A single significant line after scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanLine<'a> {
    /// Line content with surrounding whitespace removed.
    pub text: &'a str,
    /// Number of leading whitespace characters.
    pub indent: usize,
    /// Zero-based line number within the block.
    pub line_num: usize,
}

impl ScanLine<'_> {
    /// Whether this line is a sequence item (`- ...`).
    pub fn is_item(&self) -> bool {
        self.text.starts_with('-')
    }
}

/// Scan a block into its significant lines.
pub fn scan(block: &str) -> Vec<ScanLine<'_>> {
    block
        .split('\n')
        .enumerate()
        .filter_map(|(line_num, raw)| {
            let text = raw.trim();
            if text.is_empty() || text.starts_with('#') {
                return None;
            }
            Some(ScanLine {
                text,
                indent: count_indent(raw),
                line_num,
            })
        })
        .collect()
}

/// Count the leading whitespace characters of a line.
fn count_indent(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_indent() {
        assert_eq!(count_indent(""), 0);
        assert_eq!(count_indent("hello"), 0);
        assert_eq!(count_indent("  hello"), 2);
        assert_eq!(count_indent("\t hello"), 2);
    }

    #[test]
    fn test_scan_skips_blank_and_comments() {
        let lines = scan("# heading\nname: Ada\n\n   \n  # indented comment\n  title: Dr");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "name: Ada");
        assert_eq!(lines[0].line_num, 1);
        assert_eq!(lines[1].text, "title: Dr");
        assert_eq!(lines[1].indent, 2);
        assert_eq!(lines[1].line_num, 5);
    }

    #[test]
    fn test_scan_trims_carriage_return() {
        let lines = scan("a: 1\r\n- b\r\n");
        assert_eq!(lines[0].text, "a: 1");
        assert!(lines[1].is_item());
    }
}
