//! Encode values back to text.
//!
//! The frontmatter encoder writes the same YAML subset the parser reads, so
//! for the shapes that subset can express, parsing the output gives back an
//! equal mapping. Shapes it cannot express degrade as follows:
//! - empty mappings are written as null
//! - numbers, booleans and nulls inside block sequences come back as strings
//! - a sequence directly inside a sequence is flattened to its text
//! - a sequence item mapping whose first entry is a container loses its nesting
//! - multi-line strings split into several lines
//!
//! Under the default quoted scalar policy a string such as `"42"` is quoted
//! but still reads back as a number.

use crate::frontmatter::Document;
use crate::inline::is_inline_array;
use crate::scalar::{find_key_colon, parse_number};
use crate::value::{Mapping, Value};

/// Output format for encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// The YAML subset read by the parser.
    Frontmatter,
    /// JSON (pretty, insertion order).
    Json,
}

/// Encode a value to a string in the specified format.
pub fn encode(value: &Value, format: Format) -> String {
    match format {
        Format::Frontmatter => encode_frontmatter(value),
        Format::Json => encode_json(value, 0),
    }
}

/// Write a document back out with its fenced header.
pub fn encode_document(document: &Document) -> String {
    let mut out = String::from("---\n");
    write_mapping(&mut out, &document.metadata, 0);
    out.push_str("---\n");
    out.push_str(&document.body);
    out
}

// =============================================================================
// Frontmatter Encoder
// =============================================================================

fn encode_frontmatter(value: &Value) -> String {
    match value {
        Value::Mapping(map) => {
            let mut out = String::new();
            write_mapping(&mut out, map, 0);
            out
        }
        other => encode_leaf(other),
    }
}

fn write_mapping(out: &mut String, map: &Mapping, indent: usize) {
    for (key, value) in map.iter() {
        out.push_str(&"  ".repeat(indent));
        write_entry(out, key, value, indent);
    }
}

/// Write `key: value` starting at the current position; nested content is
/// indented one level deeper than `indent`.
fn write_entry(out: &mut String, key: &str, value: &Value, indent: usize) {
    match value {
        Value::Mapping(map) if !map.is_empty() => {
            out.push_str(key);
            out.push_str(":\n");
            write_mapping(out, map, indent + 1);
        }
        Value::Sequence(items) if !items.is_empty() => {
            out.push_str(key);
            out.push_str(":\n");
            write_sequence(out, items, indent + 1);
        }
        Value::Sequence(_) => {
            out.push_str(key);
            out.push_str(": []\n");
        }
        Value::Null | Value::Mapping(_) => {
            out.push_str(key);
            out.push_str(":\n");
        }
        leaf => {
            out.push_str(key);
            out.push_str(": ");
            out.push_str(&encode_leaf(leaf));
            out.push('\n');
        }
    }
}

fn write_sequence(out: &mut String, items: &[Value], indent: usize) {
    let pad = "  ".repeat(indent);
    for item in items {
        out.push_str(&pad);
        out.push_str("- ");
        match item {
            Value::Mapping(map) if !map.is_empty() => {
                let mut entries = map.iter();
                if let Some((key, value)) = entries.next() {
                    write_entry(out, key, value, indent + 1);
                }
                for (key, value) in entries {
                    out.push_str(&"  ".repeat(indent + 1));
                    write_entry(out, key, value, indent + 1);
                }
            }
            other => {
                out.push_str(&encode_item(other));
                out.push('\n');
            }
        }
    }
}

/// Text for a value in `key: value` position.
fn encode_leaf(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Integer(n) => n.to_string(),
        Value::Float(f) => encode_float(*f),
        Value::String(s) => {
            if leaf_needs_quotes(s) {
                quote(s)
            } else {
                s.clone()
            }
        }
        Value::Sequence(items) => {
            let texts: Vec<String> = items.iter().map(encode_item).collect();
            format!("[{}]", texts.join(", "))
        }
        Value::Mapping(_) => String::new(),
    }
}

/// Text for a plain `- item` line.
fn encode_item(value: &Value) -> String {
    match value {
        Value::String(s) if item_needs_quotes(s) => quote(s),
        Value::String(s) => s.clone(),
        other => encode_leaf(other),
    }
}

fn encode_float(f: f64) -> String {
    let s = format!("{}", f);
    if !f.is_finite() || s.contains('.') || s.contains('e') {
        s
    } else {
        format!("{}.0", s)
    }
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s)
}

/// Whether a string would read back as something else in value position.
fn leaf_needs_quotes(s: &str) -> bool {
    s.is_empty()
        || s == "true"
        || s == "false"
        || parse_number(s).is_some()
        || is_inline_array(s)
        || has_edge_quirk(s)
}

/// Whether a string would read back as something else as a sequence item.
fn item_needs_quotes(s: &str) -> bool {
    has_edge_quirk(s) || find_key_colon(s).is_some()
}

/// Surrounding whitespace is trimmed and surrounding quotes are stripped.
fn has_edge_quirk(s: &str) -> bool {
    s.trim() != s || s.starts_with('"') || s.starts_with('\'')
}

// =============================================================================
// JSON Encoder
// =============================================================================

fn encode_json(value: &Value, indent: usize) -> String {
    let pad = "  ".repeat(indent);
    let pad1 = "  ".repeat(indent + 1);

    match value {
        Value::Null => "null".to_string(),
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) => "false".to_string(),
        Value::Integer(n) => n.to_string(),
        Value::Float(f) => {
            if f.is_nan() || f.is_infinite() {
                "null".to_string() // JSON doesn't support NaN/Infinity
            } else {
                format!("{}", f)
            }
        }
        Value::String(s) => encode_json_string(s),
        Value::Sequence(items) => {
            if items.is_empty() {
                "[]".to_string()
            } else {
                let items: Vec<String> = items
                    .iter()
                    .map(|v| format!("{}{}", pad1, encode_json(v, indent + 1)))
                    .collect();
                format!("[\n{}\n{}]", items.join(",\n"), pad)
            }
        }
        Value::Mapping(map) => {
            if map.is_empty() {
                "{}".to_string()
            } else {
                let items: Vec<String> = map
                    .iter()
                    .map(|(k, v)| {
                        format!(
                            "{}{}: {}",
                            pad1,
                            encode_json_string(k),
                            encode_json(v, indent + 1)
                        )
                    })
                    .collect();
                format!("{{\n{}\n{}}}", items.join(",\n"), pad)
            }
        }
    }
}

fn encode_json_string(s: &str) -> String {
    let mut result = String::from("\"");
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            '\x08' => result.push_str("\\b"),
            '\x0c' => result.push_str("\\f"),
            c if c.is_control() => {
                result.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => result.push(c),
        }
    }
    result.push('"');
    result
}
