//! Inline arrays: `[a, "b c", 'd']` on a single line.
//!
//! Items are split on every comma, so neither nested brackets nor quoted
//! commas are supported. Items stay strings: one layer of matching quotes is
//! stripped and nothing is coerced, even when an item looks like a number.

use crate::scalar::strip_quotes;
use crate::value::Value;

/// Whether a value is written as an inline array.
pub fn is_inline_array(s: &str) -> bool {
    s.starts_with('[') && s.ends_with(']')
}

/// Parse an inline array into its items.
///
/// The input must satisfy [`is_inline_array`]; anything else yields no items.
pub fn parse_inline_array(s: &str) -> Vec<Value> {
    let Some(inner) = s.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) else {
        return Vec::new();
    };
    if inner.trim().is_empty() {
        return Vec::new();
    }
    inner
        .split(',')
        .map(|item| Value::String(strip_quotes(item.trim()).text.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<Value> {
        items.iter().map(|s| Value::from(*s)).collect()
    }

    #[test]
    fn test_inline_array_items_are_strings() {
        assert_eq!(
            parse_inline_array("[a, \"b c\", d]"),
            strings(&["a", "b c", "d"])
        );
        assert_eq!(
            parse_inline_array("[1, true, '2']"),
            strings(&["1", "true", "2"])
        );
    }

    #[test]
    fn test_empty_inline_array() {
        assert!(parse_inline_array("[]").is_empty());
        assert!(parse_inline_array("[   ]").is_empty());
    }

    #[test]
    fn test_commas_always_split() {
        assert_eq!(
            parse_inline_array("[\"a, b\", c]"),
            strings(&["\"a", "b\"", "c"])
        );
        assert_eq!(parse_inline_array("[,]"), strings(&["", ""]));
    }

    #[test]
    fn test_is_inline_array() {
        assert!(is_inline_array("[x]"));
        assert!(!is_inline_array("[x"));
        assert!(!is_inline_array("x]"));
    }
}
