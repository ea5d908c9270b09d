//! Scalar coercion.
//!
//! A raw token becomes a typed value by fixed precedence, first match wins:
//! empty → null, `true`/`false` → boolean, numeric → number, anything else →
//! string. Quote stripping happens before coercion; whether the stripped
//! quotes still protect the value is up to [`QuotedScalars`].

use crate::options::QuotedScalars;
use crate::value::Value;
use num_bigint::BigInt;

/// A trimmed token with at most one layer of matching quotes removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    /// Whether a pair of matching quotes was stripped.
    pub quoted: bool,
}

impl<'a> Token<'a> {
    /// An unquoted token.
    pub fn plain(text: &'a str) -> Self {
        Self {
            text,
            quoted: false,
        }
    }
}

/// Strip one layer of matching single or double quotes.
///
/// Mismatched pairs (`"abc'`) and a lone quote character are left untouched.
pub fn strip_quotes(s: &str) -> Token<'_> {
    let bytes = s.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        if (first == b'"' || first == b'\'') && bytes[bytes.len() - 1] == first {
            return Token {
                text: &s[1..s.len() - 1],
                quoted: true,
            };
        }
    }
    Token::plain(s)
}

/// Whether a token starts or ends with a quote that `strip_quotes` left in place.
pub fn has_mismatched_quotes(raw: &str, token: Token<'_>) -> bool {
    !token.quoted && (raw.starts_with(['"', '\'']) || raw.ends_with(['"', '\'']))
}

/// Coerce a token by the scalar precedence rules.
pub fn coerce(token: Token<'_>, policy: QuotedScalars) -> Value {
    if token.quoted && policy == QuotedScalars::Preserve {
        return Value::String(token.text.to_string());
    }
    match token.text {
        "" => Value::Null,
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        s => parse_number(s).unwrap_or_else(|| Value::String(s.to_string())),
    }
}

/// Parse a decimal number literal.
///
/// Accepts an optional sign, digits with an optional fraction, and an optional
/// exponent (`42`, `-7`, `+3`, `2.5`, `.5`, `1.`, `6e23`). Surrounding
/// whitespace is ignored. Integers become [`Value::Integer`] at any size;
/// everything else becomes [`Value::Float`]. Words like `inf` and `NaN`, hex
/// literals and digit separators are not numbers here, and neither is a
/// literal that overflows `f64`.
pub fn parse_number(s: &str) -> Option<Value> {
    let s = s.trim();
    if is_integer_pattern(s) {
        let digits = s.strip_prefix('+').unwrap_or(s);
        return digits.parse::<BigInt>().ok().map(Value::Integer);
    }
    if is_float_pattern(s) {
        return s
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(Value::Float);
    }
    None
}

/// Optional sign followed by one or more ASCII digits.
fn is_integer_pattern(s: &str) -> bool {
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Optional sign, mantissa with at least one digit, optional exponent.
fn is_float_pattern(s: &str) -> bool {
    let body = s.strip_prefix(['-', '+']).unwrap_or(s);
    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(pos) => (&body[..pos], Some(&body[pos + 1..])),
        None => (body, None),
    };

    let (whole, fraction) = match mantissa.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (mantissa, ""),
    };
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if whole.len() + fraction.len() == 0 || !all_digits(whole) || !all_digits(fraction) {
        return false;
    }

    match exponent {
        None => true,
        Some(exp) => {
            let exp = exp.strip_prefix(['-', '+']).unwrap_or(exp);
            !exp.is_empty() && all_digits(exp)
        }
    }
}

/// Byte index of the colon that separates a key from its value.
///
/// This is the first colon, unless the text opens with a quoted run, in which
/// case colons inside that run are skipped. A colon at index 0 (an empty key)
/// does not count.
pub fn find_key_colon(s: &str) -> Option<usize> {
    let search_from = match s.as_bytes().first() {
        Some(&quote @ (b'"' | b'\'')) => s[1..]
            .find(quote as char)
            .map(|close| close + 2)
            .unwrap_or(0),
        _ => 0,
    };
    s[search_from..]
        .find(':')
        .map(|pos| pos + search_from)
        .filter(|&pos| pos > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coerce_plain(s: &str) -> Value {
        coerce(Token::plain(s), QuotedScalars::Coerce)
    }

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes("\"Hello\"").text, "Hello");
        assert_eq!(strip_quotes("'Hello'").text, "Hello");
        assert!(strip_quotes("'Hello'").quoted);
        assert_eq!(strip_quotes("\"Hello'"), Token::plain("\"Hello'"));
        assert_eq!(strip_quotes("\""), Token::plain("\""));
        assert_eq!(strip_quotes("\"\"").text, "");
        assert_eq!(strip_quotes("\"\"a\"\"").text, "\"a\"");
    }

    #[test]
    fn test_mismatched_quotes() {
        for raw in ["\"Hello'", "\"Hello", "Hello\"", "it'", "\""] {
            assert!(has_mismatched_quotes(raw, strip_quotes(raw)), "{}", raw);
        }
        for raw in ["\"Hello\"", "'Hello'", "Hello", "it's", "''"] {
            assert!(!has_mismatched_quotes(raw, strip_quotes(raw)), "{}", raw);
        }
    }

    #[test]
    fn test_coerce_precedence() {
        assert_eq!(coerce_plain(""), Value::Null);
        assert_eq!(coerce_plain("true"), Value::Bool(true));
        assert_eq!(coerce_plain("false"), Value::Bool(false));
        assert_eq!(coerce_plain("True"), Value::from("True"));
        assert_eq!(coerce_plain("42"), Value::from(42));
        assert_eq!(coerce_plain("-3.5"), Value::from(-3.5));
        assert_eq!(coerce_plain("2024-01-15"), Value::from("2024-01-15"));
        assert_eq!(coerce_plain("a@b.com"), Value::from("a@b.com"));
    }

    #[test]
    fn test_quoted_numbers_follow_policy() {
        let token = strip_quotes("\"42\"");
        assert_eq!(coerce(token, QuotedScalars::Coerce), Value::from(42));
        assert_eq!(coerce(token, QuotedScalars::Preserve), Value::from("42"));

        let empty = strip_quotes("''");
        assert_eq!(coerce(empty, QuotedScalars::Coerce), Value::Null);
        assert_eq!(coerce(empty, QuotedScalars::Preserve), Value::from(""));
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("007"), Some(Value::from(7)));
        assert_eq!(parse_number("+3"), Some(Value::from(3)));
        assert_eq!(parse_number(" 12 "), Some(Value::from(12)));
        assert_eq!(parse_number(".5"), Some(Value::from(0.5)));
        assert_eq!(parse_number("1."), Some(Value::from(1.0)));
        assert_eq!(parse_number("6e3"), Some(Value::from(6000.0)));
        assert_eq!(parse_number("1E-2"), Some(Value::from(0.01)));
        assert!(matches!(
            parse_number("123456789012345678901234567890"),
            Some(Value::Integer(_))
        ));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("."), None);
        assert_eq!(parse_number("-"), None);
        assert_eq!(parse_number("1e"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("0x10"), None);
        assert_eq!(parse_number("1_000"), None);
        assert_eq!(parse_number("1.2.3"), None);
        assert_eq!(parse_number("1e400"), None);
        assert_eq!(parse_number("-1e400"), None);
        assert_eq!(coerce_plain("1e400"), Value::from("1e400"));
    }

    #[test]
    fn test_find_key_colon() {
        assert_eq!(find_key_colon("title: Hello"), Some(5));
        assert_eq!(find_key_colon("url: http://x"), Some(3));
        assert_eq!(find_key_colon("http://x"), Some(4));
        assert_eq!(find_key_colon(": orphan"), None);
        assert_eq!(find_key_colon("plain text"), None);
        assert_eq!(find_key_colon("\"a: b\""), None);
        assert_eq!(find_key_colon("\"a: b\": c"), Some(6));
        assert_eq!(find_key_colon("it's: fine"), Some(4));
    }
}
