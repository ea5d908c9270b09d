//! TOML output for parsed metadata.
//!
//! Mapping from frontmatter values to TOML:
//!   - Value::Null          -> key omitted (TOML has no null)
//!   - Value::Bool          -> TOML boolean
//!   - Value::Integer       -> TOML integer (if fits in i64, otherwise error)
//!   - Value::Float         -> TOML float
//!   - Value::String        -> TOML string
//!   - Value::Sequence      -> TOML array (mappings become inline tables)
//!   - Value::Mapping       -> TOML table, keys in document order
//!
//! Lossy edges:
//!   - Null entries are dropped from tables; a null inside an array is an error.
//!   - TOML integers are i64; big integers that overflow will error.
//!   - TOML requires the top-level value to be a table.

use libvitae::Value;
use num_traits::ToPrimitive;
use toml_edit::DocumentMut;

/// Encode a Value as a TOML string.
pub fn encode(value: &Value) -> Result<String, String> {
    match value_to_toml(value)? {
        Some(toml_edit::Item::Table(table)) => {
            let mut doc = DocumentMut::new();
            for (key, value) in table.iter() {
                doc[key] = value.clone();
            }
            Ok(doc.to_string())
        }
        _ => Err("TOML requires the top-level value to be a table".to_string()),
    }
}

fn value_to_toml(value: &Value) -> Result<Option<toml_edit::Item>, String> {
    let item = match value {
        Value::Null => return Ok(None),
        Value::Bool(b) => toml_edit::value(*b),
        Value::Integer(n) => {
            let i = n
                .to_i64()
                .ok_or_else(|| format!("Integer {} too large for TOML (i64)", n))?;
            toml_edit::value(i)
        }
        Value::Float(f) => toml_edit::value(*f),
        Value::String(s) => toml_edit::value(s.clone()),
        Value::Sequence(items) => {
            let mut arr = toml_edit::Array::new();
            for v in items {
                match value_to_toml(v)? {
                    Some(toml_edit::Item::Value(val)) => arr.push(val),
                    Some(toml_edit::Item::Table(t)) => {
                        // Convert table to inline table for array elements
                        arr.push(toml_edit::Value::InlineTable(t.into_inline_table()));
                    }
                    Some(_) => return Err("Unexpected TOML item type in array".to_string()),
                    None => return Err("TOML has no null type".to_string()),
                }
            }
            toml_edit::Item::Value(toml_edit::Value::Array(arr))
        }
        Value::Mapping(map) => {
            let mut table = toml_edit::Table::new();
            for (k, v) in map.iter() {
                if let Some(item) = value_to_toml(v)? {
                    table.insert(k, item);
                }
            }
            toml_edit::Item::Table(table)
        }
    };
    Ok(Some(item))
}

#[cfg(test)]
mod tests {
    use super::*;
    use libvitae::parse_yaml;

    #[test]
    fn test_encode_profile_shape() {
        let map = parse_yaml(
            "name: Ada\nyear: 1843\nmissing:\ncontact:\n  email: a@b.com\npapers:\n  - title: Notes\n    year: 1843",
        );
        let toml = encode(&Value::Mapping(map)).unwrap();
        let back: ::toml::Value = ::toml::from_str(&toml).unwrap();
        assert_eq!(back["name"].as_str(), Some("Ada"));
        assert_eq!(back["year"].as_integer(), Some(1843));
        assert!(back.get("missing").is_none());
        assert_eq!(back["contact"]["email"].as_str(), Some("a@b.com"));
        assert_eq!(back["papers"][0]["title"].as_str(), Some("Notes"));
    }

    #[test]
    fn test_non_table_is_an_error() {
        assert!(encode(&Value::from("x")).is_err());
    }
}
