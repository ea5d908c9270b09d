//! YAML output for parsed metadata.
//!
//! Mapping from frontmatter values to YAML:
//!   - Value::Null         -> YAML null
//!   - Value::Bool         -> YAML bool
//!   - Value::Integer      -> YAML integer (as a string if it exceeds i64/u64)
//!   - Value::Float        -> YAML float (including .nan, .inf, -.inf)
//!   - Value::String       -> YAML string
//!   - Value::Sequence     -> YAML sequence
//!   - Value::Mapping      -> YAML mapping, keys in document order

use libvitae::Value;
use num_traits::ToPrimitive;

/// Encode a Value as a YAML string.
pub fn encode(value: &Value) -> Result<String, String> {
    serde_yaml::to_string(&value_to_yaml(value))
        .map_err(|e| format!("YAML encode error: {}", e))
}

fn value_to_yaml(value: &Value) -> serde_yaml::Value {
    match value {
        Value::Null => serde_yaml::Value::Null,
        Value::Bool(b) => serde_yaml::Value::Bool(*b),
        Value::Integer(n) => {
            // Try to fit in i64 first, then u64
            if let Some(i) = n.to_i64() {
                serde_yaml::Value::Number(serde_yaml::Number::from(i))
            } else if let Some(u) = n.to_u64() {
                serde_yaml::Value::Number(serde_yaml::Number::from(u))
            } else {
                // YAML doesn't have native arbitrary-precision integers
                serde_yaml::Value::String(n.to_string())
            }
        }
        Value::Float(f) => serde_yaml::Value::Number(serde_yaml::Number::from(*f)),
        Value::String(s) => serde_yaml::Value::String(s.clone()),
        Value::Sequence(items) => {
            serde_yaml::Value::Sequence(items.iter().map(value_to_yaml).collect())
        }
        Value::Mapping(map) => {
            let mut out = serde_yaml::Mapping::new();
            for (k, v) in map.iter() {
                out.insert(serde_yaml::Value::String(k.to_string()), value_to_yaml(v));
            }
            serde_yaml::Value::Mapping(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libvitae::parse_yaml;

    #[test]
    fn test_encode_keeps_document_order() {
        let map = parse_yaml("name: Ada\nage: 36\ntags: [a, b]\nempty:");
        assert_eq!(
            encode(&Value::Mapping(map)).unwrap(),
            "name: Ada\nage: 36\ntags:\n- a\n- b\nempty: null\n"
        );
    }

    #[test]
    fn test_big_integer_becomes_string() {
        let map = parse_yaml("id: 123456789012345678901234567890");
        let yaml = encode(&Value::Mapping(map)).unwrap();
        let back: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(
            back["id"],
            serde_yaml::Value::String("123456789012345678901234567890".to_string())
        );
    }
}
