//! Test harness for the frontmatter parser against fixture files.
//!
//! This test harness reads all .md files from the test/fm/ directory and
//! parses them, comparing the metadata against the expected JSON in
//! test/json/ with the same base name. Every fixture is also re-encoded as
//! frontmatter and parsed again, which must not change the result.

use std::fs;
use std::path::{Path, PathBuf};

use libvitae::{encode, encode_document, parse_frontmatter, Format, Mapping, Value};
use num_traits::ToPrimitive;

/// Root test directory.
fn test_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("test")
}

/// All .md fixtures, sorted.
fn get_fm_files() -> Vec<PathBuf> {
    let pattern = test_root().join("fm").join("*.md");
    let mut files: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())
        .expect("valid glob pattern")
        .flatten()
        .collect();
    files.sort();
    files
}

/// Read the expected JSON for a fixture.
fn read_expected_json(fm_path: &Path) -> Option<serde_json::Value> {
    let basename = fm_path.file_stem()?.to_string_lossy().to_string();
    let json_path = test_root().join("json").join(format!("{}.json", basename));
    let text = fs::read_to_string(json_path).ok()?;
    Some(serde_json::from_str(&text).expect("fixture JSON is valid"))
}

fn to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Integer(n) => match n.to_i64() {
            Some(i) => serde_json::Value::from(i),
            None => serde_json::Value::String(n.to_string()),
        },
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Sequence(items) => serde_json::Value::Array(items.iter().map(to_json).collect()),
        Value::Mapping(map) => mapping_to_json(map),
    }
}

fn mapping_to_json(map: &Mapping) -> serde_json::Value {
    serde_json::Value::Object(
        map.iter()
            .map(|(k, v)| (k.to_string(), to_json(v)))
            .collect(),
    )
}

#[test]
fn test_fixtures_present() {
    let files = get_fm_files();
    assert!(!files.is_empty(), "no fixtures found under test/fm");
    for file in &files {
        assert!(
            read_expected_json(file).is_some(),
            "missing expected JSON for {}",
            file.display()
        );
    }
}

#[test]
fn test_fm_to_json() {
    let mut failures = Vec::new();
    for file in get_fm_files() {
        let Some(expected) = read_expected_json(&file) else {
            continue;
        };
        let text = fs::read_to_string(&file).unwrap();
        let actual = mapping_to_json(&parse_frontmatter(&text).metadata);
        if actual != expected {
            failures.push(format!(
                "{}\n  expected: {}\n  actual:   {}",
                file.display(),
                expected,
                actual
            ));
        }
    }
    assert!(failures.is_empty(), "fixture mismatches:\n{}", failures.join("\n"));
}

#[test]
fn test_json_encoder_agrees_with_serde_json() {
    for file in get_fm_files() {
        let text = fs::read_to_string(&file).unwrap();
        let metadata = parse_frontmatter(&text).metadata;
        let encoded = encode(&Value::Mapping(metadata.clone()), Format::Json);
        let reparsed: serde_json::Value = serde_json::from_str(&encoded)
            .unwrap_or_else(|e| panic!("{}: invalid JSON: {}", file.display(), e));
        // Floats with no fraction print as integers in JSON text; compare as f64.
        assert_eq!(
            normalize_numbers(reparsed),
            normalize_numbers(mapping_to_json(&metadata)),
            "{}",
            file.display()
        );
    }
}

fn normalize_numbers(value: serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Number(n) => n
            .as_f64()
            .and_then(serde_json::Number::from_f64)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        serde_json::Value::Array(items) => {
            serde_json::Value::Array(items.into_iter().map(normalize_numbers).collect())
        }
        serde_json::Value::Object(map) => serde_json::Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, normalize_numbers(v)))
                .collect(),
        ),
        other => other,
    }
}

#[test]
fn test_fixtures_survive_reencoding() {
    for file in get_fm_files() {
        let text = fs::read_to_string(&file).unwrap();
        let document = parse_frontmatter(&text);
        if document.metadata.is_empty() {
            continue;
        }
        let reparsed = parse_frontmatter(&encode_document(&document));
        assert_eq!(reparsed.body, document.body, "{}", file.display());
        assert_eq!(
            mapping_to_json(&reparsed.metadata),
            mapping_to_json(&document.metadata),
            "{}",
            file.display()
        );
    }
}
