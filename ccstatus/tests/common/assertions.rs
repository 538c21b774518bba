use serde_json::Value;
use std::path::Path;

pub fn assert_contains(haystack: &str, needle: &str) {
    assert!(
        haystack.contains(needle),
        "Expected to find '{needle}' in output, got: {haystack}"
    );
}

pub fn assert_not_contains(haystack: &str, needle: &str) {
    assert!(
        !haystack.contains(needle),
        "Did not expect '{needle}' in output, got: {haystack}"
    );
}

pub fn assert_json_file(path: &Path, expected: &Value) {
    let raw = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Expected readable file {}: {e}", path.display()));
    let actual: Value = serde_json::from_str(&raw)
        .unwrap_or_else(|e| panic!("Expected JSON in {}: {e}\n{raw}", path.display()));
    assert_eq!(&actual, expected, "unexpected content in {}", path.display());
}
