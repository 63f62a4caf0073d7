//! Custom test assertions

use serde_json::Value;

/// Assert the standard error body
pub fn assert_error_body(body: &Value, message: &str) {
    assert_eq!(
        body,
        &serde_json::json!({ "status": "error", "message": message }),
        "unexpected error body"
    );
}

/// Assert the standard success envelope and return its data
pub fn success_data(body: &Value) -> &Value {
    assert_eq!(body["status"], "success", "expected success body, got {}", body);
    &body["data"]
}

/// Permission strings of a JSON array
pub fn string_list(value: &Value) -> Vec<String> {
    value
        .as_array()
        .unwrap_or_else(|| panic!("expected an array, got {}", value))
        .iter()
        .map(|v| v.as_str().expect("expected a string").to_string())
        .collect()
}
