//! Binding mappings for test scopes.

use serde_json::{Map, Value};

/// Turn a `json!({...})` object into a binding mapping.
///
/// # Panics
/// Panics if `value` is not a JSON object.
pub fn bindings(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("bindings: expected a JSON object, got {other}"),
    }
}
