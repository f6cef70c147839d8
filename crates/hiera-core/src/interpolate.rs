//! `%{variable}` interpolation against a scope
//!
//! Only plain variable references are supported. A leading `::` marks a
//! top-scope variable and is ignored. Unbound variables interpolate to an
//! empty string.

use crate::scope::KeyAddressable;
use crate::{Error, Result};
use serde_json::Value;

const OPEN: &str = "%{";

/// Replace every `%{name}` in `input` with the scope's value for `name`.
pub fn interpolate(input: &str, scope: &dyn KeyAddressable) -> Result<String> {
    if !input.contains(OPEN) {
        return Ok(input.to_string());
    }

    let mut output = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find(OPEN) {
        output.push_str(&rest[..start]);
        let after_open = &rest[start + OPEN.len()..];
        let end = after_open.find('}').ok_or_else(|| Error::Interpolation {
            input: input.to_string(),
        })?;

        let name = variable_name(&after_open[..end]);
        if let Some(value) = scope.lookup_var(name) {
            output.push_str(&render_scalar(&value));
        }

        rest = &after_open[end + 1..];
    }

    output.push_str(rest);
    Ok(output)
}

/// Interpolate every string inside `value`, descending into arrays and
/// mappings. Mapping keys are left as they are.
pub fn interpolate_value(value: &Value, scope: &dyn KeyAddressable) -> Result<Value> {
    Ok(match value {
        Value::String(s) => Value::String(interpolate(s, scope)?),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| interpolate_value(item, scope))
                .collect::<Result<_>>()?,
        ),
        Value::Object(map) => {
            let mut out = serde_json::Map::with_capacity(map.len());
            for (key, item) in map {
                out.insert(key.clone(), interpolate_value(item, scope)?);
            }
            Value::Object(out)
        }
        other => other.clone(),
    })
}

/// Text form of a value as it appears inside an interpolated string.
pub fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

fn variable_name(raw: &str) -> &str {
    let name = raw.trim();
    name.strip_prefix("::").unwrap_or(name)
}
