//! Call argument normalization
//!
//! Manifests call `hiera("foo", "bar")` and the interpreter hands the
//! positional arguments over combined into one array, `[["foo", "bar"]]`.
//! Templates call `scope.function_hiera("foo", "bar")` and the arguments
//! arrive as they were written, `["foo", "bar"]`. Both shapes normalize to
//! the same [`LookupArgs`].

use crate::{Error, Result};
use hiera_core::interpolate::render_scalar;
use serde_json::Value;

/// The two shapes a call payload can take.
#[derive(Debug, Clone, PartialEq)]
pub enum CallArgs {
    /// Positional arguments: `[key, default, override]`
    Flat(Vec<Value>),
    /// Arguments wrapped in an array: `[[key, default, override]]`.
    /// Holds the unwrapped inner list.
    Wrapped(Vec<Value>),
}

impl CallArgs {
    /// Classify a raw payload.
    ///
    /// While the first element is itself an array, that array replaces the
    /// payload, so any depth of wrapping reduces to the same list.
    pub fn classify(raw: Vec<Value>) -> Self {
        let mut list = raw;
        let mut wrapped = false;
        while let Some(Value::Array(inner)) = list.first_mut() {
            list = std::mem::take(inner);
            wrapped = true;
        }

        if wrapped {
            Self::Wrapped(list)
        } else {
            Self::Flat(list)
        }
    }

    /// The canonical argument list.
    pub fn into_list(self) -> Vec<Value> {
        match self {
            Self::Flat(list) | Self::Wrapped(list) => list,
        }
    }
}

/// Canonical `(key, default, override)` triple of a lookup call
#[derive(Debug, Clone, PartialEq)]
pub struct LookupArgs {
    pub key: String,
    pub default: Option<Value>,
    /// Hierarchy level to consult instead of the configured hierarchy
    pub order_override: Option<String>,
}

/// Normalize a raw call payload into [`LookupArgs`].
///
/// Fails with [`Error::MissingArgument`] when no key remains after
/// unwrapping. Null entries count as absent, and so does an empty override,
/// which the host passes for an undefined argument.
pub fn parse_args(raw: &[Value]) -> Result<LookupArgs> {
    let mut list = CallArgs::classify(raw.to_vec()).into_list().into_iter();

    let key = match list.next() {
        None | Some(Value::Null) => return Err(Error::MissingArgument),
        Some(Value::String(key)) => key,
        Some(other) => render_scalar(&other),
    };
    let default = list.next().filter(|value| !value.is_null());
    let order_override = list.next().and_then(|value| match value {
        Value::Null => None,
        Value::String(level) if level.is_empty() => None,
        Value::String(level) => Some(level),
        other => Some(render_scalar(&other)),
    });

    Ok(LookupArgs {
        key,
        default,
        order_override,
    })
}
