//! Resolution strategies and answer accumulation

use crate::config::MergeBehavior;
use crate::merge::merge_mappings;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// How values found at several hierarchy levels are combined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionType {
    /// Stop at the first level holding the key
    #[default]
    #[serde(alias = "first")]
    Priority,
    /// Concatenate the values of every level holding the key
    Array,
    /// Merge the mappings of every level holding the key
    Hash,
}

impl ResolutionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Priority => "priority",
            Self::Array => "array",
            Self::Hash => "hash",
        }
    }
}

impl FromStr for ResolutionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim_start_matches(':').to_lowercase().as_str() {
            "priority" | "first" => Ok(Self::Priority),
            "array" => Ok(Self::Array),
            "hash" => Ok(Self::Hash),
            _ => Err(Error::UnknownResolutionType { name: s.to_string() }),
        }
    }
}

impl std::fmt::Display for ResolutionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type name used in mismatch errors.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "Nil",
        Value::Bool(_) => "Boolean",
        Value::Number(_) => "Number",
        Value::String(_) => "String",
        Value::Array(_) => "Array",
        Value::Object(_) => "Hash",
    }
}

/// Collects the values found for one key, most specific source first.
#[derive(Debug)]
pub(crate) struct Answer<'a> {
    key: &'a str,
    resolution: ResolutionType,
    merge_behavior: MergeBehavior,
    value: Option<Value>,
}

impl<'a> Answer<'a> {
    pub(crate) fn new(key: &'a str, resolution: ResolutionType, merge_behavior: MergeBehavior) -> Self {
        Self {
            key,
            resolution,
            merge_behavior,
            value: None,
        }
    }

    /// Add a value found at the next (less specific) source.
    ///
    /// Returns `true` once no further sources need to be consulted.
    pub(crate) fn add(&mut self, found: Value) -> Result<bool> {
        match self.resolution {
            ResolutionType::Priority => {
                self.value = Some(found);
                Ok(true)
            }
            ResolutionType::Array => {
                if !matches!(found, Value::Array(_) | Value::String(_)) {
                    return Err(self.mismatch("Array", &found));
                }
                match &mut self.value {
                    Some(Value::Array(items)) => items.push(found),
                    slot => *slot = Some(Value::Array(vec![found])),
                }
                Ok(false)
            }
            ResolutionType::Hash => {
                let lower = match found {
                    Value::Object(map) => map,
                    other => return Err(self.mismatch("Hash", &other)),
                };
                let merged = match self.value.take() {
                    Some(Value::Object(higher)) => merge_mappings(lower, higher, self.merge_behavior),
                    _ => lower,
                };
                self.value = Some(Value::Object(merged));
                Ok(false)
            }
        }
    }

    pub(crate) fn into_inner(self) -> Option<Value> {
        self.value
    }

    fn mismatch(&self, expected: &'static str, found: &Value) -> Error {
        Error::TypeMismatch {
            key: self.key.to_string(),
            expected,
            found: type_name(found),
        }
    }
}

/// Final shaping of an accumulated answer.
///
/// Array answers are flattened and de-duplicated, keeping first occurrences.
pub(crate) fn finish(value: Value, resolution: ResolutionType) -> Value {
    match (resolution, value) {
        (ResolutionType::Array, Value::Array(items)) => {
            let mut flat = Vec::new();
            flatten_into(items, &mut flat);
            let mut unique: Vec<Value> = Vec::with_capacity(flat.len());
            for item in flat {
                if !unique.contains(&item) {
                    unique.push(item);
                }
            }
            Value::Array(unique)
        }
        (_, value) => value,
    }
}

fn flatten_into(items: Vec<Value>, out: &mut Vec<Value>) {
    for item in items {
        match item {
            Value::Array(nested) => flatten_into(nested, out),
            other => out.push(other),
        }
    }
}
