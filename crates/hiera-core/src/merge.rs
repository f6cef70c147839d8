//! Mapping merges for hash resolution

use crate::config::MergeBehavior;
use serde_json::{Map, Value};

/// Merge `higher` over `lower`; on conflicts the more specific `higher` wins.
pub fn merge_mappings(
    mut lower: Map<String, Value>,
    higher: Map<String, Value>,
    behavior: MergeBehavior,
) -> Map<String, Value> {
    match behavior {
        MergeBehavior::Native => {
            lower.extend(higher);
        }
        MergeBehavior::Deep | MergeBehavior::Deeper => {
            for (key, other) in higher {
                match lower.get_mut(&key) {
                    Some(base) => deep_merge_value(base, other, behavior),
                    None => {
                        lower.insert(key, other);
                    }
                }
            }
        }
    }
    lower
}

/// Deep merge `other` into `base`.
///
/// Mappings merge recursively. Under `Deeper`, arrays are unioned with
/// `base` items first. Anything else is replaced by `other`.
fn deep_merge_value(base: &mut Value, other: Value, behavior: MergeBehavior) {
    match (base, other) {
        (Value::Object(base_map), Value::Object(other_map)) => {
            for (key, other_val) in other_map {
                match base_map.get_mut(&key) {
                    Some(base_val) => deep_merge_value(base_val, other_val, behavior),
                    None => {
                        base_map.insert(key, other_val);
                    }
                }
            }
        }
        (Value::Array(base_items), Value::Array(other_items))
            if behavior == MergeBehavior::Deeper =>
        {
            for item in other_items {
                if !base_items.contains(&item) {
                    base_items.push(item);
                }
            }
        }
        (base, other) => {
            *base = other;
        }
    }
}
