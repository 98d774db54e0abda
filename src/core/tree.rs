//! Translation tree operations.
//!
//! A translation tree is a JSON object whose leaves are strings, numbers or
//! arrays. Key paths are split on the configured key separator before they
//! reach this module, so everything here works on path segments.

use serde_json::{Map, Value};

/// One locale's translations.
pub type Translation = Map<String, Value>;

/// Split a key into path segments.
pub fn key_path<'a>(key: &'a str, separator: &str) -> Vec<&'a str> {
    key.split(separator).collect()
}

/// Set `value` at `path`, creating intermediate objects as needed.
///
/// An intermediate segment that holds a scalar or array is replaced by an
/// object. Only the terminal segment is overwritten.
pub fn deep_set(tree: &mut Translation, path: &[&str], value: Value) {
    let Some((last, parents)) = path.split_last() else {
        return;
    };

    let mut current = tree;
    for segment in parents {
        let next = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !next.is_object() {
            *next = Value::Object(Map::new());
        }
        current = match next {
            Value::Object(map) => map,
            _ => return,
        };
    }
    current.insert(last.to_string(), value);
}

/// Merge `source` into `target`. Source values win.
///
/// Objects on both sides merge recursively; anything else (scalars, arrays,
/// or an object meeting a non-object) is replaced wholesale.
pub fn deep_merge(target: &mut Translation, source: &Translation) {
    for (key, value) in source {
        match (target.get_mut(key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                deep_merge(existing, incoming);
            }
            _ => {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}

/// Structural copy of a value.
///
/// `serde_json::Value` owns its children, so the clone never shares nodes
/// with the original.
pub fn deep_clone(value: &Value) -> Value {
    value.clone()
}

/// Minimum nesting depth of a value.
///
/// Scalars and arrays have depth 0. An object has depth one more than its
/// shallowest child; an empty object has depth 1.
pub fn min_depth(value: &Value) -> usize {
    match value {
        Value::Object(map) => 1 + map.values().map(min_depth).min().unwrap_or(0),
        _ => 0,
    }
}

/// Copy of `tree` with keys sorted at every level, including objects nested
/// inside arrays.
pub fn sort_target(tree: &Translation) -> Translation {
    let mut entries: Vec<(&String, &Value)> = tree.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries
        .into_iter()
        .map(|(key, value)| (key.clone(), sort_value(value)))
        .collect()
}

fn sort_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(sort_target(map)),
        Value::Array(items) => Value::Array(items.iter().map(sort_value).collect()),
        other => other.clone(),
    }
}

/// Look up `path` in `tree`.
///
/// Numeric segments index into arrays (`nested.array.1`).
pub fn get_path<'a>(tree: &'a Translation, path: &[&str]) -> Option<&'a Value> {
    let (first, rest) = path.split_first()?;
    let mut current = tree.get(*first)?;
    for segment in rest {
        current = match current {
            Value::Object(map) => map.get(*segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}
