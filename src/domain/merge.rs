// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deep merge of configuration values.
//!
//! Merge semantics:
//! - Objects: deep-merge by key, keys only in the target are kept
//! - Lists: rebuilt from the source alone, element by element
//! - Primitives and null: the source wins
//!
//! Every function here is pure. The target is read, never mutated, and the
//! result is a fresh tree.

use crate::domain::config_value::{Map, Value, ValueKind};
use crate::domain::errors::{ConfigError, Result};
use serde::{Deserialize, Serialize};

/// What to do when an object in the source lands on a target entry that is
/// neither an object nor null.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergePolicy {
    /// Treat the target entry as an empty object, so the source subtree wins.
    #[default]
    Replace,
    /// Fail with [`ConfigError::MergeTypeConflict`].
    Strict,
}

/// Deep-merges `source` onto `target` and returns the merged value.
///
/// # Examples
///
/// ```
/// use layercfg::domain::merge::{merge_objects, MergePolicy};
/// use layercfg::domain::Value;
///
/// let target: Value = [("a", [("x", 1), ("y", 2)].into_iter().collect::<Value>())]
///     .into_iter()
///     .collect();
/// let source: Value = [("a", [("y", 3), ("z", 4)].into_iter().collect::<Value>())]
///     .into_iter()
///     .collect();
///
/// let merged = merge_objects(&target, &source, MergePolicy::Replace).unwrap();
/// let expected: Value = [(
///     "a",
///     [("x", 1), ("y", 3), ("z", 4)].into_iter().collect::<Value>(),
/// )]
/// .into_iter()
/// .collect();
/// assert_eq!(merged, expected);
/// ```
pub fn merge_objects(target: &Value, source: &Value, policy: MergePolicy) -> Result<Value> {
    let mut path = Vec::new();
    merge_value(Some(target), source, policy, &mut path)
}

/// Deep-merges the entries of `source` onto the entries of `target`.
///
/// This is [`merge_objects`] for callers that already hold object entries,
/// such as the effective settings of a configuration.
pub fn merge_maps(target: &Map, source: &Map, policy: MergePolicy) -> Result<Map> {
    let mut path = Vec::new();
    merge_entries(target.clone(), source, policy, &mut path)
}

/// Merges layers in order, starting from nothing. Later layers win.
///
/// Returns [`Value::Null`] when there are no layers.
pub fn merge_layers<'a, I>(layers: I, policy: MergePolicy) -> Result<Value>
where
    I: IntoIterator<Item = &'a Value>,
{
    layers
        .into_iter()
        .try_fold(Value::Null, |merged, layer| {
            merge_objects(&merged, layer, policy)
        })
}

fn merge_value(
    target: Option<&Value>,
    source: &Value,
    policy: MergePolicy,
    path: &mut Vec<String>,
) -> Result<Value> {
    match source {
        Value::List(items) => {
            let previous: &[Value] = match target {
                Some(Value::List(previous)) => previous,
                _ => &[],
            };
            let mut merged = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                path.push(index.to_string());
                merged.push(merge_child(previous.get(index), item, policy, path)?);
                path.pop();
            }
            Ok(Value::List(merged))
        }
        Value::Object(entries) => {
            let existing = match target {
                Some(Value::Object(existing)) => existing.clone(),
                None | Some(Value::Null) => Map::new(),
                Some(other) => match policy {
                    MergePolicy::Replace => {
                        tracing::trace!(
                            "Replacing {} with object at '{}'",
                            other.kind(),
                            path.join(".")
                        );
                        Map::new()
                    }
                    MergePolicy::Strict => {
                        return Err(ConfigError::merge_conflict(
                            path,
                            other.kind(),
                            ValueKind::Object,
                        ));
                    }
                },
            };
            merge_entries(existing, entries, policy, path).map(Value::Object)
        }
        primitive => Ok(primitive.clone()),
    }
}

fn merge_entries(
    mut merged: Map,
    source: &Map,
    policy: MergePolicy,
    path: &mut Vec<String>,
) -> Result<Map> {
    for (key, value) in source {
        path.push(key.clone());
        let child = merge_child(merged.get(key), value, policy, path)?;
        path.pop();
        merged.insert(key.clone(), child);
    }
    Ok(merged)
}

// Containers only recurse into truthy targets; falsy ones are taken over.
fn merge_child(
    target: Option<&Value>,
    source: &Value,
    policy: MergePolicy,
    path: &mut Vec<String>,
) -> Result<Value> {
    if !source.is_object_shaped() {
        return Ok(source.clone());
    }
    match target {
        Some(existing) if !existing.is_falsy() => merge_value(Some(existing), source, policy, path),
        _ => Ok(source.clone()),
    }
}
