// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration value tree.
//!
//! This module provides the `Value` type, the recursive data shape that every
//! layer, environment and effective setting is made of, along with `ValueKind`
//! for naming variants in errors and strict accessors that never coerce.

use crate::domain::errors::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// An object's entries, ordered by key.
pub type Map = BTreeMap<String, Value>;

/// A configuration value.
///
/// A value is either a primitive (null, boolean, number or string), an
/// ordered list of values, or an object mapping string keys to values.
///
/// # Examples
///
/// ```
/// use layercfg::domain::{Map, Value};
///
/// let mut server = Map::new();
/// server.insert("port".to_string(), Value::from(8080));
/// let value = Value::from(server);
///
/// assert!(value.is_object_shaped());
/// assert_eq!(value.as_object().unwrap()["port"], Value::Integer(8080));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// The absent/null value.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Integer(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    String(String),
    /// An ordered list of values.
    List(Vec<Value>),
    /// A mapping from string keys to values.
    Object(Map),
}

/// The kind of a [`Value`], used when reporting mismatches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// [`Value::Null`]
    Null,
    /// [`Value::Bool`]
    Bool,
    /// [`Value::Integer`]
    Integer,
    /// [`Value::Float`]
    Float,
    /// [`Value::String`]
    String,
    /// [`Value::List`]
    List,
    /// [`Value::Object`]
    Object,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::List => "list",
            ValueKind::Object => "object",
        };
        f.write_str(name)
    }
}

impl Value {
    /// Creates an empty object.
    pub fn object() -> Self {
        Value::Object(Map::new())
    }

    /// Returns the kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
            Value::List(_) => ValueKind::List,
            Value::Object(_) => ValueKind::Object,
        }
    }

    /// Returns `true` for objects and lists, the values that can be used as layers.
    pub fn is_object_shaped(&self) -> bool {
        matches!(self, Value::List(_) | Value::Object(_))
    }

    /// Returns `true` if this is [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` for null, `false`, zero, NaN and the empty string.
    ///
    /// Containers are never falsy, even when empty.
    pub fn is_falsy(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(flag) => !flag,
            Value::Integer(number) => *number == 0,
            Value::Float(number) => *number == 0.0 || number.is_nan(),
            Value::String(text) => text.is_empty(),
            Value::List(_) | Value::Object(_) => false,
        }
    }

    /// Returns the entries if this is an object.
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the elements if this is a list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Reads the value as a string slice.
    ///
    /// `key` is only used for the error message.
    ///
    /// # Examples
    ///
    /// ```
    /// use layercfg::domain::Value;
    ///
    /// let value = Value::from("localhost");
    /// assert_eq!(value.as_str("database.host").unwrap(), "localhost");
    /// assert!(Value::from(5432).as_str("database.port").is_err());
    /// ```
    pub fn as_str(&self, key: &str) -> Result<&str> {
        match self {
            Value::String(s) => Ok(s.as_str()),
            other => Err(ConfigError::type_mismatch(key, "string", other.kind())),
        }
    }

    /// Reads the value as a boolean. Strings such as `"true"` are not converted.
    pub fn as_bool(&self, key: &str) -> Result<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(ConfigError::type_mismatch(key, "bool", other.kind())),
        }
    }

    /// Reads the value as an `i64`.
    pub fn as_i64(&self, key: &str) -> Result<i64> {
        match self {
            Value::Integer(n) => Ok(*n),
            other => Err(ConfigError::type_mismatch(key, "i64", other.kind())),
        }
    }

    /// Reads the value as an `f64`. Integers widen; nothing else converts.
    pub fn as_f64(&self, key: &str) -> Result<f64> {
        match self {
            Value::Float(n) => Ok(*n),
            Value::Integer(n) => Ok(*n as f64),
            other => Err(ConfigError::type_mismatch(key, "f64", other.kind())),
        }
    }

    /// Flattens this value into dotted leaf paths.
    ///
    /// Object keys and list indices become path segments. Empty containers
    /// are leaves of their own so they are not lost.
    pub fn leaf_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        Self::collect_leaf_paths(self, "", &mut paths);
        paths
    }

    fn collect_leaf_paths(value: &Value, prefix: &str, paths: &mut Vec<String>) {
        let join = |segment: &str| {
            if prefix.is_empty() {
                segment.to_string()
            } else {
                format!("{}.{}", prefix, segment)
            }
        };
        match value {
            Value::Object(map) if !map.is_empty() => {
                for (key, child) in map {
                    Self::collect_leaf_paths(child, &join(key), paths);
                }
            }
            Value::List(items) if !items.is_empty() => {
                for (index, child) in items.iter().enumerate() {
                    Self::collect_leaf_paths(child, &join(&index.to_string()), paths);
                }
            }
            _ => {
                if !prefix.is_empty() {
                    paths.push(prefix.to_string());
                }
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Integer(n.into())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Object(map)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Object(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::String(s) => f.write_str(s),
            Value::List(items) => {
                f.write_str("[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Object(map) => {
                f.write_str("{")?;
                for (index, (key, item)) in map.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, item)?;
                }
                f.write_str("}")
            }
        }
    }
}
