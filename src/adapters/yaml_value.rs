// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversions between `serde_yaml` value trees and configuration values.
//!
//! These let a host that has already parsed YAML hand the resulting tree to a
//! store as a layer, and export effective settings back to YAML.

use crate::domain::{ConfigError, Map, Result, Value};

impl TryFrom<serde_yaml::Value> for Value {
    type Error = ConfigError;

    /// Converts a parsed YAML tree into a configuration value.
    ///
    /// Tags are dropped in favor of the tagged value. Numeric and boolean
    /// mapping keys become their string form; any other non-string key is
    /// an error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use layercfg::domain::Value;
    ///
    /// let yaml: serde_yaml::Value = serde_yaml::from_str("database:\n  port: 5432").unwrap();
    /// let value = Value::try_from(yaml).unwrap();
    /// let database = value.as_object().unwrap()["database"].as_object().unwrap();
    /// assert_eq!(database["port"], Value::Integer(5432));
    /// ```
    fn try_from(value: serde_yaml::Value) -> Result<Self> {
        let converted = match value {
            serde_yaml::Value::Null => Value::Null,
            serde_yaml::Value::Bool(b) => Value::Bool(b),
            serde_yaml::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Integer(i)
                } else if let Some(f) = n.as_f64() {
                    Value::Float(f)
                } else {
                    return Err(ConfigError::ParseError {
                        message: format!("Unsupported YAML number: {}", n),
                        source: None,
                    });
                }
            }
            serde_yaml::Value::String(s) => Value::String(s),
            serde_yaml::Value::Sequence(seq) => Value::List(
                seq.into_iter()
                    .map(Value::try_from)
                    .collect::<Result<Vec<_>>>()?,
            ),
            serde_yaml::Value::Mapping(mapping) => {
                let mut entries = Map::new();
                for (key, val) in mapping {
                    entries.insert(mapping_key(key)?, Value::try_from(val)?);
                }
                Value::Object(entries)
            }
            serde_yaml::Value::Tagged(tagged) => Value::try_from(tagged.value)?,
        };
        Ok(converted)
    }
}

fn mapping_key(key: serde_yaml::Value) -> Result<String> {
    match key {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        other => Err(ConfigError::ParseError {
            message: format!("Unsupported YAML mapping key: {:?}", other),
            source: None,
        }),
    }
}

impl From<Value> for serde_yaml::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_yaml::Value::Null,
            Value::Bool(b) => serde_yaml::Value::Bool(b),
            Value::Integer(n) => serde_yaml::Value::Number(n.into()),
            Value::Float(n) => serde_yaml::Value::Number(n.into()),
            Value::String(s) => serde_yaml::Value::String(s),
            Value::List(items) => {
                serde_yaml::Value::Sequence(items.into_iter().map(Into::into).collect())
            }
            Value::Object(map) => {
                let mut mapping = serde_yaml::Mapping::new();
                for (key, val) in map {
                    mapping.insert(serde_yaml::Value::String(key), val.into());
                }
                serde_yaml::Value::Mapping(mapping)
            }
        }
    }
}
