// SPDX-License-Identifier: MIT OR Apache-2.0

//! The configuration aggregate.
//!
//! A `Configuration` keeps the effective settings apart from the layers they
//! are derived from: registered environment layers and the ordered list of
//! applied override layers. Resetting only ever discards the settings.

use crate::domain::config_key::ConfigKey;
use crate::domain::config_value::{Map, Value};
use crate::domain::environment::EnvironmentName;
use crate::domain::errors::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Effective settings plus the layers they are computed from.
///
/// # Examples
///
/// ```
/// use layercfg::domain::{ConfigKey, Configuration, Value};
///
/// let mut config = Configuration::new();
/// config.settings_mut().insert("name".to_string(), Value::from("app"));
///
/// assert_eq!(config.get(&ConfigKey::from("name")).unwrap(), &Value::from("app"));
/// assert!(config.environments().is_empty());
/// assert!(config.overrides().is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    /// Derived settings, safe to discard and recompute from the layers
    settings: Map,
    /// Environment layers by name, stored exactly as registered
    environments: BTreeMap<EnvironmentName, Value>,
    /// Override layers in the order they were applied
    overrides: Vec<Value>,
    /// The environment most recently loaded into `settings`
    active_environment: Option<EnvironmentName>,
}

impl Configuration {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the effective settings.
    pub fn settings(&self) -> &Map {
        &self.settings
    }

    /// Returns the effective settings for direct editing.
    pub fn settings_mut(&mut self) -> &mut Map {
        &mut self.settings
    }

    /// Returns the registered environment layers.
    pub fn environments(&self) -> &BTreeMap<EnvironmentName, Value> {
        &self.environments
    }

    /// Returns the registered layer for `name`, if any.
    pub fn environment(&self, name: &EnvironmentName) -> Option<&Value> {
        self.environments.get(name)
    }

    /// Returns the applied override layers, oldest first.
    pub fn overrides(&self) -> &[Value] {
        &self.overrides
    }

    /// Returns the environment most recently loaded, if it has not been reset since.
    pub fn active_environment(&self) -> Option<&EnvironmentName> {
        self.active_environment.as_ref()
    }

    pub(crate) fn set_settings(&mut self, settings: Map) {
        self.settings = settings;
    }

    pub(crate) fn set_active_environment(&mut self, name: Option<EnvironmentName>) {
        self.active_environment = name;
    }

    pub(crate) fn insert_environment(
        &mut self,
        name: EnvironmentName,
        layer: Value,
    ) -> Option<Value> {
        self.environments.insert(name, layer)
    }

    pub(crate) fn push_override(&mut self, layer: Value) {
        self.overrides.push(layer);
    }

    pub(crate) fn clear_overrides(&mut self) {
        self.overrides.clear();
    }

    /// Drops every derived setting. Environments and overrides are kept.
    pub fn reset(&mut self) {
        self.settings.clear();
        self.active_environment = None;
    }

    /// Looks up a value in the effective settings by dotted key.
    ///
    /// Segments walk into objects by key and into lists by index. The empty
    /// key is not a setting and is always reported as missing.
    pub fn get(&self, key: &ConfigKey) -> Result<&Value> {
        let not_found = || ConfigError::ConfigKeyNotFound {
            key: key.as_str().to_string(),
        };

        let mut segments = key.segments();
        let first = segments.next().ok_or_else(not_found)?;
        let mut current = self.settings.get(first).ok_or_else(not_found)?;

        for segment in segments {
            current = match current {
                Value::Object(map) => map.get(segment),
                Value::List(items) => segment
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| items.get(index)),
                _ => None,
            }
            .ok_or_else(not_found)?;
        }

        Ok(current)
    }

    /// Looks up a value, falling back to `default` when the key is missing.
    pub fn get_or_default(&self, key: &ConfigKey, default: Value) -> Value {
        self.get(key).cloned().unwrap_or(default)
    }

    /// Returns `true` if the key resolves in the effective settings.
    pub fn has(&self, key: &ConfigKey) -> bool {
        self.get(key).is_ok()
    }

    /// Lists the dotted keys of every leaf in the effective settings.
    pub fn all_keys(&self) -> Vec<ConfigKey> {
        let mut keys = Vec::new();
        for (name, value) in &self.settings {
            let nested = value.leaf_paths();
            if nested.is_empty() {
                keys.push(ConfigKey::from(name.as_str()));
            } else {
                keys.extend(
                    nested
                        .into_iter()
                        .map(|path| ConfigKey::from(format!("{}.{}", name, path))),
                );
            }
        }
        keys
    }
}
