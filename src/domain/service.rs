// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration store trait definition.
//!
//! This module defines the `ConfigurationStore` trait, the main interface for
//! layering configuration: registering environment layers, switching between
//! them, applying override layers and replaying those overrides later.

use crate::domain::{ConfigKey, Configuration, EnvironmentName, Result, Value};

/// The main configuration store trait.
///
/// A store owns one [`Configuration`]. Mutating operations either apply
/// completely or leave the configuration untouched.
///
/// # Examples
///
/// ```rust
/// use layercfg::prelude::*;
///
/// # fn main() -> Result<()> {
/// let mut store = DefaultConfigurationStore::new();
/// let dev = EnvironmentName::from("dev");
///
/// store.add_environment_configuration(&dev, [("port", 8080)].into_iter().collect())?;
/// store.load_environment(&dev)?;
///
/// assert_eq!(store.get(&ConfigKey::from("port"))?, Value::from(8080));
/// # Ok(())
/// # }
/// ```
pub trait ConfigurationStore {
    /// Returns the configuration owned by this store.
    fn configuration(&self) -> &Configuration;

    /// Deep-merges `source` onto `target` using this store's merge policy.
    ///
    /// Neither argument is modified; the merged tree is returned.
    fn merge_objects(&self, target: &Value, source: &Value) -> Result<Value>;

    /// Registers `layer` as the environment called `name`.
    ///
    /// The layer is stored verbatim and replaces any earlier registration
    /// under the same name. Nothing is merged until the environment is
    /// loaded. Layers that are not objects or lists are refused according to
    /// the store's input policy.
    fn add_environment_configuration(&mut self, name: &EnvironmentName, layer: Value)
        -> Result<()>;

    /// Discards every derived setting, keeping environments and overrides.
    fn reset_configuration(&mut self);

    /// Resets the settings and merges the environment registered as `name`
    /// onto them.
    ///
    /// Previously applied overrides are not replayed unless the store is
    /// configured to do so; call
    /// [`reload_additional_configuration`](Self::reload_additional_configuration)
    /// to reapply them.
    fn load_environment(&mut self, name: &EnvironmentName) -> Result<()>;

    /// Merges every recorded override onto the settings, oldest first.
    fn reload_additional_configuration(&mut self) -> Result<()>;

    /// Records `layer` as an override and merges it onto the settings.
    fn apply_configuration(&mut self, layer: Value) -> Result<()>;

    /// Retrieves a copy of the effective value at `key`.
    fn get(&self, key: &ConfigKey) -> Result<Value> {
        self.configuration().get(key).cloned()
    }

    /// Retrieves the effective value at `key` or `default` when it is missing.
    fn get_or_default(&self, key: &ConfigKey, default: Value) -> Value {
        self.configuration().get_or_default(key, default)
    }

    /// Checks whether `key` resolves in the effective settings.
    fn has(&self, key: &ConfigKey) -> bool {
        self.configuration().has(key)
    }
}
