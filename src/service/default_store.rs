// SPDX-License-Identifier: MIT OR Apache-2.0

//! Default configuration store implementation.
//!
//! This module provides the default implementation of the `ConfigurationStore`
//! trait. It owns a single [`Configuration`] and recomputes its settings from
//! environment and override layers as they are loaded and applied.

use crate::domain::merge::{self, MergePolicy};
use crate::domain::{
    ConfigError, Configuration, ConfigurationStore, EnvironmentName, Map, Result, Value,
};
use crate::service::options::{InputPolicy, StoreOptions};

/// Default implementation of the configuration store.
///
/// New settings are always computed in full before they replace the current
/// ones, so a failed operation leaves the configuration as it was.
///
/// # Examples
///
/// ```rust
/// use layercfg::prelude::*;
///
/// # fn main() -> Result<()> {
/// let mut store = DefaultConfigurationStore::builder()
///     .with_environment("dev", [("port", 8080)].into_iter().collect::<Value>())
///     .with_environment(
///         "prod",
///         [("port", Value::from(443)), ("tls", Value::from(true))]
///             .into_iter()
///             .collect::<Value>(),
///     )
///     .with_initial_environment("dev")
///     .build()?;
///
/// assert_eq!(store.get(&ConfigKey::from("port"))?, Value::from(8080));
///
/// store.load_environment(&EnvironmentName::from("prod"))?;
/// assert_eq!(store.get(&ConfigKey::from("port"))?, Value::from(443));
/// assert!(store.has(&ConfigKey::from("tls")));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct DefaultConfigurationStore {
    /// The configuration being managed
    configuration: Configuration,
    /// Merge and validation behavior
    options: StoreOptions,
}

impl DefaultConfigurationStore {
    /// Creates a store holding an empty configuration with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding an empty configuration with the given options.
    pub fn with_options(options: StoreOptions) -> Self {
        Self {
            configuration: Configuration::new(),
            options,
        }
    }

    /// Wraps an existing configuration, e.g. one restored by the host.
    pub fn from_configuration(configuration: Configuration, options: StoreOptions) -> Self {
        Self {
            configuration,
            options,
        }
    }

    /// Creates a new store builder.
    pub fn builder() -> ConfigurationStoreBuilder {
        ConfigurationStoreBuilder::new()
    }

    /// Returns the options this store was created with.
    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Returns the effective settings.
    pub fn settings(&self) -> &Map {
        self.configuration.settings()
    }

    /// Returns the names of all registered environments in sorted order.
    pub fn environment_names(&self) -> impl Iterator<Item = &EnvironmentName> {
        self.configuration.environments().keys()
    }

    /// Returns the recorded override layers, oldest first.
    pub fn overrides(&self) -> &[Value] {
        self.configuration.overrides()
    }

    /// Returns the environment most recently loaded.
    pub fn active_environment(&self) -> Option<&EnvironmentName> {
        self.configuration.active_environment()
    }

    /// Forgets every recorded override. The current settings are not changed.
    pub fn clear_overrides(&mut self) {
        tracing::debug!(
            "Clearing {} recorded override layer(s)",
            self.configuration.overrides().len()
        );
        self.configuration.clear_overrides();
    }

    /// Consumes the store and returns the configuration it owned.
    pub fn into_configuration(self) -> Configuration {
        self.configuration
    }

    /// Decides whether a layer may be registered or applied.
    ///
    /// Returns `Ok(false)` when the layer should be skipped silently.
    fn accept_layer(&self, operation: &'static str, layer: &Value) -> Result<bool> {
        if layer.is_object_shaped() {
            return Ok(true);
        }
        match self.options.invalid_layer_policy {
            InputPolicy::Ignore => {
                tracing::debug!("Ignoring {} layer passed to {}", layer.kind(), operation);
                Ok(false)
            }
            InputPolicy::Reject => Err(ConfigError::invalid_layer(operation, layer.kind())),
        }
    }

    /// Merges one layer onto a copy of `settings`.
    fn layer_onto(&self, settings: &Map, layer: &Value) -> Result<Map> {
        match layer {
            Value::Object(entries) => {
                merge::merge_maps(settings, entries, self.options.merge_policy)
            }
            // A list has no keys to contribute to the settings mapping.
            Value::List(_) => {
                tracing::debug!("List layer leaves the settings unchanged");
                Ok(settings.clone())
            }
            _ => Ok(settings.clone()),
        }
    }

    fn replay_overrides(&self, mut settings: Map) -> Result<Map> {
        for layer in self.configuration.overrides() {
            settings = self.layer_onto(&settings, layer)?;
        }
        Ok(settings)
    }
}

impl ConfigurationStore for DefaultConfigurationStore {
    fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    fn merge_objects(&self, target: &Value, source: &Value) -> Result<Value> {
        merge::merge_objects(target, source, self.options.merge_policy)
    }

    fn add_environment_configuration(
        &mut self,
        name: &EnvironmentName,
        layer: Value,
    ) -> Result<()> {
        if !self.accept_layer("add_environment_configuration", &layer)? {
            return Ok(());
        }
        if self
            .configuration
            .insert_environment(name.clone(), layer)
            .is_some()
        {
            tracing::debug!("Replaced environment layer '{}'", name);
        }
        Ok(())
    }

    fn reset_configuration(&mut self) {
        self.configuration.reset();
    }

    fn load_environment(&mut self, name: &EnvironmentName) -> Result<()> {
        let (settings, active) = match self.configuration.environment(name) {
            Some(layer) => (self.layer_onto(&Map::new(), layer)?, Some(name.clone())),
            None => match self.options.unknown_environment_policy {
                InputPolicy::Ignore => {
                    tracing::warn!("Environment '{}' is not registered; settings cleared", name);
                    (Map::new(), None)
                }
                InputPolicy::Reject => {
                    return Err(ConfigError::UnknownEnvironment {
                        name: name.to_string(),
                    });
                }
            },
        };

        let settings = if self.options.replay_overrides_on_load {
            self.replay_overrides(settings)?
        } else {
            settings
        };

        if active.is_some() {
            tracing::debug!("Loaded environment '{}'", name);
        }
        self.configuration.set_settings(settings);
        self.configuration.set_active_environment(active);
        Ok(())
    }

    fn reload_additional_configuration(&mut self) -> Result<()> {
        let settings = self.replay_overrides(self.configuration.settings().clone())?;
        self.configuration.set_settings(settings);
        tracing::debug!(
            "Replayed {} override layer(s)",
            self.configuration.overrides().len()
        );
        Ok(())
    }

    fn apply_configuration(&mut self, layer: Value) -> Result<()> {
        if !self.accept_layer("apply_configuration", &layer)? {
            return Ok(());
        }
        let settings = self.layer_onto(self.configuration.settings(), &layer)?;
        self.configuration.push_override(layer);
        self.configuration.set_settings(settings);
        tracing::debug!(
            "Applied override layer, {} recorded",
            self.configuration.overrides().len()
        );
        Ok(())
    }
}

/// Builder for constructing a `DefaultConfigurationStore`.
///
/// Environments are registered first, then the initial environment (if any)
/// is loaded, then overrides are applied in the order they were added.
///
/// # Examples
///
/// ```rust
/// use layercfg::prelude::*;
///
/// # fn main() -> Result<()> {
/// let store = ConfigurationStoreBuilder::new()
///     .strict()
///     .with_override([("debug", true)].into_iter().collect::<Value>())
///     .build()?;
///
/// assert_eq!(store.get(&ConfigKey::from("debug"))?, Value::from(true));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ConfigurationStoreBuilder {
    options: StoreOptions,
    environments: Vec<(EnvironmentName, Value)>,
    overrides: Vec<Value>,
    initial_environment: Option<EnvironmentName>,
}

impl ConfigurationStoreBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces all store options.
    pub fn with_options(mut self, options: StoreOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the merge policy.
    pub fn with_merge_policy(mut self, policy: MergePolicy) -> Self {
        self.options.merge_policy = policy;
        self
    }

    /// Switches to [`StoreOptions::strict`], keeping the replay setting.
    pub fn strict(mut self) -> Self {
        let replay = self.options.replay_overrides_on_load;
        self.options = StoreOptions::strict().with_replay_overrides_on_load(replay);
        self
    }

    /// Registers an environment layer.
    pub fn with_environment(
        mut self,
        name: impl Into<EnvironmentName>,
        layer: impl Into<Value>,
    ) -> Self {
        self.environments.push((name.into(), layer.into()));
        self
    }

    /// Adds an override layer, applied after the initial environment loads.
    pub fn with_override(mut self, layer: impl Into<Value>) -> Self {
        self.overrides.push(layer.into());
        self
    }

    /// Loads the named environment when the store is built.
    pub fn with_initial_environment(mut self, name: impl Into<EnvironmentName>) -> Self {
        self.initial_environment = Some(name.into());
        self
    }

    /// Builds the store.
    ///
    /// Fails when any layer or the initial environment is rejected by the
    /// configured policies.
    pub fn build(self) -> Result<DefaultConfigurationStore> {
        let mut store = DefaultConfigurationStore::with_options(self.options);

        for (name, layer) in self.environments {
            store.add_environment_configuration(&name, layer)?;
        }
        if let Some(name) = self.initial_environment {
            store.load_environment(&name)?;
        }
        for layer in self.overrides {
            store.apply_configuration(layer)?;
        }

        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConfigKey, ValueKind};

    fn obj<const N: usize>(entries: [(&str, Value); N]) -> Value {
        entries.into_iter().collect()
    }

    fn name(s: &str) -> EnvironmentName {
        EnvironmentName::from(s)
    }

    fn settings_of(value: Value) -> Map {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {}", other.kind()),
        }
    }

    fn dev_prod_store(options: StoreOptions) -> DefaultConfigurationStore {
        DefaultConfigurationStore::builder()
            .with_options(options)
            .with_environment("dev", obj([("port", Value::from(8080))]))
            .with_environment(
                "prod",
                obj([("port", Value::from(443)), ("tls", Value::from(true))]),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = DefaultConfigurationStore::new();
        assert!(store.settings().is_empty());
        assert_eq!(store.environment_names().count(), 0);
        assert!(store.overrides().is_empty());
        assert_eq!(store.options(), &StoreOptions::default());
    }

    #[test]
    fn test_add_environment_stores_verbatim() {
        let mut store = DefaultConfigurationStore::new();
        let layer = obj([("port", Value::from(8080))]);
        store
            .add_environment_configuration(&name("dev"), layer.clone())
            .unwrap();

        assert_eq!(store.configuration().environment(&name("dev")), Some(&layer));
        assert!(store.settings().is_empty());
    }

    #[test]
    fn test_add_environment_overwrites() {
        let mut store = DefaultConfigurationStore::new();
        store
            .add_environment_configuration(&name("dev"), obj([("a", Value::from(1))]))
            .unwrap();
        store
            .add_environment_configuration(&name("dev"), obj([("b", Value::from(2))]))
            .unwrap();

        assert_eq!(
            store.configuration().environment(&name("dev")),
            Some(&obj([("b", Value::from(2))]))
        );
    }

    #[test]
    fn test_add_environment_accepts_list() {
        let mut store = DefaultConfigurationStore::with_options(StoreOptions::strict());
        store
            .add_environment_configuration(&name("hosts"), Value::from(vec!["a", "b"]))
            .unwrap();
        assert_eq!(store.environment_names().count(), 1);
    }

    #[test]
    fn test_add_environment_ignores_primitive() {
        let mut store = DefaultConfigurationStore::new();
        store
            .add_environment_configuration(&name("x"), Value::from("not-an-object"))
            .unwrap();
        assert_eq!(store.environment_names().count(), 0);
    }

    #[test]
    fn test_add_environment_rejects_primitive() {
        let mut store = DefaultConfigurationStore::with_options(StoreOptions::strict());
        let err = store
            .add_environment_configuration(&name("x"), Value::from(42))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValueKind {
                found: ValueKind::Integer,
                ..
            }
        ));
        assert_eq!(store.environment_names().count(), 0);
    }

    #[test]
    fn test_load_environment() {
        let mut store = dev_prod_store(StoreOptions::default());
        store.load_environment(&name("dev")).unwrap();

        assert_eq!(
            store.settings(),
            &settings_of(obj([("port", Value::from(8080))]))
        );
        assert_eq!(store.active_environment(), Some(&name("dev")));
    }

    #[test]
    fn test_environment_isolation() {
        let mut store = DefaultConfigurationStore::builder()
            .with_environment(
                "dev",
                obj([("port", Value::from(8080)), ("debug", Value::from(true))]),
            )
            .with_environment(
                "prod",
                obj([("port", Value::from(443)), ("tls", Value::from(true))]),
            )
            .build()
            .unwrap();

        store.load_environment(&name("dev")).unwrap();
        store.load_environment(&name("prod")).unwrap();

        assert_eq!(store.get(&ConfigKey::from("port")).unwrap(), Value::from(443));
        assert_eq!(store.get(&ConfigKey::from("tls")).unwrap(), Value::from(true));
        assert!(!store.has(&ConfigKey::from("debug")));
    }

    #[test]
    fn test_load_environment_does_not_replay_overrides_by_default() {
        let mut store = dev_prod_store(StoreOptions::default());
        store.load_environment(&name("dev")).unwrap();
        store
            .apply_configuration(obj([("port", Value::from(9000))]))
            .unwrap();

        store.load_environment(&name("prod")).unwrap();
        assert_eq!(store.get(&ConfigKey::from("port")).unwrap(), Value::from(443));

        store.reload_additional_configuration().unwrap();
        assert_eq!(store.get(&ConfigKey::from("port")).unwrap(), Value::from(9000));
    }

    #[test]
    fn test_load_environment_replays_overrides_when_enabled() {
        let mut store = dev_prod_store(StoreOptions::default().with_replay_overrides_on_load(true));
        store
            .apply_configuration(obj([("port", Value::from(9000))]))
            .unwrap();

        store.load_environment(&name("prod")).unwrap();
        assert_eq!(store.get(&ConfigKey::from("port")).unwrap(), Value::from(9000));
        assert_eq!(store.get(&ConfigKey::from("tls")).unwrap(), Value::from(true));
    }

    #[test]
    fn test_load_unknown_environment_ignored_clears_settings() {
        let mut store = dev_prod_store(StoreOptions::default());
        store.load_environment(&name("dev")).unwrap();

        store.load_environment(&name("staging")).unwrap();
        assert!(store.settings().is_empty());
        assert!(store.active_environment().is_none());
    }

    #[test]
    fn test_load_unknown_environment_rejected_keeps_settings() {
        let mut store = dev_prod_store(StoreOptions::strict());
        store.load_environment(&name("dev")).unwrap();

        let err = store.load_environment(&name("staging")).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownEnvironment { ref name } if name == "staging"));
        assert_eq!(store.get(&ConfigKey::from("port")).unwrap(), Value::from(8080));
        assert_eq!(store.active_environment(), Some(&name("dev")));
    }

    #[test]
    fn test_load_list_environment_yields_empty_settings() {
        let mut store = DefaultConfigurationStore::new();
        store
            .add_environment_configuration(&name("hosts"), Value::from(vec!["a"]))
            .unwrap();
        store
            .apply_configuration(obj([("x", Value::from(1))]))
            .unwrap();

        store.load_environment(&name("hosts")).unwrap();
        assert!(store.settings().is_empty());
    }

    #[test]
    fn test_apply_configuration_records_and_merges() {
        let mut store = DefaultConfigurationStore::new();
        store.apply_configuration(obj([("a", Value::from(1))])).unwrap();
        store
            .apply_configuration(obj([("a", Value::from(2)), ("b", Value::from(1))]))
            .unwrap();

        assert_eq!(store.overrides().len(), 2);
        assert_eq!(store.get(&ConfigKey::from("a")).unwrap(), Value::from(2));
        assert_eq!(store.get(&ConfigKey::from("b")).unwrap(), Value::from(1));
    }

    #[test]
    fn test_apply_configuration_ignores_primitive() {
        let mut store = DefaultConfigurationStore::new();
        store.apply_configuration(Value::from(true)).unwrap();
        assert!(store.overrides().is_empty());
        assert!(store.settings().is_empty());
    }

    #[test]
    fn test_apply_configuration_rejects_primitive() {
        let mut store = DefaultConfigurationStore::with_options(StoreOptions::strict());
        let err = store.apply_configuration(Value::Null).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValueKind {
                operation: "apply_configuration",
                found: ValueKind::Null
            }
        ));
        assert!(store.overrides().is_empty());
    }

    #[test]
    fn test_apply_configuration_list_recorded_without_effect() {
        let mut store = DefaultConfigurationStore::new();
        store.apply_configuration(obj([("a", Value::from(1))])).unwrap();
        store.apply_configuration(Value::from(vec![1, 2])).unwrap();

        assert_eq!(store.overrides().len(), 2);
        assert_eq!(store.settings(), &settings_of(obj([("a", Value::from(1))])));
    }

    #[test]
    fn test_apply_configuration_conflict_is_atomic() {
        let mut store = DefaultConfigurationStore::with_options(StoreOptions::strict());
        store
            .apply_configuration(obj([("db", Value::from("sqlite")), ("a", Value::from(1))]))
            .unwrap();
        let before = store.configuration().clone();

        let err = store
            .apply_configuration(obj([
                ("a", Value::from(2)),
                ("db", obj([("host", Value::from("pg"))])),
            ]))
            .unwrap_err();

        assert!(matches!(err, ConfigError::MergeTypeConflict { ref path, .. } if path == "db"));
        assert_eq!(store.configuration(), &before);
    }

    #[test]
    fn test_reload_is_pure_replay() {
        let mut store = DefaultConfigurationStore::new();
        store.apply_configuration(obj([("a", Value::from(1))])).unwrap();
        store
            .apply_configuration(obj([("a", Value::from(2)), ("b", Value::from(1))]))
            .unwrap();
        let expected = store.settings().clone();

        store.reset_configuration();
        assert!(store.settings().is_empty());

        store.reload_additional_configuration().unwrap();
        assert_eq!(store.settings(), &expected);
        assert_eq!(store.overrides().len(), 2);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut store = dev_prod_store(StoreOptions::default());
        store.load_environment(&name("prod")).unwrap();
        store.apply_configuration(obj([("x", Value::from(1))])).unwrap();

        store.reset_configuration();
        let once = store.configuration().clone();
        store.reset_configuration();

        assert_eq!(store.configuration(), &once);
        assert_eq!(store.environment_names().count(), 2);
        assert_eq!(store.overrides().len(), 1);
    }

    #[test]
    fn test_merge_objects_uses_store_policy() {
        let lenient = DefaultConfigurationStore::new();
        let strict = DefaultConfigurationStore::with_options(StoreOptions::strict());
        let target = obj([("a", Value::from(1))]);
        let source = obj([("a", obj([("b", Value::from(2))]))]);

        assert_eq!(lenient.merge_objects(&target, &source).unwrap(), source);
        assert!(strict.merge_objects(&target, &source).is_err());
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_apply_configuration_logs_override_count() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(move || writer.clone())
            .finish();

        let mut store = DefaultConfigurationStore::new();
        tracing::subscriber::with_default(subscriber, || {
            store.apply_configuration(obj([("a", Value::from(1))])).unwrap();
            store.apply_configuration(obj([("b", Value::from(2))])).unwrap();
        });

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Applied override layer, 1 recorded"), "{}", output);
        assert!(output.contains("Applied override layer, 2 recorded"), "{}", output);
    }

    #[test]
    fn test_clear_overrides_keeps_settings() {
        let mut store = DefaultConfigurationStore::new();
        store.apply_configuration(obj([("a", Value::from(1))])).unwrap();
        store.clear_overrides();

        assert!(store.overrides().is_empty());
        assert!(store.has(&ConfigKey::from("a")));
    }

    #[test]
    fn test_into_configuration() {
        let mut store = DefaultConfigurationStore::new();
        store.apply_configuration(obj([("a", Value::from(1))])).unwrap();
        let configuration = store.into_configuration();

        let restored =
            DefaultConfigurationStore::from_configuration(configuration, StoreOptions::default());
        assert_eq!(restored.overrides().len(), 1);
        assert!(restored.has(&ConfigKey::from("a")));
    }

    #[test]
    fn test_builder_applies_overrides_after_initial_environment() {
        let store = DefaultConfigurationStore::builder()
            .with_environment("dev", obj([("port", Value::from(8080))]))
            .with_override(obj([("port", Value::from(1234))]))
            .with_initial_environment("dev")
            .build()
            .unwrap();

        assert_eq!(store.get(&ConfigKey::from("port")).unwrap(), Value::from(1234));
        assert_eq!(store.active_environment(), Some(&name("dev")));
    }

    #[test]
    fn test_builder_strict_rejects_unknown_initial_environment() {
        let result = DefaultConfigurationStore::builder()
            .strict()
            .with_initial_environment("missing")
            .build();
        assert!(matches!(result, Err(ConfigError::UnknownEnvironment { .. })));
    }

    #[test]
    fn test_builder_strict_keeps_replay_setting() {
        let builder = ConfigurationStoreBuilder::new()
            .with_options(StoreOptions::default().with_replay_overrides_on_load(true))
            .strict();
        let store = builder.build().unwrap();
        assert!(store.options().replay_overrides_on_load);
        assert_eq!(store.options().merge_policy, MergePolicy::Strict);
    }

    #[test]
    fn test_builder_default() {
        let store = ConfigurationStoreBuilder::default().build().unwrap();
        assert!(store.settings().is_empty());
    }
}
