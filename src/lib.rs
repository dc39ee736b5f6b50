// SPDX-License-Identifier: MIT OR Apache-2.0

//! A layered configuration merging engine.
//!
//! This crate builds one effective configuration by deep-merging named
//! environment layers and an ordered list of override layers. Switching the
//! active environment rebuilds the settings from scratch; overrides are
//! recorded so they can be replayed on top of whichever environment is loaded.
//!
//! The crate never reads files, environment variables or the network. Hosts
//! build [`Value`](domain::Value) trees from their own data and hand them in.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types and the merge algorithm (`Value`, `Configuration`,
//!   `merge`, errors) and the `ConfigurationStore` contract
//! - **Service**: The default store that owns a configuration and replays layers
//! - **Adapters**: Conversions from other value models (YAML)
//!
//! # Merge Semantics
//!
//! - Objects merge key by key, recursively; keys only in the target survive
//! - Lists are rebuilt from the source, so `[1, 2, 3]` merged with `[9]` is `[9]`
//! - Primitives and null in the source always win
//!
//! # Feature Flags
//!
//! - `yaml`: Conversions to and from `serde_yaml::Value` (default)
//!
//! # Quick Start
//!
//! ```rust
//! use layercfg::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let mut store = DefaultConfigurationStore::new();
//! let dev = EnvironmentName::from("dev");
//! let prod = EnvironmentName::from("prod");
//!
//! store.add_environment_configuration(&dev, [("port", 8080)].into_iter().collect())?;
//! store.add_environment_configuration(
//!     &prod,
//!     [("port", Value::from(443)), ("tls", Value::from(true))]
//!         .into_iter()
//!         .collect(),
//! )?;
//!
//! store.load_environment(&prod)?;
//! store.apply_configuration([("port", 8443)].into_iter().collect())?;
//! assert_eq!(store.get(&ConfigKey::from("port"))?, Value::from(8443));
//!
//! // Overrides are kept, and can be replayed after switching environments.
//! store.load_environment(&dev)?;
//! assert_eq!(store.get(&ConfigKey::from("port"))?, Value::from(8080));
//! store.reload_additional_configuration()?;
//! assert_eq!(store.get(&ConfigKey::from("port"))?, Value::from(8443));
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::domain::merge::{merge_layers, merge_objects};
    pub use crate::domain::{
        ConfigError, ConfigKey, Configuration, ConfigurationStore, EnvironmentName, Map,
        MergePolicy, Result, Value, ValueKind,
    };
    pub use crate::service::{
        ConfigurationStoreBuilder, DefaultConfigurationStore, InputPolicy, StoreOptions,
    };
}
