// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core business logic and types.
//!
//! This module contains the value model, the configuration aggregate, the
//! merge algorithm and the store contract. It has no knowledge of where
//! configuration data comes from.

pub mod config_key;
pub mod config_value;
pub mod configuration;
pub mod environment;
pub mod errors;
pub mod merge;
pub mod service;

// Re-export commonly used types
pub use config_key::ConfigKey;
pub use config_value::{Map, Value, ValueKind};
pub use configuration::Configuration;
pub use environment::EnvironmentName;
pub use errors::{ConfigError, Result};
pub use merge::MergePolicy;
pub use service::ConfigurationStore;
