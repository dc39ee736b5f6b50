// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the configuration store implementation.
//!
//! This module contains the concrete implementation of the `ConfigurationStore`
//! trait together with the options that tune its merge and validation behavior.

pub mod default_store;
pub mod options;

// Re-export commonly used types
pub use default_store::{ConfigurationStoreBuilder, DefaultConfigurationStore};
pub use options::{InputPolicy, StoreOptions};
