// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the layered configuration crate.
//!
//! This module defines the error types that can occur when registering layers,
//! switching environments, merging values, or reading settings back out.
//! All errors use `thiserror` for proper error handling and conversion.

use crate::domain::config_value::ValueKind;
use thiserror::Error;

/// The main error type for configuration operations.
///
/// It is marked as `#[non_exhaustive]` to allow for future additions without
/// breaking backwards compatibility.
///
/// # Examples
///
/// ```
/// use layercfg::domain::errors::ConfigError;
///
/// fn lookup() -> Result<String, ConfigError> {
///     Err(ConfigError::ConfigKeyNotFound {
///         key: "database.host".to_string(),
///     })
/// }
///
/// assert!(lookup().is_err());
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A layer was not object-shaped where an object or list is required.
    #[error("{operation} requires an object or list layer, got {found}")]
    InvalidValueKind {
        /// The operation that rejected the layer
        operation: &'static str,
        /// The kind of value that was supplied
        found: ValueKind,
    },

    /// No environment layer is registered under the requested name.
    #[error("Unknown environment: {name}")]
    UnknownEnvironment {
        /// The environment name that was requested
        name: String,
    },

    /// A merge found an object in the source where the target holds a value
    /// that cannot be merged into.
    #[error("Cannot merge {source_kind} into {target_kind} at '{path}'")]
    MergeTypeConflict {
        /// Dotted path of the conflicting entry (`<root>` for the top level)
        path: String,
        /// The kind of value found in the target
        target_kind: ValueKind,
        /// The kind of value found in the source
        source_kind: ValueKind,
    },

    /// The requested configuration key was not found in the settings.
    #[error("Configuration key not found: {key}")]
    ConfigKeyNotFound {
        /// The key that was not found
        key: String,
    },

    /// A value was read as a type it does not hold.
    #[error("Configuration value for key '{key}' is {found}, not {target_type}")]
    TypeConversionError {
        /// The key being read
        key: String,
        /// The target type name
        target_type: &'static str,
        /// The kind of value actually stored
        found: ValueKind,
    },

    /// A foreign value tree could not be represented as a [`Value`](crate::domain::Value).
    #[error("Failed to convert configuration: {message}")]
    ParseError {
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl ConfigError {
    /// Creates an `InvalidValueKind` error for the given operation.
    pub fn invalid_layer(operation: &'static str, found: ValueKind) -> Self {
        ConfigError::InvalidValueKind { operation, found }
    }

    /// Creates a `MergeTypeConflict` error from the path segments walked so far.
    pub fn merge_conflict(path: &[String], target_kind: ValueKind, source_kind: ValueKind) -> Self {
        let path = if path.is_empty() {
            "<root>".to_string()
        } else {
            path.join(".")
        };
        ConfigError::MergeTypeConflict {
            path,
            target_kind,
            source_kind,
        }
    }

    /// Creates a `TypeConversionError` for a typed accessor.
    pub fn type_mismatch(key: &str, target_type: &'static str, found: ValueKind) -> Self {
        ConfigError::TypeConversionError {
            key: key.to_string(),
            target_type,
            found,
        }
    }
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
