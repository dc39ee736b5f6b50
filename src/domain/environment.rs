// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment name newtype.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// The name an environment layer is registered under, e.g. `dev` or `prod`.
///
/// Names are opaque and compared exactly; `Prod` and `prod` are different
/// environments.
///
/// # Examples
///
/// ```
/// use layercfg::domain::EnvironmentName;
///
/// let name = EnvironmentName::from("prod");
/// assert_eq!(name.as_str(), "prod");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnvironmentName(String);

impl EnvironmentName {
    /// Creates a new `EnvironmentName`.
    pub fn new(name: impl Into<String>) -> Self {
        EnvironmentName(name.into())
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for EnvironmentName {
    fn from(s: String) -> Self {
        EnvironmentName(s)
    }
}

impl From<&str> for EnvironmentName {
    fn from(s: &str) -> Self {
        EnvironmentName(s.to_string())
    }
}

impl Borrow<str> for EnvironmentName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EnvironmentName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EnvironmentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
