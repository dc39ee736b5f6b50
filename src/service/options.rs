// SPDX-License-Identifier: MIT OR Apache-2.0

//! Behavioral options for a configuration store.

use crate::domain::MergePolicy;
use serde::{Deserialize, Serialize};

/// How a store treats input it cannot use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputPolicy {
    /// Leave the configuration untouched and report success.
    #[default]
    Ignore,
    /// Leave the configuration untouched and return an error.
    Reject,
}

/// Options controlling how a [`DefaultConfigurationStore`](crate::service::DefaultConfigurationStore)
/// merges and validates layers.
///
/// The defaults are lenient: bad layers and unknown environments are
/// ignored, object sources replace primitive targets, and loading an
/// environment does not replay overrides.
///
/// # Examples
///
/// ```
/// use layercfg::domain::MergePolicy;
/// use layercfg::service::{InputPolicy, StoreOptions};
///
/// let options = StoreOptions::default()
///     .with_merge_policy(MergePolicy::Strict)
///     .with_unknown_environment_policy(InputPolicy::Reject)
///     .with_replay_overrides_on_load(true);
///
/// assert_eq!(options.invalid_layer_policy, InputPolicy::Ignore);
/// assert!(options.replay_overrides_on_load);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreOptions {
    /// How object sources meet primitive targets during a merge
    pub merge_policy: MergePolicy,
    /// What to do with layers that are not objects or lists
    pub invalid_layer_policy: InputPolicy,
    /// What to do when loading an environment that was never registered
    pub unknown_environment_policy: InputPolicy,
    /// Whether loading an environment replays recorded overrides afterwards
    pub replay_overrides_on_load: bool,
}

impl StoreOptions {
    /// Options that reject every kind of bad input and type conflict.
    pub fn strict() -> Self {
        Self {
            merge_policy: MergePolicy::Strict,
            invalid_layer_policy: InputPolicy::Reject,
            unknown_environment_policy: InputPolicy::Reject,
            replay_overrides_on_load: false,
        }
    }

    /// Sets the merge policy.
    pub fn with_merge_policy(mut self, policy: MergePolicy) -> Self {
        self.merge_policy = policy;
        self
    }

    /// Sets the policy for layers that are not objects or lists.
    pub fn with_invalid_layer_policy(mut self, policy: InputPolicy) -> Self {
        self.invalid_layer_policy = policy;
        self
    }

    /// Sets the policy for loading unregistered environments.
    pub fn with_unknown_environment_policy(mut self, policy: InputPolicy) -> Self {
        self.unknown_environment_policy = policy;
        self
    }

    /// Sets whether loading an environment replays recorded overrides.
    pub fn with_replay_overrides_on_load(mut self, replay: bool) -> Self {
        self.replay_overrides_on_load = replay;
        self
    }
}
