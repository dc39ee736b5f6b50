// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing conversions from host data structures.
//!
//! The store only ever sees [`Value`](crate::domain::Value) trees. Hosts that
//! already hold data in another crate's value model convert it here; reading
//! and parsing files stays on the host's side.

#[cfg(feature = "yaml")]
pub mod yaml_value;
