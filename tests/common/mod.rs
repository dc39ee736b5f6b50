// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared builders for integration tests.

use layercfg::domain::Value;

/// Builds an object value from key/value pairs.
#[allow(dead_code)]
pub fn obj<const N: usize>(entries: [(&str, Value); N]) -> Value {
    entries.into_iter().collect()
}

/// Builds the `dev`/`prod` pair of environment layers used across tests.
#[allow(dead_code)]
pub fn dev_and_prod() -> (Value, Value) {
    let dev = obj([
        ("port", Value::from(8080)),
        ("debug", Value::from(true)),
        (
            "database",
            obj([("host", Value::from("localhost")), ("pool", Value::from(2))]),
        ),
    ]);
    let prod = obj([
        ("port", Value::from(443)),
        ("tls", Value::from(true)),
        (
            "database",
            obj([("host", Value::from("db.internal")), ("pool", Value::from(20))]),
        ),
    ]);
    (dev, prod)
}
