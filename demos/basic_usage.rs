// SPDX-License-Identifier: MIT OR Apache-2.0

//! Basic usage example for the layered configuration crate.
//!
//! This example demonstrates:
//! - Creating a store and registering environment layers
//! - Loading an environment
//! - Applying override layers on top
//! - Reading values back by dotted key
//!
//! To run this example:
//! ```bash
//! RUST_LOG=debug cargo run --example basic_usage
//! ```

use layercfg::prelude::*;

fn object<const N: usize>(entries: [(&str, Value); N]) -> Value {
    entries.into_iter().collect()
}

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== Layered Configuration: Basic Usage ===\n");

    let mut store = DefaultConfigurationStore::new();
    let dev = EnvironmentName::from("dev");

    // Example 1: Register and load an environment
    println!("--- Example 1: Environment Layer ---");
    store.add_environment_configuration(
        &dev,
        object([
            ("app", object([("name", Value::from("demo")), ("debug", Value::from(true))])),
            ("server", object([("port", Value::from(8080))])),
        ]),
    )?;
    store.load_environment(&dev)?;

    for key in store.configuration().all_keys() {
        println!("  {} = {}", key, store.get(&key)?);
    }

    // Example 2: Apply an override
    println!("\n--- Example 2: Override Layer ---");
    store.apply_configuration(object([("server", object([("port", Value::from(9090))]))]))?;

    let port = store.get(&ConfigKey::from("server.port"))?;
    println!("✓ server.port is now {}", port.as_i64("server.port")?);
    println!("  app.name is still {}", store.get(&ConfigKey::from("app.name"))?);

    // Example 3: Defaults for missing keys
    println!("\n--- Example 3: Default Values ---");
    let timeout = store.get_or_default(&ConfigKey::from("server.timeout"), Value::from(30));
    println!("  server.timeout = {} (default)", timeout);

    // Example 4: Rejected input with a strict store
    println!("\n--- Example 4: Strict Store ---");
    let mut strict = DefaultConfigurationStore::with_options(StoreOptions::strict());
    match strict.apply_configuration(Value::from("not-an-object")) {
        Ok(()) => println!("✗ Unexpectedly accepted a string layer"),
        Err(e) => println!("✓ Rejected: {}", e),
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
