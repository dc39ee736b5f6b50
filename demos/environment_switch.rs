// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment switching example.
//!
//! This example demonstrates:
//! - Switching between environments without leftover keys
//! - Replaying recorded overrides after a switch
//! - Opting in to automatic replay on load
//!
//! To run this example:
//! ```bash
//! cargo run --example environment_switch
//! ```

use layercfg::prelude::*;

fn object<const N: usize>(entries: [(&str, Value); N]) -> Value {
    entries.into_iter().collect()
}

fn show(label: &str, store: &DefaultConfigurationStore) {
    let active = store
        .active_environment()
        .map(EnvironmentName::to_string)
        .unwrap_or_else(|| "<none>".to_string());
    println!("{} [{}]: {}", label, active, Value::Object(store.settings().clone()));
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let dev = object([("port", Value::from(8080)), ("debug", Value::from(true))]);
    let prod = object([("port", Value::from(443)), ("tls", Value::from(true))]);

    let mut store = DefaultConfigurationStore::builder()
        .with_environment("dev", dev.clone())
        .with_environment("prod", prod.clone())
        .with_initial_environment("dev")
        .with_override(object([("log_level", Value::from("warn"))]))
        .build()?;
    show("initial", &store);

    // Overrides are recorded but not replayed by a plain switch
    store.load_environment(&EnvironmentName::from("prod"))?;
    show("after switch", &store);

    store.reload_additional_configuration()?;
    show("after replay", &store);

    // Same flow with automatic replay
    let mut replaying = DefaultConfigurationStore::builder()
        .with_options(StoreOptions::default().with_replay_overrides_on_load(true))
        .with_environment("dev", dev)
        .with_environment("prod", prod)
        .with_initial_environment("dev")
        .with_override(object([("log_level", Value::from("warn"))]))
        .build()?;
    replaying.load_environment(&EnvironmentName::from("prod"))?;
    show("auto replay", &replaying);

    Ok(())
}
