//! Node Configuration Module
//!
//! Provides the node configuration loaded from TOML files. Every detection
//! threshold and timing constant of the device is an operator-tunable value.
//!
//! ## Loading Order
//!
//! 1. `VAULT_CONFIG` environment variable (path to TOML file)
//! 2. `vault_config.toml` in the current working directory
//! 3. Built-in defaults (matching the device constants)
//!
//! The loaded config is handed to the node as plain values; nothing in the
//! detection or alarm path reads configuration on its own.

mod node_config;
pub mod defaults;
pub mod validation;

pub use node_config::*;
