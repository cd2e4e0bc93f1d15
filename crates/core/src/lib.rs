//! Shared types and configuration for the Orbiter world-state client.

pub mod settings;
pub mod types;
