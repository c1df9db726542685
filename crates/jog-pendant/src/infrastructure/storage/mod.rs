//! Storage infrastructure: configuration file persistence.
//!
//! The `config` sub-module reads the TOML configuration from the platform
//! config directory, writes it back, and falls back to the built-in pendant
//! defaults when no file exists yet.

pub mod config;
