//! Infrastructure layer for the pendant controller.
//!
//! Contains the adapters around the core: input device sources, action
//! directories, and configuration file storage.
//!
//! **Dependency rule**: this layer may depend on `application` and `jog_core`.
//! The only items `application` takes from here are the `device_source`
//! traits; concrete adapters are wired up in `main.rs` and in tests.

pub mod action_directory;
pub mod device_source;
pub mod storage;
