//! TOML-based configuration for the pendant controller.
//!
//! Reads and writes `AppConfig` to the platform-appropriate config file:
//! - Windows:  `%APPDATA%\JogPendant\config.toml`
//! - Linux:    `~/.config/jogpendant/config.toml`
//! - macOS:    `~/Library/Application Support/JogPendant/config.toml`
//!
//! Every field has a default, so an empty file (or no file) yields the stock
//! MUHI setup:
//!
//! ```toml
//! [pendant]
//! device_name = "MUHI"
//! log_level = "info"
//!
//! [session]
//! warm_up_ms = 8000
//! retry_interval_ms = 20
//! poll_interval_ms = 2
//! shutdown_grace_ms = 10000
//!
//! [[buttons]]
//! id = 8
//! role = "home"
//! label = "home"
//!
//! [[axes]]
//! axis = "x"
//! role = "wheel"
//! ```
//!
//! Button and axis lists are validated when converted with
//! [`AppConfig::mappings`]; the raw lists are kept as written so a bad file
//! can still be loaded, inspected and saved.

use std::path::{Path, PathBuf};
use std::time::Duration;

use jog_core::mapping::{muhi, AxisBinding, ButtonBinding};
use jog_core::{AxisMap, ButtonMap, MappingError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::command_table::RetryPolicy;
use crate::application::controller_session::{SessionOptions, StartupGate};
use crate::application::interpret_events::PendantMappings;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The button or axis table binds the same input twice.
    #[error("invalid input mapping: {0}")]
    InvalidMapping(#[from] MappingError),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub pendant: PendantConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default = "muhi::button_bindings")]
    pub buttons: Vec<ButtonBinding>,
    #[serde(default = "muhi::axis_bindings")]
    pub axes: Vec<AxisBinding>,
}

/// Which device to use and how loudly to log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PendantConfig {
    /// Exact device name reported by the driver.
    #[serde(default = "default_device_name")]
    pub device_name: String,
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Worker timings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionConfig {
    /// Delay before resolving commands when the directory cannot signal
    /// readiness.
    #[serde(default = "default_warm_up_ms")]
    pub warm_up_ms: u64,
    #[serde(default = "default_retry_interval_ms")]
    pub retry_interval_ms: u64,
    /// Lookups per command before giving up; absent means retry forever.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_resolve_attempts: Option<u32>,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_shutdown_grace_ms")]
    pub shutdown_grace_ms: u64,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_device_name() -> String {
    muhi::DEVICE_NAME.to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_warm_up_ms() -> u64 {
    8_000
}
fn default_retry_interval_ms() -> u64 {
    20
}
fn default_poll_interval_ms() -> u64 {
    2
}
fn default_shutdown_grace_ms() -> u64 {
    10_000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            pendant: PendantConfig::default(),
            session: SessionConfig::default(),
            buttons: muhi::button_bindings(),
            axes: muhi::axis_bindings(),
        }
    }
}

impl Default for PendantConfig {
    fn default() -> Self {
        Self {
            device_name: default_device_name(),
            log_level: default_log_level(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            warm_up_ms: default_warm_up_ms(),
            retry_interval_ms: default_retry_interval_ms(),
            max_resolve_attempts: None,
            poll_interval_ms: default_poll_interval_ms(),
            shutdown_grace_ms: default_shutdown_grace_ms(),
        }
    }
}

impl AppConfig {
    /// Validates the button and axis lists into lookup tables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMapping`] if an id or axis is bound twice.
    pub fn mappings(&self) -> Result<PendantMappings, ConfigError> {
        Ok(PendantMappings {
            buttons: ButtonMap::from_bindings(self.buttons.iter().cloned())?,
            axes: AxisMap::from_bindings(self.axes.iter().copied())?,
        })
    }

    /// Session options with a warm-up start-up gate.
    ///
    /// Callers that can signal readiness replace `startup` with
    /// [`StartupGate::Ready`].
    pub fn session_options(&self) -> SessionOptions {
        let s = &self.session;
        SessionOptions {
            device_name: self.pendant.device_name.clone(),
            startup: StartupGate::WarmUp(Duration::from_millis(s.warm_up_ms)),
            retry: RetryPolicy {
                interval: Duration::from_millis(s.retry_interval_ms),
                max_attempts: s.max_resolve_attempts,
            },
            poll_interval: Duration::from_millis(s.poll_interval_ms),
            shutdown_grace: Duration::from_millis(s.shutdown_grace_ms),
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads `AppConfig` from the platform config file, returning defaults if the
/// file does not exist yet.
///
/// # Errors
///
/// See [`load_config_from`].
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

/// Loads `AppConfig` from `path`, returning defaults if it does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Persists `config` to the platform config file.
///
/// # Errors
///
/// See [`save_config_to`].
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    save_config_to(config, &config_file_path()?)
}

/// Writes `config` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolves the platform config directory, including the app subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("JogPendant"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("jogpendant"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("JogPendant")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
