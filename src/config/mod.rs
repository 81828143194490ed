//! Configuration module for Controlla
//!
//! Configuration hierarchy:
//! 1. Environment variables (CONTROLLA_*)
//! 2. Config file (TOML)
//! 3. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{
    load_or_default, load_with_warnings, with_env_overrides, ConfigError, ConfigWarning,
};
pub use types::{Config, LogFormat, LoggingConfig, StoreConfig};
