//! # Configuration System
//!
//! Centralized configuration for the notes server, its storage backend and
//! the client adapter.
//!
//! This crate provides:
//! - Configuration structures with defaults
//! - Configuration file loading (TOML/YAML)
//! - Environment variable overrides (12-factor app principles)
//! - Validation with the `validator` crate
//!
//! Precedence, lowest to highest: defaults, file, environment.

pub mod config;
pub mod file_loader;
pub mod loader;

pub use config::{
    ClientConfig, NotesConfig, ObservabilityConfig, PostgresConfig, ServerConfig, StorageBackend,
    StorageConfig
};
pub use file_loader::{ConfigError, load_from_file, load_from_toml, load_from_yaml};
pub use loader::{apply_env_overrides, load, load_client_from_env, load_from_env};
pub use validator::Validate;
