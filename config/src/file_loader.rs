//! # Configuration File Loading
//!
//! Loads configuration from TOML or YAML files.
//!
//! Supports automatic format detection based on file extension.

use crate::config::NotesConfig;
use std::path::Path;

/// Configuration loading error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    TomlParse(String),

    #[error("Failed to parse YAML: {0}")]
    YamlParse(String),

    #[error("Config file has no extension")]
    NoExtension,

    #[error("Unsupported config file format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Invalid configuration: {0}")]
    Validation(#[from] validator::ValidationErrors)
}

/// Load configuration from TOML file.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Loads configuration from a TOML format file. Missing sections and fields
/// fall back to their defaults.
///
/// ## Usage
/// ```rust,no_run
/// use config::load_from_toml;
/// use std::path::Path;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = load_from_toml(Path::new("notes.toml"))?;
///     println!("PostgreSQL host: {}", config.postgres.host);
///     Ok(())
/// }
/// ```
///
/// ## Error Handling
/// Returns `ConfigError` for:
/// - File not found
/// - Any other read failure (`Io`)
/// - Invalid TOML syntax
pub fn load_from_toml(path: &Path) -> Result<NotesConfig, ConfigError> {
    let contents = read_config_file(path)?;

    let config: NotesConfig =
        toml::from_str(&contents).map_err(|e| ConfigError::TomlParse(e.to_string()))?;

    Ok(config)
}

/// Load configuration from YAML file.
///
/// ## Error Handling
/// Returns `ConfigError` for:
/// - File not found
/// - Invalid YAML syntax
pub fn load_from_yaml(path: &Path) -> Result<NotesConfig, ConfigError> {
    let contents = read_config_file(path)?;

    let config: NotesConfig =
        serde_yaml::from_str(&contents).map_err(|e| ConfigError::YamlParse(e.to_string()))?;

    Ok(config)
}

fn read_config_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ConfigError::FileNotFound(path.display().to_string()),
        _ => ConfigError::Io(e)
    })
}

/// Load configuration from file with auto-detection.
///
/// ## Supported Formats
/// - `.toml`: TOML format
/// - `.yaml`: YAML format
/// - `.yml`: YAML format
pub fn load_from_file(path: &Path) -> Result<NotesConfig, ConfigError> {
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or(ConfigError::NoExtension)?;

    match extension.to_lowercase().as_str() {
        "toml" => load_from_toml(path),
        "yaml" | "yml" => load_from_yaml(path),
        other => Err(ConfigError::UnsupportedFormat(other.to_string()))
    }
}
