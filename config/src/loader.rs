//! # Environment Variable Loader
//!
//! Applies environment variable overrides on top of file or default
//! configuration, following 12-factor app principles.
//!
//! ## Environment Variables
//!
//! | Variable | Field |
//! |----------|-------|
//! | `NOTES_HOST` | `server.host` |
//! | `PORT` | `server.port` |
//! | `FRONTEND_URL` | appended to `server.cors_origins` |
//! | `NOTES_STORAGE` | `storage.backend` (`postgres` or `memory`) |
//! | `DATABASE_URL` | `postgres.url` |
//! | `PG_HOST`, `PG_PORT`, `PG_DATABASE`, `PG_USERNAME`, `PG_PASSWORD` | `postgres.*` |
//! | `PG_POOL_SIZE`, `PG_TIMEOUT_SECONDS` | `postgres.pool_size`, `postgres.timeout_seconds` |
//! | `OB_LOGGING_LEVEL`, `OB_METRICS_ENABLED` | `observability.*` |
//! | `NOTES_SERVER_URL`, `CL_TIMEOUT_SECONDS` | `client.base_url`, `client.timeout_seconds` |

use crate::config::{ClientConfig, NotesConfig};
use crate::file_loader::{ConfigError, load_from_file};
use std::env;
use std::path::Path;
use validator::Validate;

/// Load configuration from defaults plus environment variables.
///
/// ## Usage
/// ```rust,no_run
/// use config::load_from_env;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = load_from_env()?;
///     println!("Listening on {}", config.server.bind_address());
///     Ok(())
/// }
/// ```
pub fn load_from_env() -> Result<NotesConfig, ConfigError> {
    load(None)
}

/// Load configuration with full precedence and validate the result.
///
/// Starts from the file at `path` when given, otherwise from defaults, then
/// applies environment overrides.
pub fn load(path: Option<&Path>) -> Result<NotesConfig, ConfigError> {
    let mut config = match path {
        Some(path) => load_from_file(path)?,
        None => NotesConfig::default()
    };

    apply_env_overrides(&mut config)?;
    config.validate()?;

    tracing::debug!(
        backend = %config.storage.backend,
        bind = %config.server.bind_address(),
        "Configuration loaded"
    );

    Ok(config)
}

/// Overwrite fields of `config` from any environment variables that are set.
///
/// Unset variables leave the field untouched; set but unparseable variables
/// are an error.
pub fn apply_env_overrides(config: &mut NotesConfig) -> Result<(), ConfigError> {
    if let Some(host) = env_string("NOTES_HOST") {
        config.server.host = host;
    }
    if let Some(port) = parse_env("PORT")? {
        config.server.port = port;
    }
    if let Some(origin) = env_string("FRONTEND_URL") {
        if !config.server.cors_origins.contains(&origin) {
            config.server.cors_origins.push(origin);
        }
    }

    if let Some(backend) = parse_env("NOTES_STORAGE")? {
        config.storage.backend = backend;
    }

    if let Some(url) = env_string("DATABASE_URL") {
        config.postgres.url = Some(url);
    }
    if let Some(host) = env_string("PG_HOST") {
        config.postgres.host = host;
    }
    if let Some(port) = parse_env("PG_PORT")? {
        config.postgres.port = port;
    }
    if let Some(database) = env_string("PG_DATABASE") {
        config.postgres.database = database;
    }
    if let Some(username) = env_string("PG_USERNAME") {
        config.postgres.username = username;
    }
    if let Some(password) = env_string("PG_PASSWORD") {
        config.postgres.password = password;
    }
    if let Some(pool_size) = parse_env("PG_POOL_SIZE")? {
        config.postgres.pool_size = pool_size;
    }
    if let Some(timeout) = parse_env("PG_TIMEOUT_SECONDS")? {
        config.postgres.timeout_seconds = timeout;
    }

    if let Some(level) = env_string("OB_LOGGING_LEVEL") {
        config.observability.logging_level = level.to_lowercase();
    }
    if let Some(enabled) = parse_env("OB_METRICS_ENABLED")? {
        config.observability.metrics_enabled = enabled;
    }

    apply_client_env_overrides(&mut config.client)
}

/// Client section only: defaults plus `NOTES_SERVER_URL` and
/// `CL_TIMEOUT_SECONDS`.
///
/// Server and storage variables are not read. The result is not validated so
/// callers can layer their own overrides first.
pub fn load_client_from_env() -> Result<ClientConfig, ConfigError> {
    let mut client = ClientConfig::default();
    apply_client_env_overrides(&mut client)?;
    Ok(client)
}

fn apply_client_env_overrides(client: &mut ClientConfig) -> Result<(), ConfigError> {
    if let Some(url) = env_string("NOTES_SERVER_URL") {
        client.base_url = url;
    }
    if let Some(timeout) = parse_env("CL_TIMEOUT_SECONDS")? {
        client.timeout_seconds = timeout;
    }
    Ok(())
}

fn env_string(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_env<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display
{
    match env_string(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                reason: e.to_string()
            }),
        None => Ok(None)
    }
}
