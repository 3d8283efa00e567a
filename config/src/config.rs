//! # Configuration Structures
//!
//! All configuration structures:
//! - Use `serde` for serialization/deserialization, with per-field defaults
//! - Use `validator` for input validation

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use validator::Validate;

/// Top-level configuration for the notes system.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Aggregates the HTTP server, storage backend, PostgreSQL connection,
/// observability and client adapter settings.
///
/// ## Usage
/// ```rust,no_run
/// use config::NotesConfig;
///
/// let config = NotesConfig::default();
/// println!("Listening on {}", config.server.bind_address());
/// ```
///
/// ## Validation
/// All nested configurations must pass their own validation rules.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default, PartialEq)]
pub struct NotesConfig {
    /// HTTP server settings
    #[serde(default)]
    #[validate(nested)]
    pub server: ServerConfig,

    /// Which note store backs the service
    #[serde(default)]
    pub storage: StorageConfig,

    /// PostgreSQL connection settings
    #[serde(default)]
    #[validate(nested)]
    pub postgres: PostgresConfig,

    /// Logging and metrics settings
    #[serde(default)]
    #[validate(nested)]
    pub observability: ObservabilityConfig,

    /// Client adapter settings
    #[serde(default)]
    #[validate(nested)]
    pub client: ClientConfig
}

/// HTTP server configuration.
///
/// ## Fields
/// - `host`: Bind address (default: "0.0.0.0")
/// - `port`: Bind port (default: 3000)
/// - `cors_origins`: Browser origins allowed to call the API
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    #[validate(length(min = 1, max = 255))]
    pub host: String,

    #[serde(default = "default_server_port")]
    #[validate(range(min = 1, max = 65535))]
    pub port: u16,

    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>
}

impl ServerConfig {
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    3000
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost".to_string(),
        "http://localhost:3001".to_string(),
        "http://frontend".to_string(),
        "http://frontend:80".to_string(),
    ]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cors_origins: default_cors_origins()
        }
    }
}

/// Note store backend selection.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, EnumString, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StorageBackend {
    #[default]
    Postgres,
    Memory
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend
}

/// PostgreSQL connection configuration.
///
/// ## Fields
/// - `url`: Full connection URL; when set it wins over the discrete fields
/// - `host`: Database server hostname (default: "localhost")
/// - `port`: Database server port (default: 5432)
/// - `database`: Database name (default: "notes")
/// - `username`: Database user (default: "postgres")
/// - `password`: Database password (default: empty, set via environment)
/// - `pool_size`: Maximum connections in pool (default: 10, range: 1-100)
/// - `timeout_seconds`: Acquire timeout (default: 30, range: 1-300)
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct PostgresConfig {
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default = "default_postgres_host")]
    #[validate(length(min = 1, max = 255))]
    pub host: String,

    #[serde(default = "default_postgres_port")]
    #[validate(range(min = 1, max = 65535))]
    pub port: u16,

    #[serde(default = "default_postgres_database")]
    #[validate(length(min = 1, max = 63))]
    pub database: String,

    #[serde(default = "default_postgres_username")]
    #[validate(length(min = 1, max = 63))]
    pub username: String,

    #[serde(default)]
    pub password: String,

    #[serde(default = "default_postgres_pool_size")]
    #[validate(range(min = 1, max = 100))]
    pub pool_size: u32,

    #[serde(default = "default_postgres_timeout")]
    #[validate(range(min = 1, max = 300))]
    pub timeout_seconds: u64
}

impl PostgresConfig {
    /// Connection URL, either the explicit `url` or one assembled from the
    /// discrete fields.
    #[must_use]
    pub fn connection_url(&self) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }
        if self.password.is_empty() {
            format!(
                "postgres://{}@{}:{}/{}",
                self.username, self.host, self.port, self.database
            )
        } else {
            format!(
                "postgres://{}:{}@{}:{}/{}",
                self.username, self.password, self.host, self.port, self.database
            )
        }
    }
}

fn default_postgres_host() -> String {
    "localhost".to_string()
}

fn default_postgres_port() -> u16 {
    5432
}

fn default_postgres_database() -> String {
    "notes".to_string()
}

fn default_postgres_username() -> String {
    "postgres".to_string()
}

fn default_postgres_pool_size() -> u32 {
    10
}

fn default_postgres_timeout() -> u64 {
    30
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: default_postgres_host(),
            port: default_postgres_port(),
            database: default_postgres_database(),
            username: default_postgres_username(),
            password: String::new(),
            pool_size: default_postgres_pool_size(),
            timeout_seconds: default_postgres_timeout()
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct ObservabilityConfig {
    /// trace/debug/info/warn/error
    #[serde(default = "default_logging_level")]
    #[validate(custom(function = "validate_logging_level"))]
    pub logging_level: String,

    /// Install the Prometheus recorder and serve `/metrics`
    #[serde(default = "default_true")]
    pub metrics_enabled: bool
}

fn default_logging_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn validate_logging_level(value: &str) -> Result<(), validator::ValidationError> {
    match value {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(validator::ValidationError::new("invalid_logging_level"))
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            logging_level: default_logging_level(),
            metrics_enabled: true
        }
    }
}

/// Client adapter configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the notes server
    #[serde(default = "default_client_base_url")]
    #[validate(custom(function = "validate_http_url"))]
    pub base_url: String,

    /// Per-request timeout
    #[serde(default = "default_client_timeout")]
    #[validate(range(min = 1, max = 300))]
    pub timeout_seconds: u64
}

fn default_client_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_client_timeout() -> u64 {
    10
}

fn validate_http_url(value: &str) -> Result<(), validator::ValidationError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_base_url"))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_client_base_url(),
            timeout_seconds: default_client_timeout()
        }
    }
}
