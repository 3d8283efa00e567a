//! # Notes Errors
//!
//! Error taxonomy shared by the store, the lifecycle service and the
//! transport layer.
//!
//! - [`StoreError`] is what a `NoteStore` backend reports.
//! - [`NoteError`] is the typed outcome of a lifecycle operation.
//! - [`ErrorCode`] is the stable, machine-readable code put on the wire.

use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

/// Storage layer errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Title already taken on {backend}: {title}")]
    Duplicate { backend: String, title: String },

    #[error("Not found on {backend}: {key}")]
    NotFound { backend: String, key: String },

    #[error("Connection to {backend} failed: {reason}")]
    ConnectionError { backend: String, reason: String },

    #[error("Query on {backend} failed: {reason}")]
    QueryError { backend: String, reason: String }
}

impl StoreError {
    pub fn duplicate(backend: &str, title: impl Into<String>) -> Self {
        Self::Duplicate {
            backend: backend.to_string(),
            title: title.into()
        }
    }

    pub fn not_found(backend: &str, key: impl Into<String>) -> Self {
        Self::NotFound {
            backend: backend.to_string(),
            key: key.into()
        }
    }

    pub fn connection(backend: &str, reason: impl Into<String>) -> Self {
        Self::ConnectionError {
            backend: backend.to_string(),
            reason: reason.into()
        }
    }

    pub fn query(backend: &str, reason: impl Into<String>) -> Self {
        Self::QueryError {
            backend: backend.to_string(),
            reason: reason.into()
        }
    }
}

/// Outcome of a failed note lifecycle operation.
#[derive(Debug, Error)]
pub enum NoteError {
    #[error("Invalid note input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("A note titled '{title}' already exists")]
    Conflict { title: String },

    #[error("No note titled '{title}'")]
    NotFound { title: String },

    #[error("Storage failure: {0}")]
    Storage(#[source] StoreError)
}

impl NoteError {
    pub fn conflict(title: impl Into<String>) -> Self {
        Self::Conflict {
            title: title.into()
        }
    }

    pub fn not_found(title: impl Into<String>) -> Self {
        Self::NotFound {
            title: title.into()
        }
    }

    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(_) => ErrorCode::ValidationError,
            Self::Conflict { .. } => ErrorCode::Conflict,
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::Storage(_) => ErrorCode::InternalError
        }
    }
}

/// Duplicate and missing rows reported by the store carry the same meaning
/// as the service-level checks, so they fold into the typed outcomes.
impl From<StoreError> for NoteError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate { title, .. } => Self::Conflict { title },
            StoreError::NotFound { key, .. } => Self::NotFound { title: key },
            other => Self::Storage(other)
        }
    }
}

/// Wire-level error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    BadRequest,
    ValidationError,
    Conflict,
    NotFound,
    InternalError
}

impl ErrorCode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::Conflict => "CONFLICT",
            Self::NotFound => "NOT_FOUND",
            Self::InternalError => "INTERNAL_ERROR"
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
