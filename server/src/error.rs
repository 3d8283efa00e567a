//! Error types for the notes server.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response}
};
use chrono::Utc;
use errors::{ErrorCode, NoteError, StoreError};
use notes_core::ErrorBody;
use thiserror::Error;

/// Result type alias for handlers.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Failures surfaced to HTTP callers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Outcome of a note lifecycle operation.
    #[error(transparent)]
    Note(#[from] NoteError),

    /// Body, query or path that could not be parsed at all.
    #[error("Malformed request: {0}")]
    BadRequest(String)
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Note(err) => match err {
                NoteError::Validation(_) => StatusCode::BAD_REQUEST,
                NoteError::Conflict { .. } => StatusCode::CONFLICT,
                NoteError::NotFound { .. } => StatusCode::NOT_FOUND,
                NoteError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::BadRequest(_) => ErrorCode::BadRequest,
            Self::Note(err) => err.code()
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::Note(NoteError::Validation(errors)) => serde_json::to_value(errors).ok(),
            Self::Note(NoteError::Conflict { title } | NoteError::NotFound { title }) => {
                Some(serde_json::json!({ "title": title }))
            }
            _ => None
        }
    }
}

/// Attached to every error response so the logging middleware can report
/// what the client never sees and stamp the request path onto the body.
#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub code: ErrorCode,
    pub chain: String,
    pub body: ErrorBody
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        // Internal detail stays in the logs.
        let message = if status.is_server_error() {
            "An internal error occurred".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorBody {
            status_code: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            code: code.as_str().to_string(),
            message,
            details: self.details(),
            path: String::new(),
            timestamp: Utc::now()
        };

        let context = ErrorContext {
            code,
            chain: error_chain(&self),
            body: body.clone()
        };

        let mut response = (status, Json(body)).into_response();
        response.extensions_mut().insert(context);
        response
    }
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut chain = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !chain.contains(&text) {
            chain.push_str(": ");
            chain.push_str(&text);
        }
        source = cause.source();
    }
    chain
}

/// Errors raised while starting or running the server.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    #[error("Storage initialization failed: {0}")]
    Storage(#[from] StoreError),

    #[error("Metrics recorder error: {0}")]
    Metrics(String),

    #[error("Server error: {0}")]
    Server(String)
}

#[cfg(test)]
mod tests {
    use super::*;
    use notes_core::NoteDraft;
    use validator::Validate;

    async fn body_of(response: Response) -> ErrorBody {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_mapping() {
        let validation = NoteDraft::new("", "x").validate().unwrap_err();
        assert_eq!(
            ApiError::from(NoteError::from(validation)).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(NoteError::conflict("a")).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(NoteError::not_found("a")).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(NoteError::from(StoreError::query("postgres", "boom"))).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::BadRequest("bad".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let response = ApiError::from(NoteError::not_found("Groceries")).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_of(response).await;
        assert_eq!(body.status_code, 404);
        assert_eq!(body.error, "Not Found");
        assert_eq!(body.code, "NOT_FOUND");
        assert!(body.message.contains("Groceries"));
        assert_eq!(body.details, Some(serde_json::json!({"title": "Groceries"})));
    }

    #[tokio::test]
    async fn test_validation_body_carries_field_errors() {
        let validation = NoteDraft::new("ok", "").validate().unwrap_err();
        let response = ApiError::from(NoteError::from(validation)).into_response();

        let body = body_of(response).await;
        assert_eq!(body.code, "VALIDATION_ERROR");
        let details = body.details.unwrap();
        assert!(details.get("content").is_some());
        assert!(details.get("title").is_none());
    }

    #[tokio::test]
    async fn test_internal_error_is_generic_but_logged() {
        let err = ApiError::from(NoteError::from(StoreError::connection(
            "postgres",
            "connection refused"
        )));
        let response = err.into_response();

        let context = response.extensions().get::<ErrorContext>().cloned().unwrap();
        assert_eq!(context.code, ErrorCode::InternalError);
        assert!(context.chain.contains("connection refused"));

        let body = body_of(response).await;
        assert_eq!(body.status_code, 500);
        assert_eq!(body.message, "An internal error occurred");
        assert!(!body.message.contains("refused"));
        assert!(body.details.is_none());
    }

    #[test]
    fn test_error_chain_skips_repeated_text() {
        let err = ApiError::from(NoteError::from(StoreError::query("postgres", "syntax")));
        let chain = error_chain(&err);
        assert_eq!(chain.matches("syntax").count(), 1);
    }
}
