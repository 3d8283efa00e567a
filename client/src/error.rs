use reqwest::StatusCode;
use serde_json::Value;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        details: Option<Value>
    },

    #[error("Server responded with status {status}")]
    Server { status: u16 },

    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String)
}

impl ClientError {
    /// Local rejection of blank input, raised before any request is sent.
    pub fn blank_input() -> Self {
        Self::Validation {
            message: "Title and content are required".to_string(),
            details: None
        }
    }

    pub(crate) fn from_status(status: StatusCode, message: Option<String>, details: Option<Value>) -> Self {
        let message = message.unwrap_or_else(|| status.to_string());
        match status {
            StatusCode::CONFLICT => Self::Conflict { message },
            StatusCode::NOT_FOUND => Self::NotFound { message },
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                Self::Validation { message, details }
            }
            other => Self::Server {
                status: other.as_u16()
            }
        }
    }

    /// Text for a person, not a log.
    pub fn user_message(&self) -> String {
        match self {
            Self::Conflict { .. } => {
                "A note with this title already exists. Choose another title.".to_string()
            }
            Self::NotFound { .. } => "Note not found.".to_string(),
            Self::Validation { message, .. } => format!("Please check your input: {message}"),
            Self::Server { .. } | Self::Http(_) => {
                "Something went wrong talking to the server. Please try again.".to_string()
            }
            Self::InvalidBaseUrl(_) => "The notes server address is not valid.".to_string()
        }
    }
}
