//! Public read shapes. Store-owned fields (`id`, timestamps) never leave the
//! server.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::types::Note;

/// Full public view of a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NoteReadDto {
    pub title: String,
    pub content: String
}

impl From<&Note> for NoteReadDto {
    fn from(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone()
        }
    }
}

impl From<Note> for NoteReadDto {
    fn from(note: Note) -> Self {
        Self {
            title: note.title,
            content: note.content
        }
    }
}

/// Search hit: the title only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NoteTitleDto {
    pub title: String
}

impl From<&Note> for NoteTitleDto {
    fn from(note: &Note) -> Self {
        Self {
            title: note.title.clone()
        }
    }
}

/// Body of every failed HTTP response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status_code: u16,
    /// Canonical reason phrase for `status_code`
    pub error: String,
    /// Machine-readable code, e.g. `NOT_FOUND`
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,
    /// Request path that failed
    #[serde(default)]
    pub path: String,
    pub timestamp: DateTime<Utc>
}
