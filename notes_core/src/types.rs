use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

/// Upper bound on title length, in characters.
pub const MAX_TITLE_LEN: usize = 80;

/// Upper bound on content length, in characters.
pub const MAX_CONTENT_LEN: usize = 480;

/// A persisted note.
///
/// `id` and both timestamps are owned by the store; callers only ever supply
/// a [`NoteDraft`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub creation_date: DateTime<Utc>,
    pub last_mod_date: DateTime<Utc>
}

/// Title and content as supplied by a caller on create or update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct NoteDraft {
    /// Unique note title
    #[validate(length(min = 1, max = 80), custom(function = "no_nul"))]
    #[schema(min_length = 1, max_length = 80, example = "Shopping List")]
    pub title: String,

    /// Note body
    #[validate(length(min = 1, max = 480), custom(function = "no_nul"))]
    #[schema(min_length = 1, max_length = 480, example = "Milk, eggs")]
    pub content: String
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into()
        }
    }
}

#[derive(Validate)]
struct TitleKey {
    #[validate(length(min = 1, max = 80), custom(function = "no_nul"))]
    title: String
}

#[derive(Validate)]
struct SearchFragment {
    #[validate(length(max = 80), custom(function = "no_nul"))]
    title: String
}

/// PostgreSQL text columns cannot hold NUL.
fn no_nul(value: &str) -> Result<(), ValidationError> {
    if value.contains('\0') {
        Err(ValidationError::new("nul_character"))
    } else {
        Ok(())
    }
}

/// Checks a title used to address an existing note.
pub fn validate_title(title: &str) -> Result<(), ValidationErrors> {
    TitleKey {
        title: title.to_string()
    }
    .validate()
}

/// Checks a title fragment used for search. Empty is allowed and matches
/// every note.
pub fn validate_search_fragment(fragment: &str) -> Result<(), ValidationErrors> {
    SearchFragment {
        title: fragment.to_string()
    }
    .validate()
}
