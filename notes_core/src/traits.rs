//! Persistence contract for notes

use async_trait::async_trait;
use errors::StoreError;

use crate::types::Note;

/// Data access for notes. Implementations hold no business rules beyond
/// title uniqueness, which they must enforce themselves (unique index or
/// equivalent) and report as [`StoreError::Duplicate`].
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Case-insensitive substring match on title. An empty fragment matches
    /// every note; no match yields an empty vec.
    async fn find_by_title_contains(&self, fragment: &str) -> Result<Vec<Note>, StoreError>;

    async fn find_by_title_exact(&self, title: &str) -> Result<Option<Note>, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Note>, StoreError>;

    /// Assigns `id` and both timestamps.
    async fn insert(&self, title: &str, content: &str) -> Result<Note, StoreError>;

    /// Overwrites title and content of the note with `note.id` and refreshes
    /// `last_mod_date`. `creation_date` is kept from storage.
    async fn replace(&self, note: &Note) -> Result<Note, StoreError>;

    /// Fails with [`StoreError::NotFound`] when no note has this title.
    async fn delete_by_title_exact(&self, title: &str) -> Result<(), StoreError>;

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
