//! Note lifecycle operations.

use errors::NoteError;
use notes_core::{Note, NoteDraft, NoteStore, validate_search_fragment, validate_title};
use std::sync::Arc;
use validator::Validate;

/// Enforces title uniqueness on create and existence on read, update and
/// delete.
///
/// The store is injected at construction time. Uniqueness is checked here
/// first for a friendly [`NoteError::Conflict`], but the store's own unique
/// constraint stays authoritative: a duplicate reported by the store on a
/// racing insert or replace folds into the same outcome.
#[derive(Clone)]
pub struct NoteService {
    store: Arc<dyn NoteStore>
}

impl NoteService {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn NoteStore> {
        &self.store
    }

    /// Creates a note. Fails with `Conflict` if the title is taken.
    #[tracing::instrument(skip(self, draft), fields(title = %draft.title))]
    pub async fn create_note(&self, draft: NoteDraft) -> Result<Note, NoteError> {
        draft.validate()?;

        if self.store.find_by_title_exact(&draft.title).await?.is_some() {
            tracing::info!("Rejected create: title already exists");
            return Err(NoteError::conflict(draft.title));
        }

        let note = self.store.insert(&draft.title, &draft.content).await?;
        tracing::info!(id = note.id, "Note created");
        Ok(note)
    }

    /// Notes whose title contains `fragment`, case-insensitively. An empty
    /// result is not an error.
    #[tracing::instrument(skip(self))]
    pub async fn search_title_list(&self, fragment: &str) -> Result<Vec<Note>, NoteError> {
        validate_search_fragment(fragment)?;

        let notes = self.store.find_by_title_contains(fragment).await?;
        tracing::debug!(hits = notes.len(), "Title search finished");
        Ok(notes)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_note_content(&self, title: &str) -> Result<Note, NoteError> {
        validate_title(title)?;

        self.store
            .find_by_title_exact(title)
            .await?
            .ok_or_else(|| NoteError::not_found(title))
    }

    /// Replaces title and content of the note currently titled `old_title`.
    /// The id and creation date are kept.
    #[tracing::instrument(skip(self, draft), fields(new_title = %draft.title))]
    pub async fn update_note(&self, draft: NoteDraft, old_title: &str) -> Result<Note, NoteError> {
        validate_title(old_title)?;
        draft.validate()?;

        let mut note = self
            .store
            .find_by_title_exact(old_title)
            .await?
            .ok_or_else(|| NoteError::not_found(old_title))?;

        if draft.title != old_title {
            if let Some(other) = self.store.find_by_title_exact(&draft.title).await? {
                if other.id != note.id {
                    tracing::info!("Rejected update: new title already exists");
                    return Err(NoteError::conflict(draft.title));
                }
            }
        }

        note.title = draft.title;
        note.content = draft.content;

        let updated = self.store.replace(&note).await.map_err(|err| match err {
            errors::StoreError::NotFound { .. } => NoteError::not_found(old_title),
            other => other.into()
        })?;
        tracing::info!(id = updated.id, "Note updated");
        Ok(updated)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_note(&self, title: &str) -> Result<(), NoteError> {
        validate_title(title)?;

        if self.store.find_by_title_exact(title).await?.is_none() {
            return Err(NoteError::not_found(title));
        }

        self.store.delete_by_title_exact(title).await?;
        tracing::info!("Note deleted");
        Ok(())
    }
}
