//! In-process note store.

use async_trait::async_trait;
use chrono::Utc;
use errors::StoreError;
use notes_core::{Note, NoteStore};
use parking_lot::RwLock;
use std::collections::BTreeMap;

const BACKEND: &str = "memory";

#[derive(Debug, Default)]
struct MemoryState {
    next_id: i64,
    notes: BTreeMap<i64, Note>
}

impl MemoryState {
    fn id_for_title(&self, title: &str) -> Option<i64> {
        self.notes
            .values()
            .find(|note| note.title == title)
            .map(|note| note.id)
    }
}

/// Note store kept in memory. Title uniqueness is checked under the write
/// lock, so it holds the same guarantee as a unique index.
#[derive(Debug, Default)]
pub struct InMemoryNoteStore {
    state: RwLock<MemoryState>
}

impl InMemoryNoteStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.state.read().notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().notes.is_empty()
    }
}

#[async_trait]
impl NoteStore for InMemoryNoteStore {
    async fn find_by_title_contains(&self, fragment: &str) -> Result<Vec<Note>, StoreError> {
        let needle = fragment.to_lowercase();
        let state = self.state.read();
        Ok(state
            .notes
            .values()
            .filter(|note| note.title.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn find_by_title_exact(&self, title: &str) -> Result<Option<Note>, StoreError> {
        let state = self.state.read();
        Ok(state.notes.values().find(|note| note.title == title).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Note>, StoreError> {
        Ok(self.state.read().notes.get(&id).cloned())
    }

    async fn insert(&self, title: &str, content: &str) -> Result<Note, StoreError> {
        let mut state = self.state.write();
        if state.id_for_title(title).is_some() {
            return Err(StoreError::duplicate(BACKEND, title));
        }

        state.next_id += 1;
        let now = Utc::now();
        let note = Note {
            id: state.next_id,
            title: title.to_string(),
            content: content.to_string(),
            creation_date: now,
            last_mod_date: now
        };
        state.notes.insert(note.id, note.clone());
        tracing::trace!(id = note.id, "Inserted note");
        Ok(note)
    }

    async fn replace(&self, note: &Note) -> Result<Note, StoreError> {
        let mut state = self.state.write();
        if let Some(owner) = state.id_for_title(&note.title) {
            if owner != note.id {
                return Err(StoreError::duplicate(BACKEND, note.title.clone()));
            }
        }

        let stored = state
            .notes
            .get_mut(&note.id)
            .ok_or_else(|| StoreError::not_found(BACKEND, note.id.to_string()))?;
        stored.title = note.title.clone();
        stored.content = note.content.clone();
        stored.last_mod_date = Utc::now();
        Ok(stored.clone())
    }

    async fn delete_by_title_exact(&self, title: &str) -> Result<(), StoreError> {
        let mut state = self.state.write();
        let id = state
            .id_for_title(title)
            .ok_or_else(|| StoreError::not_found(BACKEND, title))?;
        state.notes.remove(&id);
        Ok(())
    }
}
