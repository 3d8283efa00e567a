//! Lifecycle outcomes when the store itself reports conflicts, vanished rows
//! or backend failures that the service pre-checks could not see.

use async_trait::async_trait;
use chrono::Utc;
use errors::{NoteError, StoreError};
use notes::NoteService;
use notes_core::{Note, NoteDraft, NoteStore};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn note(id: i64, title: &str) -> Note {
    let now = Utc::now();
    Note {
        id,
        title: title.to_string(),
        content: "content".to_string(),
        creation_date: now,
        last_mod_date: now
    }
}

/// Lookups always miss, writes always lose the race.
struct RacingStore {
    inserts: AtomicUsize
}

#[async_trait]
impl NoteStore for RacingStore {
    async fn find_by_title_contains(&self, _fragment: &str) -> Result<Vec<Note>, StoreError> {
        Ok(Vec::new())
    }

    async fn find_by_title_exact(&self, _title: &str) -> Result<Option<Note>, StoreError> {
        Ok(None)
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<Note>, StoreError> {
        Ok(None)
    }

    async fn insert(&self, title: &str, _content: &str) -> Result<Note, StoreError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::duplicate("racing", title))
    }

    async fn replace(&self, note: &Note) -> Result<Note, StoreError> {
        Err(StoreError::duplicate("racing", note.title.clone()))
    }

    async fn delete_by_title_exact(&self, title: &str) -> Result<(), StoreError> {
        Err(StoreError::not_found("racing", title))
    }
}

/// Finds every note, then loses it before the write lands.
struct VanishingStore;

#[async_trait]
impl NoteStore for VanishingStore {
    async fn find_by_title_contains(&self, fragment: &str) -> Result<Vec<Note>, StoreError> {
        Ok(vec![note(1, fragment)])
    }

    async fn find_by_title_exact(&self, title: &str) -> Result<Option<Note>, StoreError> {
        Ok(Some(note(1, title)))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Note>, StoreError> {
        Ok(Some(note(id, "any")))
    }

    async fn insert(&self, title: &str, _content: &str) -> Result<Note, StoreError> {
        Ok(note(1, title))
    }

    async fn replace(&self, note: &Note) -> Result<Note, StoreError> {
        Err(StoreError::not_found("vanishing", note.id.to_string()))
    }

    async fn delete_by_title_exact(&self, title: &str) -> Result<(), StoreError> {
        Err(StoreError::not_found("vanishing", title))
    }
}

/// Backend is down.
struct BrokenStore;

#[async_trait]
impl NoteStore for BrokenStore {
    async fn find_by_title_contains(&self, _fragment: &str) -> Result<Vec<Note>, StoreError> {
        Err(StoreError::connection("broken", "connection refused"))
    }

    async fn find_by_title_exact(&self, _title: &str) -> Result<Option<Note>, StoreError> {
        Err(StoreError::connection("broken", "connection refused"))
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<Note>, StoreError> {
        Err(StoreError::connection("broken", "connection refused"))
    }

    async fn insert(&self, _title: &str, _content: &str) -> Result<Note, StoreError> {
        Err(StoreError::connection("broken", "connection refused"))
    }

    async fn replace(&self, _note: &Note) -> Result<Note, StoreError> {
        Err(StoreError::connection("broken", "connection refused"))
    }

    async fn delete_by_title_exact(&self, _title: &str) -> Result<(), StoreError> {
        Err(StoreError::connection("broken", "connection refused"))
    }
}

#[tokio::test]
async fn test_duplicate_from_store_on_create_is_conflict() {
    let store = Arc::new(RacingStore {
        inserts: AtomicUsize::new(0)
    });
    let service = NoteService::new(store.clone());

    let err = service
        .create_note(NoteDraft::new("Shopping List", "Milk"))
        .await
        .unwrap_err();

    assert!(matches!(err, NoteError::Conflict { ref title } if title == "Shopping List"));
    assert_eq!(store.inserts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_replace_of_vanished_note_is_not_found_by_old_title() {
    let service = NoteService::new(Arc::new(VanishingStore));

    let err = service
        .update_note(NoteDraft::new("Old", "new content"), "Old")
        .await
        .unwrap_err();

    assert!(matches!(err, NoteError::NotFound { ref title } if title == "Old"));
}

#[tokio::test]
async fn test_delete_of_vanished_note_is_not_found() {
    let service = NoteService::new(Arc::new(VanishingStore));
    let err = service.delete_note("Groceries").await.unwrap_err();
    assert!(matches!(err, NoteError::NotFound { .. }));
}

#[tokio::test]
async fn test_backend_failures_surface_as_storage_errors() {
    let service = NoteService::new(Arc::new(BrokenStore));

    let err = service.search_title_list("").await.unwrap_err();
    assert!(matches!(err, NoteError::Storage(StoreError::ConnectionError { .. })));

    let err = service
        .create_note(NoteDraft::new("t", "c"))
        .await
        .unwrap_err();
    assert!(matches!(err, NoteError::Storage(_)));

    let err = service.get_note_content("t").await.unwrap_err();
    assert!(matches!(err, NoteError::Storage(_)));
}

#[tokio::test]
async fn test_validation_runs_before_store_access() {
    let service = NoteService::new(Arc::new(BrokenStore));
    let err = service.get_note_content("").await.unwrap_err();
    assert!(matches!(err, NoteError::Validation(_)));
}
