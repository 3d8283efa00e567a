//! Local mirror of the note list.
//!
//! The board only patches its list after the server has confirmed a change,
//! so a failed request never leaves a phantom or missing entry behind.

use notes_core::{NoteDraft, NoteReadDto};
use std::time::Duration;
use tokio::time::Instant;

use crate::api::NotesApiClient;
use crate::error::{ClientError, Result};

/// How long a banner stays visible.
pub const BANNER_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error
}

#[derive(Debug, Clone)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
    shown_at: Instant
}

impl Banner {
    fn new(kind: BannerKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            shown_at: Instant::now()
        }
    }

    pub fn is_expired(&self) -> bool {
        self.shown_at.elapsed() >= BANNER_TTL
    }
}

pub struct NoteBoard {
    api: NotesApiClient,
    notes: Vec<NoteReadDto>,
    banner: Option<Banner>
}

impl NoteBoard {
    pub fn new(api: NotesApiClient) -> Self {
        Self {
            api,
            notes: Vec::new(),
            banner: None
        }
    }

    pub fn notes(&self) -> &[NoteReadDto] {
        &self.notes
    }

    /// The current banner, unless it has outlived [`BANNER_TTL`].
    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref().filter(|b| !b.is_expired())
    }

    /// Drops the banner once it has expired.
    pub fn clear_expired_banner(&mut self) {
        if self.banner.as_ref().is_some_and(Banner::is_expired) {
            self.banner = None;
        }
    }

    fn succeed(&mut self, message: &str) {
        self.banner = Some(Banner::new(BannerKind::Success, message));
    }

    fn fail(&mut self, err: &ClientError) {
        self.banner = Some(Banner::new(BannerKind::Error, err.user_message()));
    }

    /// Replaces the list with every note on the server.
    ///
    /// On failure the list is emptied.
    pub async fn refresh(&mut self) -> Result<()> {
        match self.api.get_all_notes().await {
            Ok(notes) => {
                self.notes = notes;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load notes");
                self.notes.clear();
                self.fail(&e);
                Err(e)
            }
        }
    }

    /// Shows only notes whose title contains `term`. A blank term shows
    /// everything.
    pub async fn search(&mut self, term: &str) -> Result<()> {
        let term = term.trim();
        if term.is_empty() {
            return self.refresh().await;
        }

        match self.api.get_notes_matching(term).await {
            Ok(notes) => {
                self.notes = notes;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, %term, "Search failed");
                self.fail(&e);
                Err(e)
            }
        }
    }

    /// Fetches the full note for display.
    pub async fn view(&mut self, title: &str) -> Result<NoteReadDto> {
        let result = self.api.get_note_content(title).await;
        if let Err(e) = &result {
            self.fail(e);
        }
        result
    }

    pub async fn create(&mut self, title: &str, content: &str) -> Result<NoteReadDto> {
        let draft = self.draft(title, content)?;

        match self.api.create_note(&draft).await {
            Ok(note) => {
                self.notes.push(note.clone());
                self.succeed("Note created.");
                Ok(note)
            }
            Err(e) => {
                self.fail(&e);
                Err(e)
            }
        }
    }

    /// Replaces the note currently titled `old_title`.
    pub async fn update(
        &mut self,
        old_title: &str,
        title: &str,
        content: &str
    ) -> Result<NoteReadDto> {
        let draft = self.draft(title, content)?;

        match self.api.update_note(old_title, &draft).await {
            Ok(note) => {
                for entry in &mut self.notes {
                    if entry.title == old_title {
                        *entry = note.clone();
                    }
                }
                self.succeed("Note updated.");
                Ok(note)
            }
            Err(e) => {
                self.fail(&e);
                Err(e)
            }
        }
    }

    pub async fn delete(&mut self, title: &str) -> Result<()> {
        match self.api.delete_note(title).await {
            Ok(()) => {
                self.notes.retain(|note| note.title != title);
                self.succeed("Note deleted.");
                Ok(())
            }
            Err(e) => {
                self.fail(&e);
                Err(e)
            }
        }
    }

    /// Trims both fields and rejects blanks without touching the network.
    fn draft(&mut self, title: &str, content: &str) -> Result<NoteDraft> {
        let (title, content) = (title.trim(), content.trim());
        if title.is_empty() || content.is_empty() {
            let err = ClientError::blank_input();
            self.fail(&err);
            return Err(err);
        }
        Ok(NoteDraft::new(title, content))
    }
}
