//! # Notes Core
//!
//! Shared types and traits for the notes service.
//!
//! This crate provides:
//! - The [`Note`] record and the caller-supplied [`NoteDraft`]
//! - Field rules for titles, contents and search fragments
//! - Public wire shapes ([`NoteReadDto`], [`NoteTitleDto`], [`ErrorBody`])
//! - The [`NoteStore`] persistence contract

pub mod dto;
pub mod traits;
pub mod types;

pub use dto::{ErrorBody, NoteReadDto, NoteTitleDto};
pub use traits::NoteStore;
pub use types::{
    MAX_CONTENT_LEN, MAX_TITLE_LEN, Note, NoteDraft, validate_search_fragment, validate_title
};
