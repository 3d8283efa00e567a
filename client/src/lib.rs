//! # Notes Client
//!
//! Talks to the notes server over HTTP and keeps a local mirror of the note
//! list for interactive front-ends.
//!
//! - [`NotesApiClient`]: one method per server endpoint, plus
//!   [`NotesApiClient::get_all_notes`] which hydrates every title into a
//!   full note.
//! - [`NoteBoard`]: the local list, patched only after the server confirms a
//!   change, with a transient success/error banner.

pub mod api;
pub mod board;
pub mod error;

pub use api::NotesApiClient;
pub use board::{BANNER_TTL, Banner, BannerKind, NoteBoard};
pub use error::ClientError;
