//! # Note Lifecycle
//!
//! [`NoteService`] is the business-rule layer of the notes system. It turns
//! absent and duplicate records into typed [`NoteError`] outcomes so the
//! transport layer can pick a status code without inspecting storage errors.
//!
//! ## State model
//!
//! ```text
//! nonexistent ──create──► existing ──update──► existing
//!                             │
//!                             └──delete──► nonexistent (terminal for that id)
//! ```
//!
//! Re-creating a deleted title yields a new, unrelated identity.

pub mod service;

pub use errors::NoteError;
pub use service::NoteService;
