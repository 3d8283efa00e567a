//! # Storage Layer
//!
//! `NoteStore` backends:
//! - [`PostgresNoteStore`]: `sqlx` pool over a `notes` table with a unique
//!   index on `title`
//! - [`InMemoryNoteStore`]: process-local map with the same uniqueness rule

pub mod memory;
pub mod postgres;

pub use memory::InMemoryNoteStore;
pub use postgres::PostgresNoteStore;
