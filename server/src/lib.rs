//! # Notes HTTP Server
//!
//! Exposes the note lifecycle service over JSON/HTTP.
//!
//! ## Endpoints
//!
//! - `POST /note` - Create a note
//! - `GET /note?title=` - Titles containing a fragment, case-insensitively
//! - `GET /note/content/{title}` - Full note by exact title
//! - `PUT /note/{title}` - Replace title and content of an existing note
//! - `DELETE /note/{title}` - Delete a note by exact title
//! - `GET /health` - Health check endpoint
//! - `GET /metrics` - Prometheus metrics endpoint
//! - `GET /api-docs/openapi.json` - OpenAPI document
//!
//! Every failure is rendered as the same JSON error body, see
//! [`notes_core::ErrorBody`].

pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod state;
pub mod telemetry;

pub use error::{ApiError, ServerError};
pub use routes::create_router;
pub use server::NotesServer;
pub use state::AppState;
