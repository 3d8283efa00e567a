//! Shared test fixtures for the notes workspace.
//!
//! Provides a single, shared PostgreSQL testcontainer across all test files
//! of a test binary. The fixture is lazily initialized once per process and
//! cleaned up when the process exits. When Docker is unavailable the fixture
//! resolves to `None` and callers skip.

mod fixtures;

pub use fixtures::*;
