//! Application state for the notes server.

use config::{NotesConfig, StorageBackend};
use metrics_exporter_prometheus::PrometheusHandle;
use notes::NoteService;
use notes_core::NoteStore;
use std::sync::Arc;
use storage::{InMemoryNoteStore, PostgresNoteStore};

use crate::error::ServerError;

/// Shared application state for Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: NoteService,
    pub config: Arc<NotesConfig>,
    /// Present when a Prometheus recorder is installed.
    pub metrics: Option<PrometheusHandle>
}

impl AppState {
    /// Builds the configured note store and wraps it in a service.
    ///
    /// For PostgreSQL the schema is created if missing.
    pub async fn new(
        config: NotesConfig,
        metrics: Option<PrometheusHandle>
    ) -> Result<Self, ServerError> {
        let store: Arc<dyn NoteStore> = match config.storage.backend {
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory note store; notes are lost on shutdown");
                Arc::new(InMemoryNoteStore::new())
            }
            StorageBackend::Postgres => {
                let store = PostgresNoteStore::connect(
                    &config.postgres.connection_url(),
                    config.postgres.pool_size,
                    config.postgres.timeout_seconds
                )
                .await?;
                store.initialize_schema().await?;
                tracing::info!(
                    host = %config.postgres.host,
                    database = %config.postgres.database,
                    "Connected to PostgreSQL note store"
                );
                Arc::new(store)
            }
        };

        Ok(Self::with_store(store, config, metrics))
    }

    /// Creates application state around an existing store (useful for
    /// testing).
    #[must_use]
    pub fn with_store(
        store: Arc<dyn NoteStore>,
        config: NotesConfig,
        metrics: Option<PrometheusHandle>
    ) -> Self {
        Self {
            service: NoteService::new(store),
            config: Arc::new(config),
            metrics
        }
    }

    /// In-memory state with default configuration and no metrics.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::with_store(
            Arc::new(InMemoryNoteStore::new()),
            NotesConfig::default(),
            None
        )
    }
}
