//! Server setup and lifecycle for the notes server.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::future::Future;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tokio::signal;

use crate::error::ServerError;
use crate::routes::create_router;
use crate::state::AppState;

/// The notes HTTP server.
pub struct NotesServer {
    state: AppState
}

impl NotesServer {
    /// Creates a new server instance with the given configuration.
    pub async fn new(
        config: config::NotesConfig,
        metrics: Option<PrometheusHandle>
    ) -> Result<Self, ServerError> {
        let state = AppState::new(config, metrics).await?;
        Ok(Self { state })
    }

    /// Creates a server instance from an existing `AppState`.
    #[must_use]
    pub fn with_state(state: AppState) -> Self {
        Self { state }
    }

    /// Binds the configured address and serves until Ctrl+C or SIGTERM.
    pub async fn run(self) -> Result<(), ServerError> {
        let addr: SocketAddr = self
            .state
            .config
            .server
            .bind_address()
            .parse()
            .map_err(|e| ServerError::Server(format!("Invalid address: {e}")))?;

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| ServerError::Server(format!("Failed to bind to {addr}: {e}")))?;

        self.serve(listener, shutdown_signal()).await
    }

    /// Serves on an already bound listener until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static
    {
        let addr = listener
            .local_addr()
            .map_err(|e| ServerError::Server(format!("Listener has no address: {e}")))?;
        let router = create_router(self.state);

        tracing::info!(%addr, "Notes server starting");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| ServerError::Server(format!("Server error: {e}")))?;

        tracing::info!("Notes server stopped");
        Ok(())
    }

    /// Returns a reference to the application state.
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// Signal handler for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        },
        () = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        },
    }
}

/// Installs the global Prometheus recorder when metrics are enabled.
fn install_metrics(enabled: bool) -> Result<Option<PrometheusHandle>, ServerError> {
    if !enabled {
        return Ok(None);
    }
    PrometheusBuilder::new()
        .install_recorder()
        .map(Some)
        .map_err(|e| ServerError::Metrics(e.to_string()))
}

/// Entry point for running the server from a config file and environment.
///
/// The file path is taken from `NOTES_CONFIG`; without it defaults apply.
/// Environment overrides always win.
pub async fn run_from_env() -> Result<(), ServerError> {
    let path = std::env::var("NOTES_CONFIG").ok().map(PathBuf::from);
    let config = config::load(path.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(&config.observability.logging_level)
            })
        )
        .init();

    let metrics = install_metrics(config.observability.metrics_enabled)?;
    let server = NotesServer::new(config, metrics).await?;
    server.run().await
}
