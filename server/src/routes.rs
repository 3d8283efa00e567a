//! Route definitions for the notes server.

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post, put}
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer
};

use crate::handlers;
use crate::openapi;
use crate::state::AppState;

/// Creates the Axum router with all routes configured.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.cors_origins);

    Router::new()
        .route(
            "/note",
            post(handlers::create_note).get(handlers::search_notes)
        )
        .route("/note/content/{title}", get(handlers::get_note_content))
        .route(
            "/note/{title}",
            put(handlers::update_note).delete(handlers::delete_note)
        )
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .route("/api-docs/openapi.json", get(openapi::openapi_json))
        .layer(middleware::from_fn(crate::middleware::log_failures))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allowed_origins(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// A `*` entry opens the API to every origin; `AllowOrigin::list` rejects it.
fn allowed_origins(origins: &[String]) -> AllowOrigin {
    if origins.iter().any(|origin| origin.trim() == "*") {
        tracing::warn!("CORS origin list contains '*'; allowing any origin");
        return AllowOrigin::any();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(%origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    AllowOrigin::list(origins)
}
