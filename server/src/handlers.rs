//! HTTP request handlers for the notes server.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse
};
use notes_core::{ErrorBody, NoteDraft, NoteReadDto, NoteTitleDto};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::Result;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::AppState;
use crate::telemetry::Telemetry;

/// Query string of the title search.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Case-insensitive title fragment; empty or omitted matches every note
    #[serde(default)]
    pub title: String
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub storage: String
}

/// POST /note
#[utoipa::path(
    post,
    path = "/note",
    request_body = NoteDraft,
    responses(
        (status = 201, description = "Note created", body = NoteReadDto),
        (status = 400, description = "Invalid title or content", body = ErrorBody),
        (status = 409, description = "Title already taken", body = ErrorBody)
    ),
    tag = "notes"
)]
pub async fn create_note(
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<NoteDraft>
) -> Result<(StatusCode, Json<NoteReadDto>)> {
    let result = state.service.create_note(draft).await;
    Telemetry::record("create", &result);

    Ok((StatusCode::CREATED, Json(NoteReadDto::from(result?))))
}

/// GET /note?title=
#[utoipa::path(
    get,
    path = "/note",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching titles, possibly none", body = Vec<NoteTitleDto>),
        (status = 400, description = "Fragment too long", body = ErrorBody)
    ),
    tag = "notes"
)]
pub async fn search_notes(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SearchQuery>
) -> Result<Json<Vec<NoteTitleDto>>> {
    let result = state.service.search_title_list(&query.title).await;
    Telemetry::record("search", &result);

    let titles = result?.iter().map(NoteTitleDto::from).collect();
    Ok(Json(titles))
}

/// GET /note/content/{title}
#[utoipa::path(
    get,
    path = "/note/content/{title}",
    params(("title" = String, Path, description = "Exact note title")),
    responses(
        (status = 200, description = "Note found", body = NoteReadDto),
        (status = 400, description = "Invalid title", body = ErrorBody),
        (status = 404, description = "No note with this title", body = ErrorBody)
    ),
    tag = "notes"
)]
pub async fn get_note_content(
    State(state): State<AppState>,
    ApiPath(title): ApiPath<String>
) -> Result<Json<NoteReadDto>> {
    let result = state.service.get_note_content(&title).await;
    Telemetry::record("get", &result);

    Ok(Json(NoteReadDto::from(result?)))
}

/// PUT /note/{title}
///
/// `title` in the path is the note's current title; the body carries the new
/// title and content.
#[utoipa::path(
    put,
    path = "/note/{title}",
    params(("title" = String, Path, description = "Current note title")),
    request_body = NoteDraft,
    responses(
        (status = 200, description = "Note updated", body = NoteReadDto),
        (status = 400, description = "Invalid title or content", body = ErrorBody),
        (status = 404, description = "No note with this title", body = ErrorBody),
        (status = 409, description = "New title taken by another note", body = ErrorBody)
    ),
    tag = "notes"
)]
pub async fn update_note(
    State(state): State<AppState>,
    ApiPath(old_title): ApiPath<String>,
    ApiJson(draft): ApiJson<NoteDraft>
) -> Result<Json<NoteReadDto>> {
    let result = state.service.update_note(draft, &old_title).await;
    Telemetry::record("update", &result);

    Ok(Json(NoteReadDto::from(result?)))
}

/// DELETE /note/{title}
#[utoipa::path(
    delete,
    path = "/note/{title}",
    params(("title" = String, Path, description = "Exact note title")),
    responses(
        (status = 200, description = "Note deleted"),
        (status = 400, description = "Invalid title", body = ErrorBody),
        (status = 404, description = "No note with this title", body = ErrorBody)
    ),
    tag = "notes"
)]
pub async fn delete_note(
    State(state): State<AppState>,
    ApiPath(title): ApiPath<String>
) -> Result<StatusCode> {
    let result = state.service.delete_note(&title).await;
    Telemetry::record("delete", &result);

    result?;
    Ok(StatusCode::OK)
}

/// Health check endpoint.
///
/// Returns 200 if the note store answers, 503 otherwise.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Store reachable", body = HealthResponse),
        (status = 503, description = "Store unreachable", body = HealthResponse)
    ),
    tag = "ops"
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match state.service.store().health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy".to_string(),
                storage: "connected".to_string()
            })
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Store health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unhealthy".to_string(),
                    storage: "disconnected".to_string()
                })
            )
        }
    }
}

/// Prometheus metrics endpoint.
///
/// 404 when no recorder is installed.
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render()
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response()
    }
}
