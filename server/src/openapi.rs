use axum::Json;
use utoipa::OpenApi;

use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    info(title = "Notes API", description = "Create, search, read, update and delete notes"),
    paths(
        handlers::create_note,
        handlers::search_notes,
        handlers::get_note_content,
        handlers::update_note,
        handlers::delete_note,
        handlers::health
    ),
    components(
        schemas(
            notes_core::NoteDraft,
            notes_core::NoteReadDto,
            notes_core::NoteTitleDto,
            notes_core::ErrorBody,
            handlers::HealthResponse
        )
    ),
    tags(
        (name = "notes", description = "Note lifecycle"),
        (name = "ops", description = "Operational endpoints")
    )
)]
pub struct NotesApiDoc;

/// GET /api-docs/openapi.json
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(NotesApiDoc::openapi())
}
