use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header}
};
use errors::StoreError;
use notes_core::{ErrorBody, Note, NoteStore};
use notes_server::{AppState, create_router};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    create_router(AppState::in_memory())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap()
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

fn json_of(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

fn error_of(bytes: &[u8]) -> ErrorBody {
    serde_json::from_slice(bytes).unwrap()
}

#[tokio::test]
async fn test_create_returns_public_fields_only() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/note",
        Some(json!({"title": "Groceries", "content": "Milk"}))
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json_of(&body), json!({"title": "Groceries", "content": "Milk"}));
}

#[tokio::test]
async fn test_create_rejects_invalid_fields() {
    let app = app();

    let long_title = "t".repeat(81);
    let (status, body) = send(
        &app,
        "POST",
        "/note",
        Some(json!({"title": long_title, "content": "x"}))
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = error_of(&body);
    assert_eq!(error.code, "VALIDATION_ERROR");
    assert!(error.details.unwrap().get("title").is_some());

    let (status, _) = send(
        &app,
        "POST",
        "/note",
        Some(json!({"title": "ok", "content": "c".repeat(481)}))
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "GET", "/note", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&body), json!([]));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = app();

    let request = Request::builder()
        .method("POST")
        .uri("/note")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"title\": "))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let error = error_of(&bytes);
    assert_eq!(error.status_code, 400);
    assert_eq!(error.code, "BAD_REQUEST");

    let (status, body) = send(&app, "POST", "/note", Some(json!({"title": "only"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_of(&body).code, "BAD_REQUEST");
}

#[tokio::test]
async fn test_search_is_case_insensitive_substring() {
    let app = app();
    for title in ["Groceries", "Work todo", "grocery budget"] {
        let (status, _) = send(
            &app,
            "POST",
            "/note",
            Some(json!({"title": title, "content": "x"}))
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, "GET", "/note?title=GROCER", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json_of(&body),
        json!([{"title": "Groceries"}, {"title": "grocery budget"}])
    );

    let (_, body) = send(&app, "GET", "/note?title=", None).await;
    assert_eq!(json_of(&body).as_array().unwrap().len(), 3);

    let (status, body) = send(&app, "GET", "/note?title=nothing", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&body), json!([]));
}

#[tokio::test]
async fn test_search_fragment_too_long() {
    let app = app();
    let uri = format!("/note?title={}", "a".repeat(81));

    let (status, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_of(&body).code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_nul_in_title_or_fragment_is_validation_error() {
    let app = app();

    let (status, body) = send(&app, "GET", "/note?title=%00", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_of(&body).code, "VALIDATION_ERROR");

    let (status, body) = send(
        &app,
        "POST",
        "/note",
        Some(json!({"title": "a\0b", "content": "Milk"}))
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_of(&body).code, "VALIDATION_ERROR");

    let (status, _) = send(&app, "GET", "/note/content/a%00b", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_error_body_reports_request_path() {
    let app = app();

    let (status, body) = send(&app, "GET", "/note/content/Missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_of(&body).path, "/note/content/Missing");

    let request = Request::builder()
        .method("POST")
        .uri("/note")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(error_of(&bytes).path, "/note");
}

#[tokio::test]
async fn test_titles_with_spaces_and_symbols_round_trip_in_path() {
    let app = app();
    let (status, _) = send(
        &app,
        "POST",
        "/note",
        Some(json!({"title": "Q&A / 50%", "content": "x"}))
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "GET", "/note/content/Q%26A%20%2F%2050%25", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&body)["title"], "Q&A / 50%");
}

#[tokio::test]
async fn test_update_conflict_and_not_found() {
    let app = app();
    for title in ["a", "b"] {
        send(
            &app,
            "POST",
            "/note",
            Some(json!({"title": title, "content": "x"}))
        )
        .await;
    }

    let (status, body) = send(
        &app,
        "PUT",
        "/note/a",
        Some(json!({"title": "b", "content": "y"}))
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_of(&body).code, "CONFLICT");

    let (status, body) = send(
        &app,
        "PUT",
        "/note/missing",
        Some(json!({"title": "c", "content": "y"}))
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        error_of(&body).details,
        Some(json!({"title": "missing"}))
    );

    let (status, body) = send(
        &app,
        "PUT",
        "/note/a",
        Some(json!({"title": "a", "content": "same title, new body"}))
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&body)["content"], "same title, new body");
}

#[tokio::test]
async fn test_delete_returns_empty_body() {
    let app = app();
    send(
        &app,
        "POST",
        "/note",
        Some(json!({"title": "gone", "content": "x"}))
    )
    .await;

    let (status, body) = send(&app, "DELETE", "/note/gone", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());

    let (status, _) = send(&app, "DELETE", "/note/gone", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = app();

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json_of(&body),
        json!({"status": "healthy", "storage": "connected"})
    );
}

#[tokio::test]
async fn test_metrics_absent_without_recorder() {
    let app = app();

    let (status, _) = send(&app, "GET", "/metrics", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_openapi_document_served() {
    let app = app();

    let (status, body) = send(&app, "GET", "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    let doc = json_of(&body);
    assert!(doc["paths"]["/note"]["post"].is_object());
    assert!(doc["paths"]["/note/content/{title}"]["get"].is_object());
}

#[tokio::test]
async fn test_cors_preflight_allows_configured_origin() {
    let app = app();

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/note")
        .header(header::ORIGIN, "http://localhost:3001")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://localhost:3001"
    );

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/note")
        .header(header::ORIGIN, "http://evil.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}

#[tokio::test]
async fn test_wildcard_cors_origin_allows_any_origin() {
    let mut config = config::NotesConfig::default();
    config.server.cors_origins.push("*".to_string());
    let app = create_router(AppState::with_store(
        Arc::new(storage::InMemoryNoteStore::new()),
        config,
        None
    ));

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/note")
        .header(header::ORIGIN, "http://anywhere.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}

struct DownStore;

#[async_trait]
impl NoteStore for DownStore {
    async fn find_by_title_contains(&self, _fragment: &str) -> Result<Vec<Note>, StoreError> {
        Err(StoreError::connection("postgres", "connection refused"))
    }

    async fn find_by_title_exact(&self, _title: &str) -> Result<Option<Note>, StoreError> {
        Err(StoreError::connection("postgres", "connection refused"))
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<Note>, StoreError> {
        Err(StoreError::connection("postgres", "connection refused"))
    }

    async fn insert(&self, _title: &str, _content: &str) -> Result<Note, StoreError> {
        Err(StoreError::connection("postgres", "connection refused"))
    }

    async fn replace(&self, _note: &Note) -> Result<Note, StoreError> {
        Err(StoreError::connection("postgres", "connection refused"))
    }

    async fn delete_by_title_exact(&self, _title: &str) -> Result<(), StoreError> {
        Err(StoreError::connection("postgres", "connection refused"))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Err(StoreError::connection("postgres", "connection refused"))
    }
}

fn down_app() -> Router {
    create_router(AppState::with_store(
        Arc::new(DownStore),
        config::NotesConfig::default(),
        None
    ))
}

#[tokio::test]
async fn test_store_outage_is_generic_500() {
    let app = down_app();

    let (status, body) = send(&app, "GET", "/note/content/anything", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let error = error_of(&body);
    assert_eq!(error.code, "INTERNAL_ERROR");
    assert_eq!(error.message, "An internal error occurred");
    assert!(!String::from_utf8_lossy(&body).contains("refused"));
}

#[tokio::test]
async fn test_health_reports_unavailable_store() {
    let app = down_app();

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json_of(&body)["status"], "unhealthy");
}
