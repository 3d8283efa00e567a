//! Request-level failure logging.

use axum::{
    body::Body,
    extract::Request,
    http::header,
    middleware::Next,
    response::Response
};
use chrono::Utc;

use crate::error::ErrorContext;
use crate::telemetry::Telemetry;

/// Logs every failed request with method, path, status and timestamp.
///
/// Server errors also carry the internal error chain recorded by
/// [`ErrorContext`]; client errors are logged at `info`. Error bodies built
/// by the API get the request path filled in.
pub async fn log_failures(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let status = response.status();
    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }

    Telemetry::record_failed_request(status.as_u16());
    let timestamp = Utc::now().to_rfc3339();
    let context = response.extensions().get::<ErrorContext>().cloned();
    let code = context.as_ref().map_or("", |c| c.code.as_str());

    if status.is_server_error() {
        let chain = context.as_ref().map_or("", |c| c.chain.as_str());
        tracing::error!(
            %method,
            %path,
            status = status.as_u16(),
            %timestamp,
            code,
            error = chain,
            "Request failed"
        );
    } else {
        tracing::info!(
            %method,
            %path,
            status = status.as_u16(),
            %timestamp,
            code,
            "Request rejected"
        );
    }

    match context {
        Some(context) => with_request_path(response, context, path),
        None => response
    }
}

fn with_request_path(response: Response, context: ErrorContext, path: String) -> Response {
    let mut body = context.body;
    body.path = path;
    let bytes = match serde_json::to_vec(&body) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to re-encode error body");
            return response;
        }
    };

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(bytes))
}
