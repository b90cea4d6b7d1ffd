//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

/// The number of characters of a body that are logged at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// The method, URI and body of each request are logged at the `info` level,
/// as is the status of each response. Bodies longer than
/// [LOG_BODY_LENGTH_LIMIT] characters are truncated, the full body is logged
/// at the `debug` level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_bytes = match read_body(body).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("Could not read body of {} {}: {error}", parts.method, parts.uri);
            return (StatusCode::BAD_REQUEST, "Could not read request body").into_response();
        }
    };

    log_body(
        &format!("Received request: {} {}", parts.method, parts.uri),
        &String::from_utf8_lossy(&body_bytes),
    );

    let response = next.run(Request::from_parts(parts, body_bytes.into())).await;

    let (parts, body) = response.into_parts();
    let body_bytes = match read_body(body).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("Could not read response body: {error}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    tracing::info!("Sending response: {}", parts.status);
    tracing::debug!(
        "Response body: {}",
        truncate(&String::from_utf8_lossy(&body_bytes))
    );

    Response::from_parts(parts, body_bytes.into())
}

async fn read_body(body: Body) -> Result<Bytes, axum::Error> {
    axum::body::to_bytes(body, usize::MAX).await
}

fn truncate(text: &str) -> String {
    match text.char_indices().nth(LOG_BODY_LENGTH_LIMIT) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_owned(),
    }
}

fn log_body(message: &str, body: &str) {
    if body.is_empty() {
        tracing::info!("{message}");
        return;
    }

    if body.chars().count() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!("{message}\nbody: {}", truncate(body));
        tracing::debug!("Full request body: {body:?}");
    } else {
        tracing::info!("{message}\nbody: {body:?}");
    }
}
