//! Request middleware: session extraction and request correlation.

use crate::state::CurrentSession;
use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use repairshop_auth::{ProxyHeaderSession, AUTH_EMAIL_HEADER, AUTH_GROUPS_HEADER};
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

/// Response header echoing the per-request correlation id.
pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

/// Turn the trusted proxy headers into a [`CurrentSession`] extension.
pub async fn session_middleware(mut request: Request, next: Next) -> Response {
    let headers = request.headers();
    let email = headers
        .get(AUTH_EMAIL_HEADER)
        .and_then(|value| value.to_str().ok());
    let groups = headers
        .get(AUTH_GROUPS_HEADER)
        .and_then(|value| value.to_str().ok());
    let session = ProxyHeaderSession::from_headers(email, groups);
    request
        .extensions_mut()
        .insert(CurrentSession(Arc::new(session)));
    next.run(request).await
}

/// Tag every request with a correlation id, carried through the
/// tracing span and echoed in the response headers.
pub async fn correlation_id_middleware(request: Request, next: Next) -> Response {
    let id = Uuid::new_v4();
    let span = tracing::info_span!(
        "request",
        correlation_id = %id,
        method = %request.method(),
        path = %request.uri().path(),
    );
    let mut response = next.run(request).instrument(span).await;
    if let Ok(value) = HeaderValue::from_str(&id.to_string()) {
        response.headers_mut().insert(CORRELATION_ID_HEADER, value);
    }
    response
}
