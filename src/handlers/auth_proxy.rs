//! # Auth Proxy Handler
//!
//! Forwards `/api/auth/*` verbatim to the external auth service so browser
//! session flows terminate at that service without any local auth logic.
//! Status plus the `set-cookie` and `content-type` response headers are
//! relayed back.

use axum::{
    body::Body,
    extract::{Request, State},
    http::{StatusCode, header},
    response::Response,
};

use crate::error::{ApiError, upstream_error, validation_error};
use crate::server::AppState;

// Request bodies beyond this are rejected before hitting the auth service.
const MAX_PROXY_BODY_BYTES: usize = 1024 * 1024;

pub async fn proxy_auth(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, ApiError> {
    let method = request.method().clone();
    let path_and_query = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_default();
    let target = format!(
        "{}{}",
        state.config.auth_service_url.trim_end_matches('/'),
        path_and_query
    );

    let headers = request.headers().clone();
    let body = axum::body::to_bytes(request.into_body(), MAX_PROXY_BODY_BYTES)
        .await
        .map_err(|_| {
            validation_error(
                "Request body too large",
                serde_json::json!({ "body": "exceeds proxy limit" }),
            )
        })?;

    let mut upstream_request = state.http.request(method, &target).body(body);
    if let Some(content_type) = headers.get(header::CONTENT_TYPE) {
        upstream_request = upstream_request.header(header::CONTENT_TYPE, content_type.clone());
    }
    if let Some(cookie) = headers.get(header::COOKIE) {
        upstream_request = upstream_request.header(header::COOKIE, cookie.clone());
    }

    let upstream = upstream_request.send().await.map_err(|error| {
        tracing::warn!(error = %error, "Auth service unreachable");
        upstream_error("Auth service unreachable")
    })?;

    let status = upstream.status();
    let mut builder = Response::builder().status(status);
    for value in upstream.headers().get_all(header::SET_COOKIE) {
        builder = builder.header(header::SET_COOKIE, value.clone());
    }
    if let Some(content_type) = upstream.headers().get(header::CONTENT_TYPE) {
        builder = builder.header(header::CONTENT_TYPE, content_type.clone());
    }

    let bytes = upstream.bytes().await.map_err(|error| {
        tracing::warn!(error = %error, "Auth service response body unreadable");
        upstream_error("Auth service returned an unreadable response")
    })?;

    builder.body(Body::from(bytes)).map_err(|_| {
        ApiError::new(
            StatusCode::BAD_GATEWAY,
            "UPSTREAM_ERROR",
            "Auth service returned an invalid response",
        )
    })
}
