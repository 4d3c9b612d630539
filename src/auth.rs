//! # Session Authentication
//!
//! Auth is owned by an external service. The middleware here forwards the
//! incoming `Cookie` header to that service's session endpoint and admits
//! the request only when it answers 200 with a user object. Everything
//! else, including a network failure, fails closed to 401.

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::{header::COOKIE, request::Parts},
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::error::{ApiError, unauthorized};
use crate::server::AppState;

/// Authenticated user attached to request extensions by [`require_session`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
}

/// Shape of the auth service's get-session response. Extra fields (session
/// token, expiry) are ignored.
#[derive(Debug, Deserialize)]
struct SessionResponse {
    user: Option<CurrentUser>,
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        Arc::clone(&app_state.config)
    }
}

/// Middleware that guards mutating routes behind a session check.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(cookie) = request.headers().get(COOKIE).cloned() else {
        return Err(unauthorized(Some("Session cookie required")));
    };

    let url = format!(
        "{}/api/auth/get-session",
        state.config.auth_service_url.trim_end_matches('/')
    );

    let user = match state.http.get(&url).header(COOKIE, cookie).send().await {
        Ok(response) if response.status() == reqwest::StatusCode::OK => {
            match response.json::<SessionResponse>().await {
                Ok(body) => body.user,
                Err(error) => {
                    tracing::warn!(error = %error, "Unparseable session response from auth service");
                    None
                }
            }
        }
        Ok(response) => {
            tracing::debug!(status = %response.status(), "Session check rejected");
            None
        }
        Err(error) => {
            // Fail closed: an unreachable auth service must not open writes.
            tracing::warn!(error = %error, "Auth service unreachable during session check");
            None
        }
    };

    let Some(user) = user else {
        return Err(unauthorized(Some("Valid session required")));
    };

    tracing::debug!(user_id = %user.id, "Authenticated session request");
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| unauthorized(Some("Session required")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::post,
    };
    use tower::ServiceExt;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::storage::{LocalStore, MediaStorage};

    fn test_state(auth_service_url: &str, upload_dir: &std::path::Path) -> AppState {
        let config = Arc::new(AppConfig {
            auth_service_url: auth_service_url.to_string(),
            ..Default::default()
        });
        let storage = Arc::new(MediaStorage::new(
            None,
            Arc::new(LocalStore::new(upload_dir, "/uploads")),
        ));

        AppState {
            db: sea_orm::DatabaseConnection::default(),
            config,
            http: reqwest::Client::new(),
            storage,
        }
    }

    async fn run_guarded(state: AppState, request: Request<Body>) -> Response {
        async fn handler() -> &'static str {
            "OK"
        }

        Router::new()
            .route("/test", post(handler))
            .route_layer(axum::middleware::from_fn_with_state(
                state.clone(),
                require_session,
            ))
            .with_state(state)
            .oneshot(request)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn missing_cookie_returns_401() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state("http://localhost:9", dir.path());

        let request = Request::builder()
            .method("POST")
            .uri("/test")
            .body(Body::empty())
            .unwrap();

        let response = run_guarded(state, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn valid_session_passes_through() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/get-session"))
            .and(header("cookie", "session=abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "user": { "id": "user-1", "email": "admin@example.com", "name": "Admin" }
            })))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&server.uri(), dir.path());

        let request = Request::builder()
            .method("POST")
            .uri("/test")
            .header("Cookie", "session=abc123")
            .body(Body::empty())
            .unwrap();

        let response = run_guarded(state, request).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn session_without_user_returns_401() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/get-session"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "user": null })),
            )
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&server.uri(), dir.path());

        let request = Request::builder()
            .method("POST")
            .uri("/test")
            .header("Cookie", "session=expired")
            .body(Body::empty())
            .unwrap();

        let response = run_guarded(state, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn auth_service_error_fails_closed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/get-session"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&server.uri(), dir.path());

        let request = Request::builder()
            .method("POST")
            .uri("/test")
            .header("Cookie", "session=abc123")
            .body(Body::empty())
            .unwrap();

        let response = run_guarded(state, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn unreachable_auth_service_fails_closed() {
        let dir = tempfile::tempdir().unwrap();
        // Nothing listens on this port.
        let state = test_state("http://127.0.0.1:1", dir.path());

        let request = Request::builder()
            .method("POST")
            .uri("/test")
            .header("Cookie", "session=abc123")
            .body(Body::empty())
            .unwrap();

        let response = run_guarded(state, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
