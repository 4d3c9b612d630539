//! # API Handlers
//!
//! HTTP endpoint handlers, one module per resource.

pub mod analytics;
pub mod auth_proxy;
pub mod contents;
pub mod geo;
pub mod media;
pub mod navigation;
pub mod seo;
pub mod site_config;
pub mod structured_data;
pub mod types;

use axum::extract::State;
use axum::response::Json;

use crate::error::{ApiError, ErrorType};
use crate::models::ServiceInfo;
use crate::server::AppState;

/// Root handler that returns basic service information
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service information", body = ServiceInfo)
    ),
    tag = "ops"
)]
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo::default())
}

/// Health check backed by a `SELECT 1` against the database
#[utoipa::path(
    get,
    path = "/healthz",
    responses(
        (status = 200, description = "Service is healthy"),
        (status = 503, description = "Database unreachable", body = ApiError)
    ),
    tag = "ops"
)]
pub async fn healthz(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    if let Err(error) = crate::db::health_check(&state.db).await {
        tracing::warn!(error = %error, "Health check failed");
        return Err(ApiError::from(ErrorType::ServiceUnavailable));
    }
    Ok(Json(serde_json::json!({ "status": "ok" })))
}
