//! # Analytics API Handlers
//!
//! Analytics configs, site verifications, custom scripts and feature flags.
//! Reads are public; mutations sit behind the session guard.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::types::double_option;
use crate::error::{ApiError, not_found};
use crate::models::enums::{AnalyticsPlatform, Environment, ScriptPosition, VerificationPlatform};
use crate::models::{analytics_config, custom_script, feature_flag, site_verification};
use crate::repositories::analytics::{AnalyticsConfigChanges, NewAnalyticsConfig};
use crate::repositories::flags::{FeatureFlagChanges, NewFeatureFlag};
use crate::repositories::scripts::{CustomScriptChanges, NewCustomScript};
use crate::repositories::verification::SiteVerificationChanges;
use crate::repositories::{
    AnalyticsConfigRepository, CustomScriptRepository, FeatureFlagRepository,
    SiteVerificationRepository,
};
use crate::server::AppState;

// ---------------------------------------------------------------------------
// Analytics configs

/// Query parameters for config listing
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListConfigsQuery {
    /// Only active configs
    pub active_only: Option<bool>,
    /// Environment scope; rows scoped to `all` always match
    pub environment: Option<Environment>,
}

/// Request body for creating an analytics config
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateConfigRequest {
    pub platform: AnalyticsPlatform,
    pub name: String,
    pub tracking_id: String,
    pub is_active: Option<bool>,
    pub environment: Option<Environment>,
    pub additional_config: Option<serde_json::Value>,
    pub priority: Option<i32>,
}

/// Request body for updating an analytics config
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConfigRequest {
    pub platform: Option<AnalyticsPlatform>,
    pub name: Option<String>,
    pub tracking_id: Option<String>,
    pub is_active: Option<bool>,
    pub environment: Option<Environment>,
    #[serde(default, deserialize_with = "double_option")]
    pub additional_config: Option<Option<serde_json::Value>>,
    pub priority: Option<i32>,
}

/// List analytics configs
#[utoipa::path(
    get,
    path = "/api/v1/analytics/configs",
    params(ListConfigsQuery),
    responses(
        (status = 200, description = "Configs in priority order", body = [analytics_config::Model])
    ),
    tag = "analytics"
)]
pub async fn list_configs(
    State(state): State<AppState>,
    Query(query): Query<ListConfigsQuery>,
) -> Result<Json<Vec<analytics_config::Model>>, ApiError> {
    let repo = AnalyticsConfigRepository::new(Arc::new(state.db.clone()));
    let configs = repo
        .list(query.active_only.unwrap_or(false), query.environment)
        .await?;
    Ok(Json(configs))
}

/// Fetch an analytics config
#[utoipa::path(
    get,
    path = "/api/v1/analytics/configs/{id}",
    params(("id" = Uuid, Path, description = "Config id")),
    responses(
        (status = 200, description = "Config", body = analytics_config::Model),
        (status = 404, description = "Not found", body = ApiError)
    ),
    tag = "analytics"
)]
pub async fn get_config(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<analytics_config::Model>, ApiError> {
    let repo = AnalyticsConfigRepository::new(Arc::new(state.db.clone()));
    let config = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found("Analytics config not found"))?;
    Ok(Json(config))
}

/// Create an analytics config
#[utoipa::path(
    post,
    path = "/api/v1/analytics/configs",
    request_body = CreateConfigRequest,
    responses(
        (status = 201, description = "Config created", body = analytics_config::Model),
        (status = 401, description = "Unauthorized", body = ApiError)
    ),
    tag = "analytics"
)]
pub async fn create_config(
    State(state): State<AppState>,
    user: crate::auth::CurrentUser,
    Json(payload): Json<CreateConfigRequest>,
) -> Result<(StatusCode, Json<analytics_config::Model>), ApiError> {
    let repo = AnalyticsConfigRepository::new(Arc::new(state.db.clone()));
    let created = repo
        .create(NewAnalyticsConfig {
            platform: payload.platform,
            name: payload.name,
            tracking_id: payload.tracking_id,
            is_active: payload.is_active.unwrap_or(true),
            environment: payload.environment.unwrap_or(Environment::All),
            additional_config: payload.additional_config,
            priority: payload.priority.unwrap_or(0),
            created_by_user_id: Some(user.id),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an analytics config
#[utoipa::path(
    patch,
    path = "/api/v1/analytics/configs/{id}",
    params(("id" = Uuid, Path, description = "Config id")),
    request_body = UpdateConfigRequest,
    responses(
        (status = 200, description = "Config updated", body = analytics_config::Model),
        (status = 404, description = "Not found", body = ApiError)
    ),
    tag = "analytics"
)]
pub async fn update_config(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateConfigRequest>,
) -> Result<Json<analytics_config::Model>, ApiError> {
    let repo = AnalyticsConfigRepository::new(Arc::new(state.db.clone()));
    let updated = repo
        .update(
            id,
            AnalyticsConfigChanges {
                platform: payload.platform,
                name: payload.name,
                tracking_id: payload.tracking_id,
                is_active: payload.is_active,
                environment: payload.environment,
                additional_config: payload.additional_config,
                priority: payload.priority,
            },
        )
        .await?
        .ok_or_else(|| not_found("Analytics config not found"))?;
    Ok(Json(updated))
}

/// Soft-delete an analytics config
#[utoipa::path(
    delete,
    path = "/api/v1/analytics/configs/{id}",
    params(("id" = Uuid, Path, description = "Config id")),
    responses(
        (status = 204, description = "Config deleted"),
        (status = 404, description = "Not found", body = ApiError)
    ),
    tag = "analytics"
)]
pub async fn delete_config(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = AnalyticsConfigRepository::new(Arc::new(state.db.clone()));
    if !repo.soft_delete(id).await? {
        return Err(not_found("Analytics config not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Site verifications

/// Request body for upserting a verification
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertVerificationRequest {
    pub platform: VerificationPlatform,
    pub verification_code: String,
    pub meta_tag: Option<String>,
}

/// Request body for updating a verification
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVerificationRequest {
    pub verification_code: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub meta_tag: Option<Option<String>>,
    pub is_verified: Option<bool>,
}

/// List site verifications
#[utoipa::path(
    get,
    path = "/api/v1/analytics/verification",
    responses(
        (status = 200, description = "Verifications ordered by platform", body = [site_verification::Model])
    ),
    tag = "analytics"
)]
pub async fn list_verifications(
    State(state): State<AppState>,
) -> Result<Json<Vec<site_verification::Model>>, ApiError> {
    let repo = SiteVerificationRepository::new(Arc::new(state.db.clone()));
    Ok(Json(repo.list().await?))
}

/// Fetch the verification for a platform
#[utoipa::path(
    get,
    path = "/api/v1/analytics/verification/{platform}",
    params(("platform" = VerificationPlatform, Path, description = "Verification platform")),
    responses(
        (status = 200, description = "Verification", body = site_verification::Model),
        (status = 404, description = "Not found", body = ApiError)
    ),
    tag = "analytics"
)]
pub async fn get_verification(
    State(state): State<AppState>,
    Path(platform): Path<VerificationPlatform>,
) -> Result<Json<site_verification::Model>, ApiError> {
    let repo = SiteVerificationRepository::new(Arc::new(state.db.clone()));
    let row = repo
        .find_by_platform(platform)
        .await?
        .ok_or_else(|| not_found("Verification not found"))?;
    Ok(Json(row))
}

/// Create or replace the verification for a platform
#[utoipa::path(
    post,
    path = "/api/v1/analytics/verification",
    request_body = UpsertVerificationRequest,
    responses(
        (status = 200, description = "Verification upserted", body = site_verification::Model),
        (status = 401, description = "Unauthorized", body = ApiError)
    ),
    tag = "analytics"
)]
pub async fn upsert_verification(
    State(state): State<AppState>,
    Json(payload): Json<UpsertVerificationRequest>,
) -> Result<Json<site_verification::Model>, ApiError> {
    let repo = SiteVerificationRepository::new(Arc::new(state.db.clone()));
    let row = repo
        .upsert(payload.platform, payload.verification_code, payload.meta_tag)
        .await?;
    Ok(Json(row))
}

/// Update a platform's verification
#[utoipa::path(
    patch,
    path = "/api/v1/analytics/verification/{platform}",
    params(("platform" = VerificationPlatform, Path, description = "Verification platform")),
    request_body = UpdateVerificationRequest,
    responses(
        (status = 200, description = "Verification updated", body = site_verification::Model),
        (status = 404, description = "Not found", body = ApiError)
    ),
    tag = "analytics"
)]
pub async fn update_verification(
    State(state): State<AppState>,
    Path(platform): Path<VerificationPlatform>,
    Json(payload): Json<UpdateVerificationRequest>,
) -> Result<Json<site_verification::Model>, ApiError> {
    let repo = SiteVerificationRepository::new(Arc::new(state.db.clone()));
    let existing = repo
        .find_by_platform(platform)
        .await?
        .ok_or_else(|| not_found("Verification not found"))?;
    let updated = repo
        .update(
            existing.id,
            SiteVerificationChanges {
                verification_code: payload.verification_code,
                meta_tag: payload.meta_tag,
                is_verified: payload.is_verified,
            },
        )
        .await?
        .ok_or_else(|| not_found("Verification not found"))?;
    Ok(Json(updated))
}

/// Mark a platform as verified
#[utoipa::path(
    post,
    path = "/api/v1/analytics/verification/{platform}/verify",
    params(("platform" = VerificationPlatform, Path, description = "Verification platform")),
    responses(
        (status = 200, description = "Verification marked verified", body = site_verification::Model),
        (status = 404, description = "Not found", body = ApiError)
    ),
    tag = "analytics"
)]
pub async fn verify_platform(
    State(state): State<AppState>,
    Path(platform): Path<VerificationPlatform>,
) -> Result<Json<site_verification::Model>, ApiError> {
    let repo = SiteVerificationRepository::new(Arc::new(state.db.clone()));
    let row = repo
        .mark_verified(platform)
        .await?
        .ok_or_else(|| not_found("Verification not found"))?;
    Ok(Json(row))
}

// ---------------------------------------------------------------------------
// Custom scripts

/// Query parameters for script listing
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListScriptsQuery {
    /// Only active scripts
    pub active_only: Option<bool>,
    /// Restrict to one document slot
    pub position: Option<ScriptPosition>,
    /// Environment scope; rows scoped to `all` always match
    pub environment: Option<Environment>,
}

/// Request body for creating a custom script
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateScriptRequest {
    pub name: String,
    pub script_content: String,
    pub position: Option<ScriptPosition>,
    pub target_pages: Option<serde_json::Value>,
    pub content_types: Option<serde_json::Value>,
    pub priority: Option<i32>,
    pub is_active: Option<bool>,
    pub environment: Option<Environment>,
}

/// Request body for updating a custom script
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScriptRequest {
    pub name: Option<String>,
    pub script_content: Option<String>,
    pub position: Option<ScriptPosition>,
    #[serde(default, deserialize_with = "double_option")]
    pub target_pages: Option<Option<serde_json::Value>>,
    #[serde(default, deserialize_with = "double_option")]
    pub content_types: Option<Option<serde_json::Value>>,
    pub priority: Option<i32>,
    pub is_active: Option<bool>,
    pub environment: Option<Environment>,
}

/// List custom scripts
#[utoipa::path(
    get,
    path = "/api/v1/analytics/custom-scripts",
    params(ListScriptsQuery),
    responses(
        (status = 200, description = "Scripts in injection order", body = [custom_script::Model])
    ),
    tag = "analytics"
)]
pub async fn list_scripts(
    State(state): State<AppState>,
    Query(query): Query<ListScriptsQuery>,
) -> Result<Json<Vec<custom_script::Model>>, ApiError> {
    let repo = CustomScriptRepository::new(Arc::new(state.db.clone()));
    let scripts = repo
        .list(
            query.active_only.unwrap_or(false),
            query.position,
            query.environment,
        )
        .await?;
    Ok(Json(scripts))
}

/// Fetch a custom script
#[utoipa::path(
    get,
    path = "/api/v1/analytics/custom-scripts/{id}",
    params(("id" = Uuid, Path, description = "Script id")),
    responses(
        (status = 200, description = "Script", body = custom_script::Model),
        (status = 404, description = "Not found", body = ApiError)
    ),
    tag = "analytics"
)]
pub async fn get_script(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<custom_script::Model>, ApiError> {
    let repo = CustomScriptRepository::new(Arc::new(state.db.clone()));
    let script = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found("Custom script not found"))?;
    Ok(Json(script))
}

/// Create a custom script
#[utoipa::path(
    post,
    path = "/api/v1/analytics/custom-scripts",
    request_body = CreateScriptRequest,
    responses(
        (status = 201, description = "Script created", body = custom_script::Model),
        (status = 401, description = "Unauthorized", body = ApiError)
    ),
    tag = "analytics"
)]
pub async fn create_script(
    State(state): State<AppState>,
    user: crate::auth::CurrentUser,
    Json(payload): Json<CreateScriptRequest>,
) -> Result<(StatusCode, Json<custom_script::Model>), ApiError> {
    let repo = CustomScriptRepository::new(Arc::new(state.db.clone()));
    let created = repo
        .create(NewCustomScript {
            name: payload.name,
            script_content: payload.script_content,
            position: payload.position.unwrap_or(ScriptPosition::HeadEnd),
            target_pages: payload.target_pages,
            content_types: payload.content_types,
            priority: payload.priority.unwrap_or(0),
            is_active: payload.is_active.unwrap_or(true),
            environment: payload.environment.unwrap_or(Environment::All),
            created_by_user_id: Some(user.id),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a custom script
#[utoipa::path(
    patch,
    path = "/api/v1/analytics/custom-scripts/{id}",
    params(("id" = Uuid, Path, description = "Script id")),
    request_body = UpdateScriptRequest,
    responses(
        (status = 200, description = "Script updated", body = custom_script::Model),
        (status = 404, description = "Not found", body = ApiError)
    ),
    tag = "analytics"
)]
pub async fn update_script(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateScriptRequest>,
) -> Result<Json<custom_script::Model>, ApiError> {
    let repo = CustomScriptRepository::new(Arc::new(state.db.clone()));
    let updated = repo
        .update(
            id,
            CustomScriptChanges {
                name: payload.name,
                script_content: payload.script_content,
                position: payload.position,
                target_pages: payload.target_pages,
                content_types: payload.content_types,
                priority: payload.priority,
                is_active: payload.is_active,
                environment: payload.environment,
            },
        )
        .await?
        .ok_or_else(|| not_found("Custom script not found"))?;
    Ok(Json(updated))
}

/// Soft-delete a custom script
#[utoipa::path(
    delete,
    path = "/api/v1/analytics/custom-scripts/{id}",
    params(("id" = Uuid, Path, description = "Script id")),
    responses(
        (status = 204, description = "Script deleted"),
        (status = 404, description = "Not found", body = ApiError)
    ),
    tag = "analytics"
)]
pub async fn delete_script(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = CustomScriptRepository::new(Arc::new(state.db.clone()));
    if !repo.soft_delete(id).await? {
        return Err(not_found("Custom script not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Feature flags

/// Query parameter scoping flags to an environment
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlagEnvironmentQuery {
    /// Environment scope; rows scoped to `all` always match
    pub environment: Option<Environment>,
}

/// Request body for creating a feature flag
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFlagRequest {
    pub flag_name: String,
    pub description: Option<String>,
    pub is_enabled: Option<bool>,
    pub environment: Option<Environment>,
}

/// Request body for updating a feature flag
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFlagRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub is_enabled: Option<bool>,
    pub environment: Option<Environment>,
}

/// Request body for toggling a feature flag
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToggleFlagRequest {
    pub is_enabled: bool,
    /// When absent, the flag name alone selects the flag regardless of scope.
    pub environment: Option<Environment>,
}

/// List feature flags
#[utoipa::path(
    get,
    path = "/api/v1/analytics/feature-flags",
    params(FlagEnvironmentQuery),
    responses(
        (status = 200, description = "Flags ordered by name", body = [feature_flag::Model])
    ),
    tag = "analytics"
)]
pub async fn list_flags(
    State(state): State<AppState>,
    Query(query): Query<FlagEnvironmentQuery>,
) -> Result<Json<Vec<feature_flag::Model>>, ApiError> {
    let repo = FeatureFlagRepository::new(Arc::new(state.db.clone()));
    Ok(Json(repo.list(query.environment).await?))
}

/// Fetch a feature flag by name
#[utoipa::path(
    get,
    path = "/api/v1/analytics/feature-flags/{flagName}",
    params(
        ("flagName" = String, Path, description = "Flag name"),
        FlagEnvironmentQuery
    ),
    responses(
        (status = 200, description = "Flag", body = feature_flag::Model),
        (status = 404, description = "Not found", body = ApiError)
    ),
    tag = "analytics"
)]
pub async fn get_flag(
    State(state): State<AppState>,
    Path(flag_name): Path<String>,
    Query(query): Query<FlagEnvironmentQuery>,
) -> Result<Json<feature_flag::Model>, ApiError> {
    let repo = FeatureFlagRepository::new(Arc::new(state.db.clone()));
    let flag = repo
        .find_by_name(&flag_name, query.environment)
        .await?
        .ok_or_else(|| not_found("Feature flag not found"))?;
    Ok(Json(flag))
}

/// Create a feature flag
#[utoipa::path(
    post,
    path = "/api/v1/analytics/feature-flags",
    request_body = CreateFlagRequest,
    responses(
        (status = 201, description = "Flag created", body = feature_flag::Model),
        (status = 409, description = "Flag name already in use", body = ApiError)
    ),
    tag = "analytics"
)]
pub async fn create_flag(
    State(state): State<AppState>,
    Json(payload): Json<CreateFlagRequest>,
) -> Result<(StatusCode, Json<feature_flag::Model>), ApiError> {
    let repo = FeatureFlagRepository::new(Arc::new(state.db.clone()));
    let created = repo
        .create(NewFeatureFlag {
            flag_name: payload.flag_name,
            description: payload.description,
            is_enabled: payload.is_enabled.unwrap_or(false),
            environment: payload.environment.unwrap_or(Environment::All),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a feature flag
#[utoipa::path(
    patch,
    path = "/api/v1/analytics/feature-flags/{flagName}",
    params(("flagName" = String, Path, description = "Flag name")),
    request_body = UpdateFlagRequest,
    responses(
        (status = 200, description = "Flag updated", body = feature_flag::Model),
        (status = 404, description = "Not found", body = ApiError)
    ),
    tag = "analytics"
)]
pub async fn update_flag(
    State(state): State<AppState>,
    Path(flag_name): Path<String>,
    Json(payload): Json<UpdateFlagRequest>,
) -> Result<Json<feature_flag::Model>, ApiError> {
    let repo = FeatureFlagRepository::new(Arc::new(state.db.clone()));
    let existing = repo
        .find_by_name(&flag_name, None)
        .await?
        .ok_or_else(|| not_found("Feature flag not found"))?;
    let updated = repo
        .update(
            existing.id,
            FeatureFlagChanges {
                description: payload.description,
                is_enabled: payload.is_enabled,
                environment: payload.environment,
            },
        )
        .await?
        .ok_or_else(|| not_found("Feature flag not found"))?;
    Ok(Json(updated))
}

/// Toggle a feature flag within an environment scope
///
/// Only a row whose environment matches the requested scope (or `all`) is
/// touched; a flag scoped to a different environment is reported as absent.
#[utoipa::path(
    post,
    path = "/api/v1/analytics/feature-flags/{flagName}/toggle",
    params(("flagName" = String, Path, description = "Flag name")),
    request_body = ToggleFlagRequest,
    responses(
        (status = 200, description = "Flag toggled", body = feature_flag::Model),
        (status = 404, description = "Not found in scope", body = ApiError)
    ),
    tag = "analytics"
)]
pub async fn toggle_flag(
    State(state): State<AppState>,
    Path(flag_name): Path<String>,
    Json(payload): Json<ToggleFlagRequest>,
) -> Result<Json<feature_flag::Model>, ApiError> {
    let repo = FeatureFlagRepository::new(Arc::new(state.db.clone()));
    let toggled = repo
        .toggle(&flag_name, payload.is_enabled, payload.environment)
        .await?
        .ok_or_else(|| not_found("Feature flag not found"))?;
    Ok(Json(toggled))
}
