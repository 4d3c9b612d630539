//! # Geo Settings API Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use super::types::double_option;
use crate::error::{ApiError, not_found};
use crate::models::geo_setting;
use crate::repositories::GeoSettingRepository;
use crate::repositories::geo::{GeoSettingChanges, NewGeoSetting};
use crate::server::AppState;

/// Request body for creating a geo setting
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGeoSettingRequest {
    pub country_code: String,
    pub language_code: String,
    pub region: Option<String>,
    pub timezone: Option<String>,
    pub currency: Option<String>,
    pub hreflang_config: Option<serde_json::Value>,
    pub regional_schema_overrides: Option<serde_json::Value>,
    pub regional_analytics_overrides: Option<serde_json::Value>,
}

/// Request body for updating a geo setting
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGeoSettingRequest {
    pub language_code: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub region: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub timezone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub currency: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub hreflang_config: Option<Option<serde_json::Value>>,
    #[serde(default, deserialize_with = "double_option")]
    pub regional_schema_overrides: Option<Option<serde_json::Value>>,
    #[serde(default, deserialize_with = "double_option")]
    pub regional_analytics_overrides: Option<Option<serde_json::Value>>,
}

/// List geo settings
#[utoipa::path(
    get,
    path = "/api/v1/geo/settings",
    responses(
        (status = 200, description = "Settings ordered by country code", body = [geo_setting::Model])
    ),
    tag = "geo"
)]
pub async fn list_settings(
    State(state): State<AppState>,
) -> Result<Json<Vec<geo_setting::Model>>, ApiError> {
    let repo = GeoSettingRepository::new(Arc::new(state.db.clone()));
    Ok(Json(repo.list().await?))
}

/// Resolve the geo setting for a locale
///
/// `lang-COUNTRY` locales look up by country; a bare language code is used
/// as the country lookup itself.
#[utoipa::path(
    get,
    path = "/api/v1/geo/settings/locale/{locale}",
    params(("locale" = String, Path, description = "Locale such as en-US or de")),
    responses(
        (status = 200, description = "Matching setting", body = geo_setting::Model),
        (status = 404, description = "Not found", body = ApiError)
    ),
    tag = "geo"
)]
pub async fn get_setting_for_locale(
    State(state): State<AppState>,
    Path(locale): Path<String>,
) -> Result<Json<geo_setting::Model>, ApiError> {
    let lookup = locale.split('-').nth(1).unwrap_or(locale.as_str());

    let repo = GeoSettingRepository::new(Arc::new(state.db.clone()));
    let setting = repo
        .find_by_country_code(lookup)
        .await?
        .ok_or_else(|| not_found("Geo setting not found"))?;
    Ok(Json(setting))
}

/// Create a geo setting
#[utoipa::path(
    post,
    path = "/api/v1/geo/settings",
    request_body = CreateGeoSettingRequest,
    responses(
        (status = 201, description = "Setting created", body = geo_setting::Model),
        (status = 409, description = "Country already configured", body = ApiError)
    ),
    tag = "geo"
)]
pub async fn create_setting(
    State(state): State<AppState>,
    Json(payload): Json<CreateGeoSettingRequest>,
) -> Result<(StatusCode, Json<geo_setting::Model>), ApiError> {
    let repo = GeoSettingRepository::new(Arc::new(state.db.clone()));
    let created = repo
        .create(NewGeoSetting {
            country_code: payload.country_code,
            language_code: payload.language_code,
            region: payload.region,
            timezone: payload.timezone,
            currency: payload.currency,
            hreflang_config: payload.hreflang_config,
            regional_schema_overrides: payload.regional_schema_overrides,
            regional_analytics_overrides: payload.regional_analytics_overrides,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a geo setting
#[utoipa::path(
    patch,
    path = "/api/v1/geo/settings/{id}",
    params(("id" = Uuid, Path, description = "Setting id")),
    request_body = UpdateGeoSettingRequest,
    responses(
        (status = 200, description = "Setting updated", body = geo_setting::Model),
        (status = 404, description = "Not found", body = ApiError)
    ),
    tag = "geo"
)]
pub async fn update_setting(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateGeoSettingRequest>,
) -> Result<Json<geo_setting::Model>, ApiError> {
    let repo = GeoSettingRepository::new(Arc::new(state.db.clone()));
    let updated = repo
        .update(
            id,
            GeoSettingChanges {
                language_code: payload.language_code,
                region: payload.region,
                timezone: payload.timezone,
                currency: payload.currency,
                hreflang_config: payload.hreflang_config,
                regional_schema_overrides: payload.regional_schema_overrides,
                regional_analytics_overrides: payload.regional_analytics_overrides,
            },
        )
        .await?
        .ok_or_else(|| not_found("Geo setting not found"))?;
    Ok(Json(updated))
}
