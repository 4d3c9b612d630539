//! # Navigation API Handlers

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
use crate::models::enums::MenuLocation;
use crate::models::navigation_menu;
use crate::repositories::NavigationRepository;
use crate::repositories::navigation::{NavigationMenuChanges, NewNavigationMenu};
use crate::server::AppState;

/// Query parameters for menu listing
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListMenusQuery {
    /// Restrict to one site region
    pub location: Option<MenuLocation>,
    /// Locale filter; locale-less menus always match
    pub locale: Option<String>,
}

/// Request body for creating a navigation menu
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMenuRequest {
    pub name: String,
    pub location: MenuLocation,
    /// Menu item tree: label/url/target/children
    pub items: serde_json::Value,
    pub locale: Option<String>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}

/// Request body for updating a navigation menu
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMenuRequest {
    pub name: Option<String>,
    pub location: Option<MenuLocation>,
    pub items: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "double_option")]
    pub locale: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}

/// List active navigation menus
#[utoipa::path(
    get,
    path = "/api/v1/navigation",
    params(ListMenusQuery),
    responses(
        (status = 200, description = "Active menus in sort order", body = [navigation_menu::Model])
    ),
    tag = "navigation"
)]
pub async fn list_menus(
    State(state): State<AppState>,
    Query(query): Query<ListMenusQuery>,
) -> Result<Json<Vec<navigation_menu::Model>>, ApiError> {
    let repo = NavigationRepository::new(Arc::new(state.db.clone()));
    Ok(Json(repo.list(query.location, query.locale).await?))
}

/// Create a navigation menu
#[utoipa::path(
    post,
    path = "/api/v1/navigation",
    request_body = CreateMenuRequest,
    responses(
        (status = 201, description = "Menu created", body = navigation_menu::Model),
        (status = 401, description = "Unauthorized", body = ApiError)
    ),
    tag = "navigation"
)]
pub async fn create_menu(
    State(state): State<AppState>,
    Json(payload): Json<CreateMenuRequest>,
) -> Result<(StatusCode, Json<navigation_menu::Model>), ApiError> {
    let repo = NavigationRepository::new(Arc::new(state.db.clone()));
    let created = repo
        .create(NewNavigationMenu {
            name: payload.name,
            location: payload.location,
            items: payload.items,
            locale: payload.locale,
            is_active: payload.is_active.unwrap_or(true),
            sort_order: payload.sort_order.unwrap_or(0),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a navigation menu
#[utoipa::path(
    patch,
    path = "/api/v1/navigation/{id}",
    params(("id" = Uuid, Path, description = "Menu id")),
    request_body = UpdateMenuRequest,
    responses(
        (status = 200, description = "Menu updated", body = navigation_menu::Model),
        (status = 404, description = "Not found", body = ApiError)
    ),
    tag = "navigation"
)]
pub async fn update_menu(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateMenuRequest>,
) -> Result<Json<navigation_menu::Model>, ApiError> {
    let repo = NavigationRepository::new(Arc::new(state.db.clone()));
    let updated = repo
        .update(
            id,
            NavigationMenuChanges {
                name: payload.name,
                location: payload.location,
                items: payload.items,
                locale: payload.locale,
                is_active: payload.is_active,
                sort_order: payload.sort_order,
            },
        )
        .await?
        .ok_or_else(|| not_found("Navigation menu not found"))?;
    Ok(Json(updated))
}

/// Soft-delete a navigation menu
#[utoipa::path(
    delete,
    path = "/api/v1/navigation/{id}",
    params(("id" = Uuid, Path, description = "Menu id")),
    responses(
        (status = 204, description = "Menu deleted"),
        (status = 404, description = "Not found", body = ApiError)
    ),
    tag = "navigation"
)]
pub async fn delete_menu(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = NavigationRepository::new(Arc::new(state.db.clone()));
    if !repo.soft_delete(id).await? {
        return Err(not_found("Navigation menu not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}
