//! # Site Config Handler
//!
//! Public endpoint serving the composed render plan the frontend applies at
//! page render time.

use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::error::ApiError;
use crate::models::enums::Environment;
use crate::runtime_config::{self, SiteRenderPlan};
use crate::server::AppState;

/// Query parameter selecting the environment to compose for
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct SiteConfigQuery {
    /// Defaults to production
    pub environment: Option<Environment>,
}

/// Fetch the composed site configuration
///
/// Failed category fetches degrade to empty sets rather than failing the
/// request.
#[utoipa::path(
    get,
    path = "/api/v1/site-config",
    params(SiteConfigQuery),
    responses(
        (status = 200, description = "Composed render plan", body = SiteRenderPlan)
    ),
    tag = "site-config"
)]
pub async fn get_site_config(
    State(state): State<AppState>,
    Query(query): Query<SiteConfigQuery>,
) -> Result<Json<SiteRenderPlan>, ApiError> {
    let environment = query.environment.unwrap_or(Environment::Production);
    let snapshot =
        runtime_config::load_snapshot(Arc::new(state.db.clone()), environment).await;
    Ok(Json(runtime_config::build_render_plan(&snapshot)))
}
