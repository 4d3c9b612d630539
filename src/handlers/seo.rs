//! # SEO API Handlers
//!
//! Per-content SEO metadata plus the sitemap.xml / robots.txt endpoints.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::Json,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::error::{ApiError, not_found};
use crate::models::seo_metadata;
use crate::repositories::seo::SeoMetadataInput;
use crate::repositories::{ContentRepository, SeoMetadataRepository};
use crate::server::AppState;
use crate::sitemap;

/// Request body for upserting SEO metadata. The write replaces the whole
/// document for the content id.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertMetadataRequest {
    pub content_id: Uuid,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub og_image: Option<String>,
    pub og_type: Option<String>,
    pub og_url: Option<String>,
    pub og_site_name: Option<String>,
    pub twitter_card: Option<String>,
    pub twitter_site: Option<String>,
    pub twitter_creator: Option<String>,
    pub twitter_image: Option<String>,
    pub canonical_url: Option<String>,
    pub hreflang: Option<serde_json::Value>,
    pub custom_meta: Option<serde_json::Value>,
}

/// Query parameter selecting the sitemap locale prefix
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct SitemapQuery {
    /// Locale path prefix for content URLs (e.g. `de`)
    pub locale: Option<String>,
}

/// Fetch SEO metadata for a content document
#[utoipa::path(
    get,
    path = "/api/v1/seo/metadata/{contentId}",
    params(("contentId" = Uuid, Path, description = "Content id")),
    responses(
        (status = 200, description = "Metadata", body = seo_metadata::Model),
        (status = 404, description = "Not found", body = ApiError)
    ),
    tag = "seo"
)]
pub async fn get_metadata(
    State(state): State<AppState>,
    Path(content_id): Path<Uuid>,
) -> Result<Json<seo_metadata::Model>, ApiError> {
    let repo = SeoMetadataRepository::new(Arc::new(state.db.clone()));
    let row = repo
        .find_by_content_id(content_id)
        .await?
        .ok_or_else(|| not_found("SEO metadata not found"))?;
    Ok(Json(row))
}

/// Create or replace SEO metadata for a content document
#[utoipa::path(
    post,
    path = "/api/v1/seo/metadata",
    request_body = UpsertMetadataRequest,
    responses(
        (status = 200, description = "Metadata upserted", body = seo_metadata::Model),
        (status = 404, description = "Content not found", body = ApiError)
    ),
    tag = "seo"
)]
pub async fn upsert_metadata(
    State(state): State<AppState>,
    Json(payload): Json<UpsertMetadataRequest>,
) -> Result<Json<seo_metadata::Model>, ApiError> {
    let db = Arc::new(state.db.clone());
    let contents = ContentRepository::new(db.clone());
    if contents.find_by_id(payload.content_id).await?.is_none() {
        return Err(not_found("Content not found"));
    }

    let repo = SeoMetadataRepository::new(db);
    let row = repo
        .upsert(
            payload.content_id,
            SeoMetadataInput {
                meta_title: payload.meta_title,
                meta_description: payload.meta_description,
                meta_keywords: payload.meta_keywords,
                og_title: payload.og_title,
                og_description: payload.og_description,
                og_image: payload.og_image,
                og_type: payload.og_type,
                og_url: payload.og_url,
                og_site_name: payload.og_site_name,
                twitter_card: payload.twitter_card,
                twitter_site: payload.twitter_site,
                twitter_creator: payload.twitter_creator,
                twitter_image: payload.twitter_image,
                canonical_url: payload.canonical_url,
                hreflang: payload.hreflang,
                custom_meta: payload.custom_meta,
            },
        )
        .await?;
    Ok(Json(row))
}

/// Render sitemap.xml
///
/// A failed content fetch degrades to the static routes so the sitemap
/// never 500s on a database hiccup.
#[utoipa::path(
    get,
    path = "/api/v1/seo/sitemap.xml",
    params(SitemapQuery),
    responses(
        (status = 200, description = "Sitemap XML", content_type = "application/xml")
    ),
    tag = "seo"
)]
pub async fn sitemap_xml(
    State(state): State<AppState>,
    Query(query): Query<SitemapQuery>,
) -> ([(header::HeaderName, &'static str); 1], String) {
    let repo = ContentRepository::new(Arc::new(state.db.clone()));
    let contents = match repo.list_published().await {
        Ok(rows) => rows,
        Err(error) => {
            tracing::warn!(error = %error, "Sitemap content fetch failed, serving static routes only");
            Vec::new()
        }
    };

    let xml = sitemap::render_sitemap(
        &state.config.site_base(),
        query.locale.as_deref(),
        &contents,
    );
    ([(header::CONTENT_TYPE, "application/xml")], xml)
}

/// Render robots.txt
#[utoipa::path(
    get,
    path = "/api/v1/seo/robots.txt",
    responses(
        (status = 200, description = "robots.txt", content_type = "text/plain")
    ),
    tag = "seo"
)]
pub async fn robots_txt(
    State(state): State<AppState>,
) -> ([(header::HeaderName, &'static str); 1], String) {
    let body = sitemap::render_robots(&state.config.site_base());
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body)
}
