//! # Structured Data API Handlers
//!
//! JSON-LD generation for content plus CRUD for reusable schema templates.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{ApiError, not_found};
use crate::models::enums::ContentType;
use crate::models::structured_data_template;
use crate::repositories::{ContentRepository, SeoMetadataRepository, StructuredDataRepository};
use crate::repositories::structured_data::{NewTemplate, TemplateChanges};
use crate::server::AppState;

/// Request body for creating a template
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplateRequest {
    pub name: String,
    pub schema_type: String,
    pub template: Value,
    pub is_global: Option<bool>,
    pub is_active: Option<bool>,
}

/// Request body for updating a template
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTemplateRequest {
    pub name: Option<String>,
    pub schema_type: Option<String>,
    pub template: Option<Value>,
    pub is_global: Option<bool>,
    pub is_active: Option<bool>,
}

/// Generate JSON-LD for a content document
///
/// Returns an array: one Article (blog) or WebPage schema derived from the
/// content and its SEO metadata, followed by every active global template.
#[utoipa::path(
    get,
    path = "/api/v1/structured-data/generate/{contentId}",
    params(("contentId" = Uuid, Path, description = "Content id")),
    responses(
        (status = 200, description = "JSON-LD documents", body = [serde_json::Value]),
        (status = 404, description = "Content not found", body = ApiError)
    ),
    tag = "structured-data"
)]
pub async fn generate_for_content(
    State(state): State<AppState>,
    Path(content_id): Path<Uuid>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let db = Arc::new(state.db.clone());
    let contents = ContentRepository::new(db.clone());
    let content = contents
        .find_by_id(content_id)
        .await?
        .ok_or_else(|| not_found("Content not found"))?;

    let metadata = SeoMetadataRepository::new(db.clone())
        .find_by_content_id(content_id)
        .await?;

    let base = state.config.site_base();
    let url = metadata
        .as_ref()
        .and_then(|m| m.canonical_url.clone())
        .unwrap_or_else(|| {
            format!(
                "{}/{}/{}",
                base,
                content.content_type.path_segment(),
                content.slug
            )
        });

    let schema_type = match content.content_type {
        ContentType::Blog => "Article",
        _ => "WebPage",
    };

    let mut schema = json!({
        "@context": "https://schema.org",
        "@type": schema_type,
        "headline": metadata
            .as_ref()
            .and_then(|m| m.meta_title.clone())
            .unwrap_or_else(|| content.title.clone()),
        "url": url,
        "dateModified": content.updated_at.to_rfc3339(),
    });

    let description = metadata
        .as_ref()
        .and_then(|m| m.meta_description.clone())
        .or_else(|| content.excerpt.clone());
    if let Some(description) = description {
        schema["description"] = Value::String(description);
    }
    if let Some(published_at) = content.published_at {
        schema["datePublished"] = Value::String(published_at.to_rfc3339());
    }
    let image = metadata
        .as_ref()
        .and_then(|m| m.og_image.clone())
        .or_else(|| content.featured_image.clone());
    if let Some(image) = image {
        schema["image"] = Value::String(image);
    }

    let mut documents = vec![schema];
    let globals = StructuredDataRepository::new(db).list_active_global().await?;
    documents.extend(globals.into_iter().map(|template| template.template));

    Ok(Json(documents))
}

/// List structured data templates
#[utoipa::path(
    get,
    path = "/api/v1/structured-data/templates",
    responses(
        (status = 200, description = "Templates ordered by name", body = [structured_data_template::Model])
    ),
    tag = "structured-data"
)]
pub async fn list_templates(
    State(state): State<AppState>,
) -> Result<Json<Vec<structured_data_template::Model>>, ApiError> {
    let repo = StructuredDataRepository::new(Arc::new(state.db.clone()));
    Ok(Json(repo.list().await?))
}

/// Create a structured data template
#[utoipa::path(
    post,
    path = "/api/v1/structured-data/templates",
    request_body = CreateTemplateRequest,
    responses(
        (status = 201, description = "Template created", body = structured_data_template::Model),
        (status = 401, description = "Unauthorized", body = ApiError)
    ),
    tag = "structured-data"
)]
pub async fn create_template(
    State(state): State<AppState>,
    Json(payload): Json<CreateTemplateRequest>,
) -> Result<(StatusCode, Json<structured_data_template::Model>), ApiError> {
    let repo = StructuredDataRepository::new(Arc::new(state.db.clone()));
    let created = repo
        .create(NewTemplate {
            name: payload.name,
            schema_type: payload.schema_type,
            template: payload.template,
            is_global: payload.is_global.unwrap_or(false),
            is_active: payload.is_active.unwrap_or(true),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a structured data template
#[utoipa::path(
    patch,
    path = "/api/v1/structured-data/templates/{id}",
    params(("id" = Uuid, Path, description = "Template id")),
    request_body = UpdateTemplateRequest,
    responses(
        (status = 200, description = "Template updated", body = structured_data_template::Model),
        (status = 404, description = "Not found", body = ApiError)
    ),
    tag = "structured-data"
)]
pub async fn update_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTemplateRequest>,
) -> Result<Json<structured_data_template::Model>, ApiError> {
    let repo = StructuredDataRepository::new(Arc::new(state.db.clone()));
    let updated = repo
        .update(
            id,
            TemplateChanges {
                name: payload.name,
                schema_type: payload.schema_type,
                template: payload.template,
                is_global: payload.is_global,
                is_active: payload.is_active,
            },
        )
        .await?
        .ok_or_else(|| not_found("Structured data template not found"))?;
    Ok(Json(updated))
}
