//! # Contents API Handlers
//!
//! CRUD, publish lifecycle and version history for content documents.
//! Responses embed the resolved category and tag set.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, OnceLock};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::types::{PageQuery, PaginatedResponse, double_option};
use crate::error::{ApiError, not_found, validation_error};
use crate::models::enums::{ContentStatus, ContentType};
use crate::models::{category, content, content_version, tag};
use crate::repositories::ContentRepository;
use crate::repositories::content::{ContentChanges, ContentFilter, NewContent};
use crate::server::AppState;

static SLUG_RE: OnceLock<Regex> = OnceLock::new();

fn slug_regex() -> &'static Regex {
    SLUG_RE.get_or_init(|| {
        Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("static slug pattern is valid")
    })
}

fn validate_slug(slug: &str) -> Result<(), ApiError> {
    if slug_regex().is_match(slug) {
        Ok(())
    } else {
        Err(validation_error(
            "Invalid slug format",
            serde_json::json!({ "slug": "must be lowercase alphanumeric segments separated by single dashes" }),
        ))
    }
}

/// Query parameters for content listing
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListContentsQuery {
    /// Filter by content type
    #[serde(rename = "type")]
    pub content_type: Option<ContentType>,
    /// Filter by editorial status
    pub status: Option<ContentStatus>,
    /// Filter by category id
    pub category_id: Option<Uuid>,
    /// Filter by authoring user id
    pub author_id: Option<String>,
    /// Substring match over title, body and excerpt
    pub search: Option<String>,
    /// Only content carrying the tag with this slug
    pub tag_slug: Option<String>,
    /// Page size (default 20, max 100)
    pub limit: Option<u64>,
    /// Rows to skip (default 0)
    pub offset: Option<u64>,
}

/// Query parameter for slug lookups
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SlugQuery {
    /// Include non-published content in the lookup
    pub include_drafts: Option<bool>,
}

/// Content document with its category and tags embedded
#[derive(Debug, Serialize, ToSchema)]
pub struct ContentResponse {
    #[serde(flatten)]
    pub content: content::Model,
    pub category: Option<category::Model>,
    pub tags: Vec<tag::Model>,
}

/// Request body for creating content
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateContentRequest {
    pub title: String,
    pub slug: String,
    pub body: String,
    pub content_type: ContentType,
    /// Defaults to draft
    pub status: Option<ContentStatus>,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub author_id: String,
    pub category_id: Option<Uuid>,
    /// Tags to attach; unknown ids are ignored
    #[serde(default)]
    pub tag_ids: Vec<Uuid>,
}

/// Request body for partially updating content. Omitted fields are left
/// untouched; explicit `null` clears nullable fields.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContentRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub body: Option<String>,
    pub content_type: Option<ContentType>,
    pub status: Option<ContentStatus>,
    #[serde(default, deserialize_with = "double_option")]
    pub excerpt: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub featured_image: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub category_id: Option<Option<Uuid>>,
    pub tag_ids: Option<Vec<Uuid>>,
}

async fn embed(
    repo: &ContentRepository,
    item: content::Model,
) -> Result<ContentResponse, ApiError> {
    let category = match item.category_id {
        Some(category_id) => repo.find_category(category_id).await?,
        None => None,
    };
    let tags = repo.tags_for(item.id).await?;
    Ok(ContentResponse {
        content: item,
        category,
        tags,
    })
}

/// List content documents
#[utoipa::path(
    get,
    path = "/api/v1/contents",
    params(ListContentsQuery),
    responses(
        (status = 200, description = "Paginated content list", body = PaginatedResponse<ContentResponse>),
        (status = 400, description = "Validation error", body = ApiError)
    ),
    tag = "contents"
)]
pub async fn list_contents(
    State(state): State<AppState>,
    Query(query): Query<ListContentsQuery>,
) -> Result<Json<PaginatedResponse<ContentResponse>>, ApiError> {
    let (limit, offset) = PageQuery {
        limit: query.limit,
        offset: query.offset,
    }
    .resolve()?;

    let repo = ContentRepository::new(Arc::new(state.db.clone()));
    let filter = ContentFilter {
        content_type: query.content_type,
        status: query.status,
        category_id: query.category_id,
        author_id: query.author_id,
        search: query.search,
        tag_slug: query.tag_slug,
    };

    let (items, total) = repo.list(filter, limit, offset).await?;
    let mut data = Vec::with_capacity(items.len());
    for item in items {
        data.push(embed(&repo, item).await?);
    }

    Ok(Json(PaginatedResponse::new(data, limit, offset, total)))
}

/// Fetch content by slug
#[utoipa::path(
    get,
    path = "/api/v1/contents/slug/{slug}",
    params(
        ("slug" = String, Path, description = "Content slug"),
        SlugQuery
    ),
    responses(
        (status = 200, description = "Content document", body = ContentResponse),
        (status = 404, description = "Not found", body = ApiError)
    ),
    tag = "contents"
)]
pub async fn get_content_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<SlugQuery>,
) -> Result<Json<ContentResponse>, ApiError> {
    let repo = ContentRepository::new(Arc::new(state.db.clone()));
    let item = repo
        .find_by_slug(&slug, query.include_drafts.unwrap_or(false))
        .await?
        .ok_or_else(|| not_found("Content not found"))?;

    Ok(Json(embed(&repo, item).await?))
}

/// Fetch content by id
#[utoipa::path(
    get,
    path = "/api/v1/contents/{id}",
    params(("id" = Uuid, Path, description = "Content id")),
    responses(
        (status = 200, description = "Content document", body = ContentResponse),
        (status = 404, description = "Not found", body = ApiError)
    ),
    tag = "contents"
)]
pub async fn get_content(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ContentResponse>, ApiError> {
    let repo = ContentRepository::new(Arc::new(state.db.clone()));
    let item = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found("Content not found"))?;

    Ok(Json(embed(&repo, item).await?))
}

/// List version snapshots for a content document
#[utoipa::path(
    get,
    path = "/api/v1/contents/{id}/versions",
    params(("id" = Uuid, Path, description = "Content id")),
    responses(
        (status = 200, description = "Version snapshots, newest first", body = [content_version::Model]),
        (status = 404, description = "Not found", body = ApiError)
    ),
    tag = "contents"
)]
pub async fn list_content_versions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<content_version::Model>>, ApiError> {
    let repo = ContentRepository::new(Arc::new(state.db.clone()));
    if repo.find_by_id(id).await?.is_none() {
        return Err(not_found("Content not found"));
    }

    Ok(Json(repo.list_versions(id).await?))
}

/// Create a content document
#[utoipa::path(
    post,
    path = "/api/v1/contents",
    request_body = CreateContentRequest,
    responses(
        (status = 201, description = "Content created", body = ContentResponse),
        (status = 400, description = "Validation error", body = ApiError),
        (status = 404, description = "Category not found", body = ApiError),
        (status = 409, description = "Slug already in use", body = ApiError)
    ),
    tag = "contents"
)]
pub async fn create_content(
    State(state): State<AppState>,
    Json(payload): Json<CreateContentRequest>,
) -> Result<(StatusCode, Json<ContentResponse>), ApiError> {
    validate_slug(&payload.slug)?;

    let repo = ContentRepository::new(Arc::new(state.db.clone()));
    if let Some(category_id) = payload.category_id {
        if repo.find_category(category_id).await?.is_none() {
            return Err(not_found("Category not found"));
        }
    }

    let created = repo
        .create(NewContent {
            title: payload.title,
            slug: payload.slug,
            body: payload.body,
            content_type: payload.content_type,
            status: payload.status.unwrap_or(ContentStatus::Draft),
            excerpt: payload.excerpt,
            featured_image: payload.featured_image,
            author_id: payload.author_id,
            category_id: payload.category_id,
            tag_ids: payload.tag_ids,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(embed(&repo, created).await?)))
}

/// Update a content document
///
/// Writes exactly one version snapshot of the prior state in the same
/// transaction as the change.
#[utoipa::path(
    patch,
    path = "/api/v1/contents/{id}",
    params(("id" = Uuid, Path, description = "Content id")),
    request_body = UpdateContentRequest,
    responses(
        (status = 200, description = "Content updated", body = ContentResponse),
        (status = 400, description = "Validation error", body = ApiError),
        (status = 404, description = "Not found", body = ApiError),
        (status = 409, description = "Slug already in use", body = ApiError)
    ),
    tag = "contents"
)]
pub async fn update_content(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateContentRequest>,
) -> Result<Json<ContentResponse>, ApiError> {
    if let Some(ref slug) = payload.slug {
        validate_slug(slug)?;
    }

    let repo = ContentRepository::new(Arc::new(state.db.clone()));
    if let Some(Some(category_id)) = payload.category_id {
        if repo.find_category(category_id).await?.is_none() {
            return Err(not_found("Category not found"));
        }
    }

    let updated = repo
        .update(
            id,
            ContentChanges {
                title: payload.title,
                slug: payload.slug,
                body: payload.body,
                content_type: payload.content_type,
                status: payload.status,
                excerpt: payload.excerpt,
                featured_image: payload.featured_image,
                category_id: payload.category_id,
                tag_ids: payload.tag_ids,
            },
        )
        .await?
        .ok_or_else(|| not_found("Content not found"))?;

    Ok(Json(embed(&repo, updated).await?))
}

/// Publish a content document
#[utoipa::path(
    post,
    path = "/api/v1/contents/{id}/publish",
    params(("id" = Uuid, Path, description = "Content id")),
    responses(
        (status = 200, description = "Content published", body = ContentResponse),
        (status = 404, description = "Not found", body = ApiError)
    ),
    tag = "contents"
)]
pub async fn publish_content(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ContentResponse>, ApiError> {
    let repo = ContentRepository::new(Arc::new(state.db.clone()));
    let published = repo
        .publish(id)
        .await?
        .ok_or_else(|| not_found("Content not found"))?;

    Ok(Json(embed(&repo, published).await?))
}

/// Revert a content document to draft
///
/// `published_at` is intentionally left untouched as a record that the
/// document was once live.
#[utoipa::path(
    post,
    path = "/api/v1/contents/{id}/unpublish",
    params(("id" = Uuid, Path, description = "Content id")),
    responses(
        (status = 200, description = "Content reverted to draft", body = ContentResponse),
        (status = 404, description = "Not found", body = ApiError)
    ),
    tag = "contents"
)]
pub async fn unpublish_content(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ContentResponse>, ApiError> {
    let repo = ContentRepository::new(Arc::new(state.db.clone()));
    let reverted = repo
        .unpublish(id)
        .await?
        .ok_or_else(|| not_found("Content not found"))?;

    Ok(Json(embed(&repo, reverted).await?))
}

/// Soft-delete a content document
#[utoipa::path(
    delete,
    path = "/api/v1/contents/{id}",
    params(("id" = Uuid, Path, description = "Content id")),
    responses(
        (status = 204, description = "Content deleted"),
        (status = 404, description = "Not found", body = ApiError)
    ),
    tag = "contents"
)]
pub async fn delete_content(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = ContentRepository::new(Arc::new(state.db.clone()));
    if !repo.soft_delete(id).await? {
        return Err(not_found("Content not found"));
    }

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_pattern_accepts_kebab_case() {
        assert!(validate_slug("hello").is_ok());
        assert!(validate_slug("hello-world-2024").is_ok());
    }

    #[test]
    fn slug_pattern_rejects_invalid_shapes() {
        assert!(validate_slug("").is_err());
        assert!(validate_slug("Hello").is_err());
        assert!(validate_slug("-leading").is_err());
        assert!(validate_slug("trailing-").is_err());
        assert!(validate_slug("double--dash").is_err());
        assert!(validate_slug("under_score").is_err());
    }
}
