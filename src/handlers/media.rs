//! # Media API Handlers
//!
//! Multipart upload plus listing and soft delete. Files land in the primary
//! object store when one is configured, with local disk as the fallback.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::Json,
};
use bytes::Bytes;
use std::sync::Arc;
use uuid::Uuid;

use super::types::{PageQuery, PaginatedResponse};
use crate::auth::CurrentUser;
use crate::error::{ApiError, not_found, validation_error};
use crate::models::media;
use crate::repositories::MediaRepository;
use crate::repositories::media::NewMedia;
use crate::server::AppState;
use crate::storage::object_key;

struct UploadedFile {
    filename: String,
    data: Bytes,
    content_type: Option<String>,
}

/// List media records
#[utoipa::path(
    get,
    path = "/api/v1/media",
    params(PageQuery),
    responses(
        (status = 200, description = "Paginated media list", body = PaginatedResponse<media::Model>)
    ),
    tag = "media"
)]
pub async fn list_media(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Result<Json<PaginatedResponse<media::Model>>, ApiError> {
    let (limit, offset) = page.resolve()?;
    let repo = MediaRepository::new(Arc::new(state.db.clone()));
    let (items, total) = repo.list(limit, offset).await?;
    Ok(Json(PaginatedResponse::new(items, limit, offset, total)))
}

/// Fetch a media record
#[utoipa::path(
    get,
    path = "/api/v1/media/{id}",
    params(("id" = Uuid, Path, description = "Media id")),
    responses(
        (status = 200, description = "Media record", body = media::Model),
        (status = 404, description = "Not found", body = ApiError)
    ),
    tag = "media"
)]
pub async fn get_media(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<media::Model>, ApiError> {
    let repo = MediaRepository::new(Arc::new(state.db.clone()));
    let item = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found("Media not found"))?;
    Ok(Json(item))
}

/// Upload a file
///
/// Multipart form: a required `file` part plus optional `altText`,
/// `caption` and `title` text parts.
#[utoipa::path(
    post,
    path = "/api/v1/media/upload",
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Media stored", body = media::Model),
        (status = 400, description = "Missing or invalid file part", body = ApiError),
        (status = 401, description = "Unauthorized", body = ApiError)
    ),
    tag = "media"
)]
pub async fn upload_media(
    State(state): State<AppState>,
    user: CurrentUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<media::Model>), ApiError> {
    let mut file: Option<UploadedFile> = None;
    let mut alt_text = None;
    let mut caption = None;
    let mut title = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        match field.name() {
            Some("file") => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().map(|ct| ct.to_string());
                let data = field.bytes().await.map_err(multipart_error)?;
                file = Some(UploadedFile {
                    filename,
                    data,
                    content_type,
                });
            }
            Some("altText") => alt_text = Some(field.text().await.map_err(multipart_error)?),
            Some("caption") => caption = Some(field.text().await.map_err(multipart_error)?),
            Some("title") => title = Some(field.text().await.map_err(multipart_error)?),
            _ => {}
        }
    }

    let Some(file) = file else {
        return Err(validation_error(
            "file part is required",
            serde_json::json!({ "file": "multipart field is missing" }),
        ));
    };
    if file.data.is_empty() {
        return Err(validation_error(
            "file part is empty",
            serde_json::json!({ "file": "uploaded file has no content" }),
        ));
    }

    // Client-declared type wins; fall back to the filename extension.
    let content_type = file.content_type.clone().unwrap_or_else(|| {
        mime_guess::from_path(&file.filename)
            .first_or_octet_stream()
            .to_string()
    });

    let key = object_key(&file.filename);
    let file_size = file.data.len() as i64;
    let stored = state
        .storage
        .store(&key, file.data, &content_type)
        .await
        .map_err(anyhow::Error::from)?;

    let repo = MediaRepository::new(Arc::new(state.db.clone()));
    let created = repo
        .create(NewMedia {
            filename: file.filename,
            url: stored.url,
            mime_type: Some(content_type),
            file_size: Some(file_size),
            alt_text,
            caption,
            title,
            storage_type: stored.storage_type,
            uploaded_by_user_id: user.id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Soft-delete a media record
#[utoipa::path(
    delete,
    path = "/api/v1/media/{id}",
    params(("id" = Uuid, Path, description = "Media id")),
    responses(
        (status = 204, description = "Media deleted"),
        (status = 404, description = "Not found", body = ApiError)
    ),
    tag = "media"
)]
pub async fn delete_media(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = MediaRepository::new(Arc::new(state.db.clone()));
    if !repo.soft_delete(id).await? {
        return Err(not_found("Media not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}

fn multipart_error(error: axum::extract::multipart::MultipartError) -> ApiError {
    validation_error(
        "Invalid multipart payload",
        serde_json::json!({ "body": error.to_string() }),
    )
}
