//! Media repository for database operations

use anyhow::Result;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::enums::StorageType;
use crate::models::media::{self, Entity as Media};

/// Fields for recording an uploaded file.
#[derive(Debug, Clone)]
pub struct NewMedia {
    pub filename: String,
    pub url: String,
    pub mime_type: Option<String>,
    pub file_size: Option<i64>,
    pub alt_text: Option<String>,
    pub caption: Option<String>,
    pub title: Option<String>,
    pub storage_type: StorageType,
    pub uploaded_by_user_id: String,
}

/// Repository for media database operations
#[derive(Debug, Clone)]
pub struct MediaRepository {
    pub db: Arc<DatabaseConnection>,
}

impl MediaRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Lists non-deleted media, newest first, with the total match count.
    pub async fn list(&self, limit: u64, offset: u64) -> Result<(Vec<media::Model>, u64)> {
        let query = Media::find().filter(media::Column::DeletedAt.is_null());

        let total = query.clone().count(&*self.db).await?;
        let items = query
            .order_by_desc(media::Column::CreatedAt)
            .limit(limit)
            .offset(offset)
            .all(&*self.db)
            .await?;
        Ok((items, total))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<media::Model>> {
        let item = Media::find_by_id(id)
            .filter(media::Column::DeletedAt.is_null())
            .one(&*self.db)
            .await?;
        Ok(item)
    }

    pub async fn create(&self, input: NewMedia) -> Result<media::Model> {
        let now = Utc::now();
        let model = media::ActiveModel {
            id: Set(Uuid::new_v4()),
            filename: Set(input.filename),
            url: Set(input.url),
            mime_type: Set(input.mime_type),
            file_size: Set(input.file_size),
            width: Set(None),
            height: Set(None),
            alt_text: Set(input.alt_text),
            caption: Set(input.caption),
            title: Set(input.title),
            metadata: Set(None),
            storage_type: Set(input.storage_type),
            uploaded_by_user_id: Set(input.uploaded_by_user_id),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            deleted_at: Set(None),
        }
        .insert(&*self.db)
        .await?;
        Ok(model)
    }

    pub async fn soft_delete(&self, id: Uuid) -> Result<bool> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(false);
        };

        let mut active: media::ActiveModel = existing.into();
        active.deleted_at = Set(Some(Utc::now().into()));
        active.update(&*self.db).await?;
        Ok(true)
    }
}
