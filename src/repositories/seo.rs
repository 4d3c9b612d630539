//! SEO metadata repository for database operations
//!
//! Metadata rows are one-to-one with content, so writes are an upsert keyed
//! by content id.

use anyhow::Result;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::seo_metadata::{self, Entity as SeoMetadata};

/// Full field set for an upsert; `None` clears nothing on insert and leaves
/// the column untouched on update only when the whole payload omits it (the
/// API treats the write as a document replace).
#[derive(Debug, Default, Clone)]
pub struct SeoMetadataInput {
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

/// Repository for SEO metadata database operations
#[derive(Debug, Clone)]
pub struct SeoMetadataRepository {
    pub db: Arc<DatabaseConnection>,
}

impl SeoMetadataRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn find_by_content_id(
        &self,
        content_id: Uuid,
    ) -> Result<Option<seo_metadata::Model>> {
        let row = SeoMetadata::find()
            .filter(seo_metadata::Column::ContentId.eq(content_id))
            .filter(seo_metadata::Column::DeletedAt.is_null())
            .one(&*self.db)
            .await?;
        Ok(row)
    }

    /// Creates or replaces the metadata document for a content row.
    pub async fn upsert(
        &self,
        content_id: Uuid,
        input: SeoMetadataInput,
    ) -> Result<seo_metadata::Model> {
        let now = Utc::now();

        if let Some(existing) = self.find_by_content_id(content_id).await? {
            let mut active: seo_metadata::ActiveModel = existing.into();
            active.meta_title = Set(input.meta_title);
            active.meta_description = Set(input.meta_description);
            active.meta_keywords = Set(input.meta_keywords);
            active.og_title = Set(input.og_title);
            active.og_description = Set(input.og_description);
            active.og_image = Set(input.og_image);
            active.og_type = Set(input.og_type);
            active.og_url = Set(input.og_url);
            active.og_site_name = Set(input.og_site_name);
            active.twitter_card = Set(input.twitter_card);
            active.twitter_site = Set(input.twitter_site);
            active.twitter_creator = Set(input.twitter_creator);
            active.twitter_image = Set(input.twitter_image);
            active.canonical_url = Set(input.canonical_url);
            active.hreflang = Set(input.hreflang);
            active.custom_meta = Set(input.custom_meta);
            active.updated_at = Set(now.into());
            return Ok(active.update(&*self.db).await?);
        }

        let model = seo_metadata::ActiveModel {
            id: Set(Uuid::new_v4()),
            content_id: Set(Some(content_id)),
            meta_title: Set(input.meta_title),
            meta_description: Set(input.meta_description),
            meta_keywords: Set(input.meta_keywords),
            og_title: Set(input.og_title),
            og_description: Set(input.og_description),
            og_image: Set(input.og_image),
            og_type: Set(input.og_type),
            og_url: Set(input.og_url),
            og_site_name: Set(input.og_site_name),
            twitter_card: Set(input.twitter_card),
            twitter_site: Set(input.twitter_site),
            twitter_creator: Set(input.twitter_creator),
            twitter_image: Set(input.twitter_image),
            canonical_url: Set(input.canonical_url),
            hreflang: Set(input.hreflang),
            custom_meta: Set(input.custom_meta),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            deleted_at: Set(None),
        }
        .insert(&*self.db)
        .await?;
        Ok(model)
    }
}
