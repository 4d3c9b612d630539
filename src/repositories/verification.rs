//! Site verification repository for database operations
//!
//! Verifications are keyed by platform (unique among non-deleted rows), so
//! create is an upsert. A changed verification code resets the verified
//! state.

use anyhow::Result;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::enums::VerificationPlatform;
use crate::models::site_verification::{self, Entity as SiteVerification};

/// Partial update; `None` leaves a field untouched.
#[derive(Debug, Default, Clone)]
pub struct SiteVerificationChanges {
    pub verification_code: Option<String>,
    pub meta_tag: Option<Option<String>>,
    pub is_verified: Option<bool>,
}

/// Repository for site verification database operations
#[derive(Debug, Clone)]
pub struct SiteVerificationRepository {
    pub db: Arc<DatabaseConnection>,
}

impl SiteVerificationRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Lists non-deleted verifications ordered by platform.
    pub async fn list(&self) -> Result<Vec<site_verification::Model>> {
        let rows = SiteVerification::find()
            .filter(site_verification::Column::DeletedAt.is_null())
            .order_by_asc(site_verification::Column::Platform)
            .all(&*self.db)
            .await?;
        Ok(rows)
    }

    pub async fn find_by_platform(
        &self,
        platform: VerificationPlatform,
    ) -> Result<Option<site_verification::Model>> {
        let row = SiteVerification::find()
            .filter(site_verification::Column::Platform.eq(platform))
            .filter(site_verification::Column::DeletedAt.is_null())
            .one(&*self.db)
            .await?;
        Ok(row)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<site_verification::Model>> {
        let row = SiteVerification::find_by_id(id)
            .filter(site_verification::Column::DeletedAt.is_null())
            .one(&*self.db)
            .await?;
        Ok(row)
    }

    /// Creates or replaces the verification for a platform. A new code resets
    /// the verified state.
    pub async fn upsert(
        &self,
        platform: VerificationPlatform,
        verification_code: String,
        meta_tag: Option<String>,
    ) -> Result<site_verification::Model> {
        let now = Utc::now();

        if let Some(existing) = self.find_by_platform(platform).await? {
            let code_changed = existing.verification_code != verification_code;
            let mut active: site_verification::ActiveModel = existing.into();
            active.verification_code = Set(verification_code);
            active.meta_tag = Set(meta_tag);
            if code_changed {
                active.is_verified = Set(false);
                active.verified_at = Set(None);
            }
            active.updated_at = Set(now.into());
            return Ok(active.update(&*self.db).await?);
        }

        let model = site_verification::ActiveModel {
            id: Set(Uuid::new_v4()),
            platform: Set(platform),
            verification_code: Set(verification_code),
            meta_tag: Set(meta_tag),
            is_verified: Set(false),
            verified_at: Set(None),
            last_checked: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            deleted_at: Set(None),
        }
        .insert(&*self.db)
        .await?;
        Ok(model)
    }

    pub async fn update(
        &self,
        id: Uuid,
        changes: SiteVerificationChanges,
    ) -> Result<Option<site_verification::Model>> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: site_verification::ActiveModel = existing.into();
        if let Some(code) = changes.verification_code {
            active.verification_code = Set(code);
        }
        if let Some(meta_tag) = changes.meta_tag {
            active.meta_tag = Set(meta_tag);
        }
        if let Some(is_verified) = changes.is_verified {
            active.is_verified = Set(is_verified);
        }
        active.updated_at = Set(Utc::now().into());

        Ok(Some(active.update(&*self.db).await?))
    }

    /// Marks a platform as verified and stamps the check timestamps.
    pub async fn mark_verified(
        &self,
        platform: VerificationPlatform,
    ) -> Result<Option<site_verification::Model>> {
        let Some(existing) = self.find_by_platform(platform).await? else {
            return Ok(None);
        };

        let now = Utc::now();
        let mut active: site_verification::ActiveModel = existing.into();
        active.is_verified = Set(true);
        active.verified_at = Set(Some(now.into()));
        active.last_checked = Set(Some(now.into()));
        active.updated_at = Set(now.into());

        Ok(Some(active.update(&*self.db).await?))
    }
}
