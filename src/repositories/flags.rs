//! Feature flag repository for database operations
//!
//! Flag names are unique among non-deleted rows; environment scoping is a
//! read-time filter where `all` matches every environment.

use anyhow::Result;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::enums::Environment;
use crate::models::feature_flag::{self, Entity as FeatureFlag};

/// Fields for creating a feature flag.
#[derive(Debug, Clone)]
pub struct NewFeatureFlag {
    pub flag_name: String,
    pub description: Option<String>,
    pub is_enabled: bool,
    pub environment: Environment,
}

/// Partial update; `None` leaves a field untouched.
#[derive(Debug, Default, Clone)]
pub struct FeatureFlagChanges {
    pub description: Option<Option<String>>,
    pub is_enabled: Option<bool>,
    pub environment: Option<Environment>,
}

/// Repository for feature flag database operations
#[derive(Debug, Clone)]
pub struct FeatureFlagRepository {
    pub db: Arc<DatabaseConnection>,
}

impl FeatureFlagRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Lists non-deleted flags, optionally scoped to `environment` (or `all`).
    pub async fn list(&self, environment: Option<Environment>) -> Result<Vec<feature_flag::Model>> {
        let mut query = FeatureFlag::find().filter(feature_flag::Column::DeletedAt.is_null());

        if let Some(env) = environment {
            query = query.filter(feature_flag::Column::Environment.is_in([env, Environment::All]));
        }

        let flags = query
            .order_by_asc(feature_flag::Column::FlagName)
            .all(&*self.db)
            .await?;
        Ok(flags)
    }

    /// Finds a flag by name within an environment scope. A row scoped to a
    /// different concrete environment is not visible here.
    pub async fn find_by_name(
        &self,
        flag_name: &str,
        environment: Option<Environment>,
    ) -> Result<Option<feature_flag::Model>> {
        let mut query = FeatureFlag::find()
            .filter(feature_flag::Column::FlagName.eq(flag_name))
            .filter(feature_flag::Column::DeletedAt.is_null());

        if let Some(env) = environment {
            query = query.filter(feature_flag::Column::Environment.is_in([env, Environment::All]));
        }

        let flag = query.one(&*self.db).await?;
        Ok(flag)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<feature_flag::Model>> {
        let flag = FeatureFlag::find_by_id(id)
            .filter(feature_flag::Column::DeletedAt.is_null())
            .one(&*self.db)
            .await?;
        Ok(flag)
    }

    pub async fn create(&self, input: NewFeatureFlag) -> Result<feature_flag::Model> {
        let now = Utc::now();
        let model = feature_flag::ActiveModel {
            id: Set(Uuid::new_v4()),
            flag_name: Set(input.flag_name),
            description: Set(input.description),
            is_enabled: Set(input.is_enabled),
            environment: Set(input.environment),
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
        changes: FeatureFlagChanges,
    ) -> Result<Option<feature_flag::Model>> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: feature_flag::ActiveModel = existing.into();
        if let Some(description) = changes.description {
            active.description = Set(description);
        }
        if let Some(is_enabled) = changes.is_enabled {
            active.is_enabled = Set(is_enabled);
        }
        if let Some(environment) = changes.environment {
            active.environment = Set(environment);
        }
        active.updated_at = Set(Utc::now().into());

        Ok(Some(active.update(&*self.db).await?))
    }

    /// Sets `is_enabled` on the flag matching `(flag_name, environment ∈
    /// {environment, all})`. Without an environment the name alone selects
    /// the flag, whatever its scope. Returns `None` when no row matches,
    /// which callers surface as a 404 rather than touching a foreign
    /// environment's flag.
    pub async fn toggle(
        &self,
        flag_name: &str,
        is_enabled: bool,
        environment: Option<Environment>,
    ) -> Result<Option<feature_flag::Model>> {
        let Some(existing) = self.find_by_name(flag_name, environment).await? else {
            return Ok(None);
        };

        let mut active: feature_flag::ActiveModel = existing.into();
        active.is_enabled = Set(is_enabled);
        active.updated_at = Set(Utc::now().into());

        Ok(Some(active.update(&*self.db).await?))
    }
}
