//! Analytics config repository for database operations
//!
//! Encapsulates SeaORM operations for the analytics_configs table. Rows are
//! soft-deleted and listed in injection order (`priority ASC, created_at
//! ASC`).

use anyhow::Result;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::analytics_config::{self, Entity as AnalyticsConfig};
use crate::models::enums::{AnalyticsPlatform, Environment};

/// Fields for creating an analytics config.
#[derive(Debug, Clone)]
pub struct NewAnalyticsConfig {
    pub platform: AnalyticsPlatform,
    pub name: String,
    pub tracking_id: String,
    pub is_active: bool,
    pub environment: Environment,
    pub additional_config: Option<serde_json::Value>,
    pub priority: i32,
    pub created_by_user_id: Option<String>,
}

/// Partial update; `None` leaves a field untouched.
#[derive(Debug, Default, Clone)]
pub struct AnalyticsConfigChanges {
    pub platform: Option<AnalyticsPlatform>,
    pub name: Option<String>,
    pub tracking_id: Option<String>,
    pub is_active: Option<bool>,
    pub environment: Option<Environment>,
    pub additional_config: Option<Option<serde_json::Value>>,
    pub priority: Option<i32>,
}

/// Repository for analytics config database operations
#[derive(Debug, Clone)]
pub struct AnalyticsConfigRepository {
    pub db: Arc<DatabaseConnection>,
}

impl AnalyticsConfigRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Lists non-deleted configs in injection order, optionally restricted to
    /// active rows and to rows scoped to `environment` (or `all`).
    pub async fn list(
        &self,
        active_only: bool,
        environment: Option<Environment>,
    ) -> Result<Vec<analytics_config::Model>> {
        let mut query =
            AnalyticsConfig::find().filter(analytics_config::Column::DeletedAt.is_null());

        if active_only {
            query = query.filter(analytics_config::Column::IsActive.eq(true));
        }
        if let Some(env) = environment {
            query = query
                .filter(analytics_config::Column::Environment.is_in([env, Environment::All]));
        }

        let configs = query
            .order_by_asc(analytics_config::Column::Priority)
            .order_by_asc(analytics_config::Column::CreatedAt)
            .all(&*self.db)
            .await?;
        Ok(configs)
    }

    /// Active configs for one environment, used by the render-plan loader.
    pub async fn list_active_for_environment(
        &self,
        environment: Environment,
    ) -> Result<Vec<analytics_config::Model>> {
        self.list(true, Some(environment)).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<analytics_config::Model>> {
        let config = AnalyticsConfig::find_by_id(id)
            .filter(analytics_config::Column::DeletedAt.is_null())
            .one(&*self.db)
            .await?;
        Ok(config)
    }

    pub async fn create(&self, input: NewAnalyticsConfig) -> Result<analytics_config::Model> {
        let now = Utc::now();
        let model = analytics_config::ActiveModel {
            id: Set(Uuid::new_v4()),
            platform: Set(input.platform),
            name: Set(input.name),
            tracking_id: Set(input.tracking_id),
            is_active: Set(input.is_active),
            environment: Set(input.environment),
            additional_config: Set(input.additional_config),
            priority: Set(input.priority),
            created_by_user_id: Set(input.created_by_user_id),
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
        changes: AnalyticsConfigChanges,
    ) -> Result<Option<analytics_config::Model>> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: analytics_config::ActiveModel = existing.into();
        if let Some(platform) = changes.platform {
            active.platform = Set(platform);
        }
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(tracking_id) = changes.tracking_id {
            active.tracking_id = Set(tracking_id);
        }
        if let Some(is_active) = changes.is_active {
            active.is_active = Set(is_active);
        }
        if let Some(environment) = changes.environment {
            active.environment = Set(environment);
        }
        if let Some(additional_config) = changes.additional_config {
            active.additional_config = Set(additional_config);
        }
        if let Some(priority) = changes.priority {
            active.priority = Set(priority);
        }
        active.updated_at = Set(Utc::now().into());

        Ok(Some(active.update(&*self.db).await?))
    }

    pub async fn soft_delete(&self, id: Uuid) -> Result<bool> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(false);
        };

        let mut active: analytics_config::ActiveModel = existing.into();
        active.deleted_at = Set(Some(Utc::now().into()));
        active.update(&*self.db).await?;
        Ok(true)
    }
}
