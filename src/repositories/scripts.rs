//! Custom script repository for database operations
//!
//! Scripts live in one of four document slots; listings come back in
//! injection order (`priority ASC, created_at ASC`).

use anyhow::Result;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::custom_script::{self, Entity as CustomScript};
use crate::models::enums::{Environment, ScriptPosition};

/// Fields for creating a custom script.
#[derive(Debug, Clone)]
pub struct NewCustomScript {
    pub name: String,
    pub script_content: String,
    pub position: ScriptPosition,
    pub target_pages: Option<serde_json::Value>,
    pub content_types: Option<serde_json::Value>,
    pub priority: i32,
    pub is_active: bool,
    pub environment: Environment,
    pub created_by_user_id: Option<String>,
}

/// Partial update; `None` leaves a field untouched.
#[derive(Debug, Default, Clone)]
pub struct CustomScriptChanges {
    pub name: Option<String>,
    pub script_content: Option<String>,
    pub position: Option<ScriptPosition>,
    pub target_pages: Option<Option<serde_json::Value>>,
    pub content_types: Option<Option<serde_json::Value>>,
    pub priority: Option<i32>,
    pub is_active: Option<bool>,
    pub environment: Option<Environment>,
}

/// Repository for custom script database operations
#[derive(Debug, Clone)]
pub struct CustomScriptRepository {
    pub db: Arc<DatabaseConnection>,
}

impl CustomScriptRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Lists non-deleted scripts in injection order with optional filters.
    pub async fn list(
        &self,
        active_only: bool,
        position: Option<ScriptPosition>,
        environment: Option<Environment>,
    ) -> Result<Vec<custom_script::Model>> {
        let mut query = CustomScript::find().filter(custom_script::Column::DeletedAt.is_null());

        if active_only {
            query = query.filter(custom_script::Column::IsActive.eq(true));
        }
        if let Some(position) = position {
            query = query.filter(custom_script::Column::Position.eq(position));
        }
        if let Some(env) = environment {
            query =
                query.filter(custom_script::Column::Environment.is_in([env, Environment::All]));
        }

        let scripts = query
            .order_by_asc(custom_script::Column::Priority)
            .order_by_asc(custom_script::Column::CreatedAt)
            .all(&*self.db)
            .await?;
        Ok(scripts)
    }

    /// Active scripts for one environment, used by the render-plan loader.
    pub async fn list_active_for_environment(
        &self,
        environment: Environment,
    ) -> Result<Vec<custom_script::Model>> {
        self.list(true, None, Some(environment)).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<custom_script::Model>> {
        let script = CustomScript::find_by_id(id)
            .filter(custom_script::Column::DeletedAt.is_null())
            .one(&*self.db)
            .await?;
        Ok(script)
    }

    pub async fn create(&self, input: NewCustomScript) -> Result<custom_script::Model> {
        let now = Utc::now();
        let model = custom_script::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            script_content: Set(input.script_content),
            position: Set(input.position),
            target_pages: Set(input.target_pages),
            content_types: Set(input.content_types),
            priority: Set(input.priority),
            is_active: Set(input.is_active),
            environment: Set(input.environment),
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
        changes: CustomScriptChanges,
    ) -> Result<Option<custom_script::Model>> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: custom_script::ActiveModel = existing.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(script_content) = changes.script_content {
            active.script_content = Set(script_content);
        }
        if let Some(position) = changes.position {
            active.position = Set(position);
        }
        if let Some(target_pages) = changes.target_pages {
            active.target_pages = Set(target_pages);
        }
        if let Some(content_types) = changes.content_types {
            active.content_types = Set(content_types);
        }
        if let Some(priority) = changes.priority {
            active.priority = Set(priority);
        }
        if let Some(is_active) = changes.is_active {
            active.is_active = Set(is_active);
        }
        if let Some(environment) = changes.environment {
            active.environment = Set(environment);
        }
        active.updated_at = Set(Utc::now().into());

        Ok(Some(active.update(&*self.db).await?))
    }

    pub async fn soft_delete(&self, id: Uuid) -> Result<bool> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(false);
        };

        let mut active: custom_script::ActiveModel = existing.into();
        active.deleted_at = Set(Some(Utc::now().into()));
        active.update(&*self.db).await?;
        Ok(true)
    }
}
