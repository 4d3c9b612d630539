//! Structured data template repository for database operations

use anyhow::Result;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::structured_data_template::{self, Entity as StructuredDataTemplate};

/// Fields for creating a template.
#[derive(Debug, Clone)]
pub struct NewTemplate {
    pub name: String,
    pub schema_type: String,
    pub template: serde_json::Value,
    pub is_global: bool,
    pub is_active: bool,
}

/// Partial update; `None` leaves a field untouched.
#[derive(Debug, Default, Clone)]
pub struct TemplateChanges {
    pub name: Option<String>,
    pub schema_type: Option<String>,
    pub template: Option<serde_json::Value>,
    pub is_global: Option<bool>,
    pub is_active: Option<bool>,
}

/// Repository for structured data template database operations
#[derive(Debug, Clone)]
pub struct StructuredDataRepository {
    pub db: Arc<DatabaseConnection>,
}

impl StructuredDataRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<structured_data_template::Model>> {
        let templates = StructuredDataTemplate::find()
            .filter(structured_data_template::Column::DeletedAt.is_null())
            .order_by_asc(structured_data_template::Column::Name)
            .all(&*self.db)
            .await?;
        Ok(templates)
    }

    /// Active global templates appended to every generated schema set.
    pub async fn list_active_global(&self) -> Result<Vec<structured_data_template::Model>> {
        let templates = StructuredDataTemplate::find()
            .filter(structured_data_template::Column::DeletedAt.is_null())
            .filter(structured_data_template::Column::IsActive.eq(true))
            .filter(structured_data_template::Column::IsGlobal.eq(true))
            .order_by_asc(structured_data_template::Column::Name)
            .all(&*self.db)
            .await?;
        Ok(templates)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<structured_data_template::Model>> {
        let template = StructuredDataTemplate::find_by_id(id)
            .filter(structured_data_template::Column::DeletedAt.is_null())
            .one(&*self.db)
            .await?;
        Ok(template)
    }

    pub async fn create(&self, input: NewTemplate) -> Result<structured_data_template::Model> {
        let now = Utc::now();
        let model = structured_data_template::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            schema_type: Set(input.schema_type),
            template: Set(input.template),
            is_global: Set(input.is_global),
            is_active: Set(input.is_active),
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
        changes: TemplateChanges,
    ) -> Result<Option<structured_data_template::Model>> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: structured_data_template::ActiveModel = existing.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(schema_type) = changes.schema_type {
            active.schema_type = Set(schema_type);
        }
        if let Some(template) = changes.template {
            active.template = Set(template);
        }
        if let Some(is_global) = changes.is_global {
            active.is_global = Set(is_global);
        }
        if let Some(is_active) = changes.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Utc::now().into());

        Ok(Some(active.update(&*self.db).await?))
    }
}
