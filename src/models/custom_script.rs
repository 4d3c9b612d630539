//! Custom script entity model
//!
//! Admin-authored script snippets injected into one of four document slots.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::enums::{Environment, ScriptPosition};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "custom_scripts")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub script_content: String,
    pub position: ScriptPosition,
    /// `{ "type": "all" | "specific", "paths": [...] }`
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub target_pages: Option<Json>,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub content_types: Option<Json>,
    /// Lower values inject first within a slot
    pub priority: i32,
    pub is_active: bool,
    pub environment: Environment,
    pub created_by_user_id: Option<String>,
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
    pub updated_at: chrono::DateTime<chrono::FixedOffset>,
    pub deleted_at: Option<chrono::DateTime<chrono::FixedOffset>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
