//! Analytics config entity model
//!
//! One row per third-party analytics integration (GTM container, GA4
//! property, pixel, ...). Rows are filtered by `is_active` and environment
//! at page render time and ordered by `priority` ascending.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::enums::{AnalyticsPlatform, Environment};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "analytics_configs")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub platform: AnalyticsPlatform,
    pub name: String,
    pub tracking_id: String,
    pub is_active: bool,
    pub environment: Environment,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub additional_config: Option<Json>,
    pub priority: i32,
    pub created_by_user_id: Option<String>,
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
    pub updated_at: chrono::DateTime<chrono::FixedOffset>,
    pub deleted_at: Option<chrono::DateTime<chrono::FixedOffset>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
