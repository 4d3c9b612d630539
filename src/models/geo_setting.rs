//! Geo setting entity model
//!
//! Per-country locale configuration: hreflang defaults plus optional
//! regional schema/analytics overrides.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "geo_settings")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub country_code: String,
    pub language_code: String,
    pub region: Option<String>,
    pub timezone: Option<String>,
    pub currency: Option<String>,
    /// `{ "enabled": bool, "defaultLocale"?, "alternateLocales"? }`
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub hreflang_config: Option<Json>,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub regional_schema_overrides: Option<Json>,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub regional_analytics_overrides: Option<Json>,
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
    pub updated_at: chrono::DateTime<chrono::FixedOffset>,
    pub deleted_at: Option<chrono::DateTime<chrono::FixedOffset>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
