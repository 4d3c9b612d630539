//! Site verification entity model
//!
//! Ownership-verification codes keyed by platform (unique among non-deleted
//! rows); rendered as meta tags in the page head.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::enums::VerificationPlatform;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "site_verifications")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub platform: VerificationPlatform,
    pub verification_code: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub meta_tag: Option<String>,
    pub is_verified: bool,
    pub verified_at: Option<chrono::DateTime<chrono::FixedOffset>>,
    pub last_checked: Option<chrono::DateTime<chrono::FixedOffset>>,
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
    pub updated_at: chrono::DateTime<chrono::FixedOffset>,
    pub deleted_at: Option<chrono::DateTime<chrono::FixedOffset>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
