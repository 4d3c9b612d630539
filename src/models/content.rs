//! Content entity model
//!
//! A content document (blog post, page, docs entry or changelog note) with a
//! unique slug, a 4-state editorial status and soft-delete semantics. Tags
//! are attached through the `content_tags` join table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::enums::{ContentStatus, ContentType};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "contents")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    /// Unique among non-deleted rows
    pub slug: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub content_type: ContentType,
    pub status: ContentStatus,
    pub published_at: Option<chrono::DateTime<chrono::FixedOffset>>,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    /// Estimated minutes to read, ceil(word count / 200)
    pub reading_time: i32,
    /// User id issued by the external auth service
    pub author_id: String,
    pub category_id: Option<Uuid>,
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
    pub updated_at: chrono::DateTime<chrono::FixedOffset>,
    pub deleted_at: Option<chrono::DateTime<chrono::FixedOffset>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
    #[sea_orm(has_many = "super::content_version::Entity")]
    Versions,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::content_version::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Versions.def()
    }
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        super::content_tag::Relation::Tag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::content_tag::Relation::Content.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
