//! Shared string-backed enums for entity columns and query parameters.
//!
//! All enums are stored as short strings so the same schema works on both
//! Postgres and SQLite. The serde representations match the wire format the
//! admin frontend uses (kebab-case script positions, SCREAMING platform
//! names, lowercase everything else).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Kind of content document.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[sea_orm(string_value = "blog")]
    Blog,
    #[sea_orm(string_value = "page")]
    Page,
    #[sea_orm(string_value = "docs")]
    Docs,
    #[sea_orm(string_value = "changelog")]
    Changelog,
}

impl ContentType {
    /// URL path segment used for public routes and the sitemap.
    pub fn path_segment(&self) -> &'static str {
        match self {
            ContentType::Blog => "blog",
            ContentType::Page => "page",
            ContentType::Docs => "docs",
            ContentType::Changelog => "changelog",
        }
    }
}

/// Editorial state of a content document.
///
/// The only guarded transition is publish/unpublish: publishing stamps
/// `published_at`, unpublishing resets the status to draft.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "review")]
    Review,
    #[sea_orm(string_value = "published")]
    Published,
    #[sea_orm(string_value = "archived")]
    Archived,
}

/// Deployment stage a config row applies to. `All` is the sentinel that
/// matches every environment filter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[sea_orm(string_value = "production")]
    Production,
    #[sea_orm(string_value = "staging")]
    Staging,
    #[sea_orm(string_value = "development")]
    Development,
    #[sea_orm(string_value = "all")]
    All,
}

/// Third-party analytics integration kind.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(30))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnalyticsPlatform {
    #[sea_orm(string_value = "GTM")]
    Gtm,
    #[sea_orm(string_value = "GA4")]
    Ga4,
    #[sea_orm(string_value = "FACEBOOK_PIXEL")]
    FacebookPixel,
    #[sea_orm(string_value = "PINTEREST_TAG")]
    PinterestTag,
    #[sea_orm(string_value = "YANDEX_METRICA")]
    YandexMetrica,
    #[sea_orm(string_value = "CUSTOM")]
    Custom,
}

/// Search-engine / social platform a site-ownership verification code
/// belongs to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationPlatform {
    #[sea_orm(string_value = "GOOGLE")]
    Google,
    #[sea_orm(string_value = "BING")]
    Bing,
    #[sea_orm(string_value = "YANDEX")]
    Yandex,
    #[sea_orm(string_value = "FACEBOOK")]
    Facebook,
    #[sea_orm(string_value = "PINTEREST")]
    Pinterest,
}

/// Document slot an admin-authored script is injected into.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ScriptPosition {
    #[sea_orm(string_value = "head-start")]
    #[serde(rename = "head-start")]
    HeadStart,
    #[sea_orm(string_value = "head-end")]
    #[serde(rename = "head-end")]
    HeadEnd,
    #[sea_orm(string_value = "body-start")]
    #[serde(rename = "body-start")]
    BodyStart,
    #[sea_orm(string_value = "body-end")]
    #[serde(rename = "body-end")]
    BodyEnd,
}

/// Site region a navigation menu renders in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum MenuLocation {
    #[sea_orm(string_value = "header")]
    Header,
    #[sea_orm(string_value = "footer")]
    Footer,
    #[sea_orm(string_value = "sidebar")]
    Sidebar,
    #[sea_orm(string_value = "mobile")]
    Mobile,
}

/// Backend a media object was persisted to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    #[sea_orm(string_value = "s3")]
    S3,
    #[sea_orm(string_value = "local")]
    Local,
}
