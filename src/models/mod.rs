//! # Data Models
//!
//! This module contains all the SeaORM entities used throughout the Sitekit API,
//! plus the shared string-backed enums they are typed with.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod analytics_config;
pub mod category;
pub mod content;
pub mod content_tag;
pub mod content_version;
pub mod custom_script;
pub mod enums;
pub mod feature_flag;
pub mod geo_setting;
pub mod media;
pub mod navigation_menu;
pub mod seo_metadata;
pub mod site_verification;
pub mod structured_data_template;
pub mod tag;

pub use analytics_config::Entity as AnalyticsConfig;
pub use category::Entity as Category;
pub use content::Entity as Content;
pub use content_tag::Entity as ContentTag;
pub use content_version::Entity as ContentVersion;
pub use custom_script::Entity as CustomScript;
pub use enums::{
    AnalyticsPlatform, ContentStatus, ContentType, Environment, MenuLocation, ScriptPosition,
    StorageType, VerificationPlatform,
};
pub use feature_flag::Entity as FeatureFlag;
pub use geo_setting::Entity as GeoSetting;
pub use media::Entity as Media;
pub use navigation_menu::Entity as NavigationMenu;
pub use seo_metadata::Entity as SeoMetadata;
pub use site_verification::Entity as SiteVerification;
pub use structured_data_template::Entity as StructuredDataTemplate;
pub use tag::Entity as Tag;

/// Basic service information response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    /// The name of the service
    pub service: String,
    /// The version of the service
    pub version: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            service: "sitekit".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
