//! # Repository Layer
//!
//! This module contains repository implementations that encapsulate SeaORM
//! operations for database entities, providing a clean API for data access
//! with soft-delete-aware methods.

pub mod analytics;
pub mod content;
pub mod flags;
pub mod geo;
pub mod media;
pub mod navigation;
pub mod scripts;
pub mod seo;
pub mod structured_data;
pub mod verification;

pub use analytics::AnalyticsConfigRepository;
pub use content::ContentRepository;
pub use flags::FeatureFlagRepository;
pub use geo::GeoSettingRepository;
pub use media::MediaRepository;
pub use navigation::NavigationRepository;
pub use scripts::CustomScriptRepository;
pub use seo::SeoMetadataRepository;
pub use structured_data::StructuredDataRepository;
pub use verification::SiteVerificationRepository;
