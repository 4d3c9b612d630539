//! Geo settings repository for database operations

use anyhow::Result;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::geo_setting::{self, Entity as GeoSetting};

/// Fields for creating a geo setting.
#[derive(Debug, Clone)]
pub struct NewGeoSetting {
    pub country_code: String,
    pub language_code: String,
    pub region: Option<String>,
    pub timezone: Option<String>,
    pub currency: Option<String>,
    pub hreflang_config: Option<serde_json::Value>,
    pub regional_schema_overrides: Option<serde_json::Value>,
    pub regional_analytics_overrides: Option<serde_json::Value>,
}

/// Partial update; `None` leaves a field untouched.
#[derive(Debug, Default, Clone)]
pub struct GeoSettingChanges {
    pub language_code: Option<String>,
    pub region: Option<Option<String>>,
    pub timezone: Option<Option<String>>,
    pub currency: Option<Option<String>>,
    pub hreflang_config: Option<Option<serde_json::Value>>,
    pub regional_schema_overrides: Option<Option<serde_json::Value>>,
    pub regional_analytics_overrides: Option<Option<serde_json::Value>>,
}

/// Repository for geo setting database operations
#[derive(Debug, Clone)]
pub struct GeoSettingRepository {
    pub db: Arc<DatabaseConnection>,
}

impl GeoSettingRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<geo_setting::Model>> {
        let settings = GeoSetting::find()
            .filter(geo_setting::Column::DeletedAt.is_null())
            .order_by_asc(geo_setting::Column::CountryCode)
            .all(&*self.db)
            .await?;
        Ok(settings)
    }

    /// Looks up by ISO country code (stored uppercase).
    pub async fn find_by_country_code(&self, code: &str) -> Result<Option<geo_setting::Model>> {
        let setting = GeoSetting::find()
            .filter(geo_setting::Column::CountryCode.eq(code.to_uppercase()))
            .filter(geo_setting::Column::DeletedAt.is_null())
            .one(&*self.db)
            .await?;
        Ok(setting)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<geo_setting::Model>> {
        let setting = GeoSetting::find_by_id(id)
            .filter(geo_setting::Column::DeletedAt.is_null())
            .one(&*self.db)
            .await?;
        Ok(setting)
    }

    pub async fn create(&self, input: NewGeoSetting) -> Result<geo_setting::Model> {
        let now = Utc::now();
        let model = geo_setting::ActiveModel {
            id: Set(Uuid::new_v4()),
            country_code: Set(input.country_code.to_uppercase()),
            language_code: Set(input.language_code.to_lowercase()),
            region: Set(input.region),
            timezone: Set(input.timezone),
            currency: Set(input.currency),
            hreflang_config: Set(input.hreflang_config),
            regional_schema_overrides: Set(input.regional_schema_overrides),
            regional_analytics_overrides: Set(input.regional_analytics_overrides),
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
        changes: GeoSettingChanges,
    ) -> Result<Option<geo_setting::Model>> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: geo_setting::ActiveModel = existing.into();
        if let Some(language_code) = changes.language_code {
            active.language_code = Set(language_code.to_lowercase());
        }
        if let Some(region) = changes.region {
            active.region = Set(region);
        }
        if let Some(timezone) = changes.timezone {
            active.timezone = Set(timezone);
        }
        if let Some(currency) = changes.currency {
            active.currency = Set(currency);
        }
        if let Some(hreflang_config) = changes.hreflang_config {
            active.hreflang_config = Set(hreflang_config);
        }
        if let Some(overrides) = changes.regional_schema_overrides {
            active.regional_schema_overrides = Set(overrides);
        }
        if let Some(overrides) = changes.regional_analytics_overrides {
            active.regional_analytics_overrides = Set(overrides);
        }
        active.updated_at = Set(Utc::now().into());

        Ok(Some(active.update(&*self.db).await?))
    }
}
