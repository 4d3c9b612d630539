//! Feature flag seeding functionality
//!
//! Ensures the built-in flags the site relies on exist before the server
//! starts taking traffic. Seeding is idempotent: an existing flag is left
//! untouched, including any operator-made changes to its enabled state.

use anyhow::Result;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::models::enums::Environment;
use crate::repositories::FeatureFlagRepository;
use crate::repositories::flags::NewFeatureFlag;
use crate::runtime_config::ENABLE_ANALYTICS_FLAG;

/// Seeds the feature flags the rendering pipeline depends on
pub async fn seed_feature_flags(db: &DatabaseConnection) -> Result<()> {
    let repo = FeatureFlagRepository::new(Arc::new(db.clone()));

    let defaults = vec![NewFeatureFlag {
        flag_name: ENABLE_ANALYTICS_FLAG.to_string(),
        description: Some("Master switch for analytics script injection".to_string()),
        is_enabled: true,
        environment: Environment::All,
    }];

    for flag in defaults {
        match repo.find_by_name(&flag.flag_name, None).await {
            Ok(Some(_)) => {
                log::info!("Feature flag '{}' already exists, skipping", flag.flag_name);
            }
            Ok(None) => {
                let name = flag.flag_name.clone();
                match repo.create(flag).await {
                    Ok(_) => log::info!("Seeded feature flag '{}'", name),
                    Err(e) => {
                        log::error!("Failed to seed feature flag '{}': {}", name, e);
                        return Err(e);
                    }
                }
            }
            Err(e) => {
                log::error!("Failed to look up feature flag '{}': {}", flag.flag_name, e);
                return Err(e);
            }
        }
    }

    Ok(())
}
