//! Runtime site-configuration loading and composition.
//!
//! `load_snapshot` gathers the four config categories concurrently and
//! degrades each one to an empty list on failure so a page render never
//! breaks on a config read. `build_render_plan` folds a snapshot into the
//! structure the frontend consumes: one analytics composition, verification
//! meta tags, scripts grouped by document slot, and a flag map.

use metrics::counter;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::analytics_config;
use crate::models::custom_script;
use crate::models::enums::{AnalyticsPlatform, Environment, ScriptPosition, VerificationPlatform};
use crate::models::feature_flag;
use crate::models::site_verification;
use crate::repositories::{
    AnalyticsConfigRepository, CustomScriptRepository, FeatureFlagRepository,
    SiteVerificationRepository,
};

/// Flag gating the whole analytics composition. Absent means enabled.
pub const ENABLE_ANALYTICS_FLAG: &str = "ENABLE_ANALYTICS";

/// Raw config rows for one environment, fetched in one round.
#[derive(Debug, Clone, Default)]
pub struct SiteConfigSnapshot {
    pub analytics: Vec<analytics_config::Model>,
    pub verification: Vec<site_verification::Model>,
    pub features: Vec<feature_flag::Model>,
    pub custom_scripts: Vec<custom_script::Model>,
}

/// How the analytics snippet should be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum AnalyticsComposition {
    /// GTM container wraps the page; a GA4 measurement id may ride inside it.
    #[serde(rename_all = "camelCase")]
    TagManager {
        container_id: String,
        measurement_id: Option<String>,
    },
    /// GA4 snippet rendered standalone.
    #[serde(rename_all = "camelCase")]
    Direct { measurement_id: String },
    Disabled,
}

/// One `<meta>` tag proving site ownership to a platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerificationMetaTag {
    pub name: &'static str,
    pub content: String,
}

/// A script ready for injection, stripped to what the renderer needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScriptTag {
    pub id: Uuid,
    pub name: String,
    pub script_content: String,
    pub priority: i32,
}

/// Scripts grouped by document slot, each in injection order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScriptSlots {
    pub head_start: Vec<ScriptTag>,
    pub head_end: Vec<ScriptTag>,
    pub body_start: Vec<ScriptTag>,
    pub body_end: Vec<ScriptTag>,
}

/// Everything the frontend needs to render third-party integrations.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SiteRenderPlan {
    pub analytics: AnalyticsComposition,
    pub verification_meta_tags: Vec<VerificationMetaTag>,
    pub scripts: ScriptSlots,
    pub features: BTreeMap<String, bool>,
}

/// Meta tag name each verification platform expects.
pub fn verification_meta_name(platform: VerificationPlatform) -> &'static str {
    match platform {
        VerificationPlatform::Google => "google-site-verification",
        VerificationPlatform::Bing => "msvalidate.01",
        VerificationPlatform::Yandex => "yandex-verification",
        VerificationPlatform::Facebook => "facebook-domain-verification",
        VerificationPlatform::Pinterest => "pinterest-site-verification",
    }
}

/// Fetches all four config categories for `environment` concurrently.
///
/// A failed fetch is logged and counted, and that category comes back
/// empty; the loader itself never fails.
pub async fn load_snapshot(
    db: Arc<DatabaseConnection>,
    environment: Environment,
) -> SiteConfigSnapshot {
    let analytics_repo = AnalyticsConfigRepository::new(db.clone());
    let verification_repo = SiteVerificationRepository::new(db.clone());
    let flag_repo = FeatureFlagRepository::new(db.clone());
    let script_repo = CustomScriptRepository::new(db);

    let (analytics, verification, features, custom_scripts) = tokio::join!(
        analytics_repo.list_active_for_environment(environment),
        verification_repo.list(),
        flag_repo.list(Some(environment)),
        script_repo.list_active_for_environment(environment),
    );

    SiteConfigSnapshot {
        analytics: or_empty(analytics, "analytics_configs"),
        verification: or_empty(verification, "site_verifications"),
        features: or_empty(features, "feature_flags"),
        custom_scripts: or_empty(custom_scripts, "custom_scripts"),
    }
}

fn or_empty<T>(result: anyhow::Result<Vec<T>>, category: &'static str) -> Vec<T> {
    match result {
        Ok(rows) => rows,
        Err(error) => {
            tracing::warn!(category, error = %error, "site config fetch failed, serving empty set");
            counter!("site_config_fetch_failures_total", "category" => category).increment(1);
            Vec::new()
        }
    }
}

/// Composes a snapshot into the render plan.
pub fn build_render_plan(snapshot: &SiteConfigSnapshot) -> SiteRenderPlan {
    let analytics_enabled = snapshot
        .features
        .iter()
        .find(|flag| flag.flag_name == ENABLE_ANALYTICS_FLAG)
        .map(|flag| flag.is_enabled)
        .unwrap_or(true);

    let analytics = if analytics_enabled {
        compose_analytics(&snapshot.analytics)
    } else {
        AnalyticsComposition::Disabled
    };

    let verification_meta_tags = snapshot
        .verification
        .iter()
        .filter(|row| !row.verification_code.is_empty())
        .map(|row| VerificationMetaTag {
            name: verification_meta_name(row.platform),
            content: row.verification_code.clone(),
        })
        .collect();

    let features = snapshot
        .features
        .iter()
        .map(|flag| (flag.flag_name.clone(), flag.is_enabled))
        .collect();

    SiteRenderPlan {
        analytics,
        verification_meta_tags,
        scripts: group_scripts(&snapshot.custom_scripts),
        features,
    }
}

/// First active GTM wraps the page, nesting the first active GA4 if present;
/// otherwise the first active GA4 renders standalone; otherwise disabled.
/// "First" follows the `(priority ASC, created_at ASC)` injection order.
fn compose_analytics(configs: &[analytics_config::Model]) -> AnalyticsComposition {
    let mut ordered: Vec<&analytics_config::Model> = configs.iter().collect();
    ordered.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then_with(|| a.created_at.cmp(&b.created_at))
    });

    let gtm = ordered
        .iter()
        .find(|c| c.platform == AnalyticsPlatform::Gtm);
    let ga4 = ordered
        .iter()
        .find(|c| c.platform == AnalyticsPlatform::Ga4);

    match (gtm, ga4) {
        (Some(gtm), ga4) => AnalyticsComposition::TagManager {
            container_id: gtm.tracking_id.clone(),
            measurement_id: ga4.map(|c| c.tracking_id.clone()),
        },
        (None, Some(ga4)) => AnalyticsComposition::Direct {
            measurement_id: ga4.tracking_id.clone(),
        },
        (None, None) => AnalyticsComposition::Disabled,
    }
}

fn group_scripts(scripts: &[custom_script::Model]) -> ScriptSlots {
    let mut ordered: Vec<&custom_script::Model> = scripts.iter().collect();
    ordered.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then_with(|| a.created_at.cmp(&b.created_at))
    });

    let mut slots = ScriptSlots::default();
    for script in ordered {
        let tag = ScriptTag {
            id: script.id,
            name: script.name.clone(),
            script_content: script.script_content.clone(),
            priority: script.priority,
        };
        match script.position {
            ScriptPosition::HeadStart => slots.head_start.push(tag),
            ScriptPosition::HeadEnd => slots.head_end.push(tag),
            ScriptPosition::BodyStart => slots.body_start.push(tag),
            ScriptPosition::BodyEnd => slots.body_end.push(tag),
        }
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn analytics(
        platform: AnalyticsPlatform,
        tracking_id: &str,
        priority: i32,
    ) -> analytics_config::Model {
        let now = Utc::now();
        analytics_config::Model {
            id: Uuid::new_v4(),
            platform,
            name: format!("{tracking_id} config"),
            tracking_id: tracking_id.to_string(),
            is_active: true,
            environment: Environment::All,
            additional_config: None,
            priority,
            created_by_user_id: None,
            created_at: now.into(),
            updated_at: now.into(),
            deleted_at: None,
        }
    }

    fn flag(name: &str, is_enabled: bool) -> feature_flag::Model {
        let now = Utc::now();
        feature_flag::Model {
            id: Uuid::new_v4(),
            flag_name: name.to_string(),
            description: None,
            is_enabled,
            environment: Environment::All,
            created_at: now.into(),
            updated_at: now.into(),
            deleted_at: None,
        }
    }

    fn verification(platform: VerificationPlatform, code: &str) -> site_verification::Model {
        let now = Utc::now();
        site_verification::Model {
            id: Uuid::new_v4(),
            platform,
            verification_code: code.to_string(),
            meta_tag: None,
            is_verified: false,
            verified_at: None,
            last_checked: None,
            created_at: now.into(),
            updated_at: now.into(),
            deleted_at: None,
        }
    }

    fn script(name: &str, position: ScriptPosition, priority: i32, age_secs: i64) -> custom_script::Model {
        let created = Utc::now() - Duration::seconds(age_secs);
        custom_script::Model {
            id: Uuid::new_v4(),
            name: name.to_string(),
            script_content: format!("console.log('{name}');"),
            position,
            target_pages: None,
            content_types: None,
            priority,
            is_active: true,
            environment: Environment::All,
            created_by_user_id: None,
            created_at: created.into(),
            updated_at: created.into(),
            deleted_at: None,
        }
    }

    #[test]
    fn gtm_wraps_nested_ga4() {
        let snapshot = SiteConfigSnapshot {
            analytics: vec![
                analytics(AnalyticsPlatform::Ga4, "G-1234", 2),
                analytics(AnalyticsPlatform::Gtm, "GTM-XYZ", 1),
            ],
            ..Default::default()
        };

        let plan = build_render_plan(&snapshot);
        assert_eq!(
            plan.analytics,
            AnalyticsComposition::TagManager {
                container_id: "GTM-XYZ".to_string(),
                measurement_id: Some("G-1234".to_string()),
            }
        );
    }

    #[test]
    fn ga4_renders_standalone_without_gtm() {
        let snapshot = SiteConfigSnapshot {
            analytics: vec![analytics(AnalyticsPlatform::Ga4, "G-1234", 1)],
            ..Default::default()
        };

        let plan = build_render_plan(&snapshot);
        assert_eq!(
            plan.analytics,
            AnalyticsComposition::Direct {
                measurement_id: "G-1234".to_string(),
            }
        );
    }

    #[test]
    fn no_matching_configs_disables_analytics() {
        let snapshot = SiteConfigSnapshot {
            analytics: vec![analytics(AnalyticsPlatform::FacebookPixel, "FB-1", 1)],
            ..Default::default()
        };

        let plan = build_render_plan(&snapshot);
        assert_eq!(plan.analytics, AnalyticsComposition::Disabled);
    }

    #[test]
    fn lowest_priority_gtm_wins() {
        let snapshot = SiteConfigSnapshot {
            analytics: vec![
                analytics(AnalyticsPlatform::Gtm, "GTM-SECOND", 5),
                analytics(AnalyticsPlatform::Gtm, "GTM-FIRST", 1),
            ],
            ..Default::default()
        };

        let plan = build_render_plan(&snapshot);
        assert_eq!(
            plan.analytics,
            AnalyticsComposition::TagManager {
                container_id: "GTM-FIRST".to_string(),
                measurement_id: None,
            }
        );
    }

    #[test]
    fn kill_switch_flag_disables_analytics() {
        let snapshot = SiteConfigSnapshot {
            analytics: vec![analytics(AnalyticsPlatform::Gtm, "GTM-XYZ", 1)],
            features: vec![flag(ENABLE_ANALYTICS_FLAG, false)],
            ..Default::default()
        };

        let plan = build_render_plan(&snapshot);
        assert_eq!(plan.analytics, AnalyticsComposition::Disabled);
    }

    #[test]
    fn analytics_defaults_to_enabled_when_flag_absent() {
        let snapshot = SiteConfigSnapshot {
            analytics: vec![analytics(AnalyticsPlatform::Ga4, "G-1", 1)],
            features: vec![flag("OTHER_FLAG", false)],
            ..Default::default()
        };

        let plan = build_render_plan(&snapshot);
        assert_ne!(plan.analytics, AnalyticsComposition::Disabled);
    }

    #[test]
    fn empty_verification_codes_are_skipped() {
        let snapshot = SiteConfigSnapshot {
            verification: vec![
                verification(VerificationPlatform::Google, "g-code"),
                verification(VerificationPlatform::Bing, ""),
            ],
            ..Default::default()
        };

        let plan = build_render_plan(&snapshot);
        assert_eq!(
            plan.verification_meta_tags,
            vec![VerificationMetaTag {
                name: "google-site-verification",
                content: "g-code".to_string(),
            }]
        );
    }

    #[test]
    fn scripts_grouped_by_slot_in_priority_order() {
        let snapshot = SiteConfigSnapshot {
            custom_scripts: vec![
                script("later", ScriptPosition::HeadEnd, 10, 30),
                script("body", ScriptPosition::BodyEnd, 1, 20),
                script("earlier", ScriptPosition::HeadEnd, 1, 10),
            ],
            ..Default::default()
        };

        let plan = build_render_plan(&snapshot);
        let head_end: Vec<&str> = plan
            .scripts
            .head_end
            .iter()
            .map(|tag| tag.name.as_str())
            .collect();
        assert_eq!(head_end, vec!["earlier", "later"]);
        assert_eq!(plan.scripts.body_end.len(), 1);
        assert!(plan.scripts.head_start.is_empty());
    }

    #[test]
    fn priority_tie_breaks_on_created_at() {
        let snapshot = SiteConfigSnapshot {
            custom_scripts: vec![
                script("newer", ScriptPosition::HeadStart, 1, 5),
                script("older", ScriptPosition::HeadStart, 1, 60),
            ],
            ..Default::default()
        };

        let plan = build_render_plan(&snapshot);
        let names: Vec<&str> = plan
            .scripts
            .head_start
            .iter()
            .map(|tag| tag.name.as_str())
            .collect();
        assert_eq!(names, vec!["older", "newer"]);
    }

    #[test]
    fn features_map_reflects_snapshot_flags() {
        let snapshot = SiteConfigSnapshot {
            features: vec![flag("BETA_SEARCH", true), flag("DARK_MODE", false)],
            ..Default::default()
        };

        let plan = build_render_plan(&snapshot);
        assert_eq!(plan.features.get("BETA_SEARCH"), Some(&true));
        assert_eq!(plan.features.get("DARK_MODE"), Some(&false));
    }
}
