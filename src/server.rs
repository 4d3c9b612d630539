//! # Server Configuration
//!
//! Application state, router assembly and the OpenAPI document. Reads are
//! public; mutating routes sit behind the session guard middleware.

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{any, delete, get, patch, post},
};
use sea_orm::DatabaseConnection;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth;
use crate::config::AppConfig;
use crate::handlers;
use crate::storage::{LocalStore, MediaStorage};
use crate::telemetry;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<AppConfig>,
    pub http: reqwest::Client,
    pub storage: Arc<MediaStorage>,
}

/// Builds an `AppState` without S3, for tests.
pub fn create_test_app_state(config: AppConfig, db: DatabaseConnection) -> AppState {
    let config = Arc::new(config);
    let storage = Arc::new(MediaStorage::new(
        None,
        Arc::new(LocalStore::new(&config.upload_dir, &config.upload_base_url)),
    ));
    AppState {
        db,
        config,
        http: reqwest::Client::new(),
        storage,
    }
}

/// Creates and configures the Axum application router
pub fn create_app(state: AppState) -> Router {
    let public = Router::new()
        .route("/", get(handlers::root))
        .route("/healthz", get(handlers::healthz))
        .route("/api/v1/contents", get(handlers::contents::list_contents))
        .route(
            "/api/v1/contents/slug/{slug}",
            get(handlers::contents::get_content_by_slug),
        )
        .route("/api/v1/contents/{id}", get(handlers::contents::get_content))
        .route(
            "/api/v1/contents/{id}/versions",
            get(handlers::contents::list_content_versions),
        )
        .route(
            "/api/v1/analytics/configs",
            get(handlers::analytics::list_configs),
        )
        .route(
            "/api/v1/analytics/configs/{id}",
            get(handlers::analytics::get_config),
        )
        .route(
            "/api/v1/analytics/verification",
            get(handlers::analytics::list_verifications),
        )
        .route(
            "/api/v1/analytics/verification/{platform}",
            get(handlers::analytics::get_verification),
        )
        .route(
            "/api/v1/analytics/custom-scripts",
            get(handlers::analytics::list_scripts),
        )
        .route(
            "/api/v1/analytics/custom-scripts/{id}",
            get(handlers::analytics::get_script),
        )
        .route(
            "/api/v1/analytics/feature-flags",
            get(handlers::analytics::list_flags),
        )
        .route(
            "/api/v1/analytics/feature-flags/{flagName}",
            get(handlers::analytics::get_flag),
        )
        .route(
            "/api/v1/seo/metadata/{contentId}",
            get(handlers::seo::get_metadata),
        )
        .route("/api/v1/seo/sitemap.xml", get(handlers::seo::sitemap_xml))
        .route("/api/v1/seo/robots.txt", get(handlers::seo::robots_txt))
        .route(
            "/api/v1/site-config",
            get(handlers::site_config::get_site_config),
        )
        .route("/api/v1/navigation", get(handlers::navigation::list_menus))
        .route("/api/v1/media", get(handlers::media::list_media))
        .route("/api/v1/media/{id}", get(handlers::media::get_media))
        .route("/api/v1/geo/settings", get(handlers::geo::list_settings))
        .route(
            "/api/v1/geo/settings/locale/{locale}",
            get(handlers::geo::get_setting_for_locale),
        )
        .route(
            "/api/v1/structured-data/generate/{contentId}",
            get(handlers::structured_data::generate_for_content),
        )
        .route(
            "/api/v1/structured-data/templates",
            get(handlers::structured_data::list_templates),
        )
        .route("/api/auth/{*rest}", any(handlers::auth_proxy::proxy_auth));

    let guarded = Router::new()
        .route("/api/v1/contents", post(handlers::contents::create_content))
        .route(
            "/api/v1/contents/{id}",
            patch(handlers::contents::update_content)
                .delete(handlers::contents::delete_content),
        )
        .route(
            "/api/v1/contents/{id}/publish",
            post(handlers::contents::publish_content),
        )
        .route(
            "/api/v1/contents/{id}/unpublish",
            post(handlers::contents::unpublish_content),
        )
        .route(
            "/api/v1/analytics/configs",
            post(handlers::analytics::create_config),
        )
        .route(
            "/api/v1/analytics/configs/{id}",
            patch(handlers::analytics::update_config)
                .delete(handlers::analytics::delete_config),
        )
        .route(
            "/api/v1/analytics/verification",
            post(handlers::analytics::upsert_verification),
        )
        .route(
            "/api/v1/analytics/verification/{platform}",
            patch(handlers::analytics::update_verification),
        )
        .route(
            "/api/v1/analytics/verification/{platform}/verify",
            post(handlers::analytics::verify_platform),
        )
        .route(
            "/api/v1/analytics/custom-scripts",
            post(handlers::analytics::create_script),
        )
        .route(
            "/api/v1/analytics/custom-scripts/{id}",
            patch(handlers::analytics::update_script)
                .delete(handlers::analytics::delete_script),
        )
        .route(
            "/api/v1/analytics/feature-flags",
            post(handlers::analytics::create_flag),
        )
        .route(
            "/api/v1/analytics/feature-flags/{flagName}",
            patch(handlers::analytics::update_flag),
        )
        .route(
            "/api/v1/analytics/feature-flags/{flagName}/toggle",
            post(handlers::analytics::toggle_flag),
        )
        .route("/api/v1/seo/metadata", post(handlers::seo::upsert_metadata))
        .route("/api/v1/navigation", post(handlers::navigation::create_menu))
        .route(
            "/api/v1/navigation/{id}",
            patch(handlers::navigation::update_menu)
                .delete(handlers::navigation::delete_menu),
        )
        .route("/api/v1/media/upload", post(handlers::media::upload_media))
        .route(
            "/api/v1/media/{id}",
            delete(handlers::media::delete_media),
        )
        .route("/api/v1/geo/settings", post(handlers::geo::create_setting))
        .route(
            "/api/v1/geo/settings/{id}",
            patch(handlers::geo::update_setting),
        )
        .route(
            "/api/v1/structured-data/templates",
            post(handlers::structured_data::create_template),
        )
        .route(
            "/api/v1/structured-data/templates/{id}",
            patch(handlers::structured_data::update_template),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_session,
        ));

    Router::new()
        .merge(public)
        .merge(guarded)
        .nest_service("/uploads", ServeDir::new(&state.config.upload_dir))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(telemetry::trace_requests))
}

/// Starts the server with the given configuration
pub async fn run_server(
    config: AppConfig,
    db: DatabaseConnection,
) -> Result<(), Box<dyn std::error::Error>> {
    // The S3-vs-local decision happens once, here, from configuration.
    let storage = Arc::new(MediaStorage::from_config(&config).await);
    let addr = config
        .bind_addr()
        .map_err(|e| format!("Invalid server address: {}", e))?;

    let state = AppState {
        db,
        config: Arc::new(config),
        http: reqwest::Client::new(),
        storage,
    };
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    println!("Server listening on: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::healthz,
        crate::handlers::contents::list_contents,
        crate::handlers::contents::get_content_by_slug,
        crate::handlers::contents::get_content,
        crate::handlers::contents::list_content_versions,
        crate::handlers::contents::create_content,
        crate::handlers::contents::update_content,
        crate::handlers::contents::publish_content,
        crate::handlers::contents::unpublish_content,
        crate::handlers::contents::delete_content,
        crate::handlers::analytics::list_configs,
        crate::handlers::analytics::get_config,
        crate::handlers::analytics::create_config,
        crate::handlers::analytics::update_config,
        crate::handlers::analytics::delete_config,
        crate::handlers::analytics::list_verifications,
        crate::handlers::analytics::get_verification,
        crate::handlers::analytics::upsert_verification,
        crate::handlers::analytics::update_verification,
        crate::handlers::analytics::verify_platform,
        crate::handlers::analytics::list_scripts,
        crate::handlers::analytics::get_script,
        crate::handlers::analytics::create_script,
        crate::handlers::analytics::update_script,
        crate::handlers::analytics::delete_script,
        crate::handlers::analytics::list_flags,
        crate::handlers::analytics::get_flag,
        crate::handlers::analytics::create_flag,
        crate::handlers::analytics::update_flag,
        crate::handlers::analytics::toggle_flag,
        crate::handlers::seo::get_metadata,
        crate::handlers::seo::upsert_metadata,
        crate::handlers::seo::sitemap_xml,
        crate::handlers::seo::robots_txt,
        crate::handlers::site_config::get_site_config,
        crate::handlers::navigation::list_menus,
        crate::handlers::navigation::create_menu,
        crate::handlers::navigation::update_menu,
        crate::handlers::navigation::delete_menu,
        crate::handlers::media::list_media,
        crate::handlers::media::get_media,
        crate::handlers::media::upload_media,
        crate::handlers::media::delete_media,
        crate::handlers::geo::list_settings,
        crate::handlers::geo::get_setting_for_locale,
        crate::handlers::geo::create_setting,
        crate::handlers::geo::update_setting,
        crate::handlers::structured_data::generate_for_content,
        crate::handlers::structured_data::list_templates,
        crate::handlers::structured_data::create_template,
        crate::handlers::structured_data::update_template,
    ),
    components(
        schemas(
            crate::models::ServiceInfo,
            crate::error::ApiError,
            crate::models::enums::ContentType,
            crate::models::enums::ContentStatus,
            crate::models::enums::Environment,
            crate::models::enums::AnalyticsPlatform,
            crate::models::enums::VerificationPlatform,
            crate::models::enums::ScriptPosition,
            crate::models::enums::MenuLocation,
            crate::models::enums::StorageType,
            crate::models::content::Model,
            crate::models::content_version::Model,
            crate::models::category::Model,
            crate::models::tag::Model,
            crate::models::analytics_config::Model,
            crate::models::site_verification::Model,
            crate::models::custom_script::Model,
            crate::models::feature_flag::Model,
            crate::models::seo_metadata::Model,
            crate::models::navigation_menu::Model,
            crate::models::media::Model,
            crate::models::geo_setting::Model,
            crate::models::structured_data_template::Model,
            crate::handlers::types::ListMeta,
            crate::handlers::types::PaginatedResponse<crate::handlers::contents::ContentResponse>,
            crate::handlers::types::PaginatedResponse<crate::models::media::Model>,
            crate::handlers::contents::ContentResponse,
            crate::handlers::contents::CreateContentRequest,
            crate::handlers::contents::UpdateContentRequest,
            crate::handlers::analytics::CreateConfigRequest,
            crate::handlers::analytics::UpdateConfigRequest,
            crate::handlers::analytics::UpsertVerificationRequest,
            crate::handlers::analytics::UpdateVerificationRequest,
            crate::handlers::analytics::CreateScriptRequest,
            crate::handlers::analytics::UpdateScriptRequest,
            crate::handlers::analytics::CreateFlagRequest,
            crate::handlers::analytics::UpdateFlagRequest,
            crate::handlers::analytics::ToggleFlagRequest,
            crate::handlers::seo::UpsertMetadataRequest,
            crate::handlers::navigation::CreateMenuRequest,
            crate::handlers::navigation::UpdateMenuRequest,
            crate::handlers::geo::CreateGeoSettingRequest,
            crate::handlers::geo::UpdateGeoSettingRequest,
            crate::handlers::structured_data::CreateTemplateRequest,
            crate::handlers::structured_data::UpdateTemplateRequest,
            crate::runtime_config::SiteRenderPlan,
            crate::runtime_config::AnalyticsComposition,
            crate::runtime_config::VerificationMetaTag,
            crate::runtime_config::ScriptSlots,
            crate::runtime_config::ScriptTag,
        )
    ),
    info(
        title = "Sitekit API",
        description = "Content, SEO and site configuration API for the marketing site",
        version = env!("CARGO_PKG_VERSION"),
    )
)]
pub struct ApiDoc;
