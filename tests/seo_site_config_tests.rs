//! Integration tests for the SEO surface (sitemap, robots, metadata) and the
//! aggregated site-config endpoint.

use migration::MigratorTrait;
use reqwest::Client;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use sitekit::config::AppConfig;
use sitekit::db::init_pool;
use sitekit::server::{create_app, create_test_app_state};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SESSION_COOKIE: &str = "session=abc123";

async fn start_auth_service() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/get-session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": { "id": "user-1", "email": "editor@example.com", "name": null }
        })))
        .mount(&server)
        .await;
    server
}

async fn start_test_server(auth_url: &str) -> (String, DatabaseConnection) {
    let upload_dir = tempfile::tempdir().expect("Failed to create upload dir");

    let config = AppConfig {
        profile: "test".to_string(),
        database_url: "sqlite::memory:".to_string(),
        db_max_connections: 1,
        auth_service_url: auth_url.to_string(),
        upload_dir: upload_dir.keep().to_string_lossy().into_owned(),
        ..Default::default()
    };

    let db = init_pool(&config).await.expect("Failed to init test DB");
    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to apply migrations");

    let state = create_test_app_state(config, db.clone());
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), db)
}

async fn create_published_blog(client: &Client, server_url: &str, slug: &str) -> Value {
    let response = client
        .post(format!("{}/api/v1/contents", server_url))
        .header("cookie", SESSION_COOKIE)
        .json(&json!({
            "title": "Hello",
            "slug": slug,
            "body": "Body",
            "contentType": "blog",
            "status": "published",
            "authorId": "user-1"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
    response.json().await.unwrap()
}

mod sitemap_tests {
    use super::*;

    #[tokio::test]
    async fn sitemap_lists_static_routes_and_published_content() {
        let auth = start_auth_service().await;
        let (server_url, _db) = start_test_server(&auth.uri()).await;
        let client = Client::new();

        create_published_blog(&client, &server_url, "hello").await;

        // Drafts must not appear.
        let response = client
            .post(format!("{}/api/v1/contents", server_url))
            .header("cookie", SESSION_COOKIE)
            .json(&json!({
                "title": "Hidden",
                "slug": "hidden",
                "body": "Body",
                "contentType": "blog",
                "authorId": "user-1"
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 201);

        let response = client
            .get(format!("{}/api/v1/seo/sitemap.xml", server_url))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/xml"
        );

        let xml = response.text().await.unwrap();
        assert!(xml.contains("<loc>http://localhost:3000</loc>"));
        assert!(xml.contains("<loc>http://localhost:3000/blog</loc>"));
        assert!(xml.contains("<loc>http://localhost:3000/docs</loc>"));
        assert!(xml.contains("<loc>http://localhost:3000/blog/hello</loc>"));
        assert!(!xml.contains("hidden"));
    }

    #[tokio::test]
    async fn sitemap_locale_prefixes_every_url() {
        let auth = start_auth_service().await;
        let (server_url, _db) = start_test_server(&auth.uri()).await;
        let client = Client::new();

        create_published_blog(&client, &server_url, "hola").await;

        let xml = client
            .get(format!("{}/api/v1/seo/sitemap.xml?locale=es", server_url))
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();

        assert!(xml.contains("<loc>http://localhost:3000/es/blog/hola</loc>"));
        // Static pages follow the locale as well.
        assert!(xml.contains("<loc>http://localhost:3000/es</loc>"));
        assert!(xml.contains("<loc>http://localhost:3000/es/blog</loc>"));
        assert!(!xml.contains("<loc>http://localhost:3000/blog</loc>"));
    }

    #[tokio::test]
    async fn robots_txt_points_at_sitemap() {
        let auth = start_auth_service().await;
        let (server_url, _db) = start_test_server(&auth.uri()).await;
        let client = Client::new();

        let response = client
            .get(format!("{}/api/v1/seo/robots.txt", server_url))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);

        let body = response.text().await.unwrap();
        assert!(body.starts_with("User-agent: *"));
        assert!(body.contains("Sitemap: http://localhost:3000/sitemap.xml"));
    }
}

mod metadata_tests {
    use super::*;

    #[tokio::test]
    async fn metadata_upsert_replaces_the_whole_document() {
        let auth = start_auth_service().await;
        let (server_url, _db) = start_test_server(&auth.uri()).await;
        let client = Client::new();

        let content = create_published_blog(&client, &server_url, "with-meta").await;
        let content_id = content.get("id").unwrap().as_str().unwrap();

        let response = client
            .post(format!("{}/api/v1/seo/metadata", server_url))
            .header("cookie", SESSION_COOKIE)
            .json(&json!({
                "contentId": content_id,
                "metaTitle": "First title",
                "metaDescription": "First description"
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);

        // Second upsert omits the description, which clears it.
        let response = client
            .post(format!("{}/api/v1/seo/metadata", server_url))
            .header("cookie", SESSION_COOKIE)
            .json(&json!({
                "contentId": content_id,
                "metaTitle": "Second title"
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);

        let metadata: Value = client
            .get(format!("{}/api/v1/seo/metadata/{}", server_url, content_id))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(
            metadata.get("metaTitle").unwrap().as_str().unwrap(),
            "Second title"
        );
        assert!(metadata.get("metaDescription").unwrap().is_null());
    }

    #[tokio::test]
    async fn metadata_upsert_requires_existing_content() {
        let auth = start_auth_service().await;
        let (server_url, _db) = start_test_server(&auth.uri()).await;
        let client = Client::new();

        let response = client
            .post(format!("{}/api/v1/seo/metadata", server_url))
            .header("cookie", SESSION_COOKIE)
            .json(&json!({
                "contentId": uuid::Uuid::new_v4(),
                "metaTitle": "Orphan"
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 404);
    }
}

mod structured_data_tests {
    use super::*;

    #[tokio::test]
    async fn blog_content_generates_an_article_schema() {
        let auth = start_auth_service().await;
        let (server_url, _db) = start_test_server(&auth.uri()).await;
        let client = Client::new();

        let content = create_published_blog(&client, &server_url, "jsonld-post").await;
        let content_id = content.get("id").unwrap().as_str().unwrap();

        // A global template should ride along with the generated schema.
        let response = client
            .post(format!("{}/api/v1/structured-data/templates", server_url))
            .header("cookie", SESSION_COOKIE)
            .json(&json!({
                "name": "organization",
                "schemaType": "Organization",
                "template": { "@type": "Organization", "name": "Acme" },
                "isGlobal": true
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 201);

        let documents: Value = client
            .get(format!(
                "{}/api/v1/structured-data/generate/{}",
                server_url, content_id
            ))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let documents = documents.as_array().unwrap();
        assert_eq!(documents.len(), 2);

        let article = &documents[0];
        assert_eq!(article.get("@type").unwrap().as_str().unwrap(), "Article");
        assert_eq!(
            article.get("url").unwrap().as_str().unwrap(),
            "http://localhost:3000/blog/jsonld-post"
        );
        assert!(article.get("datePublished").is_some());

        assert_eq!(
            documents[1].get("name").unwrap().as_str().unwrap(),
            "Acme"
        );
    }
}

mod site_config_tests {
    use super::*;

    #[tokio::test]
    async fn empty_database_yields_a_disabled_plan() {
        let auth = start_auth_service().await;
        let (server_url, _db) = start_test_server(&auth.uri()).await;
        let client = Client::new();

        let plan: Value = client
            .get(format!("{}/api/v1/site-config", server_url))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(
            plan.pointer("/analytics/mode").unwrap().as_str().unwrap(),
            "disabled"
        );
        assert!(plan.get("verificationMetaTags").unwrap().as_array().unwrap().is_empty());
        assert!(plan.get("features").unwrap().as_object().unwrap().is_empty());
    }

    #[tokio::test]
    async fn gtm_wraps_a_nested_ga4_measurement() {
        let auth = start_auth_service().await;
        let (server_url, _db) = start_test_server(&auth.uri()).await;
        let client = Client::new();

        for (platform, name, tracking_id) in [
            ("GTM", "container", "GTM-XYZ"),
            ("GA4", "measurement", "G-1234"),
        ] {
            let response = client
                .post(format!("{}/api/v1/analytics/configs", server_url))
                .header("cookie", SESSION_COOKIE)
                .json(&json!({
                    "platform": platform,
                    "name": name,
                    "trackingId": tracking_id
                }))
                .send()
                .await
                .unwrap();
            assert_eq!(response.status(), 201);
        }

        let plan: Value = client
            .get(format!("{}/api/v1/site-config", server_url))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(
            plan.pointer("/analytics/mode").unwrap().as_str().unwrap(),
            "tagManager"
        );
        assert_eq!(
            plan.pointer("/analytics/containerId").unwrap().as_str().unwrap(),
            "GTM-XYZ"
        );
        assert_eq!(
            plan.pointer("/analytics/measurementId").unwrap().as_str().unwrap(),
            "G-1234"
        );
    }

    #[tokio::test]
    async fn disabled_analytics_flag_suppresses_composition() {
        let auth = start_auth_service().await;
        let (server_url, _db) = start_test_server(&auth.uri()).await;
        let client = Client::new();

        let response = client
            .post(format!("{}/api/v1/analytics/configs", server_url))
            .header("cookie", SESSION_COOKIE)
            .json(&json!({
                "platform": "GA4",
                "name": "measurement",
                "trackingId": "G-1234"
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 201);

        let response = client
            .post(format!("{}/api/v1/analytics/feature-flags", server_url))
            .header("cookie", SESSION_COOKIE)
            .json(&json!({
                "flagName": "ENABLE_ANALYTICS",
                "environment": "all",
                "isEnabled": false
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 201);

        let plan: Value = client
            .get(format!("{}/api/v1/site-config", server_url))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(
            plan.pointer("/analytics/mode").unwrap().as_str().unwrap(),
            "disabled"
        );
        assert_eq!(
            plan.pointer("/features/ENABLE_ANALYTICS").unwrap(),
            &Value::Bool(false)
        );
    }

    #[tokio::test]
    async fn verification_codes_become_meta_tags() {
        let auth = start_auth_service().await;
        let (server_url, _db) = start_test_server(&auth.uri()).await;
        let client = Client::new();

        let response = client
            .post(format!("{}/api/v1/analytics/verification", server_url))
            .header("cookie", SESSION_COOKIE)
            .json(&json!({
                "platform": "GOOGLE",
                "verificationCode": "google-code-123"
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);

        let plan: Value = client
            .get(format!("{}/api/v1/site-config", server_url))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        let tags = plan.get("verificationMetaTags").unwrap().as_array().unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(
            tags[0].get("name").unwrap().as_str().unwrap(),
            "google-site-verification"
        );
        assert_eq!(
            tags[0].get("content").unwrap().as_str().unwrap(),
            "google-code-123"
        );
    }

    #[tokio::test]
    async fn scripts_are_grouped_by_position_in_priority_order() {
        let auth = start_auth_service().await;
        let (server_url, _db) = start_test_server(&auth.uri()).await;
        let client = Client::new();

        for (name, position, priority) in [
            ("late", "head-end", 10),
            ("early", "head-end", 1),
            ("footer", "body-end", 5),
        ] {
            let response = client
                .post(format!("{}/api/v1/analytics/custom-scripts", server_url))
                .header("cookie", SESSION_COOKIE)
                .json(&json!({
                    "name": name,
                    "scriptContent": "console.log('x')",
                    "position": position,
                    "priority": priority
                }))
                .send()
                .await
                .unwrap();
            assert_eq!(response.status(), 201);
        }

        let plan: Value = client
            .get(format!("{}/api/v1/site-config", server_url))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        let head_end = plan.pointer("/scripts/headEnd").unwrap().as_array().unwrap();
        assert_eq!(head_end.len(), 2);
        assert_eq!(head_end[0].get("name").unwrap().as_str().unwrap(), "early");
        assert_eq!(head_end[1].get("name").unwrap().as_str().unwrap(), "late");

        let body_end = plan.pointer("/scripts/bodyEnd").unwrap().as_array().unwrap();
        assert_eq!(body_end.len(), 1);
        assert_eq!(body_end[0].get("name").unwrap().as_str().unwrap(), "footer");
    }
}
