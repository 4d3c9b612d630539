//! Integration tests for the Sitekit API HTTP surface.

use migration::MigratorTrait;
use reqwest::Client;
use sea_orm::{ConnectionTrait, DatabaseConnection};
use serde_json::{Value, json};
use sitekit::config::AppConfig;
use sitekit::db::init_pool;
use sitekit::server::{create_app, create_test_app_state};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SESSION_COOKIE: &str = "session=abc123";

/// Starts a mock auth service that accepts the test session cookie.
async fn start_auth_service() -> MockServer {
    // An exclusive (non-pooled) server so dropping it actually closes the port.
    let server = MockServer::builder().start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/get-session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {
                "id": "user-1",
                "email": "editor@example.com",
                "name": "Editor"
            }
        })))
        .mount(&server)
        .await;
    server
}

/// Starts the API on a random port backed by an in-memory database.
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

#[tokio::test]
async fn test_root_endpoint() {
    let auth = start_auth_service().await;
    let (server_url, _db) = start_test_server(&auth.uri()).await;
    let client = Client::new();

    let response = client
        .get(format!("{}/", server_url))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body.get("service").unwrap().as_str().unwrap(), "sitekit");
    assert_eq!(body.get("version").unwrap().as_str().unwrap(), "0.1.0");
}

#[tokio::test]
async fn test_openapi_endpoint() {
    let auth = start_auth_service().await;
    let (server_url, _db) = start_test_server(&auth.uri()).await;
    let client = Client::new();

    let response = client
        .get(format!("{}/openapi.json", server_url))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert!(body.get("openapi").is_some());
    let info = body.get("info").unwrap();
    assert_eq!(info.get("title").unwrap().as_str().unwrap(), "Sitekit API");
}

#[tokio::test]
async fn test_healthz_endpoint() {
    let auth = start_auth_service().await;
    let (server_url, _db) = start_test_server(&auth.uri()).await;
    let client = Client::new();

    let response = client
        .get(format!("{}/healthz", server_url))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body.get("status").unwrap().as_str().unwrap(), "ok");
}

#[tokio::test]
async fn error_responses_carry_the_request_trace_id() {
    let auth = start_auth_service().await;
    let (server_url, _db) = start_test_server(&auth.uri()).await;
    let client = Client::new();

    let response = client
        .get(format!(
            "{}/api/v1/contents/00000000-0000-0000-0000-000000000000",
            server_url
        ))
        .header("x-request-id", "edge-trace-7")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
    assert_eq!(
        response.headers().get("x-trace-id").unwrap(),
        "edge-trace-7"
    );
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body.get("traceId").unwrap().as_str().unwrap(),
        "edge-trace-7"
    );
}

#[tokio::test]
async fn generated_trace_ids_match_between_header_and_error_body() {
    let auth = start_auth_service().await;
    let (server_url, _db) = start_test_server(&auth.uri()).await;
    let client = Client::new();

    let response = client
        .get(format!(
            "{}/api/v1/contents/00000000-0000-0000-0000-000000000000",
            server_url
        ))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
    let header = response
        .headers()
        .get("x-trace-id")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(header.starts_with("req-"));

    let body: Value = response.json().await.unwrap();
    assert_eq!(body.get("traceId").unwrap().as_str().unwrap(), header);
}

mod session_guard_tests {
    use super::*;

    #[tokio::test]
    async fn mutation_without_cookie_returns_401() {
        let auth = start_auth_service().await;
        let (server_url, _db) = start_test_server(&auth.uri()).await;
        let client = Client::new();

        let response = client
            .post(format!("{}/api/v1/contents", server_url))
            .json(&json!({
                "title": "Draft",
                "slug": "draft",
                "body": "text",
                "contentType": "blog",
                "authorId": "user-1"
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), 401);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body.get("code").unwrap().as_str().unwrap(), "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn mutation_with_rejected_session_returns_401() {
        let auth = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/get-session"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&auth)
            .await;
        let (server_url, _db) = start_test_server(&auth.uri()).await;
        let client = Client::new();

        let response = client
            .delete(format!(
                "{}/api/v1/contents/{}",
                server_url,
                uuid::Uuid::new_v4()
            ))
            .header("cookie", SESSION_COOKIE)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), 401);
    }

    #[tokio::test]
    async fn reads_stay_public() {
        let auth = start_auth_service().await;
        let (server_url, _db) = start_test_server(&auth.uri()).await;
        let client = Client::new();

        let response = client
            .get(format!("{}/api/v1/contents", server_url))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), 200);
    }
}

mod content_lifecycle_tests {
    use super::*;

    async fn create_draft(client: &Client, server_url: &str, slug: &str) -> Value {
        let response = client
            .post(format!("{}/api/v1/contents", server_url))
            .header("cookie", SESSION_COOKIE)
            .json(&json!({
                "title": "Hello World",
                "slug": slug,
                "body": "Some body text for the post",
                "contentType": "blog",
                "authorId": "user-1"
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), 201);
        response.json().await.unwrap()
    }

    #[tokio::test]
    async fn draft_is_hidden_from_slug_lookup_until_published() {
        let auth = start_auth_service().await;
        let (server_url, _db) = start_test_server(&auth.uri()).await;
        let client = Client::new();

        let created = create_draft(&client, &server_url, "hello-world").await;
        assert_eq!(created.get("status").unwrap().as_str().unwrap(), "draft");
        assert!(created.get("publishedAt").unwrap().is_null());

        // Public slug lookup must not leak the draft.
        let response = client
            .get(format!("{}/api/v1/contents/slug/hello-world", server_url))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 404);

        // Editors can opt in to drafts.
        let response = client
            .get(format!(
                "{}/api/v1/contents/slug/hello-world?includeDrafts=true",
                server_url
            ))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);

        let id = created.get("id").unwrap().as_str().unwrap();
        let response = client
            .post(format!("{}/api/v1/contents/{}/publish", server_url, id))
            .header("cookie", SESSION_COOKIE)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let published: Value = response.json().await.unwrap();
        assert_eq!(published.get("status").unwrap().as_str().unwrap(), "published");
        assert!(!published.get("publishedAt").unwrap().is_null());

        let response = client
            .get(format!("{}/api/v1/contents/slug/hello-world", server_url))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn unpublish_reverts_to_draft_but_keeps_published_at() {
        let auth = start_auth_service().await;
        let (server_url, _db) = start_test_server(&auth.uri()).await;
        let client = Client::new();

        let created = create_draft(&client, &server_url, "keep-timestamp").await;
        let id = created.get("id").unwrap().as_str().unwrap();

        let published: Value = client
            .post(format!("{}/api/v1/contents/{}/publish", server_url, id))
            .header("cookie", SESSION_COOKIE)
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let published_at = published.get("publishedAt").unwrap().clone();
        assert!(!published_at.is_null());

        let reverted: Value = client
            .post(format!("{}/api/v1/contents/{}/unpublish", server_url, id))
            .header("cookie", SESSION_COOKIE)
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(reverted.get("status").unwrap().as_str().unwrap(), "draft");
        assert_eq!(reverted.get("publishedAt").unwrap(), &published_at);
    }

    #[tokio::test]
    async fn each_update_writes_exactly_one_version_snapshot() {
        let auth = start_auth_service().await;
        let (server_url, _db) = start_test_server(&auth.uri()).await;
        let client = Client::new();

        let created = create_draft(&client, &server_url, "versioned").await;
        let id = created.get("id").unwrap().as_str().unwrap();

        let versions: Value = client
            .get(format!("{}/api/v1/contents/{}/versions", server_url, id))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(versions.as_array().unwrap().len(), 0);

        let response = client
            .patch(format!("{}/api/v1/contents/{}", server_url, id))
            .header("cookie", SESSION_COOKIE)
            .json(&json!({ "title": "Hello Again" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let updated: Value = response.json().await.unwrap();
        assert_eq!(updated.get("title").unwrap().as_str().unwrap(), "Hello Again");

        let versions: Value = client
            .get(format!("{}/api/v1/contents/{}/versions", server_url, id))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let versions = versions.as_array().unwrap();
        assert_eq!(versions.len(), 1);
        // The snapshot holds the state before the update.
        assert_eq!(
            versions[0].get("title").unwrap().as_str().unwrap(),
            "Hello World"
        );
    }

    #[tokio::test]
    async fn invalid_slug_is_rejected() {
        let auth = start_auth_service().await;
        let (server_url, _db) = start_test_server(&auth.uri()).await;
        let client = Client::new();

        let response = client
            .post(format!("{}/api/v1/contents", server_url))
            .header("cookie", SESSION_COOKIE)
            .json(&json!({
                "title": "Bad Slug",
                "slug": "Not A Slug",
                "body": "text",
                "contentType": "page",
                "authorId": "user-1"
            }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 400);
        let body: Value = response.json().await.unwrap();
        assert_eq!(
            body.get("code").unwrap().as_str().unwrap(),
            "VALIDATION_FAILED"
        );
    }

    #[tokio::test]
    async fn duplicate_slug_returns_conflict() {
        let auth = start_auth_service().await;
        let (server_url, _db) = start_test_server(&auth.uri()).await;
        let client = Client::new();

        create_draft(&client, &server_url, "taken").await;

        let response = client
            .post(format!("{}/api/v1/contents", server_url))
            .header("cookie", SESSION_COOKIE)
            .json(&json!({
                "title": "Second",
                "slug": "taken",
                "body": "text",
                "contentType": "blog",
                "authorId": "user-2"
            }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 409);
    }

    #[tokio::test]
    async fn deleted_content_disappears_from_reads() {
        let auth = start_auth_service().await;
        let (server_url, _db) = start_test_server(&auth.uri()).await;
        let client = Client::new();

        let created = create_draft(&client, &server_url, "short-lived").await;
        let id = created.get("id").unwrap().as_str().unwrap();

        let response = client
            .delete(format!("{}/api/v1/contents/{}", server_url, id))
            .header("cookie", SESSION_COOKIE)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 204);

        let response = client
            .get(format!("{}/api/v1/contents/{}", server_url, id))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn soft_deleted_slug_can_be_reused() {
        let auth = start_auth_service().await;
        let (server_url, _db) = start_test_server(&auth.uri()).await;
        let client = Client::new();

        let created = create_draft(&client, &server_url, "phoenix").await;
        let id = created.get("id").unwrap().as_str().unwrap();

        let response = client
            .delete(format!("{}/api/v1/contents/{}", server_url, id))
            .header("cookie", SESSION_COOKIE)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 204);

        // The slug is free again once its owner is soft-deleted.
        let recreated = create_draft(&client, &server_url, "phoenix").await;
        assert_ne!(recreated.get("id").unwrap().as_str().unwrap(), id);
    }
}

mod feature_flag_tests {
    use super::*;

    #[tokio::test]
    async fn toggle_is_scoped_to_the_requested_environment() {
        let auth = start_auth_service().await;
        let (server_url, _db) = start_test_server(&auth.uri()).await;
        let client = Client::new();

        let response = client
            .post(format!("{}/api/v1/analytics/feature-flags", server_url))
            .header("cookie", SESSION_COOKIE)
            .json(&json!({
                "flagName": "newNav",
                "environment": "production",
                "isEnabled": false
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 201);

        // The flag is production-scoped, so a staging toggle must not touch it.
        let response = client
            .post(format!(
                "{}/api/v1/analytics/feature-flags/newNav/toggle",
                server_url
            ))
            .header("cookie", SESSION_COOKIE)
            .json(&json!({ "isEnabled": true, "environment": "staging" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 404);

        // Omitting the environment matches the flag whatever its scope.
        let response = client
            .post(format!(
                "{}/api/v1/analytics/feature-flags/newNav/toggle",
                server_url
            ))
            .header("cookie", SESSION_COOKIE)
            .json(&json!({ "isEnabled": true }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let toggled: Value = response.json().await.unwrap();
        assert!(toggled.get("isEnabled").unwrap().as_bool().unwrap());
    }

    #[tokio::test]
    async fn toggle_without_environment_reaches_any_scope() {
        let auth = start_auth_service().await;
        let (server_url, _db) = start_test_server(&auth.uri()).await;
        let client = Client::new();

        let response = client
            .post(format!("{}/api/v1/analytics/feature-flags", server_url))
            .header("cookie", SESSION_COOKIE)
            .json(&json!({
                "flagName": "stagingOnly",
                "environment": "staging",
                "isEnabled": false
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 201);

        let response = client
            .post(format!(
                "{}/api/v1/analytics/feature-flags/stagingOnly/toggle",
                server_url
            ))
            .header("cookie", SESSION_COOKIE)
            .json(&json!({ "isEnabled": true }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let toggled: Value = response.json().await.unwrap();
        assert!(toggled.get("isEnabled").unwrap().as_bool().unwrap());
        assert_eq!(
            toggled.get("environment").unwrap().as_str().unwrap(),
            "staging"
        );
    }

    #[tokio::test]
    async fn soft_deleted_flag_name_can_be_recreated() {
        let auth = start_auth_service().await;
        let (server_url, db) = start_test_server(&auth.uri()).await;
        let client = Client::new();

        let response = client
            .post(format!("{}/api/v1/analytics/feature-flags", server_url))
            .header("cookie", SESSION_COOKIE)
            .json(&json!({
                "flagName": "revivedFlag",
                "environment": "production",
                "isEnabled": true
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 201);

        // Soft-delete the row; the unique index only covers live rows.
        db.execute_unprepared(
            "UPDATE feature_flags SET deleted_at = CURRENT_TIMESTAMP WHERE flag_name = 'revivedFlag'",
        )
        .await
        .unwrap();

        let response = client
            .post(format!("{}/api/v1/analytics/feature-flags", server_url))
            .header("cookie", SESSION_COOKIE)
            .json(&json!({
                "flagName": "revivedFlag",
                "environment": "production",
                "isEnabled": false
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 201);
    }

    #[tokio::test]
    async fn all_scoped_flags_are_visible_from_any_environment() {
        let auth = start_auth_service().await;
        let (server_url, _db) = start_test_server(&auth.uri()).await;
        let client = Client::new();

        let response = client
            .post(format!("{}/api/v1/analytics/feature-flags", server_url))
            .header("cookie", SESSION_COOKIE)
            .json(&json!({
                "flagName": "globalBanner",
                "environment": "all",
                "isEnabled": true
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 201);

        let response = client
            .get(format!(
                "{}/api/v1/analytics/feature-flags/globalBanner?environment=staging",
                server_url
            ))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
    }
}

mod geo_tests {
    use super::*;

    #[tokio::test]
    async fn locale_lookup_resolves_by_country() {
        let auth = start_auth_service().await;
        let (server_url, _db) = start_test_server(&auth.uri()).await;
        let client = Client::new();

        let response = client
            .post(format!("{}/api/v1/geo/settings", server_url))
            .header("cookie", SESSION_COOKIE)
            .json(&json!({
                "countryCode": "us",
                "languageCode": "EN",
                "currency": "USD"
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 201);
        let created: Value = response.json().await.unwrap();
        // Codes are normalized on write.
        assert_eq!(created.get("countryCode").unwrap().as_str().unwrap(), "US");
        assert_eq!(created.get("languageCode").unwrap().as_str().unwrap(), "en");

        let response = client
            .get(format!("{}/api/v1/geo/settings/locale/en-US", server_url))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);

        // A bare country code works as the lookup key itself.
        let response = client
            .get(format!("{}/api/v1/geo/settings/locale/us", server_url))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);

        let response = client
            .get(format!("{}/api/v1/geo/settings/locale/de-DE", server_url))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 404);
    }
}

mod navigation_tests {
    use super::*;

    #[tokio::test]
    async fn listing_filters_by_location_and_locale() {
        let auth = start_auth_service().await;
        let (server_url, _db) = start_test_server(&auth.uri()).await;
        let client = Client::new();

        for (name, location, locale) in [
            ("main", "header", None),
            ("main-de", "header", Some("de")),
            ("links", "footer", None),
        ] {
            let response = client
                .post(format!("{}/api/v1/navigation", server_url))
                .header("cookie", SESSION_COOKIE)
                .json(&json!({
                    "name": name,
                    "location": location,
                    "items": [{ "label": "Home", "href": "/" }],
                    "locale": locale
                }))
                .send()
                .await
                .unwrap();
            assert_eq!(response.status(), 201);
        }

        let menus: Value = client
            .get(format!("{}/api/v1/navigation?location=header", server_url))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(menus.as_array().unwrap().len(), 2);

        // Locale filter keeps locale-less menus as defaults.
        let menus: Value = client
            .get(format!(
                "{}/api/v1/navigation?location=header&locale=de",
                server_url
            ))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(menus.as_array().unwrap().len(), 2);

        let menus: Value = client
            .get(format!(
                "{}/api/v1/navigation?location=footer&locale=fr",
                server_url
            ))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let menus = menus.as_array().unwrap();
        assert_eq!(menus.len(), 1);
        assert_eq!(menus[0].get("name").unwrap().as_str().unwrap(), "links");
    }

    #[tokio::test]
    async fn deactivated_menus_drop_out_of_listings() {
        let auth = start_auth_service().await;
        let (server_url, _db) = start_test_server(&auth.uri()).await;
        let client = Client::new();

        let response = client
            .post(format!("{}/api/v1/navigation", server_url))
            .header("cookie", SESSION_COOKIE)
            .json(&json!({
                "name": "seasonal",
                "location": "header",
                "items": []
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 201);
        let created: Value = response.json().await.unwrap();
        let id = created.get("id").unwrap().as_str().unwrap();

        let response = client
            .patch(format!("{}/api/v1/navigation/{}", server_url, id))
            .header("cookie", SESSION_COOKIE)
            .json(&json!({ "isActive": false }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);

        let menus: Value = client
            .get(format!("{}/api/v1/navigation?location=header", server_url))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert!(menus.as_array().unwrap().is_empty());
    }
}

mod auth_proxy_tests {
    use super::*;

    #[tokio::test]
    async fn proxy_relays_status_and_set_cookie() {
        let auth = start_auth_service().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/sign-in/email"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("set-cookie", "session=fresh-token; Path=/; HttpOnly")
                    .set_body_json(json!({ "ok": true })),
            )
            .mount(&auth)
            .await;
        let (server_url, _db) = start_test_server(&auth.uri()).await;
        let client = Client::new();

        let response = client
            .post(format!("{}/api/auth/sign-in/email", server_url))
            .json(&json!({ "email": "editor@example.com", "password": "hunter2" }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let set_cookie = response
            .headers()
            .get("set-cookie")
            .expect("set-cookie header should be relayed");
        assert!(
            set_cookie
                .to_str()
                .unwrap()
                .starts_with("session=fresh-token")
        );
        let body: Value = response.json().await.unwrap();
        assert!(body.get("ok").unwrap().as_bool().unwrap());
    }

    #[tokio::test]
    async fn proxy_reports_unreachable_auth_service() {
        let auth = start_auth_service().await;
        let (server_url, _db) = start_test_server(&auth.uri()).await;
        // Re-point the proxy at a closed port by shutting the mock down.
        drop(auth);
        let client = Client::new();

        let response = client
            .post(format!("{}/api/auth/sign-out", server_url))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 502);
        let body: Value = response.json().await.unwrap();
        assert_eq!(
            body.get("code").unwrap().as_str().unwrap(),
            "UPSTREAM_ERROR"
        );
    }
}
