//! Integration tests for media upload, listing and deletion against the
//! local-disk store.

use migration::MigratorTrait;
use reqwest::Client;
use reqwest::multipart;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use sitekit::config::AppConfig;
use sitekit::db::init_pool;
use sitekit::server::{create_app, create_test_app_state};
use std::path::PathBuf;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SESSION_COOKIE: &str = "session=abc123";

async fn start_auth_service() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/get-session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": { "id": "uploader-1", "email": "editor@example.com", "name": "Editor" }
        })))
        .mount(&server)
        .await;
    server
}

async fn start_test_server(auth_url: &str) -> (String, DatabaseConnection, PathBuf) {
    let upload_dir = tempfile::tempdir()
        .expect("Failed to create upload dir")
        .keep();

    let config = AppConfig {
        profile: "test".to_string(),
        database_url: "sqlite::memory:".to_string(),
        db_max_connections: 1,
        auth_service_url: auth_url.to_string(),
        upload_dir: upload_dir.to_string_lossy().into_owned(),
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

    (format!("http://{}", addr), db, upload_dir)
}

fn upload_form(filename: &str, bytes: &'static [u8], mime: &str) -> multipart::Form {
    multipart::Form::new()
        .part(
            "file",
            multipart::Part::bytes(bytes)
                .file_name(filename.to_string())
                .mime_str(mime)
                .unwrap(),
        )
        .text("altText", "A tiny pixel")
        .text("title", "Pixel")
}

#[tokio::test]
async fn upload_stores_file_locally_and_records_metadata() {
    let auth = start_auth_service().await;
    let (server_url, _db, upload_dir) = start_test_server(&auth.uri()).await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/v1/media/upload", server_url))
        .header("cookie", SESSION_COOKIE)
        .multipart(upload_form("pixel.png", b"\x89PNG\r\n\x1a\n", "image/png"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 201);
    let created: Value = response.json().await.unwrap();

    assert_eq!(created.get("filename").unwrap().as_str().unwrap(), "pixel.png");
    assert_eq!(created.get("mimeType").unwrap().as_str().unwrap(), "image/png");
    assert_eq!(created.get("storageType").unwrap().as_str().unwrap(), "local");
    assert_eq!(
        created.get("uploadedByUserId").unwrap().as_str().unwrap(),
        "uploader-1"
    );
    assert_eq!(created.get("altText").unwrap().as_str().unwrap(), "A tiny pixel");

    // The served URL maps back to a real file in the upload directory.
    let url = created.get("url").unwrap().as_str().unwrap();
    let key = url.strip_prefix("/uploads/").expect("local url prefix");
    let stored = upload_dir.join(key);
    assert!(stored.exists(), "uploaded file missing at {:?}", stored);
    assert_eq!(std::fs::read(&stored).unwrap(), b"\x89PNG\r\n\x1a\n");
}

#[tokio::test]
async fn upload_without_file_part_is_rejected() {
    let auth = start_auth_service().await;
    let (server_url, _db, _upload_dir) = start_test_server(&auth.uri()).await;
    let client = Client::new();

    let form = multipart::Form::new().text("altText", "no file here");
    let response = client
        .post(format!("{}/api/v1/media/upload", server_url))
        .header("cookie", SESSION_COOKIE)
        .multipart(form)
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
async fn upload_requires_a_session() {
    let auth = start_auth_service().await;
    let (server_url, _db, _upload_dir) = start_test_server(&auth.uri()).await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/v1/media/upload", server_url))
        .multipart(upload_form("pixel.png", b"\x89PNG", "image/png"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn listing_is_paginated_newest_first() {
    let auth = start_auth_service().await;
    let (server_url, _db, _upload_dir) = start_test_server(&auth.uri()).await;
    let client = Client::new();

    for name in ["a.txt", "b.txt", "c.txt"] {
        let form = multipart::Form::new().part(
            "file",
            multipart::Part::bytes(b"content".as_slice())
                .file_name(name.to_string())
                .mime_str("text/plain")
                .unwrap(),
        );
        let response = client
            .post(format!("{}/api/v1/media/upload", server_url))
            .header("cookie", SESSION_COOKIE)
            .multipart(form)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 201);
    }

    let page: Value = client
        .get(format!("{}/api/v1/media?limit=2", server_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(page.pointer("/meta/total").unwrap().as_u64().unwrap(), 3);
    assert_eq!(page.pointer("/meta/limit").unwrap().as_u64().unwrap(), 2);
    assert_eq!(page.get("data").unwrap().as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn deleted_media_disappears_from_reads() {
    let auth = start_auth_service().await;
    let (server_url, _db, _upload_dir) = start_test_server(&auth.uri()).await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/v1/media/upload", server_url))
        .header("cookie", SESSION_COOKIE)
        .multipart(upload_form("gone.png", b"\x89PNG", "image/png"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
    let created: Value = response.json().await.unwrap();
    let id = created.get("id").unwrap().as_str().unwrap();

    let response = client
        .delete(format!("{}/api/v1/media/{}", server_url, id))
        .header("cookie", SESSION_COOKIE)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 204);

    let response = client
        .get(format!("{}/api/v1/media/{}", server_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}
