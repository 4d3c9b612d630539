//! Media object storage.
//!
//! Uploads go to a primary S3-compatible store when one is configured, with
//! local disk as the always-available fallback. The [`MediaStorage`] facade
//! records which backend actually took the bytes so callers can persist it
//! alongside the media row.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_s3::{
    config::{Builder, Credentials, Region},
    primitives::ByteStream,
    Client,
};
use bytes::Bytes;
use chrono::Utc;
use metrics::counter;
use thiserror::Error;

use crate::config::{AppConfig, S3Config};
use crate::models::enums::StorageType;

/// Errors that can occur while storing or deleting objects.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("upload failed: {0}")]
    Upload(String),
    #[error("delete failed: {0}")]
    Delete(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Public location of a stored object.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub url: String,
    pub storage_type: StorageType,
}

/// A single storage backend capable of holding uploaded media.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stores `data` under `key` and returns the public URL.
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> Result<String, StorageError>;

    /// Removes the object stored under `key`.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    fn storage_type(&self) -> StorageType;
}

/// S3-compatible primary store (AWS S3, MinIO, R2).
pub struct S3Store {
    client: Client,
    bucket: String,
    public_base: String,
}

impl S3Store {
    /// Builds a client from configuration; explicit credentials win over the
    /// ambient AWS environment.
    pub async fn from_config(cfg: &S3Config) -> Self {
        let mut builder = Builder::new()
            .region(Region::new(cfg.region.clone()))
            // Path-style is required by most S3-compatible stores.
            .force_path_style(cfg.endpoint.is_some());

        if let Some(ref endpoint) = cfg.endpoint {
            builder = builder.endpoint_url(endpoint.clone());
        }

        match (&cfg.access_key_id, &cfg.secret_access_key) {
            (Some(access_key), Some(secret_key)) => {
                let creds = Credentials::new(access_key, secret_key, None, None, "static");
                builder = builder.credentials_provider(creds);
            }
            _ => {
                let sdk_config = aws_config::load_from_env().await;
                if let Some(creds) = sdk_config.credentials_provider() {
                    builder = builder.credentials_provider(creds);
                }
            }
        }

        let public_base = cfg.public_base_url.clone().unwrap_or_else(|| {
            format!("https://{}.s3.{}.amazonaws.com", cfg.bucket, cfg.region)
        });

        Self {
            client: Client::from_conf(builder.build()),
            bucket: cfg.bucket.clone(),
            public_base: public_base.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> Result<String, StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| StorageError::Upload(e.to_string()))?;

        Ok(format!("{}/{}", self.public_base, key))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::Delete(e.to_string()))?;

        Ok(())
    }

    fn storage_type(&self) -> StorageType {
        StorageType::S3
    }
}

/// Local filesystem fallback store.
pub struct LocalStore {
    root: PathBuf,
    base_url: String,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ObjectStore for LocalStore {
    async fn put(
        &self,
        key: &str,
        data: Bytes,
        _content_type: &str,
    ) -> Result<String, StorageError> {
        let path = self.root.join(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, &data).await?;

        Ok(format!("{}/{}", self.base_url, key))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        match tokio::fs::remove_file(self.root.join(key)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn storage_type(&self) -> StorageType {
        StorageType::Local
    }
}

/// Facade over the configured primary store and the local fallback.
pub struct MediaStorage {
    primary: Option<Arc<dyn ObjectStore>>,
    fallback: Arc<dyn ObjectStore>,
}

impl MediaStorage {
    /// Wires storage from application configuration: S3 primary when a bucket
    /// is configured, local disk otherwise.
    pub async fn from_config(config: &AppConfig) -> Self {
        let primary: Option<Arc<dyn ObjectStore>> = match config.s3 {
            Some(ref s3_config) => Some(Arc::new(S3Store::from_config(s3_config).await)),
            None => None,
        };
        let fallback = Arc::new(LocalStore::new(
            config.upload_dir.clone(),
            config.upload_base_url.clone(),
        ));

        Self::new(primary, fallback)
    }

    pub fn new(primary: Option<Arc<dyn ObjectStore>>, fallback: Arc<dyn ObjectStore>) -> Self {
        Self { primary, fallback }
    }

    /// Stores an object, preferring the primary backend and degrading to the
    /// fallback when the primary write fails.
    pub async fn store(
        &self,
        key: &str,
        data: Bytes,
        content_type: &str,
    ) -> Result<StoredObject, StorageError> {
        if let Some(ref primary) = self.primary {
            match primary.put(key, data.clone(), content_type).await {
                Ok(url) => {
                    return Ok(StoredObject {
                        url,
                        storage_type: primary.storage_type(),
                    });
                }
                Err(err) => {
                    tracing::warn!(%key, error = %err, "Primary storage write failed, using fallback");
                    counter!("media_storage_fallback_total").increment(1);
                }
            }
        }

        let url = self.fallback.put(key, data, content_type).await?;
        Ok(StoredObject {
            url,
            storage_type: self.fallback.storage_type(),
        })
    }

    /// Removes an object from the backend that holds it.
    pub async fn remove(&self, key: &str, storage_type: StorageType) -> Result<(), StorageError> {
        match (&self.primary, storage_type) {
            (Some(primary), st) if st == primary.storage_type() => primary.delete(key).await,
            _ => self.fallback.delete(key).await,
        }
    }
}

/// Builds a collision-resistant object key for an uploaded file:
/// `media/{timestamp}-{uuid16}-{sanitized-stem}.{ext}`.
pub fn object_key(original_filename: &str) -> String {
    let (stem, ext) = match original_filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (original_filename, None),
    };

    let sanitized = sanitize_stem(stem);
    let unique = uuid::Uuid::new_v4().simple().to_string();
    let timestamp = Utc::now().timestamp_millis();

    match ext {
        Some(ext) => format!(
            "media/{}-{}-{}.{}",
            timestamp,
            &unique[..16],
            sanitized,
            ext.to_lowercase()
        ),
        None => format!("media/{}-{}-{}", timestamp, &unique[..16], sanitized),
    }
}

fn sanitize_stem(stem: &str) -> String {
    let mut out = String::with_capacity(stem.len());
    let mut last_dash = true;
    for ch in stem.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    let trimmed = out.trim_end_matches('-');
    if trimmed.is_empty() {
        "file".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingStore;

    #[async_trait]
    impl ObjectStore for FailingStore {
        async fn put(&self, _: &str, _: Bytes, _: &str) -> Result<String, StorageError> {
            Err(StorageError::Upload("bucket unavailable".to_string()))
        }

        async fn delete(&self, _: &str) -> Result<(), StorageError> {
            Err(StorageError::Delete("bucket unavailable".to_string()))
        }

        fn storage_type(&self) -> StorageType {
            StorageType::S3
        }
    }

    #[test]
    fn object_key_sanitizes_and_keeps_extension() {
        let key = object_key("My Photo (1).PNG");
        assert!(key.starts_with("media/"));
        assert!(key.ends_with("-my-photo-1.png"));
    }

    #[test]
    fn object_key_handles_missing_extension() {
        let key = object_key("...");
        assert!(key.starts_with("media/"));
        assert!(key.ends_with("-file"));
    }

    #[tokio::test]
    async fn local_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path(), "/uploads");

        let url = store
            .put("media/test.txt", Bytes::from_static(b"hello"), "text/plain")
            .await
            .unwrap();
        assert_eq!(url, "/uploads/media/test.txt");
        assert_eq!(
            tokio::fs::read(dir.path().join("media/test.txt"))
                .await
                .unwrap(),
            b"hello"
        );

        store.delete("media/test.txt").await.unwrap();
        // Deleting a missing object is not an error.
        store.delete("media/test.txt").await.unwrap();
    }

    #[tokio::test]
    async fn failed_primary_falls_back_to_local() {
        let dir = tempfile::tempdir().unwrap();
        let storage = MediaStorage::new(
            Some(Arc::new(FailingStore)),
            Arc::new(LocalStore::new(dir.path(), "/uploads")),
        );

        let stored = storage
            .store("media/pic.png", Bytes::from_static(b"png"), "image/png")
            .await
            .unwrap();

        assert_eq!(stored.storage_type, StorageType::Local);
        assert_eq!(stored.url, "/uploads/media/pic.png");
    }

    #[tokio::test]
    async fn no_primary_uses_fallback_directly() {
        let dir = tempfile::tempdir().unwrap();
        let storage = MediaStorage::new(None, Arc::new(LocalStore::new(dir.path(), "/uploads")));

        let stored = storage
            .store("media/doc.pdf", Bytes::from_static(b"%PDF"), "application/pdf")
            .await
            .unwrap();
        assert_eq!(stored.storage_type, StorageType::Local);
    }
}
