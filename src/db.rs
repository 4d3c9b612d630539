//! SeaORM connection pool setup.
//!
//! The service runs against Postgres in deployment and SQLite (including
//! `sqlite::memory:`) in tests. Pool sizing and the acquire timeout come
//! from [`AppConfig`].

use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::time::Duration;
use tokio::time::sleep;

use crate::config::AppConfig;

/// Errors that can occur while opening the pool.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("failed to connect to database: {source}")]
    ConnectionFailed {
        #[from]
        source: sea_orm::DbErr,
    },
    #[error("database URL is empty")]
    MissingUrl,
}

/// Opens the connection pool, retrying transient failures with exponential
/// backoff.
///
/// SQLite gets a single attempt: the engine is in-process, so a failure
/// there is a configuration problem no retry will cure.
pub async fn init_pool(cfg: &AppConfig) -> Result<DatabaseConnection> {
    if cfg.database_url.is_empty() {
        return Err(DatabaseError::MissingUrl.into());
    }

    let mut options = ConnectOptions::new(&cfg.database_url);
    options
        .max_connections(cfg.db_max_connections)
        .acquire_timeout(Duration::from_millis(cfg.db_acquire_timeout_ms))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(true)
        .sqlx_logging_level(log::LevelFilter::Debug);

    let attempts = if cfg.database_url.starts_with("sqlite") {
        1
    } else {
        5
    };
    let mut backoff = Duration::from_millis(100);
    let mut attempt = 0;

    loop {
        attempt += 1;
        match Database::connect(options.clone()).await {
            Ok(conn) => {
                tracing::info!(attempt, "database pool ready");
                return Ok(conn);
            }
            Err(error) if attempt < attempts => {
                tracing::warn!(
                    attempt,
                    %error,
                    backoff_ms = backoff.as_millis() as u64,
                    "database connection failed, retrying"
                );
                sleep(backoff).await;
                backoff *= 2;
            }
            Err(error) => {
                tracing::error!(attempt, %error, "database connection failed");
                return Err(DatabaseError::ConnectionFailed { source: error }.into());
            }
        }
    }
}

/// Verifies the connection is alive with a `SELECT 1`.
pub async fn health_check(db: &DatabaseConnection) -> Result<()> {
    let stmt = Statement::from_string(db.get_database_backend(), "SELECT 1".to_string());
    db.query_one(stmt)
        .await
        .context("Database health check failed")?;
    Ok(())
}
