use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use yubin_core::AppConfig;

const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_MIN_CONNECTIONS: u32 = 1;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 10;

// Path relative to crates/yubin-db/Cargo.toml; resolves to <workspace-root>/migrations/
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");

#[derive(Debug, Clone, Copy)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            min_connections: DEFAULT_MIN_CONNECTIONS,
            acquire_timeout_secs: DEFAULT_ACQUIRE_TIMEOUT_SECS,
        }
    }
}

impl PoolConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            max_connections: config.db_max_connections,
            min_connections: config.db_min_connections,
            acquire_timeout_secs: config.db_acquire_timeout_secs,
        }
    }
}

/// Startup connection retry schedule.
#[derive(Debug, Clone, Copy)]
pub struct ConnectRetry {
    /// Total attempts; `0` is treated as `1`.
    pub attempts: u32,
    pub delay: Duration,
}

impl ConnectRetry {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            attempts: config.db_connect_retries,
            delay: Duration::from_secs(config.db_connect_retry_delay_secs),
        }
    }
}

#[derive(Debug, Error)]
pub enum DbError {
    #[error("failed to connect to database after {attempts} attempts: {source}")]
    ConnectRetriesExhausted {
        attempts: u32,
        #[source]
        source: sqlx::Error,
    },
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Connect to a Postgres pool using explicit URL and config.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the connection cannot be established.
pub async fn connect_pool(database_url: &str, config: PoolConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(database_url)
        .await
}

/// Connect to a Postgres pool, retrying while the database is still coming up.
///
/// Each failed attempt is logged and followed by `retry.delay` before the next.
///
/// # Errors
///
/// Returns [`DbError::ConnectRetriesExhausted`] carrying the last connection
/// error once every attempt has failed.
pub async fn connect_pool_with_retry(
    database_url: &str,
    config: PoolConfig,
    retry: ConnectRetry,
) -> Result<PgPool, DbError> {
    let attempts = retry.attempts.max(1);
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        match connect_pool(database_url, config).await {
            Ok(pool) => {
                tracing::info!(attempt, "connected to database");
                return Ok(pool);
            }
            Err(source) if attempt >= attempts => {
                return Err(DbError::ConnectRetriesExhausted { attempts, source });
            }
            Err(e) => {
                tracing::warn!(
                    attempt,
                    attempts,
                    delay_secs = retry.delay.as_secs(),
                    error = %e,
                    "could not connect to database, retrying"
                );
                tokio::time::sleep(retry.delay).await;
            }
        }
    }
}

/// Run all pending migrations against the pool.
///
/// # Errors
///
/// Returns [`sqlx::migrate::MigrateError`] if any migration fails.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Send a `SELECT 1` to verify the pool has a live connection.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await?;
    Ok(())
}

/// Run a full health check: ping the pool and return a typed error on failure.
///
/// # Errors
///
/// Returns [`DbError`] if the ping fails.
pub async fn health_check(pool: &PgPool) -> Result<(), DbError> {
    ping(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_config_has_sane_defaults() {
        let config = PoolConfig::default();

        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.min_connections, DEFAULT_MIN_CONNECTIONS);
        assert_eq!(config.acquire_timeout_secs, DEFAULT_ACQUIRE_TIMEOUT_SECS);
    }

    #[tokio::test]
    async fn connect_with_retry_reports_attempts_when_unreachable() {
        let config = PoolConfig {
            acquire_timeout_secs: 1,
            ..PoolConfig::default()
        };
        let retry = ConnectRetry {
            attempts: 2,
            delay: Duration::from_millis(1),
        };
        // Port 1 on localhost refuses connections.
        let err = connect_pool_with_retry("postgres://yubin@127.0.0.1:1/yubin", config, retry)
            .await
            .unwrap_err();
        assert!(
            matches!(err, DbError::ConnectRetriesExhausted { attempts: 2, .. }),
            "got {err:?}"
        );
    }

    #[tokio::test]
    async fn zero_attempts_still_tries_once() {
        let retry = ConnectRetry {
            attempts: 0,
            delay: Duration::from_millis(1),
        };
        let config = PoolConfig {
            acquire_timeout_secs: 1,
            ..PoolConfig::default()
        };
        let err = connect_pool_with_retry("postgres://yubin@127.0.0.1:1/yubin", config, retry)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::ConnectRetriesExhausted { attempts: 1, .. }
        ));
    }
}

pub mod access_logs;
pub mod store;

pub use access_logs::{insert_access_log, list_access_log_counts, AccessLogCountRow, AccessLogRow};
pub use store::{AccessLogStore, PgAccessLogStore};
