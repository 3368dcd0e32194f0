//! The access-log seam used by the HTTP layer.

use async_trait::async_trait;
use sqlx::PgPool;
use yubin_core::AccessLogCount;

use crate::{access_logs, DbError};

/// Persistence for lookup access logs.
#[async_trait]
pub trait AccessLogStore: Send + Sync {
    /// Appends one lookup of `postal_code`.
    async fn record(&self, postal_code: &str) -> Result<(), DbError>;

    /// Lookup counts per postal code, most requested first.
    async fn summarize(&self) -> Result<Vec<AccessLogCount>, DbError>;

    /// Verifies the backing store is reachable.
    async fn ping(&self) -> Result<(), DbError>;
}

/// [`AccessLogStore`] backed by a Postgres pool.
#[derive(Debug, Clone)]
pub struct PgAccessLogStore {
    pool: PgPool,
}

impl PgAccessLogStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl AccessLogStore for PgAccessLogStore {
    async fn record(&self, postal_code: &str) -> Result<(), DbError> {
        let row = access_logs::insert_access_log(&self.pool, postal_code).await?;
        tracing::debug!(id = row.id, postal_code = %row.postal_code, "access log recorded");
        Ok(())
    }

    async fn summarize(&self) -> Result<Vec<AccessLogCount>, DbError> {
        let rows = access_logs::list_access_log_counts(&self.pool).await?;
        Ok(rows.into_iter().map(AccessLogCount::from).collect())
    }

    async fn ping(&self) -> Result<(), DbError> {
        crate::health_check(&self.pool).await
    }
}
