//! Database operations for `access_logs`.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use yubin_core::AccessLogCount;

use crate::DbError;

/// A row from the `access_logs` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AccessLogRow {
    pub id: i64,
    pub postal_code: String,
    pub created_at: DateTime<Utc>,
}

/// One aggregate row: how many times a postal code was looked up.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AccessLogCountRow {
    pub postal_code: String,
    /// `COUNT(*)` is `BIGINT` in Postgres.
    pub request_count: i64,
}

impl From<AccessLogCountRow> for AccessLogCount {
    fn from(row: AccessLogCountRow) -> Self {
        Self {
            postal_code: row.postal_code,
            request_count: row.request_count,
        }
    }
}

/// Records one lookup of `postal_code`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails, including when
/// `postal_code` violates the seven-digit check constraint.
pub async fn insert_access_log(pool: &PgPool, postal_code: &str) -> Result<AccessLogRow, DbError> {
    let row = sqlx::query_as::<_, AccessLogRow>(
        "INSERT INTO access_logs (postal_code) VALUES ($1) \
         RETURNING id, postal_code, created_at",
    )
    .bind(postal_code)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Returns lookup counts per postal code, most requested first.
///
/// Ties are ordered by postal code so the report is stable.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_access_log_counts(pool: &PgPool) -> Result<Vec<AccessLogCountRow>, DbError> {
    let rows = sqlx::query_as::<_, AccessLogCountRow>(
        "SELECT postal_code, COUNT(*) AS request_count \
         FROM access_logs \
         GROUP BY postal_code \
         ORDER BY request_count DESC, postal_code ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
