use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::{info, instrument};

use super::{KvStore, VersionedValue};
use crate::shared::AppError;

/// PostgreSQL-backed KvStore for production.
///
/// All entries live in a single `kv_entries` table; conditional writes
/// compare the stored version inside the UPDATE so two racing submissions
/// cannot both apply against the same snapshot.
pub struct PostgresKvStore {
    pool: PgPool,
}

impl PostgresKvStore {
    /// Connects and ensures the backing table exists
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPool::connect(database_url).await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS kv_entries (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                version BIGINT NOT NULL DEFAULT 1
            )
            "#,
        )
        .execute(&pool)
        .await?;

        info!("Connected to PostgreSQL kv backend");
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn storage_err(e: sqlx::Error) -> AppError {
    AppError::Storage(e.to_string())
}

#[async_trait]
impl KvStore for PostgresKvStore {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<VersionedValue>, AppError> {
        let row = sqlx::query("SELECT value, version FROM kv_entries WHERE key = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_err)?;

        Ok(row.map(|r| VersionedValue {
            value: r.get::<String, _>("value"),
            version: r.get::<i64, _>("version") as u64,
        }))
    }

    #[instrument(skip(self, value))]
    async fn put(&self, key: &str, value: String) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO kv_entries (key, value, version) VALUES ($1, $2, 1)
            ON CONFLICT (key)
            DO UPDATE SET value = $2, version = kv_entries.version + 1
            "#,
        )
        .bind(key)
        .bind(&value)
        .execute(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(())
    }

    #[instrument(skip(self, value))]
    async fn conditional_put(
        &self,
        key: &str,
        value: String,
        expected_version: Option<u64>,
    ) -> Result<bool, AppError> {
        let result = match expected_version {
            None => {
                sqlx::query(
                    r#"
                    INSERT INTO kv_entries (key, value, version) VALUES ($1, $2, 1)
                    ON CONFLICT (key) DO NOTHING
                    "#,
                )
                .bind(key)
                .bind(&value)
                .execute(&self.pool)
                .await
            }
            Some(version) => {
                sqlx::query(
                    r#"
                    UPDATE kv_entries
                    SET value = $2, version = version + 1
                    WHERE key = $1 AND version = $3
                    "#,
                )
                .bind(key)
                .bind(&value)
                .bind(version as i64)
                .execute(&self.pool)
                .await
            }
        }
        .map_err(storage_err)?;

        Ok(result.rows_affected() == 1)
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM kv_entries WHERE key = $1")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, AppError> {
        // Escape LIKE metacharacters so a literal prefix match is performed
        let pattern = format!(
            "{}%",
            prefix.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
        );

        let rows = sqlx::query("SELECT key FROM kv_entries WHERE key LIKE $1")
            .bind(pattern)
            .fetch_all(&self.pool)
            .await
            .map_err(storage_err)?;

        Ok(rows.iter().map(|r| r.get::<String, _>("key")).collect())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;

        Ok(())
    }
}
