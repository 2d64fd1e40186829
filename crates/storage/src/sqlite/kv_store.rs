use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::repository::{KeyValueStore, StorageError};

/// `SQLite`-backed key/value store. Every key is namespaced by `scope`, so
/// several challenges can share one database file.
#[derive(Clone)]
pub struct SqliteKeyValueStore {
    pool: SqlitePool,
    scope: String,
}

impl SqliteKeyValueStore {
    pub(crate) fn new(pool: SqlitePool, scope: String) -> Self {
        Self { pool, scope }
    }

    #[must_use]
    pub fn scope(&self) -> &str {
        &self.scope
    }
}

#[async_trait]
impl KeyValueStore for SqliteKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE scope = ?1 AND key = ?2")
            .bind(self.scope.as_str())
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        row.map(|row| row.try_get::<String, _>("value"))
            .transpose()
            .map_err(|err| StorageError::Serialization(err.to_string()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO kv_store (scope, key, value, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(scope, key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
        )
        .bind(self.scope.as_str())
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        debug!(scope = %self.scope, key, bytes = value.len(), "stored value");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM kv_store WHERE scope = ?1 AND key = ?2")
            .bind(self.scope.as_str())
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        debug!(scope = %self.scope, key, "removed value");
        Ok(())
    }
}
