//! SQLite settings repository
//!
//! One key-value row per setting. Text values and binary payloads share the
//! table; `set` and `set_blob` each leave the other column untouched for an
//! existing key.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use werkstatt_errors::{AppError, AppResult};

use crate::domain::entities::Setting;
use crate::domain::repositories::SettingRepository;

use super::converters::setting_from_row;
use super::rows::SettingRow;

pub struct SqliteSettingRepository {
    pool: SqlitePool,
}

impl SqliteSettingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingRepository for SqliteSettingRepository {
    async fn get(&self, key: &str) -> AppResult<Option<Setting>> {
        let row = sqlx::query_as::<_, SettingRow>(
            "SELECT key, value, description, updated_at FROM settings WHERE key = ?",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load setting: {}", e)))?;

        Ok(row.map(setting_from_row))
    }

    async fn set(&self, setting: &Setting) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO settings (key, value, description, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                description = excluded.description,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&setting.key)
        .bind(&setting.value)
        .bind(&setting.description)
        .bind(setting.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save setting: {}", e)))?;

        Ok(())
    }

    async fn get_blob(&self, key: &str) -> AppResult<Option<Vec<u8>>> {
        let row: Option<(Option<Vec<u8>>,)> =
            sqlx::query_as("SELECT payload FROM settings WHERE key = ?")
                .bind(key)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to load setting payload: {}", e)))?;

        Ok(row.and_then(|(payload,)| payload))
    }

    async fn set_blob(&self, key: &str, payload: &[u8]) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO settings (key, value, description, updated_at, payload)
            VALUES (?, '', '', ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(Utc::now())
        .bind(payload)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save setting payload: {}", e)))?;

        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<Setting>> {
        let rows = sqlx::query_as::<_, SettingRow>(
            "SELECT key, value, description, updated_at FROM settings ORDER BY key",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list settings: {}", e)))?;

        Ok(rows.into_iter().map(setting_from_row).collect())
    }
}
