use std::collections::BTreeMap;

use chrono::Utc;

use super::models::SettingRow;
use super::Store;
use crate::error::{on_unique_violation, AppError, Result};
use crate::types::Setting;

const SELECT_SETTING: &str =
    "SELECT key, value, description, created_at, updated_at FROM settings";

impl Store {
    /// `{KEY: value}` ordered by key.
    pub async fn settings_map(&self) -> Result<BTreeMap<String, String>> {
        let rows = sqlx::query_as::<_, SettingRow>(&format!("{SELECT_SETTING} ORDER BY key ASC"))
            .fetch_all(self.pool())
            .await?;
        Ok(rows.into_iter().map(|r| (r.key, r.value)).collect())
    }

    pub async fn get_setting(&self, key: &str) -> Result<Setting> {
        sqlx::query_as::<_, SettingRow>(&format!("{SELECT_SETTING} WHERE key = ?"))
            .bind(key.to_uppercase())
            .fetch_optional(self.pool())
            .await?
            .map(Setting::from)
            .ok_or_else(|| AppError::NotFound("Setting not found".to_string()))
    }

    pub async fn create_setting(&self, key: &str, value: &str, description: &str) -> Result<Setting> {
        let key = key.to_uppercase();
        let now = Utc::now();
        sqlx::query(
            "INSERT INTO settings (key, value, description, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&key)
        .bind(value)
        .bind(description)
        .bind(now)
        .bind(now)
        .execute(self.pool())
        .await
        .map_err(|e| on_unique_violation(e, "Setting with this key already exists"))?;

        self.get_setting(&key).await
    }

    /// Creates or overwrites `key`.
    pub async fn upsert_setting(&self, key: &str, value: &str, description: &str) -> Result<Setting> {
        let key = key.to_uppercase();
        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO settings (key, value, description, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?4)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                description = excluded.description,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&key)
        .bind(value)
        .bind(description)
        .bind(now)
        .execute(self.pool())
        .await?;

        self.get_setting(&key).await
    }

    /// Inserts `key` only when absent; existing values win.
    pub async fn ensure_setting(&self, key: &str, value: &str, description: &str) -> Result<()> {
        let now = Utc::now();
        sqlx::query(
            "INSERT OR IGNORE INTO settings (key, value, description, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(key.to_uppercase())
        .bind(value)
        .bind(description)
        .bind(now)
        .bind(now)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    pub async fn delete_setting(&self, key: &str) -> Result<()> {
        let res = sqlx::query("DELETE FROM settings WHERE key = ?")
            .bind(key.to_uppercase())
            .execute(self.pool())
            .await?;
        if res.rows_affected() == 0 {
            return Err(AppError::NotFound("Setting not found".to_string()));
        }
        Ok(())
    }
}
