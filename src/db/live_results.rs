use chrono::Utc;

use super::models::LiveResultRow;
use super::{new_id, Store};
use crate::error::{AppError, Result};
use crate::types::LiveResult;

pub const LOADING: &str = "Loading...";

#[derive(Debug, Clone)]
pub struct NewLiveResult {
    pub name: String,
    pub result: String,
    pub time_range: String,
}

#[derive(Debug, Clone, Default)]
pub struct LiveResultUpdate {
    pub name: Option<String>,
    pub result: Option<String>,
    pub time_range: Option<String>,
    pub is_active: Option<bool>,
}

impl Store {
    /// Active banners, newest first.
    pub async fn list_live_results(&self) -> Result<Vec<LiveResult>> {
        let rows = sqlx::query_as::<_, LiveResultRow>(
            r#"
            SELECT id, name, result, time_range, is_active, created_at, updated_at
            FROM live_results
            WHERE is_active = 1
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.pool())
        .await?;
        Ok(rows.into_iter().map(LiveResult::from).collect())
    }

    pub async fn get_live_result(&self, id: &str) -> Result<LiveResult> {
        sqlx::query_as::<_, LiveResultRow>(
            r#"
            SELECT id, name, result, time_range, is_active, created_at, updated_at
            FROM live_results
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?
        .map(LiveResult::from)
        .ok_or_else(|| AppError::NotFound("Live result not found".to_string()))
    }

    pub async fn count_live_results(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM live_results")
            .fetch_one(self.pool())
            .await?;
        Ok(count)
    }

    pub async fn create_live_result(&self, r: NewLiveResult) -> Result<LiveResult> {
        let id = new_id();
        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO live_results (id, name, result, time_range, is_active, created_at, updated_at)
            VALUES (?, ?, ?, ?, 1, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&r.name)
        .bind(&r.result)
        .bind(&r.time_range)
        .bind(now)
        .bind(now)
        .execute(self.pool())
        .await?;

        self.get_live_result(&id).await
    }

    pub async fn update_live_result(&self, id: &str, u: LiveResultUpdate) -> Result<LiveResult> {
        let res = sqlx::query(
            r#"
            UPDATE live_results SET
                name       = COALESCE(?1, name),
                result     = COALESCE(?2, result),
                time_range = COALESCE(?3, time_range),
                is_active  = COALESCE(?4, is_active),
                updated_at = ?5
            WHERE id = ?6
            "#,
        )
        .bind(u.name)
        .bind(u.result)
        .bind(u.time_range)
        .bind(u.is_active)
        .bind(Utc::now())
        .bind(id)
        .execute(self.pool())
        .await?;

        if res.rows_affected() == 0 {
            return Err(AppError::NotFound("Live result not found".to_string()));
        }
        self.get_live_result(id).await
    }

    pub async fn delete_live_result(&self, id: &str) -> Result<()> {
        let res = sqlx::query("DELETE FROM live_results WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;
        if res.rows_affected() == 0 {
            return Err(AppError::NotFound("Live result not found".to_string()));
        }
        Ok(())
    }
}
