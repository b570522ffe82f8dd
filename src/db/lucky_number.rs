use chrono::Utc;

use super::models::LuckyNumberRow;
use super::Store;
use crate::error::Result;
use crate::types::LuckyNumber;

/// Shown when nothing has been set.
pub const UNSET: &str = "-";

impl Store {
    /// The singleton row, created with `-`/`-` on first access.
    pub async fn lucky_number(&self) -> Result<LuckyNumber> {
        sqlx::query(
            "INSERT OR IGNORE INTO lucky_number (id, golden_ank, motor_patti, updated_at) VALUES (1, ?, ?, ?)",
        )
        .bind(UNSET)
        .bind(UNSET)
        .bind(Utc::now())
        .execute(self.pool())
        .await?;

        let row = sqlx::query_as::<_, LuckyNumberRow>(
            "SELECT golden_ank, motor_patti, updated_at FROM lucky_number WHERE id = 1",
        )
        .fetch_one(self.pool())
        .await?;
        Ok(row.into())
    }

    /// `None` keeps the current value.
    pub async fn set_lucky_number(
        &self,
        golden_ank: Option<String>,
        motor_patti: Option<String>,
    ) -> Result<LuckyNumber> {
        self.lucky_number().await?;
        sqlx::query(
            r#"
            UPDATE lucky_number SET
                golden_ank  = COALESCE(?1, golden_ank),
                motor_patti = COALESCE(?2, motor_patti),
                updated_at  = ?3
            WHERE id = 1
            "#,
        )
        .bind(golden_ank)
        .bind(motor_patti)
        .bind(Utc::now())
        .execute(self.pool())
        .await?;
        self.lucky_number().await
    }
}
