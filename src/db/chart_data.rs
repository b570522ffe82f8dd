use chrono::Utc;

use super::models::ChartDataRow;
use super::{new_id, Store};
use crate::error::{AppError, Result};
use crate::types::ChartData;

const SELECT_CHART: &str = r#"
    SELECT id, date_range, mon, tue, wed, thu, fri, sat, sun, is_active, created_at, updated_at
    FROM chart_data
"#;

/// Hand-entered grid cells, Monday first.
#[derive(Debug, Clone, Default)]
pub struct NewChartData {
    pub date_range: String,
    pub days: [String; 7],
}

#[derive(Debug, Clone, Default)]
pub struct ChartDataUpdate {
    pub date_range: Option<String>,
    pub days: [Option<String>; 7],
    pub is_active: Option<bool>,
}

impl Store {
    pub async fn list_chart_data(&self) -> Result<Vec<ChartData>> {
        let rows = sqlx::query_as::<_, ChartDataRow>(&format!(
            "{SELECT_CHART} WHERE is_active = 1 ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool())
        .await?;
        Ok(rows.into_iter().map(ChartData::from).collect())
    }

    pub async fn get_chart_data(&self, id: &str) -> Result<ChartData> {
        sqlx::query_as::<_, ChartDataRow>(&format!("{SELECT_CHART} WHERE id = ?"))
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .map(ChartData::from)
            .ok_or_else(|| AppError::NotFound("Chart data not found".to_string()))
    }

    pub async fn count_chart_data(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM chart_data")
            .fetch_one(self.pool())
            .await?;
        Ok(count)
    }

    pub async fn create_chart_data(&self, c: NewChartData) -> Result<ChartData> {
        let id = new_id();
        let now = Utc::now();
        let [mon, tue, wed, thu, fri, sat, sun] = c.days;

        sqlx::query(
            r#"
            INSERT INTO chart_data (id, date_range, mon, tue, wed, thu, fri, sat, sun, is_active, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 1, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&c.date_range)
        .bind(mon)
        .bind(tue)
        .bind(wed)
        .bind(thu)
        .bind(fri)
        .bind(sat)
        .bind(sun)
        .bind(now)
        .bind(now)
        .execute(self.pool())
        .await?;

        self.get_chart_data(&id).await
    }

    pub async fn update_chart_data(&self, id: &str, u: ChartDataUpdate) -> Result<ChartData> {
        let [mon, tue, wed, thu, fri, sat, sun] = u.days;
        let res = sqlx::query(
            r#"
            UPDATE chart_data SET
                date_range = COALESCE(?1, date_range),
                mon        = COALESCE(?2, mon),
                tue        = COALESCE(?3, tue),
                wed        = COALESCE(?4, wed),
                thu        = COALESCE(?5, thu),
                fri        = COALESCE(?6, fri),
                sat        = COALESCE(?7, sat),
                sun        = COALESCE(?8, sun),
                is_active  = COALESCE(?9, is_active),
                updated_at = ?10
            WHERE id = ?11
            "#,
        )
        .bind(u.date_range)
        .bind(mon)
        .bind(tue)
        .bind(wed)
        .bind(thu)
        .bind(fri)
        .bind(sat)
        .bind(sun)
        .bind(u.is_active)
        .bind(Utc::now())
        .bind(id)
        .execute(self.pool())
        .await?;

        if res.rows_affected() == 0 {
            return Err(AppError::NotFound("Chart data not found".to_string()));
        }
        self.get_chart_data(id).await
    }

    pub async fn delete_chart_data(&self, id: &str) -> Result<()> {
        let res = sqlx::query("DELETE FROM chart_data WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;
        if res.rows_affected() == 0 {
            return Err(AppError::NotFound("Chart data not found".to_string()));
        }
        Ok(())
    }
}
