use chrono::{NaiveDate, Utc};
use sqlx::{QueryBuilder, Sqlite};

use super::models::DailyResultRow;
use super::{new_id, Store};
use crate::error::{on_unique_violation, AppError, Result};
use crate::types::DailyResult;

const DUPLICATE_DAY: &str = "Result for this market and date already exists";

#[derive(Debug, Clone)]
pub struct NewDailyResult {
    pub date: NaiveDate,
    pub market_name: String,
    pub open: String,
    pub close: String,
    pub result: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DailyResultUpdate {
    pub date: Option<NaiveDate>,
    pub market_name: Option<String>,
    pub open: Option<String>,
    pub close: Option<String>,
    /// `Some("")` clears the stored result.
    pub result: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DailyResultFilter {
    pub date: Option<NaiveDate>,
    pub market_name: Option<String>,
}

impl Store {
    /// Newest date first.
    pub async fn list_daily_results(&self, filter: &DailyResultFilter) -> Result<Vec<DailyResult>> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT id, date, market_name, open, close, result, created_at, updated_at \
             FROM daily_results WHERE 1 = 1",
        );
        if let Some(date) = filter.date {
            qb.push(" AND date = ").push_bind(date);
        }
        if let Some(name) = &filter.market_name {
            qb.push(" AND market_name = ").push_bind(name.clone());
        }
        qb.push(" ORDER BY date DESC, market_name ASC");

        let rows = qb
            .build_query_as::<DailyResultRow>()
            .fetch_all(self.pool())
            .await?;
        Ok(rows.into_iter().map(DailyResult::from).collect())
    }

    pub async fn get_daily_result(&self, id: &str) -> Result<DailyResult> {
        sqlx::query_as::<_, DailyResultRow>(
            r#"
            SELECT id, date, market_name, open, close, result, created_at, updated_at
            FROM daily_results
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?
        .map(DailyResult::from)
        .ok_or_else(|| AppError::NotFound("Daily result not found".to_string()))
    }

    pub async fn create_daily_result(&self, r: NewDailyResult) -> Result<DailyResult> {
        let id = new_id();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO daily_results (id, date, market_name, open, close, result, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(r.date)
        .bind(&r.market_name)
        .bind(&r.open)
        .bind(&r.close)
        .bind(&r.result)
        .bind(now)
        .bind(now)
        .execute(self.pool())
        .await
        .map_err(|e| on_unique_violation(e, DUPLICATE_DAY))?;

        self.get_daily_result(&id).await
    }

    /// Inserts unless `(date, market_name)` already exists. Returns whether a row was written.
    pub async fn insert_daily_result_if_absent(&self, r: &NewDailyResult) -> Result<bool> {
        let now = Utc::now();
        let res = sqlx::query(
            r#"
            INSERT OR IGNORE INTO daily_results (id, date, market_name, open, close, result, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(new_id())
        .bind(r.date)
        .bind(&r.market_name)
        .bind(&r.open)
        .bind(&r.close)
        .bind(&r.result)
        .bind(now)
        .bind(now)
        .execute(self.pool())
        .await?;
        Ok(res.rows_affected() == 1)
    }

    pub async fn update_daily_result(&self, id: &str, u: DailyResultUpdate) -> Result<DailyResult> {
        let res = sqlx::query(
            r#"
            UPDATE daily_results SET
                date        = COALESCE(?1, date),
                market_name = COALESCE(?2, market_name),
                open        = COALESCE(?3, open),
                close       = COALESCE(?4, close),
                result      = CASE WHEN ?5 IS NULL THEN result
                                   WHEN ?5 = '' THEN NULL
                                   ELSE ?5 END,
                updated_at  = ?6
            WHERE id = ?7
            "#,
        )
        .bind(u.date)
        .bind(u.market_name)
        .bind(u.open)
        .bind(u.close)
        .bind(u.result)
        .bind(Utc::now())
        .bind(id)
        .execute(self.pool())
        .await
        .map_err(|e| on_unique_violation(e, DUPLICATE_DAY))?;

        if res.rows_affected() == 0 {
            return Err(AppError::NotFound("Daily result not found".to_string()));
        }
        self.get_daily_result(id).await
    }

    pub async fn delete_daily_result(&self, id: &str) -> Result<()> {
        let res = sqlx::query("DELETE FROM daily_results WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;
        if res.rows_affected() == 0 {
            return Err(AppError::NotFound("Daily result not found".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_store;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_result(date: NaiveDate, market: &str) -> NewDailyResult {
        NewDailyResult {
            date,
            market_name: market.to_string(),
            open: "238".to_string(),
            close: "357".to_string(),
            result: None,
        }
    }

    #[tokio::test]
    async fn duplicate_date_and_market_is_a_conflict() {
        let store = test_store().await;
        store.create_daily_result(new_result(ymd(2024, 1, 8), "KALYAN")).await.unwrap();
        let err = store
            .create_daily_result(new_result(ymd(2024, 1, 8), "KALYAN"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        // Same day, other market is fine.
        store.create_daily_result(new_result(ymd(2024, 1, 8), "MILAN DAY")).await.unwrap();
    }

    #[tokio::test]
    async fn filters_by_date_and_market() {
        let store = test_store().await;
        store.create_daily_result(new_result(ymd(2024, 1, 8), "KALYAN")).await.unwrap();
        store.create_daily_result(new_result(ymd(2024, 1, 9), "KALYAN")).await.unwrap();
        store.create_daily_result(new_result(ymd(2024, 1, 9), "MILAN DAY")).await.unwrap();

        let all = store.list_daily_results(&DailyResultFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].date, ymd(2024, 1, 9));

        let kalyan = store
            .list_daily_results(&DailyResultFilter {
                market_name: Some("KALYAN".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(kalyan.len(), 2);

        let ninth = store
            .list_daily_results(&DailyResultFilter {
                date: Some(ymd(2024, 1, 9)),
                market_name: Some("MILAN DAY".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(ninth.len(), 1);
        assert_eq!(ninth[0].market_name, "MILAN DAY");
    }

    #[tokio::test]
    async fn insert_if_absent_skips_existing_rows() {
        let store = test_store().await;
        let r = new_result(ymd(2020, 10, 4), "KALYAN");
        assert!(store.insert_daily_result_if_absent(&r).await.unwrap());
        assert!(!store.insert_daily_result_if_absent(&r).await.unwrap());
    }

    #[tokio::test]
    async fn update_and_delete() {
        let store = test_store().await;
        let created = store.create_daily_result(new_result(ymd(2024, 1, 8), "KALYAN")).await.unwrap();
        let updated = store
            .update_daily_result(
                &created.id,
                DailyResultUpdate { close: Some("***".to_string()), ..Default::default() },
            )
            .await
            .unwrap();
        assert_eq!(updated.display_result(), "238_3*_***");

        store.delete_daily_result(&created.id).await.unwrap();
        assert!(matches!(
            store.get_daily_result(&created.id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
