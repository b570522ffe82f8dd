use chrono::Utc;
use tracing::info;

use super::models::MarketRow;
use super::{new_id, Store};
use crate::config::UNDECLARED;
use crate::error::{on_unique_violation, AppError, Result};
use crate::types::{Market, MarketType};

const DUPLICATE_NAME: &str = "Market with this name already exists";

const SELECT_MARKET: &str = r#"
    SELECT id, name, open, close, result, market_type, opening_time, closing_time,
           golden_ank, motor_patti, is_top_market,
           guessing_single, guessing_jodi, guessing_pana, created_at, updated_at
    FROM markets
"#;

/// Validated input for a new market. `name` is already uppercased.
#[derive(Debug, Clone)]
pub struct NewMarket {
    pub name: String,
    pub open: String,
    pub close: String,
    pub market_type: MarketType,
    pub opening_time: String,
    pub closing_time: String,
    pub golden_ank: String,
    pub motor_patti: String,
    pub is_top_market: bool,
    pub guessing_single: String,
    pub guessing_jodi: String,
    pub guessing_pana: String,
}

impl NewMarket {
    /// Market with nothing declared yet.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.trim().to_uppercase(),
            open: UNDECLARED.to_string(),
            close: UNDECLARED.to_string(),
            market_type: MarketType::Regular,
            opening_time: String::new(),
            closing_time: String::new(),
            golden_ank: String::new(),
            motor_patti: String::new(),
            is_top_market: false,
            guessing_single: String::new(),
            guessing_jodi: String::new(),
            guessing_pana: String::new(),
        }
    }
}

/// Partial update; `None` leaves the column unchanged. `result: Some("")` clears it.
#[derive(Debug, Clone, Default)]
pub struct MarketUpdate {
    pub name: Option<String>,
    pub open: Option<String>,
    pub close: Option<String>,
    pub result: Option<String>,
    pub market_type: Option<MarketType>,
    pub opening_time: Option<String>,
    pub closing_time: Option<String>,
    pub golden_ank: Option<String>,
    pub motor_patti: Option<String>,
    pub is_top_market: Option<bool>,
    pub guessing_single: Option<String>,
    pub guessing_jodi: Option<String>,
    pub guessing_pana: Option<String>,
}

impl Store {
    pub async fn list_markets(&self) -> Result<Vec<Market>> {
        let rows = sqlx::query_as::<_, MarketRow>(&format!(
            "{SELECT_MARKET} ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool())
        .await?;
        Ok(rows.into_iter().map(Market::from).collect())
    }

    pub async fn get_market(&self, id: &str) -> Result<Market> {
        sqlx::query_as::<_, MarketRow>(&format!("{SELECT_MARKET} WHERE id = ?"))
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .map(Market::from)
            .ok_or_else(|| AppError::NotFound("Market not found".to_string()))
    }

    pub async fn count_markets(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM markets")
            .fetch_one(self.pool())
            .await?;
        Ok(count)
    }

    pub async fn create_market(&self, m: NewMarket) -> Result<Market> {
        let id = new_id();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO markets (
                id, name, open, close, market_type, opening_time, closing_time,
                golden_ank, motor_patti, is_top_market,
                guessing_single, guessing_jodi, guessing_pana, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&m.name)
        .bind(&m.open)
        .bind(&m.close)
        .bind(m.market_type.to_string())
        .bind(&m.opening_time)
        .bind(&m.closing_time)
        .bind(&m.golden_ank)
        .bind(&m.motor_patti)
        .bind(m.is_top_market)
        .bind(&m.guessing_single)
        .bind(&m.guessing_jodi)
        .bind(&m.guessing_pana)
        .bind(now)
        .bind(now)
        .execute(self.pool())
        .await
        .map_err(|e| on_unique_violation(e, DUPLICATE_NAME))?;

        self.get_market(&id).await
    }

    pub async fn update_market(&self, id: &str, u: MarketUpdate) -> Result<Market> {
        let res = sqlx::query(
            r#"
            UPDATE markets SET
                name            = COALESCE(?1, name),
                open            = COALESCE(?2, open),
                close           = COALESCE(?3, close),
                result          = CASE WHEN ?4 IS NULL THEN result
                                       WHEN ?4 = '' THEN NULL
                                       ELSE ?4 END,
                market_type     = COALESCE(?5, market_type),
                opening_time    = COALESCE(?6, opening_time),
                closing_time    = COALESCE(?7, closing_time),
                golden_ank      = COALESCE(?8, golden_ank),
                motor_patti     = COALESCE(?9, motor_patti),
                is_top_market   = COALESCE(?10, is_top_market),
                guessing_single = COALESCE(?11, guessing_single),
                guessing_jodi   = COALESCE(?12, guessing_jodi),
                guessing_pana   = COALESCE(?13, guessing_pana),
                updated_at      = ?14
            WHERE id = ?15
            "#,
        )
        .bind(u.name)
        .bind(u.open)
        .bind(u.close)
        .bind(u.result)
        .bind(u.market_type.map(|t| t.to_string()))
        .bind(u.opening_time)
        .bind(u.closing_time)
        .bind(u.golden_ank)
        .bind(u.motor_patti)
        .bind(u.is_top_market)
        .bind(u.guessing_single)
        .bind(u.guessing_jodi)
        .bind(u.guessing_pana)
        .bind(Utc::now())
        .bind(id)
        .execute(self.pool())
        .await
        .map_err(|e| on_unique_violation(e, DUPLICATE_NAME))?;

        if res.rows_affected() == 0 {
            return Err(AppError::NotFound("Market not found".to_string()));
        }
        self.get_market(id).await
    }

    pub async fn delete_market(&self, id: &str) -> Result<()> {
        let res = sqlx::query("DELETE FROM markets WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;
        if res.rows_affected() == 0 {
            return Err(AppError::NotFound("Market not found".to_string()));
        }
        Ok(())
    }

    /// Blanks every market's open/close (and any stored result) in one statement.
    /// Returns the number of markets whose values actually changed.
    pub async fn reset_all_markets(&self) -> Result<u64> {
        let res = sqlx::query(
            r#"
            UPDATE markets
            SET open = ?1, close = ?1, result = NULL, updated_at = ?2
            WHERE open != ?1 OR close != ?1 OR result IS NOT NULL
            "#,
        )
        .bind(UNDECLARED)
        .bind(Utc::now())
        .execute(self.pool())
        .await?;

        let changed = res.rows_affected();
        info!(changed, "Market reset applied");
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_store;

    fn market(name: &str, open: &str, close: &str) -> NewMarket {
        NewMarket {
            open: open.to_string(),
            close: close.to_string(),
            ..NewMarket::named(name)
        }
    }

    #[tokio::test]
    async fn create_get_update_delete() {
        let store = test_store().await;
        let created = store.create_market(market("kalyan", "238", "357")).await.unwrap();
        assert_eq!(created.name, "KALYAN");
        assert_eq!(created.display_result(), "238_35_357");

        let updated = store
            .update_market(
                &created.id,
                MarketUpdate {
                    close: Some("***".to_string()),
                    is_top_market: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.open, "238");
        assert_eq!(updated.close, "***");
        assert!(updated.is_top_market);
        assert_eq!(updated.display_result(), "238_3*_***");

        let with_result = store
            .update_market(
                &created.id,
                MarketUpdate { result: Some("999_99_999".to_string()), ..Default::default() },
            )
            .await
            .unwrap();
        assert_eq!(with_result.result.as_deref(), Some("999_99_999"));
        let cleared = store
            .update_market(
                &created.id,
                MarketUpdate { result: Some(String::new()), ..Default::default() },
            )
            .await
            .unwrap();
        assert_eq!(cleared.result, None);

        store.delete_market(&created.id).await.unwrap();
        assert!(matches!(store.get_market(&created.id).await, Err(AppError::NotFound(_))));
        assert!(matches!(store.delete_market(&created.id).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn duplicate_name_is_a_conflict() {
        let store = test_store().await;
        store.create_market(NewMarket::named("MILAN DAY")).await.unwrap();
        let err = store.create_market(NewMarket::named("milan day")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn reset_blanks_every_market_and_is_idempotent() {
        let store = test_store().await;
        store.create_market(market("KALYAN", "258", "369")).await.unwrap();
        store.create_market(market("TIME BAZAR", "***", "***")).await.unwrap();

        assert_eq!(store.reset_all_markets().await.unwrap(), 1);
        for m in store.list_markets().await.unwrap() {
            assert_eq!((m.open.as_str(), m.close.as_str()), ("***", "***"));
            assert_eq!(m.display_result(), "***_**_***");
        }

        assert_eq!(store.reset_all_markets().await.unwrap(), 0);
        assert_eq!(store.count_markets().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn update_unknown_market_is_not_found() {
        let store = test_store().await;
        let err = store
            .update_market("missing", MarketUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
