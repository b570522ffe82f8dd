//! Database row types matching `migrations/0001_init.sql`.

use chrono::{DateTime, NaiveDate, Utc};

use crate::types::{ChartData, DailyResult, LiveResult, LuckyNumber, Market, MarketType, Setting};

#[derive(Debug, sqlx::FromRow)]
pub struct MarketRow {
    pub id: String,
    pub name: String,
    pub open: String,
    pub close: String,
    pub result: Option<String>,
    pub market_type: String,
    pub opening_time: String,
    pub closing_time: String,
    pub golden_ank: String,
    pub motor_patti: String,
    pub is_top_market: bool,
    pub guessing_single: String,
    pub guessing_jodi: String,
    pub guessing_pana: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MarketRow> for Market {
    fn from(r: MarketRow) -> Self {
        Market {
            id: r.id,
            name: r.name,
            open: r.open,
            close: r.close,
            result: r.result,
            // Rows are only written through validated inputs; unknown text reads as regular.
            market_type: r.market_type.parse().unwrap_or(MarketType::Regular),
            opening_time: r.opening_time,
            closing_time: r.closing_time,
            golden_ank: r.golden_ank,
            motor_patti: r.motor_patti,
            is_top_market: r.is_top_market,
            guessing_single: r.guessing_single,
            guessing_jodi: r.guessing_jodi,
            guessing_pana: r.guessing_pana,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct DailyResultRow {
    pub id: String,
    pub date: NaiveDate,
    pub market_name: String,
    pub open: String,
    pub close: String,
    pub result: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DailyResultRow> for DailyResult {
    fn from(r: DailyResultRow) -> Self {
        DailyResult {
            id: r.id,
            date: r.date,
            market_name: r.market_name,
            open: r.open,
            close: r.close,
            result: r.result,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct LiveResultRow {
    pub id: String,
    pub name: String,
    pub result: String,
    pub time_range: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<LiveResultRow> for LiveResult {
    fn from(r: LiveResultRow) -> Self {
        LiveResult {
            id: r.id,
            name: r.name,
            result: r.result,
            time_range: r.time_range,
            is_active: r.is_active,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct SettingRow {
    pub key: String,
    pub value: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SettingRow> for Setting {
    fn from(r: SettingRow) -> Self {
        Setting {
            key: r.key,
            value: r.value,
            description: r.description,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct ChartDataRow {
    pub id: String,
    pub date_range: String,
    pub mon: String,
    pub tue: String,
    pub wed: String,
    pub thu: String,
    pub fri: String,
    pub sat: String,
    pub sun: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ChartDataRow> for ChartData {
    fn from(r: ChartDataRow) -> Self {
        ChartData {
            id: r.id,
            date_range: r.date_range,
            mon: r.mon,
            tue: r.tue,
            wed: r.wed,
            thu: r.thu,
            fri: r.fri,
            sat: r.sat,
            sun: r.sun,
            is_active: r.is_active,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct LuckyNumberRow {
    pub golden_ank: String,
    pub motor_patti: String,
    pub updated_at: DateTime<Utc>,
}

impl From<LuckyNumberRow> for LuckyNumber {
    fn from(r: LuckyNumberRow) -> Self {
        LuckyNumber {
            golden_ank: r.golden_ank,
            motor_patti: r.motor_patti,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct NumberDataRow {
    pub id: String,
    pub source: Option<String>,
    pub timestamp: Option<String>,
    pub document: String,
}
