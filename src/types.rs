use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::results::ank;

// ---------------------------------------------------------------------------
// Market
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub open: String,
    pub close: String,
    /// Precomputed result string; wins over anything derived from open/close.
    pub result: Option<String>,
    pub market_type: MarketType,
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

impl Market {
    pub fn display_result(&self) -> String {
        ank::display_result(&self.open, &self.close, self.result.as_deref())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketType {
    #[default]
    Regular,
    Starline,
    King,
}

impl std::fmt::Display for MarketType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MarketType::Regular => "regular",
            MarketType::Starline => "starline",
            MarketType::King => "king",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for MarketType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "regular" => Ok(MarketType::Regular),
            "starline" => Ok(MarketType::Starline),
            "king" => Ok(MarketType::King),
            other => Err(format!("unknown market type: {other}")),
        }
    }
}

/// Market as served to the front ends: stored fields plus derived display values.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketView {
    #[serde(flatten)]
    pub market: Market,
    pub display_result: String,
    /// `None` when opening/closing times are not parseable.
    pub is_open: Option<bool>,
}

// ---------------------------------------------------------------------------
// Daily results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyResult {
    #[serde(rename = "_id")]
    pub id: String,
    pub date: NaiveDate,
    pub market_name: String,
    pub open: String,
    pub close: String,
    pub result: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DailyResult {
    pub fn display_result(&self) -> String {
        ank::display_result(&self.open, &self.close, self.result.as_deref())
    }
}

// ---------------------------------------------------------------------------
// Live results, settings, chart grid, lucky number
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveResult {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub result: String,
    pub time_range: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Setting {
    pub key: String,
    pub value: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Free-form weekly text grid edited by hand in the admin panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    #[serde(rename = "_id")]
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

/// Site-wide golden ank / motor patti pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LuckyNumber {
    pub golden_ank: String,
    pub motor_patti: String,
    pub updated_at: DateTime<Utc>,
}
