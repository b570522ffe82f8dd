//! Request bodies and the boundary checks that turn them into store inputs.

use axum::extract::FromRequest;
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;

use crate::db::chart_data::{ChartDataUpdate, NewChartData};
use crate::db::daily_results::{DailyResultUpdate, NewDailyResult};
use crate::db::live_results::{LiveResultUpdate, NewLiveResult, LOADING};
use crate::db::lucky_number::UNSET;
use crate::db::markets::{MarketUpdate, NewMarket};
use crate::error::{AppError, Result};
use crate::results::ank;
use crate::types::MarketType;

/// `Json<T>` whose rejections become 400 `{error}` responses.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Trimmed value, `None` when absent or blank.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

fn patti(field: &str, value: String) -> Result<String> {
    if ank::is_valid_patti_input(&value) {
        Ok(value)
    } else {
        Err(AppError::Validation(format!(
            "{field} must be a 3-digit patti or ***"
        )))
    }
}

fn optional_patti(field: &str, value: Option<String>) -> Result<Option<String>> {
    non_blank(value).map(|v| patti(field, v)).transpose()
}

/// `YYYY-MM-DD`, or an RFC 3339 timestamp reduced to its calendar date.
pub fn parse_day(value: &str) -> Result<NaiveDate> {
    let v = value.trim();
    NaiveDate::parse_from_str(v, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(v).map(|dt| dt.date_naive()))
        .map_err(|_| AppError::Validation(format!("Invalid date: {v}")))
}

// ---------------------------------------------------------------------------
// Markets
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateMarketBody {
    pub name: Option<String>,
    pub open: Option<String>,
    pub close: Option<String>,
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

impl CreateMarketBody {
    pub fn validate(self) -> Result<NewMarket> {
        let (Some(name), Some(open), Some(close)) = (
            non_blank(self.name),
            non_blank(self.open),
            non_blank(self.close),
        ) else {
            return Err(AppError::Validation(
                "Name, open, and close are required".to_string(),
            ));
        };

        Ok(NewMarket {
            name: name.to_uppercase(),
            open: patti("open", open)?,
            close: patti("close", close)?,
            market_type: self.market_type.unwrap_or_default(),
            opening_time: trimmed(self.opening_time).unwrap_or_default(),
            closing_time: trimmed(self.closing_time).unwrap_or_default(),
            golden_ank: trimmed(self.golden_ank).unwrap_or_default(),
            motor_patti: trimmed(self.motor_patti).unwrap_or_default(),
            is_top_market: self.is_top_market.unwrap_or(false),
            guessing_single: trimmed(self.guessing_single).unwrap_or_default(),
            guessing_jodi: trimmed(self.guessing_jodi).unwrap_or_default(),
            guessing_pana: trimmed(self.guessing_pana).unwrap_or_default(),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateMarketBody {
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

impl UpdateMarketBody {
    /// Blank name/open/close are ignored; blank text fields clear their column.
    pub fn validate(self) -> Result<MarketUpdate> {
        Ok(MarketUpdate {
            name: non_blank(self.name).map(|n| n.to_uppercase()),
            open: optional_patti("open", self.open)?,
            close: optional_patti("close", self.close)?,
            result: trimmed(self.result),
            market_type: self.market_type,
            opening_time: trimmed(self.opening_time),
            closing_time: trimmed(self.closing_time),
            golden_ank: trimmed(self.golden_ank),
            motor_patti: trimmed(self.motor_patti),
            is_top_market: self.is_top_market,
            guessing_single: trimmed(self.guessing_single),
            guessing_jodi: trimmed(self.guessing_jodi),
            guessing_pana: trimmed(self.guessing_pana),
        })
    }
}

// ---------------------------------------------------------------------------
// Daily results
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DailyResultBody {
    pub date: Option<String>,
    pub market_name: Option<String>,
    pub open: Option<String>,
    pub close: Option<String>,
    pub result: Option<String>,
}

impl DailyResultBody {
    pub fn validate_new(self) -> Result<NewDailyResult> {
        let (Some(date), Some(market_name), Some(open), Some(close)) = (
            non_blank(self.date),
            non_blank(self.market_name),
            non_blank(self.open),
            non_blank(self.close),
        ) else {
            return Err(AppError::Validation(
                "Date, marketName, open, and close are required".to_string(),
            ));
        };

        Ok(NewDailyResult {
            date: parse_day(&date)?,
            market_name: market_name.to_uppercase(),
            open: patti("open", open)?,
            close: patti("close", close)?,
            result: non_blank(self.result),
        })
    }

    pub fn validate_update(self) -> Result<DailyResultUpdate> {
        Ok(DailyResultUpdate {
            date: non_blank(self.date).map(|d| parse_day(&d)).transpose()?,
            market_name: non_blank(self.market_name).map(|n| n.to_uppercase()),
            open: optional_patti("open", self.open)?,
            close: optional_patti("close", self.close)?,
            result: trimmed(self.result),
        })
    }
}

// ---------------------------------------------------------------------------
// Live results
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LiveResultBody {
    pub name: Option<String>,
    pub result: Option<String>,
    pub time_range: Option<String>,
    pub is_active: Option<bool>,
}

impl LiveResultBody {
    pub fn validate_new(self) -> Result<NewLiveResult> {
        let (Some(name), Some(time_range)) = (non_blank(self.name), non_blank(self.time_range))
        else {
            return Err(AppError::Validation(
                "Name and timeRange are required".to_string(),
            ));
        };
        Ok(NewLiveResult {
            name: name.to_uppercase(),
            result: non_blank(self.result).unwrap_or_else(|| LOADING.to_string()),
            time_range,
        })
    }

    pub fn validate_update(self) -> LiveResultUpdate {
        LiveResultUpdate {
            name: non_blank(self.name).map(|n| n.to_uppercase()),
            result: trimmed(self.result),
            time_range: non_blank(self.time_range),
            is_active: self.is_active,
        }
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateSettingBody {
    pub key: Option<String>,
    pub value: Option<String>,
    pub description: Option<String>,
}

impl CreateSettingBody {
    /// `(key, value, description)`; a blank key or value counts as missing.
    pub fn validate(self) -> Result<(String, String, String)> {
        let (Some(key), Some(value)) = (non_blank(self.key), non_blank(self.value)) else {
            return Err(AppError::Validation("Key and value are required".to_string()));
        };
        Ok((key, value, self.description.unwrap_or_default()))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PutSettingBody {
    pub value: Option<String>,
    pub description: Option<String>,
}

impl PutSettingBody {
    /// `(value, description)`. An omitted description is stored as empty.
    pub fn validate(self) -> Result<(String, String)> {
        let value = non_blank(self.value)
            .ok_or_else(|| AppError::Validation("Value is required".to_string()))?;
        Ok((value, self.description.unwrap_or_default()))
    }
}

// ---------------------------------------------------------------------------
// Chart grid
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ChartDataBody {
    pub date_range: Option<String>,
    pub mon: Option<String>,
    pub tue: Option<String>,
    pub wed: Option<String>,
    pub thu: Option<String>,
    pub fri: Option<String>,
    pub sat: Option<String>,
    pub sun: Option<String>,
    pub is_active: Option<bool>,
}

impl ChartDataBody {
    fn days(&mut self) -> [Option<String>; 7] {
        [
            trimmed(self.mon.take()),
            trimmed(self.tue.take()),
            trimmed(self.wed.take()),
            trimmed(self.thu.take()),
            trimmed(self.fri.take()),
            trimmed(self.sat.take()),
            trimmed(self.sun.take()),
        ]
    }

    pub fn validate_new(mut self) -> Result<NewChartData> {
        let days = self.days().map(Option::unwrap_or_default);
        let date_range = non_blank(self.date_range)
            .ok_or_else(|| AppError::Validation("Date range is required".to_string()))?;
        Ok(NewChartData { date_range, days })
    }

    pub fn validate_update(mut self) -> ChartDataUpdate {
        let days = self.days();
        ChartDataUpdate {
            date_range: non_blank(self.date_range),
            days,
            is_active: self.is_active,
        }
    }
}

// ---------------------------------------------------------------------------
// Lucky number
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LuckyNumberBody {
    pub golden_ank: Option<String>,
    pub motor_patti: Option<String>,
}

impl LuckyNumberBody {
    /// Present-but-blank values are stored as `-`.
    pub fn into_parts(self) -> (Option<String>, Option<String>) {
        let fill = |v: Option<String>| {
            v.map(|s| non_blank(Some(s)).unwrap_or_else(|| UNSET.to_string()))
        };
        (fill(self.golden_ank), fill(self.motor_patti))
    }
}
