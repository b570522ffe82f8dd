//! First-run data and the bundled chart history import.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::chart_data::NewChartData;
use super::daily_results::NewDailyResult;
use super::live_results::NewLiveResult;
use super::markets::NewMarket;
use super::Store;
use crate::config::DEFAULT_CHART_MARKET;
use crate::error::Result;
use crate::results::{ank, week};

const DEFAULT_MARKETS: &[(&str, &str, &str)] = &[
    ("KALYAN", "2-5-8", "3-6-9"),
    ("MILAN DAY", "1-4-7", "2-5-8"),
    ("RAJDHANI", "4-7-0", "5-8-1"),
    ("MAIN MUMBAI", "3-6-9", "4-7-0"),
    ("TIME BAZAR", "6-9-2", "7-0-3"),
];

const DEFAULT_LIVE_RESULTS: &[(&str, &str, &str)] = &[
    ("BHOOTNATH NIGHT", "390-2", "(7:00 PM - 10:00 PM)"),
    ("KARNATAKA NIGHT", "Loading...", "(7:15 PM - 8:15 PM)"),
];

const DEFAULT_SETTINGS: &[(&str, &str, &str)] = &[
    ("SITE_NAME", "Dpboss Online", "Website name"),
    ("API_ENDPOINT", "http://localhost:5000", "Backend API endpoint"),
];

const BUNDLED_DAILY_RESULTS: &str = include_str!("../../fixtures/kalyan_daily_results.json");

/// One row of the bundled chart history: a week range plus weekday label.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedEntry {
    pub week_range: String,
    pub day: String,
    pub open: String,
    pub close: String,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default, alias = "marketName")]
    pub market_name: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedReport {
    pub inserted: usize,
    pub skipped_existing: usize,
    pub invalid: usize,
}

impl Store {
    /// Fills empty collections with starter rows. Each collection is handled
    /// on its own; a failure is logged and the others still run.
    pub async fn seed_defaults(&self) {
        if let Err(e) = self.seed_default_markets().await {
            warn!("Default markets not initialized: {e}");
        }
        if let Err(e) = self.seed_default_live_results().await {
            warn!("Default live results not initialized: {e}");
        }
        for (key, value, description) in DEFAULT_SETTINGS {
            if let Err(e) = self.ensure_setting(key, value, description).await {
                warn!("Default setting {key} not initialized: {e}");
            }
        }
        if let Err(e) = self.seed_default_chart().await {
            warn!("Default chart data not initialized: {e}");
        }
        if let Err(e) = self.lucky_number().await {
            warn!("Lucky number not initialized: {e}");
        }
    }

    async fn seed_default_markets(&self) -> Result<()> {
        if self.count_markets().await? > 0 {
            return Ok(());
        }
        for (name, open, close) in DEFAULT_MARKETS {
            self.create_market(NewMarket {
                open: open.to_string(),
                close: close.to_string(),
                ..NewMarket::named(name)
            })
            .await?;
        }
        info!("Default markets initialized ({})", DEFAULT_MARKETS.len());
        Ok(())
    }

    async fn seed_default_live_results(&self) -> Result<()> {
        if self.count_live_results().await? > 0 {
            return Ok(());
        }
        for (name, result, time_range) in DEFAULT_LIVE_RESULTS {
            self.create_live_result(NewLiveResult {
                name: name.to_string(),
                result: result.to_string(),
                time_range: time_range.to_string(),
            })
            .await?;
        }
        info!("Default live results initialized");
        Ok(())
    }

    async fn seed_default_chart(&self) -> Result<()> {
        if self.count_chart_data().await? > 0 {
            return Ok(());
        }
        self.create_chart_data(NewChartData {
            date_range: "28-09-2020\nto\n04-10-2020".to_string(),
            days: [
                "2\n4\n5".to_string(),
                "14".to_string(),
                "1\n6\n7".to_string(),
                "1\n5\n7".to_string(),
                "37".to_string(),
                "1\n8\n8".to_string(),
                "5\n9\n0".to_string(),
            ],
        })
        .await?;
        info!("Default chart data initialized");
        Ok(())
    }

    /// Imports the chart history shipped with the binary.
    pub async fn seed_bundled_daily_results(&self) -> Result<SeedReport> {
        let entries: Vec<SeedEntry> = serde_json::from_str(BUNDLED_DAILY_RESULTS)?;
        self.seed_daily_results(&entries).await
    }

    /// Inserts entries whose date resolves and whose pattis are well formed.
    /// Rows already present for the same date and market are left alone.
    pub async fn seed_daily_results(&self, entries: &[SeedEntry]) -> Result<SeedReport> {
        let mut report = SeedReport::default();

        for entry in entries {
            let Some(new) = seed_to_daily_result(entry) else {
                warn!(
                    week_range = %entry.week_range,
                    day = %entry.day,
                    "Skipping seed entry with unusable date or patti"
                );
                report.invalid += 1;
                continue;
            };
            if self.insert_daily_result_if_absent(&new).await? {
                report.inserted += 1;
            } else {
                report.skipped_existing += 1;
            }
        }

        info!(
            inserted = report.inserted,
            skipped_existing = report.skipped_existing,
            invalid = report.invalid,
            "Daily results seed complete"
        );
        Ok(report)
    }
}

fn seed_to_daily_result(entry: &SeedEntry) -> Option<NewDailyResult> {
    let date = week::date_in_week(&entry.week_range, &entry.day)?;
    if !ank::is_valid_patti_input(&entry.open) || !ank::is_valid_patti_input(&entry.close) {
        return None;
    }
    let market_name = entry
        .market_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_CHART_MARKET)
        .to_uppercase();

    Some(NewDailyResult {
        date,
        market_name,
        open: entry.open.trim().to_string(),
        close: entry.close.trim().to_string(),
        result: entry
            .result
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string),
    })
}
