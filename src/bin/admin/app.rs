use serde::Deserialize;

// ---------------------------------------------------------------------------
// API response types (mirror the server's JSON)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketResponse {
    pub name: String,
    pub display_result: String,
    #[serde(default)]
    pub opening_time: String,
    #[serde(default)]
    pub closing_time: String,
    pub is_open: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveResultResponse {
    pub name: String,
    pub result: String,
    pub time_range: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LuckyNumberResponse {
    pub golden_ank: String,
    pub motor_patti: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DayCell {
    pub open: String,
    pub close: String,
    #[serde(default)]
    pub result: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeekResponse {
    pub week: String,
    #[serde(rename = "Mon")]
    pub mon: Option<DayCell>,
    #[serde(rename = "Tue")]
    pub tue: Option<DayCell>,
    #[serde(rename = "Wed")]
    pub wed: Option<DayCell>,
    #[serde(rename = "Thu")]
    pub thu: Option<DayCell>,
    #[serde(rename = "Fri")]
    pub fri: Option<DayCell>,
    #[serde(rename = "Sat")]
    pub sat: Option<DayCell>,
    #[serde(rename = "Sun")]
    pub sun: Option<DayCell>,
}

impl WeekResponse {
    pub fn days(&self) -> [Option<&DayCell>; 7] {
        [
            self.mon.as_ref(),
            self.tue.as_ref(),
            self.wed.as_ref(),
            self.thu.as_ref(),
            self.fri.as_ref(),
            self.sat.as_ref(),
            self.sun.as_ref(),
        ]
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetResponse {
    pub modified_count: u64,
}

// ---------------------------------------------------------------------------
// App state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionStatus {
    Connected,
    Error(String),
    Connecting,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub status: ConnectionStatus,
    pub markets: Vec<MarketResponse>,
    pub live_results: Vec<LiveResultResponse>,
    pub lucky: Option<LuckyNumberResponse>,
    /// Chart rows for `chart_market`.
    pub weeks: Vec<WeekResponse>,
    pub chart_market: Option<String>,
    /// Outcome of the last admin action, shown in the footer.
    pub notice: Option<String>,
    pub last_refresh: std::time::Instant,
    pub base_url: String,
}

impl AppState {
    pub fn new(base_url: String) -> Self {
        Self {
            status: ConnectionStatus::Connecting,
            markets: Vec::new(),
            live_results: Vec::new(),
            lucky: None,
            weeks: Vec::new(),
            chart_market: None,
            notice: None,
            last_refresh: std::time::Instant::now(),
            base_url,
        }
    }

    /// Polls markets, live results and the lucky number, then the chart for `selected`.
    pub async fn refresh(&mut self, client: &reqwest::Client, selected: Option<usize>) {
        let markets_url = format!("{}/api/markets", self.base_url);
        let live_url = format!("{}/api/live-results", self.base_url);
        let lucky_url = format!("{}/api/lucky-number", self.base_url);

        let (markets_res, live_res, lucky_res) = tokio::join!(
            client.get(&markets_url).send(),
            client.get(&live_url).send(),
            client.get(&lucky_url).send(),
        );

        let markets = match markets_res {
            Ok(resp) => resp.json::<Vec<MarketResponse>>().await,
            Err(e) => {
                self.status = ConnectionStatus::Error(format!("{e}"));
                return;
            }
        };
        match markets {
            Ok(m) => {
                self.markets = m;
                self.status = ConnectionStatus::Connected;
                self.last_refresh = std::time::Instant::now();
            }
            Err(e) => {
                self.status = ConnectionStatus::Error(format!("parse error: {e}"));
                return;
            }
        }

        if let Ok(resp) = live_res {
            if let Ok(live) = resp.json::<Vec<LiveResultResponse>>().await {
                self.live_results = live;
            }
        }
        if let Ok(resp) = lucky_res {
            if let Ok(lucky) = resp.json::<LuckyNumberResponse>().await {
                self.lucky = Some(lucky);
            }
        }

        let market = selected
            .and_then(|i| self.markets.get(i))
            .or_else(|| self.markets.first())
            .map(|m| m.name.clone());
        if let Some(name) = market {
            self.fetch_chart(client, &name).await;
        }
    }

    async fn fetch_chart(&mut self, client: &reqwest::Client, market: &str) {
        let url = format!("{}/api/daily-results/chart", self.base_url);
        let resp = client.get(&url).query(&[("marketName", market)]).send().await;
        if let Ok(resp) = resp {
            if let Ok(weeks) = resp.json::<Vec<WeekResponse>>().await {
                self.weeks = weeks;
                self.chart_market = Some(market.to_string());
            }
        }
    }

    /// Same action the midnight job performs.
    pub async fn reset_all(&mut self, client: &reqwest::Client) {
        let url = format!("{}/api/markets/reset-all", self.base_url);
        let notice = match client.post(&url).send().await {
            Ok(resp) if resp.status().is_success() => match resp.json::<ResetResponse>().await {
                Ok(r) => format!("reset {} market(s)", r.modified_count),
                Err(e) => format!("reset sent, unreadable reply: {e}"),
            },
            Ok(resp) => format!("reset failed: HTTP {}", resp.status()),
            Err(e) => format!("reset failed: {e}"),
        };
        self.notice = Some(notice);
    }
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// `API_BASE_URL` without a trailing slash or `/api` suffix.
pub fn normalize_base_url(raw: &str) -> String {
    let url = raw.trim().trim_end_matches('/');
    url.strip_suffix("/api").unwrap_or(url).to_string()
}

fn ank(patti: &str) -> Option<u32> {
    let digits: Vec<u32> = patti.chars().filter_map(|c| c.to_digit(10)).take(3).collect();
    (digits.len() == 3).then(|| digits.iter().sum::<u32>() % 10)
}

/// Chart cell text: the stored result when set, else the two-digit jodi
/// with `*` for an undeclared side.
pub fn jodi(cell: Option<&DayCell>) -> String {
    let Some(cell) = cell else {
        return "**".to_string();
    };
    if let Some(stored) = cell.result.as_deref().map(str::trim).filter(|r| !r.is_empty()) {
        return stored.to_string();
    }
    let side = |p: &str| ank(p).map_or('*', |a| char::from_digit(a, 10).unwrap_or('*'));
    format!("{}{}", side(&cell.open), side(&cell.close))
}

pub fn format_open(is_open: Option<bool>) -> &'static str {
    match is_open {
        Some(true) => "open",
        Some(false) => "closed",
        None => "—",
    }
}

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_accepts_api_suffix() {
        assert_eq!(normalize_base_url("http://localhost:5000/api/"), "http://localhost:5000");
        assert_eq!(normalize_base_url("http://host:8080"), "http://host:8080");
    }

    #[test]
    fn jodi_from_cell() {
        let cell = DayCell {
            open: "238".to_string(),
            close: "357".to_string(),
            result: None,
        };
        assert_eq!(jodi(Some(&cell)), "35");
        let half = DayCell {
            open: "2-3-8".to_string(),
            close: "***".to_string(),
            result: Some("  ".to_string()),
        };
        assert_eq!(jodi(Some(&half)), "3*");
        assert_eq!(jodi(None), "**");
    }

    #[test]
    fn stored_result_wins_over_digits() {
        let body = r#"{"open":"238","close":"357","result":"99"}"#;
        let cell: DayCell = serde_json::from_str(body).unwrap();
        assert_eq!(jodi(Some(&cell)), "99");
    }

    #[test]
    fn parses_chart_payload() {
        let body = r#"[{"week":"08-01-2024to14-01-2024","Mon":{"_id":"a","date":"2024-01-08","marketName":"KALYAN","open":"238","close":"357","result":null},"Tue":null,"Wed":null,"Thu":null,"Fri":null,"Sat":null,"Sun":null}]"#;
        let weeks: Vec<WeekResponse> = serde_json::from_str(body).unwrap();
        assert_eq!(weeks[0].week, "08-01-2024to14-01-2024");
        assert_eq!(jodi(weeks[0].days()[0]), "35");
        assert!(weeks[0].days()[1].is_none());
    }

    #[test]
    fn truncates_on_char_boundary() {
        assert_eq!(truncate("KALYAN NIGHT", 6), "KALYA…");
        assert_eq!(truncate("MILAN", 6), "MILAN");
    }
}
