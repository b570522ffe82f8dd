use chrono::FixedOffset;

use crate::error::{AppError, Result};

/// Value of `open`/`close` before a patti is declared.
pub const UNDECLARED: &str = "***";

/// Rendered result when neither side can be derived.
pub const PLACEHOLDER_RESULT: &str = "***_**_***";

/// Indian Standard Time, UTC+05:30. Market hours and the nightly reset use this clock.
pub const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// Market name used by the bundled chart fixture and the admin chart screen.
pub const DEFAULT_CHART_MARKET: &str = "KALYAN";

/// Shortest database URL accepted; anything shorter is a truncated value.
const MIN_DATABASE_URL_LEN: usize = 10;

pub fn ist() -> FixedOffset {
    FixedOffset::east_opt(IST_OFFSET_SECS).expect("IST offset is within ±24h")
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub log_level: String,
    /// Run the midnight reset task (RESET_ENABLED).
    pub reset_enabled: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let database_url = std::env::var("DATABASE_URL").map_err(|_| {
            AppError::Config(
                "DATABASE_URL is not set. Example: DATABASE_URL=sqlite:matka.db?mode=rwc".to_string(),
            )
        })?;

        Ok(Self {
            database_url: validate_database_url(&database_url)?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .map_err(|_| AppError::Config("PORT must be a valid port number".to_string()))?,
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            reset_enabled: std::env::var("RESET_ENABLED")
                .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no"))
                .unwrap_or(true),
        })
    }
}

/// Trims and checks the connection string before any connection attempt.
pub fn validate_database_url(raw: &str) -> Result<String> {
    let url = raw.trim();

    if !url.starts_with("sqlite:") {
        let preview: String = url.chars().take(20).collect();
        return Err(AppError::Config(format!(
            "DATABASE_URL must start with \"sqlite:\" (got \"{preview}...\")"
        )));
    }
    if url.len() < MIN_DATABASE_URL_LEN {
        return Err(AppError::Config("DATABASE_URL seems too short".to_string()));
    }
    if url.contains('<') || url.contains('>') {
        return Err(AppError::Config(
            "DATABASE_URL contains an unfilled <placeholder>".to_string(),
        ));
    }
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_sqlite_urls() {
        assert_eq!(
            validate_database_url("  sqlite:matka.db?mode=rwc\n").unwrap(),
            "sqlite:matka.db?mode=rwc"
        );
        assert!(validate_database_url("sqlite::memory:").is_ok());
    }

    #[test]
    fn rejects_wrong_scheme_short_and_placeholder_urls() {
        assert!(validate_database_url("mysql://localhost/matka").is_err());
        assert!(validate_database_url("12345678901").is_err());
        assert!(validate_database_url("sqlite:a").is_err());
        assert!(validate_database_url("sqlite:<dbname>.db").is_err());
    }

    #[test]
    fn ist_is_five_thirty_ahead() {
        assert_eq!(ist().local_minus_utc(), 19_800);
    }
}
