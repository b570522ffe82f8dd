use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};
use tracing::{error, info};

use crate::config::ist;
use crate::db::Store;

/// Background task that blanks every market's open/close at 00:00 IST.
/// A failed run is logged and waits for the next midnight.
pub struct MidnightReset {
    store: Store,
}

impl MidnightReset {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn run(self) {
        loop {
            let now = Utc::now();
            let next = next_ist_midnight(now);
            let wait = (next - now).to_std().unwrap_or_default();
            info!(next_run = %next, "Midnight reset scheduled");

            tokio::time::sleep(wait).await;
            self.tick().await;
        }
    }

    async fn tick(&self) {
        match self.store.reset_all_markets().await {
            Ok(changed) => info!(changed, "Midnight reset complete"),
            Err(e) => error!("Midnight reset failed: {e}"),
        }
    }
}

/// First 00:00 IST strictly after `now`.
pub fn next_ist_midnight(now: DateTime<Utc>) -> DateTime<Utc> {
    let tz = ist();
    let tomorrow = now.with_timezone(&tz).date_naive() + ChronoDuration::days(1);
    // Fixed offsets have exactly one mapping for every local time.
    tomorrow
        .and_hms_opt(0, 0, 0)
        .and_then(|midnight| tz.from_local_datetime(&midnight).single())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(now + ChronoDuration::days(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::markets::NewMarket;
    use crate::db::test_store;

    #[test]
    fn next_midnight_is_18_30_utc() {
        let now = Utc.with_ymd_and_hms(2024, 1, 8, 12, 0, 0).unwrap();
        assert_eq!(
            next_ist_midnight(now),
            Utc.with_ymd_and_hms(2024, 1, 8, 18, 30, 0).unwrap()
        );
    }

    #[test]
    fn after_ist_midnight_rolls_to_next_day() {
        // 19:00 UTC is already 00:30 IST on the 9th.
        let now = Utc.with_ymd_and_hms(2024, 1, 8, 19, 0, 0).unwrap();
        assert_eq!(
            next_ist_midnight(now),
            Utc.with_ymd_and_hms(2024, 1, 9, 18, 30, 0).unwrap()
        );
    }

    #[test]
    fn exactly_midnight_schedules_the_following_one() {
        let now = Utc.with_ymd_and_hms(2024, 1, 8, 18, 30, 0).unwrap();
        assert_eq!(
            next_ist_midnight(now),
            Utc.with_ymd_and_hms(2024, 1, 9, 18, 30, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn tick_resets_markets() {
        let store = test_store().await;
        store
            .create_market(NewMarket {
                open: "258".to_string(),
                close: "369".to_string(),
                ..NewMarket::named("KALYAN")
            })
            .await
            .unwrap();

        let job = MidnightReset::new(store.clone());
        job.tick().await;
        job.tick().await;

        let markets = store.list_markets().await.unwrap();
        assert_eq!(markets[0].open, "***");
        assert_eq!(markets[0].close, "***");
    }
}
