//! Market trading window checks against "HH:MM AM/PM" strings.

use chrono::{DateTime, NaiveTime, TimeZone};

use crate::config::ist;

pub fn parse_clock(value: &str) -> Option<NaiveTime> {
    let v = value.trim().to_ascii_uppercase();
    NaiveTime::parse_from_str(&v, "%I:%M %p")
        .or_else(|_| NaiveTime::parse_from_str(&v, "%I:%M%p"))
        .ok()
}

/// Whether `now` falls in `[opening, closing)`. A closing time earlier than
/// the opening time means the window runs past midnight.
pub fn is_open_at(opening: &str, closing: &str, now: NaiveTime) -> Option<bool> {
    let open = parse_clock(opening)?;
    let close = parse_clock(closing)?;
    Some(if open <= close {
        open <= now && now < close
    } else {
        now >= open || now < close
    })
}

/// [`is_open_at`] evaluated on the IST wall clock.
pub fn is_open_now<Tz: TimeZone>(opening: &str, closing: &str, now: &DateTime<Tz>) -> Option<bool> {
    is_open_at(opening, closing, now.with_timezone(&ist()).time())
}
