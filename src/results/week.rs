//! Monday–Sunday bucketing of daily results for the chart table.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;

use crate::types::DailyResult;

const KEY_DATE_FORMAT: &str = "%d-%m-%Y";

/// One chart row: a calendar week keyed `DD-MM-YYYYtoDD-MM-YYYY`.
#[derive(Debug, Clone, Serialize)]
pub struct WeekBucket {
    pub week: String,
    #[serde(skip)]
    pub monday: NaiveDate,
    #[serde(rename = "Mon")]
    pub mon: Option<DailyResult>,
    #[serde(rename = "Tue")]
    pub tue: Option<DailyResult>,
    #[serde(rename = "Wed")]
    pub wed: Option<DailyResult>,
    #[serde(rename = "Thu")]
    pub thu: Option<DailyResult>,
    #[serde(rename = "Fri")]
    pub fri: Option<DailyResult>,
    #[serde(rename = "Sat")]
    pub sat: Option<DailyResult>,
    #[serde(rename = "Sun")]
    pub sun: Option<DailyResult>,
}

impl WeekBucket {
    fn new(monday: NaiveDate) -> Self {
        Self {
            week: week_key(monday),
            monday,
            mon: None,
            tue: None,
            wed: None,
            thu: None,
            fri: None,
            sat: None,
            sun: None,
        }
    }

    pub fn slot(&self, day: Weekday) -> Option<&DailyResult> {
        match day {
            Weekday::Mon => self.mon.as_ref(),
            Weekday::Tue => self.tue.as_ref(),
            Weekday::Wed => self.wed.as_ref(),
            Weekday::Thu => self.thu.as_ref(),
            Weekday::Fri => self.fri.as_ref(),
            Weekday::Sat => self.sat.as_ref(),
            Weekday::Sun => self.sun.as_ref(),
        }
    }

    fn slot_mut(&mut self, day: Weekday) -> &mut Option<DailyResult> {
        match day {
            Weekday::Mon => &mut self.mon,
            Weekday::Tue => &mut self.tue,
            Weekday::Wed => &mut self.wed,
            Weekday::Thu => &mut self.thu,
            Weekday::Fri => &mut self.fri,
            Weekday::Sat => &mut self.sat,
            Weekday::Sun => &mut self.sun,
        }
    }
}

/// Monday of the week containing `date`. Sunday closes its week.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Key for the week containing `date`.
pub fn week_key(date: NaiveDate) -> String {
    let monday = monday_of(date);
    let sunday = monday + Duration::days(6);
    format!(
        "{}to{}",
        monday.format(KEY_DATE_FORMAT),
        sunday.format(KEY_DATE_FORMAT)
    )
}

/// Start date of a week range such as `08-01-2024to14-01-2024` or the
/// hand-typed `28-09-2020\nto\n04-10-2020`.
pub fn parse_week_start(week_range: &str) -> Option<NaiveDate> {
    let compact: String = week_range.chars().filter(|c| !c.is_whitespace()).collect();
    let start = compact.split("to").next()?;
    NaiveDate::parse_from_str(start, KEY_DATE_FORMAT).ok()
}

/// Calendar date for a weekday label inside a week range. `None` when either
/// part does not parse. The start is re-anchored to its Monday first.
pub fn date_in_week(week_range: &str, day: &str) -> Option<NaiveDate> {
    let start = parse_week_start(week_range)?;
    let day: Weekday = day.trim().parse().ok()?;
    Some(monday_of(start) + Duration::days(i64::from(day.num_days_from_monday())))
}

/// Groups results into weeks, newest week first. When two results share a
/// date the later one in input order fills the slot.
pub fn bucket_by_week(results: impl IntoIterator<Item = DailyResult>) -> Vec<WeekBucket> {
    let mut weeks: BTreeMap<NaiveDate, WeekBucket> = BTreeMap::new();

    for result in results {
        let monday = monday_of(result.date);
        let day = result.date.weekday();
        *weeks
            .entry(monday)
            .or_insert_with(|| WeekBucket::new(monday))
            .slot_mut(day) = Some(result);
    }

    weeks.into_values().rev().collect()
}
