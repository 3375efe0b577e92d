//! Calendar-day handling for date-keyed pages and records.
//!
//! Every day is addressed by its `YYYY-MM-DD` string. Parsing is strict: the
//! input must name a real calendar date *and* re-format to exactly the same
//! string, so `2024-02-30` and `2024-2-9` are both rejected.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

/// Canonical day format used in URLs and in the store.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Label returned by [`format_date`] for input that is not a date.
pub const INVALID_DATE_LABEL: &str = "Invalid Date";

/// A single calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Day(NaiveDate);

impl Day {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// The current day in the server's local time zone.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// The following day, or `None` past the last representable date.
    pub fn next(&self) -> Option<Day> {
        self.0.checked_add_days(Days::new(1)).map(Self)
    }

    /// The preceding day, or `None` before the first representable date.
    pub fn previous(&self) -> Option<Day> {
        self.0.checked_sub_days(Days::new(1)).map(Self)
    }

    /// Long human label, e.g. `April 29th, 2024`.
    pub fn long_label(&self) -> String {
        let day = self.0.day();
        format!(
            "{} {}{}, {}",
            self.0.format("%B"),
            day,
            ordinal_suffix(day),
            self.0.year()
        )
    }
}

impl FromStr for Day {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, DATE_FORMAT)
            .ok()
            .filter(|date| date.format(DATE_FORMAT).to_string() == s)
            .map(Self)
            .ok_or_else(|| CoreError::InvalidDate(s.to_string()))
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl Serialize for Day {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Day {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Whether `s` is a valid `YYYY-MM-DD` calendar date string.
pub fn is_valid_date_string(s: &str) -> bool {
    s.parse::<Day>().is_ok()
}

/// Today's date as a `YYYY-MM-DD` string.
pub fn today_date_string() -> String {
    Day::today().to_string()
}

/// The day after `s`.
pub fn next_day(s: &str) -> Result<String, CoreError> {
    let day: Day = s.parse()?;
    day.next()
        .map(|d| d.to_string())
        .ok_or_else(|| CoreError::InvalidDate(s.to_string()))
}

/// The day before `s`.
pub fn previous_day(s: &str) -> Result<String, CoreError> {
    let day: Day = s.parse()?;
    day.previous()
        .map(|d| d.to_string())
        .ok_or_else(|| CoreError::InvalidDate(s.to_string()))
}

/// Long label for a day string, or [`INVALID_DATE_LABEL`] when it does not parse.
pub fn format_date(s: &str) -> String {
    s.parse::<Day>()
        .map(|d| d.long_label())
        .unwrap_or_else(|_| INVALID_DATE_LABEL.to_string())
}
