//! Rental Record Model
//! Row type, canonical column names and the inclusive date range.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Canonical column names of a loaded dataset frame.
pub const DATE: &str = "date";
pub const HOUR: &str = "hour";
pub const WEEKDAY: &str = "weekday";
pub const SEASON: &str = "season";
pub const CASUAL: &str = "casual";
pub const REGISTERED: &str = "registered";
pub const TOTAL: &str = "total";

/// Days between 0001-01-01 (CE) and 1970-01-01.
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// One hourly rental observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalRecord {
    pub date: NaiveDate,
    pub hour: i32,
    pub weekday: i32,
    pub season: String,
    pub casual_count: i64,
    pub registered_count: i64,
    pub total_count: i64,
}

impl RentalRecord {
    /// Build a record whose total is the sum of its casual and registered counts.
    pub fn new(
        date: NaiveDate,
        hour: i32,
        weekday: i32,
        season: impl Into<String>,
        casual_count: i64,
        registered_count: i64,
    ) -> Self {
        Self {
            date,
            hour,
            weekday,
            season: season.into(),
            casual_count,
            registered_count,
            total_count: casual_count + registered_count,
        }
    }

    /// Whether `total_count == casual_count + registered_count`.
    pub fn is_consistent(&self) -> bool {
        self.total_count == self.casual_count + self.registered_count
    }
}

/// Inclusive `[start, end]` date range. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range, swapping reversed bounds.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// A range covering one calendar day.
    pub fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days after `start` that `end` falls on.
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Date `offset` days after `start`, saturating at `end`.
    pub fn day_at(&self, offset: i64) -> NaiveDate {
        let offset = offset.clamp(0, self.span_days()) as u64;
        self.start
            .checked_add_days(Days::new(offset))
            .unwrap_or(self.end)
    }

    /// Offset of `date` from `start`, clamped into the range.
    pub fn offset_of(&self, date: NaiveDate) -> i64 {
        (date - self.start).num_days().clamp(0, self.span_days())
    }

    /// Restrict this range to `bounds`. A range entirely outside collapses onto
    /// the nearest bound.
    pub fn clamp_to(&self, bounds: &DateRange) -> Self {
        let start = self.start.clamp(bounds.start, bounds.end);
        let end = self.end.clamp(bounds.start, bounds.end);
        Self::new(start, end)
    }
}

/// Days since 1970-01-01, the physical representation of a polars `Date`.
pub fn epoch_days(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - EPOCH_DAYS_FROM_CE
}

/// Inverse of [`epoch_days`].
pub fn from_epoch_days(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days.checked_add(EPOCH_DAYS_FROM_CE)?)
}

/// Display name for a weekday code (0 = Sunday).
pub fn weekday_label(weekday: i32) -> String {
    match weekday {
        0 => "Sun".to_string(),
        1 => "Mon".to_string(),
        2 => "Tue".to_string(),
        3 => "Wed".to_string(),
        4 => "Thu".to_string(),
        5 => "Fri".to_string(),
        6 => "Sat".to_string(),
        other => other.to_string(),
    }
}

/// Display name for a season code. Non-numeric labels pass through.
pub fn season_label(season: &str) -> String {
    match season.trim() {
        "1" => "Spring".to_string(),
        "2" => "Summer".to_string(),
        "3" => "Fall".to_string(),
        "4" => "Winter".to_string(),
        other => other.to_string(),
    }
}
