//! Rental Aggregator Module
//! Group-and-sum views over a filtered rental frame.
//!
//! Every function here is pure: it reads a frame with the canonical columns,
//! never mutates it, and returns rows sorted by their grouping key. An empty
//! frame produces empty views.

use crate::data::model::{
    from_epoch_days, CASUAL, DATE, HOUR, REGISTERED, SEASON, TOTAL, WEEKDAY,
};
use crate::data::{int32_values, int64_values, string_values};
use crate::stats::calculator::SummaryMetrics;
use chrono::NaiveDate;
use polars::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Day number {0} is outside the calendar range")]
    InvalidDate(i32),
}

/// Per-date sums.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total: i64,
    pub casual: i64,
    pub registered: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeasonTotal {
    pub season: String,
    pub total: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HourTotal {
    pub hour: i32,
    pub total: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekdayTotal {
    pub weekday: i32,
    pub total: i64,
}

/// Casual and registered sums for one weekday (stacked bar input).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekdaySplit {
    pub weekday: i32,
    pub casual: i64,
    pub registered: i64,
}

/// Weekday x hour sums. Rows are the weekdays present, columns the hours
/// present, both ascending. Combinations with no records are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HourWeekdayMatrix {
    pub weekdays: Vec<i32>,
    pub hours: Vec<i32>,
    pub cells: Vec<Vec<Option<i64>>>,
}

impl HourWeekdayMatrix {
    /// Pivot `(weekday, hour, total)` triples. Repeated keys are summed.
    pub fn from_triples(triples: impl IntoIterator<Item = (i32, i32, i64)>) -> Self {
        let mut sums: BTreeMap<(i32, i32), i64> = BTreeMap::new();
        for (weekday, hour, total) in triples {
            *sums.entry((weekday, hour)).or_insert(0) += total;
        }

        let mut weekdays: Vec<i32> = sums.keys().map(|&(w, _)| w).collect();
        weekdays.dedup();
        let mut hours: Vec<i32> = sums.keys().map(|&(_, h)| h).collect();
        hours.sort_unstable();
        hours.dedup();

        let cells = weekdays
            .iter()
            .map(|w| hours.iter().map(|h| sums.get(&(*w, *h)).copied()).collect())
            .collect();

        Self {
            weekdays,
            hours,
            cells,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.weekdays.is_empty()
    }

    pub fn get(&self, weekday: i32, hour: i32) -> Option<i64> {
        let row = self.weekdays.iter().position(|&w| w == weekday)?;
        let col = self.hours.iter().position(|&h| h == hour)?;
        self.cells[row][col]
    }

    /// Largest defined cell.
    pub fn max_value(&self) -> Option<i64> {
        self.cells.iter().flatten().flatten().copied().max()
    }

    /// Sum of every defined cell.
    pub fn total(&self) -> i64 {
        self.cells.iter().flatten().flatten().sum()
    }
}

/// Aggregations over a canonical rental frame.
pub struct Aggregator;

impl Aggregator {
    /// Sum `total`, `casual` and `registered` per calendar date, ascending.
    pub fn daily_totals(df: &DataFrame) -> Result<Vec<DailyTotal>, AggregateError> {
        let out = df
            .clone()
            .lazy()
            .group_by([col(DATE)])
            .agg([
                col(TOTAL).sum().alias(TOTAL),
                col(CASUAL).sum().alias(CASUAL),
                col(REGISTERED).sum().alias(REGISTERED),
            ])
            .sort([DATE], SortMultipleOptions::default())
            .collect()?;

        let days = int32_values(&out, DATE)?;
        let totals = int64_values(&out, TOTAL)?;
        let casual = int64_values(&out, CASUAL)?;
        let registered = int64_values(&out, REGISTERED)?;

        days.into_iter()
            .enumerate()
            .map(|(i, day)| -> Result<DailyTotal, AggregateError> {
                let date = from_epoch_days(day).ok_or(AggregateError::InvalidDate(day))?;
                Ok(DailyTotal {
                    date,
                    total: totals[i],
                    casual: casual[i],
                    registered: registered[i],
                })
            })
            .collect()
    }

    /// Sum `total` per season, ascending by season label.
    pub fn seasonal_totals(df: &DataFrame) -> Result<Vec<SeasonTotal>, AggregateError> {
        let out = Self::sum_by(df, SEASON, TOTAL)?;
        let seasons = string_values(&out, SEASON)?;
        let totals = int64_values(&out, TOTAL)?;

        Ok(seasons
            .into_iter()
            .zip(totals)
            .map(|(season, total)| SeasonTotal { season, total })
            .collect())
    }

    /// Sum `total` per hour of day, ascending.
    pub fn hourly_totals(df: &DataFrame) -> Result<Vec<HourTotal>, AggregateError> {
        let out = Self::sum_by(df, HOUR, TOTAL)?;
        let hours = int32_values(&out, HOUR)?;
        let totals = int64_values(&out, TOTAL)?;

        Ok(hours
            .into_iter()
            .zip(totals)
            .map(|(hour, total)| HourTotal { hour, total })
            .collect())
    }

    /// Sum `total` per weekday, ascending.
    pub fn weekday_totals(df: &DataFrame) -> Result<Vec<WeekdayTotal>, AggregateError> {
        let out = Self::sum_by(df, WEEKDAY, TOTAL)?;
        let weekdays = int32_values(&out, WEEKDAY)?;
        let totals = int64_values(&out, TOTAL)?;

        Ok(weekdays
            .into_iter()
            .zip(totals)
            .map(|(weekday, total)| WeekdayTotal { weekday, total })
            .collect())
    }

    /// Sum `casual` and `registered` per weekday, ascending.
    pub fn weekday_user_split(df: &DataFrame) -> Result<Vec<WeekdaySplit>, AggregateError> {
        let out = df
            .clone()
            .lazy()
            .group_by([col(WEEKDAY)])
            .agg([
                col(CASUAL).sum().alias(CASUAL),
                col(REGISTERED).sum().alias(REGISTERED),
            ])
            .sort([WEEKDAY], SortMultipleOptions::default())
            .collect()?;

        let weekdays = int32_values(&out, WEEKDAY)?;
        let casual = int64_values(&out, CASUAL)?;
        let registered = int64_values(&out, REGISTERED)?;

        Ok(weekdays
            .into_iter()
            .enumerate()
            .map(|(i, weekday)| WeekdaySplit {
                weekday,
                casual: casual[i],
                registered: registered[i],
            })
            .collect())
    }

    /// Sum `total` per `(weekday, hour)` and pivot into a weekday x hour matrix.
    pub fn hour_weekday_matrix(df: &DataFrame) -> Result<HourWeekdayMatrix, AggregateError> {
        let out = df
            .clone()
            .lazy()
            .group_by([col(WEEKDAY), col(HOUR)])
            .agg([col(TOTAL).sum().alias(TOTAL)])
            .collect()?;

        let weekdays = int32_values(&out, WEEKDAY)?;
        let hours = int32_values(&out, HOUR)?;
        let totals = int64_values(&out, TOTAL)?;

        Ok(HourWeekdayMatrix::from_triples(
            weekdays
                .into_iter()
                .zip(hours)
                .zip(totals)
                .map(|((w, h), t)| (w, h, t)),
        ))
    }

    /// Group by `key`, sum `value`, sort by `key`.
    fn sum_by(df: &DataFrame, key: &str, value: &str) -> PolarsResult<DataFrame> {
        df.clone()
            .lazy()
            .group_by([col(key)])
            .agg([col(value).sum().alias(value)])
            .sort([key], SortMultipleOptions::default())
            .collect()
    }
}

/// Every view the dashboard draws, computed from one filtered frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardViews {
    pub daily: Vec<DailyTotal>,
    pub seasonal: Vec<SeasonTotal>,
    pub hourly: Vec<HourTotal>,
    pub weekday: Vec<WeekdayTotal>,
    pub weekday_split: Vec<WeekdaySplit>,
    pub heatmap: HourWeekdayMatrix,
    pub metrics: SummaryMetrics,
}

impl DashboardViews {
    /// Run all aggregations. Independent views are computed on the rayon pool;
    /// the call returns once every view is ready.
    pub fn compute(df: &DataFrame) -> Result<Self, AggregateError> {
        let ((daily, seasonal), ((hourly, weekday), (weekday_split, heatmap))) = rayon::join(
            || {
                rayon::join(
                    || Aggregator::daily_totals(df),
                    || Aggregator::seasonal_totals(df),
                )
            },
            || {
                rayon::join(
                    || {
                        rayon::join(
                            || Aggregator::hourly_totals(df),
                            || Aggregator::weekday_totals(df),
                        )
                    },
                    || {
                        rayon::join(
                            || Aggregator::weekday_user_split(df),
                            || Aggregator::hour_weekday_matrix(df),
                        )
                    },
                )
            },
        );

        let daily = daily?;
        let metrics = SummaryMetrics::from_daily(&daily);

        Ok(Self {
            daily,
            seasonal: seasonal?,
            hourly: hourly?,
            weekday: weekday?,
            weekday_split: weekday_split?,
            heatmap: heatmap?,
            metrics,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.daily.is_empty()
    }
}
