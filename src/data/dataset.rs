//! Dataset Module
//! Immutable, date-sorted rental table and the date-range filter.

use crate::data::model::{
    epoch_days, from_epoch_days, DateRange, RentalRecord, CASUAL, DATE, HOUR, REGISTERED, SEASON,
    TOTAL, WEEKDAY,
};
use polars::prelude::*;

/// Rental records held as a polars frame with canonical columns, sorted
/// ascending by date.
#[derive(Debug, Clone)]
pub struct Dataset {
    df: DataFrame,
    bounds: Option<DateRange>,
}

impl Dataset {
    /// Wrap a frame that already carries the canonical schema.
    /// The frame is re-sorted by date.
    pub fn from_frame(df: DataFrame) -> PolarsResult<Self> {
        let df = df
            .lazy()
            .sort([DATE], SortMultipleOptions::default().with_maintain_order(true))
            .collect()?;
        let days = int32_values(&df, DATE)?;
        let bounds = match (days.first(), days.last()) {
            (Some(&first), Some(&last)) => match (from_epoch_days(first), from_epoch_days(last)) {
                (Some(start), Some(end)) => Some(DateRange::new(start, end)),
                _ => None,
            },
            _ => None,
        };
        Ok(Self { df, bounds })
    }

    /// Build a dataset from in-memory records.
    pub fn from_records(records: &[RentalRecord]) -> PolarsResult<Self> {
        Self::from_frame(records_to_frame(records)?)
    }

    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    pub fn len(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Earliest and latest date present, `None` when empty.
    pub fn date_bounds(&self) -> Option<DateRange> {
        self.bounds
    }

    /// Records whose date falls inside `range`, both ends inclusive.
    pub fn filter(&self, range: &DateRange) -> PolarsResult<DataFrame> {
        filter_by_date_range(&self.df, range)
    }

    /// Materialize every row as a [`RentalRecord`].
    pub fn records(&self) -> PolarsResult<Vec<RentalRecord>> {
        frame_to_records(&self.df)
    }
}

/// Filter a canonical frame to an inclusive date range.
pub fn filter_by_date_range(df: &DataFrame, range: &DateRange) -> PolarsResult<DataFrame> {
    df.clone()
        .lazy()
        .filter(
            col(DATE)
                .gt_eq(lit(range.start))
                .and(col(DATE).lt_eq(lit(range.end))),
        )
        .collect()
}

/// Build a canonical frame from records, preserving their order.
pub fn records_to_frame(records: &[RentalRecord]) -> PolarsResult<DataFrame> {
    let dates: Vec<i32> = records.iter().map(|r| epoch_days(r.date)).collect();
    let hours: Vec<i32> = records.iter().map(|r| r.hour).collect();
    let weekdays: Vec<i32> = records.iter().map(|r| r.weekday).collect();
    let seasons: Vec<String> = records.iter().map(|r| r.season.clone()).collect();
    let casual: Vec<i64> = records.iter().map(|r| r.casual_count).collect();
    let registered: Vec<i64> = records.iter().map(|r| r.registered_count).collect();
    let total: Vec<i64> = records.iter().map(|r| r.total_count).collect();

    DataFrame::new(vec![
        Column::new(DATE.into(), dates).cast(&DataType::Date)?,
        Column::new(HOUR.into(), hours),
        Column::new(WEEKDAY.into(), weekdays),
        Column::new(SEASON.into(), seasons),
        Column::new(CASUAL.into(), casual),
        Column::new(REGISTERED.into(), registered),
        Column::new(TOTAL.into(), total),
    ])
}

/// Read every row of a canonical frame back into records.
pub fn frame_to_records(df: &DataFrame) -> PolarsResult<Vec<RentalRecord>> {
    let dates = int32_values(df, DATE)?;
    let hours = int32_values(df, HOUR)?;
    let weekdays = int32_values(df, WEEKDAY)?;
    let seasons = string_values(df, SEASON)?;
    let casual = int64_values(df, CASUAL)?;
    let registered = int64_values(df, REGISTERED)?;
    let total = int64_values(df, TOTAL)?;

    let mut records = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let Some(date) = from_epoch_days(dates[i]) else {
            return Err(PolarsError::ComputeError(
                format!("row {}: day number {} is outside the calendar", i, dates[i]).into(),
            ));
        };
        records.push(RentalRecord {
            date,
            hour: hours[i],
            weekday: weekdays[i],
            season: seasons[i].clone(),
            casual_count: casual[i],
            registered_count: registered[i],
            total_count: total[i],
        });
    }
    Ok(records)
}

/// Values of a column cast to `Int32`. Nulls read as 0; a `Date` column
/// yields its day numbers.
pub fn int32_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<i32>> {
    let column = df.column(name)?.cast(&DataType::Int32)?;
    Ok(column.i32()?.into_iter().map(|v| v.unwrap_or(0)).collect())
}

/// Values of a column cast to `Int64`. Nulls read as 0.
pub fn int64_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<i64>> {
    let column = df.column(name)?.cast(&DataType::Int64)?;
    Ok(column.i64()?.into_iter().map(|v| v.unwrap_or(0)).collect())
}

/// Values of a column cast to `String`. Nulls read as empty strings.
pub fn string_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<String>> {
    let column = df.column(name)?.cast(&DataType::String)?;
    Ok(column
        .str()?
        .into_iter()
        .map(|v| v.unwrap_or_default().to_string())
        .collect())
}
