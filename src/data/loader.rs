//! CSV Data Loader Module
//! Reads the rental CSV once with Polars and maps it onto the canonical schema.

use crate::config::ColumnMapping;
use crate::data::dataset::Dataset;
use crate::data::model::{CASUAL, DATE, HOUR, REGISTERED, SEASON, TOTAL, WEEKDAY};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Missing column '{column}' in {path}")]
    MissingColumn { column: String, path: PathBuf },
    #[error("No valid rows in {0}")]
    NoData(PathBuf),
}

/// Outcome of a load: the dataset plus counts of rows that needed attention.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub dataset: Dataset,
    pub rows_read: usize,
    pub rows_dropped: usize,
    pub inconsistent_totals: usize,
}

/// Handles CSV file loading with Polars.
pub struct DataLoader {
    columns: ColumnMapping,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new(ColumnMapping::default())
    }
}

impl DataLoader {
    pub fn new(columns: ColumnMapping) -> Self {
        Self { columns }
    }

    /// Load a CSV file into a date-sorted [`Dataset`].
    ///
    /// Rows with an unparseable date, a null field, an hour outside 0-23, a
    /// weekday outside 0-6 or a negative count are dropped. Rows whose total
    /// disagrees with casual + registered are kept and counted.
    pub fn load_csv(&self, file_path: &Path) -> Result<LoadReport, LoaderError> {
        info!(path = %file_path.display(), "loading rental data");

        let raw = LazyCsvReader::new(file_path)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        self.check_columns(&raw, file_path)?;
        let rows_read = raw.height();

        let canonical = raw
            .lazy()
            .select(self.canonical_exprs())
            .filter(valid_row())
            .collect()?;

        let rows_dropped = rows_read - canonical.height();
        if rows_dropped > 0 {
            warn!(rows_dropped, "dropped malformed rows");
        }
        if canonical.height() == 0 {
            return Err(LoaderError::NoData(file_path.to_path_buf()));
        }

        let inconsistent_totals = count_inconsistent_totals(&canonical)?;
        if inconsistent_totals > 0 {
            warn!(
                inconsistent_totals,
                "rows where total != casual + registered"
            );
        }

        let dataset = Dataset::from_frame(canonical)?;
        if let Some(bounds) = dataset.date_bounds() {
            info!(
                rows = dataset.len(),
                start = %bounds.start,
                end = %bounds.end,
                "rental data loaded"
            );
        }

        Ok(LoadReport {
            dataset,
            rows_read,
            rows_dropped,
            inconsistent_totals,
        })
    }

    fn check_columns(&self, df: &DataFrame, file_path: &Path) -> Result<(), LoaderError> {
        for name in self.columns.source_names() {
            if df.column(name).is_err() {
                return Err(LoaderError::MissingColumn {
                    column: name.to_string(),
                    path: file_path.to_path_buf(),
                });
            }
        }
        debug!(columns = ?df.get_column_names(), "source columns present");
        Ok(())
    }

    /// Source columns renamed and cast to the canonical schema.
    fn canonical_exprs(&self) -> Vec<Expr> {
        let c = &self.columns;
        vec![
            col(c.date.as_str()).cast(DataType::Date).alias(DATE),
            col(c.hour.as_str()).cast(DataType::Int32).alias(HOUR),
            col(c.weekday.as_str()).cast(DataType::Int32).alias(WEEKDAY),
            col(c.season.as_str()).cast(DataType::String).alias(SEASON),
            col(c.casual.as_str()).cast(DataType::Int64).alias(CASUAL),
            col(c.registered.as_str())
                .cast(DataType::Int64)
                .alias(REGISTERED),
            col(c.total.as_str()).cast(DataType::Int64).alias(TOTAL),
        ]
    }
}

/// Row predicate over canonical columns. Null comparisons filter the row out.
fn valid_row() -> Expr {
    col(DATE)
        .is_not_null()
        .and(col(HOUR).gt_eq(lit(0)))
        .and(col(HOUR).lt_eq(lit(23)))
        .and(col(WEEKDAY).gt_eq(lit(0)))
        .and(col(WEEKDAY).lt_eq(lit(6)))
        .and(col(SEASON).is_not_null())
        .and(col(CASUAL).gt_eq(lit(0)))
        .and(col(REGISTERED).gt_eq(lit(0)))
        .and(col(TOTAL).gt_eq(lit(0)))
}

fn count_inconsistent_totals(df: &DataFrame) -> PolarsResult<usize> {
    let mismatched = df
        .clone()
        .lazy()
        .filter(col(TOTAL).neq(col(CASUAL) + col(REGISTERED)))
        .collect()?;
    Ok(mismatched.height())
}
