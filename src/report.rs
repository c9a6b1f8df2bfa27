//! Report Export Module
//! Writes every dashboard view as a PNG chart plus a JSON dump of the
//! aggregated tables.

use crate::charts::{hourly_bars, seasonal_bars, weekday_bars, StaticChartRenderer};
use crate::data::DateRange;
use crate::stats::DashboardViews;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to render {path}: {message}")]
    Render { path: PathBuf, message: String },
    #[error("Failed to serialize views: {0}")]
    Json(#[from] serde_json::Error),
}

/// JSON document written next to the charts.
#[derive(Serialize)]
struct ViewsDocument<'a> {
    range: Option<DateRange>,
    views: &'a DashboardViews,
}

/// Report generator for exporting the dashboard without a window.
pub struct ReportExporter;

impl ReportExporter {
    /// Render all charts and the JSON dump into `dir`, creating it if needed.
    /// Returns the written file paths.
    pub fn export(
        views: &DashboardViews,
        range: Option<DateRange>,
        dir: &Path,
    ) -> Result<Vec<PathBuf>, ExportError> {
        fs::create_dir_all(dir).map_err(|source| ExportError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut written = Vec::new();

        let daily = dir.join("daily.png");
        Self::render(&daily, || {
            StaticChartRenderer::render_daily(&daily, &views.daily)
        })?;
        written.push(daily);

        let hourly = dir.join("hourly.png");
        Self::render(&hourly, || {
            StaticChartRenderer::render_bars(
                &hourly,
                "Total Rentals by Hour",
                "Hour",
                &hourly_bars(&views.hourly),
            )
        })?;
        written.push(hourly);

        let weekday = dir.join("weekday.png");
        Self::render(&weekday, || {
            StaticChartRenderer::render_bars(
                &weekday,
                "Total Rentals by Day of the Week",
                "Weekday",
                &weekday_bars(&views.weekday),
            )
        })?;
        written.push(weekday);

        let split = dir.join("weekday_split.png");
        Self::render(&split, || {
            StaticChartRenderer::render_weekday_split(&split, &views.weekday_split)
        })?;
        written.push(split);

        let seasonal = dir.join("seasonal.png");
        Self::render(&seasonal, || {
            StaticChartRenderer::render_bars(
                &seasonal,
                "Total Rentals by Season",
                "Season",
                &seasonal_bars(&views.seasonal),
            )
        })?;
        written.push(seasonal);

        let heatmap = dir.join("heatmap.png");
        Self::render(&heatmap, || {
            StaticChartRenderer::render_heatmap(&heatmap, &views.heatmap)
        })?;
        written.push(heatmap);

        let json = dir.join("views.json");
        Self::write_views_json(views, range, &json)?;
        written.push(json);

        info!(dir = %dir.display(), files = written.len(), "report exported");
        Ok(written)
    }

    /// Serialize the views (and the range they cover) as pretty JSON.
    pub fn write_views_json(
        views: &DashboardViews,
        range: Option<DateRange>,
        path: &Path,
    ) -> Result<(), ExportError> {
        let io_err = |source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &ViewsDocument { range, views })?;
        writer.flush().map_err(io_err)?;
        Ok(())
    }

    fn render(
        path: &Path,
        draw: impl FnOnce() -> Result<(), Box<dyn std::error::Error>>,
    ) -> Result<(), ExportError> {
        draw().map_err(|e| ExportError::Render {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!(path = %path.display(), "chart rendered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{records_to_frame, RentalRecord};
    use chrono::NaiveDate;

    #[test]
    fn json_dump_contains_every_view() {
        let date = NaiveDate::from_ymd_opt(2011, 1, 1).unwrap();
        let records = vec![
            RentalRecord::new(date, 0, 6, "1", 3, 13),
            RentalRecord::new(date, 1, 6, "1", 8, 32),
        ];
        let views = DashboardViews::compute(&records_to_frame(&records).unwrap()).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("views.json");
        ReportExporter::write_views_json(&views, Some(DateRange::single_day(date)), &path)
            .unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["range"]["start"], "2011-01-01");
        assert_eq!(value["views"]["daily"][0]["total"], 56);
        assert_eq!(value["views"]["hourly"].as_array().unwrap().len(), 2);
        assert_eq!(value["views"]["heatmap"]["cells"][0][1], 40);
        assert_eq!(value["views"]["metrics"]["total_registered"], 45);
    }

    #[test]
    fn json_dump_into_missing_directory_fails() {
        let views = DashboardViews::default();
        let result =
            ReportExporter::write_views_json(&views, None, Path::new("/nonexistent/dir/v.json"));
        assert!(matches!(result, Err(ExportError::Io { .. })));
    }
}
