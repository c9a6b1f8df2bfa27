//! Bike Dashboard - interactive view of bike-sharing rentals.

use anyhow::{anyhow, Context, Result};
use bike_dashboard::config::DashboardConfig;
use bike_dashboard::data::{DataLoader, DateRange};
use bike_dashboard::gui::DashboardApp;
use bike_dashboard::report::ReportExporter;
use bike_dashboard::stats::DashboardViews;
use chrono::NaiveDate;
use clap::{ArgAction, Parser, ValueHint};
use eframe::egui;
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Bike sharing rentals dashboard", long_about = None)]
struct Cli {
    /// Rental CSV (overrides the config file)
    #[arg(long, value_hint = ValueHint::FilePath)]
    data: Option<PathBuf>,

    /// JSON config file
    #[arg(long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// First day of the initial range (YYYY-MM-DD)
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Last day of the initial range (YYYY-MM-DD)
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Write charts and views.json to this directory instead of opening a window
    #[arg(long, value_hint = ValueHint::DirPath)]
    export: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let mut config = match &cli.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(data) = cli.data.clone() {
        config.data_path = data;
    }

    let report = DataLoader::new(config.columns.clone())
        .load_csv(&config.data_path)
        .with_context(|| format!("loading {}", config.data_path.display()))?;
    info!(
        rows = report.rows_read,
        dropped = report.rows_dropped,
        inconsistent = report.inconsistent_totals,
        "dataset ready"
    );
    let dataset = report.dataset;

    let range = initial_range(dataset.date_bounds(), cli.start, cli.end);

    if let Some(dir) = cli.export {
        let filtered = match &range {
            Some(range) => dataset.filter(range)?,
            None => dataset.frame().clone(),
        };
        let views = DashboardViews::compute(&filtered)?;
        let written = ReportExporter::export(&views, range, &dir)?;
        for path in written {
            println!("{}", path.display());
        }
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([1000.0, 650.0])
            .with_title("Bike Sharing Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Bike Sharing Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, dataset, range)))),
    )
    .map_err(|e| anyhow!("failed to run dashboard window: {e}"))
}

/// Range requested on the command line. A missing bound falls back to the
/// dataset's own; a given bound is used as is, so a range outside the data
/// selects nothing.
fn initial_range(
    bounds: Option<DateRange>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Option<DateRange> {
    let bounds = bounds?;
    Some(DateRange::new(
        start.unwrap_or(bounds.start),
        end.unwrap_or(bounds.end),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn bounds() -> DateRange {
        DateRange::new(date(2011, 1, 1), date(2012, 12, 31))
    }

    #[test]
    fn missing_bounds_default_to_dataset() {
        assert_eq!(initial_range(Some(bounds()), None, None), Some(bounds()));
        assert_eq!(
            initial_range(Some(bounds()), Some(date(2012, 6, 1)), None),
            Some(DateRange::new(date(2012, 6, 1), date(2012, 12, 31)))
        );
        assert_eq!(initial_range(None, Some(date(2012, 6, 1)), None), None);
    }

    #[test]
    fn disjoint_range_is_kept_as_requested() {
        let requested = DateRange::new(date(2015, 1, 1), date(2015, 2, 1));
        assert_eq!(
            initial_range(Some(bounds()), Some(date(2015, 1, 1)), Some(date(2015, 2, 1))),
            Some(requested)
        );
    }

    #[test]
    fn overlapping_range_is_not_clamped() {
        assert_eq!(
            initial_range(Some(bounds()), Some(date(2010, 6, 1)), Some(date(2011, 3, 1))),
            Some(DateRange::new(date(2010, 6, 1), date(2011, 3, 1)))
        );
    }
}
