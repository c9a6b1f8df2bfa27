//! Loading a rental CSV from disk and driving the views from it.

mod support;

use bike_dashboard::config::{ColumnMapping, DashboardConfig};
use bike_dashboard::data::{DataLoader, DateRange, LoaderError};
use bike_dashboard::report::ReportExporter;
use bike_dashboard::stats::DashboardViews;
use std::fs;
use std::io::Write;
use support::{date, HOURLY_CSV};
use tempfile::{tempdir, NamedTempFile};

fn csv_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn loads_raw_hourly_export() {
    let file = csv_file(HOURLY_CSV);
    let report = DataLoader::default().load_csv(file.path()).unwrap();

    assert_eq!(report.rows_read, 10);
    assert_eq!(report.rows_dropped, 2);
    assert_eq!(report.inconsistent_totals, 1);
    assert_eq!(
        report.dataset.date_bounds(),
        Some(DateRange::new(date(2011, 1, 1), date(2011, 1, 4)))
    );

    let views = DashboardViews::compute(report.dataset.frame()).unwrap();
    let daily: Vec<i64> = views.daily.iter().map(|d| d.total).collect();
    assert_eq!(daily, vec![88, 34, 7, 99]);
    assert_eq!(views.metrics.busiest_day, Some((date(2011, 1, 4), 99)));
}

#[test]
fn filtered_range_drives_metrics() {
    let file = csv_file(HOURLY_CSV);
    let dataset = DataLoader::default().load_csv(file.path()).unwrap().dataset;

    let range = DateRange::new(date(2011, 1, 2), date(2011, 1, 3));
    let views = DashboardViews::compute(&dataset.filter(&range).unwrap()).unwrap();
    assert_eq!(views.metrics.total_rentals, 41);
    assert_eq!(views.metrics.days, 2);
    assert_eq!(views.metrics.quietest_day, Some((date(2011, 1, 3), 7)));
}

#[test]
fn config_column_mapping_is_applied() {
    let config_file = csv_file(
        r#"{"columns": {"date": "day", "hour": "h", "total": "count"}}"#,
    );
    let config = DashboardConfig::load(config_file.path()).unwrap();
    assert_eq!(config.columns.weekday, ColumnMapping::default().weekday);

    let data = csv_file(
        "day,h,weekday,season,casual,registered,count\n\
         2012-06-01,8,5,3,20,300,320\n\
         2012-06-01,9,5,3,25,280,305\n",
    );
    let report = DataLoader::new(config.columns).load_csv(data.path()).unwrap();
    assert_eq!(report.dataset.len(), 2);

    let views = DashboardViews::compute(report.dataset.frame()).unwrap();
    assert_eq!(views.seasonal.len(), 1);
    assert_eq!(views.seasonal[0].season, "3");
    assert_eq!(views.seasonal[0].total, 625);
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempdir().unwrap();
    let result = DataLoader::default().load_csv(&dir.path().join("absent.csv"));
    assert!(matches!(result, Err(LoaderError::CsvError(_))));
}

/// Chart rendering draws text through a system font. Hosts without one set
/// `BIKE_DASHBOARD_SKIP_RENDER` to skip the PNG export tests.
fn render_tests_disabled() -> bool {
    if std::env::var_os("BIKE_DASHBOARD_SKIP_RENDER").is_some() {
        eprintln!("BIKE_DASHBOARD_SKIP_RENDER set, skipping chart export test");
        return true;
    }
    false
}

#[test]
fn export_writes_all_artifacts() {
    if render_tests_disabled() {
        return;
    }
    let file = csv_file(HOURLY_CSV);
    let dataset = DataLoader::default().load_csv(file.path()).unwrap().dataset;
    let views = DashboardViews::compute(dataset.frame()).unwrap();

    let dir = tempdir().unwrap();
    let out = dir.path().join("report");
    let written = ReportExporter::export(&views, dataset.date_bounds(), &out).unwrap();

    let names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "daily.png",
            "hourly.png",
            "weekday.png",
            "weekday_split.png",
            "seasonal.png",
            "heatmap.png",
            "views.json",
        ]
    );
    for path in &written {
        assert!(fs::metadata(path).unwrap().len() > 0);
    }
}
