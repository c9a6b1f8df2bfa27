//! Statistics Calculator Module
//! Headline metrics over the daily totals and peak/low detection for bar views.

use crate::stats::aggregator::DailyTotal;
use chrono::NaiveDate;
use serde::Serialize;
use statrs::statistics::{Data, Median, Statistics};

/// Headline numbers shown beside the charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryMetrics {
    pub total_rentals: i64,
    pub total_casual: i64,
    pub total_registered: i64,
    pub days: usize,
    pub mean_daily: f64,
    pub median_daily: f64,
    pub std_daily: f64,
    pub busiest_day: Option<(NaiveDate, i64)>,
    pub quietest_day: Option<(NaiveDate, i64)>,
}

impl Default for SummaryMetrics {
    fn default() -> Self {
        Self {
            total_rentals: 0,
            total_casual: 0,
            total_registered: 0,
            days: 0,
            mean_daily: f64::NAN,
            median_daily: f64::NAN,
            std_daily: f64::NAN,
            busiest_day: None,
            quietest_day: None,
        }
    }
}

impl SummaryMetrics {
    /// Compute metrics from per-date totals. Empty input gives zero sums and
    /// NaN statistics.
    pub fn from_daily(daily: &[DailyTotal]) -> Self {
        if daily.is_empty() {
            return Self::default();
        }

        let totals: Vec<f64> = daily.iter().map(|d| d.total as f64).collect();
        let mean_daily = totals.iter().mean();
        // Sample standard deviation; NaN for a single day.
        let std_daily = totals.iter().std_dev();
        let median_daily = Data::new(totals).median();

        // Ties resolve to the earliest date.
        let busiest_day = daily
            .iter()
            .max_by(|a, b| a.total.cmp(&b.total).then(b.date.cmp(&a.date)))
            .map(|d| (d.date, d.total));
        let quietest_day = daily
            .iter()
            .min_by(|a, b| a.total.cmp(&b.total).then(a.date.cmp(&b.date)))
            .map(|d| (d.date, d.total));

        Self {
            total_rentals: daily.iter().map(|d| d.total).sum(),
            total_casual: daily.iter().map(|d| d.casual).sum(),
            total_registered: daily.iter().map(|d| d.registered).sum(),
            days: daily.len(),
            mean_daily,
            median_daily,
            std_daily,
            busiest_day,
            quietest_day,
        }
    }
}

/// How a bar is drawn relative to the others in its chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BarRole {
    Peak,
    Low,
    Normal,
}

/// Maximum and minimum of a bar series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Extremes {
    pub max: i64,
    pub min: i64,
}

impl Extremes {
    pub fn of(values: impl IntoIterator<Item = i64>) -> Option<Self> {
        values.into_iter().fold(None, |acc, v| match acc {
            None => Some(Self { max: v, min: v }),
            Some(e) => Some(Self {
                max: e.max.max(v),
                min: e.min.min(v),
            }),
        })
    }

    /// Every bar equal to the maximum is a peak, every bar equal to the minimum
    /// a low. A flat series is all peaks.
    pub fn role(&self, value: i64) -> BarRole {
        if value == self.max {
            BarRole::Peak
        } else if value == self.min {
            BarRole::Low
        } else {
            BarRole::Normal
        }
    }
}

/// Roles for a bar series, in input order.
pub fn bar_roles(values: &[i64]) -> Vec<BarRole> {
    match Extremes::of(values.iter().copied()) {
        Some(extremes) => values.iter().map(|&v| extremes.role(v)).collect(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32, total: i64) -> DailyTotal {
        DailyTotal {
            date: NaiveDate::from_ymd_opt(2012, 5, d).unwrap(),
            total,
            casual: total / 4,
            registered: total - total / 4,
        }
    }

    #[test]
    fn metrics_over_daily_totals() {
        let daily = vec![day(1, 100), day(2, 300), day(3, 200), day(4, 400)];
        let metrics = SummaryMetrics::from_daily(&daily);

        assert_eq!(metrics.total_rentals, 1000);
        assert_eq!(metrics.total_casual + metrics.total_registered, 1000);
        assert_eq!(metrics.days, 4);
        assert!((metrics.mean_daily - 250.0).abs() < 1e-9);
        assert!((metrics.median_daily - 250.0).abs() < 1e-9);
        // sqrt(50000 / 3)
        assert!((metrics.std_daily - 129.0994448735806).abs() < 1e-9);
        assert_eq!(metrics.busiest_day, Some((day(4, 0).date, 400)));
        assert_eq!(metrics.quietest_day, Some((day(1, 0).date, 100)));
    }

    #[test]
    fn ties_pick_earliest_day() {
        let daily = vec![day(1, 50), day(2, 90), day(3, 90), day(4, 50)];
        let metrics = SummaryMetrics::from_daily(&daily);
        assert_eq!(metrics.busiest_day, Some((day(2, 0).date, 90)));
        assert_eq!(metrics.quietest_day, Some((day(1, 0).date, 50)));
    }

    #[test]
    fn empty_metrics() {
        let metrics = SummaryMetrics::from_daily(&[]);
        assert_eq!(metrics.total_rentals, 0);
        assert_eq!(metrics.days, 0);
        assert!(metrics.mean_daily.is_nan());
        assert_eq!(metrics.busiest_day, None);
    }

    #[test]
    fn roles_mark_every_tied_extreme() {
        assert_eq!(
            bar_roles(&[5, 9, 1, 9, 1, 4]),
            vec![
                BarRole::Normal,
                BarRole::Peak,
                BarRole::Low,
                BarRole::Peak,
                BarRole::Low,
                BarRole::Normal
            ]
        );
    }

    #[test]
    fn flat_series_is_all_peaks() {
        assert_eq!(bar_roles(&[3, 3]), vec![BarRole::Peak, BarRole::Peak]);
        assert!(bar_roles(&[]).is_empty());
    }
}
