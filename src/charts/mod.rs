//! Charts module - Chart rendering

pub mod palette;
mod plotter;
mod renderer;

pub use plotter::{BarDatum, ChartPlotter};
pub use renderer::{DrawResult, StaticChartRenderer};

use crate::data::model::{season_label, weekday_label};
use crate::stats::{HourTotal, SeasonTotal, WeekdayTotal};

/// Bars for the rentals-by-hour chart.
pub fn hourly_bars(hourly: &[HourTotal]) -> Vec<BarDatum> {
    hourly
        .iter()
        .map(|h| BarDatum {
            label: h.hour.to_string(),
            value: h.total,
        })
        .collect()
}

/// Bars for the rentals-by-weekday chart.
pub fn weekday_bars(weekday: &[WeekdayTotal]) -> Vec<BarDatum> {
    weekday
        .iter()
        .map(|w| BarDatum {
            label: weekday_label(w.weekday),
            value: w.total,
        })
        .collect()
}

/// Bars for the rentals-by-season chart.
pub fn seasonal_bars(seasonal: &[SeasonTotal]) -> Vec<BarDatum> {
    seasonal
        .iter()
        .map(|s| BarDatum {
            label: season_label(&s.season),
            value: s.total,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_labels_use_display_names() {
        let bars = weekday_bars(&[WeekdayTotal {
            weekday: 1,
            total: 42,
        }]);
        assert_eq!(
            bars,
            vec![BarDatum {
                label: "Mon".into(),
                value: 42
            }]
        );

        let bars = seasonal_bars(&[SeasonTotal {
            season: "4".into(),
            total: 7,
        }]);
        assert_eq!(bars[0].label, "Winter");

        let bars = hourly_bars(&[HourTotal { hour: 17, total: 3 }]);
        assert_eq!(bars[0].label, "17");
    }
}
