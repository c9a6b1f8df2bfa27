//! Static Chart Renderer
//! Draws the dashboard views to PNG files with plotters for report export.
//!
//! Layout of every image: caption on top, axis descriptions on the left and
//! bottom, bars or cells centered on integer category positions.

use crate::charts::palette::{self, Rgb};
use crate::charts::plotter::{category_label, BarDatum};
use crate::data::model::{epoch_days, from_epoch_days, weekday_label};
use crate::stats::{bar_roles, DailyTotal, HourWeekdayMatrix, WeekdaySplit};
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

pub type DrawResult = Result<(), Box<dyn Error>>;

const WIDTH: u32 = 1280;
const HEIGHT: u32 = 720;
const CAPTION_FONT: (&str, u32) = ("sans-serif", 28);
const BAR_HALF_WIDTH: f64 = 0.35;

fn rgb(c: Rgb) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

/// Upper bound of a value axis with some headroom.
fn value_axis_max(max: i64) -> f64 {
    (max as f64 * 1.1).max(1.0)
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Line chart of daily totals.
    pub fn render_daily(path: &Path, daily: &[DailyTotal]) -> DrawResult {
        let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE)?;

        let x_min = daily.first().map(|d| epoch_days(d.date)).unwrap_or(0) as f64;
        let x_max = daily
            .last()
            .map(|d| epoch_days(d.date) as f64)
            .unwrap_or(x_min)
            .max(x_min + 1.0);
        let y_max = value_axis_max(daily.iter().map(|d| d.total).max().unwrap_or(0));

        let mut chart = ChartBuilder::on(&root)
            .caption("Daily Bike Rental Trends", CAPTION_FONT)
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(80)
            .build_cartesian_2d(x_min..x_max, 0f64..y_max)?;

        chart
            .configure_mesh()
            .x_desc("Date")
            .y_desc("Total Rentals")
            .x_labels(8)
            .x_label_formatter(&|v| {
                from_epoch_days(v.round() as i32)
                    .map(|d| d.to_string())
                    .unwrap_or_default()
            })
            .draw()?;

        let line = rgb(palette::LINE);
        chart.draw_series(LineSeries::new(
            daily
                .iter()
                .map(|d| (epoch_days(d.date) as f64, d.total as f64)),
            &line,
        ))?;
        chart.draw_series(daily.iter().map(|d| {
            Circle::new(
                (epoch_days(d.date) as f64, d.total as f64),
                3,
                line.filled(),
            )
        }))?;

        root.present()?;
        Ok(())
    }

    /// Single-series bar chart with peak and low bars highlighted.
    pub fn render_bars(
        path: &Path,
        title: &str,
        x_desc: &str,
        bars: &[BarDatum],
    ) -> DrawResult {
        let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE)?;

        let labels: Vec<String> = bars.iter().map(|b| b.label.clone()).collect();
        let values: Vec<i64> = bars.iter().map(|b| b.value).collect();
        let roles = bar_roles(&values);
        let n = bars.len().max(1);
        let y_max = value_axis_max(values.iter().copied().max().unwrap_or(0));

        let mut chart = ChartBuilder::on(&root)
            .caption(title, CAPTION_FONT)
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(80)
            .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0f64..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(x_desc)
            .y_desc("Total Rentals")
            .x_labels(n)
            .x_label_formatter(&|v| category_label(&labels, *v))
            .draw()?;

        chart.draw_series(values.iter().zip(&roles).enumerate().map(|(i, (v, role))| {
            let x = i as f64;
            Rectangle::new(
                [(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, *v as f64)],
                rgb(palette::bar_color(*role)).filled(),
            )
        }))?;

        root.present()?;
        Ok(())
    }

    /// Casual and registered rentals stacked per weekday.
    pub fn render_weekday_split(path: &Path, split: &[WeekdaySplit]) -> DrawResult {
        let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE)?;

        let labels: Vec<String> = split.iter().map(|s| weekday_label(s.weekday)).collect();
        let n = split.len().max(1);
        let y_max = value_axis_max(
            split
                .iter()
                .map(|s| s.casual + s.registered)
                .max()
                .unwrap_or(0),
        );

        let mut chart = ChartBuilder::on(&root)
            .caption("Casual and Registered Rentals by Day", CAPTION_FONT)
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(80)
            .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0f64..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Day of the Week")
            .y_desc("Total Rentals")
            .x_labels(n)
            .x_label_formatter(&|v| category_label(&labels, *v))
            .draw()?;

        let casual = rgb(palette::CASUAL);
        let registered = rgb(palette::REGISTERED);

        chart
            .draw_series(split.iter().enumerate().map(|(i, s)| {
                let x = i as f64;
                Rectangle::new(
                    [(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, s.casual as f64)],
                    casual.filled(),
                )
            }))?
            .label("Casual Rentals")
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], casual.filled()));

        chart
            .draw_series(split.iter().enumerate().map(|(i, s)| {
                let x = i as f64;
                Rectangle::new(
                    [
                        (x - BAR_HALF_WIDTH, s.casual as f64),
                        (x + BAR_HALF_WIDTH, (s.casual + s.registered) as f64),
                    ],
                    registered.filled(),
                )
            }))?
            .label("Registered Rentals")
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 12, y + 5)], registered.filled())
            });

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;

        root.present()?;
        Ok(())
    }

    /// Weekday x hour heatmap. Undefined cells are left blank.
    pub fn render_heatmap(path: &Path, matrix: &HourWeekdayMatrix) -> DrawResult {
        let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE)?;

        let hour_labels: Vec<String> = matrix.hours.iter().map(|h| h.to_string()).collect();
        let weekday_labels: Vec<String> =
            matrix.weekdays.iter().map(|w| weekday_label(*w)).collect();
        let cols = matrix.hours.len().max(1);
        let rows = matrix.weekdays.len().max(1);
        let max = matrix.max_value().unwrap_or(0);

        let mut chart = ChartBuilder::on(&root)
            .caption("Rentals by Hour and Day", CAPTION_FONT)
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(-0.5f64..(cols as f64 - 0.5), -0.5f64..(rows as f64 - 0.5))?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc("Hour")
            .y_desc("Day of the Week")
            .x_labels(cols)
            .y_labels(rows)
            .x_label_formatter(&|v| category_label(&hour_labels, *v))
            .y_label_formatter(&|v| category_label(&weekday_labels, *v))
            .draw()?;

        chart.draw_series(matrix.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().filter_map(move |(col, value)| {
                let value = (*value)?;
                let (x, y) = (col as f64, row as f64);
                Some(Rectangle::new(
                    [(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)],
                    rgb(palette::heat_color(value, max)).filled(),
                ))
            })
        }))?;

        root.present()?;
        Ok(())
    }
}
