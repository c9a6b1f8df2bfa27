//! Chart Plotter Module
//! Interactive dashboard charts using egui_plot.

use crate::charts::palette::{self, Rgb};
use crate::data::model::{epoch_days, from_epoch_days, weekday_label};
use crate::stats::{bar_roles, DailyTotal, HourWeekdayMatrix, WeekdaySplit};
use egui::{Align2, Color32, FontId, RichText, Sense};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

const CHART_HEIGHT: f32 = 280.0;
const HEATMAP_LABEL_WIDTH: f32 = 44.0;
const HEATMAP_ROW_HEIGHT: f32 = 30.0;

fn color(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.0, rgb.1, rgb.2)
}

/// One labelled bar of a single-series bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarDatum {
    pub label: String,
    pub value: i64,
}

/// Label for a category axis tick; ticks between categories stay blank.
pub(crate) fn category_label(labels: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

/// Creates the dashboard charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Line chart of total rentals per day. X values are day numbers, shown as
    /// ISO dates.
    pub fn draw_daily_chart(ui: &mut egui::Ui, daily: &[DailyTotal]) {
        let points: Vec<[f64; 2]> = daily
            .iter()
            .map(|d| [epoch_days(d.date) as f64, d.total as f64])
            .collect();

        Plot::new("daily_rentals")
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label("Date")
            .y_axis_label("Total Rentals")
            .x_axis_formatter(|mark, _range| {
                from_epoch_days(mark.value.round() as i32)
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default()
            })
            .label_formatter(|_name, value| {
                let date = from_epoch_days(value.x.round() as i32)
                    .map(|d| d.to_string())
                    .unwrap_or_default();
                format!("{}\n{:.0} rentals", date, value.y)
            })
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(points.iter().copied()))
                        .color(color(palette::LINE))
                        .width(2.0)
                        .name("Total rentals"),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(points.iter().copied()))
                        .radius(2.5)
                        .color(color(palette::LINE)),
                );
            });
    }

    /// Bar chart with the highest bars in the peak color and the lowest in the
    /// low color.
    pub fn draw_highlighted_bars(
        ui: &mut egui::Ui,
        id: &str,
        bars: &[BarDatum],
        x_label: &str,
        y_label: &str,
    ) {
        let values: Vec<i64> = bars.iter().map(|b| b.value).collect();
        let roles = bar_roles(&values);
        let labels: Vec<String> = bars.iter().map(|b| b.label.clone()).collect();

        let plot_bars: Vec<Bar> = bars
            .iter()
            .zip(&roles)
            .enumerate()
            .map(|(i, (bar, role))| {
                Bar::new(i as f64, bar.value as f64)
                    .width(0.7)
                    .fill(color(palette::bar_color(*role)))
                    .name(&bar.label)
            })
            .collect();

        Plot::new(id)
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .allow_drag(false)
            .x_axis_label(x_label)
            .y_axis_label(y_label)
            .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(plot_bars).name(y_label));
            });

        Self::draw_extremes_caption(ui, bars);
    }

    /// Casual rentals stacked under registered rentals, per weekday.
    pub fn draw_stacked_weekday(ui: &mut egui::Ui, split: &[WeekdaySplit]) {
        let labels: Vec<String> = split.iter().map(|s| weekday_label(s.weekday)).collect();

        let casual = BarChart::new(
            split
                .iter()
                .enumerate()
                .map(|(i, s)| Bar::new(i as f64, s.casual as f64).width(0.7))
                .collect(),
        )
        .color(color(palette::CASUAL))
        .name("Casual Rentals");

        let registered = BarChart::new(
            split
                .iter()
                .enumerate()
                .map(|(i, s)| Bar::new(i as f64, s.registered as f64).width(0.7))
                .collect(),
        )
        .color(color(palette::REGISTERED))
        .name("Registered Rentals")
        .stack_on(&[&casual]);

        Plot::new("weekday_split")
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .allow_drag(false)
            .legend(Legend::default())
            .x_axis_label("Day of the Week")
            .y_axis_label("Total Rentals")
            .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(casual);
                plot_ui.bar_chart(registered);
            });
    }

    /// Weekday x hour heatmap drawn cell by cell. Undefined cells stay empty.
    pub fn draw_heatmap(ui: &mut egui::Ui, matrix: &HourWeekdayMatrix) {
        if matrix.is_empty() {
            ui.label("No data in the selected range");
            return;
        }

        let max = matrix.max_value().unwrap_or(0);
        let rows = matrix.weekdays.len();
        let cols = matrix.hours.len();
        let width = ui.available_width().max(HEATMAP_LABEL_WIDTH + cols as f32 * 8.0);
        let height = HEATMAP_ROW_HEIGHT * (rows as f32 + 1.0);

        let (response, painter) = ui.allocate_painter(egui::vec2(width, height), Sense::hover());
        let rect = response.rect;
        let cell_w = (rect.width() - HEATMAP_LABEL_WIDTH) / cols as f32;
        let text_color = ui.visuals().text_color();
        let font = FontId::proportional(11.0);

        let cell_rect = |row: usize, col: usize| {
            egui::Rect::from_min_size(
                egui::pos2(
                    rect.left() + HEATMAP_LABEL_WIDTH + col as f32 * cell_w,
                    rect.top() + row as f32 * HEATMAP_ROW_HEIGHT,
                ),
                egui::vec2(cell_w - 1.0, HEATMAP_ROW_HEIGHT - 1.0),
            )
        };

        for (row, weekday) in matrix.weekdays.iter().enumerate() {
            painter.text(
                egui::pos2(
                    rect.left() + HEATMAP_LABEL_WIDTH - 6.0,
                    cell_rect(row, 0).center().y,
                ),
                Align2::RIGHT_CENTER,
                weekday_label(*weekday),
                font.clone(),
                text_color,
            );
            for (col, value) in matrix.cells[row].iter().enumerate() {
                if let Some(value) = value {
                    painter.rect_filled(
                        cell_rect(row, col),
                        0.0,
                        color(palette::heat_color(*value, max)),
                    );
                }
            }
        }

        for (col, hour) in matrix.hours.iter().enumerate() {
            painter.text(
                egui::pos2(
                    cell_rect(rows, col).center().x,
                    rect.top() + rows as f32 * HEATMAP_ROW_HEIGHT + 8.0,
                ),
                Align2::CENTER_TOP,
                hour.to_string(),
                font.clone(),
                text_color,
            );
        }

        let hovered = response.hover_pos().and_then(|pos| {
            let col = ((pos.x - rect.left() - HEATMAP_LABEL_WIDTH) / cell_w).floor();
            let row = ((pos.y - rect.top()) / HEATMAP_ROW_HEIGHT).floor();
            if col < 0.0 || row < 0.0 || col as usize >= cols || row as usize >= rows {
                return None;
            }
            Some((row as usize, col as usize))
        });

        if let Some((row, col)) = hovered {
            let text = match matrix.cells[row][col] {
                Some(value) => format!(
                    "{} {:02}:00 - {} rentals",
                    weekday_label(matrix.weekdays[row]),
                    matrix.hours[col],
                    value
                ),
                None => format!(
                    "{} {:02}:00 - no records",
                    weekday_label(matrix.weekdays[row]),
                    matrix.hours[col]
                ),
            };
            response.on_hover_text(text);
        }
    }

    fn draw_extremes_caption(ui: &mut egui::Ui, bars: &[BarDatum]) {
        let max = bars.iter().max_by_key(|b| b.value);
        let min = bars.iter().min_by_key(|b| b.value);
        if let (Some(max), Some(min)) = (max, min) {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(format!("Highest: {} ({})", max.label, max.value))
                        .color(color(palette::PEAK)),
                );
                ui.add_space(12.0);
                ui.label(
                    RichText::new(format!("Lowest: {} ({})", min.label, min.value))
                        .color(color(palette::LOW)),
                );
            });
        }
    }
}
