//! Control Panel Widget
//! Left side panel with the date-range filter and the headline metrics.

use crate::data::DateRange;
use crate::stats::SummaryMetrics;
use egui::{Color32, RichText};

/// Date range selection expressed as day offsets from the dataset's first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSelection {
    bounds: DateRange,
    start_offset: i64,
    end_offset: i64,
}

impl RangeSelection {
    /// Select the whole of `bounds`.
    pub fn full(bounds: DateRange) -> Self {
        Self {
            bounds,
            start_offset: 0,
            end_offset: bounds.span_days(),
        }
    }

    /// Select `range`, clamped into `bounds`.
    pub fn new(bounds: DateRange, range: DateRange) -> Self {
        let range = range.clamp_to(&bounds);
        Self {
            bounds,
            start_offset: bounds.offset_of(range.start),
            end_offset: bounds.offset_of(range.end),
        }
    }

    pub fn bounds(&self) -> DateRange {
        self.bounds
    }

    pub fn range(&self) -> DateRange {
        DateRange::new(
            self.bounds.day_at(self.start_offset),
            self.bounds.day_at(self.end_offset),
        )
    }

    /// Move the start; the end follows if it would fall before the start.
    pub fn set_start_offset(&mut self, offset: i64) {
        self.start_offset = offset.clamp(0, self.bounds.span_days());
        if self.end_offset < self.start_offset {
            self.end_offset = self.start_offset;
        }
    }

    /// Move the end; the start follows if it would fall after the end.
    pub fn set_end_offset(&mut self, offset: i64) {
        self.end_offset = offset.clamp(0, self.bounds.span_days());
        if self.start_offset > self.end_offset {
            self.start_offset = self.end_offset;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::full(self.bounds);
    }
}

/// Left side control panel with the date filter and metrics.
pub struct ControlPanel {
    pub selection: Option<RangeSelection>,
    pub dataset_rows: usize,
    pub filtered_rows: usize,
    pub status: String,
}

impl ControlPanel {
    pub fn new(selection: Option<RangeSelection>, dataset_rows: usize) -> Self {
        Self {
            selection,
            dataset_rows,
            filtered_rows: 0,
            status: "Ready".to_string(),
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui, metrics: Option<&SummaryMetrics>) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🚲 Bike Sharing Dashboard")
                    .size(20.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Date Range Section =====
        ui.label(RichText::new("📅 Date Range").size(14.0).strong());
        ui.add_space(5.0);

        match self.selection.as_mut() {
            Some(selection) => {
                let bounds = selection.bounds();
                let span = bounds.span_days();
                let format_offset = move |offset: f64| bounds.day_at(offset.round() as i64).to_string();

                ui.label(
                    RichText::new(format!("Data: {} to {}", bounds.start, bounds.end))
                        .size(11.0)
                        .color(Color32::GRAY),
                );
                ui.add_space(3.0);

                let mut start = selection.start_offset;
                let start_changed = ui
                    .horizontal(|ui| {
                        ui.label("From:");
                        ui.add(
                            egui::Slider::new(&mut start, 0..=span)
                                .custom_formatter(move |n, _| format_offset(n))
                                .show_value(true),
                        )
                        .changed()
                    })
                    .inner;
                if start_changed {
                    selection.set_start_offset(start);
                    action = ControlPanelAction::RangeChanged;
                }

                let mut end = selection.end_offset;
                let end_changed = ui
                    .horizontal(|ui| {
                        ui.label("To:  ");
                        ui.add(
                            egui::Slider::new(&mut end, 0..=span)
                                .custom_formatter(move |n, _| format_offset(n))
                                .show_value(true),
                        )
                        .changed()
                    })
                    .inner;
                if end_changed {
                    selection.set_end_offset(end);
                    action = ControlPanelAction::RangeChanged;
                }

                ui.add_space(5.0);
                if ui.button("↺ Reset range").clicked() {
                    selection.reset();
                    action = ControlPanelAction::RangeChanged;
                }
            }
            None => {
                ui.label(RichText::new("No dates available").color(Color32::GRAY));
            }
        }

        ui.add_space(10.0);
        ui.label(
            RichText::new(format!(
                "{} of {} records selected",
                self.filtered_rows, self.dataset_rows
            ))
            .size(11.0)
            .color(Color32::GRAY),
        );

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Metrics Section =====
        ui.label(RichText::new("📊 Rentals").size(14.0).strong());
        ui.add_space(5.0);

        match metrics {
            Some(metrics) => Self::draw_metrics(ui, metrics),
            None => {
                ui.label(RichText::new("No metrics").color(Color32::GRAY));
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(5.0);

        let status_color = if self.status.starts_with("Error") {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    fn draw_metrics(ui: &mut egui::Ui, metrics: &SummaryMetrics) {
        egui::Grid::new("rental_metrics")
            .num_columns(2)
            .striped(true)
            .spacing([12.0, 4.0])
            .show(ui, |ui| {
                ui.label("Total Rentals");
                ui.label(RichText::new(metrics.total_rentals.to_string()).strong());
                ui.end_row();

                ui.label("Casual Rentals");
                ui.label(metrics.total_casual.to_string());
                ui.end_row();

                ui.label("Registered Rentals");
                ui.label(metrics.total_registered.to_string());
                ui.end_row();

                ui.label("Days");
                ui.label(metrics.days.to_string());
                ui.end_row();

                ui.label("Mean / day");
                ui.label(format_stat(metrics.mean_daily));
                ui.end_row();

                ui.label("Median / day");
                ui.label(format_stat(metrics.median_daily));
                ui.end_row();

                ui.label("Std dev / day");
                ui.label(format_stat(metrics.std_daily));
                ui.end_row();

                if let Some((date, total)) = metrics.busiest_day {
                    ui.label("Busiest day");
                    ui.label(format!("{date} ({total})"));
                    ui.end_row();
                }
                if let Some((date, total)) = metrics.quietest_day {
                    ui.label("Quietest day");
                    ui.label(format!("{date} ({total})"));
                    ui.end_row();
                }
            });
    }
}

fn format_stat(value: f64) -> String {
    if value.is_nan() {
        "-".to_string()
    } else {
        format!("{:.1}", value)
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    RangeChanged,
}
