//! Bike Dashboard Main Application
//! Main window with the control panel and the tabbed chart viewer.

use crate::data::{Dataset, DateRange};
use crate::gui::control_panel::RangeSelection;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::stats::{AggregateError, DashboardViews};
use egui::SidePanel;
use std::time::Instant;
use tracing::{debug, error};

/// Main application window.
pub struct DashboardApp {
    dataset: Dataset,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    views: Option<DashboardViews>,
}

impl DashboardApp {
    /// Build the app and compute the views for `initial_range` (the whole
    /// dataset when `None`).
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        dataset: Dataset,
        initial_range: Option<DateRange>,
    ) -> Self {
        Self::with_dataset(dataset, initial_range)
    }

    fn with_dataset(dataset: Dataset, initial_range: Option<DateRange>) -> Self {
        let selection = dataset.date_bounds().map(|bounds| match initial_range {
            Some(range) => RangeSelection::new(bounds, range),
            None => RangeSelection::full(bounds),
        });
        let control_panel = ControlPanel::new(selection, dataset.len());

        let mut app = Self {
            dataset,
            control_panel,
            chart_viewer: ChartViewer::new(),
            views: None,
        };
        app.recompute();
        app
    }

    /// Filter by the selected range and rebuild every view. On failure the
    /// previous views stay on screen.
    fn recompute(&mut self) {
        let Some(range) = self.control_panel.selection.map(|s| s.range()) else {
            self.views = None;
            return;
        };

        let started = Instant::now();
        match self.compute_views(&range) {
            Ok((rows, views)) => {
                debug!(
                    start = %range.start,
                    end = %range.end,
                    rows,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "views recomputed"
                );
                self.control_panel.filtered_rows = rows;
                self.control_panel.status = format!("Showing {} to {}", range.start, range.end);
                self.views = Some(views);
            }
            Err(e) => {
                error!(error = %e, "failed to recompute views");
                self.control_panel.status = format!("Error: {}", e);
            }
        }
    }

    fn compute_views(&self, range: &DateRange) -> Result<(usize, DashboardViews), AggregateError> {
        let filtered = self.dataset.filter(range)?;
        let views = DashboardViews::compute(&filtered)?;
        Ok((filtered.height(), views))
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui, self.views.as_ref().map(|v| &v.metrics));

                    match action {
                        ControlPanelAction::RangeChanged => self.recompute(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui, self.views.as_ref());
        });
    }
}
