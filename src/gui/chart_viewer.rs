//! Chart Viewer Widget
//! Central scrollable area with the Daily / Weekly / Seasonal analysis tabs.

use crate::charts::{hourly_bars, seasonal_bars, weekday_bars, ChartPlotter};
use crate::stats::DashboardViews;
use egui::{RichText, ScrollArea};

const SECTION_SPACING: f32 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardTab {
    #[default]
    Daily,
    Weekly,
    Seasonal,
}

impl DashboardTab {
    pub const ALL: [DashboardTab; 3] = [
        DashboardTab::Daily,
        DashboardTab::Weekly,
        DashboardTab::Seasonal,
    ];

    pub fn title(self) -> &'static str {
        match self {
            DashboardTab::Daily => "Daily Analysis",
            DashboardTab::Weekly => "Weekly Analysis",
            DashboardTab::Seasonal => "Seasonal Analysis",
        }
    }
}

/// Tabbed chart display for the current views.
#[derive(Default)]
pub struct ChartViewer {
    pub active_tab: DashboardTab,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, ui: &mut egui::Ui, views: Option<&DashboardViews>) {
        ui.heading("🚴 Bike Sharing Dashboard 🚴");
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            for tab in DashboardTab::ALL {
                ui.selectable_value(&mut self.active_tab, tab, tab.title());
            }
        });
        ui.separator();

        let Some(views) = views.filter(|v| !v.is_empty()) else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| match self.active_tab {
                DashboardTab::Daily => Self::show_daily(ui, views),
                DashboardTab::Weekly => Self::show_weekly(ui, views),
                DashboardTab::Seasonal => Self::show_seasonal(ui, views),
            });
    }

    fn section(ui: &mut egui::Ui, title: &str) {
        ui.add_space(SECTION_SPACING);
        ui.label(RichText::new(title).size(16.0).strong());
        ui.add_space(5.0);
    }

    fn show_daily(ui: &mut egui::Ui, views: &DashboardViews) {
        Self::section(ui, "Daily Rentals");
        ChartPlotter::draw_daily_chart(ui, &views.daily);

        Self::section(ui, "Rentals by Hour of the Day");
        ChartPlotter::draw_highlighted_bars(
            ui,
            "hourly_rentals",
            &hourly_bars(&views.hourly),
            "Hour",
            "Total Rentals",
        );

        Self::section(ui, "Casual and Registered Rentals by Day");
        ChartPlotter::draw_stacked_weekday(ui, &views.weekday_split);
    }

    fn show_weekly(ui: &mut egui::Ui, views: &DashboardViews) {
        Self::section(ui, "Rentals by Day of the Week");
        ChartPlotter::draw_highlighted_bars(
            ui,
            "weekday_rentals",
            &weekday_bars(&views.weekday),
            "Weekday",
            "Total Rentals",
        );
    }

    fn show_seasonal(ui: &mut egui::Ui, views: &DashboardViews) {
        Self::section(ui, "Rentals by Season");
        ChartPlotter::draw_highlighted_bars(
            ui,
            "seasonal_rentals",
            &seasonal_bars(&views.seasonal),
            "Season",
            "Total Rentals",
        );

        Self::section(ui, "Rentals by Hour and Day");
        ChartPlotter::draw_heatmap(ui, &views.heatmap);
    }
}
