//! Stats module - rental aggregations and summary metrics

mod aggregator;
mod calculator;

pub use aggregator::{
    AggregateError, Aggregator, DailyTotal, DashboardViews, HourTotal, HourWeekdayMatrix,
    SeasonTotal, WeekdaySplit, WeekdayTotal,
};
pub use calculator::{bar_roles, BarRole, Extremes, SummaryMetrics};
