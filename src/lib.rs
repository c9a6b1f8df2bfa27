//! Bike Dashboard - interactive analytics for hourly bike-sharing rentals.
//!
//! Loads the rental CSV once with Polars, filters it by a date range and
//! derives the daily, seasonal, hourly, weekday and hour-by-weekday views
//! shown in the egui window or exported as PNG charts and JSON.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod report;
pub mod stats;
