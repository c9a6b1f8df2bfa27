//! Data module - CSV loading, record model and date filtering

mod dataset;
mod loader;
pub mod model;

pub use dataset::{
    filter_by_date_range, frame_to_records, int32_values, int64_values,
    records_to_frame, string_values, Dataset,
};
pub use loader::{DataLoader, LoadReport, LoaderError};
pub use model::{DateRange, RentalRecord};
