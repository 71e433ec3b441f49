//! Data module - CSV loading and coercion

mod loader;
mod processor;
mod record;

pub use loader::{CsvDatasetSource, DataLoadError, DataLoader, DatasetSource};
pub use processor::DataProcessor;
pub use record::{DataPoint, Dataset};
