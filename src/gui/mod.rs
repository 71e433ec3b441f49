//! GUI module - Native window host for the chart

mod app;
mod chart_viewer;

pub use app::{ResizeWatcher, ScatterApp};
pub use chart_viewer::ChartViewer;
