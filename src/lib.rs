//! State Scatter - Responsive poverty vs. healthcare chart for U.S. states
//!
//! Loads a per-state CSV, builds a scatter chart scene sized to the window and
//! rebuilds it on every resize. The scene is painted natively with egui and can be
//! exported to SVG or PNG.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
