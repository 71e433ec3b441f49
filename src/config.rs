//! Application configuration, loaded from an optional JSON file.

use crate::charts::{Margin, MarkerStyle, Point, WindowSize};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// CSV with `state`, `abbr`, `poverty` and `healthcare` columns.
    pub data_path: PathBuf,
    /// Id of the page container the chart is appended to.
    pub container_id: String,
    pub margin: Margin,
    pub marker: MarkerStyle,
    /// Tooltip offset from its anchor as `[dx, dy]`.
    pub tooltip_offset: [f64; 2],
    /// Keep the parsed dataset after the first load instead of re-reading it on every resize.
    pub cache_dataset: bool,
    /// Initial native window size.
    pub window: WindowSize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("assets/data/data.csv"),
            container_id: "scatter".to_string(),
            margin: Margin::default(),
            marker: MarkerStyle::default(),
            tooltip_offset: [0.0, 10.0],
            cache_dataset: false,
            window: WindowSize::default(),
        }
    }
}

impl AppConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON configuration: {:?}", path))?;
        Ok(config)
    }

    pub fn tooltip_offset(&self) -> Point {
        Point::new(self.tooltip_offset[0], self.tooltip_offset[1])
    }
}
