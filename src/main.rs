//! State Scatter - Responsive poverty vs. healthcare chart viewer
//!
//! Opens the chart in a native window, or renders it headlessly to SVG/PNG.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use eframe::egui;
use state_scatter::charts::{Page, ResponsiveChartRenderer, StaticChartRenderer, WindowSize};
use state_scatter::config::AppConfig;
use state_scatter::data::CsvDatasetSource;
use state_scatter::gui::ScatterApp;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "state-scatter")]
#[command(about = "Poverty vs. healthcare scatter chart for U.S. states", long_about = None)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// CSV dataset, overrides the configured path
    #[arg(short, long)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive chart window (default)
    View,
    /// Render the chart once and write it to an SVG or PNG file
    Export {
        /// Output file; the extension picks the format
        output: PathBuf,
        #[arg(long, default_value_t = 1000.0)]
        width: f64,
        #[arg(long, default_value_t = 800.0)]
        height: f64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::default(),
    };
    if let Some(data) = cli.data {
        config.data_path = data;
    }

    let page = Page::with_container(&config.container_id);
    let source = Arc::new(CsvDatasetSource::new(config.data_path.clone()));
    let renderer = ResponsiveChartRenderer::new(page, &config, source)?;

    match cli.command.unwrap_or(Commands::View) {
        Commands::View => run_viewer(renderer, &config),
        Commands::Export {
            output,
            width,
            height,
        } => export(renderer, WindowSize::new(width, height), output),
    }
}

fn export(mut renderer: ResponsiveChartRenderer, window: WindowSize, output: PathBuf) -> Result<()> {
    renderer.render(window);
    renderer.wait_idle();

    if let Some(message) = renderer.diagnostics().last() {
        return Err(anyhow!("{message}")).context("Failed to load dataset");
    }
    let surface = renderer
        .surface()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| anyhow!("No chart was drawn"))?;

    StaticChartRenderer::save(surface, &output)
        .with_context(|| format!("Failed to export chart to {:?}", output))?;
    println!("Chart written to {}", output.display());
    Ok(())
}

fn run_viewer(renderer: ResponsiveChartRenderer, config: &AppConfig) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width as f32, config.window.height as f32])
            .with_title("State Scatter"),
        ..Default::default()
    };

    eframe::run_native(
        "State Scatter",
        options,
        Box::new(|cc| Ok(Box::new(ScatterApp::new(cc, renderer)))),
    )
    .map_err(|e| anyhow!("Failed to start the chart window: {e}"))
}
