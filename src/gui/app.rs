//! State Scatter Main Application
//! Hosts the responsive chart in a native window.

use crate::charts::{ResponsiveChartRenderer, StaticChartRenderer, WindowSize};
use crate::gui::ChartViewer;
use egui::{CentralPanel, Key};

/// Turns viewport size observations into resize events.
///
/// The first observation always fires, standing in for the initial render at load.
/// Every later size change fires once; there is no debouncing.
#[derive(Debug, Default)]
pub struct ResizeWatcher {
    last: Option<WindowSize>,
}

impl ResizeWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, size: WindowSize) -> Option<WindowSize> {
        if self.last == Some(size) {
            return None;
        }
        self.last = Some(size);
        Some(size)
    }
}

/// Main application window.
pub struct ScatterApp {
    renderer: ResponsiveChartRenderer,
    resize: ResizeWatcher,
}

impl ScatterApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, renderer: ResponsiveChartRenderer) -> Self {
        Self {
            renderer,
            resize: ResizeWatcher::new(),
        }
    }

    /// Handle chart export - ask for a target and write SVG or PNG
    fn handle_export(&self) {
        let Some(surface) = self.renderer.surface() else {
            return;
        };
        if surface.is_empty() {
            tracing::warn!("nothing to export yet");
            return;
        }

        let output_path = match rfd::FileDialog::new()
            .add_filter("SVG", &["svg"])
            .add_filter("PNG", &["png"])
            .set_file_name("scatter.svg")
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        match StaticChartRenderer::save(surface, &output_path) {
            Ok(()) => {
                if let Err(e) = open::that(&output_path) {
                    tracing::warn!(error = %e, "could not open exported chart");
                }
            }
            Err(e) => tracing::error!(error = %e, "chart export failed"),
        }
    }
}

impl eframe::App for ScatterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Draw any dataset loads that finished since the last frame
        self.renderer.poll();

        let size = ctx.screen_rect().size();
        if let Some(window) = self.resize.observe(WindowSize::new(size.x as f64, size.y as f64)) {
            tracing::debug!(width = window.width, height = window.height, "window resized");
            self.renderer.render(window);
        }

        if self.renderer.is_loading() {
            ctx.request_repaint();
        }

        if ctx.input(|i| i.modifiers.command && i.key_pressed(Key::S)) {
            self.handle_export();
        }

        CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                ChartViewer::show(ui, &mut self.renderer);
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_observation_fires() {
        let mut watcher = ResizeWatcher::new();
        let size = WindowSize::new(1000.0, 800.0);
        assert_eq!(watcher.observe(size), Some(size));
    }

    #[test]
    fn unchanged_size_is_quiet() {
        let mut watcher = ResizeWatcher::new();
        watcher.observe(WindowSize::new(1000.0, 800.0));
        assert_eq!(watcher.observe(WindowSize::new(1000.0, 800.0)), None);
    }

    #[test]
    fn every_change_fires() {
        let mut watcher = ResizeWatcher::new();
        let sizes = [
            WindowSize::new(1000.0, 800.0),
            WindowSize::new(1001.0, 800.0),
            WindowSize::new(1002.0, 800.0),
            WindowSize::new(1002.0, 790.0),
        ];
        let fired = sizes.iter().filter(|s| watcher.observe(**s).is_some()).count();
        assert_eq!(fired, 4);
    }
}
