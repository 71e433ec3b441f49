//! Responsive chart renderer.
//!
//! Each call to [`ResponsiveChartRenderer::render`] tears down the previous chart,
//! appends a fresh surface sized to the window and loads the dataset on a worker
//! thread. The result comes back over a channel and is drawn by [`poll`] or
//! [`wait_idle`] on the owning thread.
//!
//! A load always draws into the surface its own cycle created. When a newer
//! render has already torn that surface down, the finished load is dropped.
//!
//! [`poll`]: ResponsiveChartRenderer::poll
//! [`wait_idle`]: ResponsiveChartRenderer::wait_idle

use crate::charts::geometry::{Margin, Point, ViewportGeometry, WindowSize};
use crate::charts::page::Page;
use crate::charts::plotter::{ChartPlotter, MarkerStyle};
use crate::charts::scene::{ChartSurface, SurfaceId};
use crate::config::AppConfig;
use crate::data::{DataLoadError, Dataset, DatasetSource};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use thiserror::Error;

/// Upper bound on how long [`ResponsiveChartRenderer::wait_idle`] waits for one load.
const FETCH_WAIT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Render target '#{0}' not found on the page")]
    ContainerNotFound(String),
}

/// Dataset load result from a worker thread
struct FetchResult {
    surface: SurfaceId,
    geometry: ViewportGeometry,
    result: Result<Dataset, DataLoadError>,
}

/// Owns the page and rebuilds the chart on every resize.
pub struct ResponsiveChartRenderer {
    page: Page,
    target: String,
    source: Arc<dyn DatasetSource>,
    margin: Margin,
    style: MarkerStyle,
    tooltip_offset: Point,

    cache_dataset: bool,
    cached: Option<Dataset>,

    next_surface: u64,
    fetch_tx: Sender<FetchResult>,
    fetch_rx: Receiver<FetchResult>,
    in_flight: usize,

    diagnostics: Vec<String>,
}

impl ResponsiveChartRenderer {
    /// Bind to the page. The target container must already exist.
    pub fn new(
        page: Page,
        config: &AppConfig,
        source: Arc<dyn DatasetSource>,
    ) -> Result<Self, ChartError> {
        if page.container(&config.container_id).is_none() {
            return Err(ChartError::ContainerNotFound(config.container_id.clone()));
        }

        let (fetch_tx, fetch_rx) = channel();
        Ok(Self {
            page,
            target: config.container_id.clone(),
            source,
            margin: config.margin,
            style: config.marker,
            tooltip_offset: config.tooltip_offset(),
            cache_dataset: config.cache_dataset,
            cached: None,
            next_surface: 0,
            fetch_tx,
            fetch_rx,
            in_flight: 0,
            diagnostics: Vec::new(),
        })
    }

    /// Rebuild the chart for the given window size.
    pub fn render(&mut self, window: WindowSize) {
        if let Some(previous) = self.page.remove_first_surface() {
            tracing::debug!(surface = previous.id.0, "removed previous chart");
        }

        let geometry = ViewportGeometry::new(window, self.margin);
        let id = SurfaceId(self.next_surface);
        self.next_surface += 1;

        let Some(container) = self.page.container_mut(&self.target) else {
            tracing::error!(target_id = %self.target, "render target disappeared from the page");
            return;
        };
        container.append(ChartSurface::new(id, &geometry));
        tracing::debug!(
            surface = id.0,
            width = geometry.width,
            height = geometry.height,
            "created chart surface"
        );

        if let Some(dataset) = self.cached.clone() {
            self.apply(FetchResult {
                surface: id,
                geometry,
                result: Ok(dataset),
            });
            return;
        }

        self.spawn_fetch(id, geometry);
    }

    fn spawn_fetch(&mut self, surface: SurfaceId, geometry: ViewportGeometry) {
        let source = Arc::clone(&self.source);
        let tx = self.fetch_tx.clone();
        self.in_flight += 1;

        thread::spawn(move || {
            let result = source.load();
            let _ = tx.send(FetchResult {
                surface,
                geometry,
                result,
            });
        });
    }

    /// Draw every load that has finished, without blocking. Returns how many were handled.
    pub fn poll(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(fetch) = self.fetch_rx.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            self.apply(fetch);
            handled += 1;
        }
        handled
    }

    /// Block until no load is in flight.
    pub fn wait_idle(&mut self) {
        while self.in_flight > 0 {
            match self.fetch_rx.recv_timeout(FETCH_WAIT) {
                Ok(fetch) => {
                    self.in_flight -= 1;
                    self.apply(fetch);
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    tracing::warn!(in_flight = self.in_flight, "gave up waiting for dataset loads");
                    self.in_flight = 0;
                }
            }
        }
    }

    fn apply(&mut self, fetch: FetchResult) {
        let dataset = match fetch.result {
            Ok(dataset) => dataset,
            Err(err) => {
                tracing::error!(surface = fetch.surface.0, error = %err, "failed to load dataset");
                self.diagnostics.push(err.to_string());
                return;
            }
        };

        if self.cache_dataset && self.cached.is_none() {
            self.cached = Some(dataset.clone());
        }

        let Some(surface) = self.page.surface_mut(fetch.surface) else {
            tracing::debug!(surface = fetch.surface.0, "chart was replaced before its data arrived");
            return;
        };
        ChartPlotter::draw(
            &mut surface.group,
            &fetch.geometry,
            &dataset,
            &self.style,
            self.tooltip_offset,
        );
        tracing::info!(surface = fetch.surface.0, points = dataset.len(), "chart rendered");
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// The chart currently attached to the page.
    pub fn surface(&self) -> Option<&ChartSurface> {
        self.page.first_surface()
    }

    pub fn surface_mut(&mut self) -> Option<&mut ChartSurface> {
        self.page.first_surface_mut()
    }

    /// Messages for every failed load so far.
    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataPoint;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Condvar, Mutex};

    fn dataset() -> Dataset {
        let rows = [
            ("Alabama", "AL", 19.3, 13.9),
            ("Ohio", "OH", 14.2, 11.5),
            ("Texas", "TX", 17.0, 24.9),
            ("Vermont", "VT", 11.3, 4.6),
        ];
        Dataset::new(
            rows.iter()
                .map(|&(state, abbr, poverty, healthcare)| DataPoint {
                    state: state.into(),
                    abbreviation: abbr.into(),
                    poverty_rate: poverty,
                    healthcare_lack_rate: healthcare,
                })
                .collect(),
        )
    }

    struct StaticSource {
        dataset: Dataset,
        loads: AtomicUsize,
    }

    impl StaticSource {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                dataset: dataset(),
                loads: AtomicUsize::new(0),
            })
        }
    }

    impl DatasetSource for StaticSource {
        fn load(&self) -> Result<Dataset, DataLoadError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            Ok(self.dataset.clone())
        }
    }

    struct MissingSource;

    impl DatasetSource for MissingSource {
        fn load(&self) -> Result<Dataset, DataLoadError> {
            Err(DataLoadError::NotFound(PathBuf::from("assets/data/data.csv")))
        }
    }

    /// Blocks every load until `open` is called.
    struct GatedSource {
        open: Mutex<bool>,
        cond: Condvar,
    }

    impl GatedSource {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                open: Mutex::new(false),
                cond: Condvar::new(),
            })
        }

        fn open(&self) {
            *self.open.lock().unwrap() = true;
            self.cond.notify_all();
        }
    }

    impl DatasetSource for GatedSource {
        fn load(&self) -> Result<Dataset, DataLoadError> {
            let mut open = self.open.lock().unwrap();
            while !*open {
                open = self.cond.wait(open).unwrap();
            }
            Ok(dataset())
        }
    }

    fn renderer(source: Arc<dyn DatasetSource>, config: &AppConfig) -> ResponsiveChartRenderer {
        ResponsiveChartRenderer::new(Page::with_container("scatter"), config, source).unwrap()
    }

    #[test]
    fn repeated_renders_leave_one_chart() {
        let mut renderer = renderer(StaticSource::new(), &AppConfig::default());

        for width in [800.0, 900.0, 1000.0, 1100.0, 1200.0] {
            renderer.render(WindowSize::new(width, 800.0));
        }
        renderer.wait_idle();

        assert_eq!(renderer.page().surface_count(), 1);
        let surface = renderer.surface().unwrap();
        assert_eq!(surface.width, 1200.0);
        assert_eq!(surface.markers().count(), 4);
        assert!(!renderer.is_loading());
    }

    #[test]
    fn render_then_wait_each_time() {
        let mut renderer = renderer(StaticSource::new(), &AppConfig::default());

        for _ in 0..3 {
            renderer.render(WindowSize::new(1000.0, 800.0));
            renderer.wait_idle();
            assert_eq!(renderer.page().surface_count(), 1);
        }
    }

    #[test]
    fn surface_matches_window() {
        let mut renderer = renderer(StaticSource::new(), &AppConfig::default());
        renderer.render(WindowSize::new(1000.0, 800.0));
        renderer.wait_idle();

        let surface = renderer.surface().unwrap();
        assert_eq!((surface.width, surface.height), (1000.0, 800.0));
        let x_axis = surface.axes().next().unwrap();
        assert_eq!(x_axis.range, [0.0, 900.0]);
        assert_eq!(x_axis.translate, Point::new(0.0, 700.0));
    }

    #[test]
    fn failed_load_leaves_empty_surface() {
        let mut renderer = renderer(Arc::new(MissingSource), &AppConfig::default());
        renderer.render(WindowSize::new(1000.0, 800.0));
        renderer.wait_idle();

        assert_eq!(renderer.page().surface_count(), 1);
        assert!(renderer.surface().unwrap().is_empty());
        assert_eq!(renderer.diagnostics().len(), 1);
        assert!(renderer.diagnostics()[0].contains("not found"));
    }

    #[test]
    fn stale_load_is_dropped() {
        let source = GatedSource::new();
        let mut renderer = renderer(source.clone(), &AppConfig::default());

        renderer.render(WindowSize::new(600.0, 400.0));
        renderer.render(WindowSize::new(1000.0, 800.0));
        assert!(renderer.is_loading());
        assert!(renderer.surface().unwrap().is_empty());

        source.open();
        renderer.wait_idle();

        assert_eq!(renderer.page().surface_count(), 1);
        let surface = renderer.surface().unwrap();
        assert_eq!(surface.id, SurfaceId(1));
        assert_eq!(surface.width, 1000.0);
        assert_eq!(surface.markers().count(), 4);
    }

    #[test]
    fn reloads_on_every_render_by_default() {
        let source = StaticSource::new();
        let mut renderer = renderer(source.clone(), &AppConfig::default());

        for _ in 0..3 {
            renderer.render(WindowSize::new(1000.0, 800.0));
            renderer.wait_idle();
        }
        assert_eq!(source.loads.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn cached_dataset_skips_reload() {
        let source = StaticSource::new();
        let config = AppConfig {
            cache_dataset: true,
            ..AppConfig::default()
        };
        let mut renderer = renderer(source.clone(), &config);

        renderer.render(WindowSize::new(1000.0, 800.0));
        renderer.wait_idle();
        renderer.render(WindowSize::new(700.0, 500.0));

        assert!(!renderer.is_loading());
        assert_eq!(renderer.surface().unwrap().markers().count(), 4);
        assert_eq!(source.loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn hover_after_render_shows_tooltip() {
        let mut renderer = renderer(StaticSource::new(), &AppConfig::default());
        renderer.render(WindowSize::new(1000.0, 800.0));
        renderer.wait_idle();

        let surface = renderer.surface_mut().unwrap();
        let ohio = surface.markers().find(|m| m.datum == 1).unwrap().center;
        let translate = surface.group.translate;
        surface.pointer_moved(Some(ohio + translate + Point::new(0.0, -8.0)));

        assert_eq!(
            surface.tooltip_view().map(|v| v.html.as_str()),
            Some("State: Ohio<br>Poverty Rate: 14.2%<br>Lacks Healthcare Rate 11.5%")
        );

        surface.pointer_moved(None);
        assert!(surface.tooltip_view().is_none());
    }

    #[test]
    fn missing_container_is_fatal() {
        let result = ResponsiveChartRenderer::new(
            Page::with_container("chart"),
            &AppConfig::default(),
            StaticSource::new(),
        );

        assert!(matches!(result, Err(ChartError::ContainerNotFound(id)) if id == "scatter"));
    }
}
