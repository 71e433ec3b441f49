//! Charts module - Scene construction, responsive rendering and export

mod geometry;
mod page;
mod plotter;
mod renderer;
mod responsive;
mod scale;
mod scene;
mod tooltip;

pub use geometry::{Margin, Point, ViewportGeometry, WindowSize};
pub use page::{Container, Page};
pub use plotter::{ChartPlotter, MarkerStyle, Scales, X_TITLE, Y_TITLE};
pub use renderer::{ExportError, StaticChartRenderer};
pub use responsive::{ChartError, ResponsiveChartRenderer};
pub use scale::LinearScale;
pub use scene::{
    Axis, AxisOrientation, AxisTitle, ChartSurface, CoordinateGroup, Element, HoverTarget, Marker,
    PointLabel, SurfaceId, TextAnchor, Tick,
};
pub use tooltip::{Tooltip, TooltipView};
