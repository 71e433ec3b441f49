//! Chart Plotter Module
//! Turns a dataset into scene elements: axes, markers, labels and axis titles.

use crate::charts::geometry::{Point, ViewportGeometry};
use crate::charts::scale::LinearScale;
use crate::charts::scene::{
    Axis, AxisOrientation, AxisTitle, CoordinateGroup, Element, Marker, PointLabel, TextAnchor, Tick,
};
use crate::charts::tooltip::Tooltip;
use crate::data::Dataset;
use serde::{Deserialize, Serialize};

pub const X_TITLE: &str = "In Poverty (%)";
pub const Y_TITLE: &str = "Lacks Healthcare (%)";
pub const MARKER_CLASS: &str = "stateCircle";
pub const TITLE_CLASS: &str = "active";

const AXIS_TICKS: usize = 10;
const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;

/// Marker and point-label styling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerStyle {
    pub radius: f64,
    pub label_font_size: f64,
    /// Vertical nudge of the abbreviation relative to the marker center.
    pub label_dy: f64,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            radius: 10.0,
            label_font_size: 10.0,
            label_dy: 1.0,
        }
    }
}

/// The pair of scales for one render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scales {
    pub x: LinearScale,
    pub y: LinearScale,
}

impl Scales {
    /// Domains come from the full dataset; y is inverted so larger values plot higher.
    pub fn from_dataset(dataset: &Dataset, geometry: &ViewportGeometry) -> Self {
        Self {
            x: LinearScale::from_extent(dataset.poverty_extent(), [0.0, geometry.plot_width]),
            y: LinearScale::from_extent(dataset.healthcare_extent(), [geometry.plot_height, 0.0]),
        }
    }
}

/// Builds the chart inside a coordinate group.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Draw the whole chart for `dataset` and install the cycle's tooltip.
    pub fn draw(
        group: &mut CoordinateGroup,
        geometry: &ViewportGeometry,
        dataset: &Dataset,
        style: &MarkerStyle,
        tooltip_offset: Point,
    ) -> Scales {
        let scales = Scales::from_dataset(dataset, geometry);
        let [x_min, _] = scales.x.domain();
        let [_, y_max] = scales.y.domain();
        tracing::debug!(x_min, y_max, "computed scale domains");

        group.elements.push(Element::Axis(Self::axis(
            &scales.x,
            AxisOrientation::Bottom,
            Point::new(0.0, geometry.plot_height),
        )));
        group
            .elements
            .push(Element::Axis(Self::axis(&scales.y, AxisOrientation::Left, Point::default())));

        group.bind(dataset, Tooltip::new(tooltip_offset));

        group.elements.extend(Self::markers(dataset, &scales, style));
        group.elements.extend(Self::labels(dataset, &scales, style));
        group.elements.extend(Self::titles(geometry).map(Element::Title));

        scales
    }

    pub fn axis(scale: &LinearScale, orientation: AxisOrientation, translate: Point) -> Axis {
        let format = scale.tick_format(AXIS_TICKS);
        let ticks = scale
            .ticks(AXIS_TICKS)
            .into_iter()
            .map(|value| Tick {
                value,
                offset: scale.map(value),
                label: format(value),
            })
            .collect();

        Axis {
            orientation,
            translate,
            range: scale.range(),
            ticks,
            tick_size_inner: TICK_SIZE,
            tick_size_outer: TICK_SIZE,
            tick_padding: TICK_PADDING,
        }
    }

    fn markers<'a>(
        dataset: &'a Dataset,
        scales: &'a Scales,
        style: &'a MarkerStyle,
    ) -> impl Iterator<Item = Element> + 'a {
        dataset.points().iter().enumerate().map(move |(datum, p)| {
            Element::Marker(Marker {
                datum,
                center: Point::new(scales.x.map(p.poverty_rate), scales.y.map(p.healthcare_lack_rate)),
                radius: style.radius,
                class: MARKER_CLASS,
            })
        })
    }

    fn labels<'a>(
        dataset: &'a Dataset,
        scales: &'a Scales,
        style: &'a MarkerStyle,
    ) -> impl Iterator<Item = Element> + 'a {
        dataset.points().iter().enumerate().map(move |(datum, p)| {
            Element::Label(PointLabel {
                datum,
                position: Point::new(
                    scales.x.map(p.poverty_rate),
                    scales.y.map(p.healthcare_lack_rate) + style.label_dy,
                ),
                text: p.abbreviation.clone(),
                font_size: style.label_font_size,
                anchor: TextAnchor::Middle,
                fill: "white",
            })
        })
    }

    fn titles(geometry: &ViewportGeometry) -> [AxisTitle; 2] {
        let (w, h) = (geometry.plot_width, geometry.plot_height);
        [
            AxisTitle {
                text: X_TITLE.to_string(),
                class: TITLE_CLASS,
                value: "poverty",
                translate: Point::new(w / 2.0, h + geometry.margin.top - 20.0),
                rotation: 0.0,
                position: Point::new(0.0, 10.0),
            },
            AxisTitle {
                text: Y_TITLE.to_string(),
                class: TITLE_CLASS,
                value: "healthcare",
                translate: Point::default(),
                rotation: -90.0,
                position: Point::new(-(h / 2.0), 15.0 - geometry.margin.left),
            },
        ]
    }
}
