//! Hover tooltip shared by every marker and label of a chart.

use crate::charts::geometry::Point;
use crate::data::DataPoint;

/// Line separator inside tooltip content.
pub const LINE_BREAK: &str = "<br>";

/// What the tooltip currently shows.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipView {
    /// Index of the data point in the chart's dataset.
    pub datum: usize,
    /// Element position the tooltip is attached to, in plot-local pixels.
    pub anchor: Point,
    /// Top-left of the overlay, anchor plus offset.
    pub position: Point,
    pub html: String,
}

impl TooltipView {
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.html.split(LINE_BREAK)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    offset: Point,
    visible: Option<TooltipView>,
}

impl Tooltip {
    pub fn new(offset: Point) -> Self {
        Self {
            offset,
            visible: None,
        }
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Tooltip markup for one data point.
    pub fn content(point: &DataPoint) -> String {
        format!(
            "State: {}{br}Poverty Rate: {}%{br}Lacks Healthcare Rate {}%",
            point.state,
            point.poverty_rate,
            point.healthcare_lack_rate,
            br = LINE_BREAK,
        )
    }

    pub fn show(&mut self, datum: usize, point: &DataPoint, anchor: Point) {
        self.visible = Some(TooltipView {
            datum,
            anchor,
            position: anchor + self.offset,
            html: Self::content(point),
        });
    }

    pub fn hide(&mut self) {
        self.visible = None;
    }

    pub fn view(&self) -> Option<&TooltipView> {
        self.visible.as_ref()
    }
}
