//! Chart scene graph.
//!
//! A [`ChartSurface`] is the root drawing surface. Everything is drawn inside a
//! single translated [`CoordinateGroup`] using plot-local coordinates; painters
//! (egui on screen, plotters for export) walk the elements in order.

use crate::charts::geometry::{Point, ViewportGeometry};
use crate::charts::tooltip::{Tooltip, TooltipView};
use crate::data::{DataPoint, Dataset};

/// Identifies the render cycle that created a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrientation {
    Bottom,
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub value: f64,
    /// Position along the axis in plot-local pixels.
    pub offset: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub orientation: AxisOrientation,
    pub translate: Point,
    pub range: [f64; 2],
    pub ticks: Vec<Tick>,
    pub tick_size_inner: f64,
    pub tick_size_outer: f64,
    pub tick_padding: f64,
}

impl Axis {
    /// Domain line with its outer ticks, in axis-local coordinates.
    pub fn domain_path(&self) -> [Point; 4] {
        let [r0, r1] = self.range;
        let outer = self.tick_size_outer;
        match self.orientation {
            AxisOrientation::Bottom => [
                Point::new(r0, outer),
                Point::new(r0, 0.0),
                Point::new(r1, 0.0),
                Point::new(r1, outer),
            ],
            AxisOrientation::Left => [
                Point::new(-outer, r0),
                Point::new(0.0, r0),
                Point::new(0.0, r1),
                Point::new(-outer, r1),
            ],
        }
    }

    pub fn tick_line(&self, tick: &Tick) -> (Point, Point) {
        let inner = self.tick_size_inner;
        match self.orientation {
            AxisOrientation::Bottom => (Point::new(tick.offset, 0.0), Point::new(tick.offset, inner)),
            AxisOrientation::Left => (Point::new(-inner, tick.offset), Point::new(0.0, tick.offset)),
        }
    }

    /// Where the tick label is anchored: top-center for bottom axes, right-middle for left axes.
    pub fn label_anchor(&self, tick: &Tick) -> Point {
        let gap = self.tick_size_inner.max(0.0) + self.tick_padding;
        match self.orientation {
            AxisOrientation::Bottom => Point::new(tick.offset, gap),
            AxisOrientation::Left => Point::new(-gap, tick.offset),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub datum: usize,
    pub center: Point,
    pub radius: f64,
    pub class: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointLabel {
    pub datum: usize,
    pub position: Point,
    pub text: String,
    pub font_size: f64,
    pub anchor: TextAnchor,
    pub fill: &'static str,
}

impl PointLabel {
    /// Approximate text box, centered on the label position.
    pub fn contains(&self, p: Point) -> bool {
        let half_w = self.text.chars().count() as f64 * self.font_size * 0.6 / 2.0;
        let half_h = self.font_size / 2.0;
        (p.x - self.position.x).abs() <= half_w && (p.y - self.position.y).abs() <= half_h
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisTitle {
    pub text: String,
    pub class: &'static str,
    pub value: &'static str,
    pub translate: Point,
    /// Rotation of the enclosing group, degrees, negative is counter-clockwise.
    pub rotation: f64,
    /// Text position inside the translated and rotated group.
    pub position: Point,
}

impl AxisTitle {
    /// Text position in plot-local coordinates.
    pub fn anchor(&self) -> Point {
        self.translate + self.position.rotated(self.rotation)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Axis(Axis),
    Marker(Marker),
    Label(PointLabel),
    Title(AxisTitle),
}

/// An element that reacts to the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverTarget {
    Marker(usize),
    Label(usize),
}

impl HoverTarget {
    pub fn datum(self) -> usize {
        match self {
            Self::Marker(datum) | Self::Label(datum) => datum,
        }
    }
}

/// Nested drawing context translated by the chart margins.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateGroup {
    pub translate: Point,
    pub elements: Vec<Element>,
    data: Vec<DataPoint>,
    tooltip: Option<Tooltip>,
    hovered: Option<HoverTarget>,
}

impl CoordinateGroup {
    pub fn new(translate: Point) -> Self {
        Self {
            translate,
            elements: Vec::new(),
            data: Vec::new(),
            tooltip: None,
            hovered: None,
        }
    }

    /// Bind the dataset the markers refer to, along with this cycle's tooltip.
    pub fn bind(&mut self, dataset: &Dataset, tooltip: Tooltip) {
        self.data = dataset.points().to_vec();
        self.tooltip = Some(tooltip);
    }

    pub fn data(&self) -> &[DataPoint] {
        &self.data
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    pub fn hovered(&self) -> Option<HoverTarget> {
        self.hovered
    }

    /// Topmost hoverable element under a plot-local point.
    pub fn hit_test(&self, p: Point) -> Option<HoverTarget> {
        self.elements.iter().rev().find_map(|element| match element {
            Element::Marker(m) if m.center.distance_sq(p) <= m.radius * m.radius => {
                Some(HoverTarget::Marker(m.datum))
            }
            Element::Label(l) if l.contains(p) => Some(HoverTarget::Label(l.datum)),
            _ => None,
        })
    }

    fn target_anchor(&self, target: HoverTarget) -> Option<Point> {
        self.elements.iter().find_map(|element| match (element, target) {
            (Element::Marker(m), HoverTarget::Marker(d)) if m.datum == d => Some(m.center),
            (Element::Label(l), HoverTarget::Label(d)) if l.datum == d => Some(l.position),
            _ => None,
        })
    }

    pub fn pointer_enter(&mut self, target: HoverTarget) {
        let Some(anchor) = self.target_anchor(target) else {
            return;
        };
        let datum = target.datum();
        if let (Some(tooltip), Some(point)) = (self.tooltip.as_mut(), self.data.get(datum)) {
            tooltip.show(datum, point, anchor);
        }
        self.hovered = Some(target);
    }

    pub fn pointer_leave(&mut self, target: HoverTarget) {
        if let Some(tooltip) = self.tooltip.as_mut() {
            tooltip.hide();
        }
        if self.hovered == Some(target) {
            self.hovered = None;
        }
    }

    /// Track the pointer, firing leave then enter when the element under it changes.
    pub fn pointer_moved(&mut self, p: Option<Point>) {
        let next = p.and_then(|p| self.hit_test(p));
        if next == self.hovered {
            return;
        }
        if let Some(previous) = self.hovered {
            self.pointer_leave(previous);
        }
        if let Some(target) = next {
            self.pointer_enter(target);
        }
    }
}

/// Root drawing surface, sized to the window.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSurface {
    pub id: SurfaceId,
    pub width: f64,
    pub height: f64,
    pub group: CoordinateGroup,
}

impl ChartSurface {
    pub fn new(id: SurfaceId, geometry: &ViewportGeometry) -> Self {
        Self {
            id,
            width: geometry.width,
            height: geometry.height,
            group: CoordinateGroup::new(geometry.origin()),
        }
    }

    /// True until a dataset has been drawn into the surface.
    pub fn is_empty(&self) -> bool {
        self.group.elements.is_empty()
    }

    pub fn axes(&self) -> impl Iterator<Item = &Axis> {
        self.group.elements.iter().filter_map(|e| match e {
            Element::Axis(a) => Some(a),
            _ => None,
        })
    }

    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.group.elements.iter().filter_map(|e| match e {
            Element::Marker(m) => Some(m),
            _ => None,
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = &PointLabel> {
        self.group.elements.iter().filter_map(|e| match e {
            Element::Label(l) => Some(l),
            _ => None,
        })
    }

    pub fn titles(&self) -> impl Iterator<Item = &AxisTitle> {
        self.group.elements.iter().filter_map(|e| match e {
            Element::Title(t) => Some(t),
            _ => None,
        })
    }

    /// Convert a surface position into the group's plot-local coordinates.
    pub fn to_plot(&self, p: Point) -> Point {
        Point::new(p.x - self.group.translate.x, p.y - self.group.translate.y)
    }

    /// Pointer position in surface coordinates, `None` once it leaves the surface.
    pub fn pointer_moved(&mut self, p: Option<Point>) {
        let local = p.map(|p| self.to_plot(p));
        self.group.pointer_moved(local);
    }

    pub fn tooltip_view(&self) -> Option<&TooltipView> {
        self.group.tooltip().and_then(Tooltip::view)
    }
}
