//! Chart Viewer Widget
//! Paints the current chart surface with the egui painter and overlays the tooltip.

use crate::charts::{
    Axis, AxisOrientation, ChartSurface, Element, Point, ResponsiveChartRenderer, TextAnchor,
    TooltipView,
};
use egui::epaint::TextShape;
use egui::{Align2, Color32, FontId, Painter, Pos2, RichText, Sense, Stroke};

// Colors
const BACKGROUND: Color32 = Color32::WHITE;
const MARKER_FILL: Color32 = Color32::from_rgb(137, 189, 211);
const MARKER_STROKE: Color32 = Color32::from_rgb(227, 227, 227);
const AXIS_COLOR: Color32 = Color32::BLACK;
const TITLE_COLOR: Color32 = Color32::from_rgb(0, 0, 0);
const TOOLTIP_FILL: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 204);

const TICK_FONT_SIZE: f32 = 10.0;
const TITLE_FONT_SIZE: f32 = 16.0;

/// Full-window chart area.
pub struct ChartViewer;

impl ChartViewer {
    /// Draw the chart and route pointer movement into its hover handling.
    pub fn show(ui: &mut egui::Ui, renderer: &mut ResponsiveChartRenderer) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
        painter.rect_filled(response.rect, 0.0, BACKGROUND);
        let origin = response.rect.min;
        let loading = renderer.is_loading();

        let Some(surface) = renderer.surface_mut() else {
            return;
        };

        let pointer = response
            .hover_pos()
            .map(|p| Point::new((p.x - origin.x) as f64, (p.y - origin.y) as f64));
        surface.pointer_moved(pointer);

        if surface.is_empty() {
            if loading {
                painter.text(
                    response.rect.center(),
                    Align2::CENTER_CENTER,
                    "Loading…",
                    FontId::proportional(16.0),
                    Color32::GRAY,
                );
            }
            return;
        }

        Self::paint_surface(&painter, origin, surface);

        if let Some(view) = surface.tooltip_view() {
            let at = to_screen(origin, surface.group.translate + view.position);
            Self::show_tooltip(ui.ctx(), at, view);
        }
    }

    fn paint_surface(painter: &Painter, origin: Pos2, surface: &ChartSurface) {
        let group = surface.group.translate;

        for element in &surface.group.elements {
            match element {
                Element::Axis(axis) => Self::paint_axis(painter, origin, group + axis.translate, axis),
                Element::Marker(marker) => {
                    let center = to_screen(origin, group + marker.center);
                    let radius = marker.radius as f32;
                    painter.circle_filled(center, radius, MARKER_FILL);
                    painter.circle_stroke(center, radius, Stroke::new(1.0, MARKER_STROKE));
                }
                Element::Label(label) => {
                    painter.text(
                        to_screen(origin, group + label.position),
                        align(label.anchor),
                        &label.text,
                        FontId::proportional(label.font_size as f32),
                        Color32::WHITE,
                    );
                }
                Element::Title(title) => {
                    let anchor = to_screen(origin, group + title.anchor());
                    let galley = painter.layout_no_wrap(
                        title.text.clone(),
                        FontId::proportional(TITLE_FONT_SIZE),
                        TITLE_COLOR,
                    );
                    let size = galley.size();
                    let angle = (title.rotation as f32).to_radians();
                    // Rotate about the galley's top-left, so shift it to keep the text centered
                    let half = egui::vec2(size.x / 2.0, size.y / 2.0);
                    let (sin, cos) = angle.sin_cos();
                    let rotated_half = egui::vec2(half.x * cos - half.y * sin, half.x * sin + half.y * cos);
                    let pos = anchor - rotated_half;
                    painter.add(TextShape::new(pos, galley, TITLE_COLOR).with_angle(angle));
                }
            }
        }
    }

    fn paint_axis(painter: &Painter, origin: Pos2, at: Point, axis: &Axis) {
        let stroke = Stroke::new(1.0, AXIS_COLOR);
        let path: Vec<Pos2> = axis
            .domain_path()
            .iter()
            .map(|p| to_screen(origin, at + *p))
            .collect();
        painter.add(egui::Shape::line(path, stroke));

        let label_align = match axis.orientation {
            AxisOrientation::Bottom => Align2::CENTER_TOP,
            AxisOrientation::Left => Align2::RIGHT_CENTER,
        };
        for tick in &axis.ticks {
            let (from, to) = axis.tick_line(tick);
            painter.line_segment([to_screen(origin, at + from), to_screen(origin, at + to)], stroke);
            painter.text(
                to_screen(origin, at + axis.label_anchor(tick)),
                label_align,
                &tick.label,
                FontId::proportional(TICK_FONT_SIZE),
                AXIS_COLOR,
            );
        }
    }

    fn show_tooltip(ctx: &egui::Context, at: Pos2, view: &TooltipView) {
        egui::Area::new(egui::Id::new("chart_tooltip"))
            .fixed_pos(at)
            .order(egui::Order::Tooltip)
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::none()
                    .fill(TOOLTIP_FILL)
                    .rounding(2.0)
                    .inner_margin(8.0)
                    .show(ui, |ui| {
                        for line in view.lines() {
                            ui.label(RichText::new(line).size(12.0).color(Color32::WHITE));
                        }
                    });
            });
    }
}

fn to_screen(origin: Pos2, p: Point) -> Pos2 {
    Pos2::new(origin.x + p.x as f32, origin.y + p.y as f32)
}

fn align(anchor: TextAnchor) -> Align2 {
    match anchor {
        TextAnchor::Start => Align2::LEFT_CENTER,
        TextAnchor::Middle => Align2::CENTER_CENTER,
        TextAnchor::End => Align2::RIGHT_CENTER,
    }
}
