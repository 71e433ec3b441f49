//! Static Chart Renderer
//! Exports a chart surface to SVG or PNG with plotters.
//!
//! The scene is walked in element order, exactly as the on-screen painter does:
//! axes, markers, point labels, then axis titles.

use crate::charts::geometry::Point;
use crate::charts::scene::{Axis, AxisOrientation, ChartSurface, Element, TextAnchor};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

// Colors
const MARKER_FILL: RGBColor = RGBColor(137, 189, 211);
const MARKER_STROKE: RGBColor = RGBColor(227, 227, 227);
const AXIS_COLOR: RGBColor = RGBColor(0, 0, 0);
const TITLE_COLOR: RGBColor = RGBColor(0, 0, 0);

const FONT: &str = "sans-serif";
const TICK_FONT_SIZE: f64 = 10.0;
const TITLE_FONT_SIZE: f64 = 16.0;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Chart surface has no area ({0}x{1})")]
    EmptySurface(f64, f64),
    #[error("Drawing failed: {0}")]
    Draw(String),
    #[error("PNG encoding failed: {0}")]
    Image(#[from] image::ImageError),
    #[error("Unsupported export format: {0:?}")]
    UnsupportedFormat(String),
    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render the surface as an SVG document.
    pub fn render_svg(surface: &ChartSurface) -> Result<String, ExportError> {
        let size = Self::pixel_size(surface)?;
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
            Self::draw_surface(&root, surface).map_err(|e| ExportError::Draw(e.to_string()))?;
            root.present().map_err(|e| ExportError::Draw(e.to_string()))?;
        }
        Ok(svg)
    }

    /// Render the surface into in-memory PNG bytes.
    pub fn render_png_bytes(surface: &ChartSurface) -> Result<Vec<u8>, ExportError> {
        let (width, height) = Self::pixel_size(surface)?;
        let mut buffer = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            Self::draw_surface(&root, surface).map_err(|e| ExportError::Draw(e.to_string()))?;
            root.present().map_err(|e| ExportError::Draw(e.to_string()))?;
        }

        let img = image::RgbImage::from_raw(width, height, buffer)
            .ok_or_else(|| ExportError::Draw("pixel buffer size mismatch".to_string()))?;
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
        Ok(bytes)
    }

    /// Write the surface to `path`, choosing SVG or PNG from the extension.
    pub fn save(surface: &ChartSurface, path: &Path) -> Result<(), ExportError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "svg" => std::fs::write(path, Self::render_svg(surface)?)?,
            "png" => std::fs::write(path, Self::render_png_bytes(surface)?)?,
            _ => return Err(ExportError::UnsupportedFormat(extension)),
        }
        tracing::info!(path = %path.display(), "chart exported");
        Ok(())
    }

    fn pixel_size(surface: &ChartSurface) -> Result<(u32, u32), ExportError> {
        let (w, h) = (surface.width.round(), surface.height.round());
        if !(w >= 1.0 && h >= 1.0) {
            return Err(ExportError::EmptySurface(surface.width, surface.height));
        }
        Ok((w as u32, h as u32))
    }

    fn draw_surface<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        surface: &ChartSurface,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        root.fill(&WHITE)?;
        let origin = surface.group.translate;

        for element in &surface.group.elements {
            match element {
                Element::Axis(axis) => Self::draw_axis(root, origin + axis.translate, axis)?,
                Element::Marker(marker) => {
                    let center = px(origin + marker.center);
                    let radius = marker.radius.round() as i32;
                    root.draw(&Circle::new(center, radius, MARKER_FILL.filled()))?;
                    root.draw(&Circle::new(center, radius, MARKER_STROKE.stroke_width(1)))?;
                }
                Element::Label(label) => {
                    let style = (FONT, label.font_size)
                        .into_font()
                        .color(&WHITE)
                        .pos(Pos::new(hpos(label.anchor), VPos::Center));
                    root.draw(&Text::new(label.text.clone(), px(origin + label.position), style))?;
                }
                Element::Title(title) => {
                    let font = (FONT, TITLE_FONT_SIZE).into_font();
                    let font = if title.rotation == 0.0 {
                        font
                    } else {
                        font.transform(FontTransform::Rotate270)
                    };
                    let style = font
                        .color(&TITLE_COLOR)
                        .pos(Pos::new(HPos::Center, VPos::Center));
                    root.draw(&Text::new(title.text.clone(), px(origin + title.anchor()), style))?;
                }
            }
        }
        Ok(())
    }

    fn draw_axis<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        at: Point,
        axis: &Axis,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        let path: Vec<_> = axis.domain_path().iter().map(|p| px(at + *p)).collect();
        root.draw(&PathElement::new(path, AXIS_COLOR.stroke_width(1)))?;

        let pos = match axis.orientation {
            AxisOrientation::Bottom => Pos::new(HPos::Center, VPos::Top),
            AxisOrientation::Left => Pos::new(HPos::Right, VPos::Center),
        };
        for tick in &axis.ticks {
            let (from, to) = axis.tick_line(tick);
            root.draw(&PathElement::new(
                vec![px(at + from), px(at + to)],
                AXIS_COLOR.stroke_width(1),
            ))?;
            let style = (FONT, TICK_FONT_SIZE).into_font().color(&AXIS_COLOR).pos(pos);
            root.draw(&Text::new(tick.label.clone(), px(at + axis.label_anchor(tick)), style))?;
        }
        Ok(())
    }
}

fn px(p: Point) -> (i32, i32) {
    (p.x.round() as i32, p.y.round() as i32)
}

fn hpos(anchor: TextAnchor) -> HPos {
    match anchor {
        TextAnchor::Start => HPos::Left,
        TextAnchor::Middle => HPos::Center,
        TextAnchor::End => HPos::Right,
    }
}
