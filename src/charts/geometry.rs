//! Viewport geometry shared by every render cycle.

use serde::{Deserialize, Serialize};
use std::ops::Add;

/// A position in surface or plot-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_sq(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Rotate around the origin, clockwise in screen space for positive degrees.
    pub fn rotated(self, degrees: f64) -> Point {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Point::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Inner size of the host window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSize {
    pub width: f64,
    pub height: f64,
}

impl WindowSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for WindowSize {
    fn default() -> Self {
        Self::new(1000.0, 800.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 50.0,
            bottom: 50.0,
            left: 50.0,
            right: 50.0,
        }
    }
}

/// Surface size and usable plot area for one render.
///
/// Windows smaller than twice the margin give a zero or negative plot area;
/// that is passed through unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportGeometry {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub plot_width: f64,
    pub plot_height: f64,
}

impl ViewportGeometry {
    pub fn new(window: WindowSize, margin: Margin) -> Self {
        Self {
            width: window.width,
            height: window.height,
            margin,
            plot_width: window.width - margin.left - margin.right,
            plot_height: window.height - margin.top - margin.bottom,
        }
    }

    /// Offset of the plot-local origin inside the surface.
    pub fn origin(&self) -> Point {
        Point::new(self.margin.left, self.margin.top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_area_subtracts_margins() {
        let geometry = ViewportGeometry::new(WindowSize::new(1000.0, 800.0), Margin::default());

        assert_eq!(geometry.width, 1000.0);
        assert_eq!(geometry.height, 800.0);
        assert_eq!(geometry.plot_width, 900.0);
        assert_eq!(geometry.plot_height, 700.0);
        assert_eq!(geometry.origin(), Point::new(50.0, 50.0));
    }

    #[test]
    fn tiny_window_goes_negative() {
        let geometry = ViewportGeometry::new(WindowSize::new(60.0, 100.0), Margin::default());

        assert_eq!(geometry.plot_width, -40.0);
        assert_eq!(geometry.plot_height, 0.0);
    }

    #[test]
    fn rotate_minus_ninety() {
        let p = Point::new(-350.0, -35.0).rotated(-90.0);
        assert!((p.x - -35.0).abs() < 1e-9);
        assert!((p.y - 350.0).abs() < 1e-9);
    }
}
