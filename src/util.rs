//! Utility functions for colors and canvas geometry.
//!
//! This module provides:
//! - Name-to-color mapping for the config file and session scripts
//! - Integer canvas points and rectangle normalization
//! - Window-to-canvas coordinate scaling

use crate::draw::{Color, color::PALETTE};

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color name strings to Color values.
///
/// Accepts every palette name (case-insensitive) plus `transparent` and
/// `#rrggbb` hex notation.
pub fn name_to_color(name: &str) -> Option<Color> {
    let lowered = name.trim().to_lowercase();
    if lowered == "transparent" {
        return Some(crate::draw::color::TRANSPARENT);
    }
    if lowered.starts_with('#') {
        return Color::from_hex(&lowered);
    }
    PALETTE
        .iter()
        .find(|(palette_name, _)| *palette_name == lowered)
        .map(|(_, color)| *color)
}

/// Returns a human-readable name for a color, or "custom".
pub fn color_to_name(color: &Color) -> &'static str {
    PALETTE
        .iter()
        .find(|(_, candidate)| candidate.to_rgba8() == color.to_rgba8())
        .map(|(name, _)| *name)
        .unwrap_or("custom")
}

// ============================================================================
// Geometry Utilities
// ============================================================================

/// Integer point in canvas pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn as_f64(self) -> (f64, f64) {
        (self.x as f64, self.y as f64)
    }
}

/// Axis-aligned rectangle with non-negative extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Normalizes two corners, dragged in any direction, into a rectangle.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }
}

/// Fixed per-axis scale between window coordinates and canvas pixels.
///
/// The capture buffer and the window showing it may differ in resolution
/// (e.g. fractional output scaling), so pointer positions are scaled by
/// `canvas / window` on each axis and truncated to whole pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateScale {
    pub x: f64,
    pub y: f64,
}

impl CoordinateScale {
    pub fn new(canvas: (u32, u32), window: (u32, u32)) -> Self {
        let axis = |canvas: u32, window: u32| {
            if window == 0 {
                1.0
            } else {
                canvas as f64 / window as f64
            }
        };
        Self {
            x: axis(canvas.0, window.0),
            y: axis(canvas.1, window.1),
        }
    }

    pub fn to_canvas(&self, x: f64, y: f64) -> Point {
        Point::new((x * self.x) as i32, (y * self.y) as i32)
    }
}
