//! Drawing primitives produced by a gesture.

use super::color::Color;
use super::pen::Pen;
use crate::chart::ChartRenderer;
use crate::util::{Point, Rect};

/// Radius of the dot tool, independent of pen width.
pub const DOT_RADIUS: f64 = 10.0;

/// Freehand path accumulated during a gesture.
///
/// Every extension is stored as a cubic segment whose control points all sit
/// on the new end point, so stroking the path reproduces exactly the shape
/// seen while drawing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StrokePath {
    start: Point,
    segments: Vec<Point>,
}

impl StrokePath {
    /// Starts a new path at `start`.
    pub fn begin(start: Point) -> Self {
        Self {
            start,
            segments: Vec::new(),
        }
    }

    /// Appends a cubic segment ending at `end`.
    pub fn curve_to(&mut self, end: Point) {
        self.segments.push(end);
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn segments(&self) -> &[Point] {
        &self.segments
    }

    /// Number of segments (the start point is not a segment).
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Traces the path into the cairo context's current path.
    pub fn trace(&self, ctx: &cairo::Context) {
        let (x, y) = self.start.as_f64();
        ctx.move_to(x, y);
        for point in &self.segments {
            let (x, y) = point.as_f64();
            ctx.curve_to(x, y, x, y, x, y);
        }
    }
}

/// One renderable primitive; gestures dispatch on this instead of on tool names.
pub enum Primitive<'a> {
    /// Unfilled axis-aligned rectangle.
    Rect { rect: Rect, pen: Pen },
    /// Filled circle of fixed radius, outlined with the pen.
    Dot {
        center: Point,
        radius: f64,
        pen: Pen,
        fill: Color,
    },
    /// Straight unfilled segment.
    Line { begin: Point, end: Point, pen: Pen },
    /// Whole accumulated freehand path.
    Path { path: &'a StrokePath, pen: Pen },
    /// Whole accumulated eraser path, painting transparency.
    EraserPath { path: &'a StrokePath, width: f64 },
    /// Chart delegated to an external renderer.
    Chart {
        anchor: Point,
        renderer: &'a mut dyn ChartRenderer,
    },
}

impl Primitive<'_> {
    /// Short label used in log output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Rect { .. } => "rect",
            Self::Dot { .. } => "dot",
            Self::Line { .. } => "line",
            Self::Path { .. } => "path",
            Self::EraserPath { .. } => "eraser",
            Self::Chart { .. } => "chart",
        }
    }
}
