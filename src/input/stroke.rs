//! Per-gesture stroke state and the Idle/Active state machine.

use crate::chart::ChartRenderer;
use crate::draw::{Color, DOT_RADIUS, Pen, Primitive, StrokePath, pen::ERASER_WIDTH};
use crate::input::Tool;
use crate::util::{Point, Rect};

/// Gesture state machine.
///
/// A gesture runs from pointer-down to pointer-up; only one can be active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    /// Not drawing - waiting for a pointer press
    #[default]
    Idle,
    /// Pointer held down, a primitive is being previewed on the live layer
    Active,
}

/// Tool, pen and geometry of the current (or next) gesture.
#[derive(Debug, Clone)]
pub struct StrokeState {
    /// Active drawing tool
    pub tool: Tool,
    /// Stroke parameters for shapes and freehand paths
    pub pen: Pen,
    /// Fill color for the dot tool (follows the pen color)
    pub brush: Color,
    /// Diameter painted by the eraser
    pub eraser_width: f64,
    /// Radius of the dot tool
    pub dot_radius: f64,
    gesture: GestureState,
    begin: Point,
    end: Point,
    last_point: Point,
    path: Option<StrokePath>,
}

impl Default for StrokeState {
    fn default() -> Self {
        Self::new(Pen::default(), ERASER_WIDTH, DOT_RADIUS)
    }
}

impl StrokeState {
    pub fn new(pen: Pen, eraser_width: f64, dot_radius: f64) -> Self {
        Self {
            tool: Tool::Freehand,
            brush: pen.color,
            pen,
            eraser_width,
            dot_radius,
            gesture: GestureState::Idle,
            begin: Point::default(),
            end: Point::default(),
            last_point: Point::default(),
            path: None,
        }
    }

    pub fn gesture(&self) -> GestureState {
        self.gesture
    }

    pub fn is_active(&self) -> bool {
        self.gesture == GestureState::Active
    }

    pub fn begin(&self) -> Point {
        self.begin
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn last_point(&self) -> Point {
        self.last_point
    }

    pub fn path(&self) -> Option<&StrokePath> {
        self.path.as_ref()
    }

    /// Changes pen and brush color together.
    pub fn set_color(&mut self, color: Color) {
        self.pen.color = color;
        self.brush = color;
    }

    /// Seeds the gesture at the press point and enters `Active`.
    pub fn start(&mut self, at: Point) {
        self.begin = at;
        self.end = at;
        if self.tool.is_path_tool() {
            self.path = Some(StrokePath::begin(at));
            self.last_point = at;
        }
        self.gesture = GestureState::Active;
    }

    /// Records the latest pointer position.
    pub fn move_to(&mut self, at: Point) {
        self.end = at;
    }

    /// Extends the path to `end` unless the pointer has not moved since the
    /// last extension. Returns whether a segment was added.
    pub fn extend_path(&mut self) -> bool {
        if self.end == self.last_point {
            return false;
        }
        match self.path.as_mut() {
            Some(path) => {
                path.curve_to(self.end);
                self.last_point = self.end;
                true
            }
            None => false,
        }
    }

    /// Ends the gesture at the release point.
    pub fn finish(&mut self, at: Point) {
        self.path = None;
        self.begin = at;
        self.end = at;
        self.gesture = GestureState::Idle;
    }

    /// Abandons the gesture and falls back to freehand drawing.
    pub fn abort(&mut self) {
        self.path = None;
        self.gesture = GestureState::Idle;
        self.tool = Tool::Freehand;
    }

    /// Builds the primitive the current tool renders for this frame.
    ///
    /// Returns `None` for path tools without a path and for the chart tool
    /// when no renderer is available.
    pub fn primitive<'a>(
        &'a self,
        chart: Option<&'a mut dyn ChartRenderer>,
    ) -> Option<Primitive<'a>> {
        match self.tool {
            Tool::Rectangle => Some(Primitive::Rect {
                rect: Rect::from_corners(self.begin, self.end),
                pen: self.pen,
            }),
            Tool::Dot => Some(Primitive::Dot {
                center: self.end,
                radius: self.dot_radius,
                pen: self.pen,
                fill: self.brush,
            }),
            Tool::Line => Some(Primitive::Line {
                begin: self.begin,
                end: self.end,
                pen: self.pen,
            }),
            Tool::Chart => chart.map(|renderer| Primitive::Chart {
                anchor: self.end,
                renderer,
            }),
            Tool::Freehand => self.path.as_ref().map(|path| Primitive::Path {
                path,
                pen: self.pen,
            }),
            Tool::Eraser => self.path.as_ref().map(|path| Primitive::EraserPath {
                path,
                width: self.eraser_width,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::BLUE;

    #[test]
    fn starts_idle_with_freehand() {
        let state = StrokeState::default();
        assert_eq!(state.gesture(), GestureState::Idle);
        assert_eq!(state.tool, Tool::Freehand);
        assert!(state.path().is_none());
    }

    #[test]
    fn path_tool_start_seeds_path_and_last_point() {
        let mut state = StrokeState::default();
        state.start(Point::new(5, 6));
        assert!(state.is_active());
        assert_eq!(state.begin(), Point::new(5, 6));
        assert_eq!(state.end(), Point::new(5, 6));
        assert_eq!(state.last_point(), Point::new(5, 6));
        assert_eq!(state.path().unwrap().start(), Point::new(5, 6));
    }

    #[test]
    fn shape_tool_start_has_no_path() {
        let mut state = StrokeState::default();
        state.tool = Tool::Rectangle;
        state.start(Point::new(1, 1));
        assert!(state.path().is_none());
        assert!(matches!(state.primitive(None), Some(Primitive::Rect { .. })));
    }

    #[test]
    fn extend_path_dedupes_unchanged_points() {
        let mut state = StrokeState::default();
        state.start(Point::new(0, 0));
        assert!(!state.extend_path());

        state.move_to(Point::new(3, 4));
        assert!(state.extend_path());
        assert!(!state.extend_path());
        assert_eq!(state.path().unwrap().len(), 1);
        assert_eq!(state.last_point(), Point::new(3, 4));
    }

    #[test]
    fn finish_clears_path_and_returns_to_idle() {
        let mut state = StrokeState::default();
        state.start(Point::new(0, 0));
        state.move_to(Point::new(1, 1));
        state.extend_path();
        state.finish(Point::new(2, 2));
        assert_eq!(state.gesture(), GestureState::Idle);
        assert!(state.path().is_none());
        assert_eq!(state.end(), Point::new(2, 2));
    }

    #[test]
    fn abort_reverts_to_freehand() {
        let mut state = StrokeState::default();
        state.tool = Tool::Chart;
        state.start(Point::new(0, 0));
        state.abort();
        assert_eq!(state.tool, Tool::Freehand);
        assert!(!state.is_active());
    }

    #[test]
    fn chart_without_renderer_yields_nothing() {
        let mut state = StrokeState::default();
        state.tool = Tool::Chart;
        state.start(Point::new(0, 0));
        assert!(state.primitive(None).is_none());
    }

    #[test]
    fn set_color_updates_pen_and_brush() {
        let mut state = StrokeState::default();
        state.set_color(BLUE);
        assert_eq!(state.pen.color, BLUE);
        assert_eq!(state.brush, BLUE);
    }
}
