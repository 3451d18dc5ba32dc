//! Chart rendering capability.
//!
//! Charts are drawn by a host-supplied [`ChartRenderer`] with structured
//! parameters. The engine only hands it a cairo context on the live layer and
//! the anchor point under the pointer; a failing renderer aborts the current
//! gesture without touching the committed drawing.

use crate::draw::{BLACK, BLUE, Color};
use crate::util::Point;
use thiserror::Error;

/// Errors a chart renderer may report.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("chart has no data points")]
    EmptySeries,

    #[error("chart value #{index} is not a finite number")]
    InvalidValue { index: usize },

    #[error("chart rendering failed: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("{0}")]
    Failed(String),
}

/// Something that can paint a chart anchored at a canvas point.
pub trait ChartRenderer {
    /// Renders into `ctx`; the chart's top-left corner is `anchor`.
    fn render(&mut self, ctx: &cairo::Context, anchor: Point) -> Result<(), ChartError>;
}

impl<F> ChartRenderer for F
where
    F: FnMut(&cairo::Context, Point) -> Result<(), ChartError>,
{
    fn render(&mut self, ctx: &cairo::Context, anchor: Point) -> Result<(), ChartError> {
        self(ctx, anchor)
    }
}

/// Simple vertical bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub values: Vec<f64>,
    /// Overall chart width in canvas pixels.
    pub width: f64,
    /// Overall chart height in canvas pixels.
    pub height: f64,
    pub bar_color: Color,
    pub axis_color: Color,
}

impl BarChart {
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            width: 320.0,
            height: 240.0,
            bar_color: BLUE,
            axis_color: BLACK,
        }
    }

    fn validate(&self) -> Result<f64, ChartError> {
        if self.values.is_empty() {
            return Err(ChartError::EmptySeries);
        }
        if let Some(index) = self.values.iter().position(|v| !v.is_finite()) {
            return Err(ChartError::InvalidValue { index });
        }
        Ok(self.values.iter().fold(0.0_f64, |max, v| max.max(*v)))
    }
}

impl ChartRenderer for BarChart {
    fn render(&mut self, ctx: &cairo::Context, anchor: Point) -> Result<(), ChartError> {
        let max = self.validate()?;
        let (x0, y0) = anchor.as_f64();
        let baseline = y0 + self.height;

        ctx.save()?;
        ctx.set_dash(&[], 0.0);

        let slot = self.width / self.values.len() as f64;
        let bar_width = slot * 0.7;
        self.bar_color.apply(ctx);
        for (i, value) in self.values.iter().enumerate() {
            if max <= 0.0 || *value <= 0.0 {
                continue;
            }
            let bar_height = value / max * self.height;
            let x = x0 + i as f64 * slot + (slot - bar_width) / 2.0;
            ctx.rectangle(x, baseline - bar_height, bar_width, bar_height);
        }
        ctx.fill()?;

        self.axis_color.apply(ctx);
        ctx.set_line_width(2.0);
        ctx.move_to(x0, y0);
        ctx.line_to(x0, baseline);
        ctx.line_to(x0 + self.width, baseline);
        ctx.stroke()?;

        ctx.restore()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::RasterSurface;

    #[test]
    fn empty_series_is_rejected() {
        let mut surface = RasterSurface::new(50, 50).unwrap();
        let ctx = surface.context().unwrap();
        let err = BarChart::new(vec![])
            .render(&ctx, Point::new(0, 0))
            .unwrap_err();
        assert!(matches!(err, ChartError::EmptySeries));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let mut surface = RasterSurface::new(50, 50).unwrap();
        let ctx = surface.context().unwrap();
        let err = BarChart::new(vec![1.0, f64::NAN])
            .render(&ctx, Point::new(0, 0))
            .unwrap_err();
        assert!(matches!(err, ChartError::InvalidValue { index: 1 }));
    }

    #[test]
    fn bars_are_drawn_below_anchor() {
        let mut surface = RasterSurface::new(200, 200).unwrap();
        let mut chart = BarChart {
            width: 100.0,
            height: 100.0,
            ..BarChart::new(vec![1.0, 2.0])
        };
        {
            let ctx = surface.context().unwrap();
            chart.render(&ctx, Point::new(50, 50)).unwrap();
        }
        // Second (tallest) bar spans the full height of its slot centre.
        assert_eq!(surface.pixel(125, 60).unwrap(), [0, 0, 255, 255]);
        // First bar only reaches half height.
        assert_eq!(surface.pixel(75, 60).unwrap()[3], 0);
        assert_eq!(surface.pixel(75, 120).unwrap(), [0, 0, 255, 255]);
        // Nothing above or left of the anchor.
        assert_eq!(surface.pixel(40, 40).unwrap()[3], 0);
    }

    #[test]
    fn closures_are_chart_renderers() {
        let mut calls = Vec::new();
        let mut renderer = |_: &cairo::Context, anchor: Point| {
            calls.push(anchor);
            Ok::<(), ChartError>(())
        };
        let mut surface = RasterSurface::new(4, 4).unwrap();
        let ctx = surface.context().unwrap();
        renderer.render(&ctx, Point::new(1, 2)).unwrap();
        drop(ctx);
        assert_eq!(calls, vec![Point::new(1, 2)]);
    }
}
