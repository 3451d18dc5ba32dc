//! Cairo-based rendering of drawing primitives.

use super::color::Color;
use super::pen::{ERASER_WIDTH, Pen};
use super::primitive::{Primitive, StrokePath};
use super::surface::{RasterSurface, SurfaceError};
use crate::chart::ChartError;
use crate::util::{Point, Rect};
use thiserror::Error;

/// Side length of the eraser cursor image.
pub const ERASER_CURSOR_SIZE: u32 = 32;

/// Failure while painting a primitive.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error(transparent)]
    Chart(#[from] ChartError),
}

/// Renders a single primitive to a Cairo context.
///
/// Shapes are painted with the `Over` operator. The eraser uses `Source` so
/// that its transparent pen replaces color and alpha along the stroke.
pub fn render_primitive(ctx: &cairo::Context, primitive: Primitive<'_>) -> Result<(), RenderError> {
    ctx.save()?;
    let result = match primitive {
        Primitive::Rect { rect, pen } => render_rect(ctx, rect, &pen),
        Primitive::Dot {
            center,
            radius,
            pen,
            fill,
        } => render_dot(ctx, center, radius, &pen, fill),
        Primitive::Line { begin, end, pen } => render_line(ctx, begin, end, &pen),
        Primitive::Path { path, pen } => render_path(ctx, path, &pen, cairo::Operator::Over),
        Primitive::EraserPath { path, width } => render_path(
            ctx,
            path,
            &Pen::transparent_eraser(width),
            cairo::Operator::Source,
        ),
        Primitive::Chart { anchor, renderer } => {
            renderer.render(ctx, anchor).map_err(RenderError::from)
        }
    };
    ctx.restore()?;
    result
}

fn render_rect(ctx: &cairo::Context, rect: Rect, pen: &Pen) -> Result<(), RenderError> {
    pen.apply(ctx);
    ctx.rectangle(
        rect.x as f64,
        rect.y as f64,
        rect.width as f64,
        rect.height as f64,
    );
    ctx.stroke()?;
    Ok(())
}

fn render_dot(
    ctx: &cairo::Context,
    center: Point,
    radius: f64,
    pen: &Pen,
    fill: Color,
) -> Result<(), RenderError> {
    let (cx, cy) = center.as_f64();
    ctx.new_path();
    ctx.arc(cx, cy, radius, 0.0, std::f64::consts::TAU);
    fill.apply(ctx);
    ctx.fill_preserve()?;
    pen.apply(ctx);
    ctx.stroke()?;
    Ok(())
}

fn render_line(ctx: &cairo::Context, begin: Point, end: Point, pen: &Pen) -> Result<(), RenderError> {
    pen.apply(ctx);
    let (x1, y1) = begin.as_f64();
    let (x2, y2) = end.as_f64();
    ctx.move_to(x1, y1);
    ctx.line_to(x2, y2);
    ctx.stroke()?;
    Ok(())
}

fn render_path(
    ctx: &cairo::Context,
    path: &StrokePath,
    pen: &Pen,
    operator: cairo::Operator,
) -> Result<(), RenderError> {
    ctx.set_operator(operator);
    pen.apply(ctx);
    ctx.new_path();
    path.trace(ctx);
    ctx.stroke()?;
    Ok(())
}

/// Renders the two-tone eraser cursor: a light blue disc with a pink core.
pub fn render_eraser_cursor() -> Result<RasterSurface, SurfaceError> {
    let mut cursor = RasterSurface::new(ERASER_CURSOR_SIZE, ERASER_CURSOR_SIZE)?;
    let ctx = cursor.context()?;
    let center = (ERASER_CURSOR_SIZE / 2) as f64;
    let rings = [("#7acfe6", ERASER_WIDTH), ("#eccdec", ERASER_WIDTH - 4.0)];
    for (hex, width) in rings {
        let color = Color::from_hex(hex).unwrap_or(super::color::GRAY);
        Pen::eraser(color, width).apply(&ctx);
        ctx.move_to(center, center);
        ctx.curve_to(center, center + 1.0, center, center, center, center);
        ctx.stroke()?;
    }
    drop(ctx);
    Ok(cursor)
}
