//! Stroke parameters (color, width, dash style, caps and joins).

use super::color::{Color, RED, TRANSPARENT};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Width presets offered by the line-width menu.
pub const WIDTH_THIN: f64 = 3.0;
pub const WIDTH_MEDIUM: f64 = 15.0;
pub const WIDTH_THICK: f64 = 25.0;

/// Default eraser diameter in canvas pixels.
pub const ERASER_WIDTH: f64 = 30.0;

/// Dash pattern of a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum LineStyle {
    #[default]
    Solid,
    Dash,
    Dot,
    DashDot,
}

impl LineStyle {
    /// Dash lengths in multiples of the pen width (empty = solid).
    fn pattern(self) -> &'static [f64] {
        match self {
            Self::Solid => &[],
            Self::Dash => &[4.0, 2.0],
            Self::Dot => &[1.0, 2.0],
            Self::DashDot => &[4.0, 2.0, 1.0, 2.0],
        }
    }
}

/// Line end style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum CapStyle {
    #[default]
    Round,
    Square,
    Flat,
}

impl From<CapStyle> for cairo::LineCap {
    fn from(cap: CapStyle) -> Self {
        match cap {
            CapStyle::Round => cairo::LineCap::Round,
            CapStyle::Square => cairo::LineCap::Square,
            CapStyle::Flat => cairo::LineCap::Butt,
        }
    }
}

/// Corner style where path segments meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum JoinStyle {
    #[default]
    Round,
    Miter,
    Bevel,
}

impl From<JoinStyle> for cairo::LineJoin {
    fn from(join: JoinStyle) -> Self {
        match join {
            JoinStyle::Round => cairo::LineJoin::Round,
            JoinStyle::Miter => cairo::LineJoin::Miter,
            JoinStyle::Bevel => cairo::LineJoin::Bevel,
        }
    }
}

/// Everything needed to stroke a primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pen {
    pub color: Color,
    pub width: f64,
    pub style: LineStyle,
    pub cap: CapStyle,
    pub join: JoinStyle,
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            color: RED,
            width: WIDTH_THIN,
            style: LineStyle::Solid,
            cap: CapStyle::Round,
            join: JoinStyle::Round,
        }
    }
}

impl Pen {
    /// Round, solid pen painting `color` at `width`; the eraser and its cursor use it.
    pub fn eraser(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            style: LineStyle::Solid,
            cap: CapStyle::Round,
            join: JoinStyle::Round,
        }
    }

    /// The pen actually used by the eraser tool: paints transparency.
    pub fn transparent_eraser(width: f64) -> Self {
        Self::eraser(TRANSPARENT, width)
    }

    /// Loads color, width, dash, cap and join into the cairo context.
    pub fn apply(&self, ctx: &cairo::Context) {
        self.color.apply(ctx);
        ctx.set_line_width(self.width);
        ctx.set_line_cap(self.cap.into());
        ctx.set_line_join(self.join.into());
        let dashes: Vec<f64> = self
            .style
            .pattern()
            .iter()
            .map(|len| len * self.width)
            .collect();
        ctx.set_dash(&dashes, 0.0);
    }
}
