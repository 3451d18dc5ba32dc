//! Rendering primitives and raster layers (Cairo-based).
//!
//! This module defines the core drawing types used for screen annotation:
//! - [`Color`]: RGBA color representation with the palette constants
//! - [`Pen`]: stroke parameters (width, dash, caps, joins)
//! - [`RasterSurface`]: fixed-size RGBA layers and their compositing
//! - [`Primitive`]: the shapes a gesture can produce
//! - Rendering functions for Cairo-based output

pub mod color;
pub mod pen;
pub mod primitive;
pub mod render;
pub mod surface;

// Re-export commonly used types at module level
pub use color::Color;
pub use pen::{CapStyle, JoinStyle, LineStyle, Pen};
pub use primitive::{DOT_RADIUS, Primitive, StrokePath};
pub use render::{RenderError, render_eraser_cursor, render_primitive};
pub use surface::{CompositeMode, RasterSurface, Snapshot, SurfaceError};

pub use color::{
    BLACK, BLUE, CYAN, GRAY, GREEN, MAGENTA, ORANGE, RED, TRANSPARENT, WHITE, YELLOW,
};
