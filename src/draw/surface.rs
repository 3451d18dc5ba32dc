//! Owned RGBA pixel buffers backed by cairo image surfaces.
//!
//! A [`RasterSurface`] is the unit every layer of the overlay is made of: the
//! captured/board background, the live scratch layer and the committed
//! drawing layer. Pixels are stored as cairo `ARgb32` (premultiplied, native
//! endian); the byte accessors on this type always speak straight RGBA.

use super::color::Color;
use std::fmt;
use std::io::{Read, Write};
use thiserror::Error;

/// Errors raised by raster operations.
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// Two surfaces of different size were copied or composited.
    #[error("surface dimensions differ: expected {expected:?}, found {found:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        found: (u32, u32),
    },

    #[error("invalid surface dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("pixel ({x}, {y}) is outside the surface")]
    OutOfBounds { x: u32, y: u32 },

    #[error("pixel buffer has {found} bytes, expected {expected}")]
    BufferLength { expected: usize, found: usize },

    #[error("cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("surface data unavailable: {0}")]
    Borrow(#[from] cairo::BorrowError),

    #[error("PNG stream error: {0}")]
    Png(#[from] cairo::IoError),
}

/// How a source surface is combined into a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeMode {
    /// Overwrite destination color and alpha.
    Replace,
    /// Standard source-over alpha blending.
    Over,
}

impl From<CompositeMode> for cairo::Operator {
    fn from(mode: CompositeMode) -> Self {
        match mode {
            CompositeMode::Replace => cairo::Operator::Source,
            CompositeMode::Over => cairo::Operator::Over,
        }
    }
}

/// Fixed-size RGBA raster. Mutation requires `&mut self`.
pub struct RasterSurface {
    surface: cairo::ImageSurface,
    width: u32,
    height: u32,
}

impl fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RasterSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

fn to_cairo_dimension(width: u32, height: u32) -> Result<(i32, i32), SurfaceError> {
    match (i32::try_from(width), i32::try_from(height)) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => Ok((w, h)),
        _ => Err(SurfaceError::InvalidDimensions { width, height }),
    }
}

impl RasterSurface {
    /// Creates a zero-initialized (fully transparent) surface.
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        let (w, h) = to_cairo_dimension(width, height)?;
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, w, h)?;
        Ok(Self {
            surface,
            width,
            height,
        })
    }

    /// Creates a surface from tightly packed straight-alpha RGBA bytes.
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Result<Self, SurfaceError> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(SurfaceError::BufferLength {
                expected,
                found: rgba.len(),
            });
        }

        let mut raster = Self::new(width, height)?;
        let stride = raster.surface.stride() as usize;
        {
            let mut data = raster.surface.data()?;
            for (y, row) in rgba.chunks_exact(width as usize * 4).enumerate() {
                let dest_row = &mut data[y * stride..y * stride + width as usize * 4];
                for (src, dest) in row.chunks_exact(4).zip(dest_row.chunks_exact_mut(4)) {
                    dest.copy_from_slice(&premultiply(src).to_ne_bytes());
                }
            }
        }
        raster.surface.mark_dirty();
        Ok(raster)
    }

    /// Decodes a PNG stream into a surface, converting to RGBA if needed.
    pub fn from_png<R: Read>(stream: &mut R) -> Result<Self, SurfaceError> {
        let decoded = cairo::ImageSurface::create_from_png(stream)?;
        let width = decoded.width() as u32;
        let height = decoded.height() as u32;
        let raster = Self::new(width, height)?;
        {
            let ctx = cairo::Context::new(&raster.surface)?;
            ctx.set_operator(cairo::Operator::Source);
            ctx.set_source_surface(&decoded, 0.0, 0.0)?;
            ctx.paint()?;
        }
        Ok(raster)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn ensure_same_size(&self, other: &RasterSurface) -> Result<(), SurfaceError> {
        if self.dimensions() != other.dimensions() {
            return Err(SurfaceError::DimensionMismatch {
                expected: self.dimensions(),
                found: other.dimensions(),
            });
        }
        Ok(())
    }

    /// Opens a cairo context for drawing onto this surface.
    ///
    /// The context starts with the default `Over` operator.
    pub fn context(&mut self) -> Result<cairo::Context, SurfaceError> {
        Ok(cairo::Context::new(&self.surface)?)
    }

    /// Overwrites every pixel, alpha included, with `color`.
    pub fn fill(&mut self, color: Color) -> Result<(), SurfaceError> {
        let ctx = self.context()?;
        ctx.set_operator(cairo::Operator::Source);
        color.apply(&ctx);
        ctx.paint()?;
        Ok(())
    }

    /// Resets the surface to full transparency.
    pub fn clear(&mut self) -> Result<(), SurfaceError> {
        let ctx = self.context()?;
        ctx.set_operator(cairo::Operator::Clear);
        ctx.paint()?;
        Ok(())
    }

    /// Full-buffer replace from a surface of identical size.
    pub fn copy_from(&mut self, other: &RasterSurface) -> Result<(), SurfaceError> {
        other.composite_onto(self, CompositeMode::Replace)
    }

    /// Draws this surface onto `dest` at the origin using `mode`.
    pub fn composite_onto(
        &self,
        dest: &mut RasterSurface,
        mode: CompositeMode,
    ) -> Result<(), SurfaceError> {
        dest.ensure_same_size(self)?;
        let ctx = dest.context()?;
        ctx.set_operator(mode.into());
        ctx.set_source_surface(&self.surface, 0.0, 0.0)?;
        ctx.paint()?;
        Ok(())
    }

    /// Draws this surface scaled to cover `dest` entirely, whatever its size.
    ///
    /// Used when a capture does not match the canvas resolution.
    pub fn paint_scaled_onto(
        &self,
        dest: &mut RasterSurface,
        mode: CompositeMode,
    ) -> Result<(), SurfaceError> {
        let ctx = dest.context()?;
        ctx.set_operator(mode.into());
        ctx.scale(
            dest.width as f64 / self.width as f64,
            dest.height as f64 / self.height as f64,
        );
        ctx.set_source_surface(&self.surface, 0.0, 0.0)?;
        ctx.paint()?;
        Ok(())
    }

    /// Deep copy with independent pixel storage.
    pub fn duplicate(&self) -> Result<RasterSurface, SurfaceError> {
        let mut copy = RasterSurface::new(self.width, self.height)?;
        copy.copy_from(self)?;
        Ok(copy)
    }

    /// Reads one pixel as straight RGBA.
    pub fn pixel(&self, x: u32, y: u32) -> Result<[u8; 4], SurfaceError> {
        if x >= self.width || y >= self.height {
            return Err(SurfaceError::OutOfBounds { x, y });
        }
        let stride = self.surface.stride() as usize;
        let offset = y as usize * stride + x as usize * 4;
        let mut value = [0u8; 4];
        self.surface.with_data(|data| {
            let mut raw = [0u8; 4];
            raw.copy_from_slice(&data[offset..offset + 4]);
            value = unpremultiply(u32::from_ne_bytes(raw));
        })?;
        Ok(value)
    }

    /// Returns every pixel as tightly packed straight RGBA rows.
    pub fn to_rgba(&self) -> Result<Vec<u8>, SurfaceError> {
        let stride = self.surface.stride() as usize;
        let row_bytes = self.width as usize * 4;
        let mut out = Vec::with_capacity(row_bytes * self.height as usize);
        self.surface.with_data(|data| {
            for row in data.chunks_exact(stride).take(self.height as usize) {
                for px in row[..row_bytes].chunks_exact(4) {
                    let mut raw = [0u8; 4];
                    raw.copy_from_slice(px);
                    out.extend_from_slice(&unpremultiply(u32::from_ne_bytes(raw)));
                }
            }
        })?;
        Ok(out)
    }

    /// Returns true when no pixel has any alpha coverage.
    pub fn is_transparent(&self) -> Result<bool, SurfaceError> {
        Ok(self.to_rgba()?.chunks_exact(4).all(|px| px[3] == 0))
    }

    /// Encodes the surface as PNG.
    pub fn write_png<W: Write>(&self, stream: &mut W) -> Result<(), SurfaceError> {
        self.surface.write_to_png(stream)?;
        Ok(())
    }
}

/// Immutable point-in-time copy of a drawing layer.
///
/// Only shared references to the inner surface are handed out, and every
/// mutating [`RasterSurface`] method needs `&mut`, so a snapshot never
/// changes after capture.
#[derive(Debug)]
pub struct Snapshot(RasterSurface);

impl Snapshot {
    /// Copies `surface` into fresh storage.
    pub fn capture(surface: &RasterSurface) -> Result<Self, SurfaceError> {
        Ok(Self(surface.duplicate()?))
    }

    pub fn surface(&self) -> &RasterSurface {
        &self.0
    }
}

fn premultiply(px: &[u8]) -> u32 {
    let a = px[3] as u32;
    let scale = |c: u8| (c as u32 * a + 127) / 255;
    (a << 24) | (scale(px[0]) << 16) | (scale(px[1]) << 8) | scale(px[2])
}

fn unpremultiply(argb: u32) -> [u8; 4] {
    let a = argb >> 24;
    if a == 0 {
        return [0, 0, 0, 0];
    }
    let channel = |shift: u32| {
        let c = (argb >> shift) & 0xff;
        ((c * 255 + a / 2) / a).min(255) as u8
    };
    [channel(16), channel(8), channel(0), a as u8]
}
