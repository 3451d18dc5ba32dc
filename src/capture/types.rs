//! Data types for screen capture.

use crate::draw::{RasterSurface, SurfaceError};
use std::path::PathBuf;
use thiserror::Error;

/// Size and position of the captured display in desktop coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureGeometry {
    pub width: u32,
    pub height: u32,
    pub origin_x: i32,
    pub origin_y: i32,
}

impl CaptureGeometry {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            origin_x: 0,
            origin_y: 0,
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Result of capturing a display: geometry plus its pixels.
#[derive(Debug)]
pub struct CapturedScreen {
    pub geometry: CaptureGeometry,
    pub image: RasterSurface,
}

/// Supplies the screen raster once, when a session starts.
pub trait CaptureProvider {
    fn capture(&mut self) -> Result<CapturedScreen, CaptureError>;
}

/// Errors that can occur while capturing or saving.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("capture resource not found: {}", .0.display())]
    ResourceMissing(PathBuf),

    #[error("invalid capture geometry {width}x{height}")]
    InvalidGeometry { width: u32, height: u32 },

    #[error("unsupported image format '{0}'")]
    UnsupportedFormat(String),

    #[error("filename template '{0}' does not produce a valid file name")]
    InvalidTemplate(String),

    #[error("image processing error: {0}")]
    ImageError(#[from] SurfaceError),

    #[error("failed to save snapshot: {0}")]
    SaveError(#[from] std::io::Error),
}
