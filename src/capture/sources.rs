//! Capture sources usable without a live display.

use super::types::{CaptureError, CaptureGeometry, CaptureProvider, CapturedScreen};
use crate::draw::RasterSurface;
use log::{debug, info};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

/// Reads a previously taken screenshot from a PNG file.
#[derive(Debug, Clone)]
pub struct PngFileSource {
    path: PathBuf,
    origin: (i32, i32),
}

impl PngFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            origin: (0, 0),
        }
    }

    /// Sets the desktop position of the display the image was taken from.
    pub fn with_origin(mut self, x: i32, y: i32) -> Self {
        self.origin = (x, y);
        self
    }
}

impl CaptureProvider for PngFileSource {
    fn capture(&mut self) -> Result<CapturedScreen, CaptureError> {
        if !self.path.is_file() {
            return Err(CaptureError::ResourceMissing(self.path.clone()));
        }
        debug!("Reading capture from: {}", self.path.display());
        let mut reader = BufReader::new(File::open(&self.path)?);
        let image = RasterSurface::from_png(&mut reader)?;
        let (width, height) = image.dimensions();
        info!(
            "Captured {}x{} screen from {}",
            width,
            height,
            self.path.display()
        );
        Ok(CapturedScreen {
            geometry: CaptureGeometry {
                width,
                height,
                origin_x: self.origin.0,
                origin_y: self.origin.1,
            },
            image,
        })
    }
}

/// Fully transparent capture of a fixed size.
#[derive(Debug, Clone, Copy)]
pub struct BlankSource {
    geometry: CaptureGeometry,
}

impl BlankSource {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            geometry: CaptureGeometry::new(width, height),
        }
    }
}

impl CaptureProvider for BlankSource {
    fn capture(&mut self) -> Result<CapturedScreen, CaptureError> {
        let (width, height) = self.geometry.dimensions();
        if width == 0 || height == 0 {
            return Err(CaptureError::InvalidGeometry { width, height });
        }
        Ok(CapturedScreen {
            geometry: self.geometry,
            image: RasterSurface::new(width, height)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::GREEN;
    use tempfile::TempDir;

    #[test]
    fn missing_png_is_resource_missing() {
        let temp = TempDir::new().unwrap();
        let mut source = PngFileSource::new(temp.path().join("nope.png"));
        let err = source.capture().unwrap_err();
        assert!(matches!(err, CaptureError::ResourceMissing(_)));
    }

    #[test]
    fn png_source_reports_geometry_and_pixels() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("screen.png");
        let mut image = RasterSurface::new(12, 7).unwrap();
        image.fill(GREEN).unwrap();
        image.write_png(&mut File::create(&path).unwrap()).unwrap();

        let captured = PngFileSource::new(&path)
            .with_origin(1920, 0)
            .capture()
            .unwrap();
        assert_eq!(
            captured.geometry,
            CaptureGeometry {
                width: 12,
                height: 7,
                origin_x: 1920,
                origin_y: 0
            }
        );
        assert_eq!(captured.image.pixel(3, 3).unwrap(), [0, 255, 0, 255]);
    }

    #[test]
    fn blank_source_is_transparent() {
        let captured = BlankSource::new(5, 4).capture().unwrap();
        assert_eq!(captured.geometry.dimensions(), (5, 4));
        assert!(captured.image.is_transparent().unwrap());
    }

    #[test]
    fn blank_source_rejects_empty_geometry() {
        let err = BlankSource::new(0, 4).capture().unwrap_err();
        assert!(matches!(
            err,
            CaptureError::InvalidGeometry {
                width: 0,
                height: 4
            }
        ));
    }
}
