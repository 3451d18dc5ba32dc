use crate::draw::{CompositeMode, RasterSurface, SurfaceError};

use super::CompositingEngine;

impl CompositingEngine {
    /// The drawing layer currently on display: live while a gesture is in
    /// progress, committed otherwise.
    pub fn drawing_layer(&self) -> &RasterSurface {
        if self.stroke.is_active() {
            &self.live
        } else {
            &self.committed
        }
    }

    /// Assembles the displayed frame at window resolution: background, then
    /// the drawing layer, both blended over an empty canvas.
    pub fn compose_frame(&mut self) -> Result<RasterSurface, SurfaceError> {
        let (width, height) = self.window;
        let mut frame = RasterSurface::new(width, height)?;
        self.background
            .paint_scaled_onto(&mut frame, CompositeMode::Over)?;
        self.drawing_layer()
            .paint_scaled_onto(&mut frame, CompositeMode::Over)?;
        self.needs_redraw = false;
        Ok(frame)
    }

    /// Assembles the snapshot to save at capture resolution.
    ///
    /// The captured screen goes underneath the background so annotations on
    /// a transparent board are saved on top of the screen image.
    pub fn export_snapshot(&self) -> Result<RasterSurface, SurfaceError> {
        let (width, height) = self.canvas_size();
        let mut snapshot = RasterSurface::new(width, height)?;
        self.capture
            .composite_onto(&mut snapshot, CompositeMode::Over)?;
        self.background
            .composite_onto(&mut snapshot, CompositeMode::Over)?;
        self.drawing_layer()
            .composite_onto(&mut snapshot, CompositeMode::Over)?;
        Ok(snapshot)
    }
}
