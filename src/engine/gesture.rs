use crate::chart::ChartRenderer;
use crate::draw::{RenderError, Snapshot, render_primitive};
use crate::input::{HostRequest, MouseButton, Tool};
use log::{debug, warn};

use super::{CompositingEngine, EngineError};

impl CompositingEngine {
    /// Processes a pointer press at window coordinates `(x, y)`.
    ///
    /// # Behavior
    /// - Left press while idle: starts a gesture with the current tool and
    ///   renders its first frame (a click alone leaves a dot or rectangle)
    /// - Left press while a gesture is active: ignored
    /// - Right press: asks the host to exit
    pub fn on_pointer_press(
        &mut self,
        button: MouseButton,
        x: f64,
        y: f64,
    ) -> Result<(), EngineError> {
        match button {
            MouseButton::Left => {}
            MouseButton::Right => {
                debug!("Right button pressed, requesting exit");
                self.pending_request = Some(HostRequest::Exit);
                return Ok(());
            }
            MouseButton::Middle => return Ok(()),
        }

        if self.stroke.is_active() {
            debug!("Pointer press during an active gesture ignored");
            return Ok(());
        }

        let point = self.scale.to_canvas(x, y);
        if self.stroke.tool.is_shape_tool() {
            self.live.copy_from(&self.committed)?;
        }
        self.stroke.start(point);
        debug!("Gesture started: {} at {:?}", self.stroke.tool, point);

        self.redraw()
    }

    /// Processes pointer motion; only meaningful during a gesture.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) -> Result<(), EngineError> {
        if !self.stroke.is_active() {
            return Ok(());
        }
        let point = self.scale.to_canvas(x, y);
        self.stroke.move_to(point);
        self.redraw()
    }

    /// Processes a pointer release.
    ///
    /// A left release ending a gesture commits the live layer and records a
    /// snapshot in history. Anything else is ignored.
    pub fn on_pointer_release(
        &mut self,
        button: MouseButton,
        x: f64,
        y: f64,
    ) -> Result<(), EngineError> {
        if button != MouseButton::Left || !self.stroke.is_active() {
            return Ok(());
        }

        self.committed.copy_from(&self.live)?;
        let point = self.scale.to_canvas(x, y);
        self.stroke.finish(point);
        self.history.push(Snapshot::capture(&self.committed)?);
        self.needs_redraw = true;

        debug!(
            "Gesture committed at {:?}; history {}/{} entries",
            point,
            self.history.len(),
            self.history.limit()
        );
        Ok(())
    }

    /// Re-renders the live layer for the current gesture.
    fn redraw(&mut self) -> Result<(), EngineError> {
        if self.stroke.tool.is_path_tool() {
            // The whole path is re-stroked from the committed layer, but only
            // when the pointer actually moved.
            if !self.stroke.extend_path() {
                return Ok(());
            }
        }
        self.live.copy_from(&self.committed)?;

        let chart: Option<&mut dyn ChartRenderer> = match self.chart_renderer.as_mut() {
            Some(renderer) => Some(renderer.as_mut()),
            None => None,
        };
        let result = match self.stroke.primitive(chart) {
            Some(primitive) => {
                let ctx = self.live.context()?;
                render_primitive(&ctx, primitive)
            }
            None if self.stroke.tool == Tool::Chart => {
                Err(RenderError::Chart(crate::chart::ChartError::Failed(
                    "no chart renderer installed".to_string(),
                )))
            }
            None => Ok(()),
        };

        match result {
            Ok(()) => {}
            Err(RenderError::Chart(err)) => self.abort_chart(err.to_string())?,
            Err(err) => return Err(err.into()),
        }

        self.needs_redraw = true;
        Ok(())
    }

    /// Abandons a failed chart gesture without touching the committed layer.
    fn abort_chart(&mut self, reason: String) -> Result<(), EngineError> {
        warn!("Chart rendering failed: {reason}");
        self.live.copy_from(&self.committed)?;
        self.stroke.abort();
        self.pending_notice = Some(format!("Chart rendering failed: {reason}"));
        Ok(())
    }
}
