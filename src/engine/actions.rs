use crate::chart::ChartRenderer;
use crate::config::{Action, KeyBinding};
use crate::draw::pen::{CapStyle, JoinStyle, LineStyle, WIDTH_MEDIUM, WIDTH_THICK, WIDTH_THIN};
use crate::draw::{Color, Pen};
use crate::input::{BoardMode, HostRequest, Tool};
use log::{debug, info};

use super::{CompositingEngine, EngineError};

impl CompositingEngine {
    /// Processes a key press delivered by the host.
    ///
    /// `key` is a key name such as `"z"` or `"Escape"`. Returns the action
    /// the key was bound to, if any.
    pub fn on_key_press(
        &mut self,
        key: &str,
        ctrl: bool,
        shift: bool,
        alt: bool,
    ) -> Result<Option<Action>, EngineError> {
        let binding = KeyBinding::new(key, ctrl, shift, alt);
        let Some(action) = self.action_map.get(&binding).copied() else {
            debug!("No action bound to {:?}", binding);
            return Ok(None);
        };
        self.handle_action(action)?;
        Ok(Some(action))
    }

    /// Applies a keyboard action.
    ///
    /// Save and exit are not performed here; they become the pending host
    /// request.
    pub fn handle_action(&mut self, action: Action) -> Result<(), EngineError> {
        debug!("Action: {:?}", action);
        match action {
            Action::Exit => self.pending_request = Some(HostRequest::Exit),
            Action::Save => self.pending_request = Some(HostRequest::Save),
            Action::Undo => self.undo()?,
            Action::Redo => self.redo()?,
            Action::ClearDrawing => self.clear_drawing()?,
            Action::ToggleWhiteboard => self.toggle_board_mode(BoardMode::Whiteboard)?,
            Action::ToggleBlackboard => self.toggle_board_mode(BoardMode::Blackboard)?,
            Action::ReturnToTransparent => self.set_board_mode(BoardMode::Transparent)?,
            Action::SelectFreehand => self.set_tool(Tool::Freehand),
            Action::SelectRectangle => self.set_tool(Tool::Rectangle),
            Action::SelectLine => self.set_tool(Tool::Line),
            Action::SelectDot => self.set_tool(Tool::Dot),
            Action::SelectEraser => self.set_tool(Tool::Eraser),
            Action::WidthThin => self.set_width(WIDTH_THIN),
            Action::WidthMedium => self.set_width(WIDTH_MEDIUM),
            Action::WidthThick => self.set_width(WIDTH_THICK),
        }
        Ok(())
    }

    /// Steps history back and shows that state on both drawing layers.
    pub fn undo(&mut self) -> Result<(), EngineError> {
        if let Some(snapshot) = self.history.undo() {
            self.live.copy_from(snapshot.surface())?;
            self.committed.copy_from(snapshot.surface())?;
        }
        debug!("Undo: at entry {:?}", self.history.current_index());
        self.needs_redraw = true;
        Ok(())
    }

    /// Steps history forward and shows that state on both drawing layers.
    pub fn redo(&mut self) -> Result<(), EngineError> {
        if let Some(snapshot) = self.history.redo() {
            self.live.copy_from(snapshot.surface())?;
            self.committed.copy_from(snapshot.surface())?;
        }
        debug!("Redo: at entry {:?}", self.history.current_index());
        self.needs_redraw = true;
        Ok(())
    }

    /// Erases both drawing layers. History is left untouched, so clearing
    /// cannot be undone.
    pub fn clear_drawing(&mut self) -> Result<(), EngineError> {
        self.live.clear()?;
        self.committed.clear()?;
        info!("Drawing cleared");
        self.needs_redraw = true;
        Ok(())
    }

    /// Replaces the background layer for `mode`.
    ///
    /// Drawing layers and history are not touched.
    pub fn set_board_mode(&mut self, mode: BoardMode) -> Result<(), EngineError> {
        match mode.background_color(&self.board_config) {
            Some(color) => self.background.fill(color)?,
            None if self.board_config.transparent_background => self.background.clear()?,
            None => self.background.copy_from(&self.capture)?,
        }
        if self.board_mode != mode {
            info!(
                "Board mode: {} -> {}",
                self.board_mode.name(),
                mode.name()
            );
        }
        self.board_mode = mode;
        self.needs_redraw = true;
        Ok(())
    }

    /// Switches to `mode`, or back to transparent if already in it.
    pub fn toggle_board_mode(&mut self, mode: BoardMode) -> Result<(), EngineError> {
        let target = if self.board_mode == mode {
            BoardMode::Transparent
        } else {
            mode
        };
        self.set_board_mode(target)
    }

    pub fn set_tool(&mut self, tool: Tool) {
        if self.stroke.tool != tool {
            debug!("Tool: {} -> {}", self.stroke.tool, tool);
        }
        self.stroke.tool = tool;
    }

    /// Installs a chart renderer and selects the chart tool.
    pub fn select_chart(&mut self, renderer: Box<dyn ChartRenderer>) {
        self.chart_renderer = Some(renderer);
        self.set_tool(Tool::Chart);
    }

    pub fn set_pen(&mut self, pen: Pen) {
        self.stroke.pen = pen;
        self.stroke.brush = pen.color;
    }

    pub fn set_color(&mut self, color: Color) {
        self.stroke.set_color(color);
    }

    pub fn set_width(&mut self, width: f64) {
        self.stroke.pen.width = width;
    }

    pub fn set_line_style(&mut self, style: LineStyle) {
        self.stroke.pen.style = style;
    }

    pub fn set_cap_style(&mut self, cap: CapStyle) {
        self.stroke.pen.cap = cap;
    }

    pub fn set_join_style(&mut self, join: JoinStyle) {
        self.stroke.pen.join = join;
    }
}
