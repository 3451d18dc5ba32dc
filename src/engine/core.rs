//! Compositing engine state and construction.

use crate::capture::CapturedScreen;
use crate::chart::ChartRenderer;
use crate::config::{Action, BoardConfig, Config, KeyBinding, KeybindingsConfig};
use crate::draw::{Pen, RasterSurface, RenderError, Snapshot, SurfaceError};
use crate::history::{BoundedHistory, DEFAULT_HISTORY_LIMIT};
use crate::input::{BoardMode, HostRequest, StrokeState, Tool};
use crate::util::CoordinateScale;
use log::{info, warn};
use std::collections::HashMap;
use thiserror::Error;

/// Errors surfaced by engine operations.
///
/// Chart failures are not among them: they are recovered inside the gesture
/// and reported through [`CompositingEngine::take_notice`].
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error("rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("invalid keybindings: {0}")]
    Keybindings(String),
}

/// Startup parameters of an engine, usually derived from [`Config`].
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub pen: Pen,
    pub eraser_width: f64,
    pub dot_radius: f64,
    pub history_limit: usize,
    pub board: BoardConfig,
    pub initial_mode: BoardMode,
    pub action_map: HashMap<KeyBinding, Action>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        let drawing = crate::config::DrawingConfig::default();
        Self {
            pen: drawing.pen(),
            eraser_width: drawing.eraser_width,
            dot_radius: drawing.dot_radius,
            history_limit: DEFAULT_HISTORY_LIMIT,
            board: BoardConfig::default(),
            initial_mode: BoardMode::Transparent,
            action_map: KeybindingsConfig::default()
                .build_action_map()
                .unwrap_or_default(),
        }
    }
}

impl EngineSettings {
    pub fn from_config(config: &Config) -> Result<Self, EngineError> {
        let action_map = config
            .keybindings
            .build_action_map()
            .map_err(EngineError::Keybindings)?;
        let initial_mode = config.board.default_mode.parse().unwrap_or_else(|err| {
            warn!("{err}, starting transparent");
            BoardMode::Transparent
        });
        Ok(Self {
            pen: config.drawing.pen(),
            eraser_width: config.drawing.eraser_width,
            dot_radius: config.drawing.dot_radius,
            history_limit: config.history.limit,
            board: config.board.clone(),
            initial_mode,
            action_map,
        })
    }
}

/// Layered drawing engine.
///
/// Owns the captured screen, the background layer, the live and committed
/// drawing layers (all at capture resolution) and the undo history. Pointer
/// input arrives in window coordinates and is scaled to the canvas.
pub struct CompositingEngine {
    /// Screen pixels supplied by the capture provider
    pub(crate) capture: RasterSurface,
    /// Captured screen, board color, or transparency
    pub(crate) background: RasterSurface,
    /// Scratch layer repainted while a gesture is in progress
    pub(crate) live: RasterSurface,
    /// Last accepted drawing state
    pub(crate) committed: RasterSurface,
    pub(crate) history: BoundedHistory<Snapshot>,
    pub(crate) stroke: StrokeState,
    pub(crate) board_mode: BoardMode,
    pub(crate) board_config: BoardConfig,
    pub(crate) scale: CoordinateScale,
    pub(crate) window: (u32, u32),
    pub(crate) chart_renderer: Option<Box<dyn ChartRenderer>>,
    pub(crate) action_map: HashMap<KeyBinding, Action>,
    /// User-visible message waiting to be shown by the host
    pub(crate) pending_notice: Option<String>,
    /// Save/exit request waiting to be handled by the host
    pub(crate) pending_request: Option<HostRequest>,
    /// Whether the display needs to be redrawn
    pub needs_redraw: bool,
}

impl CompositingEngine {
    /// Creates an engine over a captured screen shown in a window of
    /// `window` pixels.
    ///
    /// History is seeded with the empty committed layer, so the first undo
    /// returns to a blank drawing.
    pub fn new(
        screen: CapturedScreen,
        window: (u32, u32),
        settings: EngineSettings,
    ) -> Result<Self, EngineError> {
        let canvas = screen.image.dimensions();
        let window = if window.0 == 0 || window.1 == 0 {
            warn!(
                "Window size {}x{} is empty, using canvas size",
                window.0, window.1
            );
            canvas
        } else {
            window
        };

        let committed = RasterSurface::new(canvas.0, canvas.1)?;
        let history =
            BoundedHistory::with_initial(settings.history_limit, Snapshot::capture(&committed)?);

        let mut engine = Self {
            background: RasterSurface::new(canvas.0, canvas.1)?,
            live: RasterSurface::new(canvas.0, canvas.1)?,
            committed,
            capture: screen.image,
            history,
            stroke: StrokeState::new(settings.pen, settings.eraser_width, settings.dot_radius),
            board_mode: BoardMode::Transparent,
            board_config: settings.board,
            scale: CoordinateScale::new(canvas, window),
            window,
            chart_renderer: None,
            action_map: settings.action_map,
            pending_notice: None,
            pending_request: None,
            needs_redraw: true,
        };

        engine.set_board_mode(BoardMode::Transparent)?;
        if settings.initial_mode != BoardMode::Transparent {
            engine.set_board_mode(settings.initial_mode)?;
        }

        info!(
            "Engine ready: canvas {}x{} at ({}, {}), window {}x{}, history limit {}",
            canvas.0,
            canvas.1,
            screen.geometry.origin_x,
            screen.geometry.origin_y,
            window.0,
            window.1,
            engine.history.limit()
        );
        Ok(engine)
    }

    /// Canvas (capture) resolution.
    pub fn canvas_size(&self) -> (u32, u32) {
        self.committed.dimensions()
    }

    pub fn window_size(&self) -> (u32, u32) {
        self.window
    }

    pub fn capture(&self) -> &RasterSurface {
        &self.capture
    }

    pub fn background(&self) -> &RasterSurface {
        &self.background
    }

    pub fn live(&self) -> &RasterSurface {
        &self.live
    }

    pub fn committed(&self) -> &RasterSurface {
        &self.committed
    }

    pub fn history(&self) -> &BoundedHistory<Snapshot> {
        &self.history
    }

    pub fn stroke(&self) -> &StrokeState {
        &self.stroke
    }

    pub fn board_mode(&self) -> BoardMode {
        self.board_mode
    }

    pub fn tool(&self) -> Tool {
        self.stroke.tool
    }

    pub fn pen(&self) -> Pen {
        self.stroke.pen
    }

    pub fn is_drawing(&self) -> bool {
        self.stroke.is_active()
    }

    pub fn has_chart_renderer(&self) -> bool {
        self.chart_renderer.is_some()
    }

    /// Takes the message the host should show the user, if any.
    pub fn take_notice(&mut self) -> Option<String> {
        self.pending_notice.take()
    }

    /// Takes the pending save/exit request, if any.
    pub fn take_pending_request(&mut self) -> Option<HostRequest> {
        self.pending_request.take()
    }
}
