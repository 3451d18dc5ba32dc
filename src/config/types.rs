//! Configuration type definitions.

use super::enums::ColorSpec;
use crate::draw::pen::{CapStyle, ERASER_WIDTH, JoinStyle, LineStyle, WIDTH_THIN};
use crate::draw::{DOT_RADIUS, Pen};
use crate::history::DEFAULT_HISTORY_LIMIT;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls the pen the overlay starts with. Users can change these values
/// at runtime using keybindings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Default pen color - either a named color (red, green, blue, cyan, magenta,
    /// yellow, black, white, orange, gray) or an RGB array like `[255, 0, 0]`
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Default pen width in pixels (valid range: 1.0 - 50.0)
    #[serde(default = "default_width")]
    pub default_width: f64,

    /// Dash pattern (solid, dash, dot, dash-dot)
    #[serde(default)]
    pub line_style: LineStyle,

    /// Line end style (round, square, flat)
    #[serde(default)]
    pub cap_style: CapStyle,

    /// Corner style (round, miter, bevel)
    #[serde(default)]
    pub join_style: JoinStyle,

    /// Eraser diameter in pixels (valid range: 1.0 - 200.0)
    #[serde(default = "default_eraser_width")]
    pub eraser_width: f64,

    /// Radius of the dot tool in pixels; independent of the pen width
    #[serde(default = "default_dot_radius")]
    pub dot_radius: f64,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            default_width: default_width(),
            line_style: LineStyle::default(),
            cap_style: CapStyle::default(),
            join_style: JoinStyle::default(),
            eraser_width: default_eraser_width(),
            dot_radius: default_dot_radius(),
        }
    }
}

impl DrawingConfig {
    /// Builds the initial pen from these settings.
    pub fn pen(&self) -> Pen {
        Pen {
            color: self.default_color.to_color(),
            width: self.default_width,
            style: self.line_style,
            cap: self.cap_style,
            join: self.join_style,
        }
    }
}

/// Undo/redo settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HistoryConfig {
    /// Number of snapshots kept for undo (values below 2 make undo a no-op)
    #[serde(default = "default_history_limit")]
    pub limit: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            limit: default_history_limit(),
        }
    }
}

/// Board mode configuration (whiteboard/blackboard backgrounds).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BoardConfig {
    /// Mode applied when a session starts (transparent, whiteboard, blackboard)
    #[serde(default = "default_board_mode")]
    pub default_mode: String,

    /// Whiteboard background color [R, G, B] (0.0-1.0 range)
    #[serde(default = "default_whiteboard_color")]
    pub whiteboard_color: [f64; 3],

    /// Blackboard background color [R, G, B] (0.0-1.0 range)
    #[serde(default = "default_blackboard_color")]
    pub blackboard_color: [f64; 3],

    /// Whether the display can show what lies beneath the overlay. When false,
    /// transparent mode paints the captured screen as the background.
    #[serde(default = "default_transparent_background")]
    pub transparent_background: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            default_mode: default_board_mode(),
            whiteboard_color: default_whiteboard_color(),
            blackboard_color: default_blackboard_color(),
            transparent_background: default_transparent_background(),
        }
    }
}

/// Snapshot export settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CaptureConfig {
    /// Directory for saved snapshots; `~` is expanded. Defaults to the
    /// user's Pictures directory.
    #[serde(default)]
    pub save_directory: Option<String>,

    /// chrono format string used to name saved files
    #[serde(default = "default_filename_template")]
    pub filename_template: String,

    /// Image format of saved files (only "png" is supported)
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            save_directory: None,
            filename_template: default_filename_template(),
            format: default_format(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_color() -> ColorSpec {
    ColorSpec::Name("red".to_string())
}

fn default_width() -> f64 {
    WIDTH_THIN
}

fn default_eraser_width() -> f64 {
    ERASER_WIDTH
}

fn default_dot_radius() -> f64 {
    DOT_RADIUS
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

fn default_board_mode() -> String {
    "transparent".to_string()
}

fn default_whiteboard_color() -> [f64; 3] {
    [1.0, 1.0, 1.0]
}

fn default_blackboard_color() -> [f64; 3] {
    [0.0, 0.0, 0.0]
}

fn default_transparent_background() -> bool {
    true
}

fn default_filename_template() -> String {
    "%Y%m%d_%H%M%S".to_string()
}

fn default_format() -> String {
    "png".to_string()
}
