//! Board/background mode selection.

use crate::config::BoardConfig;
use crate::draw::Color;

/// Board rendering mode
///
/// Determines what the background layer shows. Drawings live on their own
/// layers and persist across mode switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BoardMode {
    /// No board: the captured screen (or full transparency when the
    /// compositor can show what lies beneath the overlay)
    #[default]
    Transparent,
    /// White/light background for drawing (whiteboard)
    Whiteboard,
    /// Dark/black background for drawing (blackboard)
    Blackboard,
}

impl BoardMode {
    /// Returns the solid background color for this mode, if any.
    ///
    /// Transparent mode returns None (the background is restored from the
    /// capture or cleared instead of filled).
    pub fn background_color(&self, config: &BoardConfig) -> Option<Color> {
        let rgb = match self {
            Self::Transparent => return None,
            Self::Whiteboard => config.whiteboard_color,
            Self::Blackboard => config.blackboard_color,
        };
        Some(Color {
            r: rgb[0],
            g: rgb[1],
            b: rgb[2],
            a: 1.0,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Transparent => "transparent",
            Self::Whiteboard => "whiteboard",
            Self::Blackboard => "blackboard",
        }
    }
}

impl std::str::FromStr for BoardMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "transparent" => Ok(Self::Transparent),
            "whiteboard" => Ok(Self::Whiteboard),
            "blackboard" => Ok(Self::Blackboard),
            other => Err(format!("unknown board mode '{other}'")),
        }
    }
}
