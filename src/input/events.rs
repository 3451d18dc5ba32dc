//! Generic input event types for host integration.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Mouse button identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    /// Left mouse button (primary drawing button)
    #[default]
    Left,
    /// Right mouse button (requests exit)
    Right,
    /// Middle mouse button (currently unused)
    Middle,
}

impl FromStr for MouseButton {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "middle" => Ok(Self::Middle),
            other => Err(format!("unknown mouse button '{other}'")),
        }
    }
}

/// Requests the engine hands back to the host UI.
///
/// The engine never saves files or terminates the process itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostRequest {
    /// Export the composited snapshot and write it to disk.
    Save,
    /// Close the overlay.
    Exit,
}
