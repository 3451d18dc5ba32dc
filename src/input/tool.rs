//! Drawing tool selection.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Drawing tool selection.
///
/// The active tool determines which primitive a gesture renders. The chart
/// tool is only entered once a chart renderer has been supplied, and the
/// engine falls back to [`Tool::Freehand`] when that renderer fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Tool {
    /// Freehand drawing - follows the pointer path (default)
    #[default]
    Freehand,
    /// Freehand path painting transparency
    Eraser,
    /// Rectangle outline - from corner to corner
    Rectangle,
    /// Straight line - between press and current point
    Line,
    /// Filled dot of fixed radius at the current point
    Dot,
    /// Chart rendered by the installed chart renderer
    Chart,
}

impl Tool {
    /// Tools that accumulate a path over the whole gesture.
    pub fn is_path_tool(self) -> bool {
        matches!(self, Self::Freehand | Self::Eraser)
    }

    /// Tools that re-render a single shape from a snapshot on every move.
    pub fn is_shape_tool(self) -> bool {
        !self.is_path_tool()
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Freehand => "freehand",
            Self::Eraser => "eraser",
            Self::Rectangle => "rectangle",
            Self::Line => "line",
            Self::Dot => "dot",
            Self::Chart => "chart",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "freehand" | "path" | "pen" => Ok(Self::Freehand),
            "eraser" => Ok(Self::Eraser),
            "rectangle" | "rect" => Ok(Self::Rectangle),
            "line" => Ok(Self::Line),
            "dot" | "point" => Ok(Self::Dot),
            "chart" => Ok(Self::Chart),
            other => Err(format!("unknown tool '{other}'")),
        }
    }
}
