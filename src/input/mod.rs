//! Input handling and the gesture state machine.
//!
//! This module holds the tool selection, the board mode, generic pointer
//! types delivered by the host, and the per-gesture stroke state that the
//! compositing engine drives on press/move/release.

pub mod board_mode;
pub mod events;
pub mod stroke;
pub mod tool;

// Re-export commonly used types at module level
pub use board_mode::BoardMode;
pub use events::{HostRequest, MouseButton};
pub use stroke::{GestureState, StrokeState};
pub use tool::Tool;
