//! Screen annotation core.
//!
//! A captured screen sits under a background layer (the screen itself, a
//! whiteboard or a blackboard) and two drawing layers. Pointer gestures are
//! previewed on the live layer and committed on release, with a bounded
//! undo/redo history of committed snapshots. The composited result can be
//! exported and saved as PNG.
//!
//! Display, toolbars and input delivery belong to the host; the `screenpen`
//! binary drives the engine from a scripted session instead.

pub mod capture;
pub mod chart;
pub mod config;
pub mod draw;
pub mod engine;
pub mod history;
pub mod input;
pub mod replay;
pub mod util;

pub use config::Config;
pub use engine::{CompositingEngine, EngineError, EngineSettings};
