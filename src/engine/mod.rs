//! The layered drawing engine.
//!
//! Pointer gestures render into a live scratch layer copied from the
//! committed layer; releasing the pointer commits the live layer and records
//! a snapshot for undo. Board changes only replace the background layer.

mod actions;
mod core;
mod frame;
mod gesture;

pub use core::{CompositingEngine, EngineError, EngineSettings};
