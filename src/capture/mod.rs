//! Screen capture input and snapshot persistence for screenpen.
//!
//! This module provides:
//! - The [`CaptureProvider`] seam through which the initial screen raster
//!   and its geometry reach the engine
//! - PNG-file and blank capture sources for headless sessions
//! - Saving exported snapshots under timestamped file names

pub mod file;
pub mod sources;
pub mod types;

pub use file::{FileSaveConfig, save_snapshot, validate_filename_template};
pub use sources::{BlankSource, PngFileSource};
pub use types::{CaptureError, CaptureGeometry, CaptureProvider, CapturedScreen};
