//! Configuration file support for screenpen.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/screenpen/config.toml`. Settings include the initial pen,
//! history depth, board colors, snapshot naming, and keybindings.
//!
//! If no config file exists, defaults are used automatically.

pub mod enums;
pub mod keybindings;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use keybindings::{Action, KeyBinding, KeybindingsConfig};
pub use types::{BoardConfig, CaptureConfig, DrawingConfig, HistoryConfig};

use crate::history::MAX_HISTORY_LIMIT;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_color = "red"
/// default_width = 3.0
/// line_style = "dash"
///
/// [history]
/// limit = 30
///
/// [board]
/// default_mode = "whiteboard"
///
/// [capture]
/// save_directory = "~/Pictures/screenpen"
///
/// [keybindings]
/// undo = ["Ctrl+Z"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Initial pen and tool sizes
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Undo/redo depth
    #[serde(default)]
    pub history: HistoryConfig,

    /// Board mode settings (whiteboard/blackboard)
    #[serde(default)]
    pub board: BoardConfig,

    /// Snapshot export settings
    #[serde(default)]
    pub capture: CaptureConfig,

    /// Keyboard shortcuts per action
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are replaced by the nearest valid value (or the default)
    /// and a warning is logged.
    ///
    /// Validated ranges:
    /// - `default_width`: 1.0 - 50.0
    /// - `eraser_width`: 1.0 - 200.0
    /// - `dot_radius`: 1.0 - 100.0
    /// - board colors: 0.0 - 1.0 per channel
    pub fn validate_and_clamp(&mut self) {
        if !(1.0..=50.0).contains(&self.drawing.default_width) {
            warn!(
                "Invalid default_width {:.1}, clamping to 1.0-50.0 range",
                self.drawing.default_width
            );
            self.drawing.default_width = clamp_or(self.drawing.default_width, 1.0, 50.0);
        }

        if !(1.0..=200.0).contains(&self.drawing.eraser_width) {
            warn!(
                "Invalid eraser_width {:.1}, clamping to 1.0-200.0 range",
                self.drawing.eraser_width
            );
            self.drawing.eraser_width = clamp_or(self.drawing.eraser_width, 1.0, 200.0);
        }

        if !(1.0..=100.0).contains(&self.drawing.dot_radius) {
            warn!(
                "Invalid dot_radius {:.1}, clamping to 1.0-100.0 range",
                self.drawing.dot_radius
            );
            self.drawing.dot_radius = clamp_or(self.drawing.dot_radius, 1.0, 100.0);
        }

        // Degenerate limits are tolerated by the history; only warn
        if self.history.limit > MAX_HISTORY_LIMIT {
            warn!(
                "History limit {} too large, clamping to {}",
                self.history.limit, MAX_HISTORY_LIMIT
            );
            self.history.limit = MAX_HISTORY_LIMIT;
        } else if self.history.limit < 2 {
            warn!(
                "History limit {} disables undo; use 2 or more",
                self.history.limit
            );
        }

        if self
            .board
            .default_mode
            .parse::<crate::input::BoardMode>()
            .is_err()
        {
            warn!(
                "Invalid board default_mode '{}', falling back to 'transparent'",
                self.board.default_mode
            );
            self.board.default_mode = "transparent".to_string();
        }

        for i in 0..3 {
            if !(0.0..=1.0).contains(&self.board.whiteboard_color[i]) {
                warn!(
                    "Invalid whiteboard_color[{}] = {:.3}, clamping to 0.0-1.0",
                    i, self.board.whiteboard_color[i]
                );
                self.board.whiteboard_color[i] = clamp_or(self.board.whiteboard_color[i], 0.0, 1.0);
            }
            if !(0.0..=1.0).contains(&self.board.blackboard_color[i]) {
                warn!(
                    "Invalid blackboard_color[{}] = {:.3}, clamping to 0.0-1.0",
                    i, self.board.blackboard_color[i]
                );
                self.board.blackboard_color[i] = clamp_or(self.board.blackboard_color[i], 0.0, 1.0);
            }
        }

        if !self.capture.format.eq_ignore_ascii_case("png") {
            warn!(
                "Unsupported capture format '{}', falling back to 'png'",
                self.capture.format
            );
            self.capture.format = "png".to_string();
        }

        if self.capture.filename_template.trim().is_empty() {
            warn!("Empty filename_template, falling back to '%Y%m%d_%H%M%S'");
            self.capture.filename_template = CaptureConfig::default().filename_template;
        } else if let Err(err) =
            crate::capture::validate_filename_template(&self.capture.filename_template)
        {
            warn!("{err}, falling back to '%Y%m%d_%H%M%S'");
            self.capture.filename_template = CaptureConfig::default().filename_template;
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/screenpen/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("screenpen");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from `config_path`, or returns defaults if the file
    /// does not exist. All loaded values are validated and clamped.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or contains
    /// invalid TOML.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Serializes the config to TOML and writes it to `config_path`, creating
    /// the parent directory if needed.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// JSON schema describing the config file.
    pub fn json_schema() -> serde_json::Value {
        serde_json::to_value(schemars::schema_for!(Config)).unwrap_or(serde_json::Value::Null)
    }
}

/// Clamps `value` into range, mapping NaN to the lower bound.
fn clamp_or(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::pen::LineStyle;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.history.limit, 30);
        assert_eq!(config.drawing.default_width, 3.0);
        assert_eq!(config.board.default_mode, "transparent");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[drawing]\nline_style = \"dash\"\n\n[history]\nlimit = 5\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.drawing.line_style, LineStyle::Dash);
        assert_eq!(config.history.limit, 5);
        assert_eq!(config.capture.filename_template, "%Y%m%d_%H%M%S");
        assert_eq!(config.keybindings.undo, vec!["Ctrl+Z".to_string()]);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[drawing\n").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut config = Config::default();
        config.drawing.default_width = 500.0;
        config.drawing.eraser_width = f64::NAN;
        config.board.whiteboard_color = [2.0, -1.0, 0.5];
        config.board.default_mode = "chalkboard".into();
        config.capture.format = "jpeg".into();
        config.validate_and_clamp();

        assert_eq!(config.drawing.default_width, 50.0);
        assert_eq!(config.drawing.eraser_width, 1.0);
        assert_eq!(config.board.whiteboard_color, [1.0, 0.0, 0.5]);
        assert_eq!(config.board.default_mode, "transparent");
        assert_eq!(config.capture.format, "png");
    }

    #[test]
    fn degenerate_history_limit_is_kept() {
        let mut config = Config::default();
        config.history.limit = 1;
        config.validate_and_clamp();
        assert_eq!(config.history.limit, 1);
    }

    #[test]
    fn oversized_history_limit_is_clamped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[history]\nlimit = 1000000000000000\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.history.limit, MAX_HISTORY_LIMIT);
    }

    #[test]
    fn invalid_filename_template_falls_back() {
        let mut config = Config::default();
        config.capture.filename_template = "shot_%Q".into();
        config.validate_and_clamp();
        assert_eq!(config.capture.filename_template, "%Y%m%d_%H%M%S");

        config.capture.filename_template = "../outside_%H".into();
        config.validate_and_clamp();
        assert_eq!(config.capture.filename_template, "%Y%m%d_%H%M%S");

        config.capture.filename_template = "notes_%Y".into();
        config.validate_and_clamp();
        assert_eq!(config.capture.filename_template, "notes_%Y");
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.board.default_mode = "blackboard".into();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.board.default_mode, "blackboard");
    }

    #[test]
    fn schema_lists_sections() {
        let schema = Config::json_schema();
        let properties = schema.get("properties").unwrap();
        for section in ["drawing", "history", "board", "capture", "keybindings"] {
            assert!(properties.get(section).is_some(), "missing {section}");
        }
    }
}
