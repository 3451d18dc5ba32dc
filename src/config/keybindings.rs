//! Keybinding configuration types and parsing.
//!
//! Users customize keyboard shortcuts per action; the engine resolves key
//! presses through the map built here.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All possible actions that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // Host requests
    Exit,
    Save,

    // History
    Undo,
    Redo,

    // Drawing
    ClearDrawing,

    // Board mode toggles
    ToggleWhiteboard,
    ToggleBlackboard,
    ReturnToTransparent,

    // Tool selection
    SelectFreehand,
    SelectRectangle,
    SelectLine,
    SelectDot,
    SelectEraser,

    // Width presets
    WidthThin,
    WidthMedium,
    WidthThick,
}

/// A single keybinding: a key name with optional modifiers.
///
/// Single-character keys are stored uppercase so that "z" and "Z" bind the
/// same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyBinding {
    /// Builds a binding for a key event delivered by the host.
    pub fn new(key: &str, ctrl: bool, shift: bool, alt: bool) -> Self {
        Self {
            key: normalize_key(key),
            ctrl,
            shift,
            alt,
        }
    }

    /// Parse a keybinding string like "Ctrl+Shift+W" or "Escape".
    /// Modifiers can appear in any order and spaces around '+' are allowed.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty keybinding string".to_string());
        }

        let s_normalized = s.replace(" + ", "+").replace("+ ", "+").replace(" +", "+");

        let mut ctrl = false;
        let mut shift = false;
        let mut alt = false;
        let mut key_parts = Vec::new();

        for part in s_normalized.split('+') {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => ctrl = true,
                "shift" => shift = true,
                "alt" => alt = true,
                _ => key_parts.push(part),
            }
        }

        if key_parts.is_empty() {
            return Err(format!("No key specified in: {}", s));
        }

        // "Ctrl++" splits into trailing empty parts; the key is '+'
        let key = key_parts.join("+");
        let key = if key.is_empty() { "+".to_string() } else { key };

        Ok(Self::new(&key, ctrl, shift, alt))
    }

    /// Check if this keybinding matches the current input state.
    pub fn matches(&self, key: &str, ctrl: bool, shift: bool, alt: bool) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.ctrl == ctrl
            && self.shift == shift
            && self.alt == alt
    }
}

fn normalize_key(key: &str) -> String {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c.to_uppercase().collect(),
        _ => key.to_string(),
    }
}

/// Configuration for all keybindings.
///
/// Each action can have multiple keybindings:
/// ```toml
/// [keybindings]
/// exit = ["Escape", "Ctrl+Q"]
/// undo = ["Ctrl+Z"]
/// clear_drawing = ["E"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct KeybindingsConfig {
    pub exit: Vec<String>,
    pub save: Vec<String>,
    pub undo: Vec<String>,
    pub redo: Vec<String>,
    pub clear_drawing: Vec<String>,
    pub toggle_whiteboard: Vec<String>,
    pub toggle_blackboard: Vec<String>,
    pub return_to_transparent: Vec<String>,
    pub select_freehand: Vec<String>,
    pub select_rectangle: Vec<String>,
    pub select_line: Vec<String>,
    pub select_dot: Vec<String>,
    pub select_eraser: Vec<String>,
    pub width_thin: Vec<String>,
    pub width_medium: Vec<String>,
    pub width_thick: Vec<String>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            exit: keys(&["Escape"]),
            save: keys(&["Ctrl+S"]),
            undo: keys(&["Ctrl+Z"]),
            redo: keys(&["Ctrl+Y"]),
            clear_drawing: keys(&["E"]),
            toggle_whiteboard: keys(&["Ctrl+W"]),
            toggle_blackboard: keys(&["Ctrl+B"]),
            return_to_transparent: keys(&["Ctrl+T"]),
            select_freehand: keys(&["P"]),
            select_rectangle: keys(&["R"]),
            select_line: keys(&["L"]),
            select_dot: keys(&["D"]),
            select_eraser: keys(&["X"]),
            width_thin: keys(&["1"]),
            width_medium: keys(&["2"]),
            width_thick: keys(&["3"]),
        }
    }
}

fn keys(bindings: &[&str]) -> Vec<String> {
    bindings.iter().map(|b| b.to_string()).collect()
}

impl KeybindingsConfig {
    /// Build a lookup map from keybindings to actions for efficient matching.
    /// Returns an error if any keybinding string is invalid or if duplicates are detected.
    pub fn build_action_map(&self) -> Result<HashMap<KeyBinding, Action>, String> {
        let mut map = HashMap::new();

        let groups: [(&[String], Action); 16] = [
            (&self.exit, Action::Exit),
            (&self.save, Action::Save),
            (&self.undo, Action::Undo),
            (&self.redo, Action::Redo),
            (&self.clear_drawing, Action::ClearDrawing),
            (&self.toggle_whiteboard, Action::ToggleWhiteboard),
            (&self.toggle_blackboard, Action::ToggleBlackboard),
            (&self.return_to_transparent, Action::ReturnToTransparent),
            (&self.select_freehand, Action::SelectFreehand),
            (&self.select_rectangle, Action::SelectRectangle),
            (&self.select_line, Action::SelectLine),
            (&self.select_dot, Action::SelectDot),
            (&self.select_eraser, Action::SelectEraser),
            (&self.width_thin, Action::WidthThin),
            (&self.width_medium, Action::WidthMedium),
            (&self.width_thick, Action::WidthThick),
        ];

        for (bindings, action) in groups {
            for binding_str in bindings {
                let binding = KeyBinding::parse(binding_str)?;
                if let Some(existing_action) = map.insert(binding, action) {
                    return Err(format!(
                        "Duplicate keybinding '{}' assigned to both {:?} and {:?}",
                        binding_str, existing_action, action
                    ));
                }
            }
        }

        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_key() {
        let binding = KeyBinding::parse("Escape").unwrap();
        assert_eq!(binding.key, "Escape");
        assert!(!binding.ctrl);
        assert!(!binding.shift);
        assert!(!binding.alt);
    }

    #[test]
    fn test_parse_ctrl_key() {
        let binding = KeyBinding::parse("Ctrl+Z").unwrap();
        assert_eq!(binding.key, "Z");
        assert!(binding.ctrl);
        assert!(!binding.shift);
        assert!(!binding.alt);
    }

    #[test]
    fn test_parse_all_modifiers() {
        let binding = KeyBinding::parse("Ctrl+Shift+Alt+A").unwrap();
        assert_eq!(binding.key, "A");
        assert!(binding.ctrl && binding.shift && binding.alt);
    }

    #[test]
    fn test_single_char_keys_are_uppercased() {
        let binding = KeyBinding::parse("ctrl+z").unwrap();
        assert_eq!(binding.key, "Z");
        assert_eq!(binding, KeyBinding::new("z", true, false, false));
    }

    #[test]
    fn test_parse_with_spaces() {
        let binding = KeyBinding::parse("Ctrl + Shift + W").unwrap();
        assert_eq!(binding.key, "W");
        assert!(binding.ctrl);
        assert!(binding.shift);
    }

    #[test]
    fn test_parse_plus_key() {
        let binding = KeyBinding::parse("Ctrl++").unwrap();
        assert_eq!(binding.key, "+");
        assert!(binding.ctrl);
    }

    #[test]
    fn test_parse_rejects_modifier_only() {
        assert!(KeyBinding::parse("Ctrl+Shift").is_err());
        assert!(KeyBinding::parse("   ").is_err());
    }

    #[test]
    fn test_matches() {
        let binding = KeyBinding::parse("Ctrl+Shift+W").unwrap();
        assert!(binding.matches("W", true, true, false));
        assert!(binding.matches("w", true, true, false));
        assert!(!binding.matches("W", false, true, false));
        assert!(!binding.matches("A", true, true, false));
    }

    #[test]
    fn test_parse_modifier_order_independence() {
        let binding1 = KeyBinding::parse("Ctrl+Shift+W").unwrap();
        let binding2 = KeyBinding::parse("Shift+Ctrl+W").unwrap();
        assert_eq!(binding1, binding2);
    }

    #[test]
    fn test_build_action_map() {
        let config = KeybindingsConfig::default();
        let map = config.build_action_map().unwrap();

        let escape = KeyBinding::parse("Escape").unwrap();
        assert_eq!(map.get(&escape), Some(&Action::Exit));

        let ctrl_z = KeyBinding::new("z", true, false, false);
        assert_eq!(map.get(&ctrl_z), Some(&Action::Undo));

        let ctrl_y = KeyBinding::new("Y", true, false, false);
        assert_eq!(map.get(&ctrl_y), Some(&Action::Redo));
    }

    #[test]
    fn test_duplicate_keybinding_detection() {
        let mut config = KeybindingsConfig::default();
        config.exit = vec!["Ctrl+Z".to_string()];
        config.undo = vec!["Ctrl+Z".to_string()];

        let err_msg = config.build_action_map().unwrap_err();
        assert!(err_msg.contains("Duplicate keybinding"));
        assert!(err_msg.contains("Ctrl+Z"));
    }

    #[test]
    fn test_duplicate_with_different_case() {
        let mut config = KeybindingsConfig::default();
        config.select_rectangle = vec!["e".to_string()];

        let err_msg = config.build_action_map().unwrap_err();
        assert!(err_msg.contains("Duplicate keybinding"));
    }
}
