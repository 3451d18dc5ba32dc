//! Scripted input sessions.
//!
//! A script stands in for the pointer, keyboard and toolbar of an
//! interactive overlay. It is a TOML list of steps:
//!
//! ```toml
//! [[step]]
//! op = "tool"
//! tool = "rectangle"
//!
//! [[step]]
//! op = "drag"
//! points = [[10, 10], [50, 40]]
//!
//! [[step]]
//! op = "key"
//! key = "Ctrl+S"
//! ```
//!
//! Save requests raised while running (by a `save` step or a bound key)
//! export the composited snapshot to disk; an exit request stops the script.

use crate::capture::{CaptureError, FileSaveConfig, save_snapshot};
use crate::chart::BarChart;
use crate::config::{ColorSpec, KeyBinding};
use crate::draw::pen::{CapStyle, JoinStyle, LineStyle};
use crate::engine::{CompositingEngine, EngineError};
use crate::input::{BoardMode, HostRequest, MouseButton, Tool};
use log::{debug, info, warn};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or running a script.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read script {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid script: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("step {index}: {message}")]
    InvalidStep { index: usize, message: String },

    #[error("step {index}: {source}")]
    Engine { index: usize, source: EngineError },

    #[error("saving snapshot failed: {0}")]
    Save(#[from] CaptureError),
}

/// One scripted input event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Step {
    Press {
        x: f64,
        y: f64,
        #[serde(default)]
        button: MouseButton,
    },
    Move {
        x: f64,
        y: f64,
    },
    Release {
        x: f64,
        y: f64,
        #[serde(default)]
        button: MouseButton,
    },
    /// Left press at the first point, moves through the rest, release at the last.
    Drag {
        points: Vec<[f64; 2]>,
    },
    /// Key press written like a keybinding, e.g. "Ctrl+Z".
    Key {
        key: String,
    },
    Tool {
        tool: String,
    },
    Color {
        color: ColorSpec,
    },
    Width {
        width: f64,
    },
    Style {
        #[serde(default)]
        line: Option<LineStyle>,
        #[serde(default)]
        cap: Option<CapStyle>,
        #[serde(default)]
        join: Option<JoinStyle>,
    },
    Board {
        mode: String,
    },
    /// Installs a bar chart renderer and selects the chart tool.
    Chart {
        values: Vec<f64>,
    },
    Clear,
    Undo,
    Redo,
    Save,
}

/// A parsed script.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Script {
    #[serde(rename = "step", default)]
    pub steps: Vec<Step>,
}

impl Script {
    pub fn parse(source: &str) -> Result<Self, ReplayError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let source = fs::read_to_string(path).map_err(|source| ReplayError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let script = Self::parse(&source)?;
        debug!(
            "Loaded {} steps from {}",
            script.steps.len(),
            path.display()
        );
        Ok(script)
    }
}

/// What happened while a script ran.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplayOutcome {
    /// Number of steps executed
    pub steps_run: usize,
    /// Files written in response to save requests, in order
    pub saved: Vec<PathBuf>,
    /// Messages the engine asked to show the user
    pub notices: Vec<String>,
    /// Whether an exit request ended the script early
    pub exited: bool,
}

/// Feeds `script` into `engine`, handling save and exit requests the way an
/// interactive host would.
pub fn run_script(
    engine: &mut CompositingEngine,
    script: &Script,
    save: &FileSaveConfig,
) -> Result<ReplayOutcome, ReplayError> {
    let mut outcome = ReplayOutcome::default();

    for (index, step) in script.steps.iter().enumerate() {
        apply_step(engine, step, index)?;
        outcome.steps_run += 1;

        if let Some(notice) = engine.take_notice() {
            warn!("{notice}");
            outcome.notices.push(notice);
        }

        match engine.take_pending_request() {
            Some(HostRequest::Save) => {
                let snapshot = engine.export_snapshot().map_err(|err| ReplayError::Engine {
                    index,
                    source: err.into(),
                })?;
                let path = save_snapshot(&snapshot, save)?;
                outcome.saved.push(path);
            }
            Some(HostRequest::Exit) => {
                info!("Exit requested at step {index}, stopping");
                outcome.exited = true;
                break;
            }
            None => {}
        }
    }

    Ok(outcome)
}

fn apply_step(
    engine: &mut CompositingEngine,
    step: &Step,
    index: usize,
) -> Result<(), ReplayError> {
    let invalid = |message: String| ReplayError::InvalidStep { index, message };
    let engine_err = |source: EngineError| ReplayError::Engine { index, source };

    debug!("Step {index}: {step:?}");
    match step {
        Step::Press { x, y, button } => engine
            .on_pointer_press(*button, *x, *y)
            .map_err(engine_err)?,
        Step::Move { x, y } => engine.on_pointer_move(*x, *y).map_err(engine_err)?,
        Step::Release { x, y, button } => engine
            .on_pointer_release(*button, *x, *y)
            .map_err(engine_err)?,
        Step::Drag { points } => {
            let (Some(first), Some(last)) = (points.first(), points.last()) else {
                return Err(invalid("drag needs at least one point".to_string()));
            };
            engine
                .on_pointer_press(MouseButton::Left, first[0], first[1])
                .map_err(engine_err)?;
            for point in &points[1..] {
                engine
                    .on_pointer_move(point[0], point[1])
                    .map_err(engine_err)?;
            }
            engine
                .on_pointer_release(MouseButton::Left, last[0], last[1])
                .map_err(engine_err)?;
        }
        Step::Key { key } => {
            let binding = KeyBinding::parse(key).map_err(invalid)?;
            let action = engine
                .on_key_press(&binding.key, binding.ctrl, binding.shift, binding.alt)
                .map_err(engine_err)?;
            if action.is_none() {
                warn!("Step {index}: key '{key}' is not bound to any action");
            }
        }
        Step::Tool { tool } => engine.set_tool(tool.parse::<Tool>().map_err(invalid)?),
        Step::Color { color } => engine.set_color(color.to_color()),
        Step::Width { width } => {
            if !width.is_finite() || *width <= 0.0 {
                return Err(invalid(format!("width must be positive, got {width}")));
            }
            engine.set_width(*width);
        }
        Step::Style { line, cap, join } => {
            if let Some(line) = line {
                engine.set_line_style(*line);
            }
            if let Some(cap) = cap {
                engine.set_cap_style(*cap);
            }
            if let Some(join) = join {
                engine.set_join_style(*join);
            }
        }
        Step::Board { mode } => {
            let mode = mode.parse::<BoardMode>().map_err(invalid)?;
            engine.set_board_mode(mode).map_err(engine_err)?;
        }
        Step::Chart { values } => engine.select_chart(Box::new(BarChart::new(values.clone()))),
        Step::Clear => engine.clear_drawing().map_err(engine_err)?,
        Step::Undo => engine.undo().map_err(engine_err)?,
        Step::Redo => engine.redo().map_err(engine_err)?,
        Step::Save => engine.handle_action(crate::config::Action::Save).map_err(engine_err)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::{BlankSource, CaptureProvider};
    use crate::engine::EngineSettings;
    use tempfile::TempDir;

    fn engine() -> CompositingEngine {
        let screen = BlankSource::new(80, 80).capture().unwrap();
        CompositingEngine::new(screen, (80, 80), EngineSettings::default()).unwrap()
    }

    #[test]
    fn parses_all_step_kinds() {
        let script = Script::parse(
            r#"
            [[step]]
            op = "press"
            x = 1.0
            y = 2.0

            [[step]]
            op = "release"
            x = 1.0
            y = 2.0
            button = "right"

            [[step]]
            op = "style"
            line = "dash-dot"

            [[step]]
            op = "color"
            color = [0, 128, 255]

            [[step]]
            op = "undo"
            "#,
        )
        .unwrap();

        assert_eq!(script.steps.len(), 5);
        assert_eq!(
            script.steps[0],
            Step::Press {
                x: 1.0,
                y: 2.0,
                button: MouseButton::Left
            }
        );
        assert!(matches!(
            script.steps[1],
            Step::Release {
                button: MouseButton::Right,
                ..
            }
        ));
        assert_eq!(
            script.steps[2],
            Step::Style {
                line: Some(LineStyle::DashDot),
                cap: None,
                join: None
            }
        );
        assert_eq!(script.steps[4], Step::Undo);
    }

    #[test]
    fn unknown_op_is_a_parse_error() {
        let err = Script::parse("[[step]]\nop = \"teleport\"\n").unwrap_err();
        assert!(matches!(err, ReplayError::Parse(_)));
    }

    #[test]
    fn drag_commits_a_gesture() {
        let mut engine = engine();
        let script = Script {
            steps: vec![
                Step::Tool {
                    tool: "line".into(),
                },
                Step::Drag {
                    points: vec![[10.0, 40.0], [70.0, 40.0]],
                },
            ],
        };
        let temp = TempDir::new().unwrap();
        let outcome =
            run_script(&mut engine, &script, &FileSaveConfig::default().with_directory(temp.path()))
                .unwrap();

        assert_eq!(outcome.steps_run, 2);
        assert_eq!(engine.history().len(), 2);
        assert_eq!(engine.committed().pixel(40, 40).unwrap(), [255, 0, 0, 255]);
    }

    #[test]
    fn save_and_exit_requests_are_handled() {
        let mut engine = engine();
        let script = Script::parse(
            r#"
            [[step]]
            op = "drag"
            points = [[5, 5], [60, 60]]

            [[step]]
            op = "key"
            key = "Ctrl+S"

            [[step]]
            op = "save"

            [[step]]
            op = "key"
            key = "Escape"

            [[step]]
            op = "clear"
            "#,
        )
        .unwrap();
        let temp = TempDir::new().unwrap();
        let outcome =
            run_script(&mut engine, &script, &FileSaveConfig::default().with_directory(temp.path()))
                .unwrap();

        assert_eq!(outcome.saved.len(), 2);
        assert!(outcome.saved.iter().all(|path| path.exists()));
        assert!(outcome.exited);
        assert_eq!(outcome.steps_run, 4);
        assert!(!engine.committed().is_transparent().unwrap());
    }

    #[test]
    fn chart_failures_surface_as_notices() {
        let mut engine = engine();
        let script = Script {
            steps: vec![
                Step::Chart { values: vec![] },
                Step::Drag {
                    points: vec![[10.0, 10.0]],
                },
            ],
        };
        let temp = TempDir::new().unwrap();
        let outcome =
            run_script(&mut engine, &script, &FileSaveConfig::default().with_directory(temp.path()))
                .unwrap();

        assert_eq!(outcome.notices.len(), 1);
        assert!(outcome.notices[0].contains("no data points"));
        assert_eq!(engine.tool(), Tool::Freehand);
    }

    #[test]
    fn invalid_steps_report_their_index() {
        let mut engine = engine();
        let script = Script {
            steps: vec![
                Step::Undo,
                Step::Board {
                    mode: "greenboard".into(),
                },
            ],
        };
        let temp = TempDir::new().unwrap();
        let err =
            run_script(&mut engine, &script, &FileSaveConfig::default().with_directory(temp.path()))
                .unwrap_err();
        assert!(matches!(err, ReplayError::InvalidStep { index: 1, .. }));
    }

    #[test]
    fn empty_drag_is_rejected() {
        let mut engine = engine();
        let err = apply_step(&mut engine, &Step::Drag { points: vec![] }, 0).unwrap_err();
        assert!(matches!(err, ReplayError::InvalidStep { index: 0, .. }));
    }
}
