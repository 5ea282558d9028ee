//! Scripted sessions: an ordered list of pointer, picker and key steps replayed
//! against an [`App`].
//!
//! ```json
//! [
//!   {"tool": "rect"},
//!   {"color": "#ff0000"},
//!   {"down": [10, 10]}, {"move": [60, 40]}, {"up": [60, 40]},
//!   {"key": "z", "ctrl": true},
//!   "redo",
//!   "export"
//! ]
//! ```

use crate::app::App;
use crate::config::parse_color_or_black;
use crate::error::AppError;
use crate::ui::UiAction;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use sketchify_core::input::{Modifiers, MouseButton, PointerEvent};
use sketchify_core::scene::SceneStatus;
use sketchify_core::tools::ToolKind;
use std::path::{Path, PathBuf};

/// A key press with its modifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyPress {
    pub key: String,
    #[serde(flatten)]
    pub modifiers: Modifiers,
}

/// A single non-keyboard step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Tool(ToolKind),
    Color(String),
    Size(f64),
    Sides(u32),
    Down(Point),
    Move(Point),
    Up(Point),
    Undo,
    Redo,
    Clear,
    Export,
}

/// One step of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Step {
    Key(KeyPress),
    Action(Action),
}

/// A parsed session file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Session {
    pub steps: Vec<Step>,
}

impl Session {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path).map_err(|e| AppError::read(path, e))?;
        Self::from_json(&text).map_err(|e| AppError::json(path, e))
    }
}

/// What a replay produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionReport {
    /// Counters after the last step.
    pub status: SceneStatus,
    /// Images written successfully.
    pub exported: Vec<PathBuf>,
    /// Exports that failed (already logged).
    pub failed_exports: usize,
}

/// Replay every step in order, then wait for outstanding exports.
pub fn run_session(app: &mut App, session: &Session) -> SessionReport {
    log::info!("replaying {} step(s)", session.steps.len());
    for step in &session.steps {
        apply_step(app, step);
    }

    let mut report = SessionReport {
        status: app.canvas().status(),
        ..SessionReport::default()
    };
    for result in app.finish_exports() {
        match result {
            Ok(path) => report.exported.push(path),
            Err(_) => report.failed_exports += 1,
        }
    }
    report
}

fn apply_step(app: &mut App, step: &Step) {
    log::trace!("step {step:?}");
    match step {
        Step::Key(press) => {
            app.handle_key(&press.key, press.modifiers);
        }
        Step::Action(action) => {
            let button = MouseButton::Left;
            match action {
                Action::Tool(tool) => {
                    app.apply(UiAction::SetTool(*tool));
                }
                Action::Color(color) => {
                    app.apply(UiAction::SetColor(parse_color_or_black(color)));
                }
                Action::Size(size) => {
                    app.apply(UiAction::SetSize(*size));
                }
                Action::Sides(sides) => {
                    app.apply(UiAction::SetPolygonSides(*sides));
                }
                Action::Down(position) => {
                    app.handle_pointer(PointerEvent::Down {
                        position: *position,
                        button,
                    });
                }
                Action::Move(position) => {
                    app.handle_pointer(PointerEvent::Move {
                        position: *position,
                    });
                }
                Action::Up(position) => {
                    app.handle_pointer(PointerEvent::Up {
                        position: *position,
                        button,
                    });
                }
                Action::Undo => {
                    app.apply(UiAction::Undo);
                }
                Action::Redo => {
                    app.apply(UiAction::Redo);
                }
                Action::Clear => {
                    app.apply(UiAction::ClearCanvas);
                }
                Action::Export => {
                    app.apply(UiAction::ExportPng);
                }
            }
        }
    }
}
