//! Sketchify application shell.
//!
//! Wires the core editor state and the renderer together behind a small host:
//! configuration, keyboard shortcuts, scripted session replay and background
//! PNG export.

mod app;
pub mod config;
mod error;
pub mod export;
pub mod session;
pub mod shortcuts;
pub mod ui;

pub use app::{App, ConfirmFn};
pub use config::AppConfig;
pub use error::AppError;
pub use session::{run_session, Session, SessionReport};
pub use shortcuts::ShortcutRegistry;
pub use ui::UiAction;
