//! Application shell: owns the editor state and drives redraws, actions and exports.

use crate::config::AppConfig;
use crate::error::AppError;
use crate::export::{spawn_export, ExportHandle, ExportRequest};
use crate::shortcuts::ShortcutRegistry;
use crate::ui::{status_line, UiAction};
use chrono::Utc;
use kurbo::Size;
use sketchify_core::canvas::Canvas;
use sketchify_core::controller::{Controller, EventOutcome};
use sketchify_core::input::{Modifiers, PointerEvent};
use sketchify_render::{
    build_file_name, export_stem, ExportError, RasterSurface, RenderContext, Renderer,
};
use std::path::PathBuf;

/// Callback asked before destructive actions; returns true to proceed.
pub type ConfirmFn = Box<dyn FnMut(&str) -> bool>;

/// Main application struct.
pub struct App {
    config: AppConfig,
    canvas: Canvas,
    controller: Controller,
    surface: RasterSurface,
    confirm: ConfirmFn,
    exports: Vec<ExportHandle>,
    completed: Vec<Result<PathBuf, ExportError>>,
}

impl App {
    /// Create an application with the given configuration. Clearing is declined
    /// until a confirmation callback is installed.
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        let surface = RasterSurface::new(config.width, config.height)?;
        let canvas = Canvas::with_tools(config.tool_settings());
        let mut app = Self {
            config,
            canvas,
            controller: Controller::new(),
            surface,
            confirm: Box::new(|_| false),
            exports: Vec::new(),
            completed: Vec::new(),
        };
        app.redraw();
        Ok(app)
    }

    /// Install the callback used to confirm clearing the canvas.
    pub fn with_confirmation(mut self, confirm: impl FnMut(&str) -> bool + 'static) -> Self {
        self.confirm = Box::new(confirm);
        self
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The on-screen raster, as of the last redraw.
    pub fn surface(&self) -> &RasterSurface {
        &self.surface
    }

    /// Feed a pointer event through the gesture controller.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> EventOutcome {
        let outcome = self.controller.handle_event(&mut self.canvas, event);
        self.after(outcome);
        outcome
    }

    /// Handle a key press. Returns false when the key is not bound.
    pub fn handle_key(&mut self, key: &str, modifiers: Modifiers) -> bool {
        match ShortcutRegistry::lookup(key, modifiers) {
            Some(action) => {
                self.apply(action);
                true
            }
            None => {
                log::trace!("unbound key {key}");
                false
            }
        }
    }

    /// Apply a picker, button or shortcut action.
    pub fn apply(&mut self, action: UiAction) -> EventOutcome {
        let outcome = match action {
            UiAction::SetTool(tool) => self.controller.set_tool(&mut self.canvas, tool),
            UiAction::SetColor(color) => {
                self.canvas.tools.set_color(color);
                EventOutcome::Ignored
            }
            UiAction::SetSize(size) => {
                self.canvas.tools.set_size(size);
                EventOutcome::Ignored
            }
            UiAction::SetPolygonSides(sides) => {
                self.canvas.tools.set_polygon_sides(sides);
                EventOutcome::Ignored
            }
            UiAction::Undo => {
                if self.canvas.undo() {
                    log::info!("Undo performed");
                    EventOutcome::Committed
                } else {
                    log::info!("Nothing to undo");
                    EventOutcome::Ignored
                }
            }
            UiAction::Redo => {
                if self.canvas.redo() {
                    log::info!("Redo performed");
                    EventOutcome::Committed
                } else {
                    log::info!("Nothing to redo");
                    EventOutcome::Ignored
                }
            }
            UiAction::ClearCanvas => {
                let confirm = &mut self.confirm;
                if self.canvas.clear_all(|prompt| confirm(prompt)) {
                    EventOutcome::Committed
                } else {
                    EventOutcome::Ignored
                }
            }
            UiAction::ExportPng => {
                self.start_export();
                EventOutcome::Ignored
            }
        };
        self.after(outcome);
        outcome
    }

    /// Start exporting the current scene in the background.
    ///
    /// Exports sharing a timestamp get a numeric suffix so none overwrites another.
    pub fn start_export(&mut self) -> PathBuf {
        self.reap_finished_exports();
        let stem = export_stem(&self.config.export_prefix, &Utc::now());
        let path = self.unused_export_path(&stem);
        let handle = spawn_export(ExportRequest {
            shapes: self.canvas.scene.snapshot(),
            width: self.config.width,
            height: self.config.height,
            path: path.clone(),
        });
        self.exports.push(handle);
        path
    }

    /// Wait for every export started so far, in the order they were started.
    pub fn finish_exports(&mut self) -> Vec<Result<PathBuf, ExportError>> {
        let mut results = std::mem::take(&mut self.completed);
        results.extend(self.exports.drain(..).map(ExportHandle::wait));
        results
    }

    /// Join workers that are already done, keeping their results for `finish_exports`.
    fn reap_finished_exports(&mut self) {
        let (finished, running): (Vec<_>, Vec<_>) = std::mem::take(&mut self.exports)
            .into_iter()
            .partition(ExportHandle::is_finished);
        self.exports = running;
        self.completed.extend(finished.into_iter().map(ExportHandle::wait));
    }

    /// First `stem` file name that is neither on disk nor targeted by a running export.
    fn unused_export_path(&self, stem: &str) -> PathBuf {
        let mut suffix = 0;
        loop {
            let path = self.config.export_dir.join(build_file_name(stem, suffix));
            let pending = self.exports.iter().any(|handle| handle.path() == &path);
            if !pending && !path.exists() {
                return path;
            }
            suffix += 1;
        }
    }

    /// Redraw the scene and the active gesture onto the surface.
    pub fn redraw(&mut self) {
        let size = Size::new(self.config.width as f64, self.config.height as f64);
        let ctx = RenderContext::new(&self.canvas, size).with_gesture(self.controller.state());
        self.surface.redraw(&ctx);
    }

    pub fn status_line(&self) -> String {
        status_line(&self.canvas.status())
    }

    fn after(&mut self, outcome: EventOutcome) {
        if outcome.needs_redraw() {
            self.redraw();
        }
        if outcome == EventOutcome::Committed {
            log::info!("{}", self.status_line());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use sketchify_core::input::MouseButton;
    use sketchify_core::tools::ToolKind;
    use std::cell::Cell;
    use std::rc::Rc;

    fn small_config() -> AppConfig {
        AppConfig {
            width: 64,
            height: 48,
            ..AppConfig::default()
        }
    }

    fn stroke(app: &mut App, from: Point, to: Point) {
        app.handle_pointer(PointerEvent::Down {
            position: from,
            button: MouseButton::Left,
        });
        app.handle_pointer(PointerEvent::Move { position: to });
        app.handle_pointer(PointerEvent::Up {
            position: to,
            button: MouseButton::Left,
        });
    }

    #[test]
    fn test_drawing_updates_surface() {
        let mut app = App::new(small_config()).unwrap();
        assert!(app.surface().image().pixels().all(|p| p.0[3] == 0));

        stroke(&mut app, Point::new(5.0, 10.0), Point::new(50.0, 10.0));
        assert_eq!(app.status_line(), "shapes: 1 | undo: 1 | redo: 0");
        assert_eq!(app.surface().image().get_pixel(20, 10).0[3], 255);
    }

    #[test]
    fn test_keyboard_undo_redo() {
        let mut app = App::new(small_config()).unwrap();
        app.apply(UiAction::SetTool(ToolKind::Line));
        stroke(&mut app, Point::new(5.0, 5.0), Point::new(40.0, 40.0));

        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::default()
        };
        assert!(app.handle_key("z", ctrl));
        assert_eq!(app.status_line(), "shapes: 0 | undo: 0 | redo: 1");
        assert_eq!(app.surface().image().get_pixel(20, 20).0[3], 0);

        assert!(app.handle_key("y", ctrl));
        assert_eq!(app.canvas().scene.len(), 1);
        assert!(!app.handle_key("q", ctrl));
    }

    #[test]
    fn test_clear_asks_for_confirmation() {
        let asked = Rc::new(Cell::new(0));
        let counter = Rc::clone(&asked);
        let mut app = App::new(small_config()).unwrap().with_confirmation(move |_| {
            counter.set(counter.get() + 1);
            counter.get() > 1
        });
        stroke(&mut app, Point::new(1.0, 1.0), Point::new(9.0, 9.0));

        assert_eq!(app.apply(UiAction::ClearCanvas), EventOutcome::Ignored);
        assert_eq!(app.canvas().scene.len(), 1);
        assert_eq!(app.apply(UiAction::ClearCanvas), EventOutcome::Committed);
        assert!(app.canvas().scene.is_empty());
        assert_eq!(asked.get(), 2);
    }

    #[test]
    fn test_export_uses_snapshot_at_request_time() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            export_dir: dir.path().to_path_buf(),
            ..small_config()
        };
        let mut app = App::new(config).unwrap();
        stroke(&mut app, Point::new(5.0, 10.0), Point::new(50.0, 10.0));

        let path = app.start_export();
        // Drawn after the request; must not appear in the file.
        stroke(&mut app, Point::new(5.0, 40.0), Point::new(50.0, 40.0));

        let results = app.finish_exports();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].as_ref().ok(), Some(&path));
        let name = path.file_name().and_then(|n| n.to_str()).unwrap();
        assert!(name.starts_with("sketchify-") && name.ends_with(".png"));
        assert!(path.exists());
        assert_eq!(app.canvas().scene.len(), 2);
    }

    #[test]
    fn test_back_to_back_exports_get_distinct_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            export_dir: dir.path().to_path_buf(),
            ..small_config()
        };
        let mut app = App::new(config).unwrap();
        stroke(&mut app, Point::new(5.0, 10.0), Point::new(50.0, 10.0));
        let first = app.start_export();
        stroke(&mut app, Point::new(5.0, 40.0), Point::new(50.0, 40.0));
        let second = app.start_export();
        assert_ne!(first, second);

        let results = app.finish_exports();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(Result::is_ok));
        let files = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(files, 2);
        assert_ne!(
            std::fs::read(&first).unwrap(),
            std::fs::read(&second).unwrap()
        );
    }

    #[test]
    fn test_existing_file_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            export_dir: dir.path().to_path_buf(),
            ..small_config()
        };
        let mut app = App::new(config).unwrap();
        let stem = "sketchify-2024-05-01T13-45-09";
        std::fs::write(dir.path().join(build_file_name(stem, 0)), b"keep").unwrap();

        let path = app.unused_export_path(stem);
        assert_eq!(path, dir.path().join("sketchify-2024-05-01T13-45-09-1.png"));
    }

    #[test]
    fn test_finished_exports_are_reaped() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            export_dir: dir.path().to_path_buf(),
            ..small_config()
        };
        let mut app = App::new(config).unwrap();
        let first = app.start_export();
        for _ in 0..500 {
            if app.exports.iter().all(ExportHandle::is_finished) {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(10));
        }

        let second = app.start_export();
        assert_eq!(app.exports.len(), 1);
        assert_eq!(app.completed.len(), 1);

        let results: Vec<_> = app
            .finish_exports()
            .into_iter()
            .map(Result::unwrap)
            .collect();
        assert_eq!(results, vec![first, second]);
    }
}
