//! Editor state owned by the host: the scene, the selection and the pickers.

use crate::geometry::DragRect;
use crate::scene::{Scene, SceneStatus};
use crate::selection::Selection;
use crate::shapes::{Freehand, Shape};
use crate::tools::{ToolKind, ToolSettings};
use kurbo::Point;

/// Question asked before the canvas is wiped.
pub const CLEAR_CONFIRMATION_PROMPT: &str =
    "Are you sure you want to clear the entire canvas? This cannot be undone.";

/// Everything the drawing surface edits.
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    /// Committed shapes and undo history.
    pub scene: Scene,
    /// Currently selected shapes.
    pub selection: Selection,
    /// Tool and style pickers.
    pub tools: ToolSettings,
}

impl Canvas {
    /// Create a new empty canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a canvas with the given picker values.
    pub fn with_tools(tools: ToolSettings) -> Self {
        Self {
            tools,
            ..Self::default()
        }
    }

    pub fn current_tool(&self) -> ToolKind {
        self.tools.current_tool
    }

    /// Place a finished shape.
    pub fn commit(&mut self, shape: Shape) {
        self.scene.commit(shape);
    }

    /// Place a brush stroke stamped with the current style.
    ///
    /// Strokes with fewer than [`Freehand::MIN_POINTS`] points are dropped; returns
    /// whether the stroke was kept.
    pub fn commit_freehand(&mut self, points: Vec<Point>) -> bool {
        if points.len() < Freehand::MIN_POINTS {
            log::trace!("discarding freehand stroke with {} point(s)", points.len());
            return false;
        }
        let stroke = Freehand::from_points(points, self.tools.style.clone());
        self.commit(Shape::Freehand(stroke));
        true
    }

    /// Undo the last placement. Returns true if anything changed.
    pub fn undo(&mut self) -> bool {
        let changed = self.scene.undo().is_some();
        if changed {
            self.selection.clear();
        }
        changed
    }

    /// Redo the last undone placement. Returns true if anything changed.
    pub fn redo(&mut self) -> bool {
        let changed = self.scene.redo().is_some();
        if changed {
            self.selection.clear();
        }
        changed
    }

    /// Erase around `point` with the current eraser reach.
    /// Returns the number of shapes removed.
    pub fn erase_at(&mut self, point: Point) -> usize {
        let radius = self.tools.eraser_radius();
        let removed = self.scene.erase_near(point, radius).len();
        if removed > 0 {
            self.selection.clear();
        }
        removed
    }

    /// Wipe the scene, the history and the selection once `confirm` agrees.
    ///
    /// `confirm` receives [`CLEAR_CONFIRMATION_PROMPT`]. Declining leaves everything
    /// untouched. Returns whether the canvas was cleared.
    pub fn clear_all(&mut self, confirm: impl FnOnce(&str) -> bool) -> bool {
        if !confirm(CLEAR_CONFIRMATION_PROMPT) {
            log::debug!("clear declined");
            return false;
        }
        self.scene.clear_all();
        self.selection.clear();
        log::debug!("canvas cleared");
        true
    }

    /// Replace the selection with the shapes under `drag`.
    pub fn select_within(&mut self, drag: &DragRect) {
        self.selection.select_within(&self.scene, drag);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn status(&self) -> SceneStatus {
        self.scene.status()
    }
}
