//! Actions coming from the tool pickers, buttons and shortcuts, plus the status line.

use sketchify_core::scene::SceneStatus;
use sketchify_core::shapes::SerializableColor;
use sketchify_core::tools::ToolKind;

/// Actions that can be triggered outside of pointer gestures.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    /// Change the current tool.
    SetTool(ToolKind),
    /// Change stroke color.
    SetColor(SerializableColor),
    /// Change stroke width (also scales the eraser).
    SetSize(f64),
    /// Change the side count of new polygons.
    SetPolygonSides(u32),
    Undo,
    Redo,
    /// Clear everything after confirmation.
    ClearCanvas,
    /// Export the canvas as a PNG file.
    ExportPng,
}

/// Render the info panel counters as one line.
pub fn status_line(status: &SceneStatus) -> String {
    format!(
        "shapes: {} | undo: {} | redo: {}",
        status.shape_count, status.undo_count, status.redo_count
    )
}
