//! Sketchify Core Library
//!
//! Platform-agnostic data structures and logic for the Sketchify drawing surface:
//! shapes and their geometry, the ordered scene with its undo history, selection,
//! erasing and the pointer-driven interaction state machine.

pub mod canvas;
pub mod controller;
pub mod eraser;
pub mod geometry;
pub mod input;
pub mod scene;
pub mod selection;
pub mod shapes;
pub mod tools;

pub use canvas::{Canvas, CLEAR_CONFIRMATION_PROMPT};
pub use controller::{Controller, EventOutcome, GestureState};
pub use geometry::DragRect;
pub use input::{Modifiers, MouseButton, PointerEvent};
pub use scene::{Scene, SceneStatus};
pub use selection::Selection;
pub use shapes::{Shape, ShapeId, ShapeKind, ShapeStyle};
pub use tools::{ToolKind, ToolSettings};
