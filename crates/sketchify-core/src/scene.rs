//! The ordered shape log and its linear undo history.

use crate::eraser;
use crate::shapes::{Shape, ShapeId};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Counters shown in the status line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneStatus {
    /// Shapes currently on the canvas.
    pub shape_count: usize,
    /// Steps that can be undone (one per placed shape).
    pub undo_count: usize,
    /// Steps that can be redone.
    pub redo_count: usize,
}

/// Committed shapes in paint order plus the stack of undone ones.
///
/// A shape lives in exactly one of the two sequences. Erasing bypasses the
/// history entirely: erased shapes are dropped, not pushed onto `undone`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    shapes: Vec<Shape>,
    undone: Vec<Shape>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finished shape. Placing anything new forgets the redo history.
    pub fn commit(&mut self, shape: Shape) {
        log::debug!("commit {} {}", shape.kind_name(), shape.id());
        self.shapes.push(shape);
        self.undone.clear();
    }

    /// Move the most recent shape onto the undone stack.
    /// Returns the shape that was undone, or `None` if the scene was empty.
    pub fn undo(&mut self) -> Option<&Shape> {
        let shape = self.shapes.pop()?;
        log::debug!("undo {} {}", shape.kind_name(), shape.id());
        self.undone.push(shape);
        self.undone.last()
    }

    /// Move the most recently undone shape back on top of the scene.
    /// Returns the restored shape, or `None` if there was nothing to redo.
    pub fn redo(&mut self) -> Option<&Shape> {
        let shape = self.undone.pop()?;
        log::debug!("redo {} {}", shape.kind_name(), shape.id());
        self.shapes.push(shape);
        self.shapes.last()
    }

    /// Drop the redo history.
    pub fn clear_redo(&mut self) {
        self.undone.clear();
    }

    /// Discard every shape and the whole history.
    pub fn clear_all(&mut self) {
        self.shapes.clear();
        self.undone.clear();
    }

    /// Remove every shape whose box is within `radius` of `point`.
    ///
    /// Returns the removed shapes in paint order. The undone stack is untouched.
    pub fn erase_near(&mut self, point: Point, radius: f64) -> Vec<Shape> {
        let shapes = std::mem::take(&mut self.shapes);
        let (kept, erased) = eraser::partition(shapes, point, radius);
        self.shapes = kept;
        if !erased.is_empty() {
            log::debug!("erased {} shape(s) near {:?}", erased.len(), point);
        }
        erased
    }

    /// Shapes in paint order (back to front).
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Undone shapes, most recent last.
    pub fn undone(&self) -> &[Shape] {
        &self.undone
    }

    /// Get a shape by ID.
    pub fn get_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|shape| shape.id() == id)
    }

    /// Get a mutable reference to a shape by ID.
    pub fn get_shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|shape| shape.id() == id)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.shapes.is_empty()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    /// Owned copy of the shapes, detached from later edits.
    pub fn snapshot(&self) -> Vec<Shape> {
        self.shapes.clone()
    }

    pub fn status(&self) -> SceneStatus {
        SceneStatus {
            shape_count: self.shapes.len(),
            undo_count: self.shapes.len(),
            redo_count: self.undone.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{ShapeKind, ShapeStyle};

    fn line(x: f64) -> Shape {
        Shape::create(
            ShapeKind::Line,
            Point::new(x, 0.0),
            Point::new(x + 10.0, 10.0),
            ShapeStyle::default(),
            5,
        )
    }

    fn ids(shapes: &[Shape]) -> Vec<ShapeId> {
        shapes.iter().map(Shape::id).collect()
    }

    #[test]
    fn test_undo_redo_sequence() {
        let (a, b, c) = (line(0.0), line(100.0), line(200.0));
        let mut scene = Scene::new();
        scene.commit(a.clone());
        scene.commit(b.clone());
        scene.commit(c.clone());

        assert_eq!(scene.undo().map(Shape::id), Some(c.id()));
        assert_eq!(ids(scene.shapes()), vec![a.id(), b.id()]);
        assert_eq!(ids(scene.undone()), vec![c.id()]);

        assert_eq!(scene.redo().map(Shape::id), Some(c.id()));
        assert_eq!(ids(scene.shapes()), vec![a.id(), b.id(), c.id()]);
        assert!(scene.undone().is_empty());
    }

    #[test]
    fn test_commit_after_undo_clears_redo() {
        let (a, b, c, d) = (line(0.0), line(100.0), line(200.0), line(300.0));
        let mut scene = Scene::new();
        for shape in [&a, &b, &c] {
            scene.commit(shape.clone());
        }
        scene.undo();
        scene.commit(d.clone());

        assert_eq!(ids(scene.shapes()), vec![a.id(), b.id(), d.id()]);
        assert!(!scene.can_redo());
    }

    #[test]
    fn test_undo_redo_empty_are_noops() {
        let mut scene = Scene::new();
        assert!(scene.undo().is_none());
        assert!(scene.redo().is_none());
        assert_eq!(scene.status(), SceneStatus::default());
    }

    #[test]
    fn test_erase_is_not_undoable() {
        let (a, b) = (line(0.0), line(100.0));
        let mut scene = Scene::new();
        scene.commit(a.clone());
        scene.commit(b.clone());

        let erased = scene.erase_near(Point::new(105.0, 5.0), 6.0);
        assert_eq!(ids(&erased), vec![b.id()]);
        assert!(scene.undone().is_empty());

        // Undo now takes back the earlier placement, not the erase.
        assert_eq!(scene.undo().map(Shape::id), Some(a.id()));
        assert!(scene.is_empty());
        assert_eq!(ids(scene.undone()), vec![a.id()]);
    }

    #[test]
    fn test_erase_removes_exactly_shapes_in_reach() {
        let mut scene = Scene::new();
        let shapes: Vec<Shape> = (0..6).map(|i| line(i as f64 * 30.0)).collect();
        for shape in &shapes {
            scene.commit(shape.clone());
        }
        let point = Point::new(75.0, 20.0);
        let size = 3.0;
        let radius = eraser::eraser_radius(size);
        let expected: Vec<ShapeId> = shapes
            .iter()
            .filter(|s| eraser::is_within_reach(s, point, radius))
            .map(Shape::id)
            .collect();

        let erased = scene.erase_near(point, radius);
        assert_eq!(ids(&erased), expected);
        assert_eq!(scene.len() + erased.len(), shapes.len());
        for shape in scene.shapes() {
            assert!(!eraser::is_within_reach(shape, point, radius));
        }
    }

    #[test]
    fn test_status_counts() {
        let mut scene = Scene::new();
        scene.commit(line(0.0));
        scene.commit(line(50.0));
        scene.undo();
        assert_eq!(
            scene.status(),
            SceneStatus {
                shape_count: 1,
                undo_count: 1,
                redo_count: 1,
            }
        );
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut scene = Scene::new();
        scene.commit(line(0.0));
        let snapshot = scene.snapshot();
        scene.commit(line(40.0));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn test_clear_all() {
        let mut scene = Scene::new();
        scene.commit(line(0.0));
        scene.commit(line(50.0));
        scene.undo();
        scene.clear_all();
        assert!(scene.is_empty());
        assert!(!scene.can_redo());
    }
}
