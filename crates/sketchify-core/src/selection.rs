//! Group selection over the scene.
//!
//! A selection only stores shape ids; the shapes themselves stay owned by the
//! [`Scene`]. Ids whose shape has left the scene are skipped.

use crate::geometry::{point_in_box, rects_intersect, union_boxes, DragRect};
use crate::scene::Scene;
use crate::shapes::ShapeId;
use kurbo::{Point, Rect, Vec2};

/// The set of currently selected shapes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    ids: Vec<ShapeId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids of every shape whose box overlaps `drag`, in paint order.
    pub fn shapes_within(scene: &Scene, drag: &DragRect) -> Vec<ShapeId> {
        scene
            .shapes()
            .iter()
            .filter(|shape| rects_intersect(shape.bounds(), Some(drag)))
            .map(|shape| shape.id())
            .collect()
    }

    /// Replace the selection with the shapes overlapping `drag`.
    pub fn select_within(&mut self, scene: &Scene, drag: &DragRect) {
        self.ids = Self::shapes_within(scene, drag);
    }

    pub fn set(&mut self, ids: Vec<ShapeId>) {
        self.ids = ids;
    }

    pub fn ids(&self) -> &[ShapeId] {
        &self.ids
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.ids.contains(&id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Union of the selected shapes' boxes, `None` when nothing selected is on the canvas.
    pub fn aggregate_box(&self, scene: &Scene) -> Option<Rect> {
        union_boxes(
            self.ids
                .iter()
                .filter_map(|&id| scene.get_shape(id))
                .map(|shape| shape.bounds()),
        )
    }

    /// Whether `point` falls inside the aggregate box.
    pub fn hit_test(&self, scene: &Scene, point: Point) -> bool {
        self.aggregate_box(scene)
            .is_some_and(|bounds| point_in_box(point, bounds))
    }

    /// Translate every selected shape by `delta`.
    pub fn move_by(&self, scene: &mut Scene, delta: Vec2) {
        for &id in &self.ids {
            if let Some(shape) = scene.get_shape_mut(id) {
                shape.translate(delta);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Freehand, Shape, ShapeKind, ShapeStyle};

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Shape {
        Shape::create(
            ShapeKind::Rectangle,
            Point::new(x0, y0),
            Point::new(x1, y1),
            ShapeStyle::default(),
            5,
        )
    }

    fn drag(from: Point, to: Point) -> DragRect {
        let mut drag = DragRect::new(from);
        drag.resize_to(to);
        drag
    }

    /// A at the top left, B far away, C at the bottom left.
    fn scene_abc() -> (Scene, Shape, Shape, Shape) {
        let a = rect(10.0, 10.0, 50.0, 50.0);
        let b = rect(400.0, 10.0, 450.0, 50.0);
        let c = rect(20.0, 200.0, 60.0, 260.0);
        let mut scene = Scene::new();
        for shape in [&a, &b, &c] {
            scene.commit(shape.clone());
        }
        (scene, a, b, c)
    }

    #[test]
    fn test_select_within() {
        let (scene, a, _b, c) = scene_abc();
        let mut selection = Selection::new();
        // Dragged bottom-right to top-left.
        selection.select_within(&scene, &drag(Point::new(100.0, 300.0), Point::new(0.0, 0.0)));
        assert_eq!(selection.ids(), &[a.id(), c.id()]);

        let expected = a.bounds().union(c.bounds());
        assert_eq!(selection.aggregate_box(&scene), Some(expected));
        assert_eq!(expected, Rect::new(10.0, 10.0, 60.0, 260.0));
    }

    #[test]
    fn test_empty_selection_has_no_box() {
        let (scene, ..) = scene_abc();
        let selection = Selection::new();
        assert_eq!(selection.aggregate_box(&scene), None);
        assert!(!selection.hit_test(&scene, Point::new(20.0, 20.0)));
    }

    #[test]
    fn test_hit_test_uses_aggregate_box() {
        let (scene, a, _b, c) = scene_abc();
        let mut selection = Selection::new();
        selection.set(vec![a.id(), c.id()]);
        // Between A and C, inside neither but inside their union.
        assert!(selection.hit_test(&scene, Point::new(30.0, 120.0)));
        assert!(!selection.hit_test(&scene, Point::new(420.0, 30.0)));
    }

    #[test]
    fn test_move_by_translates_members_only() {
        let (mut scene, a, b, c) = scene_abc();
        let mut selection = Selection::new();
        selection.set(vec![a.id(), c.id()]);
        let delta = Vec2::new(5.0, -3.0);
        selection.move_by(&mut scene, delta);

        let bounds = |id| scene.get_shape(id).map(Shape::bounds);
        assert_eq!(bounds(a.id()), Some(a.bounds() + delta));
        assert_eq!(bounds(b.id()), Some(b.bounds()));
        assert_eq!(bounds(c.id()), Some(c.bounds() + delta));
    }

    #[test]
    fn test_move_freehand() {
        let stroke = Shape::Freehand(Freehand::from_points(
            vec![Point::new(0.0, 0.0), Point::new(4.0, 8.0)],
            ShapeStyle::default(),
        ));
        let mut scene = Scene::new();
        scene.commit(stroke.clone());
        let mut selection = Selection::new();
        selection.select_within(&scene, &drag(Point::new(-1.0, -1.0), Point::new(1.0, 1.0)));
        assert!(selection.contains(stroke.id()));

        selection.move_by(&mut scene, Vec2::new(10.0, 10.0));
        assert_eq!(
            scene.get_shape(stroke.id()).map(Shape::bounds),
            Some(Rect::new(10.0, 10.0, 14.0, 18.0))
        );
    }

    #[test]
    fn test_ids_of_removed_shapes_are_skipped() {
        let (mut scene, a, _b, c) = scene_abc();
        let mut selection = Selection::new();
        selection.set(vec![a.id(), c.id()]);
        scene.undo();
        assert_eq!(selection.aggregate_box(&scene), Some(a.bounds()));
    }
}
