//! Proximity erasing.
//!
//! The eraser removes whole shapes whose bounding box comes within reach of the
//! pointer. It never splits a stroke.

use crate::geometry::distance_to_box;
use crate::shapes::Shape;
use kurbo::Point;

/// Eraser reach per unit of brush size.
pub const ERASER_SCALE: f64 = 2.0;

/// Reach of the eraser for a given brush size.
pub fn eraser_radius(size: f64) -> f64 {
    size * ERASER_SCALE
}

/// Whether `shape` is close enough to `point` to be erased.
pub fn is_within_reach(shape: &Shape, point: Point, radius: f64) -> bool {
    distance_to_box(point, shape.bounds()) <= radius
}

/// Split `shapes` into the ones that survive and the ones erased, preserving order in both.
pub fn partition(shapes: Vec<Shape>, point: Point, radius: f64) -> (Vec<Shape>, Vec<Shape>) {
    shapes
        .into_iter()
        .partition(|shape| !is_within_reach(shape, point, radius))
}
