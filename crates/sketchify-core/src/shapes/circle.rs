//! Circle shape.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A circle defined by its center and a point on its rim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub(crate) id: ShapeId,
    /// Center point.
    pub center: Point,
    /// Any point on the circumference; the radius is its distance to the center.
    pub radius_point: Point,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Circle {
    /// Create a new circle.
    pub fn new(center: Point, radius_point: Point, style: ShapeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            radius_point,
            style,
        }
    }

    /// Euclidean distance from the center to the rim point.
    pub fn radius(&self) -> f64 {
        (self.radius_point - self.center).hypot()
    }
}

impl ShapeTrait for Circle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let r = self.radius();
        Rect::new(
            self.center.x - r,
            self.center.y - r,
            self.center.x + r,
            self.center.y + r,
        )
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn translate(&mut self, delta: Vec2) {
        self.center += delta;
        self.radius_point += delta;
    }
}
