//! Rectangle shape.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An axis-aligned rectangle spanned by two opposite corners.
///
/// The corners are kept in drag order; they need not be top-left/bottom-right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    /// Corner where the drag started.
    pub start: Point,
    /// Opposite corner.
    pub end: Point,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Rectangle {
    /// Create a rectangle from two corner points.
    pub fn new(start: Point, end: Point, style: ShapeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            style,
        }
    }

    /// Outline corners, starting at `start` and walking horizontally first.
    pub fn corners(&self) -> [Point; 4] {
        [
            self.start,
            Point::new(self.end.x, self.start.y),
            self.end,
            Point::new(self.start.x, self.end.y),
        ]
    }
}

impl ShapeTrait for Rectangle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn translate(&mut self, delta: Vec2) {
        self.start += delta;
        self.end += delta;
    }
}
