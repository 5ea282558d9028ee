//! Isosceles triangle shape.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A triangle inscribed in the box spanned by `start` and `end`.
///
/// The apex sits at the horizontal midpoint on `start.y`; the base runs along `end.y`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub(crate) id: ShapeId,
    pub start: Point,
    pub end: Point,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Triangle {
    pub fn new(start: Point, end: Point, style: ShapeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            style,
        }
    }

    /// Vertices in stroke order: base-left, apex, base-right.
    pub fn vertices(&self) -> [Point; 3] {
        [
            Point::new(self.start.x, self.end.y),
            Point::new((self.start.x + self.end.x) / 2.0, self.start.y),
            Point::new(self.end.x, self.end.y),
        ]
    }
}

impl ShapeTrait for Triangle {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertices() {
        let tri = Triangle::new(Point::new(0.0, 0.0), Point::new(100.0, 80.0), ShapeStyle::default());
        assert_eq!(
            tri.vertices(),
            [
                Point::new(0.0, 80.0),
                Point::new(50.0, 0.0),
                Point::new(100.0, 80.0),
            ]
        );
    }

    #[test]
    fn test_upside_down_drag_keeps_normalized_bounds() {
        let tri = Triangle::new(Point::new(100.0, 80.0), Point::new(0.0, 0.0), ShapeStyle::default());
        assert_eq!(tri.bounds(), Rect::new(0.0, 0.0, 100.0, 80.0));
        // Apex now points down.
        assert_eq!(tri.vertices()[1], Point::new(50.0, 80.0));
    }
}
