//! Regular polygon shape.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, TAU};
use uuid::Uuid;

/// A regular polygon around `center` whose first vertex points straight up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub(crate) id: ShapeId,
    /// Center point.
    pub center: Point,
    /// Point whose distance to the center is the circumradius.
    pub radius_point: Point,
    /// Number of sides, always within `MIN_SIDES..=MAX_SIDES`.
    pub sides: u32,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Polygon {
    pub const MIN_SIDES: u32 = 3;
    pub const MAX_SIDES: u32 = 12;
    pub const DEFAULT_SIDES: u32 = 5;

    /// Create a polygon; out-of-range side counts are clamped.
    pub fn new(center: Point, radius_point: Point, sides: u32, style: ShapeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            radius_point,
            sides: Self::clamp_sides(sides),
            style,
        }
    }

    /// Clamp a requested side count into the supported range.
    pub fn clamp_sides(sides: u32) -> u32 {
        sides.clamp(Self::MIN_SIDES, Self::MAX_SIDES)
    }

    pub fn radius(&self) -> f64 {
        (self.radius_point - self.center).hypot()
    }

    /// Vertices, evenly spaced from -90 degrees going clockwise on screen.
    pub fn vertices(&self) -> Vec<Point> {
        let r = self.radius();
        let step = TAU / self.sides as f64;
        (0..self.sides)
            .map(|i| {
                let angle = -FRAC_PI_2 + step * i as f64;
                Point::new(
                    self.center.x + r * angle.cos(),
                    self.center.y + r * angle.sin(),
                )
            })
            .collect()
    }
}

impl ShapeTrait for Polygon {
    fn id(&self) -> ShapeId {
        self.id
    }

    // Spanned by the two stored points, not by the vertices.
    fn bounds(&self) -> Rect {
        Rect::from_points(self.center, self.radius_point)
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn translate(&mut self, delta: Vec2) {
        self.center += delta;
        self.radius_point += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_point_near(actual: Point, expected: Point) {
        assert!(
            (actual - expected).hypot() < 1e-9,
            "{actual:?} != {expected:?}"
        );
    }

    #[test]
    fn test_square_vertices_start_at_top() {
        let square = Polygon::new(
            Point::new(100.0, 100.0),
            Point::new(150.0, 100.0),
            4,
            ShapeStyle::default(),
        );
        let vertices = square.vertices();
        assert_eq!(vertices.len(), 4);
        assert_point_near(vertices[0], Point::new(100.0, 50.0));
        assert_point_near(vertices[1], Point::new(150.0, 100.0));
        assert_point_near(vertices[2], Point::new(100.0, 150.0));
        assert_point_near(vertices[3], Point::new(50.0, 100.0));
    }

    #[test]
    fn test_sides_are_clamped() {
        let style = ShapeStyle::default();
        let few = Polygon::new(Point::ZERO, Point::new(1.0, 0.0), 1, style.clone());
        let many = Polygon::new(Point::ZERO, Point::new(1.0, 0.0), 40, style);
        assert_eq!(few.sides, Polygon::MIN_SIDES);
        assert_eq!(many.sides, Polygon::MAX_SIDES);
        assert_eq!(many.vertices().len(), 12);
    }

    #[test]
    fn test_bounds_span_center_and_radius_point() {
        let poly = Polygon::new(
            Point::new(100.0, 100.0),
            Point::new(60.0, 130.0),
            5,
            ShapeStyle::default(),
        );
        assert_eq!(poly.bounds(), Rect::new(60.0, 100.0, 100.0, 130.0));
    }
}
