//! Freehand brush stroke.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use crate::geometry::bounds_of_points;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A freehand stroke (polyline through every captured point).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Freehand {
    pub(crate) id: ShapeId,
    /// Points in capture order.
    pub points: Vec<Point>,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Freehand {
    /// Fewest points a stroke needs to be committed.
    pub const MIN_POINTS: usize = 2;

    /// Create from captured points.
    pub fn from_points(points: Vec<Point>, style: ShapeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            style,
        }
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl ShapeTrait for Freehand {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        bounds_of_points(&self.points)
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn translate(&mut self, delta: Vec2) {
        for point in &mut self.points {
            *point += delta;
        }
    }
}
