//! Axis-aligned box math shared by selection, erasing and rendering.
//!
//! Boxes are `kurbo::Rect`s kept normalized (`x0 <= x1`, `y0 <= y1`). Every test
//! here is inclusive on all edges, unlike `Rect::contains`.

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A rubber-band rectangle dragged out by the select tool.
///
/// Width and height are signed: dragging up or left of the origin yields negative
/// extents. Use [`DragRect::normalized`] before testing against it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragRect {
    /// Point where the drag started.
    pub origin: Point,
    /// Signed horizontal extent.
    pub width: f64,
    /// Signed vertical extent.
    pub height: f64,
}

impl DragRect {
    /// Start a zero-size drag at `origin`.
    pub fn new(origin: Point) -> Self {
        Self {
            origin,
            width: 0.0,
            height: 0.0,
        }
    }

    /// Stretch the far corner to `point`.
    pub fn resize_to(&mut self, point: Point) {
        self.width = point.x - self.origin.x;
        self.height = point.y - self.origin.y;
    }

    /// The far corner of the drag (origin plus signed extents).
    pub fn corner(&self) -> Point {
        self.origin + Vec2::new(self.width, self.height)
    }

    /// The drag as a normalized box.
    pub fn normalized(&self) -> Rect {
        Rect::from_points(self.origin, self.corner())
    }
}

/// Minimal box enclosing all `points`, or the zero box at the origin when empty.
pub fn bounds_of_points(points: &[Point]) -> Rect {
    if points.is_empty() {
        return Rect::ZERO;
    }

    let mut min_x = f64::MAX;
    let mut min_y = f64::MAX;
    let mut max_x = f64::MIN;
    let mut max_y = f64::MIN;

    for point in points {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }

    Rect::new(min_x, min_y, max_x, max_y)
}

/// Separating-axis overlap test between a shape box and an optional drag rectangle.
///
/// Touching edges count as overlapping. Returns false when there is no drag.
pub fn rects_intersect(bounds: Rect, drag: Option<&DragRect>) -> bool {
    let Some(drag) = drag else {
        return false;
    };
    let area = drag.normalized();
    !(bounds.x1 < area.x0 || bounds.x0 > area.x1 || bounds.y1 < area.y0 || bounds.y0 > area.y1)
}

/// Inclusive point-in-box test.
pub fn point_in_box(point: Point, bounds: Rect) -> bool {
    point.x >= bounds.x0 && point.x <= bounds.x1 && point.y >= bounds.y0 && point.y <= bounds.y1
}

/// Distance from `point` to the nearest point of `bounds` (zero when inside).
pub fn distance_to_box(point: Point, bounds: Rect) -> f64 {
    let closest = Point::new(
        point.x.clamp(bounds.x0, bounds.x1),
        point.y.clamp(bounds.y0, bounds.y1),
    );
    (point - closest).hypot()
}

/// Union of all boxes, or `None` if the iterator is empty.
pub fn union_boxes(boxes: impl IntoIterator<Item = Rect>) -> Option<Rect> {
    boxes.into_iter().reduce(|acc, b| acc.union(b))
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    (point - (a + seg * t)).hypot()
}
