//! Shape definitions for the drawing surface.

mod circle;
mod freehand;
mod line;
mod polygon;
mod rectangle;
mod triangle;

pub use circle::Circle;
pub use freehand::Freehand;
pub use line::Line;
pub use polygon::Polygon;
pub use rectangle::Rectangle;
pub use triangle::Triangle;

use kurbo::{Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Dash pattern (dash, gap) stroked by dashed lines.
pub const DASH_PATTERN: [f64; 2] = [10.0, 5.0];

/// Error parsing a color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color `{0}`; expected #rgb, #rrggbb or #rrggbbaa")]
pub struct ColorParseError(pub String);

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    /// Parse a CSS-style hex color (`#rgb`, `#rrggbb` or `#rrggbbaa`).
    pub fn from_hex(color: &str) -> Result<Self, ColorParseError> {
        let invalid = || ColorParseError(color.to_string());
        let hex = color.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };

        match hex.len() {
            3 => {
                // #rgb -> #rrggbb
                let r = channel(0..1)? * 17;
                let g = channel(1..2)? * 17;
                let b = channel(2..3)? * 17;
                Ok(Self::new(r, g, b, 255))
            }
            6 => Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?, 255)),
            8 => Ok(Self::new(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(invalid()),
        }
    }
}

impl Default for SerializableColor {
    fn default() -> Self {
        Self::black()
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Stroke style captured when a shape is placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Stroke color.
    pub stroke_color: SerializableColor,
    /// Stroke width in pixels.
    pub stroke_width: f64,
}

impl ShapeStyle {
    pub const DEFAULT_STROKE_WIDTH: f64 = 3.0;

    pub fn new(stroke_color: SerializableColor, stroke_width: f64) -> Self {
        Self {
            stroke_color,
            stroke_width,
        }
    }

    /// Get the stroke color as a peniko Color.
    pub fn stroke(&self) -> Color {
        self.stroke_color.into()
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self::new(SerializableColor::black(), Self::DEFAULT_STROKE_WIDTH)
    }
}

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Get the normalized bounding box.
    fn bounds(&self) -> Rect;

    /// Get the style.
    fn style(&self) -> &ShapeStyle;

    /// Shift every positional field by `delta`.
    fn translate(&mut self, delta: Vec2);
}

/// The parametric shapes that are defined by an anchor and a release point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Line,
    Rectangle,
    Circle,
    Triangle,
    Polygon,
    DashedLine,
}

/// A placed shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Freehand(Freehand),
    Line(Line),
    Rectangle(Rectangle),
    Circle(Circle),
    Triangle(Triangle),
    Polygon(Polygon),
    DashedLine(Line),
}

impl Shape {
    /// Build a parametric shape dragged from `start` to `end`.
    ///
    /// `sides` only matters for polygons and is clamped to the supported range.
    pub fn create(kind: ShapeKind, start: Point, end: Point, style: ShapeStyle, sides: u32) -> Self {
        match kind {
            ShapeKind::Line => Shape::Line(Line::new(start, end, style)),
            ShapeKind::Rectangle => Shape::Rectangle(Rectangle::new(start, end, style)),
            ShapeKind::Circle => Shape::Circle(Circle::new(start, end, style)),
            ShapeKind::Triangle => Shape::Triangle(Triangle::new(start, end, style)),
            ShapeKind::Polygon => Shape::Polygon(Polygon::new(start, end, sides, style)),
            ShapeKind::DashedLine => Shape::DashedLine(Line::new(start, end, style)),
        }
    }

    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Freehand(s) => s.id(),
            Shape::Line(s) => s.id(),
            Shape::Rectangle(s) => s.id(),
            Shape::Circle(s) => s.id(),
            Shape::Triangle(s) => s.id(),
            Shape::Polygon(s) => s.id(),
            Shape::DashedLine(s) => s.id(),
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Freehand(s) => s.bounds(),
            Shape::Line(s) => s.bounds(),
            Shape::Rectangle(s) => s.bounds(),
            Shape::Circle(s) => s.bounds(),
            Shape::Triangle(s) => s.bounds(),
            Shape::Polygon(s) => s.bounds(),
            Shape::DashedLine(s) => s.bounds(),
        }
    }

    pub fn style(&self) -> &ShapeStyle {
        match self {
            Shape::Freehand(s) => s.style(),
            Shape::Line(s) => s.style(),
            Shape::Rectangle(s) => s.style(),
            Shape::Circle(s) => s.style(),
            Shape::Triangle(s) => s.style(),
            Shape::Polygon(s) => s.style(),
            Shape::DashedLine(s) => s.style(),
        }
    }

    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Shape::Freehand(s) => s.translate(delta),
            Shape::Line(s) => s.translate(delta),
            Shape::Rectangle(s) => s.translate(delta),
            Shape::Circle(s) => s.translate(delta),
            Shape::Triangle(s) => s.translate(delta),
            Shape::Polygon(s) => s.translate(delta),
            Shape::DashedLine(s) => s.translate(delta),
        }
    }

    /// Dash pattern this shape is stroked with, if any.
    pub fn dash_pattern(&self) -> Option<&'static [f64]> {
        match self {
            Shape::DashedLine(_) => Some(&DASH_PATTERN),
            Shape::Freehand(_)
            | Shape::Line(_)
            | Shape::Rectangle(_)
            | Shape::Circle(_)
            | Shape::Triangle(_)
            | Shape::Polygon(_) => None,
        }
    }

    /// Short name used in logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Shape::Freehand(_) => "freehand",
            Shape::Line(_) => "line",
            Shape::Rectangle(_) => "rectangle",
            Shape::Circle(_) => "circle",
            Shape::Triangle(_) => "triangle",
            Shape::Polygon(_) => "polygon",
            Shape::DashedLine(_) => "dashed line",
        }
    }
}
