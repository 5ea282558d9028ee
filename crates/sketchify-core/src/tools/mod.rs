//! Tool selection and the style applied to newly placed shapes.

use crate::eraser::eraser_radius;
use crate::shapes::{Polygon, SerializableColor, ShapeKind, ShapeStyle};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Brush,
    Line,
    #[serde(rename = "rect", alias = "rectangle")]
    Rectangle,
    Circle,
    Triangle,
    Polygon,
    Dashed,
    Eraser,
    Select,
}

impl ToolKind {
    pub const ALL: [ToolKind; 9] = [
        ToolKind::Brush,
        ToolKind::Line,
        ToolKind::Rectangle,
        ToolKind::Circle,
        ToolKind::Triangle,
        ToolKind::Polygon,
        ToolKind::Dashed,
        ToolKind::Eraser,
        ToolKind::Select,
    ];

    /// Identifier used in session files and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Brush => "brush",
            ToolKind::Line => "line",
            ToolKind::Rectangle => "rect",
            ToolKind::Circle => "circle",
            ToolKind::Triangle => "triangle",
            ToolKind::Polygon => "polygon",
            ToolKind::Dashed => "dashed",
            ToolKind::Eraser => "eraser",
            ToolKind::Select => "select",
        }
    }

    /// The parametric shape this tool places, if it is a shape tool.
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            ToolKind::Line => Some(ShapeKind::Line),
            ToolKind::Rectangle => Some(ShapeKind::Rectangle),
            ToolKind::Circle => Some(ShapeKind::Circle),
            ToolKind::Triangle => Some(ShapeKind::Triangle),
            ToolKind::Polygon => Some(ShapeKind::Polygon),
            ToolKind::Dashed => Some(ShapeKind::DashedLine),
            ToolKind::Brush | ToolKind::Eraser | ToolKind::Select => None,
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a tool name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tool `{0}`")]
pub struct ParseToolError(pub String);

impl FromStr for ToolKind {
    type Err = ParseToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        if name == "rectangle" {
            return Ok(ToolKind::Rectangle);
        }
        ToolKind::ALL
            .into_iter()
            .find(|tool| tool.name() == name)
            .ok_or_else(|| ParseToolError(s.to_string()))
    }
}

/// Current tool plus the picker values that new shapes are stamped with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSettings {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Color and width for the next shape.
    pub style: ShapeStyle,
    polygon_sides: u32,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            current_tool: ToolKind::default(),
            style: ShapeStyle::default(),
            polygon_sides: Polygon::DEFAULT_SIDES,
        }
    }
}

impl ToolSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_color(&mut self, color: SerializableColor) {
        self.style.stroke_color = color;
    }

    /// Set the stroke width. Non-finite or negative values fall back to zero.
    pub fn set_size(&mut self, size: f64) {
        self.style.stroke_width = if size.is_finite() { size.max(0.0) } else { 0.0 };
    }

    /// Set the polygon side count, clamped to the supported range.
    pub fn set_polygon_sides(&mut self, sides: u32) {
        self.polygon_sides = Polygon::clamp_sides(sides);
    }

    pub fn polygon_sides(&self) -> u32 {
        self.polygon_sides
    }

    /// Reach of the eraser at the current size.
    pub fn eraser_radius(&self) -> f64 {
        eraser_radius(self.style.stroke_width)
    }
}
