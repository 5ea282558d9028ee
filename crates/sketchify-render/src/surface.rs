//! Abstract immediate-mode drawing surface.

use kurbo::Point;
use peniko::Color;

/// A 2D surface that strokes paths, in the style of an HTML canvas context.
///
/// Stroke color, width, dash and alpha are sticky state that applies to every
/// following [`Surface::stroke`] until changed.
pub trait Surface {
    /// Erase a `width` x `height` region at the origin to transparent.
    fn clear(&mut self, width: f64, height: f64);

    /// Paint the whole surface with an opaque background color.
    fn fill_background(&mut self, color: Color);

    fn set_stroke(&mut self, color: Color, width: f64);

    /// Set the on/off dash lengths, or `None` for solid strokes.
    fn set_dash(&mut self, dashes: Option<&[f64]>);

    /// Global opacity multiplier in `0.0..=1.0`.
    fn set_alpha(&mut self, alpha: f64);

    /// Discard the current path.
    fn begin_path(&mut self);

    fn move_to(&mut self, point: Point);

    fn line_to(&mut self, point: Point);

    /// Add a full circle as its own subpath.
    fn arc(&mut self, center: Point, radius: f64);

    fn close_path(&mut self);

    /// Stroke the current path with the current state.
    fn stroke(&mut self);
}

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { width: f64, height: f64 },
    FillBackground { rgba: [u8; 4] },
    SetStroke { rgba: [u8; 4], width: f64 },
    SetDash(Option<Vec<f64>>),
    SetAlpha(f64),
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    Arc { center: Point, radius: f64 },
    ClosePath,
    Stroke,
}

fn rgba(color: Color) -> [u8; 4] {
    let c = color.to_rgba8();
    [c.r, c.g, c.b, c.a]
}

/// Surface that keeps a display list instead of drawing.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the list empty.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Number of `stroke` calls recorded.
    pub fn stroke_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Stroke))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn fill_background(&mut self, color: Color) {
        self.commands.push(DrawCommand::FillBackground { rgba: rgba(color) });
    }

    fn set_stroke(&mut self, color: Color, width: f64) {
        self.commands.push(DrawCommand::SetStroke {
            rgba: rgba(color),
            width,
        });
    }

    fn set_dash(&mut self, dashes: Option<&[f64]>) {
        self.commands.push(DrawCommand::SetDash(dashes.map(<[f64]>::to_vec)));
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.commands.push(DrawCommand::SetAlpha(alpha));
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, point: Point) {
        self.commands.push(DrawCommand::MoveTo(point));
    }

    fn line_to(&mut self, point: Point) {
        self.commands.push(DrawCommand::LineTo(point));
    }

    fn arc(&mut self, center: Point, radius: f64) {
        self.commands.push(DrawCommand::Arc { center, radius });
    }

    fn close_path(&mut self) {
        self.commands.push(DrawCommand::ClosePath);
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }
}
