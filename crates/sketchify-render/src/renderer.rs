//! Redraw pipeline: the committed scene followed by live gesture overlays.

use crate::surface::Surface;
use kurbo::{Point, Rect, Size};
use peniko::Color;
use sketchify_core::canvas::Canvas;
use sketchify_core::controller::GestureState;
use sketchify_core::shapes::{Shape, ShapeKind, ShapeStyle};
use sketchify_core::tools::ToolKind;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("invalid surface size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
}

/// Opacity of a shape preview while it is being dragged out.
pub const PREVIEW_ALPHA: f64 = 0.7;

/// Dash pattern of selection overlays.
pub const SELECTION_DASH: [f64; 2] = [8.0, 4.0];

/// Line width of selection and eraser overlays.
pub const OVERLAY_WIDTH: f64 = 2.0;

static IDLE: GestureState = GestureState::Idle;

/// Context for a single redraw.
pub struct RenderContext<'a> {
    /// The editor state to draw.
    pub canvas: &'a Canvas,
    /// Active gesture, for previews and overlays.
    pub gesture: &'a GestureState,
    /// Surface size in pixels.
    pub size: Size,
    /// Opaque background painted after clearing; transparent when `None`.
    pub background: Option<Color>,
    /// Rubber-band rectangle color.
    pub drag_rect_color: Color,
    /// Selection bounding box color.
    pub bounding_box_color: Color,
    /// Eraser hit indicator color.
    pub eraser_color: Color,
}

impl<'a> RenderContext<'a> {
    /// Create a context with the default overlay colors and no gesture.
    pub fn new(canvas: &'a Canvas, size: Size) -> Self {
        Self {
            canvas,
            gesture: &IDLE,
            size,
            background: None,
            drag_rect_color: Color::from_rgba8(102, 126, 234, 204),
            bounding_box_color: Color::from_rgba8(102, 126, 234, 255),
            eraser_color: Color::from_rgba8(255, 0, 0, 128),
        }
    }

    /// Set the gesture whose previews are drawn.
    pub fn with_gesture(mut self, gesture: &'a GestureState) -> Self {
        self.gesture = gesture;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Whether the aggregate selection box is shown. A new drag rectangle hides it.
    fn shows_bounding_box(&self) -> bool {
        match self.gesture {
            GestureState::MovingSelection { .. } => true,
            GestureState::RectSelecting { .. } => false,
            _ => {
                self.canvas.current_tool() == ToolKind::Select
                    && !self.canvas.selection.is_empty()
            }
        }
    }
}

/// Trait for drawing a whole frame.
pub trait Renderer {
    /// Clear the surface and draw the scene plus overlays for the current gesture.
    fn redraw(&mut self, ctx: &RenderContext);
}

/// Helper trait for drawing individual shapes and overlays.
pub trait ShapeRenderer {
    /// Stroke one committed shape with its own style.
    fn render_shape(&mut self, shape: &Shape);

    /// Stroke the in-progress brush stroke.
    fn render_brush_preview(&mut self, points: &[Point], style: &ShapeStyle);

    /// Stroke a translucent preview of the shape being dragged out.
    fn render_shape_preview(&mut self, preview: &Shape);

    /// Stroke a dashed overlay rectangle through four corners.
    fn render_dashed_outline(&mut self, corners: [Point; 4], color: Color);

    /// Stroke the eraser hit indicator.
    fn render_eraser_indicator(&mut self, center: Point, radius: f64, color: Color);
}

fn trace_polyline<S: Surface + ?Sized>(surface: &mut S, points: &[Point], close: bool) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    surface.move_to(*first);
    for &point in rest {
        surface.line_to(point);
    }
    if close {
        surface.close_path();
    }
}

fn rect_corners(rect: Rect) -> [Point; 4] {
    [
        Point::new(rect.x0, rect.y0),
        Point::new(rect.x1, rect.y0),
        Point::new(rect.x1, rect.y1),
        Point::new(rect.x0, rect.y1),
    ]
}

impl<S: Surface + ?Sized> ShapeRenderer for S {
    fn render_shape(&mut self, shape: &Shape) {
        // Single-point strokes have nothing to draw.
        if let Shape::Freehand(stroke) = shape {
            if stroke.len() < 2 {
                return;
            }
        }

        let style = shape.style();
        self.set_stroke(style.stroke(), style.stroke_width);
        self.set_dash(shape.dash_pattern());
        self.begin_path();
        match shape {
            Shape::Freehand(stroke) => trace_polyline(self, &stroke.points, false),
            Shape::Line(line) | Shape::DashedLine(line) => {
                self.move_to(line.start);
                self.line_to(line.end);
            }
            Shape::Rectangle(rect) => trace_polyline(self, &rect.corners(), true),
            Shape::Circle(circle) => self.arc(circle.center, circle.radius()),
            Shape::Triangle(tri) => trace_polyline(self, &tri.vertices(), true),
            Shape::Polygon(poly) => trace_polyline(self, &poly.vertices(), true),
        }
        self.stroke();
        if shape.dash_pattern().is_some() {
            self.set_dash(None);
        }
    }

    fn render_brush_preview(&mut self, points: &[Point], style: &ShapeStyle) {
        self.set_stroke(style.stroke(), style.stroke_width);
        self.set_dash(None);
        self.begin_path();
        trace_polyline(self, points, false);
        self.stroke();
    }

    fn render_shape_preview(&mut self, preview: &Shape) {
        self.set_alpha(PREVIEW_ALPHA);
        self.render_shape(preview);
        self.set_alpha(1.0);
    }

    fn render_dashed_outline(&mut self, corners: [Point; 4], color: Color) {
        self.set_stroke(color, OVERLAY_WIDTH);
        self.set_dash(Some(&SELECTION_DASH));
        self.begin_path();
        trace_polyline(self, &corners, true);
        self.stroke();
        self.set_dash(None);
    }

    fn render_eraser_indicator(&mut self, center: Point, radius: f64, color: Color) {
        self.set_stroke(color, OVERLAY_WIDTH);
        self.set_dash(None);
        self.begin_path();
        self.arc(center, radius);
        self.stroke();
    }
}

impl<S: Surface + ?Sized> Renderer for S {
    fn redraw(&mut self, ctx: &RenderContext) {
        let canvas = ctx.canvas;
        let tools = &canvas.tools;

        self.clear(ctx.size.width, ctx.size.height);
        if let Some(background) = ctx.background {
            self.fill_background(background);
        }
        self.set_alpha(1.0);

        for shape in canvas.scene.shapes() {
            self.render_shape(shape);
        }

        match ctx.gesture {
            GestureState::FreehandDrawing { points } => {
                self.render_brush_preview(points, &tools.style);
            }
            GestureState::ShapeDrawing {
                kind,
                start,
                current,
            } => {
                let preview = preview_shape(*kind, *start, *current, canvas);
                self.render_shape_preview(&preview);
            }
            GestureState::RectSelecting { drag } => {
                // Drawn from the drag origin with signed extents.
                let origin = drag.origin;
                let corner = drag.corner();
                let corners = [
                    origin,
                    Point::new(corner.x, origin.y),
                    corner,
                    Point::new(origin.x, corner.y),
                ];
                self.render_dashed_outline(corners, ctx.drag_rect_color);
            }
            GestureState::Erasing {
                last_hit: Some(center),
            } => {
                self.render_eraser_indicator(*center, tools.eraser_radius(), ctx.eraser_color);
            }
            GestureState::Idle
            | GestureState::Erasing { last_hit: None }
            | GestureState::MovingSelection { .. } => {}
        }

        if ctx.shows_bounding_box() {
            if let Some(bounds) = canvas.selection.aggregate_box(&canvas.scene) {
                self.render_dashed_outline(rect_corners(bounds), ctx.bounding_box_color);
            }
        }
    }
}

fn preview_shape(kind: ShapeKind, start: Point, current: Point, canvas: &Canvas) -> Shape {
    Shape::create(
        kind,
        start,
        current,
        canvas.tools.style.clone(),
        canvas.tools.polygon_sides(),
    )
}
