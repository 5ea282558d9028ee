//! CPU rasterizer behind the [`Surface`] trait.
//!
//! Paths are collected into a `kurbo::BezPath`, optionally dashed, flattened to
//! line segments and stroked with round caps and joins. Coverage is accumulated
//! per stroke so overlapping segments of one path do not darken each other.

use crate::renderer::RendererError;
use crate::surface::Surface;
use image::{Rgba, RgbaImage};
use kurbo::{BezPath, PathEl, Point, Shape as _};
use peniko::Color;
use sketchify_core::geometry::point_to_segment_dist;

/// Flattening tolerance in pixels.
const TOLERANCE: f64 = 0.25;

/// Largest supported surface side in pixels.
pub const MAX_SURFACE_SIDE: u32 = 16384;

/// A drawing surface backed by an RGBA8 image buffer.
pub struct RasterSurface {
    image: RgbaImage,
    stroke_color: Color,
    line_width: f64,
    dashes: Option<Vec<f64>>,
    alpha: f64,
    path: BezPath,
    has_current_point: bool,
}

impl RasterSurface {
    /// Create a transparent surface. Sides must be in `1..=MAX_SURFACE_SIDE`.
    pub fn new(width: u32, height: u32) -> Result<Self, RendererError> {
        if !(1..=MAX_SURFACE_SIDE).contains(&width) || !(1..=MAX_SURFACE_SIDE).contains(&height) {
            return Err(RendererError::InvalidSize { width, height });
        }
        Ok(Self {
            image: RgbaImage::new(width, height),
            stroke_color: Color::BLACK,
            line_width: 1.0,
            dashes: None,
            alpha: 1.0,
            path: BezPath::new(),
            has_current_point: false,
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Collect the current path as straight segments, after dashing.
    fn segments(&self) -> Vec<(Point, Point)> {
        match self.dashes.as_deref() {
            Some(dashes) if dashes.iter().sum::<f64>() > 0.0 => {
                flatten_segments(kurbo::dash(self.path.iter(), 0.0, dashes))
            }
            _ => flatten_segments(self.path.iter()),
        }
    }

    fn blend_pixel(&mut self, x: u32, y: u32, src: [u8; 4], coverage: f64) {
        let src_a = src[3] as f64 / 255.0 * self.alpha * coverage;
        if src_a <= 0.0 {
            return;
        }
        let dst = self.image.get_pixel(x, y).0;
        let dst_a = dst[3] as f64 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        let mut out = [0u8; 4];
        for i in 0..3 {
            let c = (src[i] as f64 * src_a + dst[i] as f64 * dst_a * (1.0 - src_a)) / out_a;
            out[i] = c.round().clamp(0.0, 255.0) as u8;
        }
        out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
        self.image.put_pixel(x, y, Rgba(out));
    }
}

/// Flatten path elements into line segments, closing subpaths where asked.
fn flatten_segments(elements: impl IntoIterator<Item = PathEl>) -> Vec<(Point, Point)> {
    let mut segments = Vec::new();
    let mut start: Option<Point> = None;
    let mut last: Option<Point> = None;
    kurbo::flatten(elements, TOLERANCE, |el| match el {
        PathEl::MoveTo(p) => {
            start = Some(p);
            last = Some(p);
        }
        PathEl::LineTo(p) => {
            if let Some(prev) = last {
                segments.push((prev, p));
            }
            last = Some(p);
        }
        PathEl::ClosePath => {
            if let (Some(first), Some(prev)) = (start, last) {
                if prev != first {
                    segments.push((prev, first));
                }
            }
            last = start;
        }
        PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
    });
    segments
}

impl Surface for RasterSurface {
    fn clear(&mut self, width: f64, height: f64) {
        let w = (width.max(0.0).ceil() as u32).min(self.image.width());
        let h = (height.max(0.0).ceil() as u32).min(self.image.height());
        for y in 0..h {
            for x in 0..w {
                self.image.put_pixel(x, y, Rgba([0, 0, 0, 0]));
            }
        }
    }

    fn fill_background(&mut self, color: Color) {
        let c = color.to_rgba8();
        for pixel in self.image.pixels_mut() {
            *pixel = Rgba([c.r, c.g, c.b, c.a]);
        }
    }

    fn set_stroke(&mut self, color: Color, width: f64) {
        self.stroke_color = color;
        // Like a canvas context, invalid widths are ignored.
        if width.is_finite() && width > 0.0 {
            self.line_width = width;
        }
    }

    fn set_dash(&mut self, dashes: Option<&[f64]>) {
        self.dashes = dashes.map(<[f64]>::to_vec);
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    fn begin_path(&mut self) {
        self.path = BezPath::new();
        self.has_current_point = false;
    }

    fn move_to(&mut self, point: Point) {
        self.path.move_to(point);
        self.has_current_point = true;
    }

    fn line_to(&mut self, point: Point) {
        if self.has_current_point {
            self.path.line_to(point);
        } else {
            self.move_to(point);
        }
    }

    fn arc(&mut self, center: Point, radius: f64) {
        if !(radius.is_finite() && radius >= 0.0) {
            return;
        }
        for el in kurbo::Circle::new(center, radius).path_elements(0.1) {
            self.path.push(el);
        }
        self.has_current_point = true;
    }

    fn close_path(&mut self) {
        if self.has_current_point {
            self.path.close_path();
        }
    }

    fn stroke(&mut self) {
        let segments = self.segments();
        if segments.is_empty() {
            return;
        }

        let half = self.line_width / 2.0;
        let reach = half + 1.0;
        let (img_w, img_h) = self.image.dimensions();

        // Pixel window touched by this stroke.
        let mut min = Point::new(f64::MAX, f64::MAX);
        let mut max = Point::new(f64::MIN, f64::MIN);
        for &(a, b) in &segments {
            min = Point::new(min.x.min(a.x).min(b.x), min.y.min(a.y).min(b.y));
            max = Point::new(max.x.max(a.x).max(b.x), max.y.max(a.y).max(b.y));
        }
        let x0 = (min.x - reach).floor().max(0.0) as u32;
        let y0 = (min.y - reach).floor().max(0.0) as u32;
        let x1 = ((max.x + reach).ceil().max(0.0) as u32).min(img_w);
        let y1 = ((max.y + reach).ceil().max(0.0) as u32).min(img_h);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let win_w = (x1 - x0) as usize;
        let mut coverage = vec![0.0f64; win_w * (y1 - y0) as usize];
        for &(a, b) in &segments {
            let sx0 = ((a.x.min(b.x) - reach).floor().max(x0 as f64) as u32).min(x1);
            let sy0 = ((a.y.min(b.y) - reach).floor().max(y0 as f64) as u32).min(y1);
            let sx1 = ((a.x.max(b.x) + reach).ceil().max(0.0) as u32).min(x1);
            let sy1 = ((a.y.max(b.y) + reach).ceil().max(0.0) as u32).min(y1);
            for y in sy0..sy1 {
                for x in sx0..sx1 {
                    let center = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                    let dist = point_to_segment_dist(center, a, b);
                    let cov = (half + 0.5 - dist).clamp(0.0, 1.0);
                    let slot = &mut coverage[(y - y0) as usize * win_w + (x - x0) as usize];
                    if cov > *slot {
                        *slot = cov;
                    }
                }
            }
        }

        let c = self.stroke_color.to_rgba8();
        let src = [c.r, c.g, c.b, c.a];
        for y in y0..y1 {
            for x in x0..x1 {
                let cov = coverage[(y - y0) as usize * win_w + (x - x0) as usize];
                if cov > 0.0 {
                    self.blend_pixel(x, y, src, cov);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::ShapeRenderer;
    use sketchify_core::shapes::{Shape, ShapeKind, ShapeStyle};

    fn pixel(surface: &RasterSurface, x: u32, y: u32) -> [u8; 4] {
        surface.image().get_pixel(x, y).0
    }

    #[test]
    fn test_zero_size_is_rejected() {
        assert!(matches!(
            RasterSurface::new(0, 10),
            Err(RendererError::InvalidSize { width: 0, height: 10 })
        ));
    }

    #[test]
    fn test_oversized_surface_is_rejected() {
        assert!(matches!(
            RasterSurface::new(u32::MAX, u32::MAX),
            Err(RendererError::InvalidSize { .. })
        ));
        assert!(matches!(
            RasterSurface::new(MAX_SURFACE_SIDE + 1, 1),
            Err(RendererError::InvalidSize { .. })
        ));
        assert!(RasterSurface::new(MAX_SURFACE_SIDE, 1).is_ok());
    }

    #[test]
    fn test_background_fill() {
        let mut surface = RasterSurface::new(4, 3).unwrap();
        assert_eq!(pixel(&surface, 1, 1), [0, 0, 0, 0]);
        surface.fill_background(Color::WHITE);
        assert_eq!(pixel(&surface, 3, 2), [255, 255, 255, 255]);
        surface.clear(2.0, 2.0);
        assert_eq!(pixel(&surface, 0, 0), [0, 0, 0, 0]);
        assert_eq!(pixel(&surface, 3, 2), [255, 255, 255, 255]);
    }

    #[test]
    fn test_horizontal_line_is_stroked() {
        let mut surface = RasterSurface::new(40, 20).unwrap();
        surface.fill_background(Color::WHITE);
        surface.set_stroke(Color::BLACK, 4.0);
        surface.begin_path();
        surface.move_to(Point::new(5.0, 10.0));
        surface.line_to(Point::new(35.0, 10.0));
        surface.stroke();

        // On the line.
        assert_eq!(pixel(&surface, 20, 10), [0, 0, 0, 255]);
        assert_eq!(pixel(&surface, 20, 9), [0, 0, 0, 255]);
        // Well away from it.
        assert_eq!(pixel(&surface, 20, 2), [255, 255, 255, 255]);
        assert_eq!(pixel(&surface, 39, 10), [255, 255, 255, 255]);
    }

    #[test]
    fn test_dashed_line_leaves_gaps() {
        let mut surface = RasterSurface::new(60, 10).unwrap();
        surface.fill_background(Color::WHITE);
        surface.render_shape(&Shape::create(
            ShapeKind::DashedLine,
            Point::new(0.0, 5.0),
            Point::new(60.0, 5.0),
            ShapeStyle::default(),
            5,
        ));
        // First dash covers x in [0, 10), first gap [10, 15).
        assert_eq!(pixel(&surface, 5, 5), [0, 0, 0, 255]);
        assert_eq!(pixel(&surface, 12, 5), [255, 255, 255, 255]);
        assert_eq!(pixel(&surface, 20, 5), [0, 0, 0, 255]);
    }

    #[test]
    fn test_alpha_blends_with_background() {
        let mut surface = RasterSurface::new(20, 20).unwrap();
        surface.fill_background(Color::WHITE);
        surface.set_alpha(0.5);
        surface.set_stroke(Color::BLACK, 6.0);
        surface.begin_path();
        surface.move_to(Point::new(0.0, 10.0));
        surface.line_to(Point::new(20.0, 10.0));
        surface.stroke();
        let [r, g, b, a] = pixel(&surface, 10, 10);
        assert_eq!(a, 255);
        assert!((120..=135).contains(&r) && r == g && g == b, "got {r}");
    }

    #[test]
    fn test_circle_outline() {
        let mut surface = RasterSurface::new(40, 40).unwrap();
        surface.set_stroke(Color::BLACK, 4.0);
        surface.begin_path();
        surface.arc(Point::new(20.0, 20.0), 10.0);
        surface.stroke();
        // On the rim, not at the center.
        assert_eq!(pixel(&surface, 29, 19)[3], 255);
        assert_eq!(pixel(&surface, 20, 20)[3], 0);
    }

    #[test]
    fn test_line_to_without_move_starts_subpath() {
        let mut surface = RasterSurface::new(10, 10).unwrap();
        surface.begin_path();
        surface.line_to(Point::new(5.0, 5.0));
        surface.close_path();
        surface.stroke();
        // A lone point draws nothing.
        assert!(surface.image().pixels().all(|p| p.0[3] == 0));
    }
}
