//! Rasterize a scene snapshot and encode it as PNG.

use crate::raster::RasterSurface;
use crate::renderer::{RendererError, ShapeRenderer};
use crate::surface::Surface;
use chrono::{DateTime, Utc};
use image::RgbaImage;
use peniko::Color;
use sketchify_core::shapes::Shape;
use std::path::Path;
use thiserror::Error;

/// Errors raised while exporting an image.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Renderer(#[from] RendererError),
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] png::EncodingError),
    #[error("failed to write image: {0}")]
    Io(#[from] std::io::Error),
    #[error("export worker panicked")]
    WorkerPanicked,
}

/// Draw `shapes` in order onto a fresh white `width` x `height` image.
pub fn render_image(shapes: &[Shape], width: u32, height: u32) -> Result<RgbaImage, ExportError> {
    let mut surface = RasterSurface::new(width, height)?;
    surface.fill_background(Color::WHITE);
    for shape in shapes {
        surface.render_shape(shape);
    }
    Ok(surface.into_image())
}

/// Encode RGBA pixel data to PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, image.width(), image.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(image.as_raw())?;
    }
    Ok(png_data)
}

/// Render and encode in one step.
pub fn render_png(shapes: &[Shape], width: u32, height: u32) -> Result<Vec<u8>, ExportError> {
    let image = render_image(shapes, width, height)?;
    encode_png(&image)
}

/// Render, encode and write the PNG to `path`.
pub fn save_png(
    shapes: &[Shape],
    width: u32,
    height: u32,
    path: &Path,
) -> Result<(), ExportError> {
    let bytes = render_png(shapes, width, height)?;
    std::fs::write(path, bytes)?;
    log::info!("exported {} shape(s) to {}", shapes.len(), path.display());
    Ok(())
}

/// Timestamped stem of an export file name, e.g. `sketchify-2024-05-01T13-45-09`.
pub fn export_stem(prefix: &str, timestamp: &DateTime<Utc>) -> String {
    format!("{}-{}", prefix, timestamp.format("%Y-%m-%dT%H-%M-%S"))
}

/// PNG file name for `stem`. A non-zero `suffix` tells apart exports that share a stem.
pub fn build_file_name(stem: &str, suffix: u32) -> String {
    if suffix == 0 {
        format!("{stem}.png")
    } else {
        format!("{stem}-{suffix}.png")
    }
}

/// File name for an export taken at `timestamp`, e.g. `sketchify-2024-05-01T13-45-09.png`.
pub fn export_file_name(prefix: &str, timestamp: &DateTime<Utc>) -> String {
    build_file_name(&export_stem(prefix, timestamp), 0)
}
