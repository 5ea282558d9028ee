//! Sketchify Render Library
//!
//! The abstract drawing surface, the redraw pipeline that replays a scene onto it,
//! a CPU raster implementation and PNG export.

pub mod export;
mod raster;
mod renderer;
pub mod surface;

pub use export::{
    build_file_name, encode_png, export_file_name, export_stem, render_image, render_png,
    save_png, ExportError,
};
pub use raster::{RasterSurface, MAX_SURFACE_SIDE};
pub use renderer::{
    RenderContext, Renderer, RendererError, ShapeRenderer, OVERLAY_WIDTH, PREVIEW_ALPHA,
    SELECTION_DASH,
};
pub use surface::{DrawCommand, RecordingSurface, Surface};
