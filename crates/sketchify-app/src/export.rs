//! One-shot background export.
//!
//! The worker owns an immutable snapshot of the shapes taken when the export was
//! requested, so edits made afterwards never show up in the file.

use sketchify_core::shapes::Shape;
use sketchify_render::{save_png, ExportError};
use std::path::PathBuf;
use std::thread::{self, JoinHandle};

/// Everything the export worker needs.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub shapes: Vec<Shape>,
    pub width: u32,
    pub height: u32,
    pub path: PathBuf,
}

/// A running export.
#[derive(Debug)]
pub struct ExportHandle {
    path: PathBuf,
    worker: JoinHandle<Result<(), ExportError>>,
}

impl ExportHandle {
    /// Target file of this export.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Whether the worker is done, so [`ExportHandle::wait`] will not block.
    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    /// Wait for the worker and report where the image went.
    pub fn wait(self) -> Result<PathBuf, ExportError> {
        let result = self
            .worker
            .join()
            .unwrap_or(Err(ExportError::WorkerPanicked));
        match result {
            Ok(()) => Ok(self.path),
            Err(e) => {
                log::error!("export to {} failed: {}", self.path.display(), e);
                Err(e)
            }
        }
    }
}

/// Encode and write `request` on a worker thread.
pub fn spawn_export(request: ExportRequest) -> ExportHandle {
    let path = request.path.clone();
    log::info!(
        "exporting {} shape(s) to {}",
        request.shapes.len(),
        path.display()
    );
    let worker = thread::spawn(move || {
        save_png(&request.shapes, request.width, request.height, &request.path)
    });
    ExportHandle { path, worker }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use sketchify_core::shapes::{ShapeKind, ShapeStyle};

    #[test]
    fn test_export_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let request = ExportRequest {
            shapes: vec![Shape::create(
                ShapeKind::Circle,
                Point::new(16.0, 16.0),
                Point::new(24.0, 16.0),
                ShapeStyle::default(),
                5,
            )],
            width: 32,
            height: 32,
            path: dir.path().join("circle.png"),
        };
        let path = spawn_export(request).wait().unwrap();
        let decoded = image_header(&std::fs::read(path).unwrap());
        assert_eq!(decoded, (32, 32));
    }

    #[test]
    fn test_export_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let request = ExportRequest {
            shapes: Vec::new(),
            width: 8,
            height: 8,
            path: dir.path().join("missing").join("out.png"),
        };
        assert!(matches!(
            spawn_export(request).wait(),
            Err(ExportError::Io(_))
        ));
    }

    /// Width and height from a PNG IHDR chunk.
    fn image_header(bytes: &[u8]) -> (u32, u32) {
        let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
        let height = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
        (width, height)
    }
}
