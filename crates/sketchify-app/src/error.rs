//! Application error type.

use sketchify_render::{ExportError, RendererError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the `sketchify` binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Renderer(#[from] RendererError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

impl AppError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        AppError::Json {
            path: path.into(),
            source,
        }
    }
}
