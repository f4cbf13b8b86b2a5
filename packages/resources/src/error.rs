// Resource Errors
//
// Failures raised while reading or rendering component resources.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// A template or stylesheet file that is missing or unreadable.
#[derive(Debug, Error)]
#[error("Resource not found: {} ({source})", .path.display())]
pub struct ResourceNotFoundError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl ResourceNotFoundError {
    pub fn new(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }

    /// Classification of the underlying I/O failure (not found, permission denied, ...).
    pub fn kind(&self) -> io::ErrorKind {
        self.source.kind()
    }
}

/// The step of stylesheet rendering that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStage {
    /// The preprocessing engine (sass, less, stylus).
    Render,
    /// Browser-target post-processing.
    PostProcess,
}

impl fmt::Display for RenderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderStage::Render => f.write_str("render"),
            RenderStage::PostProcess => f.write_str("post-process"),
        }
    }
}

/// An engine-level syntax or resolution failure for one stylesheet.
#[derive(Debug, Error)]
#[error("Cannot inline stylesheet {} ({stage} failed)", .path.display())]
pub struct StylesheetRenderError {
    pub path: PathBuf,
    pub stage: RenderStage,
    #[source]
    pub source: anyhow::Error,
}

impl StylesheetRenderError {
    pub fn new(path: impl Into<PathBuf>, stage: RenderStage, source: anyhow::Error) -> Self {
        Self {
            path: path.into(),
            stage,
            source,
        }
    }
}

/// Failure of the combined read, render and post-process operation.
#[derive(Debug, Error)]
pub enum StylesheetError {
    #[error(transparent)]
    NotFound(#[from] ResourceNotFoundError),
    #[error(transparent)]
    Render(#[from] StylesheetRenderError),
}

impl StylesheetError {
    /// Path of the stylesheet that failed.
    pub fn path(&self) -> &Path {
        match self {
            StylesheetError::NotFound(err) => &err.path,
            StylesheetError::Render(err) => &err.path,
        }
    }
}
