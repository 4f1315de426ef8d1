//! Typed errors for the leaf components. The orchestration layer wraps these
//! in `anyhow` with path context.

use std::path::PathBuf;
use thiserror::Error;

/// The scan root is missing or not a directory. Setup-level: aborts the run.
#[derive(Debug, Error)]
#[error("not a directory: {}", .path.display())]
pub struct NotADirectoryError {
    pub path: PathBuf,
}

/// A metadata blob could not be interpreted. Per-path: logged and skipped.
#[derive(Debug, Error)]
pub enum BlobError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A feedstock-output blob must have exactly one top-level key.
    #[error("expected exactly one top-level key, found {found}")]
    AmbiguousShape { found: usize },
}
