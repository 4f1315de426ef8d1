//! Corpus scanner: enumerate metadata blobs under a root directory.

use std::path::{Path, PathBuf};

use anyhow::Result;
use walkdir::WalkDir;

use crate::error::NotADirectoryError;

/// Recursively enumerate files under `root` with the given suffix (no dot).
/// Returns an ordered list of absolute paths (path strings only, contents are
/// never read here). Fails when `root` is missing or not a directory; walk
/// errors on individual entries are logged and the entry skipped.
pub fn scan(root: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(NotADirectoryError {
            path: root.to_path_buf(),
        }
        .into());
    }

    let mut files = Vec::new();
    for entry_result in WalkDir::new(root).into_iter() {
        match entry_result {
            Ok(entry) => {
                let path = entry.into_path();
                if path.is_file()
                    && path.extension().and_then(|e| e.to_str()) == Some(suffix)
                {
                    files.push(path);
                }
            }
            Err(err) => {
                log::warn!("error accessing path during scan: {}", err);
            }
        }
    }
    files.sort();
    log::debug!("corpus scan: {} blob files under {}", files.len(), root.display());
    Ok(files)
}
