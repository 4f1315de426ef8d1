//! Delta computer: set-difference between the fresh on-disk fingerprints and
//! the store's last-recorded snapshot.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::types::{Delta, Snapshot};

/// Convert absolute path to relative path from base
pub fn path_relative_to(path: &Path, base: &Path) -> Option<PathBuf> {
    path.strip_prefix(base).ok().map(|p| p.to_path_buf())
}

/// Read every scratch file line-by-line, relativize paths against `root`, and
/// return the entries absent from `store_snapshot` or carrying a different
/// fingerprint. Unchanged entries are excluded by construction: downstream
/// interpretation and writes cost O(delta), not O(corpus). Sorted by path.
pub fn diff_against_snapshot(
    store_snapshot: &Snapshot,
    scratch_files: &[PathBuf],
    root: &Path,
) -> Result<Delta> {
    let mut changed = Vec::new();

    for scratch_file in scratch_files {
        let file = File::open(scratch_file)
            .with_context(|| format!("open scratch file {}", scratch_file.display()))?;
        for line in BufReader::new(file).lines() {
            let line = line
                .with_context(|| format!("read scratch file {}", scratch_file.display()))?;
            // Paths never contain the delimiter; the fingerprint never does
            // either, so split at the last comma.
            let Some((path, fingerprint)) = line.rsplit_once(',') else {
                log::warn!(
                    "malformed scratch line in {}: {:?}",
                    scratch_file.display(),
                    line
                );
                continue;
            };
            let abs = PathBuf::from(path);
            let rel = path_relative_to(&abs, root).unwrap_or(abs);
            let entry = (rel, fingerprint.to_string());
            if !store_snapshot.contains(&entry) {
                changed.push(entry);
            }
        }
    }

    changed.sort();
    Ok(changed)
}
