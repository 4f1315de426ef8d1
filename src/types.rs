//! Public and internal types for the chandb API and reconciliation pipeline.

use std::collections::HashSet;
use std::path::PathBuf;

/// Hex-encoded SHA-1 fingerprint of a blob's content.
pub type Fingerprint = String;

/// The store's last-recorded `(relative path, fingerprint)` pairs for one
/// entity family. Loaded once per run; only the natural key and fingerprint
/// are held in memory, never blob content.
pub type Snapshot = HashSet<(PathBuf, Fingerprint)>;

/// Paths that are new or whose fingerprint differs from the store, with the
/// fresh fingerprint. Sorted by path so commits land in a stable order.
pub type Delta = Vec<(PathBuf, Fingerprint)>;

/// One artifact row: a concrete built output of a package for a platform.
/// `(name, platform)` is the natural key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtifactRecord {
    pub name: String,
    pub platform: String,
    pub package_name: String,
    /// Version parsed from a `name-version-build` file stem, when it matches.
    pub version: Option<String>,
    pub path: PathBuf,
    pub hash: Fingerprint,
}

/// Result of one reconciliation run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Paths in the delta (new or changed fingerprint).
    pub changed: usize,
    /// Paths whose blob was interpreted and upserted.
    pub applied: usize,
    /// Paths skipped after a per-path interpretation or write failure.
    pub failed: usize,
}
