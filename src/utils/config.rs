//! Application configuration constants.
//! Tuning and thresholds in one place.

use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived paths: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    pkg_name: &'static str,
    db_filename: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache paths from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                pkg_name: pkg,
                db_filename: format!("{pkg}.db"),
            }
        })
    }

    pub fn pkg_name(&self) -> &str {
        self.pkg_name
    }

    /// Default store filename in the working directory.
    pub fn db_filename(&self) -> &str {
        &self.db_filename
    }
}

// ---- Hashing ----

/// Fixed chunk size for streaming file hashing (bytes). The fingerprint is
/// defined over this read pattern; blobs are small, no mmap path needed.
pub const HASH_READ_CHUNK_SIZE: usize = 1024;

// ---- Batching ----

/// Files per hashing batch; each batch gets one scratch file.
pub const HASH_BATCH_SIZE: usize = 1000;

// ---- Corpus ----

/// Metadata blob suffix matched by the corpus scan.
pub const BLOB_SUFFIX: &str = "json";

// ---- Database ----

/// Processed paths per transaction commit (balance crash-recovery
/// granularity against commit overhead).
pub const COMMIT_INTERVAL: usize = 100;
