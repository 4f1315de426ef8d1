//! Chandb: mirror and index package-channel metadata with content-aware diffing.
//!
//! The corpus is a directory tree of JSON metadata blobs (100k+ files). Each run
//! hashes the corpus in parallel batches, diffs the fingerprints against the
//! SQLite store, and applies only the delta: new or changed blobs are parsed
//! and upserted, everything else is skipped.

pub mod blob;
pub mod engine;
pub mod error;
pub mod reconcile;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

/// Result alias used by the public chandb API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;
