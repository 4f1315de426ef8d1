//! Reconciler: drives scan -> batched hashing -> delta -> per-path apply,
//! committing in fixed-size groups and isolating failures to single paths.

pub mod artifacts;
pub mod feedstock_outputs;
pub mod import_maps;

use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};
use rusqlite::Connection;

use crate::engine::batch::hash_all;
use crate::engine::diff::diff_against_snapshot;
use crate::engine::progress::{create_progress_bar, update_progress_bar};
use crate::engine::scan::scan;
use crate::types::{ReconcileOutcome, Snapshot};
use crate::utils::config::{BLOB_SUFFIX, COMMIT_INTERVAL, HASH_BATCH_SIZE};

/// Run one reconciliation: SCAN -> HASH -> DIFF, then for each changed path
/// INTERPRET + UPSERT via `apply_one`, committing every `COMMIT_INTERVAL`
/// paths plus a final commit for the remainder.
///
/// SCAN/HASH/DIFF failures abort the run before any mutation. `apply_one`
/// runs inside a savepoint: a failure rolls back only that path's writes,
/// logs the path, and processing continues. An empty delta short-circuits
/// with no writes.
pub fn run<F>(
    conn: &mut Connection,
    root: &Path,
    snapshot: Snapshot,
    verbose: bool,
    desc: &'static str,
    mut apply_one: F,
) -> Result<ReconcileOutcome>
where
    F: FnMut(&Connection, &Path, &str) -> Result<()>,
{
    info!("Traversing files in {}...", root.display());
    let files = scan(root, BLOB_SUFFIX)?;

    // Scratch space for batch results; removed on every exit path when the
    // guard drops.
    let scratch_dir = tempfile::tempdir().context("create scratch directory")?;
    let scratch_files = hash_all(&files, HASH_BATCH_SIZE, scratch_dir.path())?;

    info!("Comparing files...");
    let changed = diff_against_snapshot(&snapshot, &scratch_files, root)?;
    if changed.is_empty() {
        info!("No changes detected.");
        return Ok(ReconcileOutcome::default());
    }
    info!("Detected {} modified files.", changed.len());

    let mut bar = verbose.then(|| create_progress_bar(changed.len(), desc));
    let mut outcome = ReconcileOutcome {
        changed: changed.len(),
        ..Default::default()
    };

    for chunk in changed.chunks(COMMIT_INTERVAL) {
        let mut tx = conn.transaction().context("begin transaction")?;
        for (rel_path, fingerprint) in chunk {
            let sp = tx.savepoint().context("open savepoint")?;
            match apply_one(&sp, rel_path, fingerprint) {
                Ok(()) => {
                    sp.commit().context("release savepoint")?;
                    outcome.applied += 1;
                }
                Err(err) => {
                    // Savepoint rolls back on drop; this path's changes are
                    // simply not added.
                    warn!("skipping {}: {:#}", rel_path.display(), err);
                    outcome.failed += 1;
                }
            }
            if let Some(ref mut bar) = bar {
                update_progress_bar(bar, 1);
            }
        }
        tx.commit().context("commit batch")?;
    }

    Ok(outcome)
}
