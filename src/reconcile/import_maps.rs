//! Import-map reconciliation: each blob `<package>.<partition>.json` maps
//! import symbols to the packages providing them, sharded by partition.

use std::path::Path;

use anyhow::{Context, Result, bail};
use rusqlite::Connection;

use crate::blob::read_import_map_blob;
use crate::engine::store::{import_map_snapshot, replace_import_mappings};
use crate::types::ReconcileOutcome;

/// Reconcile the import-map corpus under `root` into the store.
pub fn update(conn: &mut Connection, root: &Path, verbose: bool) -> Result<ReconcileOutcome> {
    log::info!("Updating import-to-package maps...");
    let snapshot = import_map_snapshot(conn).context("query import mappings")?;
    let root_dir = root.to_path_buf();
    super::run(
        conn,
        root,
        snapshot,
        verbose,
        "Updating import maps",
        move |conn, rel_path, fingerprint| apply_blob(conn, &root_dir, rel_path, fingerprint),
    )
}

/// Split a `<package>.<partition>` file stem at the first dot.
fn split_shard_stem(rel_path: &Path) -> Option<(&str, &str)> {
    rel_path
        .file_stem()
        .and_then(|s| s.to_str())
        .and_then(|stem| stem.split_once('.'))
}

/// Apply one changed blob: invert it into package -> imports, then replace
/// the mappings of each touched (package, partition) shard with rows carrying
/// the new blob hash.
fn apply_blob(conn: &Connection, root: &Path, rel_path: &Path, fingerprint: &str) -> Result<()> {
    let Some((package_name, partition)) = split_shard_stem(rel_path) else {
        bail!(
            "cannot derive package and partition from {}",
            rel_path.display()
        );
    };

    let packages_to_imports = read_import_map_blob(&root.join(rel_path))?;
    log::debug!(
        "shard '{}.{}' :: {} providing packages",
        package_name,
        partition,
        packages_to_imports.len()
    );

    replace_import_mappings(conn, partition, fingerprint, &packages_to_imports)
        .with_context(|| format!("replace mappings for shard {package_name}.{partition}"))
}
