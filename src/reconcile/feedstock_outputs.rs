//! Feedstock-output reconciliation: each blob `<package>.json` lists the
//! feedstocks that build that package.

use std::path::Path;

use anyhow::{Context, Result, bail};
use rusqlite::Connection;

use crate::blob::read_feedstock_blob;
use crate::engine::store::{
    NamedEntity, feedstock_output_snapshot, get_or_create, upsert_feedstock_output,
};
use crate::types::ReconcileOutcome;

/// Reconcile the feedstock-output corpus under `root` into the store.
pub fn update(conn: &mut Connection, root: &Path, verbose: bool) -> Result<ReconcileOutcome> {
    log::info!("Updating feedstock outputs...");
    let snapshot = feedstock_output_snapshot(conn).context("query feedstock outputs")?;
    let root_dir = root.to_path_buf();
    super::run(
        conn,
        root,
        snapshot,
        verbose,
        "Updating feedstock outputs",
        move |conn, rel_path, fingerprint| apply_blob(conn, &root_dir, rel_path, fingerprint),
    )
}

/// Apply one changed blob: derive the owning package from the file stem, read
/// the associated feedstocks, lazily create both sides, and upsert one output
/// row per (feedstock, package) pair.
fn apply_blob(conn: &Connection, root: &Path, rel_path: &Path, fingerprint: &str) -> Result<()> {
    let Some(package_name) = rel_path.file_stem().and_then(|s| s.to_str()) else {
        bail!("cannot derive package name from {}", rel_path.display());
    };

    let feedstocks = read_feedstock_blob(&root.join(rel_path))?;
    log::debug!(
        "package '{}' :: feedstocks {:?}",
        package_name,
        feedstocks
    );

    get_or_create(conn, NamedEntity::Package, package_name)?;
    for feedstock_name in &feedstocks {
        get_or_create(conn, NamedEntity::Feedstock, feedstock_name)?;
        upsert_feedstock_output(conn, feedstock_name, package_name, rel_path, fingerprint)
            .with_context(|| {
                format!("upsert output ({feedstock_name}, {package_name})")
            })?;
    }
    Ok(())
}
