//! Artifact reconciliation: harvested blobs laid out as
//! `<package>/<channel>/<arch>/<name>.json`, one per built output.

use std::path::Path;

use anyhow::{Context, Result, bail};
use rusqlite::Connection;

use crate::engine::store::{
    NamedEntity, artifact_snapshot, get_or_create, upsert_artifact,
};
use crate::types::{ArtifactRecord, ReconcileOutcome};

/// Reconcile the harvested artifact corpus under `root` into the store.
pub fn update(conn: &mut Connection, root: &Path, verbose: bool) -> Result<ReconcileOutcome> {
    log::info!("Updating artifacts...");
    let snapshot = artifact_snapshot(conn).context("query artifacts")?;
    super::run(
        conn,
        root,
        snapshot,
        verbose,
        "Updating artifacts",
        |conn, rel_path, fingerprint| apply_blob(conn, rel_path, fingerprint),
    )
}

/// Parse the version out of a `name-version-build` artifact stem. Conda-style
/// stems have at least three dash-separated fields; anything shorter has no
/// recoverable version.
fn version_from_stem(stem: &str) -> Option<String> {
    let mut fields = stem.rsplitn(3, '-');
    let _build = fields.next()?;
    let version = fields.next()?;
    fields.next()?;
    Some(version.to_string())
}

/// Apply one changed blob: the relative path encodes the owning package,
/// channel, and platform; the file stem is the artifact's natural name.
fn apply_blob(conn: &Connection, rel_path: &Path, fingerprint: &str) -> Result<()> {
    let components: Vec<&str> = rel_path
        .iter()
        .map(|c| c.to_str().unwrap_or_default())
        .collect();
    let [package_name, channel, arch, _file_name] = components.as_slice() else {
        bail!(
            "expected package/channel/arch/name.json layout, got {}",
            rel_path.display()
        );
    };
    let Some(name) = rel_path.file_stem().and_then(|s| s.to_str()) else {
        bail!("cannot derive artifact name from {}", rel_path.display());
    };
    log::debug!("artifact {} :: {} :: {} :: {}", package_name, channel, arch, name);

    get_or_create(conn, NamedEntity::Package, package_name)?;
    let record = ArtifactRecord {
        name: name.to_string(),
        platform: (*arch).to_string(),
        package_name: (*package_name).to_string(),
        version: version_from_stem(name),
        path: rel_path.to_path_buf(),
        hash: fingerprint.to_string(),
    };
    upsert_artifact(conn, &record)
        .with_context(|| format!("upsert artifact ({name}, {arch})"))
}
