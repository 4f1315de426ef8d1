//! Record store operations: SQLite schema, snapshot reads, and the
//! natural-key lookup / upsert shapes the reconciler is allowed to use.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rusqlite::{Connection, params};
use uuid::Uuid;

use crate::types::{ArtifactRecord, Snapshot};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS feedstocks (
    name TEXT PRIMARY KEY
);

CREATE TABLE IF NOT EXISTS packages (
    name TEXT PRIMARY KEY
);

CREATE TABLE IF NOT EXISTS feedstock_outputs (
    id BLOB PRIMARY KEY,
    path TEXT NOT NULL,
    feedstock_name TEXT NOT NULL REFERENCES feedstocks(name),
    package_name TEXT NOT NULL REFERENCES packages(name),
    hash TEXT NOT NULL
);
CREATE UNIQUE INDEX IF NOT EXISTS feedstock_output_index
    ON feedstock_outputs(feedstock_name, package_name);

CREATE TABLE IF NOT EXISTS import_to_package_mapping (
    id BLOB PRIMARY KEY,
    import_name TEXT NOT NULL,
    parent_package_name TEXT NOT NULL REFERENCES packages(name),
    "partition" TEXT NOT NULL,
    hash TEXT NOT NULL
);
CREATE UNIQUE INDEX IF NOT EXISTS import_to_package_mapping_index
    ON import_to_package_mapping(import_name, parent_package_name);

CREATE TABLE IF NOT EXISTS artifacts (
    name TEXT NOT NULL,
    platform TEXT NOT NULL,
    package_name TEXT REFERENCES packages(name),
    version TEXT,
    hash TEXT NOT NULL,
    path TEXT NOT NULL,
    PRIMARY KEY (name, platform)
);
"#;

/// Enable WAL and apply schema to an open connection (idempotent).
fn apply_wal_and_schema(conn: &Connection) -> Result<()> {
    conn.query_row("PRAGMA journal_mode = WAL", [], |_| Ok(()))
        .context("enable WAL")?;
    conn.execute_batch(
        r#"
        PRAGMA synchronous = NORMAL;
        PRAGMA wal_autocheckpoint = 10000;
        "#,
    )
    .context("set WAL pragmas")?;
    conn.execute_batch(SCHEMA).context("create schema")?;
    Ok(())
}

/// Open or create the store and ensure schema + WAL.
pub fn open_db(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path).context("open database")?;
    apply_wal_and_schema(&conn)?;
    Ok(conn)
}

/// Open an in-memory store with the same schema (no WAL pragmas needed).
pub fn open_db_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory().context("open in-memory database")?;
    conn.execute_batch(SCHEMA).context("create schema")?;
    Ok(conn)
}

/// Mint a fresh unique row id (UUID v4 bytes).
fn uniq_id() -> Vec<u8> {
    Uuid::new_v4().as_bytes().to_vec()
}

// ---- Snapshots ----

fn snapshot_from_rows(
    conn: &Connection,
    sql: &str,
    to_path: impl Fn(&rusqlite::Row<'_>) -> rusqlite::Result<(String, String)>,
) -> Result<Snapshot> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([], |row| {
        let (path, hash) = to_path(row)?;
        Ok((PathBuf::from(path), hash))
    })?;
    let mut snapshot = Snapshot::new();
    for row in rows {
        snapshot.insert(row?);
    }
    Ok(snapshot)
}

/// Current `(path, hash)` pairs of every feedstock-output row.
pub fn feedstock_output_snapshot(conn: &Connection) -> Result<Snapshot> {
    snapshot_from_rows(conn, "SELECT path, hash FROM feedstock_outputs", |row| {
        Ok((row.get(0)?, row.get(1)?))
    })
}

/// Current `(path, hash)` pairs of the import-map corpus, with paths
/// reconstructed from the stored shard key as `{package}.{partition}.json`.
pub fn import_map_snapshot(conn: &Connection) -> Result<Snapshot> {
    snapshot_from_rows(
        conn,
        "SELECT DISTINCT parent_package_name, \"partition\", hash FROM import_to_package_mapping",
        |row| {
            let package: String = row.get(0)?;
            let partition: String = row.get(1)?;
            let hash: String = row.get(2)?;
            Ok((format!("{package}.{partition}.json"), hash))
        },
    )
}

/// Current `(path, hash)` pairs of every artifact row.
pub fn artifact_snapshot(conn: &Connection) -> Result<Snapshot> {
    snapshot_from_rows(conn, "SELECT path, hash FROM artifacts", |row| {
        Ok((row.get(0)?, row.get(1)?))
    })
}

// ---- Lazily-created named entities ----

/// Entities identified by a unique name, created lazily on first reference
/// and never deleted by the reconciler.
#[derive(Clone, Copy, Debug)]
pub enum NamedEntity {
    Feedstock,
    Package,
}

impl NamedEntity {
    fn table(self) -> &'static str {
        match self {
            NamedEntity::Feedstock => "feedstocks",
            NamedEntity::Package => "packages",
        }
    }
}

/// Idempotent get-or-create by natural key: inserts the row if absent,
/// leaves an existing row untouched.
pub fn get_or_create(conn: &Connection, entity: NamedEntity, name: &str) -> Result<()> {
    let sql = format!("INSERT OR IGNORE INTO {} (name) VALUES (?1)", entity.table());
    conn.execute(&sql, [name])
        .with_context(|| format!("get or create {} {:?}", entity.table(), name))?;
    Ok(())
}

// ---- Upserts ----

/// Update the `(feedstock, package)` output row's hash and path in place, or
/// insert a new row with a freshly minted id. At most one row ever exists per
/// pair (unique index).
pub fn upsert_feedstock_output(
    conn: &Connection,
    feedstock_name: &str,
    package_name: &str,
    rel_path: &Path,
    hash: &str,
) -> Result<()> {
    let path_str = rel_path.to_string_lossy();
    let updated = conn
        .execute(
            "UPDATE feedstock_outputs SET hash = ?1, path = ?2
             WHERE feedstock_name = ?3 AND package_name = ?4",
            params![hash, path_str.as_ref(), feedstock_name, package_name],
        )
        .context("update feedstock output")?;
    if updated == 0 {
        conn.execute(
            "INSERT INTO feedstock_outputs (id, path, feedstock_name, package_name, hash)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                uniq_id(),
                path_str.as_ref(),
                feedstock_name,
                package_name,
                hash
            ],
        )
        .context("insert feedstock output")?;
    }
    Ok(())
}

/// Replace the import mappings derived from one changed blob: for each
/// package in the inverted map, drop the rows tied to the old hash of the
/// same `(package, partition)` shard, then insert fresh rows carrying the new
/// blob hash. The unique `(import, package)` index is kept via REPLACE.
pub fn replace_import_mappings(
    conn: &Connection,
    partition: &str,
    hash: &str,
    packages_to_imports: &BTreeMap<String, Vec<String>>,
) -> Result<()> {
    for (package_name, imports) in packages_to_imports {
        get_or_create(conn, NamedEntity::Package, package_name)?;
        conn.execute(
            "DELETE FROM import_to_package_mapping
             WHERE parent_package_name = ?1 AND \"partition\" = ?2",
            params![package_name, partition],
        )
        .context("prune stale import mappings")?;
        for import_name in imports {
            conn.execute(
                "INSERT OR REPLACE INTO import_to_package_mapping
                 (id, import_name, parent_package_name, \"partition\", hash)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![uniq_id(), import_name, package_name, partition, hash],
            )
            .context("insert import mapping")?;
        }
    }
    Ok(())
}

/// Update an artifact row's hash, path, and version in place, or insert a new
/// row. `(name, platform)` is the natural key.
pub fn upsert_artifact(conn: &Connection, artifact: &ArtifactRecord) -> Result<()> {
    let path_str = artifact.path.to_string_lossy();
    let updated = conn
        .execute(
            "UPDATE artifacts SET hash = ?1, path = ?2, version = ?3, package_name = ?4
             WHERE name = ?5 AND platform = ?6",
            params![
                artifact.hash,
                path_str.as_ref(),
                artifact.version,
                artifact.package_name,
                artifact.name,
                artifact.platform
            ],
        )
        .context("update artifact")?;
    if updated == 0 {
        conn.execute(
            "INSERT INTO artifacts (name, platform, package_name, version, hash, path)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                artifact.name,
                artifact.platform,
                artifact.package_name,
                artifact.version,
                artifact.hash,
                path_str.as_ref()
            ],
        )
        .context("insert artifact")?;
    }
    Ok(())
}
