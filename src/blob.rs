//! Blob interpreters: parse one metadata blob's payload into a normalized
//! in-memory shape. Pure over bytes; `read_*` helpers add the file I/O.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::BlobError;

/// Wire shape of one import-map entry: the set of packages providing a symbol.
#[derive(Debug, Deserialize)]
struct ImportEntry {
    elements: Vec<String>,
}

/// Parse a feedstock-output blob: a single-key object whose value is the
/// ordered list of feedstock names, e.g. `{"feedstocks": ["numpy"]}`.
/// Zero or more than one top-level key is ambiguous and rejected.
pub fn parse_feedstock_blob(bytes: &[u8]) -> Result<Vec<String>, BlobError> {
    let payload: BTreeMap<String, Vec<String>> = serde_json::from_slice(bytes)?;
    if payload.len() != 1 {
        return Err(BlobError::AmbiguousShape {
            found: payload.len(),
        });
    }
    Ok(payload.into_values().next().unwrap_or_default())
}

/// Parse an import-map blob `{import: {"elements": [package, ..]}, ..}` and
/// invert it into package name -> list of import symbols.
pub fn parse_import_map_blob(
    bytes: &[u8],
) -> Result<BTreeMap<String, Vec<String>>, BlobError> {
    let payload: BTreeMap<String, ImportEntry> = serde_json::from_slice(bytes)?;
    let mut packages_to_imports: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (import_name, entry) in payload {
        for package in entry.elements {
            packages_to_imports
                .entry(package)
                .or_default()
                .push(import_name.clone());
        }
    }
    Ok(packages_to_imports)
}

/// Read and parse a feedstock-output blob from disk.
pub fn read_feedstock_blob(path: &Path) -> Result<Vec<String>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("read blob {}", path.display()))?;
    parse_feedstock_blob(&bytes)
        .with_context(|| format!("interpret feedstock-output blob {}", path.display()))
}

/// Read and parse an import-map blob from disk.
pub fn read_import_map_blob(path: &Path) -> Result<BTreeMap<String, Vec<String>>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("read blob {}", path.display()))?;
    parse_import_map_blob(&bytes)
        .with_context(|| format!("interpret import-map blob {}", path.display()))
}
