use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::utils::config::PackagePaths;

/// Mirror and index package-channel metadata with content-aware diffing.
#[derive(Clone, Parser)]
#[command(name = "chandb")]
#[command(about = "Reconcile a metadata blob corpus against the channel store.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the store database. Default: `chandb.db` in the working directory.
    #[arg(long, short, global = true)]
    pub db: Option<PathBuf>,

    /// Verbose output (debug logging and a progress bar).
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Clone, Subcommand)]
pub enum Commands {
    /// Ingest feedstock-output blobs (`<package>.json`, each listing the
    /// feedstocks that build the package).
    UpdateFeedstockOutputs {
        /// Root directory of the feedstock-output blobs.
        #[arg(long, short)]
        path: PathBuf,
    },
    /// Ingest import-to-package map blobs (`<package>.<partition>.json`).
    UpdateImportMaps {
        /// Root directory of the import-map blobs.
        #[arg(long, short)]
        path: PathBuf,
    },
    /// Refresh artifact records (`<package>/<channel>/<arch>/<name>.json`).
    UpdateArtifacts {
        /// Root directory of the harvested artifact blobs.
        #[arg(long, short)]
        path: PathBuf,
    },
}

impl Cli {
    /// Get the store path, defaulting to the package db filename in the
    /// working directory.
    pub fn db_path(&self) -> PathBuf {
        self.db
            .clone()
            .unwrap_or_else(|| PathBuf::from(PackagePaths::get().db_filename()))
    }
}
