//! CLI command handlers: open the store, run the requested reconciliation.

use anyhow::Result;
use log::info;

use crate::engine::arg_parser::{Cli, Commands};
use crate::engine::store::open_db;
use crate::reconcile;
use crate::utils::setup_logging;

/// Dispatch one CLI invocation. Setup failures (bad path, unopenable store)
/// propagate and exit non-zero; per-item failures inside a run are already
/// reduced to log lines and counted in the outcome.
pub fn handle_run(cli: &Cli) -> Result<()> {
    setup_logging(cli.verbose);
    let db_path = cli.db_path();
    log::debug!("store: {}", db_path.display());
    let mut conn = open_db(&db_path)?;

    let outcome = match &cli.command {
        Commands::UpdateFeedstockOutputs { path } => {
            reconcile::feedstock_outputs::update(&mut conn, path, cli.verbose)?
        }
        Commands::UpdateImportMaps { path } => {
            reconcile::import_maps::update(&mut conn, path, cli.verbose)?
        }
        Commands::UpdateArtifacts { path } => {
            reconcile::artifacts::update(&mut conn, path, cli.verbose)?
        }
    };

    if outcome.changed > 0 {
        info!(
            "Done: {} changed, {} applied, {} skipped after errors.",
            outcome.changed, outcome.applied, outcome.failed
        );
    }
    Ok(())
}
