//! Chandb CLI: reconcile package-channel metadata blobs into the store.

use anyhow::Result;
use chandb::engine::arg_parser::Cli;
use chandb::engine::handle_run;
use clap::Parser;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
