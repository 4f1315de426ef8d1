//! Batched parallel hashing: partition a file listing into fixed-size batches
//! and fan them out to a bounded worker pool. Each worker hashes its batch and
//! writes `path,fingerprint` lines to a batch-local scratch file, so results
//! never all reside in memory at once.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread;

use anyhow::{Context, Result, bail};
use crossbeam_channel::bounded;

use super::hashing::hash_file;

/// Hash one batch into its scratch file. Per-file hash failures (e.g. a file
/// deleted mid-scan) are logged and the file omitted; only scratch-file I/O
/// aborts the batch.
fn process_batch(batch_files: &[PathBuf], scratch_file: &Path) -> Result<()> {
    let file = File::create(scratch_file)
        .with_context(|| format!("create scratch file {}", scratch_file.display()))?;
    let mut writer = BufWriter::new(file);
    for path in batch_files {
        match hash_file(path) {
            Ok(fingerprint) => {
                writeln!(writer, "{},{}", path.display(), fingerprint)
                    .with_context(|| format!("write scratch file {}", scratch_file.display()))?;
            }
            Err(err) => {
                log::warn!("skipping unreadable file {}: {:#}", path.display(), err);
            }
        }
    }
    writer
        .flush()
        .with_context(|| format!("flush scratch file {}", scratch_file.display()))?;
    Ok(())
}

/// Partition `paths` into contiguous batches of `batch_size` (last batch may
/// be smaller) and hash them on a bounded worker pool sized to available
/// concurrency. One scratch file per batch is written to `out_dir`; all
/// scratch files are complete in final form when this returns (the scope
/// closes only after every worker exits). Returns the scratch file paths in
/// batch order.
pub fn hash_all(paths: &[PathBuf], batch_size: usize, out_dir: &Path) -> Result<Vec<PathBuf>> {
    if batch_size == 0 {
        bail!("batch size must be at least 1");
    }

    let jobs: Vec<(PathBuf, &[PathBuf])> = paths
        .chunks(batch_size)
        .enumerate()
        .map(|(i, chunk)| (out_dir.join(format!("batch_{i}.txt")), chunk))
        .collect();
    let scratch_files: Vec<PathBuf> = jobs.iter().map(|(f, _)| f.clone()).collect();

    log::debug!(
        "hashing {} files in {} batches of up to {}",
        paths.len(),
        jobs.len(),
        batch_size
    );

    let num_workers = rayon::current_num_threads().min(jobs.len().max(1));
    let first_error: Arc<Mutex<Option<anyhow::Error>>> = Arc::new(Mutex::new(None));

    let (job_tx, job_rx) = bounded::<(PathBuf, &[PathBuf])>(jobs.len().max(1));
    thread::scope(|s| {
        for _ in 0..num_workers {
            let job_rx = job_rx.clone();
            let first_error = Arc::clone(&first_error);
            s.spawn(move || {
                while let Ok((scratch_file, batch_files)) = job_rx.recv() {
                    if let Err(err) = process_batch(batch_files, &scratch_file) {
                        let _ = first_error.lock().unwrap().get_or_insert(err);
                    }
                }
            });
        }
        for job in jobs {
            if job_tx.send(job).is_err() {
                break;
            }
        }
        drop(job_tx);
    });

    if let Some(err) = first_error.lock().unwrap().take() {
        return Err(err);
    }
    Ok(scratch_files)
}
