//! Progress bar utilities for displaying reconciliation status

use kdam::{Animation, Bar, BarExt};

/// Create a progress bar with a known total.
pub fn create_progress_bar(total: usize, desc: &'static str) -> Bar {
    kdam::tqdm!(
        total = total,
        desc = desc,
        animation = Animation::Classic
    )
}

/// Advance the bar; terminal rendering errors are ignored.
pub fn update_progress_bar(bar: &mut Bar, n: usize) {
    let _ = bar.update(n);
}
