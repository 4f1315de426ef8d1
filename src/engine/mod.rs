//! Engine module for core reconciliation operations

pub mod arg_parser;
pub mod batch;
pub mod diff;
pub mod handlers;
pub mod hashing;
pub mod progress;
pub mod scan;
pub mod store;

// Re-export commonly used functions
pub use arg_parser::{Cli, Commands};
pub use batch::hash_all;
pub use diff::{diff_against_snapshot, path_relative_to};
pub use handlers::handle_run;
pub use hashing::hash_file;
pub use scan::scan;
pub use store::{
    NamedEntity, artifact_snapshot, feedstock_output_snapshot, get_or_create,
    import_map_snapshot, open_db, open_db_in_memory, replace_import_mappings,
    upsert_artifact, upsert_feedstock_output,
};
