//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod charts;
pub mod load;
pub mod models;
pub mod table;
pub mod utils;

// Re-export main command functions
pub use charts::execute_charts;
pub use load::{load_records, open_repository, validate_source};
pub use models::{ChartsArgs, FilterArgs, LoadArgs, TableArgs};
pub use table::{execute_table, validate_table_args};
pub use utils::{clear_cache, display_options, display_version, fetch_records};
