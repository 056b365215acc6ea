//! Table command implementation.
//!
//! The table command:
//! 1. Loads records (cache or source)
//! 2. Applies search and field filters
//! 3. Prints the requested page
//! 4. Optionally exports every filtered row to CSV

use super::load::load_records;
use super::models::TableArgs;
use crate::dashboard::{apply_filters, paginate, Pagination};
use crate::output::{render_table, write_csv};
use crate::utils::config::{Config, MAX_PAGE_SIZE};
use anyhow::{Context, Result};
use log::info;

/// Execute the table command
pub fn execute_table(config: &Config, args: TableArgs) -> Result<()> {
    validate_table_args(&args)?;

    let records = load_records(config, &args.load)?;
    let filters = args.filters.to_filters(&records);
    let filtered = apply_filters(&records, &filters);
    info!("{} of {} records match filters", filtered.len(), records.len());

    let pagination = Pagination::new(args.page, args.page_size.unwrap_or(config.table.page_size));
    let page = paginate(&filtered, pagination);
    print!("{}", render_table(&page));

    if let Some(path) = &args.csv {
        write_csv(&filtered, path).context("Failed to write CSV export")?;
        info!("✓ CSV written to: {}", path.display());
    }

    Ok(())
}

/// Validate table arguments
pub fn validate_table_args(args: &TableArgs) -> Result<()> {
    if args.page == 0 {
        anyhow::bail!("page must be greater than 0");
    }

    if let Some(size) = args.page_size {
        if size == 0 {
            anyhow::bail!("page_size must be greater than 0");
        }
        if size > MAX_PAGE_SIZE {
            anyhow::bail!("page_size is too large (max {})", MAX_PAGE_SIZE);
        }
    }

    Ok(())
}
