use super::load::load_records;
use super::models::LoadArgs;
use crate::dashboard::filter_options;
use crate::output::render_options;
use crate::record::Field;
use crate::source::{FileCache, RecordCache};
use crate::utils::config::{Config, SCHEMA_VERSION};
use anyhow::{Context, Result};

/// Load records and report how many there are
pub fn fetch_records(config: &Config, args: &LoadArgs) -> Result<()> {
    let records = load_records(config, args)?;
    println!("✓ {} records available", records.len());
    Ok(())
}

/// Print the filter choices for every filterable field
pub fn display_options(config: &Config, args: &LoadArgs) -> Result<()> {
    let records = load_records(config, args)?;
    for field in Field::FILTERABLE {
        print!("{}", render_options(field, &filter_options(&records, field)));
    }
    Ok(())
}

/// Remove the cached record list
pub fn clear_cache(config: &Config) -> Result<()> {
    FileCache::new(config.cache.path.clone())
        .invalidate()
        .context("Failed to clear record cache")?;
    println!("✓ Cache cleared: {}", config.cache.path.display());
    Ok(())
}

/// Display version information
pub fn display_version() {
    println!("Fleetboard v{}", env!("CARGO_PKG_VERSION"));
    println!("Chart Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Record filtering, chart aggregation and CSV export for fleet datasets.");
}
