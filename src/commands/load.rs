//! Shared record loading for commands.

use super::models::LoadArgs;
use crate::record::{Normalization, Record};
use crate::source::{source_for, CachePolicy, FileCache, LoadOrigin, RecordRepository, RecordSource};
use crate::utils::config::Config;
use anyhow::{Context, Result};
use log::info;

/// Repository type used by every command
pub type Repository = RecordRepository<Box<dyn RecordSource>, FileCache>;

/// Build the repository from config, with command-line overrides applied
pub fn open_repository(config: &Config, args: &LoadArgs) -> Result<Repository> {
    let location = args
        .source
        .clone()
        .unwrap_or_else(|| config.source.location.clone());
    validate_source(&location)?;

    let source = source_for(&location, config.fetch_timeout())
        .with_context(|| format!("Failed to create record source for {}", location))?;

    let cache = (config.cache.enabled && !args.no_cache)
        .then(|| FileCache::new(config.cache.path.clone()));

    let policy = match config.cache_ttl() {
        Some(ttl) => CachePolicy::with_ttl(ttl),
        None => CachePolicy::never_stale(),
    };

    let normalization = if args.normalize_numbers {
        Normalization::NumericStrings
    } else {
        config.records.normalization
    };

    Ok(RecordRepository::new(source, cache, policy).with_normalization(normalization))
}

/// Load records, honoring `--refresh`
pub fn load_records(config: &Config, args: &LoadArgs) -> Result<Vec<Record>> {
    let repository = open_repository(config, args)?;

    let records = if args.refresh {
        repository.refresh().context("Failed to fetch records")?
    } else {
        let (records, origin) = repository.load().context("Failed to load records")?;
        if origin == LoadOrigin::Cache {
            info!("Served from cache (use --refresh to refetch)");
        }
        records
    };

    Ok(records)
}

/// Validate a source location
///
/// Remote locations must use http:// or https://. Anything without a
/// scheme is treated as a file path.
pub fn validate_source(location: &str) -> Result<()> {
    if location.trim().is_empty() {
        anyhow::bail!("Source cannot be empty");
    }

    if location.contains("://")
        && !location.starts_with("http://")
        && !location.starts_with("https://")
    {
        anyhow::bail!("Source URL must start with http:// or https://");
    }

    Ok(())
}
