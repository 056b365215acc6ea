//! Repository: cached-or-fetched record loading.

use super::cache::{CacheEntry, CachePolicy, RecordCache};
use super::client::RecordSource;
use crate::record::{normalize_records, Normalization, Record};
use crate::utils::error::SourceError;
use chrono::Utc;
use log::{info, warn};

/// Where a load was served from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    Cache,
    Source,
}

/// Loads records from a cache when fresh, else from the source.
///
/// Cache failures never fail a load: an unreadable entry counts as a miss
/// and a failed write is only logged.
pub struct RecordRepository<S, C> {
    source: S,
    cache: Option<C>,
    policy: CachePolicy,
    normalization: Normalization,
}

impl<S: RecordSource, C: RecordCache> RecordRepository<S, C> {
    pub fn new(source: S, cache: Option<C>, policy: CachePolicy) -> Self {
        Self {
            source,
            cache,
            policy,
            normalization: Normalization::default(),
        }
    }

    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    /// Cached records if fresh, otherwise fetch and cache
    pub fn load(&self) -> Result<(Vec<Record>, LoadOrigin), SourceError> {
        if let Some(entry) = self.cached_entry() {
            if self.policy.is_fresh(&entry, Utc::now()) {
                info!("Using {} cached records", entry.records.len());
                return Ok((self.normalized(entry.records), LoadOrigin::Cache));
            }
            info!("Cached records are stale, refetching");
        }

        Ok((self.refresh()?, LoadOrigin::Source))
    }

    /// Fetch from the source regardless of the cache, then cache the result
    pub fn refresh(&self) -> Result<Vec<Record>, SourceError> {
        info!("Loading records from {}", self.source.describe());
        let records = self.source.fetch()?;

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.store(&CacheEntry::new(records.clone())) {
                warn!("Failed to write record cache: {}", e);
            }
        }

        Ok(self.normalized(records))
    }

    /// Drop any cached entry
    pub fn invalidate(&self) {
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.invalidate() {
                warn!("Failed to invalidate record cache: {}", e);
            }
        }
    }

    fn cached_entry(&self) -> Option<CacheEntry> {
        let cache = self.cache.as_ref()?;
        match cache.load() {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Ignoring unreadable record cache: {}", e);
                None
            }
        }
    }

    // The cache holds raw records so a policy change applies on the next load
    fn normalized(&self, mut records: Vec<Record>) -> Vec<Record> {
        normalize_records(&mut records, self.normalization);
        records
    }
}
