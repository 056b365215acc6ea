//! Local cache of the fetched record list.
//!
//! The cache is an injected collaborator rather than ambient state: the
//! repository decides freshness with a `CachePolicy`, and the cache only
//! stores and returns timestamped entries.

use crate::record::Record;
use crate::utils::error::CacheError;
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

/// Records together with the time they were fetched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub fetched_at: DateTime<Utc>,
    pub records: Vec<Record>,
}

impl CacheEntry {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            fetched_at: Utc::now(),
            records,
        }
    }

    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        // Clock skew can put fetched_at in the future; treat that as age zero
        (now - self.fetched_at).to_std().unwrap_or(Duration::ZERO)
    }
}

/// When a cached entry must be refetched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CachePolicy {
    /// `None` means entries never go stale
    pub ttl: Option<Duration>,
}

impl CachePolicy {
    pub fn never_stale() -> Self {
        Self { ttl: None }
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self { ttl: Some(ttl) }
    }

    pub fn is_fresh(&self, entry: &CacheEntry, now: DateTime<Utc>) -> bool {
        match self.ttl {
            Some(ttl) => entry.age(now) < ttl,
            None => true,
        }
    }
}

/// Storage for one cached record list
pub trait RecordCache {
    fn load(&self) -> Result<Option<CacheEntry>, CacheError>;
    fn store(&self, entry: &CacheEntry) -> Result<(), CacheError>;
    fn invalidate(&self) -> Result<(), CacheError>;
}

/// Cache persisted as a JSON file
pub struct FileCache {
    path: PathBuf,
}

impl FileCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordCache for FileCache {
    fn load(&self) -> Result<Option<CacheEntry>, CacheError> {
        if !self.path.exists() {
            debug!("No cache file at {}", self.path.display());
            return Ok(None);
        }

        let file = File::open(&self.path)?;
        let entry: CacheEntry = serde_json::from_reader(BufReader::new(file))?;
        debug!(
            "Loaded {} cached records fetched at {}",
            entry.records.len(),
            entry.fetched_at.to_rfc3339()
        );
        Ok(Some(entry))
    }

    fn store(&self, entry: &CacheEntry) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        // Write beside the target, then rename over it
        let tmp_path = self.path.with_extension("json.tmp");
        {
            let mut writer = BufWriter::new(File::create(&tmp_path)?);
            serde_json::to_writer(&mut writer, entry)?;
            writer.flush()?;
        }
        std::fs::rename(&tmp_path, &self.path)?;

        info!(
            "Cached {} records at {}",
            entry.records.len(),
            self.path.display()
        );
        Ok(())
    }

    fn invalidate(&self) -> Result<(), CacheError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Removed cache file {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process cache
#[derive(Debug, Default)]
pub struct MemoryCache {
    entry: Mutex<Option<CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded cache, handy for tests
    pub fn with_entry(entry: CacheEntry) -> Self {
        Self {
            entry: Mutex::new(Some(entry)),
        }
    }
}

impl RecordCache for MemoryCache {
    fn load(&self) -> Result<Option<CacheEntry>, CacheError> {
        Ok(self.entry.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn store(&self, entry: &CacheEntry) -> Result<(), CacheError> {
        *self.entry.lock().unwrap_or_else(|e| e.into_inner()) = Some(entry.clone());
        Ok(())
    }

    fn invalidate(&self) -> Result<(), CacheError> {
        *self.entry.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    #[test]
    fn test_policy_ttl() {
        let now = Utc::now();
        let entry = CacheEntry {
            fetched_at: now - ChronoDuration::seconds(120),
            records: vec![],
        };

        assert!(CachePolicy::never_stale().is_fresh(&entry, now));
        assert!(CachePolicy::with_ttl(Duration::from_secs(300)).is_fresh(&entry, now));
        assert!(!CachePolicy::with_ttl(Duration::from_secs(60)).is_fresh(&entry, now));
    }

    #[test]
    fn test_future_timestamp_is_fresh() {
        let now = Utc::now();
        let entry = CacheEntry {
            fetched_at: now + ChronoDuration::seconds(30),
            records: vec![],
        };
        assert_eq!(entry.age(now), Duration::ZERO);
    }

    #[test]
    fn test_file_cache_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path().join("nested/records.json"));
        assert!(cache.load().unwrap().is_none());

        let entry = CacheEntry::new(vec![Record::new().with("zone", "A")]);
        cache.store(&entry).unwrap();
        assert_eq!(cache.load().unwrap(), Some(entry));

        cache.invalidate().unwrap();
        assert!(cache.load().unwrap().is_none());
        // Invalidating twice is fine
        cache.invalidate().unwrap();
    }

    #[test]
    fn test_file_cache_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            FileCache::new(path).load(),
            Err(CacheError::Corrupt(_))
        ));
    }
}
