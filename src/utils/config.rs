//! Configuration and constants for the CLI.
//!
//! Values come from an optional `fleetboard.toml`; every section falls back
//! to the defaults below when omitted.

use super::error::ConfigError;
use crate::aggregator::ColorScheme;
use crate::record::Normalization;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Upstream endpoint serving the record list
pub const DEFAULT_SOURCE_URL: &str = "http://20.121.141.248:5000/assignment/feb/sde_fe";

/// Default timeout for source requests
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Default location of the on-disk record cache
pub const DEFAULT_CACHE_PATH: &str = ".fleetboard/records.json";

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_PATH: &str = "fleetboard.toml";

/// Current chart report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Rows per table page
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 1000;

/// Label used for missing or null field values
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Complete application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub records: RecordsConfig,

    #[serde(default)]
    pub table: TableConfig,

    #[serde(default)]
    pub charts: ChartsConfig,
}

/// Where records are fetched from
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceConfig {
    /// HTTP(S) endpoint or local JSON file
    pub location: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            location: DEFAULT_SOURCE_URL.to_string(),
            timeout_secs: DEFAULT_FETCH_TIMEOUT.as_secs(),
        }
    }
}

/// Local record cache
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    pub path: PathBuf,

    /// Entries older than this are refetched. Absent means never stale.
    pub ttl_secs: Option<u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: PathBuf::from(DEFAULT_CACHE_PATH),
            ttl_secs: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RecordsConfig {
    #[serde(default)]
    pub normalization: Normalization,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TableConfig {
    pub page_size: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ChartsConfig {
    #[serde(default)]
    pub color_scheme: ColorScheme,
}

impl Config {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.source.timeout_secs)
    }

    pub fn cache_ttl(&self) -> Option<Duration> {
        self.cache.ttl_secs.map(Duration::from_secs)
    }

    /// Reject values that would make later stages misbehave
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source.location.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "source.location cannot be empty".to_string(),
            ));
        }
        if self.source.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "source.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.table.page_size == 0 || self.table.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::InvalidValue(format!(
                "table.page_size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }
        Ok(())
    }
}

/// Load configuration from a TOML file
///
/// # Errors
/// * `ConfigError::ReadFailed` - If file cannot be read
/// * `ConfigError::ParseFailed` - If TOML is invalid
/// * `ConfigError::InvalidValue` - If a value is out of range
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    debug!("Loading config from: {}", path.display());

    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}

/// Load the config at `path` if given, else `fleetboard.toml` if it exists,
/// else defaults.
pub fn resolve_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(p) => load_config(p),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                load_config(default_path)
            } else {
                debug!("No config file found, using defaults");
                Ok(Config::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.table.page_size, DEFAULT_PAGE_SIZE);
        assert!(config.cache_ttl().is_none());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [cache]
            enabled = false
            path = "/tmp/records.json"
            ttl_secs = 600

            [records]
            normalization = "numeric-strings"
            "#,
        )
        .unwrap();

        assert!(!config.cache.enabled);
        assert_eq!(config.cache_ttl(), Some(Duration::from_secs(600)));
        assert_eq!(config.records.normalization, Normalization::NumericStrings);
        assert_eq!(config.source.location, DEFAULT_SOURCE_URL);
        assert_eq!(config.charts.color_scheme, ColorScheme::Palette);
    }

    #[test]
    fn test_section_with_some_keys_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
            [source]
            location = "records.json"

            [cache]
            ttl_secs = 600

            [table]
            "#,
        )
        .unwrap();

        assert_eq!(config.source.location, "records.json");
        assert_eq!(config.fetch_timeout(), DEFAULT_FETCH_TIMEOUT);
        assert!(config.cache.enabled);
        assert_eq!(config.cache.path, PathBuf::from(DEFAULT_CACHE_PATH));
        assert_eq!(config.cache_ttl(), Some(Duration::from_secs(600)));
        assert_eq!(config.table.page_size, DEFAULT_PAGE_SIZE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_page_size() {
        let mut config = Config::default();
        config.table.page_size = 0;
        assert!(config.validate().is_err());
    }
}
