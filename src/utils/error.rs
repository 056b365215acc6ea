//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while parsing a record payload
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid payload format: {0}")]
    InvalidFormat(String),
}

/// Errors that can occur while fetching records from a source
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Failed to read source file: {0}")]
    ReadFailed(#[from] std::io::Error),

    #[error("Failed to parse records: {0}")]
    Parse(#[from] ParseError),
}

/// Errors that can occur while reading or writing the record cache
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Cache IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Corrupt cache entry: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to read file: {0}")]
    ReadFailed(std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Failed to write CSV: {0}")]
    CsvFailed(#[from] csv::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Errors that can occur while loading the configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadFailed(#[from] std::io::Error),

    #[error("Config TOML parse error: {0}")]
    ParseFailed(#[from] toml::de::Error),

    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}
