//! Fetch record lists from the upstream endpoint or a local file.

use crate::record::{parse_payload, parse_payload_str, Record};
use crate::utils::config::DEFAULT_FETCH_TIMEOUT;
use crate::utils::error::SourceError;
use log::{debug, info};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::path::PathBuf;
use std::time::Duration;

/// Anything that can produce the full record collection
pub trait RecordSource {
    fn fetch(&self) -> Result<Vec<Record>, SourceError>;

    /// Human-readable origin for logs
    fn describe(&self) -> String;
}

/// HTTP client for the record endpoint
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    /// Create a source with the default timeout
    pub fn new(url: impl Into<String>) -> Result<Self, SourceError> {
        Self::with_timeout(url, DEFAULT_FETCH_TIMEOUT)
    }

    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(SourceError::RequestFailed)?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

impl RecordSource for HttpSource {
    fn fetch(&self) -> Result<Vec<Record>, SourceError> {
        info!("Fetching records from: {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .map_err(SourceError::RequestFailed)?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status, &response.text().unwrap_or_default()));
        }

        let payload: serde_json::Value = response.json().map_err(SourceError::RequestFailed)?;
        debug!("Received payload, parsing records");

        Ok(parse_payload(&payload)?)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Records stored in a local JSON file
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSource for FileSource {
    fn fetch(&self) -> Result<Vec<Record>, SourceError> {
        info!("Reading records from: {}", self.path.display());
        let raw = std::fs::read_to_string(&self.path)?;
        Ok(parse_payload_str(&raw)?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

fn status_error(status: StatusCode, body: &str) -> SourceError {
    SourceError::InvalidResponse(format!("HTTP {}: {}", status, body.trim()))
}

fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Pick an HTTP or file source from a location string
pub fn source_for(location: &str, timeout: Duration) -> Result<Box<dyn RecordSource>, SourceError> {
    if is_remote(location) {
        Ok(Box::new(HttpSource::with_timeout(location, timeout)?))
    } else {
        Ok(Box::new(FileSource::new(location)))
    }
}

impl<S: RecordSource + ?Sized> RecordSource for Box<S> {
    fn fetch(&self) -> Result<Vec<Record>, SourceError> {
        (**self).fetch()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
