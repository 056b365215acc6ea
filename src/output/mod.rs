//! Output writers for chart reports, CSV exports and terminal views.
//!
//! This module handles writing data to disk in various formats:
//! - JSON chart reports (Chart.js dataset shape)
//! - CSV exports of the filtered table
//! - Colored terminal summaries

pub mod csv_export;
pub mod json;
pub mod report;
pub mod terminal;

// Re-export main functions
pub use csv_export::{to_csv_string, write_csv};
pub use json::{read_report, write_report};
pub use report::DashboardReport;
pub use terminal::{render_chart, render_options, render_table};

use crate::utils::error::OutputError;
use log::debug;
use std::path::Path;

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Create parent directories of `path` if needed
pub(crate) fn ensure_parent(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}
