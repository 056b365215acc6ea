//! JSON chart report writer.

use super::report::DashboardReport;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Write a chart report to a pretty-printed JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_report(report: &DashboardReport, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing chart report to: {}", output_path.display());

    super::validate_path(output_path)?;
    super::ensure_parent(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, report).map_err(OutputError::SerializationFailed)?;

    info!(
        "Report written successfully ({} charts, {} bytes)",
        report.charts.len(),
        std::fs::metadata(output_path).map(|m| m.len()).unwrap_or(0)
    );

    Ok(())
}

/// Read a chart report from a JSON file
///
/// # Errors
/// * `OutputError::ReadFailed` - File cannot be opened
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_report(input_path: impl AsRef<Path>) -> Result<DashboardReport, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading chart report from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::ReadFailed)?;
    let report: DashboardReport = serde_json::from_reader(BufReader::new(file))
        .map_err(OutputError::SerializationFailed)?;

    debug!(
        "Report loaded: version {}, {} charts",
        report.version,
        report.charts.len()
    );

    Ok(report)
}
