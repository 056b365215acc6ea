//! CSV export of table rows.

use crate::record::{Field, Record};
use crate::utils::error::OutputError;
use log::info;
use std::io::Write;
use std::path::Path;

fn write_rows<W: Write>(writer: &mut csv::Writer<W>, records: &[Record]) -> Result<(), OutputError> {
    writer.write_record(Field::ALL.iter().map(|f| f.title()))?;
    for record in records {
        writer.write_record(Field::ALL.iter().map(|f| record.get(f).to_string()))?;
    }
    writer.flush().map_err(OutputError::WriteFailed)?;
    Ok(())
}

/// Write `records` as CSV with one column per known field.
/// Null and missing values become empty cells.
pub fn write_csv(records: &[Record], output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    super::validate_path(output_path)?;
    super::ensure_parent(output_path)?;

    let mut writer = csv::Writer::from_path(output_path)?;
    write_rows(&mut writer, records)?;

    info!(
        "Exported {} rows to {}",
        records.len(),
        output_path.display()
    );
    Ok(())
}

/// Render `records` as a CSV string
pub fn to_csv_string(records: &[Record]) -> Result<String, OutputError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    write_rows(&mut writer, records)?;

    let bytes = writer
        .into_inner()
        .map_err(|e| OutputError::WriteFailed(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_csv_columns_and_nulls() {
        let records = vec![
            Record::new()
                .with("username", "Asha")
                .with("zone", "A")
                .with("device_brand", "Samsung")
                .with("sdk_int", 30i64)
                .with("vehicle_brand", "Bajaj")
                .with("vehicle_cc", 150i64),
            Record::new().with("username", "Ben, Jr."),
        ];

        let csv = to_csv_string(&records).unwrap();
        assert_eq!(
            csv,
            "Name,Zone,Device Brand,SDK Version,Vehicle Brand,Vehicle CC\n\
             Asha,A,Samsung,30,Bajaj,150\n\
             \"Ben, Jr.\",,,,,\n"
        );
    }
}
