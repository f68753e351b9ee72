//! CSV decoder for the violations table.

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::error::LoadError;
use crate::record::{REQUIRED_COLUMNS, ViolationRecord};

/// Checks that every required column appears in `headers`.
///
/// # Errors
///
/// Returns [`LoadError::Schema`] listing all missing columns at once.
pub fn validate_headers(headers: &StringRecord) -> Result<(), LoadError> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|h| h == **column))
        .map(|column| column.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(LoadError::Schema { missing })
    }
}

/// Decodes CSV bytes into violation records, in file order.
///
/// # Errors
///
/// Returns an error if the header is missing required columns or a row
/// holds a non-numeric monetary value.
pub fn parse_records(bytes: &[u8]) -> Result<Vec<ViolationRecord>, LoadError> {
    let mut rdr = ReaderBuilder::new().trim(Trim::Headers).from_reader(bytes);

    let headers = rdr.headers()?.clone();
    validate_headers(&headers)?;
    debug!(columns = headers.len(), "Header validated");

    let mut records = Vec::new();
    for (i, result) in rdr.deserialize::<ViolationRecord>().enumerate() {
        let record = result.map_err(|source| LoadError::Row { row: i + 1, source })?;
        records.push(record);
    }

    Ok(records)
}
