//! Error types shared by the loading and derivation stages.

use thiserror::Error;

/// An issue date whose leading `YYYY-MM-DD` could not be read as a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("row {row}: invalid issue date {value:?}, expected YYYY-MM-DD prefix")]
pub struct ParseError {
    /// 1-based data row (header excluded), or 0 when parsed outside a table.
    pub row: usize,
    pub value: String,
}

/// Errors that can occur while reading and decoding the violations table.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The header lacks columns the record schema requires.
    #[error("missing required column(s): {}", .missing.join(", "))]
    Schema {
        /// Every required column not present in the header.
        missing: Vec<String>,
    },

    /// A data row could not be decoded into a record.
    #[error("row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: csv::Error,
    },

    /// The source could not be read as CSV at all.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Date(#[from] ParseError),
}

/// A date policy name other than `abort` or `skip`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown date policy {0:?}, expected \"abort\" or \"skip\"")]
pub struct UnknownDatePolicy(pub String);
