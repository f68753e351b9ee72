//! Record schema for the parking and camera violations table.

use serde::Deserialize;
use serde::de::{Deserializer, Error as _};

/// Columns the source header must contain. Any others are ignored.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "Issue Date",
    "State",
    "Violation",
    "License Type",
    "Issuing Agency",
    "Fine Amount",
    "Penalty Amount",
    "Interest Amount",
    "Reduction Amount",
    "Payment Amount",
];

/// The five monetary columns that are summed and averaged per state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MonetaryField {
    Fine,
    Penalty,
    Interest,
    Reduction,
    Payment,
}

impl MonetaryField {
    pub const ALL: [MonetaryField; 5] = [
        MonetaryField::Fine,
        MonetaryField::Penalty,
        MonetaryField::Interest,
        MonetaryField::Reduction,
        MonetaryField::Payment,
    ];

    /// Source column name, e.g. `"Fine Amount"`.
    pub fn column(self) -> &'static str {
        match self {
            MonetaryField::Fine => "Fine Amount",
            MonetaryField::Penalty => "Penalty Amount",
            MonetaryField::Interest => "Interest Amount",
            MonetaryField::Reduction => "Reduction Amount",
            MonetaryField::Payment => "Payment Amount",
        }
    }

    /// Lowercase key used in JSON output.
    pub fn key(self) -> &'static str {
        match self {
            MonetaryField::Fine => "fine",
            MonetaryField::Penalty => "penalty",
            MonetaryField::Interest => "interest",
            MonetaryField::Reduction => "reduction",
            MonetaryField::Payment => "payment",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Cell values read as a missing number, matching pandas' default `na_values`.
pub const NA_TOKENS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Reads a monetary cell: NA tokens and `NaN` become `None`, anything else
/// must parse as a number.
fn deserialize_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let cell = raw.trim();
    if NA_TOKENS.contains(&cell) {
        return Ok(None);
    }

    let value: f64 = cell
        .parse()
        .map_err(|_| D::Error::custom(format!("invalid amount {raw:?}")))?;
    Ok(Some(value).filter(|v| !v.is_nan()))
}

/// A single row of the violations table.
///
/// Monetary values are `None` when the cell is empty or holds an NA token.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ViolationRecord {
    #[serde(rename = "Issue Date")]
    pub issue_date: String,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "Violation")]
    pub violation: String,
    #[serde(rename = "License Type")]
    pub license_type: String,
    #[serde(rename = "Issuing Agency")]
    pub issuing_agency: String,

    #[serde(rename = "Fine Amount", deserialize_with = "deserialize_amount")]
    pub fine_amount: Option<f64>,
    #[serde(rename = "Penalty Amount", deserialize_with = "deserialize_amount")]
    pub penalty_amount: Option<f64>,
    #[serde(rename = "Interest Amount", deserialize_with = "deserialize_amount")]
    pub interest_amount: Option<f64>,
    #[serde(rename = "Reduction Amount", deserialize_with = "deserialize_amount")]
    pub reduction_amount: Option<f64>,
    #[serde(rename = "Payment Amount", deserialize_with = "deserialize_amount")]
    pub payment_amount: Option<f64>,
}

impl ViolationRecord {
    /// Returns the value of a monetary field, if present.
    pub fn amount(&self, field: MonetaryField) -> Option<f64> {
        match field {
            MonetaryField::Fine => self.fine_amount,
            MonetaryField::Penalty => self.penalty_amount,
            MonetaryField::Interest => self.interest_amount,
            MonetaryField::Reduction => self.reduction_amount,
            MonetaryField::Payment => self.payment_amount,
        }
    }
}
