//! Data types produced by the aggregation pipeline.

use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};

use crate::analyzers::utility::Accumulator;
use crate::record::MonetaryField;

/// Total and mean of one monetary field within a state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldSummary {
    pub total: f64,
    /// Number of records where the field was present.
    pub present: usize,
    /// `None` when no record in the group had the field.
    pub mean: Option<f64>,
}

impl From<Accumulator> for FieldSummary {
    fn from(acc: Accumulator) -> Self {
        FieldSummary {
            total: acc.total(),
            present: acc.present(),
            mean: acc.mean(),
        }
    }
}

/// Aggregated statistics for a single state code.
#[derive(Debug, Clone, PartialEq)]
pub struct StateSummary {
    pub state: String,
    /// Number of violation records with this state code.
    pub violations: usize,
    pub(crate) fields: [FieldSummary; 5],
}

impl StateSummary {
    pub fn field(&self, field: MonetaryField) -> &FieldSummary {
        &self.fields[field.index()]
    }

    /// Column names of the flat tabular form, matching [`StateSummary::row`].
    pub fn header() -> Vec<String> {
        let mut header = vec!["State".to_string(), "Violations Amount".to_string()];
        for field in MonetaryField::ALL {
            header.push(format!("Total {}", field.column()));
            header.push(format!("Mean {}", field.column()));
        }
        header
    }

    /// Flat tabular form. A missing mean is rendered as an empty cell.
    pub fn row(&self) -> Vec<String> {
        let mut row = vec![self.state.clone(), self.violations.to_string()];
        for field in MonetaryField::ALL {
            let summary = self.field(field);
            row.push(summary.total.to_string());
            row.push(summary.mean.map(|m| m.to_string()).unwrap_or_default());
        }
        row
    }
}

impl Serialize for StateSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("StateSummary", 2 + MonetaryField::ALL.len())?;
        s.serialize_field("state", &self.state)?;
        s.serialize_field("violations", &self.violations)?;
        for field in MonetaryField::ALL {
            s.serialize_field(field.key(), self.field(field))?;
        }
        s.end()
    }
}
