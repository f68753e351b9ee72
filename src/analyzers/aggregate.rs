use std::collections::BTreeMap;

use tracing::debug;

use crate::analyzers::types::{FieldSummary, StateSummary};
use crate::analyzers::utility::Accumulator;
use crate::features::AugmentedRecord;
use crate::record::{MonetaryField, ViolationRecord};

#[derive(Default)]
struct StateGroup {
    violations: usize,
    fields: [Accumulator; 5],
}

/// Aggregates augmented records into one [`StateSummary`] per state code.
pub fn aggregate_by_state(records: &[AugmentedRecord]) -> Vec<StateSummary> {
    summarize_states(records.iter().map(|r| &r.record))
}

/// Groups records by exact state code and sums/averages each monetary field.
///
/// Summaries come back sorted by state code. Absent values are left out of
/// both the total and the mean's denominator.
pub fn summarize_states<'a, I>(records: I) -> Vec<StateSummary>
where
    I: IntoIterator<Item = &'a ViolationRecord>,
{
    let mut groups: BTreeMap<&'a str, StateGroup> = BTreeMap::new();

    for record in records {
        let group = groups.entry(record.state.as_str()).or_default();
        group.violations += 1;

        for field in MonetaryField::ALL {
            group.fields[field.index()].push(record.amount(field));
        }
    }

    debug!(states = groups.len(), "Grouped records by state");

    groups
        .into_iter()
        .map(|(state, group)| StateSummary {
            state: state.to_string(),
            violations: group.violations,
            fields: group.fields.map(FieldSummary::from),
        })
        .collect()
}
