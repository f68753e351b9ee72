//! One-shot construction of the record and state summary tables.

use anyhow::{Context, Result};
use tracing::info;

use crate::analyzers::aggregate::aggregate_by_state;
use crate::analyzers::types::StateSummary;
use crate::config::Config;
use crate::error::LoadError;
use crate::features::{AugmentedRecord, DatePolicy, derive_features};
use crate::fetch::read_source;
use crate::parser::parse_records;

/// The two tables handed to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Tables {
    pub records: Vec<AugmentedRecord>,
    pub summaries: Vec<StateSummary>,
}

/// Loads the configured source and builds both tables.
#[tracing::instrument(skip_all, fields(source = %config.source, policy = %config.date_policy))]
pub fn initialize(config: &Config) -> Result<Tables> {
    let bytes = read_source(&config.source)?;
    build_tables(&bytes, config.date_policy)
        .with_context(|| format!("failed to load violations from {}", config.source))
}

/// Parses CSV bytes, derives calendar features and aggregates by state.
pub fn build_tables(bytes: &[u8], policy: DatePolicy) -> Result<Tables, LoadError> {
    let records = parse_records(bytes)?;
    let loaded = records.len();

    let records = derive_features(records, policy)?;
    let summaries = aggregate_by_state(&records);

    info!(
        loaded,
        records = records.len(),
        states = summaries.len(),
        "Violation tables ready"
    );

    Ok(Tables { records, summaries })
}
