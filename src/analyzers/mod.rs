//! Per-state aggregation and chart data.
//!
//! This module groups violation records by state code, computes totals and
//! means of the monetary fields, and shapes both tables into the series the
//! dashboard charts plot.

pub mod aggregate;
pub mod figures;
pub mod types;
pub mod utility;
