//! Output formatting and persistence for the violation tables.
//!
//! Supports an aligned text table, JSON, and CSV, optionally gzip-compressed.

use anyhow::Result;
use csv::WriterBuilder;
use flate2::Compression;
use flate2::write::GzEncoder;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

use crate::analyzers::types::StateSummary;
use crate::features::AugmentedRecord;
use crate::record::{MonetaryField, REQUIRED_COLUMNS};

/// Logs state summaries using Rust's debug pretty-print format.
pub fn print_pretty(summaries: &[StateSummary]) {
    debug!("{:#?}", summaries);
}

/// Writes any serializable value as pretty-printed JSON.
pub fn write_json<W: Write, T: Serialize + ?Sized>(mut writer: W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    Ok(())
}

/// Writes state summaries as CSV with one header row.
pub fn write_summaries_csv<W: Write>(writer: W, summaries: &[StateSummary]) -> Result<()> {
    let mut writer = WriterBuilder::new().from_writer(writer);

    writer.write_record(StateSummary::header())?;
    for summary in summaries {
        writer.write_record(summary.row())?;
    }
    writer.flush()?;

    Ok(())
}

/// Writes augmented records as CSV: the source columns followed by
/// "Day of the Week" and "Month".
pub fn write_records_csv<W: Write>(writer: W, records: &[AugmentedRecord]) -> Result<()> {
    let mut writer = WriterBuilder::new().from_writer(writer);

    let mut header: Vec<&str> = REQUIRED_COLUMNS.to_vec();
    header.extend(["Day of the Week", "Month"]);
    writer.write_record(&header)?;

    for r in records {
        let src = &r.record;
        let mut row = vec![
            src.issue_date.clone(),
            src.state.clone(),
            src.violation.clone(),
            src.license_type.clone(),
            src.issuing_agency.clone(),
        ];
        for field in MonetaryField::ALL {
            row.push(src.amount(field).map(|v| v.to_string()).unwrap_or_default());
        }
        row.push(r.day_of_week().to_string());
        row.push(r.month().to_string());
        writer.write_record(&row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Writes state summaries as a fixed-width text table.
pub fn write_table<W: Write>(mut writer: W, summaries: &[StateSummary]) -> Result<()> {
    write!(writer, "{:<6} {:>10}", "State", "Violations")?;
    for field in MonetaryField::ALL {
        let name = field.column().trim_end_matches(" Amount");
        write!(writer, " {:>14} {:>12}", format!("Total {name}"), format!("Mean {name}"))?;
    }
    writeln!(writer)?;

    for s in summaries {
        write!(writer, "{:<6} {:>10}", s.state, s.violations)?;
        for field in MonetaryField::ALL {
            let f = s.field(field);
            let mean = f
                .mean
                .map(|m| format!("{m:.2}"))
                .unwrap_or_else(|| "-".to_string());
            write!(writer, " {:>14.2} {:>12}", f.total, mean)?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

/// Creates `path` and hands a buffered writer to `write`, gzip-compressing
/// the stream when `gzip` is set.
pub fn write_file<F>(path: &Path, gzip: bool, write: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    debug!(path = %path.display(), gzip, "Writing output file");
    let file = BufWriter::new(File::create(path)?);

    if gzip {
        let mut encoder = GzEncoder::new(file, Compression::default());
        write(&mut encoder)?;
        encoder.finish()?.flush()?;
    } else {
        let mut file = file;
        write(&mut file)?;
        file.flush()?;
    }

    Ok(())
}
