//! Output formatting for projections.
//!
//! Supports debug logging, JSON serialization, and CSV export of batch records.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use tracing::debug;

use crate::batch::ProjectionRecord;
use crate::projector::ProjectionResult;

/// Logs a projection using Rust's debug pretty-print format.
pub fn print_pretty(result: &ProjectionResult) {
    debug!("{:#?}", result);
}

/// Writes a projection as pretty-printed JSON to `writer`.
pub fn write_json<W: Write>(mut writer: W, result: &ProjectionResult) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, result)?;
    writeln!(writer)?;
    Ok(())
}

/// Batch records wrapped with the time they were produced, for JSON output.
#[derive(Debug, Serialize)]
pub struct BatchReport {
    pub generated_at: DateTime<Utc>,
    pub records: Vec<ProjectionRecord>,
}

impl BatchReport {
    pub fn new(records: Vec<ProjectionRecord>) -> Self {
        Self {
            generated_at: Utc::now(),
            records,
        }
    }
}

/// Writes batch records as CSV, with a header row, to `writer`.
pub fn write_records<W: Write>(writer: W, records: &[ProjectionRecord]) -> Result<()> {
    debug!(count = records.len(), "Writing CSV records");

    let mut writer = WriterBuilder::new().has_headers(true).from_writer(writer);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}

/// Writes a [`BatchReport`] as pretty-printed JSON to `writer`.
pub fn write_report<W: Write>(mut writer: W, report: &BatchReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer)?;
    Ok(())
}
