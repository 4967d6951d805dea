//! CSV output backend.
//!
//! Entity tables are written as
//!
//! ```text
//! id,time,<param1>,<param2>,...
//! J1,2024-06-01 00:05:00,101.25,
//! ```
//!
//! and comparison tables as `id,time,<param>_sim1,<param>_sim2`.  Every
//! value passes through [`format_value`], so a missing cell is empty and
//! the same table always produces the same bytes.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::Writer;
use log::debug;

use sw_core::time::format_csv;
use sw_table::{ComparisonTable, EntityTable, format_value};

use crate::OutputResult;

/// Writes tables to CSV, rounding every value to a fixed precision.
#[derive(Debug, Clone, Copy)]
pub struct CsvWriter {
    round_decimals: u32,
}

impl CsvWriter {
    pub fn new(round_decimals: u32) -> Self {
        Self { round_decimals }
    }

    pub fn round_decimals(&self) -> u32 {
        self.round_decimals
    }

    /// Write `table` to `path`, replacing any existing file.
    pub fn write_entity_csv(&self, path: &Path, table: &EntityTable) -> OutputResult<()> {
        let file = File::create(path)?;
        self.write_entities(file, table)?;
        debug!("wrote {} {} rows to {}", table.len(), table.kind(), path.display());
        Ok(())
    }

    pub fn write_entities<W: Write>(&self, out: W, table: &EntityTable) -> OutputResult<()> {
        let mut w = Writer::from_writer(out);

        let mut header = vec!["id".to_owned(), "time".to_owned()];
        header.extend(table.columns().iter().cloned());
        w.write_record(&header)?;

        let mut record = Vec::with_capacity(header.len());
        for row in table.rows() {
            record.clear();
            record.push(row.id.to_string());
            record.push(format_csv(&row.time));
            record.extend(row.values.iter().map(|v| format_value(*v, self.round_decimals)));
            w.write_record(&record)?;
        }
        w.flush()?;
        Ok(())
    }

    /// Write `table` to `path`, replacing any existing file.
    pub fn write_comparison_csv(&self, path: &Path, table: &ComparisonTable) -> OutputResult<()> {
        let file = File::create(path)?;
        self.write_comparison(file, table)?;
        debug!(
            "wrote {} {} {} comparison rows to {}",
            table.len(),
            table.kind(),
            table.parameter(),
            path.display()
        );
        Ok(())
    }

    pub fn write_comparison<W: Write>(&self, out: W, table: &ComparisonTable) -> OutputResult<()> {
        let mut w = Writer::from_writer(out);
        w.write_record(table.headers())?;
        for row in table.rows() {
            w.write_record([
                row.id.to_string(),
                format_csv(&row.time),
                format_value(Some(row.sim1), self.round_decimals),
                format_value(Some(row.sim2), self.round_decimals),
            ])?;
        }
        w.flush()?;
        Ok(())
    }
}
