//! Load entity tables back from the CSV files [`CsvWriter`] produces.
//!
//! The header must begin with `id,time`; every further column is a
//! parameter.  Empty cells load as missing values.  A repeated
//! `(id, time)` key is an error, not a silent overwrite.
//!
//! [`CsvWriter`]: crate::CsvWriter

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use sw_core::time::parse_timestamp;
use sw_core::{EntityId, EntityKind};
use sw_table::{EntityTable, TableRow};

use crate::{OutputError, OutputResult};

/// Load a CSV file from disk.
pub fn load_entity_csv(path: &Path, kind: EntityKind) -> OutputResult<EntityTable> {
    let file = std::fs::File::open(path)?;
    load_entity_reader(file, kind, &path.display().to_string())
}

/// Load from any `Read` source.  `source` names the input in error messages.
pub fn load_entity_reader<R: Read>(reader: R, kind: EntityKind, source: &str) -> OutputResult<EntityTable> {
    let parse_err = |message: String| OutputError::Parse { path: source.to_owned(), message };

    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let header = rdr.headers()?.clone();
    if header.get(0) != Some("id") || header.get(1) != Some("time") {
        return Err(parse_err(format!(
            "header must start with `id,time`, found `{}`",
            header.iter().take(2).collect::<Vec<_>>().join(",")
        )));
    }
    let columns: Vec<String> = header.iter().skip(2).map(str::to_owned).collect();
    let mut table = EntityTable::new(kind, columns);

    let mut record = StringRecord::new();
    while rdr.read_record(&mut record)? {
        let line = record.position().map_or(0, |p| p.line());
        table.push(parse_row(&record).map_err(|e| parse_err(format!("line {line}: {e}")))?)?;
    }
    Ok(table)
}

fn parse_row(record: &StringRecord) -> Result<TableRow, String> {
    let id = record.get(0).unwrap_or_default();
    if id.is_empty() {
        return Err("empty id".into());
    }
    let time = parse_timestamp(record.get(1).unwrap_or_default()).map_err(|e| e.to_string())?;

    let values = record
        .iter()
        .skip(2)
        .map(|cell| {
            if cell.is_empty() {
                Ok(None)
            } else {
                cell.parse::<f64>().map(Some).map_err(|_| format!("invalid number {cell:?}"))
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TableRow { id: EntityId::new(id), time, values })
}
