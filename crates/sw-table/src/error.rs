//! Table error type.

use thiserror::Error;

use sw_core::{EntityId, EntityKind, Timestamp};

#[derive(Debug, Error)]
pub enum TableError {
    #[error("duplicate row for {id} at {time}")]
    DuplicateRow { id: EntityId, time: Timestamp },

    #[error("row has {got} values but the table has {expected} parameter columns")]
    ArityMismatch { expected: usize, got: usize },

    #[error("{kind} table has no `{column}` column")]
    MissingColumn { kind: EntityKind, column: String },

    #[error("column index {index} out of range for {count} columns")]
    ColumnIndex { index: usize, count: usize },
}

pub type TableResult<T> = Result<T, TableError>;
