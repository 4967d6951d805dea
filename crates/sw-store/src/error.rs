//! Result-store error type.

use thiserror::Error;

use sw_core::{EntityId, EntityKind};

/// Errors produced by `sw-store`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{kind} {id} not found in result store")]
    MissingEntity { kind: EntityKind, id: EntityId },

    #[error("{kind} parameter `{name}` not available in result store")]
    MissingParameter { kind: EntityKind, name: String },

    #[error("malformed result file: {0}")]
    Format(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
