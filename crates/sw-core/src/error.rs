//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant where they need to.

use thiserror::Error;

use crate::EntityKind;

/// Errors produced by `sw-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("`{name}` is not a recognized {kind} parameter")]
    UnknownParameter { kind: EntityKind, name: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Shorthand result type for `sw-core`.
pub type CoreResult<T> = Result<T, CoreError>;
