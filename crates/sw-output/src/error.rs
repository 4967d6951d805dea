//! Error types for sw-output.

use thiserror::Error;

use sw_table::TableError;

/// Errors that can occur when writing or reading back pipeline artifacts.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{path}: {message}")]
    Parse { path: String, message: String },

    #[error(transparent)]
    Table(#[from] TableError),

    #[error("chart rendering failed: {0}")]
    Plot(String),
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
