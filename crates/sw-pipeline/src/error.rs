//! Pipeline error type.
//!
//! Store and configuration failures that name a missing entity or
//! parameter are lifted into the pipeline's own variants, so callers see
//! one `MissingParameter` whether the name was unknown to the toolkit or
//! absent from a particular result file.

use std::path::PathBuf;

use thiserror::Error;

use sw_core::{CoreError, EntityId, EntityKind};
use sw_output::OutputError;
use sw_store::StoreError;
use sw_table::TableError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{kind} {id} not found in result store")]
    MissingEntity { kind: EntityKind, id: EntityId },

    #[error("{kind} parameter `{name}` is not available")]
    MissingParameter { kind: EntityKind, name: String },

    #[error("missing input file(s): {}", join_paths(.files))]
    MissingInputFile { files: Vec<PathBuf> },

    #[error("configuration error: {0}")]
    Config(CoreError),

    #[error(transparent)]
    Store(StoreError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

pub type PipelineResult<T> = Result<T, PipelineError>;

fn join_paths(files: &[PathBuf]) -> String {
    files.iter().map(|f| f.display().to_string()).collect::<Vec<_>>().join(", ")
}

impl From<StoreError> for PipelineError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::MissingEntity { kind, id } => PipelineError::MissingEntity { kind, id },
            StoreError::MissingParameter { kind, name } => PipelineError::MissingParameter { kind, name },
            other => PipelineError::Store(other),
        }
    }
}

impl From<CoreError> for PipelineError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::UnknownParameter { kind, name } => PipelineError::MissingParameter { kind, name },
            other => PipelineError::Config(other),
        }
    }
}
