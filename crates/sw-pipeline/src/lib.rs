//! `sw-pipeline` — extraction and comparison of SWMM simulation runs.
//!
//! # Stages
//!
//! ```text
//! for each result file:
//!   ① Extract  — query the ResultStore for every (entity, parameter)
//!   ② Persist  — "<run> - nodes data.csv", "<run> - links data.csv",
//!                one chart per parameter per kind
//! if a compare pair is configured:
//!   ③ Check    — all four input CSVs exist, else one MissingInputFile
//!   ④ Load     — both runs back from CSV
//!   ⑤ Compare  — inner join on (id, time) per parameter
//!   ⑥ Persist  — "<param> comparison.csv", one chart per entity
//! ```
//!
//! | Module       | Contents                                         |
//! |--------------|--------------------------------------------------|
//! | [`extract`]  | `extract`, `RunResult`                           |
//! | [`compare`]  | `compare`, `compare_tables`, `ComparisonSet`     |
//! | [`persist`]  | `Persistence` — writes, pre-flight, reload       |
//! | [`pipeline`] | `Pipeline`, `PipelineReport`                     |
//! | [`error`]    | `PipelineError`, `PipelineResult<T>`             |

pub mod compare;
pub mod error;
pub mod extract;
pub mod persist;
pub mod pipeline;


pub use compare::{ComparisonSet, compare, compare_tables};
pub use error::{PipelineError, PipelineResult};
pub use extract::{RunResult, extract};
pub use persist::Persistence;
pub use pipeline::{ComparisonSummary, Pipeline, PipelineReport};
