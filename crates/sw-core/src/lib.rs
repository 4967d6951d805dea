//! `sw-core` — foundational types for the SWMM timeseries toolkit.
//!
//! This crate is a dependency of every other `sw-*` crate.  It has no `sw-*`
//! dependencies of its own.
//!
//! # What lives here
//!
//! | Module      | Contents                                                 |
//! |-------------|----------------------------------------------------------|
//! | [`ids`]     | `EntityId`, `EntityKind`                                 |
//! | [`param`]   | `NodeAttribute`, `LinkAttribute`, `Parameter`            |
//! | [`time`]    | `Timestamp`, CSV/label formatting, SWMM date conversion  |
//! | [`config`]  | `PipelineConfig`, `run_name`                             |
//! | [`error`]   | `CoreError`, `CoreResult`                                |

pub mod config;
pub mod error;
pub mod ids;
pub mod param;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{PipelineConfig, run_name};
pub use error::{CoreError, CoreResult};
pub use ids::{EntityId, EntityKind};
pub use param::{Attribute, LinkAttribute, NodeAttribute, Parameter};
pub use time::Timestamp;
