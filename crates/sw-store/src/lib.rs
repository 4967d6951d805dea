//! `sw-store` — access to recorded simulation results.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`store`]   | `ResultStore` trait, `Series`                               |
//! | [`memory`]  | `MemoryStore`, `MemoryStoreBuilder`                         |
//! | [`outfile`] | `OutFile` — SWMM 5 binary output (`.out`) reader            |
//! | [`error`]   | `StoreError`, `StoreResult<T>`                              |
//!
//! The pipeline only ever talks to [`ResultStore`]; how results were
//! produced or persisted is the store's business.

pub mod error;
pub mod memory;
pub mod outfile;
pub mod store;


pub use error::{StoreError, StoreResult};
pub use memory::{MemoryStore, MemoryStoreBuilder};
pub use outfile::{OutFile, OutSummary};
pub use store::{ResultStore, Series};
