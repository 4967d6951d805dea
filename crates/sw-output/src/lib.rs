//! `sw-output` — everything the pipeline writes to, or reads back from, disk.
//!
//! | Module     | Contents                                                    |
//! |------------|-------------------------------------------------------------|
//! | [`layout`] | `OutputLayout` — deterministic paths for every artifact     |
//! | [`writer`] | `CsvWriter` — entity and comparison tables to CSV           |
//! | [`loader`] | `load_entity_csv` — entity tables back from CSV             |
//! | [`plot`]   | run charts, comparison charts, `tick_indices`               |
//! | [`error`]  | `OutputError`, `OutputResult<T>`                            |
//!
//! Charts are SVG files drawn with `plotters`.

pub mod error;
pub mod layout;
pub mod loader;
pub mod plot;
pub mod writer;


pub use error::{OutputError, OutputResult};
pub use layout::OutputLayout;
pub use loader::{load_entity_csv, load_entity_reader};
pub use plot::{ComparisonChart, MAX_TICKS, render_comparison_chart, render_run_chart, tick_indices};
pub use writer::CsvWriter;
