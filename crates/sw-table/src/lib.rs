//! `sw-table` — row-oriented tables of extracted and compared results.
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`table`]       | `EntityTable`, `TableRow`, `EntityTableBuilder`       |
//! | [`comparison`]  | `ComparisonTable`, `ComparisonRow`                    |
//! | [`round`]       | `round_to`, `format_value` — the serialization boundary |
//! | [`error`]       | `TableError`, `TableResult<T>`                        |
//!
//! Tables always hold raw values.  Rounding happens only when a value is
//! turned into text by [`round::format_value`].

pub mod comparison;
pub mod error;
pub mod round;
pub mod table;

#[cfg(test)]
mod tests;

pub use comparison::{ComparisonRow, ComparisonTable};
pub use error::{TableError, TableResult};
pub use round::{format_value, round_to};
pub use table::{EntityTable, EntityTableBuilder, TableRow};
