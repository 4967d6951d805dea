//! Timestamps.
//!
//! # Design
//!
//! SWMM reports results on a wall-clock grid without a time zone, so every
//! timestamp is a `chrono::NaiveDateTime` at whole-second resolution.  The
//! binary output file stores each reporting period as a floating-point day
//! count since the spreadsheet epoch (1899-12-30 00:00):
//!
//!   wall_time = 1899-12-30 00:00 + round(days * 86_400) seconds
//!
//! Rounding to whole seconds removes the binary fraction noise of the `f64`
//! day count, so two runs on the same reporting grid produce equal keys.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::{CoreError, CoreResult};

/// A recorded simulation instant.
pub type Timestamp = NaiveDateTime;

/// Text form written to CSV files.
pub const CSV_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Text form used for chart tick labels.
pub const LABEL_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Formats accepted when reading timestamps back from CSV.
const PARSE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const SECS_PER_DAY: f64 = 86_400.0;

pub fn format_csv(ts: &Timestamp) -> String {
    ts.format(CSV_FORMAT).to_string()
}

pub fn format_label(ts: &Timestamp) -> String {
    ts.format(LABEL_FORMAT).to_string()
}

/// Parse a CSV timestamp cell.
pub fn parse_timestamp(s: &str) -> CoreResult<Timestamp> {
    let s = s.trim();
    PARSE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| CoreError::Parse(format!("invalid timestamp {s:?}")))
}

/// The spreadsheet epoch SWMM counts days from.
pub fn swmm_epoch() -> Timestamp {
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Convert a SWMM day count to a timestamp, rounded to the nearest second.
///
/// Returns `None` for non-finite or out-of-range values.
pub fn from_swmm_days(days: f64) -> Option<Timestamp> {
    if !days.is_finite() {
        return None;
    }
    let secs = (days * SECS_PER_DAY).round();
    if secs.abs() > i64::MAX as f64 {
        return None;
    }
    let delta = Duration::try_seconds(secs as i64)?;
    swmm_epoch().checked_add_signed(delta)
}

/// Inverse of [`from_swmm_days`].
pub fn to_swmm_days(ts: &Timestamp) -> f64 {
    (*ts - swmm_epoch()).num_seconds() as f64 / SECS_PER_DAY
}
