//! Value rounding and text formatting.
//!
//! This is the only place values lose precision.  In-memory tables keep
//! what the store returned; CSV writers call [`format_value`].

/// Round `value` to `decimals` places, half away from zero.
///
/// Ties are judged on the binary product `value * 10^decimals`, not on the
/// decimal text of `value`: `1.005` is stored just below the tie and rounds
/// to `1.0`, while `2.675 * 100` lands exactly on `267.5` and rounds to `2.68`.
///
/// Values too large to carry `decimals` fractional digits are returned
/// unchanged, as are non-finite values.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    // Past 2^52 every f64 is already an integer at this scale.
    if !scaled.is_finite() || scaled.abs() >= 4_503_599_627_370_496.0 {
        return value;
    }
    scaled.round() / factor
}

/// Text form of a table cell: the rounded value in shortest form, or an
/// empty string for a missing or non-finite value.
///
/// `1.23456789` at 6 decimals → `"1.234568"`; `2.0` → `"2"`; `-0.0` → `"0"`.
pub fn format_value(value: Option<f64>, decimals: u32) -> String {
    match value {
        Some(v) if v.is_finite() => {
            // Adding +0.0 folds a negative zero into a positive one.
            let r = round_to(v, decimals) + 0.0;
            format!("{r}")
        }
        _ => String::new(),
    }
}
