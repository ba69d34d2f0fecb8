//! Total cell coercions.
//!
//! Stock files are hand-maintained; cells hold blanks, dashes, "N/A",
//! comma-grouped numbers. Coercion never fails: anything unparseable
//! becomes the zero value for its type.

/// Parse a cell as a decimal number and truncate to an integer.
///
/// Blank, non-numeric, or otherwise unparseable input yields 0. Negative
/// values pass through; callers that need `>= 0` clamp at the use site.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn to_int(cell: &str) -> i64 {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return 0;
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => n.trunc() as i64,
        _ => 0,
    }
}

/// Parse a cell as a float, stripping thousands-separator commas first.
///
/// Yields 0.0 on any failure.
#[must_use]
pub fn to_float(cell: &str) -> f64 {
    let cleaned: String = cell.trim().replace(',', "");
    match cleaned.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

/// Truncating `to_int` clamped to `u32` range; negatives floor to 0.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn to_qty(cell: &str) -> u32 {
    to_int(cell).clamp(0, i64::from(u32::MAX)) as u32
}
