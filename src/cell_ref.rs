//! Utilities for Excel-style cell references.

/// Parse a cell reference like "A1" from raw bytes into (col, row), 0-indexed.
///
/// Used when working with raw XML attribute values from quick-xml.
#[must_use]
pub fn parse_cell_ref_bytes(ref_bytes: &[u8]) -> Option<(u32, u32)> {
    let mut col: u32 = 0;
    let mut row: u32 = 0;
    let mut saw_col = false;
    let mut saw_row = false;

    for &b in ref_bytes {
        if b == b'$' {
            continue;
        }
        if b.is_ascii_alphabetic() {
            let upper = if b.is_ascii_lowercase() { b - 32 } else { b };
            col = col * 26 + (u32::from(upper - b'A') + 1);
            saw_col = true;
        } else if b.is_ascii_digit() {
            row = row * 10 + u32::from(b - b'0');
            saw_row = true;
        }
    }

    if !saw_col || !saw_row {
        return None;
    }

    Some((col.saturating_sub(1), row.saturating_sub(1)))
}

/// Convert a 0-indexed column number to its letter form ("A", "B", ..., "AA").
#[must_use]
pub fn col_to_letter(mut col: u32) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(b'A' + u8::try_from(col % 26).unwrap_or(0));
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}
