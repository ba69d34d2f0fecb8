//! Minimal CSV parser that produces a [`RawTable`].
//!
//! The first non-empty line is the header row; everything after it is data.
//! Fields stay strings here; typing happens in the normalizer.

use crate::error::Result;
use crate::types::RawTable;

/// Parse CSV bytes into a [`RawTable`].
///
/// Input is decoded as UTF-8 lossily. Empty lines are skipped. Rows may be
/// ragged; downstream reads treat missing cells as blank.
pub(crate) fn parse_csv(data: &[u8]) -> Result<RawTable> {
    let text = String::from_utf8_lossy(data);

    let mut headers: Option<Vec<String>> = None;
    let mut rows: Vec<Vec<String>> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<String> = split_csv_line(line, ',')
            .into_iter()
            .map(|f| f.trim().to_string())
            .collect();
        if headers.is_none() {
            headers = Some(fields);
        } else {
            rows.push(fields);
        }
    }

    Ok(RawTable {
        headers: headers.unwrap_or_default(),
        rows,
    })
}

/// Split a CSV line respecting quoted fields.
fn split_csv_line(line: &str, sep: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    // Escaped quote
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(ch);
            }
        } else if ch == '"' {
            in_quotes = true;
        } else if ch == sep {
            fields.push(current.clone());
            current.clear();
        } else {
            current.push(ch);
        }
    }
    fields.push(current);
    fields
}
