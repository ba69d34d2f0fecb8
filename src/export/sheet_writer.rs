//! Generates the request worksheet XML.
//!
//! Text cells use inline strings (`t="inlineStr"`) so no shared string
//! table is needed; numeric cells are written as plain values.

use crate::cell_ref::col_to_letter;
use crate::types::RequestItem;

/// Header row: `RequestItem` field order with `line_total` appended last.
pub(crate) const EXPORT_COLUMNS: [&str; 9] = [
    "model",
    "material_description",
    "shrm",
    "home",
    "stock",
    "used_spares",
    "price",
    "qty",
    "line_total",
];

/// Write a complete worksheet XML string for the request list.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn write_request_sheet_xml(items: &[RequestItem]) -> String {
    let mut out = String::with_capacity(4096);
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    out.push('\n');
    out.push_str(
        r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
    );
    out.push('\n');

    let end_col = col_to_letter(EXPORT_COLUMNS.len() as u32 - 1);
    out.push_str(&format!(
        "<dimension ref=\"A1:{}{}\"/>\n",
        end_col,
        items.len() + 1
    ));

    out.push_str("<sheetData>\n");

    // Header row
    out.push_str("<row r=\"1\">");
    for (col, name) in EXPORT_COLUMNS.iter().enumerate() {
        write_inline_str(&mut out, col as u32, 0, name);
    }
    out.push_str("</row>\n");

    for (i, item) in items.iter().enumerate() {
        let row = i as u32 + 1;
        out.push_str(&format!("<row r=\"{}\">", row + 1));
        write_inline_str(&mut out, 0, row, &item.model);
        write_inline_str(&mut out, 1, row, &item.material_description);
        write_number(&mut out, 2, row, f64::from(item.shrm));
        write_number(&mut out, 3, row, f64::from(item.home));
        write_number(&mut out, 4, row, f64::from(item.stock));
        write_number(&mut out, 5, row, f64::from(item.used_spares));
        write_number(&mut out, 6, row, item.price);
        write_number(&mut out, 7, row, f64::from(item.qty));
        write_number(&mut out, 8, row, item.line_total());
        out.push_str("</row>\n");
    }

    out.push_str("</sheetData>\n");
    out.push_str("</worksheet>");
    out
}

fn cell_ref(col: u32, row: u32) -> String {
    format!("{}{}", col_to_letter(col), row + 1)
}

fn write_inline_str(out: &mut String, col: u32, row: u32, value: &str) {
    out.push_str(&format!(
        "<c r=\"{}\" t=\"inlineStr\"><is><t>{}</t></is></c>",
        cell_ref(col, row),
        xml_escape(value)
    ));
}

#[allow(clippy::float_cmp)]
fn write_number(out: &mut String, col: u32, row: u32, value: f64) {
    // Trim trailing zeros the way Excel writes integral floats.
    let text = if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    };
    out.push_str(&format!(
        "<c r=\"{}\"><v>{}</v></c>",
        cell_ref(col, row),
        text
    ));
}

/// Escape the five XML special characters.
fn xml_escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(model: &str, price: f64, qty: u32) -> RequestItem {
        RequestItem {
            model: model.to_string(),
            material_description: "Rotary Hammer".to_string(),
            shrm: 2,
            home: 3,
            stock: 5,
            used_spares: 0,
            price,
            qty,
        }
    }

    #[test]
    fn test_header_row_ends_with_line_total() {
        let xml = write_request_sheet_xml(&[]);
        assert!(xml.contains("<is><t>line_total</t></is>"));
        assert!(xml.contains("<dimension ref=\"A1:I1\"/>"));
    }

    #[test]
    fn test_line_total_written_per_row() {
        let xml = write_request_sheet_xml(&[item("HR2470", 100.0, 1)]);
        // line_total lands in column I of row 2.
        assert!(xml.contains("<c r=\"I2\"><v>100</v></c>"));
    }

    #[test]
    fn test_model_is_escaped_inline_string() {
        let xml = write_request_sheet_xml(&[item("A<B>&C", 1.0, 1)]);
        assert!(xml.contains("<is><t>A&lt;B&gt;&amp;C</t></is>"));
    }
}
