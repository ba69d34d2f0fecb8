//! Common test utilities: builds valid XLSX stock files in memory.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_possible_truncation
)]

use std::io::{Cursor, Write};

use zip::write::FileOptions;
use zip::ZipWriter;

/// Builder for a minimal single-sheet XLSX stock file.
///
/// Cells are written as inline strings by default; [`with_shared_strings`]
/// switches string cells to a shared string table so both reader paths get
/// exercised.
///
/// [`with_shared_strings`]: StockXlsxBuilder::with_shared_strings
pub struct StockXlsxBuilder {
    rows: Vec<Vec<String>>,
    shared_strings: bool,
}

impl StockXlsxBuilder {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            shared_strings: false,
        }
    }

    pub fn with_shared_strings(mut self) -> Self {
        self.shared_strings = true;
        self
    }

    /// Append a row of cells. The first row added becomes the header row.
    pub fn row(mut self, cells: &[&str]) -> Self {
        self.rows
            .push(cells.iter().map(|c| (*c).to_string()).collect());
        self
    }

    /// Assemble the XLSX package bytes.
    pub fn build(self) -> Vec<u8> {
        let mut sst: Vec<String> = Vec::new();
        let sheet_xml = self.sheet_xml(&mut sst);

        let content_types = format!(
            concat!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
                r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
                r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
                r#"<Default Extension="xml" ContentType="application/xml"/>"#,
                r#"<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#,
                r#"<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
                "{sst_override}",
                r#"</Types>"#
            ),
            sst_override = if self.shared_strings {
                r#"<Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/>"#
            } else {
                ""
            }
        );

        let root_rels = concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
            r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>"#,
            r#"</Relationships>"#
        );

        let workbook = concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
            r#"<sheets><sheet name="Stocks" sheetId="1" r:id="rId1"/></sheets>"#,
            r#"</workbook>"#
        );

        let workbook_rels = concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
            r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>"#,
            r#"</Relationships>"#
        );

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default();

        let mut put = |name: &str, body: &str| {
            writer.start_file(name, options).unwrap();
            writer.write_all(body.as_bytes()).unwrap();
        };
        put("[Content_Types].xml", &content_types);
        put("_rels/.rels", root_rels);
        put("xl/workbook.xml", workbook);
        put("xl/_rels/workbook.xml.rels", workbook_rels);
        put("xl/worksheets/sheet1.xml", &sheet_xml);
        if self.shared_strings {
            let sst_xml = format!(
                concat!(
                    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
                    r#"<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{n}" uniqueCount="{n}">{items}</sst>"#
                ),
                n = sst.len(),
                items = sst
                    .iter()
                    .map(|s| format!("<si><t>{}</t></si>", escape(s)))
                    .collect::<String>()
            );
            put("xl/sharedStrings.xml", &sst_xml);
        }

        writer.finish().unwrap().into_inner()
    }

    fn sheet_xml(&self, sst: &mut Vec<String>) -> String {
        let mut out = String::new();
        out.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        out.push_str(
            r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );
        out.push_str("<sheetData>");
        for (r, row) in self.rows.iter().enumerate() {
            out.push_str(&format!("<row r=\"{}\">", r + 1));
            for (c, cell) in row.iter().enumerate() {
                if cell.is_empty() {
                    continue;
                }
                let cell_ref = format!("{}{}", col_letter(c), r + 1);
                if cell.parse::<f64>().is_ok() {
                    out.push_str(&format!("<c r=\"{cell_ref}\"><v>{cell}</v></c>"));
                } else if self.shared_strings {
                    let idx = match sst.iter().position(|s| s == cell) {
                        Some(i) => i,
                        None => {
                            sst.push(cell.clone());
                            sst.len() - 1
                        }
                    };
                    out.push_str(&format!("<c r=\"{cell_ref}\" t=\"s\"><v>{idx}</v></c>"));
                } else {
                    out.push_str(&format!(
                        "<c r=\"{cell_ref}\" t=\"inlineStr\"><is><t>{}</t></is></c>",
                        escape(cell)
                    ));
                }
            }
            out.push_str("</row>");
        }
        out.push_str("</sheetData></worksheet>");
        out
    }
}

fn col_letter(mut col: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(b'A' + (col % 26) as u8);
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap()
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
