//! XLSX export pipeline for the request list.
//!
//! Unlike the stock file, the request list has no backing archive to patch,
//! so export assembles a minimal single-sheet XLSX package from scratch:
//! content types, package/workbook relationships, workbook, and one
//! worksheet with inline strings.

mod sheet_writer;

use std::io::{Cursor, Write};

use zip::write::FileOptions;
use zip::ZipWriter;

use crate::error::Result;
use crate::types::RequestItem;

use sheet_writer::write_request_sheet_xml;

/// Conventional download filename for an exported request list.
pub const EXPORT_FILENAME: &str = "requests.xlsx";

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
</Types>"#;

const ROOT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

const WORKBOOK_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheets><sheet name="Requests" sheetId="1" r:id="rId1"/></sheets>
</workbook>"#;

const WORKBOOK_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#;

/// Serialize request items to a complete XLSX file as `Vec<u8>`.
///
/// # Errors
/// Returns an error if any archive entry cannot be written.
pub(crate) fn write_request_xlsx(items: &[RequestItem]) -> Result<Vec<u8>> {
    let sheet_xml = write_request_sheet_xml(items);

    let buf: Vec<u8> = Vec::with_capacity(4096);
    let mut writer = ZipWriter::new(Cursor::new(buf));
    let options = FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let parts: [(&str, &str); 5] = [
        ("[Content_Types].xml", CONTENT_TYPES_XML),
        ("_rels/.rels", ROOT_RELS_XML),
        ("xl/workbook.xml", WORKBOOK_XML),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS_XML),
        ("xl/worksheets/sheet1.xml", &sheet_xml),
    ];
    for (name, xml) in parts {
        writer.start_file(name, options)?;
        writer.write_all(xml.as_bytes())?;
    }

    let cursor = writer.finish()?;
    Ok(cursor.into_inner())
}
