//! XLSX stock-file parser.
//!
//! Reads the first worksheet of an XLSX archive into a [`RawTable`] of
//! string cells. Only values are extracted; styles, merges, and everything
//! else a stock file might carry are ignored.

use std::io::{BufReader, Cursor, Read, Seek};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::cell_ref::parse_cell_ref_bytes;
use crate::error::Result;
use crate::types::RawTable;

/// Parse XLSX bytes into a [`RawTable`].
///
/// Row 0 of the sheet becomes the header row. Boolean cells render as
/// "TRUE"/"FALSE"; shared and inline strings are resolved; numeric cells
/// keep their raw text form for the normalizer to coerce.
///
/// # Errors
/// Returns an error when the archive is not a readable ZIP or the sheet
/// XML is malformed.
pub fn parse_xlsx(data: &[u8]) -> Result<RawTable> {
    let cursor = Cursor::new(data);
    let mut archive = ZipArchive::new(cursor)?;

    let shared_strings = parse_shared_strings(&mut archive);
    let sheet_path = first_sheet_path(&mut archive);

    let cells = parse_sheet_cells(&mut archive, &sheet_path, &shared_strings)?;
    Ok(assemble_table(cells))
}

/// Turn a sparse (row, col, value) list into a dense header + rows table.
#[allow(clippy::cast_possible_truncation)]
fn assemble_table(cells: Vec<(u32, u32, String)>) -> RawTable {
    let Some(max_row) = cells.iter().map(|&(r, _, _)| r).max() else {
        return RawTable::default();
    };
    let max_col = cells.iter().map(|&(_, c, _)| c).max().unwrap_or(0);

    let mut grid: Vec<Vec<String>> =
        vec![vec![String::new(); max_col as usize + 1]; max_row as usize + 1];
    for (r, c, v) in cells {
        if let Some(slot) = grid
            .get_mut(r as usize)
            .and_then(|row| row.get_mut(c as usize))
        {
            *slot = v;
        }
    }

    let mut iter = grid.into_iter();
    let headers = iter.next().unwrap_or_default();
    RawTable {
        headers,
        rows: iter.collect(),
    }
}

/// Parse `xl/sharedStrings.xml`. The part is optional; a missing or
/// unreadable table just yields no strings.
fn parse_shared_strings<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Vec<String> {
    let Ok(file) = archive.by_name("xl/sharedStrings.xml") else {
        return Vec::new();
    };

    let reader = BufReader::new(file);
    let mut xml = Reader::from_reader(reader);
    xml.trim_text(false);

    let mut strings = Vec::new();
    let mut buf = Vec::new();
    let mut current_string = String::new();
    let mut in_si = false;
    let mut in_t = false;

    loop {
        match xml.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"si" => {
                    in_si = true;
                    current_string.clear();
                }
                b"t" if in_si => in_t = true,
                _ => {}
            },
            Ok(Event::Text(ref e)) if in_t => {
                if let Ok(text) = e.unescape() {
                    current_string.push_str(&text);
                }
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"si" => {
                    strings.push(current_string.clone());
                    in_si = false;
                }
                b"t" => in_t = false,
                _ => {}
            },
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    strings
}

/// Resolve the ZIP path of the workbook's first sheet.
///
/// Follows `xl/workbook.xml` to the first `<sheet>` relationship id, then
/// `xl/_rels/workbook.xml.rels` to its target. Falls back to the
/// conventional `xl/worksheets/sheet1.xml` when either part is missing.
fn first_sheet_path<R: Read + Seek>(archive: &mut ZipArchive<R>) -> String {
    const FALLBACK: &str = "xl/worksheets/sheet1.xml";

    let Some(rel_id) = first_sheet_rel_id(archive) else {
        return FALLBACK.to_string();
    };
    let Some(target) = relationship_target(archive, &rel_id) else {
        return FALLBACK.to_string();
    };

    // Targets are relative to xl/ unless absolute ("/xl/...").
    if let Some(stripped) = target.strip_prefix('/') {
        stripped.to_string()
    } else {
        format!("xl/{target}")
    }
}

/// Relationship id of the first `<sheet>` entry in `xl/workbook.xml`.
fn first_sheet_rel_id<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Option<String> {
    let file = archive.by_name("xl/workbook.xml").ok()?;
    let reader = BufReader::new(file);
    let mut xml = Reader::from_reader(reader);
    xml.trim_text(true);

    let mut buf = Vec::new();
    loop {
        match xml.read_event_into(&mut buf) {
            Ok(Event::Start(ref e) | Event::Empty(ref e))
                if e.local_name().as_ref() == b"sheet" =>
            {
                for attr in e.attributes().flatten() {
                    if attr.key.local_name().as_ref() == b"id" {
                        return std::str::from_utf8(&attr.value)
                            .ok()
                            .map(|s| s.to_string());
                    }
                }
                return None;
            }
            Ok(Event::Eof) | Err(_) => return None,
            _ => {}
        }
        buf.clear();
    }
}

/// Look up a relationship target by id in `xl/_rels/workbook.xml.rels`.
fn relationship_target<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    rel_id: &str,
) -> Option<String> {
    let file = archive.by_name("xl/_rels/workbook.xml.rels").ok()?;
    let reader = BufReader::new(file);
    let mut xml = Reader::from_reader(reader);
    xml.trim_text(true);

    let mut buf = Vec::new();
    loop {
        match xml.read_event_into(&mut buf) {
            Ok(Event::Start(ref e) | Event::Empty(ref e))
                if e.local_name().as_ref() == b"Relationship" =>
            {
                let mut id = None;
                let mut target = None;
                for attr in e.attributes().flatten() {
                    match attr.key.local_name().as_ref() {
                        b"Id" => id = std::str::from_utf8(&attr.value).ok().map(str::to_string),
                        b"Target" => {
                            target = std::str::from_utf8(&attr.value).ok().map(str::to_string);
                        }
                        _ => {}
                    }
                }
                if id.as_deref() == Some(rel_id) {
                    return target;
                }
            }
            Ok(Event::Eof) | Err(_) => return None,
            _ => {}
        }
        buf.clear();
    }
}

/// Cell type tag from the `t` attribute of a `<c>` element.
#[derive(Copy, Clone)]
enum CellTypeTag {
    Shared,
    Inline,
    Bool,
    Other,
}

/// Stream `<sheetData>` from a worksheet into (row, col, value) triples.
fn parse_sheet_cells<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    sheet_path: &str,
    shared_strings: &[String],
) -> Result<Vec<(u32, u32, String)>> {
    let file = archive.by_name(sheet_path)?;
    let reader = BufReader::new(file);
    let mut xml = Reader::from_reader(reader);
    xml.trim_text(false);

    let mut cells: Vec<(u32, u32, String)> = Vec::new();
    let mut buf = Vec::new();

    let mut current_ref: Option<(u32, u32)> = None;
    let mut current_tag = CellTypeTag::Other;
    let mut in_v = false;
    let mut in_is_t = false;
    let mut text = String::new();

    loop {
        match xml.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"c" => {
                    current_ref = None;
                    current_tag = CellTypeTag::Other;
                    text.clear();
                    for attr in e.attributes().flatten() {
                        match attr.key.local_name().as_ref() {
                            b"r" => current_ref = parse_cell_ref_bytes(&attr.value),
                            b"t" => {
                                current_tag = match attr.value.as_ref() {
                                    b"s" => CellTypeTag::Shared,
                                    b"inlineStr" => CellTypeTag::Inline,
                                    b"b" => CellTypeTag::Bool,
                                    _ => CellTypeTag::Other,
                                };
                            }
                            _ => {}
                        }
                    }
                }
                b"v" => in_v = true,
                b"t" if matches!(current_tag, CellTypeTag::Inline) => in_is_t = true,
                _ => {}
            },
            Ok(Event::Text(ref e)) if in_v || in_is_t => {
                if let Ok(t) = e.unescape() {
                    text.push_str(&t);
                }
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"v" => in_v = false,
                b"t" => in_is_t = false,
                b"c" => {
                    if let Some((col, row)) = current_ref {
                        let value = resolve_cell_value(current_tag, &text, shared_strings);
                        if !value.is_empty() {
                            cells.push((row, col, value));
                        }
                    }
                    current_ref = None;
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
        buf.clear();
    }

    Ok(cells)
}

/// Resolve the collected cell text against its type tag.
fn resolve_cell_value(tag: CellTypeTag, text: &str, shared_strings: &[String]) -> String {
    match tag {
        CellTypeTag::Shared => text
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|idx| shared_strings.get(idx))
            .cloned()
            .unwrap_or_default(),
        CellTypeTag::Bool => match text.trim() {
            "1" => "TRUE".to_string(),
            _ => "FALSE".to_string(),
        },
        CellTypeTag::Inline | CellTypeTag::Other => text.to_string(),
    }
}
