//! Reading `.xlsx` workbooks into [`Workbook`]s.
//!
//! Only worksheet cell values are read: shared strings, inline strings,
//! numbers, booleans and error literals (kept as text). Formulas, styles and
//! chart sheets are ignored. Each worksheet becomes a sheet padded with
//! blanks to the rectangle `A1:<last used cell>`. Worksheets with no values
//! are skipped, since an empty grid cannot be diffed.

use crate::addressing::address_to_index;
use crate::error_codes;
use crate::grid::{Grid, GridError};
use crate::value::CellValue;
use crate::workbook::{Sheet, Workbook, WorkbookError};
use log::{debug, warn};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use rustc_hash::FxHashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use thiserror::Error;
use zip::ZipArchive;
use zip::result::ZipError;

/// Largest uncompressed size accepted for a single package part.
pub const MAX_PART_BYTES: u64 = 256 * 1024 * 1024;

/// Largest padded rectangle a single worksheet may expand to.
pub const MAX_SHEET_CELLS: u64 = 50_000_000;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum XlsxError {
    #[error("[GRIDDIFF_XLSX_001] I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("[GRIDDIFF_XLSX_002] not a ZIP container: {0}. Suggestion: check that the file is an .xlsx workbook.")]
    NotZip(String),

    #[error("[GRIDDIFF_XLSX_003] missing package part '{path}'")]
    MissingPart { path: String },

    #[error("[GRIDDIFF_XLSX_004] part '{path}' is {size} bytes, limit is {limit}")]
    PartTooLarge { path: String, size: u64, limit: u64 },

    #[error("[GRIDDIFF_XLSX_005] XML error in '{path}': {message}")]
    Xml { path: String, message: String },

    #[error("[GRIDDIFF_XLSX_006] invalid cell in sheet '{sheet}': {reason}")]
    InvalidCell { sheet: String, reason: String },

    #[error("sheet '{sheet}': {source}")]
    Grid { sheet: String, source: GridError },

    #[error(transparent)]
    Workbook(#[from] WorkbookError),
}

impl XlsxError {
    pub fn code(&self) -> &'static str {
        match self {
            XlsxError::Io(_) => error_codes::XLSX_IO,
            XlsxError::NotZip(_) => error_codes::XLSX_NOT_ZIP,
            XlsxError::MissingPart { .. } => error_codes::XLSX_MISSING_PART,
            XlsxError::PartTooLarge { .. } => error_codes::XLSX_PART_TOO_LARGE,
            XlsxError::Xml { .. } => error_codes::XLSX_XML,
            XlsxError::InvalidCell { .. } => error_codes::XLSX_INVALID_CELL,
            XlsxError::Grid { source, .. } => source.code(),
            XlsxError::Workbook(err) => err.code(),
        }
    }
}

pub fn open_xlsx(path: impl AsRef<Path>) -> Result<Workbook, XlsxError> {
    let file = File::open(path.as_ref())?;
    read_xlsx(BufReader::new(file))
}

pub fn read_xlsx<R: Read + Seek>(reader: R) -> Result<Workbook, XlsxError> {
    let mut archive = ZipArchive::new(reader).map_err(|err| XlsxError::NotZip(err.to_string()))?;

    let shared_strings = match read_part_optional(&mut archive, "xl/sharedStrings.xml")? {
        Some(bytes) => parse_shared_strings(&bytes)?,
        None => Vec::new(),
    };

    let workbook_bytes = read_part(&mut archive, "xl/workbook.xml")?;
    let descriptors = parse_workbook_xml(&workbook_bytes)?;

    let relationships = match read_part_optional(&mut archive, "xl/_rels/workbook.xml.rels")? {
        Some(bytes) => parse_relationships(&bytes)?,
        None => FxHashMap::default(),
    };

    let mut sheets = Vec::with_capacity(descriptors.len());
    for (idx, descriptor) in descriptors.iter().enumerate() {
        let target = resolve_sheet_target(descriptor, &relationships, idx);
        let bytes = read_part(&mut archive, &target)?;
        match parse_sheet_xml(&bytes, &target, &descriptor.name, &shared_strings)? {
            Some(grid) => {
                debug!(
                    "xlsx sheet '{}': {}x{}",
                    descriptor.name,
                    grid.nrows(),
                    grid.ncols()
                );
                sheets.push(Sheet {
                    name: descriptor.name.clone(),
                    grid,
                });
            }
            None => warn!("skipping empty worksheet '{}'", descriptor.name),
        }
    }

    Ok(Workbook::new(sheets)?)
}

fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, path: &str) -> Result<Vec<u8>, XlsxError> {
    read_part_optional(archive, path)?.ok_or_else(|| XlsxError::MissingPart {
        path: path.to_string(),
    })
}

fn read_part_optional<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    path: &str,
) -> Result<Option<Vec<u8>>, XlsxError> {
    let mut file = match archive.by_name(path) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(ZipError::Io(io)) => return Err(XlsxError::Io(io)),
        Err(other) => return Err(XlsxError::NotZip(other.to_string())),
    };

    let size = file.size();
    if size > MAX_PART_BYTES {
        return Err(XlsxError::PartTooLarge {
            path: path.to_string(),
            size,
            limit: MAX_PART_BYTES,
        });
    }

    let mut buf = Vec::with_capacity(size as usize);
    file.read_to_end(&mut buf)?;
    Ok(Some(buf))
}

struct SheetDescriptor {
    name: String,
    rel_id: Option<String>,
    sheet_id: Option<u32>,
}

fn parse_shared_strings(xml: &[u8]) -> Result<Vec<String>, XlsxError> {
    const PART: &str = "xl/sharedStrings.xml";
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);
    let mut buf = Vec::new();
    let mut strings = Vec::new();
    let mut current = String::new();
    let mut in_si = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"si" => {
                current.clear();
                in_si = true;
            }
            Ok(Event::Start(e)) if e.name().as_ref() == b"t" && in_si => {
                let text = reader
                    .read_text(e.name())
                    .map_err(|e| xml_err(PART, e))?;
                current.push_str(&unescape(PART, &text)?);
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"si" => {
                strings.push(std::mem::take(&mut current));
                in_si = false;
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_err(PART, e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(strings)
}

fn parse_workbook_xml(xml: &[u8]) -> Result<Vec<SheetDescriptor>, XlsxError> {
    const PART: &str = "xl/workbook.xml";
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut sheets = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.name().as_ref() == b"sheet" => {
                let name = get_attr_value(&e, b"name", PART)?;
                let rel_id = get_attr_value(&e, b"r:id", PART)?;
                let sheet_id = get_attr_value(&e, b"sheetId", PART)?.and_then(|id| id.parse().ok());
                if let Some(name) = name {
                    sheets.push(SheetDescriptor {
                        name,
                        rel_id,
                        sheet_id,
                    });
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_err(PART, e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(sheets)
}

fn parse_relationships(xml: &[u8]) -> Result<FxHashMap<String, String>, XlsxError> {
    const PART: &str = "xl/_rels/workbook.xml.rels";
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut map = FxHashMap::default();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.name().as_ref() == b"Relationship" => {
                let id = get_attr_value(&e, b"Id", PART)?;
                let target = get_attr_value(&e, b"Target", PART)?;
                let rel_type = get_attr_value(&e, b"Type", PART)?;

                if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type)
                    && rel_type.ends_with("/worksheet")
                {
                    map.insert(id, target);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_err(PART, e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(map)
}

fn resolve_sheet_target(
    sheet: &SheetDescriptor,
    relationships: &FxHashMap<String, String>,
    index: usize,
) -> String {
    if let Some(rel_id) = &sheet.rel_id
        && let Some(target) = relationships.get(rel_id)
    {
        return normalize_target(target);
    }

    let guessed = sheet
        .sheet_id
        .map(|id| format!("worksheets/sheet{id}.xml"))
        .unwrap_or_else(|| format!("worksheets/sheet{}.xml", index + 1));
    normalize_target(&guessed)
}

fn normalize_target(target: &str) -> String {
    let trimmed = target.trim_start_matches('/');
    if trimmed.starts_with("xl/") {
        trimmed.to_string()
    } else {
        format!("xl/{trimmed}")
    }
}

struct ParsedCell {
    row: u32,
    col: u32,
    value: CellValue,
}

/// Parse one worksheet; `None` when it holds no values.
fn parse_sheet_xml(
    xml: &[u8],
    part: &str,
    sheet_name: &str,
    shared_strings: &[String],
) -> Result<Option<Grid>, XlsxError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);
    let mut buf = Vec::new();
    let mut cells = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"c" => {
                let start = e.into_owned();
                let cell = parse_cell(&mut reader, &start, part, sheet_name, shared_strings)?;
                if !cell.value.is_blank() {
                    cells.push(cell);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_err(part, e)),
            _ => {}
        }
        buf.clear();
    }

    let (Some(max_row), Some(max_col)) = (
        cells.iter().map(|c| c.row).max(),
        cells.iter().map(|c| c.col).max(),
    ) else {
        return Ok(None);
    };

    let (nrows, ncols) = (max_row as usize + 1, max_col as usize + 1);
    if (nrows as u64) * (ncols as u64) > MAX_SHEET_CELLS {
        return Err(XlsxError::Grid {
            sheet: sheet_name.to_string(),
            source: GridError::TooLarge { nrows, ncols },
        });
    }

    let mut rows = vec![vec![CellValue::Blank; ncols]; nrows];
    for cell in cells {
        rows[cell.row as usize][cell.col as usize] = cell.value;
    }

    Grid::from_rows(rows)
        .map(Some)
        .map_err(|source| XlsxError::Grid {
            sheet: sheet_name.to_string(),
            source,
        })
}

fn parse_cell(
    reader: &mut Reader<&[u8]>,
    start: &BytesStart<'_>,
    part: &str,
    sheet_name: &str,
    shared_strings: &[String],
) -> Result<ParsedCell, XlsxError> {
    let invalid = |reason: String| XlsxError::InvalidCell {
        sheet: sheet_name.to_string(),
        reason,
    };

    let address = get_attr_value(start, b"r", part)?
        .ok_or_else(|| invalid("cell without an address".to_string()))?;
    let (row, col) =
        address_to_index(&address).ok_or_else(|| invalid(format!("bad address {address:?}")))?;
    let cell_type = get_attr_value(start, b"t", part)?;

    let mut value_text: Option<String> = None;
    let mut inline_text: Option<String> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"v" => {
                let text = reader.read_text(e.name()).map_err(|e| xml_err(part, e))?;
                value_text = Some(unescape(part, &text)?);
            }
            Ok(Event::Start(e)) if e.name().as_ref() == b"is" => {
                inline_text = Some(read_inline_string(reader, part)?);
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"c" => break,
            Ok(Event::Eof) => return Err(invalid(format!("unexpected end of XML inside {address}"))),
            Err(e) => return Err(xml_err(part, e)),
            _ => {}
        }
        buf.clear();
    }

    let value = match inline_text {
        Some(text) => text_value(text),
        None => convert_value(value_text.as_deref(), cell_type.as_deref(), shared_strings)
            .map_err(|reason| invalid(format!("{address}: {reason}")))?,
    };

    Ok(ParsedCell { row, col, value })
}

fn read_inline_string(reader: &mut Reader<&[u8]>, part: &str) -> Result<String, XlsxError> {
    let mut buf = Vec::new();
    let mut value = String::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"t" => {
                let text = reader.read_text(e.name()).map_err(|e| xml_err(part, e))?;
                value.push_str(&unescape(part, &text)?);
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"is" => break,
            Ok(Event::Eof) => {
                return Err(XlsxError::Xml {
                    path: part.to_string(),
                    message: "unexpected EOF inside inline string".to_string(),
                });
            }
            Err(e) => return Err(xml_err(part, e)),
            _ => {}
        }
        buf.clear();
    }
    Ok(value)
}

fn text_value(text: String) -> CellValue {
    if text.is_empty() {
        CellValue::Blank
    } else {
        CellValue::Text(text)
    }
}

fn convert_value(
    value_text: Option<&str>,
    cell_type: Option<&str>,
    shared_strings: &[String],
) -> Result<CellValue, String> {
    let Some(raw) = value_text else {
        return Ok(CellValue::Blank);
    };
    let trimmed = raw.trim();

    match cell_type {
        Some("s") => {
            let idx: usize = trimmed
                .parse()
                .map_err(|_| format!("bad shared string index {trimmed:?}"))?;
            shared_strings
                .get(idx)
                .map(|s| text_value(s.clone()))
                .ok_or_else(|| format!("shared string index {idx} out of bounds"))
        }
        Some("b") => match trimmed {
            "1" => Ok(CellValue::Bool(true)),
            "0" => Ok(CellValue::Bool(false)),
            other => Err(format!("bad boolean {other:?}")),
        },
        Some("str") | Some("inlineStr") | Some("e") => Ok(text_value(raw.to_string())),
        _ if trimmed.is_empty() => Ok(CellValue::Blank),
        _ => Ok(trimmed
            .parse::<f64>()
            .map(CellValue::Number)
            .unwrap_or_else(|_| CellValue::Text(trimmed.to_string()))),
    }
}

fn get_attr_value(
    element: &BytesStart<'_>,
    key: &[u8],
    part: &str,
) -> Result<Option<String>, XlsxError> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| XlsxError::Xml {
            path: part.to_string(),
            message: e.to_string(),
        })?;
        if attr.key.as_ref() == key {
            let value = attr.unescape_value().map_err(|e| xml_err(part, e))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn unescape(part: &str, text: &str) -> Result<String, XlsxError> {
    quick_xml::escape::unescape(text)
        .map(|s| s.into_owned())
        .map_err(|e| XlsxError::Xml {
            path: part.to_string(),
            message: e.to_string(),
        })
}

fn xml_err(part: &str, err: quick_xml::Error) -> XlsxError {
    XlsxError::Xml {
        path: part.to_string(),
        message: err.to_string(),
    }
}
