//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use grid_diff::{AlignmentToken, CellCoord, CellValue, GridDiff, Grid, Sheet, Workbook};

pub fn grid_from_numbers(values: &[&[i32]]) -> Grid {
    grid_from_values(
        values
            .iter()
            .map(|row| row.iter().copied().map(CellValue::from).collect())
            .collect(),
    )
}

pub fn grid_from_values(rows: Vec<Vec<CellValue>>) -> Grid {
    Grid::from_rows(rows).unwrap_or_else(|e| panic!("test grid should be valid: {e}"))
}

pub fn create_large_grid(nrows: u32, ncols: u32, base_value: i32) -> Grid {
    grid_from_values(
        (0..nrows)
            .map(|row| {
                (0..ncols)
                    .map(|col| {
                        CellValue::Number(
                            (base_value as i64 + row as i64 * 1000 + col as i64) as f64,
                        )
                    })
                    .collect()
            })
            .collect(),
    )
}

pub fn token_strings(tokens: &[AlignmentToken]) -> Vec<String> {
    tokens.iter().map(ToString::to_string).collect()
}

pub fn change_coords(diff: &GridDiff) -> Vec<((u32, u32), (u32, u32))> {
    diff.cell_changes
        .iter()
        .map(|c| ((c.before.row, c.before.col), (c.after.row, c.after.col)))
        .collect()
}

pub fn same_diagonal(n: u32) -> Vec<AlignmentToken> {
    (0..n)
        .map(|i| AlignmentToken::Same {
            before: i,
            after: i,
        })
        .collect()
}

pub fn coord(row: u32, col: u32) -> CellCoord {
    CellCoord::new(row, col)
}

pub fn single_sheet_workbook(name: &str, grid: Grid) -> Workbook {
    Workbook {
        sheets: vec![Sheet {
            name: name.to_string(),
            grid,
        }],
    }
}

/// Build a minimal `.xlsx` package in memory.
///
/// Each cell string that parses as a number is written as a numeric cell,
/// any other non-empty string as a shared string; empty strings are omitted.
pub fn xlsx_bytes(sheets: &[(&str, &[&[&str]])]) -> Vec<u8> {
    use std::io::Write;
    use zip::write::{SimpleFileOptions, ZipWriter};

    let mut shared: Vec<String> = Vec::new();
    let mut sheet_parts = Vec::new();
    for (_, rows) in sheets {
        let mut xml = String::from("<worksheet><sheetData>");
        for (r, row) in rows.iter().enumerate() {
            xml.push_str(&format!("<row r=\"{}\">", r + 1));
            for (c, text) in row.iter().enumerate() {
                let addr = grid_diff::index_to_address(r as u32, c as u32);
                if text.is_empty() {
                    continue;
                }
                if text.parse::<f64>().is_ok() {
                    xml.push_str(&format!("<c r=\"{addr}\"><v>{text}</v></c>"));
                } else {
                    let idx = shared.iter().position(|s| s == text).unwrap_or_else(|| {
                        shared.push(text.to_string());
                        shared.len() - 1
                    });
                    xml.push_str(&format!("<c r=\"{addr}\" t=\"s\"><v>{idx}</v></c>"));
                }
            }
            xml.push_str("</row>");
        }
        xml.push_str("</sheetData></worksheet>");
        sheet_parts.push(xml);
    }

    let mut workbook = String::from(
        r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>"#,
    );
    let mut rels = String::from(
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for (i, (name, _)) in sheets.iter().enumerate() {
        let n = i + 1;
        workbook.push_str(&format!(r#"<sheet name="{name}" sheetId="{n}" r:id="rId{n}"/>"#));
        rels.push_str(&format!(
            r#"<Relationship Id="rId{n}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{n}.xml"/>"#
        ));
    }
    workbook.push_str("</sheets></workbook>");
    rels.push_str("</Relationships>");

    let mut sst = String::from("<sst>");
    for s in &shared {
        sst.push_str(&format!("<si><t>{s}</t></si>"));
    }
    sst.push_str("</sst>");

    let mut writer = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    let mut add = |path: &str, body: &str| {
        writer.start_file(path, options).expect("start zip entry");
        writer.write_all(body.as_bytes()).expect("write zip entry");
    };
    add("xl/workbook.xml", &workbook);
    add("xl/_rels/workbook.xml.rels", &rels);
    add("xl/sharedStrings.xml", &sst);
    for (i, part) in sheet_parts.iter().enumerate() {
        add(&format!("xl/worksheets/sheet{}.xml", i + 1), part);
    }
    writer.finish().expect("finish zip").into_inner()
}
