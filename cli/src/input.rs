//! Loading grids from `.json`, `.csv` and `.xlsx` files.
//!
//! JSON input is either a bare array of rows (one sheet named after the file
//! stem) or `{"sheets": [{"name": ..., "rows": [...]}]}`. CSV input has no
//! header row and always yields a single sheet named after the file stem.
//! Excel workbooks keep their worksheet names; cached cell values are read,
//! formulas are not evaluated.

use anyhow::{Context, Result, bail};
use grid_diff::{CellValue, Grid, Sheet, Workbook};
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub fn load_workbook(path: &Path) -> Result<Workbook> {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase());

    match extension.as_deref() {
        Some("json") => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open file: {}", path.display()))?;
            read_json(BufReader::new(file), &sheet_name_for(path))
        }
        Some("csv") => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open file: {}", path.display()))?;
            read_csv(file, &sheet_name_for(path))
        }
        Some("xlsx") | Some("xlsm") => grid_diff::open_xlsx(path)
            .with_context(|| format!("Failed to read workbook: {}", path.display())),
        _ => bail!(
            "Unsupported input '{}': expected a .json, .csv or .xlsx file",
            path.display()
        ),
    }
}

fn sheet_name_for(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Sheet1".to_string())
}

pub fn read_json<R: Read>(reader: R, default_name: &str) -> Result<Workbook> {
    let value: Value = serde_json::from_reader(reader).context("Invalid JSON")?;

    match value {
        Value::Array(_) => {
            let grid: Grid = serde_json::from_value(value).context("Invalid grid")?;
            Ok(single_sheet(default_name, grid))
        }
        Value::Object(_) => {
            let workbook: Workbook =
                serde_json::from_value(value).context("Invalid workbook")?;
            if workbook.sheets.is_empty() {
                bail!("Workbook has no sheets");
            }
            Ok(workbook)
        }
        _ => bail!("Expected an array of rows or an object with \"sheets\""),
    }
}

pub fn read_csv<R: Read>(reader: R, name: &str) -> Result<Workbook> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (line, record) in csv_reader.records().enumerate() {
        let record = record.with_context(|| format!("Invalid CSV at record {}", line + 1))?;
        rows.push(record.iter().map(parse_csv_field).collect::<Vec<_>>());
    }

    let grid = Grid::from_rows(rows).context("Invalid grid")?;
    Ok(single_sheet(name, grid))
}

fn parse_csv_field(field: &str) -> CellValue {
    if field.is_empty() {
        return CellValue::Blank;
    }
    match field.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => CellValue::Number(n),
        _ => CellValue::Text(field.to_string()),
    }
}

fn single_sheet(name: &str, grid: Grid) -> Workbook {
    Workbook {
        sheets: vec![Sheet {
            name: name.to_string(),
            grid,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_json_array_becomes_named_sheet() {
        let wb = read_json(r#"[[1, "a"], [null, true]]"#.as_bytes(), "data").unwrap();
        assert_eq!(wb.sheets.len(), 1);
        assert_eq!(wb.sheets[0].name, "data");
        assert_eq!(wb.sheets[0].grid.cell(0, 1), Some(&CellValue::from("a")));
        assert_eq!(wb.sheets[0].grid.cell(1, 0), Some(&CellValue::Blank));
    }

    #[test]
    fn json_workbook_keeps_sheet_names() {
        let json = r#"{ "sheets": [ { "name": "A", "rows": [[1]] }, { "name": "B", "rows": [[2, 3]] } ] }"#;
        let wb = read_json(json.as_bytes(), "ignored").unwrap();
        let names: Vec<&str> = wb.sheet_names().collect();
        assert_eq!(names, ["A", "B"]);
        assert_eq!(wb.sheets[1].grid.ncols(), 2);
    }

    #[test]
    fn ragged_json_is_rejected() {
        let err = read_json("[[1, 2], [3]]".as_bytes(), "x").unwrap_err();
        assert!(format!("{err:#}").contains("GRIDDIFF_INPUT_003"), "{err:#}");
    }

    #[test]
    fn json_workbook_with_repeated_sheet_name_is_rejected() {
        let json = r#"{"sheets":[{"name":"A","rows":[[1]]},{"name":"A","rows":[[5,6]]}]}"#;
        let err = read_json(json.as_bytes(), "ignored").unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("Invalid workbook"), "{message}");
        assert!(message.contains("GRIDDIFF_INPUT_005"), "{message}");
    }

    #[test]
    fn csv_fields_are_typed() {
        let wb = read_csv("id,score\n1,,x\n".as_bytes(), "scores");
        assert!(wb.is_err(), "ragged CSV should be rejected");

        let wb = read_csv("id,score,\n1,2.5,\n".as_bytes(), "scores").unwrap();
        let grid = &wb.sheets[0].grid;
        assert_eq!(wb.sheets[0].name, "scores");
        assert_eq!(grid.nrows(), 2);
        assert_eq!(grid.cell(0, 0), Some(&CellValue::from("id")));
        assert_eq!(grid.cell(1, 1), Some(&CellValue::from(2.5)));
        assert_eq!(grid.cell(1, 2), Some(&CellValue::Blank));
    }

    #[test]
    fn empty_csv_is_rejected() {
        assert!(read_csv("".as_bytes(), "empty").is_err());
    }
}
