use crate::diff::GridDiff;
use crate::value::CellValue;
use crate::workbook::WorkbookDiff;
use serde::Serialize;
use std::io::Write;

/// Flat, display-oriented view of one changed cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellDiff {
    pub coords_before: String,
    pub coords_after: String,
    pub value_before: Option<String>,
    pub value_after: Option<String>,
}

fn render_value(value: &CellValue) -> Option<String> {
    (!value.is_blank()).then(|| value.to_string())
}

pub fn grid_diff_to_cell_diffs(diff: &GridDiff) -> Vec<CellDiff> {
    diff.cell_changes
        .iter()
        .map(|change| CellDiff {
            coords_before: change.before.to_a1(),
            coords_after: change.after.to_a1(),
            value_before: render_value(&change.from),
            value_after: render_value(&change.to),
        })
        .collect()
}

pub fn serialize_cell_diffs(diffs: &[CellDiff]) -> serde_json::Result<String> {
    serde_json::to_string(diffs)
}

pub fn serialize_grid_diff(diff: &GridDiff) -> serde_json::Result<String> {
    serde_json::to_string_pretty(diff)
}

pub fn serialize_workbook_diff(diff: &WorkbookDiff) -> serde_json::Result<String> {
    serde_json::to_string_pretty(diff)
}

pub fn write_workbook_diff<W: Write>(w: &mut W, diff: &WorkbookDiff) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(&mut *w, diff)?;
    writeln!(w).map_err(serde_json::Error::io)
}
