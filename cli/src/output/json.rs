use anyhow::Result;
use grid_diff::{WorkbookDiff, write_workbook_diff};
use std::io::Write;

pub fn write_json_report<W: Write>(w: &mut W, report: &WorkbookDiff) -> Result<()> {
    write_workbook_diff(w, report)?;
    Ok(())
}
