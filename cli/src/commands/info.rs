use crate::input::load_workbook;
use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

pub fn run(path: &Path) -> Result<ExitCode> {
    let workbook =
        load_workbook(path).with_context(|| format!("Failed to load grid: {}", path.display()))?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    let filename = path
        .file_name()
        .map(|s| s.to_string_lossy())
        .unwrap_or_else(|| path.to_string_lossy());

    writeln!(handle, "File: {}", filename)?;
    writeln!(handle, "Sheets: {}", workbook.sheets.len())?;

    for sheet in &workbook.sheets {
        let filled = sheet
            .grid
            .rows()
            .iter()
            .flatten()
            .filter(|cell| !cell.is_blank())
            .count();
        writeln!(
            handle,
            "  - \"{}\" {}x{}, {} non-blank cells",
            sheet.name,
            sheet.grid.nrows(),
            sheet.grid.ncols(),
            filled
        )?;
    }

    Ok(ExitCode::from(0))
}
