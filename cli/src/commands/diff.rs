use crate::OutputFormat;
use crate::input::load_workbook;
use crate::output::{json, text};
use anyhow::{Context, Result};
use grid_diff::{DiffConfig, WorkbookDiff, diff_workbooks};
use std::io;
use std::path::Path;
use std::process::ExitCode;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
}

pub fn run(
    old_path: &Path,
    new_path: &Path,
    format: OutputFormat,
    quiet: bool,
    blank_lines_match: bool,
    max_lcs_cells: Option<u64>,
) -> Result<ExitCode> {
    let verbosity = if quiet {
        Verbosity::Quiet
    } else {
        Verbosity::Normal
    };

    let config = build_config(blank_lines_match, max_lcs_cells)?;

    let old_wb = load_workbook(old_path)
        .with_context(|| format!("Failed to load old grid: {}", old_path.display()))?;
    let new_wb = load_workbook(new_path)
        .with_context(|| format!("Failed to load new grid: {}", new_path.display()))?;

    let report = diff_workbooks(&old_wb, &new_wb, &config).context("Diff failed")?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Text => text::write_text_report(&mut handle, &report, verbosity)?,
        OutputFormat::Json => json::write_json_report(&mut handle, &report)?,
    }

    Ok(exit_code_from_report(&report))
}

fn build_config(blank_lines_match: bool, max_lcs_cells: Option<u64>) -> Result<DiffConfig> {
    let mut builder = DiffConfig::builder().blank_lines_match(blank_lines_match);
    if let Some(limit) = max_lcs_cells {
        builder = builder.max_lcs_cells(limit);
    }
    builder.build().context("Invalid diff options")
}

fn exit_code_from_report(report: &WorkbookDiff) -> ExitCode {
    if report.is_empty() {
        ExitCode::from(0)
    } else {
        ExitCode::from(1)
    }
}
