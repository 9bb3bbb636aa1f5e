use crate::commands::diff::Verbosity;
use anyhow::Result;
use grid_diff::{AlignmentToken, CellChange, CellValue, DiffSummary, GridDiff, WorkbookDiff, column_label};
use std::io::Write;

pub fn write_text_report<W: Write>(
    w: &mut W,
    report: &WorkbookDiff,
    verbosity: Verbosity,
) -> Result<()> {
    if report.is_empty() {
        writeln!(w, "No differences found.")?;
        write_summary(w, report, verbosity)?;
        return Ok(());
    }

    if verbosity != Verbosity::Quiet {
        for sheet in report.sheets.iter().filter(|s| !s.diff.is_empty()) {
            writeln!(w, "Sheet \"{}\":", sheet.name)?;
            for line in render_grid_diff(&sheet.diff) {
                writeln!(w, "  {}", line)?;
            }
            writeln!(w)?;
        }

        if !report.sheets_removed.is_empty() || !report.sheets_added.is_empty() {
            for name in &report.sheets_removed {
                writeln!(w, "Sheet \"{}\": REMOVED", name)?;
            }
            for name in &report.sheets_added {
                writeln!(w, "Sheet \"{}\": ADDED", name)?;
            }
            writeln!(w)?;
        }
    }

    write_summary(w, report, verbosity)?;

    Ok(())
}

fn render_grid_diff(diff: &GridDiff) -> Vec<String> {
    let mut lines = Vec::new();

    for token in &diff.row_tokens {
        match token {
            AlignmentToken::Deleted(i) => lines.push(format!("Row {}: REMOVED", i + 1)),
            AlignmentToken::Added(j) => lines.push(format!("Row {}: ADDED", j + 1)),
            AlignmentToken::Same { .. } => {}
        }
    }
    for token in &diff.col_tokens {
        match token {
            AlignmentToken::Deleted(i) => {
                lines.push(format!("Column {}: REMOVED", column_label(*i)))
            }
            AlignmentToken::Added(j) => lines.push(format!("Column {}: ADDED", column_label(*j))),
            AlignmentToken::Same { .. } => {}
        }
    }
    lines.extend(diff.cell_changes.iter().map(render_cell_change));

    lines
}

fn render_cell_change(change: &CellChange) -> String {
    let old_str = format_cell_value(&change.from);
    let new_str = format_cell_value(&change.to);
    if change.before == change.after {
        format!("Cell {}: {} => {}", change.before, old_str, new_str)
    } else {
        format!(
            "Cell {} -> {}: {} => {}",
            change.before, change.after, old_str, new_str
        )
    }
}

fn format_cell_value(value: &CellValue) -> String {
    match value {
        CellValue::Blank => "<blank>".to_string(),
        CellValue::Text(text) => format!("\"{}\"", escape_string(text)),
        other => other.to_string(),
    }
}

fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
        .replace('"', "\\\"")
}

fn write_summary<W: Write>(w: &mut W, report: &WorkbookDiff, verbosity: Verbosity) -> Result<()> {
    if verbosity == Verbosity::Quiet && report.is_empty() {
        return Ok(());
    }

    let counts = report
        .sheets
        .iter()
        .map(|s| s.diff.summary())
        .fold(DiffSummary::default(), |acc, s| DiffSummary {
            rows_added: acc.rows_added + s.rows_added,
            rows_deleted: acc.rows_deleted + s.rows_deleted,
            cols_added: acc.cols_added + s.cols_added,
            cols_deleted: acc.cols_deleted + s.cols_deleted,
            cells_changed: acc.cells_changed + s.cells_changed,
        });
    let sheet_changes = report.sheets_removed.len() + report.sheets_added.len();

    writeln!(w, "---")?;
    writeln!(w, "Summary:")?;
    writeln!(w, "  Total changes: {}", counts.total() + sheet_changes)?;

    if sheet_changes > 0 {
        writeln!(w, "  Sheet changes: {}", sheet_changes)?;
    }
    let rows = counts.rows_added + counts.rows_deleted;
    if rows > 0 {
        writeln!(
            w,
            "  Row changes: {} ({} added, {} removed)",
            rows, counts.rows_added, counts.rows_deleted
        )?;
    }
    let cols = counts.cols_added + counts.cols_deleted;
    if cols > 0 {
        writeln!(
            w,
            "  Column changes: {} ({} added, {} removed)",
            cols, counts.cols_added, counts.cols_deleted
        )?;
    }
    if counts.cells_changed > 0 {
        writeln!(w, "  Cell edits: {}", counts.cells_changed)?;
    }

    Ok(())
}
