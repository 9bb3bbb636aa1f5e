//! The two-pass grid diff.
//!
//! 1. Align rows with fuzzy line equality and drop the unmatched ones.
//! 2. Transpose, align the surviving columns the same way, transpose back.
//! 3. Compare the now equally shaped residual grids cell by cell, reporting
//!    changes in original coordinates.

use crate::config::DiffConfig;
use crate::diff::{CellChange, DiffError, GridDiff, Pass, Side};
use crate::fuzzy::{LineMatcher, ValueSet};
use crate::grid::Grid;
use crate::lcs::align_by;
use crate::replay::{TrackedGrid, replay};
use crate::tokens::{AlignmentToken, generate_tokens};
use crate::value::CellValue;
use log::{debug, trace};

/// Compare two grids.
pub fn diff_grids(before: &Grid, after: &Grid, config: &DiffConfig) -> Result<GridDiff, DiffError> {
    config.validate()?;

    let mut before_lines = TrackedGrid::from_grid(before);
    let mut after_lines = TrackedGrid::from_grid(after);

    let row_tokens = run_pass(Pass::Rows, &mut before_lines, &mut after_lines, config)?;

    let mut before_lines = before_lines.transpose();
    let mut after_lines = after_lines.transpose();

    let col_tokens = run_pass(Pass::Columns, &mut before_lines, &mut after_lines, config)?;

    let before_lines = before_lines.transpose();
    let after_lines = after_lines.transpose();

    let cell_changes = compare_cells(&before_lines, &after_lines);

    debug!(
        "grid diff {}x{} -> {}x{}: {} residual rows, {} cell changes",
        before.nrows(),
        before.ncols(),
        after.nrows(),
        after.ncols(),
        before_lines.len(),
        cell_changes.len()
    );

    Ok(GridDiff {
        row_tokens,
        col_tokens,
        cell_changes,
    })
}

/// Validate raw row data and compare it.
///
/// Zero rows, zero columns, or ragged rows on either side are rejected with
/// [`DiffError::InvalidInput`] naming the offending side.
pub fn diff_rows(
    before: Vec<Vec<CellValue>>,
    after: Vec<Vec<CellValue>>,
    config: &DiffConfig,
) -> Result<GridDiff, DiffError> {
    let before = Grid::from_rows(before).map_err(|source| DiffError::InvalidInput {
        side: Side::Before,
        source,
    })?;
    let after = Grid::from_rows(after).map_err(|source| DiffError::InvalidInput {
        side: Side::After,
        source,
    })?;
    diff_grids(&before, &after, config)
}

fn run_pass(
    pass: Pass,
    before: &mut TrackedGrid<'_>,
    after: &mut TrackedGrid<'_>,
    config: &DiffConfig,
) -> Result<Vec<AlignmentToken>, DiffError> {
    let before_len = before.len();
    let after_len = after.len();

    let table_cells = u64::from(before_len) * u64::from(after_len);
    if table_cells > config.max_lcs_cells {
        return Err(DiffError::LimitsExceeded {
            pass,
            before_len,
            after_len,
            limit: config.max_lcs_cells,
        });
    }
    trace!("{pass} pass: {before_len}x{after_len} alignment table");

    let alignment = {
        let before_sets = value_sets(before);
        let after_sets = value_sets(after);
        let matcher = LineMatcher::new(config);
        align_by(&before_sets, &after_sets, |a, b| matcher.matches(a, b))
    };

    let tokens = generate_tokens(before_len, after_len, &alignment);
    replay(&tokens, before, after);

    debug!(
        "{pass} pass: {before_len} -> {after_len} lines, {} matched, {} deleted, {} added",
        alignment.len(),
        before_len as usize - alignment.len(),
        after_len as usize - alignment.len()
    );

    Ok(tokens)
}

fn value_sets<'a>(grid: &TrackedGrid<'a>) -> Vec<ValueSet<'a>> {
    grid.lines()
        .iter()
        .map(|line| ValueSet::from_values(line.iter().map(|cell| cell.value)))
        .collect()
}

fn compare_cells(before: &TrackedGrid<'_>, after: &TrackedGrid<'_>) -> Vec<CellChange> {
    debug_assert_eq!(before.len(), after.len());

    before
        .lines()
        .iter()
        .zip(after.lines())
        .flat_map(|(row_b, row_a)| {
            debug_assert_eq!(row_b.len(), row_a.len());
            row_b.iter().zip(row_a)
        })
        .filter(|(b, a)| b.value != a.value)
        .map(|(b, a)| CellChange {
            before: b.origin,
            after: a.origin,
            from: b.value.clone(),
            to: a.value.clone(),
        })
        .collect()
}
