//! Grid Diff: structural comparison of two rectangular grids of cell values.
//!
//! This crate provides functionality for:
//! - Aligning rows, then columns, with a fuzzy "shares a value" line equality
//! - Reporting added/deleted/kept rows and columns as alignment tokens
//! - Reporting changed cells in the coordinates of the original inputs
//! - Pairing the sheets of two workbooks by name and diffing each pair
//! - Reading `.xlsx` worksheets as grids
//! - Serializing results to JSON
//!
//! # Quick Start
//!
//! ```ignore
//! use grid_diff::{CellValue, DiffConfig, Grid, diff_grids};
//!
//! let before = Grid::from_rows(vec![vec![1.into(), 2.into()], vec![3.into(), 4.into()]])?;
//! let after = Grid::from_rows(vec![vec![1.into(), 9.into()], vec![3.into(), 4.into()]])?;
//! let diff = diff_grids(&before, &after, &DiffConfig::default())?;
//!
//! for change in &diff.cell_changes {
//!     println!("{} -> {}: {} => {}", change.before, change.after, change.from, change.to);
//! }
//! ```

mod addressing;
mod config;
mod diff;
mod engine;
pub mod error_codes;
mod fuzzy;
mod grid;
mod lcs;
mod output;
mod replay;
mod tokens;
mod value;
mod workbook;
mod xlsx;

pub use addressing::{
    AddressParseError, CellCoord, address_to_index, column_label, index_to_address,
};
pub use config::{ConfigError, DEFAULT_MAX_LCS_CELLS, DiffConfig, DiffConfigBuilder};
pub use diff::{CellChange, DiffError, DiffSummary, GridDiff, Pass, Side};
pub use engine::{diff_grids, diff_rows};
pub use fuzzy::FuzzyEq;
pub use grid::{Grid, GridError};
pub use lcs::{Alignment, align, align_by};
pub use output::json::{
    CellDiff, grid_diff_to_cell_diffs, serialize_cell_diffs, serialize_grid_diff,
    serialize_workbook_diff, write_workbook_diff,
};
pub use tokens::{AlignmentToken, TokenParseError, generate_tokens};
pub use value::CellValue;
pub use workbook::{
    Sheet, SheetDiff, SheetPlan, Workbook, WorkbookDiff, WorkbookError, diff_workbooks,
    reconcile_sheets,
};
pub use xlsx::{MAX_PART_BYTES, MAX_SHEET_CELLS, XlsxError, open_xlsx, read_xlsx};

/// Compare two grids with the default configuration.
pub fn diff(before: &Grid, after: &Grid) -> Result<GridDiff, DiffError> {
    diff_grids(before, after, &DiffConfig::default())
}
