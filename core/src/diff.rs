//! Diff results and errors for grid comparison.
//!
//! - [`GridDiff`]: row tokens, column tokens, and changed cells of one comparison
//! - [`CellChange`]: a surviving cell whose value differs, in original coordinates
//! - [`DiffError`]: reasons a comparison is refused

use crate::addressing::CellCoord;
use crate::config::ConfigError;
use crate::error_codes;
use crate::grid::GridError;
use crate::tokens::AlignmentToken;
use crate::value::CellValue;
use crate::workbook::WorkbookError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Which input a problem refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Before,
    After,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Before => "before",
            Side::After => "after",
        })
    }
}

/// The two alignment passes of a grid diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pass {
    Rows,
    Columns,
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Pass::Rows => "row",
            Pass::Columns => "column",
        })
    }
}

/// Errors produced by diffing APIs.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DiffError {
    #[error("[GRIDDIFF_DIFF_001] invalid {side} grid: {source}")]
    InvalidInput { side: Side, source: GridError },

    #[error(
        "[GRIDDIFF_DIFF_002] {pass} alignment table {before_len}x{after_len} exceeds max_lcs_cells={limit}. Suggestion: raise `max_lcs_cells` or diff a smaller range."
    )]
    LimitsExceeded {
        pass: Pass,
        before_len: u32,
        after_len: u32,
        limit: u64,
    },

    #[error("[GRIDDIFF_DIFF_003] invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("[GRIDDIFF_DIFF_004] sheet '{sheet}': {source}")]
    Sheet {
        sheet: String,
        source: Box<DiffError>,
    },

    #[error("[GRIDDIFF_DIFF_005] invalid {side} workbook: {source}")]
    InvalidWorkbook { side: Side, source: WorkbookError },
}

impl DiffError {
    pub fn code(&self) -> &'static str {
        match self {
            DiffError::InvalidInput { .. } => error_codes::DIFF_INVALID_INPUT,
            DiffError::LimitsExceeded { .. } => error_codes::DIFF_LIMITS_EXCEEDED,
            DiffError::InvalidConfig(_) => error_codes::DIFF_INVALID_CONFIG,
            DiffError::Sheet { .. } => error_codes::DIFF_SHEET,
            DiffError::InvalidWorkbook { .. } => error_codes::DIFF_INVALID_WORKBOOK,
        }
    }
}

/// A cell present (by alignment) in both grids whose value changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellChange {
    pub before: CellCoord,
    pub after: CellCoord,
    pub from: CellValue,
    pub to: CellValue,
}

impl CellChange {
    pub fn coords(&self) -> (CellCoord, CellCoord) {
        (self.before, self.after)
    }
}

/// Counts derived from a [`GridDiff`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub rows_added: usize,
    pub rows_deleted: usize,
    pub cols_added: usize,
    pub cols_deleted: usize,
    pub cells_changed: usize,
}

impl DiffSummary {
    pub fn total(&self) -> usize {
        self.rows_added + self.rows_deleted + self.cols_added + self.cols_deleted + self.cells_changed
    }
}

/// Result of comparing two grids.
///
/// Row tokens index original rows. Column tokens index the columns of the
/// grids that survived the row pass, which are the original column indices.
/// When no rows survive, there are no columns to align and `col_tokens` is
/// empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDiff {
    pub row_tokens: Vec<AlignmentToken>,
    pub col_tokens: Vec<AlignmentToken>,
    pub cell_changes: Vec<CellChange>,
}

fn count(tokens: &[AlignmentToken], pred: impl Fn(&AlignmentToken) -> bool) -> usize {
    tokens.iter().filter(|t| pred(t)).count()
}

impl GridDiff {
    pub fn is_empty(&self) -> bool {
        self.cell_changes.is_empty()
            && self.row_tokens.iter().all(AlignmentToken::is_same)
            && self.col_tokens.iter().all(AlignmentToken::is_same)
    }

    pub fn rows_added(&self) -> impl Iterator<Item = u32> + '_ {
        self.row_tokens.iter().filter_map(|t| match t {
            AlignmentToken::Added(j) => Some(*j),
            _ => None,
        })
    }

    pub fn rows_deleted(&self) -> impl Iterator<Item = u32> + '_ {
        self.row_tokens.iter().filter_map(|t| match t {
            AlignmentToken::Deleted(i) => Some(*i),
            _ => None,
        })
    }

    pub fn cols_added(&self) -> impl Iterator<Item = u32> + '_ {
        self.col_tokens.iter().filter_map(|t| match t {
            AlignmentToken::Added(j) => Some(*j),
            _ => None,
        })
    }

    pub fn cols_deleted(&self) -> impl Iterator<Item = u32> + '_ {
        self.col_tokens.iter().filter_map(|t| match t {
            AlignmentToken::Deleted(i) => Some(*i),
            _ => None,
        })
    }

    pub fn summary(&self) -> DiffSummary {
        let added = |t: &AlignmentToken| matches!(t, AlignmentToken::Added(_));
        let deleted = |t: &AlignmentToken| matches!(t, AlignmentToken::Deleted(_));
        DiffSummary {
            rows_added: count(&self.row_tokens, added),
            rows_deleted: count(&self.row_tokens, deleted),
            cols_added: count(&self.col_tokens, added),
            cols_deleted: count(&self.col_tokens, deleted),
            cells_changed: self.cell_changes.len(),
        }
    }
}
