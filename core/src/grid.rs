//! Dense rectangular grids of cell values.

use crate::error_codes;
use crate::value::CellValue;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a row set cannot form a [`Grid`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum GridError {
    #[error("[GRIDDIFF_INPUT_001] grid has no rows. Suggestion: supply at least one row of cells.")]
    NoRows,
    #[error(
        "[GRIDDIFF_INPUT_002] grid has no columns. Suggestion: supply at least one cell per row."
    )]
    NoColumns,
    #[error(
        "[GRIDDIFF_INPUT_003] row {row} has {found} cells but row 0 has {expected}. Suggestion: pad rows to a rectangular shape before diffing."
    )]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error(
        "[GRIDDIFF_INPUT_004] grid dimensions {nrows}x{ncols} exceed the addressable range."
    )]
    TooLarge { nrows: usize, ncols: usize },
}

impl GridError {
    pub fn code(&self) -> &'static str {
        match self {
            GridError::NoRows => error_codes::INPUT_NO_ROWS,
            GridError::NoColumns => error_codes::INPUT_NO_COLUMNS,
            GridError::Ragged { .. } => error_codes::INPUT_RAGGED,
            GridError::TooLarge { .. } => error_codes::INPUT_TOO_LARGE,
        }
    }
}

/// A non-empty, rectangular, row-major grid of cell values.
///
/// # Invariants
///
/// At least one row, at least one column, and every row has exactly
/// `ncols()` cells. Both dimensions fit in `u32`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<CellValue>>", into = "Vec<Vec<CellValue>>")]
pub struct Grid {
    rows: Vec<Vec<CellValue>>,
}

impl Grid {
    pub fn from_rows(rows: Vec<Vec<CellValue>>) -> Result<Grid, GridError> {
        let Some(first) = rows.first() else {
            return Err(GridError::NoRows);
        };
        let expected = first.len();
        if expected == 0 {
            return Err(GridError::NoColumns);
        }
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != expected)
        {
            return Err(GridError::Ragged {
                row,
                expected,
                found,
            });
        }
        if u32::try_from(rows.len()).is_err() || u32::try_from(expected).is_err() {
            return Err(GridError::TooLarge {
                nrows: rows.len(),
                ncols: expected,
            });
        }
        Ok(Grid { rows })
    }

    pub fn nrows(&self) -> u32 {
        self.rows.len() as u32
    }

    pub fn ncols(&self) -> u32 {
        self.rows[0].len() as u32
    }

    pub fn row(&self, row: u32) -> Option<&[CellValue]> {
        self.rows.get(row as usize).map(Vec::as_slice)
    }

    pub fn cell(&self, row: u32, col: u32) -> Option<&CellValue> {
        self.row(row)?.get(col as usize)
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<CellValue>> {
        self.rows
    }
}

impl TryFrom<Vec<Vec<CellValue>>> for Grid {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<CellValue>>) -> Result<Self, Self::Error> {
        Grid::from_rows(rows)
    }
}

impl From<Grid> for Vec<Vec<CellValue>> {
    fn from(grid: Grid) -> Self {
        grid.rows
    }
}

/// Swap rows and columns of a rectangular table.
///
/// The first line's length is taken as the width; an empty table stays empty.
pub(crate) fn transpose<T: Copy>(lines: &[Vec<T>]) -> Vec<Vec<T>> {
    let width = lines.first().map_or(0, Vec::len);
    (0..width)
        .map(|c| lines.iter().map(|line| line[c]).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: &[i32]) -> Vec<CellValue> {
        values.iter().copied().map(CellValue::from).collect()
    }

    #[test]
    fn rejects_degenerate_shapes() {
        assert_eq!(Grid::from_rows(vec![]), Err(GridError::NoRows));
        assert_eq!(Grid::from_rows(vec![vec![]]), Err(GridError::NoColumns));
        assert_eq!(
            Grid::from_rows(vec![row(&[1, 2]), row(&[3])]),
            Err(GridError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn accessors_report_shape() {
        let grid = Grid::from_rows(vec![row(&[1, 2, 3]), row(&[4, 5, 6])]).unwrap();
        assert_eq!(grid.nrows(), 2);
        assert_eq!(grid.ncols(), 3);
        assert_eq!(grid.cell(1, 2), Some(&CellValue::Number(6.0)));
        assert_eq!(grid.cell(2, 0), None);
        assert_eq!(grid.cell(0, 3), None);
    }

    #[test]
    fn transpose_swaps_axes() {
        let table = vec![vec![1, 2, 3], vec![4, 5, 6]];
        assert_eq!(transpose(&table), vec![vec![1, 4], vec![2, 5], vec![3, 6]]);
        assert_eq!(transpose(&transpose(&table)), table);
        assert!(transpose::<u8>(&[]).is_empty());
    }

    #[test]
    fn deserialize_validates_shape() {
        let grid: Grid = serde_json::from_str(r#"[[1, "a"], [null, true]]"#).unwrap();
        assert_eq!(grid.ncols(), 2);

        let err = serde_json::from_str::<Grid>(r#"[[1, 2], [3]]"#).unwrap_err();
        assert!(err.to_string().contains("GRIDDIFF_INPUT_003"));
        assert!(serde_json::from_str::<Grid>("[]").is_err());
    }
}
