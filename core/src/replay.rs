//! Line removal driven by a token stream, with original coordinates carried
//! alongside every value.
//!
//! Each cell is tracked as a `(value, origin)` pair, so the coordinate map
//! cannot drift out of step with the data: removing a line removes both.

use crate::addressing::CellCoord;
use crate::grid::{Grid, transpose};
use crate::tokens::AlignmentToken;
use crate::value::CellValue;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TrackedCell<'a> {
    pub value: &'a CellValue,
    pub origin: CellCoord,
}

/// A grid view whose lines are either rows or columns, depending on how many
/// times it has been transposed.
#[derive(Debug, Clone)]
pub(crate) struct TrackedGrid<'a> {
    lines: Vec<Vec<TrackedCell<'a>>>,
}

impl<'a> TrackedGrid<'a> {
    pub(crate) fn from_grid(grid: &'a Grid) -> Self {
        let lines = grid
            .rows()
            .iter()
            .enumerate()
            .map(|(r, row)| {
                row.iter()
                    .enumerate()
                    .map(|(c, value)| TrackedCell {
                        value,
                        origin: CellCoord::new(r as u32, c as u32),
                    })
                    .collect()
            })
            .collect();
        TrackedGrid { lines }
    }

    pub(crate) fn lines(&self) -> &[Vec<TrackedCell<'a>>] {
        &self.lines
    }

    pub(crate) fn len(&self) -> u32 {
        self.lines.len() as u32
    }

    pub(crate) fn transpose(&self) -> Self {
        TrackedGrid {
            lines: transpose(&self.lines),
        }
    }

    /// Drop the lines at the given pass-start indices (ascending).
    ///
    /// Indices are relative to the grid before this call; the shift caused
    /// by earlier removals in the same call is compensated here.
    fn remove_lines(&mut self, doomed: &[u32]) {
        let mut doomed = doomed.iter().copied().peekable();
        let mut index = 0u32;
        self.lines.retain(|_| {
            let keep = doomed.next_if_eq(&index).is_none();
            index += 1;
            keep
        });
    }
}

/// Remove every `Deleted` line from `before` and every `Added` line from
/// `after`. Afterwards both grids hold only `Same` lines, paired by position.
pub(crate) fn replay(
    tokens: &[AlignmentToken],
    before: &mut TrackedGrid<'_>,
    after: &mut TrackedGrid<'_>,
) {
    let mut deleted = Vec::new();
    let mut added = Vec::new();
    for token in tokens {
        match *token {
            AlignmentToken::Deleted(i) => deleted.push(i),
            AlignmentToken::Added(j) => added.push(j),
            AlignmentToken::Same { .. } => {}
        }
    }

    before.remove_lines(&deleted);
    after.remove_lines(&added);

    debug_assert_eq!(
        before.len(),
        after.len(),
        "surviving lines must pair one-to-one"
    );
}
