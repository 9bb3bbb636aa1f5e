//! Longest-common-subsequence alignment of two line sequences.
//!
//! The table is filled front to back. Cell `(i, j)` holds the best alignment
//! length of `before[..i]` and `after[..j]`; only two rows of lengths are kept
//! live, while one back-pointer byte per cell is kept for the whole table so the
//! alignment can be recovered by an iterative walk from `(n, m)`.
//!
//! Tie rule: a match always takes the diagonal. Otherwise the pointer goes
//! "left" (skip an `after` line) only when that score is strictly greater than
//! "up" (skip a `before` line). Changing this changes which of several equally
//! long alignments is reported, and with it the token order downstream.

use crate::fuzzy::FuzzyEq;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Diagonal,
    Left,
    Up,
}

/// Index pairs of an alignment: `before[k]` is paired with `after[k]`.
///
/// Both index lists are strictly increasing and have equal length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alignment {
    before: Vec<u32>,
    after: Vec<u32>,
}

impl Alignment {
    pub fn before_indices(&self) -> &[u32] {
        &self.before
    }

    pub fn after_indices(&self) -> &[u32] {
        &self.after
    }

    pub fn len(&self) -> usize {
        self.before.len()
    }

    pub fn is_empty(&self) -> bool {
        self.before.is_empty()
    }

    pub fn pair(&self, k: usize) -> Option<(u32, u32)> {
        Some((*self.before.get(k)?, *self.after.get(k)?))
    }

    pub fn pairs(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.before.iter().copied().zip(self.after.iter().copied())
    }
}

/// Align two sequences with their [`FuzzyEq`] predicate.
pub fn align<T: FuzzyEq>(before: &[T], after: &[T]) -> Alignment {
    align_by(before, after, T::fuzzy_eq)
}

/// Align two sequences with an arbitrary equality predicate.
///
/// Runs in `O(n * m)` time; memory is one byte per table cell plus two rows.
///
/// # Panics
///
/// Panics if either sequence is longer than `u32::MAX`.
pub fn align_by<T>(before: &[T], after: &[T], mut eq: impl FnMut(&T, &T) -> bool) -> Alignment {
    assert!(
        u32::try_from(before.len()).is_ok() && u32::try_from(after.len()).is_ok(),
        "sequences must be addressable with u32 indices"
    );

    let n = before.len();
    let m = after.len();
    if n == 0 || m == 0 {
        return Alignment::default();
    }

    let mut steps = vec![Step::Up; n * m];
    let mut prev = vec![0u32; m + 1];
    let mut curr = vec![0u32; m + 1];

    for i in 1..=n {
        curr[0] = 0;
        let row = &mut steps[(i - 1) * m..i * m];
        for j in 1..=m {
            let (score, step) = if eq(&before[i - 1], &after[j - 1]) {
                (prev[j - 1] + 1, Step::Diagonal)
            } else if curr[j - 1] > prev[j] {
                (curr[j - 1], Step::Left)
            } else {
                (prev[j], Step::Up)
            };
            curr[j] = score;
            row[j - 1] = step;
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    let matched = prev[m] as usize;
    let mut before_idx = Vec::with_capacity(matched);
    let mut after_idx = Vec::with_capacity(matched);

    let (mut i, mut j) = (n, m);
    while i > 0 && j > 0 {
        match steps[(i - 1) * m + (j - 1)] {
            Step::Diagonal => {
                before_idx.push((i - 1) as u32);
                after_idx.push((j - 1) as u32);
                i -= 1;
                j -= 1;
            }
            Step::Left => j -= 1,
            Step::Up => i -= 1,
        }
    }

    before_idx.reverse();
    after_idx.reverse();

    debug_assert_eq!(before_idx.len(), matched);
    debug_assert!(
        before_idx.windows(2).all(|w| w[0] < w[1]) && after_idx.windows(2).all(|w| w[0] < w[1]),
        "alignment indices must be strictly increasing"
    );

    Alignment {
        before: before_idx,
        after: after_idx,
    }
}
