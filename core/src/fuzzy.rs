//! Fuzzy line equality.
//!
//! Two lines (rows or columns) are alignment candidates when they share at
//! least one non-blank value, anywhere in either line. The heuristic tolerates
//! inserted, deleted, or reordered columns and multi-cell edits while still
//! anchoring the alignment.
//!
//! Known limitation: when many unrelated lines carry a common value (a shared
//! status column, say), any two of them count as equal and the alignment can
//! pair lines a human would not. Lines with no non-blank value never match,
//! including two fully blank lines; `DiffConfig::blank_lines_match` opts out
//! of that second rule.

use crate::config::DiffConfig;
use crate::value::CellValue;
use rustc_hash::FxHashSet;

/// Equality predicate used by the aligner.
///
/// Scalars compare exactly; sequences compare by shared non-blank values.
pub trait FuzzyEq {
    fn fuzzy_eq(&self, other: &Self) -> bool;
}

impl FuzzyEq for CellValue {
    fn fuzzy_eq(&self, other: &Self) -> bool {
        self == other
    }
}

impl FuzzyEq for [CellValue] {
    fn fuzzy_eq(&self, other: &Self) -> bool {
        ValueSet::from_values(self).intersects(&ValueSet::from_values(other))
    }
}

impl FuzzyEq for Vec<CellValue> {
    fn fuzzy_eq(&self, other: &Self) -> bool {
        self.as_slice().fuzzy_eq(other.as_slice())
    }
}

/// The distinct non-blank values of one line.
#[derive(Debug, Clone, Default)]
pub(crate) struct ValueSet<'a> {
    values: FxHashSet<&'a CellValue>,
}

impl<'a> ValueSet<'a> {
    pub(crate) fn from_values(values: impl IntoIterator<Item = &'a CellValue>) -> Self {
        ValueSet {
            values: values.into_iter().filter(|v| !v.is_blank()).collect(),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn intersects(&self, other: &ValueSet<'_>) -> bool {
        let (small, large) = if self.values.len() <= other.values.len() {
            (&self.values, &other.values)
        } else {
            (&other.values, &self.values)
        };
        small.iter().any(|v| large.contains(v))
    }
}

/// Line predicate configured for one diff run.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LineMatcher {
    blank_lines_match: bool,
}

impl LineMatcher {
    pub(crate) fn new(config: &DiffConfig) -> Self {
        LineMatcher {
            blank_lines_match: config.blank_lines_match,
        }
    }

    pub(crate) fn matches(&self, a: &ValueSet<'_>, b: &ValueSet<'_>) -> bool {
        a.intersects(b) || (self.blank_lines_match && a.is_empty() && b.is_empty())
    }
}
