//! Workbooks as named collections of grids, and sheet-level diffing.
//!
//! Sheets are paired by exact name. Sheets present on one side only are
//! reported as such and not diffed. Names must be unique within a workbook.

use crate::config::DiffConfig;
use crate::diff::{DiffError, GridDiff, Side};
use crate::engine::diff_grids;
use crate::error_codes;
use crate::grid::Grid;
use log::debug;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum WorkbookError {
    #[error(
        "[GRIDDIFF_INPUT_005] sheet name '{name}' appears more than once. Suggestion: give every sheet a unique name."
    )]
    DuplicateSheet { name: String },
}

impl WorkbookError {
    pub fn code(&self) -> &'static str {
        match self {
            WorkbookError::DuplicateSheet { .. } => error_codes::INPUT_DUPLICATE_SHEET,
        }
    }
}

/// A single named sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    #[serde(rename = "rows")]
    pub grid: Grid,
}

/// An ordered list of uniquely named sheets.
///
/// Deserialization rejects duplicate names; a workbook assembled by hand is
/// checked again by [`diff_workbooks`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WorkbookRepr")]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

#[derive(Deserialize)]
struct WorkbookRepr {
    sheets: Vec<Sheet>,
}

impl TryFrom<WorkbookRepr> for Workbook {
    type Error = WorkbookError;

    fn try_from(repr: WorkbookRepr) -> Result<Self, Self::Error> {
        Workbook::new(repr.sheets)
    }
}

impl Workbook {
    pub fn new(sheets: Vec<Sheet>) -> Result<Workbook, WorkbookError> {
        let workbook = Workbook { sheets };
        workbook.validate()?;
        Ok(workbook)
    }

    pub fn validate(&self) -> Result<(), WorkbookError> {
        let mut seen = FxHashSet::default();
        for name in self.sheet_names() {
            if !seen.insert(name) {
                return Err(WorkbookError::DuplicateSheet {
                    name: name.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.iter().map(|s| s.name.as_str())
    }
}

/// How the sheets of two workbooks line up by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetPlan {
    /// Names on both sides, in `before` order.
    pub common: Vec<String>,
    /// Names only in `before`, in `before` order.
    pub only_in_before: Vec<String>,
    /// Names only in `after`, in `after` order.
    pub only_in_after: Vec<String>,
}

pub fn reconcile_sheets(before: &Workbook, after: &Workbook) -> SheetPlan {
    let before_names: FxHashSet<&str> = before.sheet_names().collect();
    let after_names: FxHashSet<&str> = after.sheet_names().collect();

    let (common, only_in_before): (Vec<&str>, Vec<&str>) = before
        .sheet_names()
        .partition(|name| after_names.contains(name));
    let only_in_after = after
        .sheet_names()
        .filter(|name| !before_names.contains(name));

    SheetPlan {
        common: common.into_iter().map(str::to_string).collect(),
        only_in_before: only_in_before.into_iter().map(str::to_string).collect(),
        only_in_after: only_in_after.map(str::to_string).collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetDiff {
    pub name: String,
    pub diff: GridDiff,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkbookDiff {
    pub sheets: Vec<SheetDiff>,
    pub sheets_removed: Vec<String>,
    pub sheets_added: Vec<String>,
}

impl WorkbookDiff {
    pub fn is_empty(&self) -> bool {
        self.sheets_removed.is_empty()
            && self.sheets_added.is_empty()
            && self.sheets.iter().all(|s| s.diff.is_empty())
    }

    pub fn sheet(&self, name: &str) -> Option<&GridDiff> {
        self.sheets.iter().find(|s| s.name == name).map(|s| &s.diff)
    }
}

/// Diff every sheet the two workbooks have in common.
///
/// Fails if either workbook repeats a sheet name, or on the first sheet that
/// cannot be diffed; the error names it.
pub fn diff_workbooks(
    before: &Workbook,
    after: &Workbook,
    config: &DiffConfig,
) -> Result<WorkbookDiff, DiffError> {
    before
        .validate()
        .map_err(|source| DiffError::InvalidWorkbook {
            side: Side::Before,
            source,
        })?;
    after
        .validate()
        .map_err(|source| DiffError::InvalidWorkbook {
            side: Side::After,
            source,
        })?;

    let plan = reconcile_sheets(before, after);
    debug!(
        "sheets: {} common, {} removed, {} added",
        plan.common.len(),
        plan.only_in_before.len(),
        plan.only_in_after.len()
    );

    let mut sheets = Vec::with_capacity(plan.common.len());
    for name in plan.common {
        let (Some(old), Some(new)) = (before.sheet(&name), after.sheet(&name)) else {
            continue;
        };
        let diff = diff_grids(&old.grid, &new.grid, config).map_err(|source| DiffError::Sheet {
            sheet: name.clone(),
            source: Box::new(source),
        })?;
        sheets.push(SheetDiff { name, diff });
    }

    Ok(WorkbookDiff {
        sheets,
        sheets_removed: plan.only_in_before,
        sheets_added: plan.only_in_after,
    })
}
