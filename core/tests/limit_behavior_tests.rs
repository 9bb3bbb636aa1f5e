mod common;

use common::{create_large_grid, grid_from_numbers, grid_from_values, same_diagonal, single_sheet_workbook};
use grid_diff::{
    AlignmentToken, CellValue, DiffConfig, DiffError, Pass, diff_grids, diff_workbooks,
};

#[test]
fn large_grid_completes_within_default_limits() {
    let before = create_large_grid(300, 20, 0);

    let mut rows = before.clone().into_rows();
    rows[200][5] = CellValue::Number(-1.0);
    rows.insert(
        150,
        (0..20).map(|col| CellValue::Number(9_000_000.0 + col as f64)).collect(),
    );
    let after = grid_from_values(rows);

    let diff = diff_grids(&before, &after, &DiffConfig::default()).expect("diff should succeed");

    let mut expected_rows: Vec<AlignmentToken> = (0..150)
        .map(|i| AlignmentToken::Same { before: i, after: i })
        .collect();
    expected_rows.push(AlignmentToken::Added(150));
    expected_rows.extend((150..300).map(|i| AlignmentToken::Same {
        before: i,
        after: i + 1,
    }));

    assert_eq!(diff.row_tokens, expected_rows);
    assert_eq!(diff.col_tokens, same_diagonal(20));
    assert_eq!(diff.cell_changes.len(), 1);
    assert_eq!(diff.cell_changes[0].before.row, 200);
    assert_eq!(diff.cell_changes[0].after.row, 201);
    assert_eq!(diff.cell_changes[0].before.col, 5);
}

#[test]
fn row_limit_exceeded_returns_error() {
    let grid = create_large_grid(10, 2, 0);
    let config = DiffConfig {
        max_lcs_cells: 99,
        ..DiffConfig::default()
    };

    let err = diff_grids(&grid, &grid, &config).unwrap_err();
    assert!(matches!(
        err,
        DiffError::LimitsExceeded {
            pass: Pass::Rows,
            before_len: 10,
            after_len: 10,
            limit: 99
        }
    ));
    assert_eq!(err.code(), "GRIDDIFF_DIFF_002");
}

#[test]
fn column_limit_exceeded_after_row_pass_succeeds() {
    let grid = grid_from_numbers(&[&[1, 2, 3], &[4, 5, 6]]);
    let config = DiffConfig {
        max_lcs_cells: 6,
        ..DiffConfig::default()
    };

    let err = diff_grids(&grid, &grid, &config).unwrap_err();
    assert!(matches!(
        err,
        DiffError::LimitsExceeded {
            pass: Pass::Columns,
            before_len: 3,
            after_len: 3,
            ..
        }
    ));
}

#[test]
fn column_limit_counts_only_surviving_columns_table() {
    // No rows survive, so the column table is 0x3 and always fits.
    let before = grid_from_numbers(&[&[1, 2, 3]]);
    let after = grid_from_numbers(&[&[4, 5, 6]]);
    let config = DiffConfig {
        max_lcs_cells: 1,
        ..DiffConfig::default()
    };

    let diff = diff_grids(&before, &after, &config).expect("1x1 row table fits");
    assert!(diff.col_tokens.is_empty());
}

#[test]
fn within_limits_succeeds() {
    let grid = grid_from_numbers(&[&[1, 2], &[3, 4]]);
    let config = DiffConfig {
        max_lcs_cells: 4,
        ..DiffConfig::default()
    };
    let diff = diff_grids(&grid, &grid, &config).expect("2x2 tables fit a limit of 4");
    assert!(diff.is_empty());
}

#[test]
fn workbook_limit_error_includes_sheet_name() {
    let workbook = single_sheet_workbook("Wide", create_large_grid(3, 40, 0));
    let config = DiffConfig {
        max_lcs_cells: 100,
        ..DiffConfig::default()
    };

    let err = diff_workbooks(&workbook, &workbook, &config).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("sheet 'Wide'"), "message: {message}");
    assert!(message.contains("column alignment table 40x40"), "message: {message}");
}
