mod common;

use common::{
    change_coords, coord, grid_from_numbers, grid_from_values, same_diagonal, token_strings,
};
use grid_diff::{
    AlignmentToken, CellValue, DiffConfig, DiffError, GridError, Side, diff, diff_grids, diff_rows,
};

#[test]
fn identical_grid_is_all_same_with_no_changes() {
    let grid = grid_from_values(vec![
        vec!["id".into(), "name".into(), "active".into()],
        vec![1.into(), "ada".into(), true.into()],
        vec![2.into(), "brian".into(), false.into()],
        vec![3.into(), CellValue::Blank, true.into()],
    ]);

    let result = diff(&grid, &grid).unwrap();
    assert_eq!(result.row_tokens, same_diagonal(4));
    assert_eq!(result.col_tokens, same_diagonal(3));
    assert!(result.cell_changes.is_empty());
    assert!(result.is_empty());
}

#[test]
fn inserted_row_is_single_added_token() {
    let before = grid_from_numbers(&[&[1, 2], &[3, 4]]);
    let after = grid_from_numbers(&[&[1, 2], &[9, 9], &[3, 4]]);

    let result = diff(&before, &after).unwrap();
    assert_eq!(token_strings(&result.row_tokens), ["s0:0", "a1", "s1:2"]);
    assert_eq!(result.col_tokens, same_diagonal(2));
    assert!(result.cell_changes.is_empty());

    let summary = result.summary();
    assert_eq!(summary.rows_added, 1);
    assert_eq!(summary.rows_deleted, 0);
}

#[test]
fn single_cell_edit_keeps_structure() {
    let before = grid_from_numbers(&[&[1, 2], &[3, 4]]);
    let after = grid_from_numbers(&[&[1, 9], &[3, 4]]);

    let result = diff(&before, &after).unwrap();
    assert_eq!(result.row_tokens, same_diagonal(2));
    assert_eq!(result.col_tokens, same_diagonal(2));
    assert_eq!(change_coords(&result), vec![((0, 1), (0, 1))]);
    assert_eq!(result.cell_changes[0].from, CellValue::from(2));
    assert_eq!(result.cell_changes[0].to, CellValue::from(9));
}

#[test]
fn full_replacement_deletes_and_adds_without_cell_changes() {
    let before = grid_from_numbers(&[&[1, 2]]);
    let after = grid_from_numbers(&[&[9, 9]]);

    let result = diff(&before, &after).unwrap();
    assert_eq!(
        result.row_tokens,
        vec![AlignmentToken::Deleted(0), AlignmentToken::Added(0)]
    );
    assert!(result.col_tokens.is_empty());
    assert!(result.cell_changes.is_empty());
}

#[test]
fn blank_rows_never_align() {
    let rows = vec![
        vec![1.into(), 2.into()],
        vec![CellValue::Blank, CellValue::Blank],
        vec![3.into(), 4.into()],
    ];
    let before = grid_from_values(rows.clone());
    let after = grid_from_values(rows);

    let result = diff(&before, &after).unwrap();
    assert_eq!(token_strings(&result.row_tokens), ["s0:0", "d1", "a1", "s2:2"]);
    assert_eq!(result.col_tokens, same_diagonal(2));
    assert!(result.cell_changes.is_empty());
}

#[test]
fn blank_rows_align_when_opted_in() {
    let rows = vec![
        vec![1.into(), 2.into()],
        vec![CellValue::Blank, CellValue::Blank],
        vec![3.into(), 4.into()],
    ];
    let grid = grid_from_values(rows);
    let config = DiffConfig::builder().blank_lines_match(true).build().unwrap();

    let result = diff_grids(&grid, &grid, &config).unwrap();
    assert_eq!(result.row_tokens, same_diagonal(3));
}

#[test]
fn deleted_column_is_reported_by_original_index() {
    let before = grid_from_numbers(&[&[1, 2, 3], &[4, 5, 6]]);
    let after = grid_from_numbers(&[&[1, 3], &[4, 7]]);

    let result = diff(&before, &after).unwrap();
    assert_eq!(result.row_tokens, same_diagonal(2));
    assert_eq!(token_strings(&result.col_tokens), ["s0:0", "d1", "s2:1"]);
    assert_eq!(change_coords(&result), vec![((1, 2), (1, 1))]);
}

#[test]
fn column_pass_indices_follow_row_filtered_grid() {
    let before = grid_from_numbers(&[&[1, 2], &[50, 60], &[3, 4]]);
    let after = grid_from_numbers(&[&[1, 0, 2], &[3, 0, 5]]);

    let result = diff(&before, &after).unwrap();
    assert_eq!(token_strings(&result.row_tokens), ["s0:0", "d1", "s2:1"]);
    assert_eq!(token_strings(&result.col_tokens), ["s0:0", "a1", "s1:2"]);
    assert_eq!(result.cell_changes.len(), 1);
    assert_eq!(result.cell_changes[0].before, coord(2, 1));
    assert_eq!(result.cell_changes[0].after, coord(1, 2));
}

#[test]
fn shared_common_value_pairs_unrelated_rows() {
    let before = grid_from_values(vec![
        vec!["a".into(), "active".into()],
        vec!["b".into(), "active".into()],
    ]);
    let after = grid_from_values(vec![vec!["c".into(), "active".into()]]);

    let result = diff(&before, &after).unwrap();
    assert_eq!(token_strings(&result.row_tokens), ["d0", "s1:0"]);
    assert_eq!(token_strings(&result.col_tokens), ["d0", "a0", "s1:1"]);
    assert!(result.cell_changes.is_empty());
}

#[test]
fn swapping_sides_swaps_change_coordinates() {
    let a = grid_from_numbers(&[&[1, 2], &[3, 4], &[5, 6]]);
    let b = grid_from_numbers(&[&[1, 2], &[5, 7]]);

    let forward = diff(&a, &b).unwrap();
    let backward = diff(&b, &a).unwrap();

    assert_eq!(token_strings(&forward.row_tokens), ["s0:0", "d1", "s2:1"]);
    assert_eq!(token_strings(&backward.row_tokens), ["s0:0", "a1", "s1:2"]);

    let swapped: Vec<_> = change_coords(&backward)
        .into_iter()
        .map(|(before, after)| (after, before))
        .collect();
    assert_eq!(change_coords(&forward), vec![((2, 1), (1, 1))]);
    assert_eq!(change_coords(&forward), swapped);
}

#[test]
fn repeated_runs_are_identical() {
    let before = grid_from_numbers(&[&[1, 2, 3], &[4, 5, 6], &[7, 8, 9], &[1, 5, 9]]);
    let after = grid_from_numbers(&[&[7, 8], &[1, 2], &[4, 0], &[9, 9]]);

    let first = diff(&before, &after).unwrap();
    let second = diff(&before, &after).unwrap();
    assert_eq!(first, second);
}

#[test]
fn mixed_value_types_compare_exactly() {
    let before = grid_from_values(vec![vec!["key".into(), 1.into()], vec!["k2".into(), true.into()]]);
    let after = grid_from_values(vec![vec!["key".into(), "1".into()], vec!["k2".into(), true.into()]]);

    let result = diff(&before, &after).unwrap();
    assert_eq!(result.row_tokens, same_diagonal(2));
    assert_eq!(result.col_tokens, same_diagonal(2));
    assert_eq!(change_coords(&result), vec![((0, 1), (0, 1))]);
}

#[test]
fn degenerate_inputs_are_rejected() {
    let ok = vec![vec![CellValue::from(1)]];

    let err = diff_rows(Vec::new(), ok.clone(), &DiffConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        DiffError::InvalidInput {
            side: Side::Before,
            source: GridError::NoRows
        }
    ));

    let err = diff_rows(ok.clone(), vec![Vec::new()], &DiffConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        DiffError::InvalidInput {
            side: Side::After,
            source: GridError::NoColumns
        }
    ));

    let ragged = vec![vec![CellValue::from(1)], vec![CellValue::from(2), CellValue::from(3)]];
    let err = diff_rows(ragged, ok, &DiffConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        DiffError::InvalidInput {
            source: GridError::Ragged { row: 1, expected: 1, found: 2 },
            ..
        }
    ));
    assert_eq!(err.code(), "GRIDDIFF_DIFF_001");
}
