#![no_main]

use libfuzzer_sys::fuzz_target;
use arbitrary::Arbitrary;

use grid_diff::{AlignmentToken, CellValue, DiffConfig, Grid, diff_grids};

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    old_rows: u8,
    old_cols: u8,
    new_rows: u8,
    new_cols: u8,
    old_cells: Vec<FuzzCell>,
    new_cells: Vec<FuzzCell>,
    blank_lines_match: bool,
}

#[derive(Arbitrary, Debug)]
struct FuzzCell {
    row: u8,
    col: u8,
    value_type: u8,
    number_value: f64,
    text_idx: u8,
}

fn build_grid(rows: u8, cols: u8, cells: &[FuzzCell]) -> Grid {
    let nrows = (rows as usize).clamp(1, 40);
    let ncols = (cols as usize).clamp(1, 40);
    let mut values = vec![vec![CellValue::Blank; ncols]; nrows];

    for cell in cells.iter().take(400) {
        let row = cell.row as usize % nrows;
        let col = cell.col as usize % ncols;

        values[row][col] = match cell.value_type % 4 {
            0 => CellValue::Blank,
            1 => CellValue::Number(cell.number_value),
            2 => CellValue::Bool(cell.number_value > 0.5),
            _ => {
                let texts = ["A", "B", "C", "test", "value", ""];
                CellValue::from(texts[cell.text_idx as usize % texts.len()])
            }
        };
    }

    Grid::from_rows(values).expect("fuzz grid is rectangular and non-empty")
}

fn assert_total(tokens: &[AlignmentToken], before_len: u32, after_len: u32) {
    let before: Vec<u32> = tokens.iter().filter_map(AlignmentToken::before_index).collect();
    let after: Vec<u32> = tokens.iter().filter_map(AlignmentToken::after_index).collect();
    assert_eq!(before, (0..before_len).collect::<Vec<_>>());
    assert_eq!(after, (0..after_len).collect::<Vec<_>>());
}

fuzz_target!(|input: FuzzInput| {
    let old_grid = build_grid(input.old_rows, input.old_cols, &input.old_cells);
    let new_grid = build_grid(input.new_rows, input.new_cols, &input.new_cells);

    let config = DiffConfig {
        blank_lines_match: input.blank_lines_match,
        ..Default::default()
    };

    let diff = diff_grids(&old_grid, &new_grid, &config).expect("small grids stay under the limit");
    assert_total(&diff.row_tokens, old_grid.nrows(), new_grid.nrows());
    if !diff.col_tokens.is_empty() {
        assert_total(&diff.col_tokens, old_grid.ncols(), new_grid.ncols());
    }
    for change in &diff.cell_changes {
        assert_ne!(change.from, change.to);
    }
});
