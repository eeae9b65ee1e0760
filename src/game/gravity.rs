//! Run removal, column gravity and refill.
//!
//! Horizontal and vertical removals share one primitive: clear the run's
//! cells, then settle every touched column independently.

use super::board::{Cell, Grid, Position, TokenSource};
use super::detect::Run;

/// Clear the on-grid cells of `run` to `Empty`.
///
/// Returns the touched columns in ascending order; empty when the run has
/// zero length or starts off-grid. Cells past the grid edge are ignored.
pub fn clear_run(grid: &mut Grid, run: &Run) -> Vec<usize> {
    if run.len == 0 || !grid.contains(run.start) {
        return Vec::new();
    }
    let size = grid.size();
    let mut columns = Vec::new();
    for pos in run.positions().take_while(|p| p.row < size && p.col < size) {
        grid.set(pos, Cell::Empty);
        if !columns.contains(&pos.col) {
            columns.push(pos.col);
        }
    }
    columns.sort_unstable();
    columns
}

/// Compact the non-empty cells of `col` to the bottom, keeping their order,
/// then refill the vacated cells top to bottom from `source`.
pub fn settle_column<S: TokenSource + ?Sized>(grid: &mut Grid, col: usize, source: &mut S) {
    let size = grid.size();
    if col >= size {
        return;
    }

    let mut write = size;
    for row in (0..size).rev() {
        let pos = Position::new(row, col);
        if let Some(cell @ Cell::Candy(_)) = grid.get(pos) {
            write -= 1;
            if write != row {
                grid.set(Position::new(write, col), cell);
                grid.set(pos, Cell::Empty);
            }
        }
    }

    let kinds = grid.kind_count();
    for row in 0..write {
        grid.set(Position::new(row, col), Cell::Candy(source.draw(kinds)));
    }
}

/// Remove one run and resolve gravity for the columns it touched.
///
/// Returns `false` when the run was a no-op (zero length or off-grid start).
pub fn remove_run<S: TokenSource + ?Sized>(grid: &mut Grid, run: &Run, source: &mut S) -> bool {
    let columns = clear_run(grid, run);
    for &col in &columns {
        settle_column(grid, col, source);
    }
    !columns.is_empty()
}

/// Clear every run first, then settle the union of touched columns once.
///
/// Returns the number of runs that touched the grid.
pub fn remove_runs<S: TokenSource + ?Sized>(grid: &mut Grid, runs: &[Run], source: &mut S) -> usize {
    let mut columns = Vec::new();
    let mut removed = 0;
    for run in runs {
        let touched = clear_run(grid, run);
        if !touched.is_empty() {
            removed += 1;
        }
        columns.extend(touched);
    }
    columns.sort_unstable();
    columns.dedup();
    for col in columns {
        settle_column(grid, col, source);
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::ScriptedTokens;

    #[test]
    fn test_vertical_removal_compacts_column() {
        let mut grid = Grid::from_rows(
            [
                [1, 4, 1, 4, 3, 4],
                [2, 3, 2, 3, 4, 3],
                [3, 2, 3, 2, 3, 4],
                [3, 1, 4, 1, 4, 3],
                [3, 2, 1, 2, 3, 4],
                [4, 1, 2, 1, 4, 3],
            ],
            4,
        )
        .unwrap();
        let mut tokens = ScriptedTokens::new([4, 2, 1]);

        let run = Run::vertical(Position::new(2, 0), 3);
        assert!(remove_run(&mut grid, &run, &mut tokens));

        let col: Vec<u8> = grid.column(0).unwrap().map(Cell::as_u8).collect();
        assert_eq!(col, vec![4, 2, 1, 1, 2, 4]);
        assert_eq!(tokens.drawn(), 3);
        let col1: Vec<u8> = grid.column(1).unwrap().map(Cell::as_u8).collect();
        assert_eq!(col1, vec![4, 3, 2, 1, 2, 1]);
    }

    #[test]
    fn test_horizontal_removal_in_top_row_only_refills_run() {
        let mut grid = Grid::from_rows(
            [
                [2, 2, 2, 1, 3],
                [4, 6, 4, 6, 4],
                [5, 3, 5, 3, 5],
                [6, 4, 6, 4, 6],
                [3, 5, 3, 5, 3],
            ],
            6,
        )
        .unwrap();
        let before = grid.clone();
        let mut tokens = ScriptedTokens::new([1, 5, 6]);

        assert!(remove_run(&mut grid, &Run::horizontal(Position::new(0, 0), 3), &mut tokens));

        assert_eq!(&grid.to_rows()[0], &vec![1, 5, 6, 1, 3]);
        assert_eq!(&grid.to_rows()[1..], &before.to_rows()[1..]);
    }

    #[test]
    fn test_horizontal_removal_drops_cells_above() {
        let mut grid = Grid::from_rows(
            [
                [1, 2, 3],
                [2, 3, 1],
                [3, 3, 3],
            ],
            3,
        )
        .unwrap();
        let mut tokens = ScriptedTokens::new([2, 1, 2]);

        remove_run(&mut grid, &Run::horizontal(Position::new(2, 0), 3), &mut tokens);

        assert_eq!(
            grid.to_rows(),
            vec![vec![2, 1, 2], vec![1, 2, 3], vec![2, 3, 1]]
        );
    }

    #[test]
    fn test_zero_length_and_off_grid_are_noops() {
        let mut grid = Grid::from_rows([[1, 2, 3], [2, 3, 1], [3, 1, 2]], 3).unwrap();
        let before = grid.clone();
        let mut tokens = ScriptedTokens::new([1]);

        assert!(!remove_run(&mut grid, &Run::vertical(Position::new(0, 0), 0), &mut tokens));
        assert!(!remove_run(&mut grid, &Run::horizontal(Position::new(3, 0), 3), &mut tokens));
        assert_eq!(grid, before);
        assert_eq!(tokens.drawn(), 0);
    }

    #[test]
    fn test_overlong_run_is_clipped() {
        let mut grid = Grid::from_rows([[1, 2, 3], [2, 3, 1], [3, 1, 2]], 3).unwrap();
        let mut tokens = ScriptedTokens::new([3, 3]);

        let columns = clear_run(&mut grid, &Run::vertical(Position::new(1, 2), 5));
        assert_eq!(columns, vec![2]);
        assert_eq!(grid.get(Position::new(0, 2)), Some(Cell::Candy(3)));
        assert_eq!(grid.get(Position::new(1, 2)), Some(Cell::Empty));
        assert_eq!(grid.get(Position::new(2, 2)), Some(Cell::Empty));

        settle_column(&mut grid, 2, &mut tokens);
        let col: Vec<u8> = grid.column(2).unwrap().map(Cell::as_u8).collect();
        assert_eq!(col, vec![3, 3, 3]);
    }

    #[test]
    fn test_remove_runs_settles_each_column_once() {
        // Crossing runs share cell (2, 2).
        let mut grid = Grid::from_rows(
            [
                [1, 2, 4, 2, 1],
                [2, 1, 4, 1, 2],
                [4, 4, 4, 2, 1],
                [1, 2, 3, 1, 2],
                [2, 1, 2, 2, 1],
            ],
            4,
        )
        .unwrap();
        let runs = vec![
            Run::horizontal(Position::new(2, 0), 3),
            Run::vertical(Position::new(0, 2), 3),
        ];
        let mut tokens = ScriptedTokens::new([3, 3, 1, 2, 3]);

        assert_eq!(remove_runs(&mut grid, &runs, &mut tokens), 2);
        // Column 0 and 1 each lose one cell, column 2 loses three.
        assert_eq!(tokens.drawn(), 5);
        let col2: Vec<u8> = grid.column(2).unwrap().map(Cell::as_u8).collect();
        assert_eq!(col2, vec![1, 2, 3, 3, 2]);
        let col0: Vec<u8> = grid.column(0).unwrap().map(Cell::as_u8).collect();
        assert_eq!(col0, vec![3, 1, 2, 1, 2]);
    }
}
