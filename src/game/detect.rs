//! Run detection over rows and columns.

use serde::{Deserialize, Serialize};

use super::board::{Cell, Grid, Position};

/// Shortest sequence of equal tokens that counts as a match.
pub const MIN_RUN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A detected match: `len` equal tokens starting at `start`, extending right
/// (horizontal) or down (vertical).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Run {
    pub orientation: Orientation,
    pub start: Position,
    pub len: usize,
}

impl Run {
    pub fn horizontal(start: Position, len: usize) -> Self {
        Run {
            orientation: Orientation::Horizontal,
            start,
            len,
        }
    }

    pub fn vertical(start: Position, len: usize) -> Self {
        Run {
            orientation: Orientation::Vertical,
            start,
            len,
        }
    }

    /// Every position covered by the run, in scan order. Not clipped to any grid.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let Run {
            orientation,
            start,
            len,
        } = *self;
        (0..len).map(move |i| match orientation {
            Orientation::Horizontal => Position::new(start.row, start.col + i),
            Orientation::Vertical => Position::new(start.row + i, start.col),
        })
    }
}

/// Yields `(offset, len)` for each run of `MIN_RUN` or more equal, non-empty
/// cells along one line. Empty cells break a run and are never counted.
struct LineRuns<I> {
    cells: std::iter::Enumerate<I>,
    current: Option<(u8, usize, usize)>,
}

impl<I: Iterator<Item = Cell>> LineRuns<I> {
    fn new(cells: I) -> Self {
        LineRuns {
            cells: cells.enumerate(),
            current: None,
        }
    }

    fn close(&mut self) -> Option<(usize, usize)> {
        let (_, start, len) = self.current.take()?;
        (len >= MIN_RUN).then_some((start, len))
    }
}

impl<I: Iterator<Item = Cell>> Iterator for LineRuns<I> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<(usize, usize)> {
        loop {
            match self.cells.next() {
                Some((idx, Cell::Candy(kind))) => match self.current {
                    Some((k, start, len)) if k == kind => {
                        self.current = Some((k, start, len + 1));
                    }
                    _ => {
                        let ended = self.close();
                        self.current = Some((kind, idx, 1));
                        if ended.is_some() {
                            return ended;
                        }
                    }
                },
                Some((_, Cell::Empty)) => {
                    if let Some(ended) = self.close() {
                        return Some(ended);
                    }
                }
                // Tail run ending on the boundary.
                None => return self.close(),
            }
        }
    }
}

fn row_runs(grid: &Grid) -> impl Iterator<Item = Run> + '_ {
    (0..grid.size()).flat_map(move |row| {
        LineRuns::new(grid.row(row).into_iter().flatten().copied())
            .map(move |(col, len)| Run::horizontal(Position::new(row, col), len))
    })
}

fn column_runs(grid: &Grid) -> impl Iterator<Item = Run> + '_ {
    (0..grid.size()).flat_map(move |col| {
        LineRuns::new(grid.column(col).into_iter().flatten())
            .map(move |(row, len)| Run::vertical(Position::new(row, col), len))
    })
}

/// First run in scan order: all rows (top to bottom, left to right) before
/// any column (left to right, top to bottom).
pub fn find_run(grid: &Grid) -> Option<Run> {
    row_runs(grid).chain(column_runs(grid)).next()
}

/// Every run present in the grid, rows first then columns. Runs crossing at
/// a shared cell are both reported.
pub fn find_all_runs(grid: &Grid) -> Vec<Run> {
    row_runs(grid).chain(column_runs(grid)).collect()
}

pub fn has_run(grid: &Grid) -> bool {
    find_run(grid).is_some()
}
