use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SIZE: usize = 8;
pub const DEFAULT_KINDS: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Candy(u8),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Token kind in `1..=K`, or `None` for an empty cell.
    pub fn kind(self) -> Option<u8> {
        match self {
            Cell::Empty => None,
            Cell::Candy(kind) => Some(kind),
        }
    }

    /// Numeric encoding used by snapshots and scoreboard-free drivers: 0 is empty.
    pub fn as_u8(self) -> u8 {
        self.kind().unwrap_or(0)
    }
}

/// Zero-based cell coordinates. Row 0 is the top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// The neighbouring position one step in `dir`, if it lies on a `size x size` grid.
    pub fn step(self, dir: Direction, size: usize) -> Option<Position> {
        if self.row >= size || self.col >= size {
            return None;
        }
        let (row, col) = match dir {
            Direction::Left => (self.row, self.col.checked_sub(1)?),
            Direction::Up => (self.row.checked_sub(1)?, self.col),
            Direction::Right => (self.row, self.col + 1),
            Direction::Down => (self.row + 1, self.col),
        };
        (row < size && col < size).then_some(Position { row, col })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Up,
        Direction::Right,
        Direction::Down,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
        }
    }
}

/// Pure bounds check: can the cell at `pos` be swapped towards `dir` on a
/// `size x size` grid?
pub fn is_matchable(pos: Position, dir: Direction, size: usize) -> bool {
    pos.step(dir, size).is_some()
}

/// Source of fresh tokens for the deal and for refills.
pub trait TokenSource {
    /// Draw a kind uniformly from `1..=kind_count`.
    fn draw(&mut self, kind_count: u8) -> u8;
}

impl TokenSource for StdRng {
    fn draw(&mut self, kind_count: u8) -> u8 {
        self.random_range(1..=kind_count)
    }
}

/// Square grid of cells stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    size: usize,
    kind_count: u8,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid where every cell is empty
    pub fn empty(size: usize, kind_count: u8) -> Self {
        Grid {
            size,
            kind_count,
            cells: vec![Cell::Empty; size * size],
        }
    }

    /// Build a grid from rows of raw values (0 = empty).
    ///
    /// Returns `None` if the rows do not form a square or a value exceeds
    /// `kind_count`.
    pub fn from_rows<I, R>(rows: I, kind_count: u8) -> Option<Self>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[u8]>,
    {
        let rows: Vec<R> = rows.into_iter().collect();
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for row in &rows {
            let row = row.as_ref();
            if row.len() != size {
                return None;
            }
            for &value in row {
                cells.push(match value {
                    0 => Cell::Empty,
                    v if v <= kind_count => Cell::Candy(v),
                    _ => return None,
                });
            }
        }
        Some(Grid {
            size,
            kind_count,
            cells,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn kind_count(&self) -> u8 {
        self.kind_count
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    /// Get the cell at `pos`, or `None` outside the grid
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.contains(pos).then(|| self.cells[self.index(pos)])
    }

    /// Write `cell` at `pos`. Returns `false` (and does nothing) outside the grid.
    pub fn set(&mut self, pos: Position, cell: Cell) -> bool {
        if !self.contains(pos) {
            return false;
        }
        let idx = self.index(pos);
        self.cells[idx] = cell;
        true
    }

    /// Cells of `row`, left to right, or `None` outside the grid.
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        (row < self.size).then(|| &self.cells[row * self.size..(row + 1) * self.size])
    }

    /// Cells of `col`, top to bottom, or `None` outside the grid.
    pub fn column(&self, col: usize) -> Option<impl Iterator<Item = Cell> + '_> {
        (col < self.size).then(|| self.cells.iter().skip(col).step_by(self.size).copied())
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Draw a fresh token for every cell.
    pub fn fill_random<S: TokenSource + ?Sized>(&mut self, source: &mut S) {
        let kinds = self.kind_count;
        for cell in &mut self.cells {
            *cell = Cell::Candy(source.draw(kinds));
        }
    }

    /// Exchange the cell at `pos` with its neighbour towards `dir`.
    ///
    /// Returns `false` without touching the grid when either cell is off-grid.
    pub fn swap(&mut self, pos: Position, dir: Direction) -> bool {
        let Some(other) = pos.step(dir, self.size) else {
            return false;
        };
        let (a, b) = (self.index(pos), self.index(other));
        self.cells.swap(a, b);
        true
    }

    /// Read-only snapshot as raw values, row by row (0 = empty).
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.size.max(1))
            .map(|row| row.iter().map(|c| c.as_u8()).collect())
            .collect()
    }

    fn index(&self, pos: Position) -> usize {
        pos.row * self.size + pos.col
    }
}
