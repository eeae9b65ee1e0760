use crate::game::{Cell, Direction, Grid, Position};

/// Universal interface for autoplay agents.
pub trait Agent {
    /// Pick a swap on `grid`, or `None` if no swap is possible.
    fn select_move(&mut self, grid: &Grid) -> Option<(Position, Direction)>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}

/// Every distinct in-bounds swap between two different tokens, in row-major
/// order. Each pair of cells appears once (as a `Right` or `Down` swap).
pub fn candidate_moves(grid: &Grid) -> Vec<(Position, Direction)> {
    let size = grid.size();
    let mut moves = Vec::new();
    for row in 0..size {
        for col in 0..size {
            let pos = Position::new(row, col);
            let Some(Cell::Candy(kind)) = grid.get(pos) else {
                continue;
            };
            for dir in [Direction::Right, Direction::Down] {
                let Some(other) = pos.step(dir, size) else {
                    continue;
                };
                if matches!(grid.get(other), Some(Cell::Candy(k)) if k != kind) {
                    moves.push((pos, dir));
                }
            }
        }
    }
    moves
}
