use crate::game::{find_all_runs, Direction, Grid, Position};

use super::agent::{candidate_moves, Agent};
use super::random::RandomAgent;

/// Scores a grid as seen right after a swap, before any cascade.
pub trait Heuristic: Send {
    fn evaluate(&self, grid: &Grid) -> u64;
}

/// Total length of every run on the grid.
pub struct RunLengthHeuristic;

impl Heuristic for RunLengthHeuristic {
    fn evaluate(&self, grid: &Grid) -> u64 {
        find_all_runs(grid).iter().map(|run| run.len as u64).sum()
    }
}

/// One-ply lookahead: tries every candidate swap on a scratch grid and keeps
/// the first one with the best heuristic value. Falls back to a random swap
/// when nothing scores.
pub struct GreedyAgent<H: Heuristic = RunLengthHeuristic> {
    heuristic: H,
    fallback: RandomAgent,
}

impl GreedyAgent<RunLengthHeuristic> {
    pub fn new() -> Self {
        Self::with_heuristic(RunLengthHeuristic, RandomAgent::new())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_heuristic(RunLengthHeuristic, RandomAgent::with_seed(seed))
    }
}

impl Default for GreedyAgent<RunLengthHeuristic> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Heuristic> GreedyAgent<H> {
    pub fn with_heuristic(heuristic: H, fallback: RandomAgent) -> Self {
        GreedyAgent {
            heuristic,
            fallback,
        }
    }
}

impl<H: Heuristic> Agent for GreedyAgent<H> {
    fn select_move(&mut self, grid: &Grid) -> Option<(Position, Direction)> {
        let mut scratch = grid.clone();
        let mut best: Option<((Position, Direction), u64)> = None;

        for (pos, dir) in candidate_moves(grid) {
            scratch.swap(pos, dir);
            let value = self.heuristic.evaluate(&scratch);
            scratch.swap(pos, dir);

            if value > best.map_or(0, |(_, top)| top) {
                best = Some(((pos, dir), value));
            }
        }

        match best {
            Some((mv, _)) => Some(mv),
            None => self.fallback.select_move(grid),
        }
    }

    fn name(&self) -> &str {
        "Greedy"
    }
}
