use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::game::{Direction, Grid, Position};

use super::agent::{candidate_moves, Agent};

/// An agent that selects uniformly at random from the candidate swaps.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn select_move(&mut self, grid: &Grid) -> Option<(Position, Direction)> {
        let moves = candidate_moves(grid);
        if moves.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..moves.len());
        Some(moves[idx])
    }

    fn name(&self) -> &str {
        "Random"
    }
}
