use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use super::board::{Cell, Direction, Grid, Position};
use super::engine::{Engine, EngineConfig, MoveOutcome};
use super::mode::{GameMode, ModeRules, Progress};
use crate::error::{ConfigError, MoveError};

/// What happens to a swap that produced no match. Loaded from `[moves]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovePolicy {
    /// Swap the two cells back.
    pub revert_unmatched: bool,
    /// Count the swap against the move budget.
    pub charge_unmatched: bool,
}

impl Default for MovePolicy {
    fn default() -> Self {
        MovePolicy {
            revert_unmatched: true,
            charge_unmatched: true,
        }
    }
}

/// One game in progress: the grid, its token source and the counters the
/// mode predicate and scoreboard need.
#[derive(Debug, Clone)]
pub struct GameSession {
    engine: Engine,
    policy: MovePolicy,
    mode: GameMode,
    rules: ModeRules,
    grid: Grid,
    rng: StdRng,
    score: u64,
    moves_used: u32,
    matched_moves: u32,
    wasted_moves: u32,
    best_cascade: usize,
    longest_run: usize,
}

impl GameSession {
    /// Start a session on a freshly dealt grid.
    pub fn new(
        engine: Engine,
        mode: GameMode,
        rules: ModeRules,
        policy: MovePolicy,
        seed: u64,
    ) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let grid = engine.new_grid(&mut rng);
        Self::assemble(engine, mode, rules, policy, grid, rng)
    }

    /// Start a session on a prepared grid. The engine's grid dimensions are
    /// taken from `grid`, which must pass the engine's validation; `seed`
    /// drives refills only.
    pub fn with_grid(
        engine: Engine,
        mode: GameMode,
        rules: ModeRules,
        policy: MovePolicy,
        grid: Grid,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        let engine = Engine::new(EngineConfig {
            grid_size: grid.size(),
            kind_count: grid.kind_count(),
            ..*engine.config()
        })?;
        let rng = StdRng::seed_from_u64(seed);
        Ok(Self::assemble(engine, mode, rules, policy, grid, rng))
    }

    fn assemble(
        engine: Engine,
        mode: GameMode,
        rules: ModeRules,
        policy: MovePolicy,
        grid: Grid,
        rng: StdRng,
    ) -> Self {
        GameSession {
            engine,
            policy,
            mode,
            rules,
            grid,
            rng,
            score: 0,
            moves_used: 0,
            matched_moves: 0,
            wasted_moves: 0,
            best_cascade: 0,
            longest_run: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn rules(&self) -> &ModeRules {
        &self.rules
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn moves_used(&self) -> u32 {
        self.moves_used
    }

    pub fn matched_moves(&self) -> u32 {
        self.matched_moves
    }

    /// Swaps that produced no match, charged or not
    pub fn wasted_moves(&self) -> u32 {
        self.wasted_moves
    }

    /// Most runs resolved by a single move so far
    pub fn best_cascade(&self) -> usize {
        self.best_cascade
    }

    /// Longest run cleared by any move so far
    pub fn longest_run(&self) -> usize {
        self.longest_run
    }

    pub fn progress(&self, elapsed: Duration) -> Progress {
        Progress {
            moves_used: self.moves_used,
            score: self.score,
            elapsed,
        }
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        self.mode.is_finished(&self.rules, &self.progress(elapsed))
    }

    /// Validate and play one swap.
    ///
    /// `elapsed` is the time spent in the session so far; it only matters
    /// for time-limited modes.
    pub fn play(
        &mut self,
        pos: Position,
        dir: Direction,
        elapsed: Duration,
    ) -> Result<MoveOutcome, MoveError> {
        if self.is_finished(elapsed) {
            return Err(MoveError::SessionOver);
        }
        if !self.engine.is_matchable(pos, dir) {
            return Err(MoveError::OutOfBounds {
                row: pos.row,
                col: pos.col,
                dir,
            });
        }
        if !matches!(self.grid.get(pos), Some(Cell::Candy(_))) {
            return Err(MoveError::EmptyCell {
                row: pos.row,
                col: pos.col,
            });
        }

        let outcome = self.engine.apply_move(&mut self.grid, pos, dir, &mut self.rng);

        if outcome.matched {
            self.moves_used += 1;
            self.matched_moves += 1;
            self.score = self.score.saturating_add(outcome.score_gained);
            self.best_cascade = self.best_cascade.max(outcome.cascade_steps);
            self.longest_run = self.longest_run.max(outcome.longest_run);
        } else {
            self.wasted_moves += 1;
            if self.policy.revert_unmatched {
                self.grid.swap(pos, dir);
            }
            if self.policy.charge_unmatched {
                self.moves_used += 1;
            }
        }

        tracing::debug!(
            matched = outcome.matched,
            gained = outcome.score_gained,
            steps = outcome.cascade_steps,
            score = self.score,
            moves = self.moves_used,
            "move played"
        );
        Ok(outcome)
    }
}
