//! Match-3 engine: grid model, swap, run detection, gravity, cascade
//! resolution and scoring, plus the session layer the game modes run on.

mod board;
mod cascade;
pub mod detect;
mod engine;
pub mod gravity;
mod mode;
mod scoring;
mod state;

#[cfg(test)]
pub(crate) mod test_support;

pub use board::{
    is_matchable, Cell, Direction, Grid, Position, TokenSource, DEFAULT_KINDS, DEFAULT_SIZE,
};
pub use cascade::{resolve_cascade, Cascade, CascadeStep, DetectionMode, MAX_CASCADE_ROUNDS};
pub use detect::{find_all_runs, find_run, has_run, Orientation, Run, MIN_RUN};
pub use engine::{
    apply_move, new_grid, swap_and_resolve, Engine, EngineConfig, MoveOutcome, MAX_GRID_SIZE,
    MAX_KINDS, MIN_KINDS,
};
pub use mode::{GameMode, ModeRules, Progress, Ranking};
pub use scoring::{fibonacci, fibonacci_points, linear_combo_points, ScoreRule, ScoringPolicy};
pub use state::{GameSession, MovePolicy};
