//! The public face of the match engine: dealing, moving and bounds checks.
//!
//! Everything here is total. Off-grid requests are no-ops, a deal that can
//! never be run-free is refused, and a swap that produces no match is
//! reported through [`MoveOutcome::matched`], never as an error. The grid
//! always belongs to the caller.

use serde::{Deserialize, Serialize};
use tracing::instrument;

pub use super::board::is_matchable;
use super::board::{Direction, Grid, Position, TokenSource, DEFAULT_KINDS, DEFAULT_SIZE};
use super::cascade::{resolve_cascade, Cascade, DetectionMode};
use super::detect::{has_run, MIN_RUN};
use super::scoring::{ScoreRule, ScoringPolicy};
use crate::error::ConfigError;

/// Largest grid the whole-grid redraw deal handles in reasonable time.
pub const MAX_GRID_SIZE: usize = 10;
/// With fewer kinds a run-free deal is impossible or vanishingly rare.
pub const MIN_KINDS: u8 = 3;
pub const MAX_KINDS: u8 = 9;

/// Result of one player move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MoveOutcome {
    pub matched: bool,
    pub score_gained: u64,
    /// Number of runs resolved during the cascade.
    pub cascade_steps: usize,
    /// Length of the longest run cleared, 0 when nothing matched.
    pub longest_run: usize,
}

impl From<&Cascade> for MoveOutcome {
    fn from(cascade: &Cascade) -> Self {
        MoveOutcome {
            matched: !cascade.is_empty(),
            score_gained: cascade.total_points(),
            cascade_steps: cascade.steps.len(),
            longest_run: cascade.longest_run(),
        }
    }
}

/// Engine parameters, loaded from the `[engine]` config section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub grid_size: usize,
    pub kind_count: u8,
    pub scoring: ScoringPolicy,
    pub detection: DetectionMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            grid_size: DEFAULT_SIZE,
            kind_count: DEFAULT_KINDS,
            scoring: ScoringPolicy::default(),
            detection: DetectionMode::default(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_RUN..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(ConfigError::Validation(format!(
                "engine.grid_size must be in {MIN_RUN}..={MAX_GRID_SIZE}, got {}",
                self.grid_size
            )));
        }
        if !(MIN_KINDS..=MAX_KINDS).contains(&self.kind_count) {
            return Err(ConfigError::Validation(format!(
                "engine.kind_count must be in {MIN_KINDS}..={MAX_KINDS}, got {}",
                self.kind_count
            )));
        }
        Ok(())
    }
}

/// Whether a run-free `size x size` grid can be dealt from `kind_count` kinds
/// in practice. Grids narrower than a run accept any non-zero kind count.
fn can_deal(size: usize, kind_count: u8) -> bool {
    match size {
        0 => true,
        s if s < MIN_RUN => kind_count > 0,
        _ => kind_count >= MIN_KINDS,
    }
}

/// Deal a run-free grid.
///
/// Every cell is drawn independently; if the result contains any run the
/// whole grid is discarded and redrawn. Returns `None` when `kind_count` is
/// too small for `size` (see [`MIN_KINDS`]).
pub fn new_grid<S: TokenSource + ?Sized>(
    size: usize,
    kind_count: u8,
    source: &mut S,
) -> Option<Grid> {
    if !can_deal(size, kind_count) {
        tracing::warn!(size, kind_count, "refusing a deal that cannot be run-free");
        return None;
    }
    Some(deal(size, kind_count, source))
}

fn deal<S: TokenSource + ?Sized>(size: usize, kind_count: u8, source: &mut S) -> Grid {
    let mut grid = Grid::empty(size, kind_count);
    let mut redraws = 0u64;
    loop {
        grid.fill_random(source);
        if !has_run(&grid) {
            break;
        }
        redraws += 1;
        tracing::trace!(redraws, "deal contained a run, redrawing");
    }
    tracing::debug!(size, kind_count, redraws, "grid dealt");
    grid
}

/// Swap the cell at `pos` towards `dir` and resolve the resulting cascade.
///
/// Returns `None` without touching the grid when the swap leaves the grid.
/// The swap is kept even when nothing matched.
pub fn swap_and_resolve<S, R>(
    grid: &mut Grid,
    pos: Position,
    dir: Direction,
    source: &mut S,
    rule: &R,
    mode: DetectionMode,
) -> Option<Cascade>
where
    S: TokenSource + ?Sized,
    R: ScoreRule + ?Sized,
{
    if !grid.swap(pos, dir) {
        tracing::debug!(row = pos.row, col = pos.col, dir = dir.name(), "swap off grid ignored");
        return None;
    }
    Some(resolve_cascade(grid, source, rule, mode))
}

/// [`swap_and_resolve`] reduced to the summary the driver needs.
pub fn apply_move<S, R>(
    grid: &mut Grid,
    pos: Position,
    dir: Direction,
    source: &mut S,
    rule: &R,
    mode: DetectionMode,
) -> MoveOutcome
where
    S: TokenSource + ?Sized,
    R: ScoreRule + ?Sized,
{
    swap_and_resolve(grid, pos, dir, source, rule, mode)
        .map(|cascade| MoveOutcome::from(&cascade))
        .unwrap_or_default()
}

/// An engine bound to one validated configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Engine { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn new_grid<S: TokenSource + ?Sized>(&self, source: &mut S) -> Grid {
        deal(self.config.grid_size, self.config.kind_count, source)
    }

    #[instrument(level = "debug", skip_all, fields(row = pos.row, col = pos.col, dir = dir.name()))]
    pub fn apply_move<S: TokenSource + ?Sized>(
        &self,
        grid: &mut Grid,
        pos: Position,
        dir: Direction,
        source: &mut S,
    ) -> MoveOutcome {
        apply_move(
            grid,
            pos,
            dir,
            source,
            &self.config.scoring,
            self.config.detection,
        )
    }

    /// Bounds check against this engine's grid size.
    pub fn is_matchable(&self, pos: Position, dir: Direction) -> bool {
        is_matchable(pos, dir, self.config.grid_size)
    }
}
