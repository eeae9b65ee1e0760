//! Chain resolution: detect, remove, refill, repeat until the grid is stable.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::board::{Grid, TokenSource};
use super::detect::{find_all_runs, find_run, Run};
use super::gravity::{remove_run, remove_runs};
use super::scoring::ScoreRule;

/// Upper bound on detection rounds within one cascade. Only reachable with a
/// degenerate token source (e.g. one that always yields the same kind).
pub const MAX_CASCADE_ROUNDS: usize = 10_000;

/// How runs are picked up on each detection round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMode {
    /// Resolve the first run in scan order, then rescan.
    #[default]
    SingleRun,
    /// Resolve every run present in the snapshot at once, then rescan.
    AllRuns,
}

impl DetectionMode {
    pub fn name(self) -> &'static str {
        match self {
            DetectionMode::SingleRun => "single_run",
            DetectionMode::AllRuns => "all_runs",
        }
    }
}

impl fmt::Display for DetectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DetectionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single_run" | "single" => Ok(DetectionMode::SingleRun),
            "all_runs" | "all" => Ok(DetectionMode::AllRuns),
            other => Err(format!(
                "unknown detection mode '{other}' (expected 'single_run' or 'all_runs')"
            )),
        }
    }
}

/// One resolved run within a cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CascadeStep {
    pub run: Run,
    pub combo: u32,
    pub points: u64,
}

/// Everything that happened while draining the grid after a move.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cascade {
    pub steps: Vec<CascadeStep>,
    /// Set when `MAX_CASCADE_ROUNDS` stopped the loop early.
    pub truncated: bool,
}

impl Cascade {
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn total_points(&self) -> u64 {
        self.steps
            .iter()
            .fold(0u64, |acc, step| acc.saturating_add(step.points))
    }

    pub fn longest_run(&self) -> usize {
        self.steps.iter().map(|s| s.run.len).max().unwrap_or(0)
    }
}

/// Resolve runs until none remain, scoring each one with `rule`.
///
/// The combo level starts at 1 for the first run and advances by one for
/// every run resolved afterwards, including runs resolved in the same round.
pub fn resolve_cascade<S, R>(
    grid: &mut Grid,
    source: &mut S,
    rule: &R,
    mode: DetectionMode,
) -> Cascade
where
    S: TokenSource + ?Sized,
    R: ScoreRule + ?Sized,
{
    let mut cascade = Cascade::default();
    let mut combo = 0u32;

    for round in 0.. {
        if round == MAX_CASCADE_ROUNDS {
            tracing::warn!(
                rounds = MAX_CASCADE_ROUNDS,
                "cascade did not settle; stopping resolution"
            );
            cascade.truncated = true;
            break;
        }

        let runs = match mode {
            DetectionMode::SingleRun => find_run(grid).into_iter().collect::<Vec<_>>(),
            DetectionMode::AllRuns => find_all_runs(grid),
        };
        if runs.is_empty() {
            break;
        }

        match mode {
            DetectionMode::SingleRun => {
                remove_run(grid, &runs[0], source);
            }
            DetectionMode::AllRuns => {
                remove_runs(grid, &runs, source);
            }
        }

        for run in runs {
            combo += 1;
            let points = rule.points(run.len, combo);
            tracing::debug!(
                combo,
                len = run.len,
                row = run.start.row,
                col = run.start.col,
                orientation = ?run.orientation,
                points,
                "run resolved"
            );
            cascade.steps.push(CascadeStep { run, combo, points });
        }
    }

    cascade
}
