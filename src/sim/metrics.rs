use std::collections::VecDeque;

use serde::Serialize;

use crate::game::GameMode;

/// Result of a single autoplayed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionResult {
    pub mode: GameMode,
    pub seed: u64,
    pub score: u64,
    pub moves_used: u32,
    pub matched_moves: u32,
    pub wasted_moves: u32,
    pub best_cascade: usize,
    pub longest_run: usize,
    /// Virtual seconds spent, `moves_played * seconds_per_move`.
    pub elapsed_secs: u64,
    /// Whether the mode's end condition was met (as opposed to the move cap
    /// or running out of swaps).
    pub completed: bool,
    /// The value the mode records on its scoreboard.
    pub recorded_value: u64,
}

/// Simulation metrics tracker with rolling window computations.
pub struct SimMetrics {
    results: VecDeque<SessionResult>,
    capacity: usize,
    total_sessions: usize, // lifetime count, never capped
    total_score: u64,
    best_score: u64,
}

impl SimMetrics {
    pub fn with_capacity(capacity: usize) -> Self {
        SimMetrics {
            results: VecDeque::with_capacity(capacity),
            capacity,
            total_sessions: 0,
            total_score: 0,
            best_score: 0,
        }
    }

    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn record_session(&mut self, result: SessionResult) {
        self.total_sessions += 1;
        self.total_score = self.total_score.saturating_add(result.score);
        self.best_score = self.best_score.max(result.score);
        self.results.push_back(result);
        if self.results.len() > self.capacity {
            self.results.pop_front();
        }
    }

    fn window(&self, last_n: usize) -> impl Iterator<Item = &SessionResult> {
        let n = self.results.len().min(last_n);
        self.results.iter().rev().take(n)
    }

    fn window_len(&self, last_n: usize) -> usize {
        self.results.len().min(last_n)
    }

    /// Average score over the last N sessions.
    pub fn average_score(&self, last_n: usize) -> f32 {
        let n = self.window_len(last_n);
        if n == 0 {
            return 0.0;
        }
        let total: u64 = self.window(last_n).map(|r| r.score).sum();
        total as f32 / n as f32
    }

    /// Share of moves that produced a match over the last N sessions.
    pub fn match_rate(&self, last_n: usize) -> f32 {
        let (matched, played) = self.window(last_n).fold((0u64, 0u64), |(m, p), r| {
            (
                m + u64::from(r.matched_moves),
                p + u64::from(r.matched_moves + r.wasted_moves),
            )
        });
        if played == 0 {
            return 0.0;
        }
        matched as f32 / played as f32
    }

    /// Average moves used over the last N sessions.
    pub fn average_moves(&self, last_n: usize) -> f32 {
        let n = self.window_len(last_n);
        if n == 0 {
            return 0.0;
        }
        let total: u64 = self.window(last_n).map(|r| u64::from(r.moves_used)).sum();
        total as f32 / n as f32
    }

    /// Share of the last N sessions that reached the mode's end condition.
    pub fn completion_rate(&self, last_n: usize) -> f32 {
        let n = self.window_len(last_n);
        if n == 0 {
            return 0.0;
        }
        let done = self.window(last_n).filter(|r| r.completed).count();
        done as f32 / n as f32
    }

    pub fn total_sessions(&self) -> usize {
        self.total_sessions
    }

    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    /// Lifetime aggregates plus rates over the retained window.
    pub fn summary(&self, mode: GameMode, agent: &str) -> SimulationSummary {
        let window = self.capacity;
        SimulationSummary {
            mode,
            agent: agent.to_string(),
            sessions: self.total_sessions,
            average_score: if self.total_sessions == 0 {
                0.0
            } else {
                self.total_score as f64 / self.total_sessions as f64
            },
            best_score: self.best_score,
            window,
            window_match_rate: self.match_rate(window),
            window_average_moves: self.average_moves(window),
            window_completion_rate: self.completion_rate(window),
        }
    }
}

impl Default for SimMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// End-of-run report, printable as JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSummary {
    pub mode: GameMode,
    pub agent: String,
    pub sessions: usize,
    pub average_score: f64,
    pub best_score: u64,
    pub window: usize,
    pub window_match_rate: f32,
    pub window_average_moves: f32,
    pub window_completion_rate: f32,
}
