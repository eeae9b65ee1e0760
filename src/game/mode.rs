use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Which recorded value is better on a scoreboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ranking {
    HighestFirst,
    LowestFirst,
}

impl Ranking {
    /// Whether `a` ranks strictly ahead of `b`.
    pub fn beats(self, a: u64, b: u64) -> bool {
        match self {
            Ranking::HighestFirst => a > b,
            Ranking::LowestFirst => a < b,
        }
    }

    /// Ordering that sorts better values first.
    pub fn compare(self, a: u64, b: u64) -> Ordering {
        match self {
            Ranking::HighestFirst => b.cmp(&a),
            Ranking::LowestFirst => a.cmp(&b),
        }
    }
}

/// The three ways a session can end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Fixed move budget.
    #[default]
    Classic,
    /// Fixed wall-clock budget.
    TimeTrial,
    /// Play until a score threshold is reached.
    Target,
}

/// Limits applied by the mode predicates, from the `[modes]` config section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeRules {
    pub max_moves: u32,
    pub time_limit_secs: u64,
    pub target_score: u64,
}

impl Default for ModeRules {
    fn default() -> Self {
        ModeRules {
            max_moves: 20,
            time_limit_secs: 60,
            target_score: 1000,
        }
    }
}

impl ModeRules {
    pub fn time_limit(&self) -> Duration {
        Duration::from_secs(self.time_limit_secs)
    }
}

/// Counters a mode predicate looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Progress {
    pub moves_used: u32,
    pub score: u64,
    pub elapsed: Duration,
}

impl GameMode {
    pub const ALL: [GameMode; 3] = [GameMode::Classic, GameMode::TimeTrial, GameMode::Target];

    /// Human-readable name for display
    pub fn name(self) -> &'static str {
        match self {
            GameMode::Classic => "Classic",
            GameMode::TimeTrial => "Time Trial",
            GameMode::Target => "Target",
        }
    }

    /// Stable identifier used on the command line and in file names
    pub fn key(self) -> &'static str {
        match self {
            GameMode::Classic => "classic",
            GameMode::TimeTrial => "time_trial",
            GameMode::Target => "target",
        }
    }

    pub fn scores_file(self) -> String {
        format!("scores_{}.txt", self.key())
    }

    pub fn ranking(self) -> Ranking {
        match self {
            GameMode::Classic | GameMode::TimeTrial => Ranking::HighestFirst,
            GameMode::Target => Ranking::LowestFirst,
        }
    }

    /// The number a finished session records on the scoreboard.
    pub fn recorded_value(self, progress: &Progress) -> u64 {
        match self {
            GameMode::Classic | GameMode::TimeTrial => progress.score,
            GameMode::Target => u64::from(progress.moves_used),
        }
    }

    /// Label for the recorded value
    pub fn value_label(self) -> &'static str {
        match self {
            GameMode::Classic | GameMode::TimeTrial => "points",
            GameMode::Target => "moves",
        }
    }

    pub fn is_finished(self, rules: &ModeRules, progress: &Progress) -> bool {
        match self {
            GameMode::Classic => progress.moves_used >= rules.max_moves,
            GameMode::TimeTrial => progress.elapsed >= rules.time_limit(),
            GameMode::Target => progress.score >= rules.target_score,
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "classic" => Ok(GameMode::Classic),
            "time_trial" | "time-trial" | "timetrial" => Ok(GameMode::TimeTrial),
            "target" => Ok(GameMode::Target),
            other => Err(format!(
                "unknown game mode '{other}' (expected 'classic', 'time_trial' or 'target')"
            )),
        }
    }
}
