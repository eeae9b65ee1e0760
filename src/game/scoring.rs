use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::detect::MIN_RUN;

/// Points awarded for one resolved run, given its length and its 1-based
/// position within the cascade.
pub trait ScoreRule {
    fn points(&self, run_len: usize, combo: u32) -> u64;
}

impl<F> ScoreRule for F
where
    F: Fn(usize, u32) -> u64,
{
    fn points(&self, run_len: usize, combo: u32) -> u64 {
        self(run_len, combo)
    }
}

/// The two scoring formulas used by the game modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringPolicy {
    /// `run_len * 2 * combo`
    #[default]
    LinearCombo,
    /// `fibonacci(run_len + 1) * 100`, combo ignored
    Fibonacci,
}

impl ScoreRule for ScoringPolicy {
    fn points(&self, run_len: usize, combo: u32) -> u64 {
        match self {
            ScoringPolicy::LinearCombo => linear_combo_points(run_len, combo),
            ScoringPolicy::Fibonacci => fibonacci_points(run_len),
        }
    }
}

impl ScoringPolicy {
    pub fn name(self) -> &'static str {
        match self {
            ScoringPolicy::LinearCombo => "linear_combo",
            ScoringPolicy::Fibonacci => "fibonacci",
        }
    }
}

impl fmt::Display for ScoringPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScoringPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear_combo" | "linear" | "combo" => Ok(ScoringPolicy::LinearCombo),
            "fibonacci" | "fib" => Ok(ScoringPolicy::Fibonacci),
            other => Err(format!(
                "unknown scoring policy '{other}' (expected 'linear_combo' or 'fibonacci')"
            )),
        }
    }
}

pub fn linear_combo_points(run_len: usize, combo: u32) -> u64 {
    run_len as u64 * 2 * u64::from(combo)
}

/// Fibonacci-based points; runs shorter than `MIN_RUN` are worth nothing.
pub fn fibonacci_points(run_len: usize) -> u64 {
    if run_len < MIN_RUN {
        return 0;
    }
    fibonacci(run_len as u64 + 1).saturating_mul(100)
}

/// 1-based Fibonacci with `fibonacci(1) = 0` and `fibonacci(2) = fibonacci(3) = 1`.
/// Saturates instead of overflowing.
pub fn fibonacci(n: u64) -> u64 {
    let (mut a, mut b) = (0u64, 1u64);
    for _ in 1..n {
        (a, b) = (b, a.saturating_add(b));
    }
    a
}
