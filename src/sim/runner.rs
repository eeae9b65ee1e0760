use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::ai::{Agent, GreedyAgent, RandomAgent};
use crate::game::{Engine, GameMode, GameSession, ModeRules, MovePolicy};
use crate::sim::metrics::{SessionResult, SimMetrics};

/// Which built-in agent drives the simulated sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    #[default]
    Random,
    Greedy,
}

impl AgentKind {
    pub fn build(self, seed: u64) -> Box<dyn Agent> {
        match self {
            AgentKind::Random => Box::new(RandomAgent::with_seed(seed)),
            AgentKind::Greedy => Box::new(GreedyAgent::with_seed(seed)),
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            AgentKind::Random => "random",
            AgentKind::Greedy => "greedy",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for AgentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(AgentKind::Random),
            "greedy" => Ok(AgentKind::Greedy),
            other => Err(format!(
                "unknown agent '{other}' (expected 'random' or 'greedy')"
            )),
        }
    }
}

/// Simulation configuration, loaded from the `[simulation]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub sessions: usize,
    /// Hard limit on swaps per session, whatever the mode.
    pub move_cap: u32,
    /// Virtual time charged per swap, used by time-limited modes.
    pub seconds_per_move: u64,
    pub log_interval: usize,
    pub agent: AgentKind,
    /// Base seed; session `i` is dealt with `seed + i`. Random when unset.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            sessions: 100,
            move_cap: 1000,
            seconds_per_move: 2,
            log_interval: 10,
            agent: AgentKind::default(),
            seed: None,
        }
    }
}

/// Plays whole sessions with an agent and aggregates the results.
pub struct SessionRunner {
    engine: Engine,
    rules: ModeRules,
    policy: MovePolicy,
    config: SimulationConfig,
}

impl SessionRunner {
    pub fn new(
        engine: Engine,
        rules: ModeRules,
        policy: MovePolicy,
        config: SimulationConfig,
    ) -> Self {
        SessionRunner {
            engine,
            rules,
            policy,
            config,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Play one session until the mode ends it, the move cap is hit or the
    /// agent has no swap left.
    pub fn run_session(&self, mode: GameMode, agent: &mut dyn Agent, seed: u64) -> SessionResult {
        let mut session = GameSession::new(self.engine, mode, self.rules, self.policy, seed);
        let per_move = Duration::from_secs(self.config.seconds_per_move);
        let mut elapsed = Duration::ZERO;
        let mut played = 0u32;

        let completed = loop {
            if session.is_finished(elapsed) {
                break true;
            }
            if played >= self.config.move_cap {
                tracing::debug!(seed, played, "move cap reached");
                break false;
            }
            let Some((pos, dir)) = agent.select_move(session.grid()) else {
                tracing::debug!(seed, played, "agent found no swap");
                break false;
            };
            if let Err(e) = session.play(pos, dir, elapsed) {
                tracing::warn!(seed, error = %e, agent = agent.name(), "move rejected");
                break false;
            }
            played += 1;
            elapsed += per_move;
        };

        SessionResult {
            mode,
            seed,
            score: session.score(),
            moves_used: session.moves_used(),
            matched_moves: session.matched_moves(),
            wasted_moves: session.wasted_moves(),
            best_cascade: session.best_cascade(),
            longest_run: session.longest_run(),
            elapsed_secs: elapsed.as_secs(),
            completed,
            recorded_value: mode.recorded_value(&session.progress(elapsed)),
        }
    }

    /// Run `config.sessions` sessions, handing each result to `on_session`.
    pub fn run<F>(&self, mode: GameMode, mut on_session: F) -> SimMetrics
    where
        F: FnMut(&SessionResult),
    {
        let base_seed = self
            .config
            .seed
            .unwrap_or_else(|| StdRng::from_os_rng().random());
        let mut agent = self.config.agent.build(base_seed);
        let mut metrics = SimMetrics::new();
        let window = self.config.log_interval;

        tracing::info!(
            mode = mode.key(),
            agent = agent.name(),
            sessions = self.config.sessions,
            base_seed,
            "starting simulation"
        );

        for i in 0..self.config.sessions {
            let seed = base_seed.wrapping_add(i as u64);
            let result = self.run_session(mode, agent.as_mut(), seed);
            on_session(&result);
            metrics.record_session(result);

            let done = i + 1;
            if window > 0 && done % window == 0 {
                tracing::info!(
                    "Session {}/{} | avg_score({}): {:.1} | match_rate: {:.1}% | avg_moves: {:.1} | completed: {:.1}%",
                    done,
                    self.config.sessions,
                    window,
                    metrics.average_score(window),
                    metrics.match_rate(window) * 100.0,
                    metrics.average_moves(window),
                    metrics.completion_rate(window) * 100.0,
                );
            }
        }

        tracing::info!(
            sessions = metrics.total_sessions(),
            best_score = metrics.best_score(),
            "simulation complete"
        );
        metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner(config: SimulationConfig) -> SessionRunner {
        SessionRunner::new(
            Engine::default(),
            ModeRules::default(),
            MovePolicy::default(),
            config,
        )
    }

    #[test]
    fn test_classic_session_uses_move_budget() {
        let r = runner(SimulationConfig::default());
        let mut agent = RandomAgent::with_seed(1);
        let result = r.run_session(GameMode::Classic, &mut agent, 42);
        assert!(result.completed);
        assert_eq!(result.moves_used, 20);
        assert_eq!(result.recorded_value, result.score);
    }

    #[test]
    fn test_time_trial_uses_virtual_clock() {
        let r = runner(SimulationConfig {
            seconds_per_move: 2,
            ..SimulationConfig::default()
        });
        let mut agent = RandomAgent::with_seed(2);
        let result = r.run_session(GameMode::TimeTrial, &mut agent, 7);
        assert!(result.completed);
        assert_eq!(result.elapsed_secs, 60);
        assert_eq!(result.matched_moves + result.wasted_moves, 30);
    }

    #[test]
    fn test_target_session_records_moves() {
        let r = SessionRunner::new(
            Engine::default(),
            ModeRules {
                target_score: 1,
                ..ModeRules::default()
            },
            MovePolicy::default(),
            SimulationConfig::default(),
        );
        let mut agent = GreedyAgent::with_seed(3);
        let result = r.run_session(GameMode::Target, &mut agent, 9);
        assert!(result.completed);
        assert!(result.score >= 1);
        assert_eq!(result.recorded_value, u64::from(result.moves_used));
    }

    #[test]
    fn test_move_cap_stops_session() {
        let r = SessionRunner::new(
            Engine::default(),
            ModeRules::default(),
            MovePolicy {
                revert_unmatched: true,
                charge_unmatched: false,
            },
            SimulationConfig {
                move_cap: 5,
                ..SimulationConfig::default()
            },
        );
        let mut agent = RandomAgent::with_seed(4);
        let result = r.run_session(GameMode::Classic, &mut agent, 1);
        assert!(!result.completed);
        assert_eq!(result.matched_moves + result.wasted_moves, 5);
    }

    #[test]
    fn test_run_is_reproducible_with_seed() {
        let config = SimulationConfig {
            sessions: 4,
            seed: Some(99),
            agent: AgentKind::Greedy,
            ..SimulationConfig::default()
        };
        let collect = || {
            let mut results = Vec::new();
            let metrics = runner(config.clone()).run(GameMode::Classic, |r| results.push(r.clone()));
            (results, metrics.total_sessions())
        };
        let (a, total) = collect();
        let (b, _) = collect();
        assert_eq!(total, 4);
        assert_eq!(a, b);
        let seeds: Vec<u64> = a.iter().map(|r| r.seed).collect();
        assert_eq!(seeds, vec![99, 100, 101, 102]);
    }

    #[test]
    fn test_agent_kind_parse() {
        assert_eq!("greedy".parse(), Ok(AgentKind::Greedy));
        assert!("smart".parse::<AgentKind>().is_err());
        assert_eq!(AgentKind::Random.build(0).name(), "Random");
    }
}
