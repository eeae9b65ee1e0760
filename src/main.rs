use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use candy_cascade::config::AppConfig;
use candy_cascade::game::{DetectionMode, Engine, GameMode, ScoringPolicy};
use candy_cascade::logging;
use candy_cascade::scoreboard::{ScoreEntry, ScoreboardManager};
use candy_cascade::sim::{AgentKind, SessionRunner};

/// Match-3 cascade engine: autoplay sessions and inspect scoreboards.
#[derive(Parser)]
#[command(name = "candy-cascade", about = "Match-3 cascade engine")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, global = true, default_value = "candy_cascade.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Autoplay sessions with an agent and record the results
    Simulate {
        /// Game mode: classic, time_trial or target
        #[arg(long, default_value = "classic")]
        mode: GameMode,

        /// Override number of sessions
        #[arg(long)]
        sessions: Option<usize>,

        /// Override the agent: random or greedy
        #[arg(long)]
        agent: Option<AgentKind>,

        /// Override the base seed
        #[arg(long)]
        seed: Option<u64>,

        /// Override the scoring policy: linear_combo or fibonacci
        #[arg(long)]
        scoring: Option<ScoringPolicy>,

        /// Override run detection: single_run or all_runs
        #[arg(long)]
        detection: Option<DetectionMode>,

        /// Name recorded on the scoreboard
        #[arg(long)]
        name: Option<String>,

        /// Do not write results to the scoreboard
        #[arg(long)]
        no_record: bool,

        /// Print the final summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the best entries of a mode's scoreboard
    Scores {
        /// Game mode: classic, time_trial or target
        #[arg(long, default_value = "classic")]
        mode: GameMode,

        /// Override how many entries are shown
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Print the default configuration as TOML
    DefaultConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Command::DefaultConfig = cli.command {
        print!("{}", AppConfig::default_toml()?);
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    logging::init(&config.logging).context("initialising logging")?;

    match cli.command {
        Command::Simulate {
            mode,
            sessions,
            agent,
            seed,
            scoring,
            detection,
            name,
            no_record,
            json,
        } => {
            // Apply CLI overrides
            if let Some(sessions) = sessions {
                config.simulation.sessions = sessions;
            }
            if let Some(agent) = agent {
                config.simulation.agent = agent;
            }
            if seed.is_some() {
                config.simulation.seed = seed;
            }
            if let Some(scoring) = scoring {
                config.engine.scoring = scoring;
            }
            if let Some(detection) = detection {
                config.engine.detection = detection;
            }
            config.validate().context("validating overrides")?;

            let name = name.unwrap_or_else(|| config.simulation.agent.key().to_string());
            simulate(&config, mode, &name, !no_record, json)
        }
        Command::Scores { mode, limit } => {
            if limit == Some(0) {
                bail!("--limit must be > 0");
            }
            if let Some(limit) = limit {
                config.scoreboard.display_limit = limit;
            }
            show_scores(&config, mode)
        }
        Command::DefaultConfig => Ok(()),
    }
}

fn simulate(config: &AppConfig, mode: GameMode, name: &str, record: bool, json: bool) -> Result<()> {
    let engine = Engine::new(config.engine).context("building engine")?;
    let runner = SessionRunner::new(
        engine,
        config.modes,
        config.moves,
        config.simulation.clone(),
    );
    let scoreboard = ScoreboardManager::new(config.scoreboard.clone());

    let mut record_error = None;
    let metrics = runner.run(mode, |result| {
        if !record || record_error.is_some() {
            return;
        }
        if !result.completed {
            tracing::debug!(seed = result.seed, "session did not finish, not recorded");
            return;
        }
        if let Err(e) = scoreboard.record(mode, ScoreEntry::new(name, result.recorded_value)) {
            record_error = Some(e);
        }
    });
    if let Some(e) = record_error {
        return Err(e).with_context(|| {
            format!("recording to {}", scoreboard.path_for(mode).display())
        });
    }

    let summary = metrics.summary(mode, config.simulation.agent.key());
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("serializing summary")?
        );
    } else {
        println!("-------------------------------------------");
        println!(
            "{} | {} sessions | agent: {}",
            mode, summary.sessions, summary.agent
        );
        println!(
            "avg score: {:.1} | best: {} | match rate: {:.1}% | avg moves: {:.1} | completed: {:.1}%",
            summary.average_score,
            summary.best_score,
            summary.window_match_rate * 100.0,
            summary.window_average_moves,
            summary.window_completion_rate * 100.0,
        );
    }
    Ok(())
}

fn show_scores(config: &AppConfig, mode: GameMode) -> Result<()> {
    let scoreboard = ScoreboardManager::new(config.scoreboard.clone());
    let entries = scoreboard
        .top(mode)
        .with_context(|| format!("reading {}", scoreboard.path_for(mode).display()))?;

    println!("--- Best scores ({}) ---", mode);
    if entries.is_empty() {
        println!("No scores recorded yet.");
    } else {
        for (i, entry) in entries.iter().enumerate() {
            println!("{}. {} : {} {}", i + 1, entry.name, entry.value, mode.value_label());
        }
    }
    println!("--------------------------------------");
    Ok(())
}
