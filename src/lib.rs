//! # Candy Cascade
//!
//! A match-3 puzzle engine: swap adjacent tokens, clear runs of three or more,
//! let the columns fall and refill, and keep resolving until the grid is
//! stable. Scoring is pluggable, games run in three modes, and results are kept
//! on flat-file scoreboards. Sessions can be autoplayed by simple agents.
//!
//! ## Modules
//!
//! - [`game`] — Grid, swap, run detection, gravity, cascade, scoring, modes and sessions
//! - [`ai`] — Agent trait, random and greedy agents
//! - [`sim`] — Session runner and rolling simulation metrics
//! - [`scoreboard`] — Per-mode score files
//! - [`config`] — TOML configuration loading and validation
//! - [`logging`] — Tracing subscriber setup
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod scoreboard;
pub mod sim;
