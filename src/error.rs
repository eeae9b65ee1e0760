use std::path::PathBuf;

use crate::game::Direction;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Errors that can occur while reading or writing a scoreboard file.
#[derive(Debug, thiserror::Error)]
pub enum ScoreboardError {
    #[error("failed to read scoreboard {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed scoreboard entry in {path} at line {line}: {content:?}")]
    Parse {
        path: PathBuf,
        line: usize,
        content: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons a session refuses a move request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("cannot swap ({row}, {col}) {}: target is off the grid", .dir.name())]
    OutOfBounds {
        row: usize,
        col: usize,
        dir: Direction,
    },

    #[error("cell ({row}, {col}) is empty")]
    EmptyCell { row: usize, col: usize },

    #[error("session is over")]
    SessionOver,
}

/// Errors that can occur while installing the tracing subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("invalid log filter '{filter}': {reason}")]
    Filter { filter: String, reason: String },

    #[error("failed to open log file {path}: {source}")]
    File {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("a global tracing subscriber is already installed")]
    AlreadyInitialized,
}
