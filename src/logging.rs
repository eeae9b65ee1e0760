//! Tracing subscriber setup for the binary.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::error::LoggingError;

/// `[logging]` config section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directives, e.g. `info` or `candy_cascade::game=debug`.
    pub level: String,
    /// Append log lines to this file instead of stderr.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Pick the filter directives: a non-blank `RUST_LOG` wins over the config.
pub fn filter_directives<'a>(config: &'a LoggingConfig, env: Option<&'a str>) -> &'a str {
    match env {
        Some(env) if !env.trim().is_empty() => env,
        _ => config.level.as_str(),
    }
}

pub fn build_filter(directives: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(directives).map_err(|e| LoggingError::Filter {
        filter: directives.to_string(),
        reason: e.to_string(),
    })
}

/// Install the global subscriber. Call once, early in `main`.
pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(filter_directives(config, env.as_deref()))?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let installed = match &config.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| LoggingError::File {
                    path: path.clone(),
                    source: e,
                })?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    installed.map_err(|_| LoggingError::AlreadyInitialized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_overrides_config() {
        let config = LoggingConfig::default();
        assert_eq!(filter_directives(&config, Some("debug")), "debug");
        assert_eq!(filter_directives(&config, Some("  ")), "info");
        assert_eq!(filter_directives(&config, None), "info");
    }

    #[test]
    fn test_build_filter() {
        assert!(build_filter("info").is_ok());
        assert!(build_filter("candy_cascade::game=trace,warn").is_ok());
        assert!(matches!(
            build_filter("candy_cascade=loudest"),
            Err(LoggingError::Filter { .. })
        ));
    }

    #[test]
    fn test_bad_log_file_path() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig {
            level: "info".into(),
            file: Some(dir.path().join("missing").join("run.log")),
        };
        assert!(matches!(init(&config), Err(LoggingError::File { .. })));
    }

    #[test]
    fn test_second_init_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig {
            level: "warn".into(),
            file: Some(dir.path().join("run.log")),
        };
        let _ = init(&config);
        assert!(matches!(init(&config), Err(LoggingError::AlreadyInitialized)));
    }
}
