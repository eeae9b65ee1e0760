use std::path::Path;

use crate::error::ConfigError;
use crate::game::{EngineConfig, ModeRules, MovePolicy};
use crate::logging::LoggingConfig;
use crate::scoreboard::ScoreboardConfig;
use crate::sim::SimulationConfig;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub moves: MovePolicy,
    pub modes: ModeRules,
    pub scoreboard: ScoreboardConfig,
    pub simulation: SimulationConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;

        if self.modes.max_moves == 0 {
            return Err(ConfigError::Validation(
                "modes.max_moves must be > 0".into(),
            ));
        }
        if self.modes.time_limit_secs == 0 {
            return Err(ConfigError::Validation(
                "modes.time_limit_secs must be > 0".into(),
            ));
        }
        if self.modes.target_score == 0 {
            return Err(ConfigError::Validation(
                "modes.target_score must be > 0".into(),
            ));
        }

        if self.scoreboard.display_limit == 0 {
            return Err(ConfigError::Validation(
                "scoreboard.display_limit must be > 0".into(),
            ));
        }
        if self.scoreboard.dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "scoreboard.dir must not be empty".into(),
            ));
        }

        if self.simulation.sessions == 0 {
            return Err(ConfigError::Validation(
                "simulation.sessions must be > 0".into(),
            ));
        }
        if self.simulation.move_cap == 0 {
            return Err(ConfigError::Validation(
                "simulation.move_cap must be > 0".into(),
            ));
        }
        if self.simulation.seconds_per_move == 0 {
            return Err(ConfigError::Validation(
                "simulation.seconds_per_move must be > 0".into(),
            ));
        }
        if self.simulation.log_interval == 0 {
            return Err(ConfigError::Validation(
                "simulation.log_interval must be > 0".into(),
            ));
        }

        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Validation(
                "logging.level must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, ConfigError> {
        toml::to_string_pretty(&AppConfig::default())
            .map_err(|e| ConfigError::Validation(format!("default config does not serialize: {e}")))
    }
}
