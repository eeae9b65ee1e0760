use std::path::PathBuf;

use crate::error::ScoreboardError;
use crate::game::GameMode;
use crate::scoreboard::entry::{ScoreEntry, Scoreboard};

/// Configuration for where scoreboards live and how many entries to show.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScoreboardConfig {
    pub dir: PathBuf,
    pub display_limit: usize,
}

impl Default for ScoreboardConfig {
    fn default() -> Self {
        ScoreboardConfig {
            dir: PathBuf::from("scores"),
            display_limit: 10,
        }
    }
}

/// Loads, updates and saves the per-mode scoreboard files.
pub struct ScoreboardManager {
    config: ScoreboardConfig,
}

impl ScoreboardManager {
    pub fn new(config: ScoreboardConfig) -> Self {
        ScoreboardManager { config }
    }

    pub fn config(&self) -> &ScoreboardConfig {
        &self.config
    }

    pub fn path_for(&self, mode: GameMode) -> PathBuf {
        self.config.dir.join(mode.scores_file())
    }

    pub fn open(&self, mode: GameMode) -> Result<Scoreboard, ScoreboardError> {
        Scoreboard::load(&self.path_for(mode), mode.ranking())
    }

    /// Insert `entry` into the mode's board and persist it. Returns the
    /// entry's 1-based rank.
    pub fn record(&self, mode: GameMode, entry: ScoreEntry) -> Result<usize, ScoreboardError> {
        let path = self.path_for(mode);
        let mut board = Scoreboard::load(&path, mode.ranking())?;
        let (name, value) = (entry.name.clone(), entry.value);
        let rank = board.insert(entry);
        board.save(&path)?;
        tracing::info!(
            mode = mode.key(),
            name = %name,
            value,
            rank,
            path = %path.display(),
            "score recorded"
        );
        Ok(rank)
    }

    /// The best `display_limit` entries of a mode.
    pub fn top(&self, mode: GameMode) -> Result<Vec<ScoreEntry>, ScoreboardError> {
        let board = self.open(mode)?;
        Ok(board.top(self.config.display_limit).to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(dir: &std::path::Path) -> ScoreboardManager {
        ScoreboardManager::new(ScoreboardConfig {
            dir: dir.to_path_buf(),
            display_limit: 3,
        })
    }

    #[test]
    fn test_path_per_mode() {
        let m = ScoreboardManager::new(ScoreboardConfig::default());
        assert_eq!(
            m.path_for(GameMode::TimeTrial),
            PathBuf::from("scores").join("scores_time_trial.txt")
        );
    }

    #[test]
    fn test_record_persists_and_ranks() {
        let dir = tempfile::tempdir().unwrap();
        let m = manager(dir.path());

        assert_eq!(m.record(GameMode::Classic, ScoreEntry::new("a", 100)).unwrap(), 1);
        assert_eq!(m.record(GameMode::Classic, ScoreEntry::new("b", 300)).unwrap(), 1);
        assert_eq!(m.record(GameMode::Classic, ScoreEntry::new("c", 200)).unwrap(), 2);

        let board = m.open(GameMode::Classic).unwrap();
        let values: Vec<u64> = board.entries().iter().map(|e| e.value).collect();
        assert_eq!(values, vec![300, 200, 100]);
        // Other modes are untouched.
        assert!(m.open(GameMode::Target).unwrap().is_empty());
    }

    #[test]
    fn test_target_mode_ranks_fewest_moves_first() {
        let dir = tempfile::tempdir().unwrap();
        let m = manager(dir.path());
        m.record(GameMode::Target, ScoreEntry::new("slow", 40)).unwrap();
        assert_eq!(m.record(GameMode::Target, ScoreEntry::new("quick", 9)).unwrap(), 1);
        assert_eq!(m.top(GameMode::Target).unwrap()[0].name, "quick");
    }

    #[test]
    fn test_top_respects_display_limit() {
        let dir = tempfile::tempdir().unwrap();
        let m = manager(dir.path());
        for v in [5, 1, 9, 7, 3] {
            m.record(GameMode::TimeTrial, ScoreEntry::new("p", v)).unwrap();
        }
        let top: Vec<u64> = m
            .top(GameMode::TimeTrial)
            .unwrap()
            .iter()
            .map(|e| e.value)
            .collect();
        assert_eq!(top, vec![9, 7, 5]);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let m = manager(dir.path());
        std::fs::write(m.path_for(GameMode::Classic), "not a score\n").unwrap();
        assert!(matches!(
            m.open(GameMode::Classic),
            Err(ScoreboardError::Parse { line: 1, .. })
        ));
    }
}
