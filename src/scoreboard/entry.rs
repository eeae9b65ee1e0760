use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::ScoreboardError;
use crate::game::Ranking;

/// Name recorded when a player gives none.
pub const ANONYMOUS: &str = "anonymous";

/// One scoreboard record: a player name and the value their session
/// recorded (points, or moves used in target mode).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreEntry {
    pub name: String,
    pub value: u64,
}

impl ScoreEntry {
    /// Build an entry; whitespace in `name` becomes `_` so each record stays
    /// on one line with a single-token name.
    pub fn new(name: &str, value: u64) -> Self {
        let name = name.split_whitespace().collect::<Vec<_>>().join("_");
        let name = if name.is_empty() {
            ANONYMOUS.to_string()
        } else {
            name
        };
        ScoreEntry { name, value }
    }

    /// Parse a `<value> <name>` record.
    pub fn parse_line(line: &str) -> Option<Self> {
        let (value, name) = line.trim().split_once(char::is_whitespace)?;
        let value = value.parse().ok()?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some(ScoreEntry::new(name, value))
    }

    pub fn to_line(&self) -> String {
        format!("{} {}", self.value, self.name)
    }
}

/// Entries of one mode, kept best-first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scoreboard {
    ranking: Ranking,
    entries: Vec<ScoreEntry>,
}

impl Scoreboard {
    pub fn new(ranking: Ranking) -> Self {
        Scoreboard {
            ranking,
            entries: Vec::new(),
        }
    }

    /// Parse file contents. Blank lines are skipped; entries are stably
    /// sorted so hand-edited files still come out best-first.
    pub fn parse(path: &Path, content: &str, ranking: Ranking) -> Result<Self, ScoreboardError> {
        let mut entries = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let entry = ScoreEntry::parse_line(line).ok_or_else(|| ScoreboardError::Parse {
                path: path.to_path_buf(),
                line: idx + 1,
                content: line.to_string(),
            })?;
            entries.push(entry);
        }
        entries.sort_by(|a, b| ranking.compare(a.value, b.value));
        Ok(Scoreboard { ranking, entries })
    }

    /// Load a scoreboard file. A missing file is an empty board.
    pub fn load(path: &Path, ranking: Ranking) -> Result<Self, ScoreboardError> {
        if !path.exists() {
            return Ok(Self::new(ranking));
        }
        let content = fs::read_to_string(path).map_err(|e| ScoreboardError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(path, &content, ranking)
    }

    /// Write every entry, one per line, via a temp file and rename.
    pub fn save(&self, path: &Path) -> Result<(), ScoreboardError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut content = String::new();
        for entry in &self.entries {
            content.push_str(&entry.to_line());
            content.push('\n');
        }

        let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = path.with_file_name(tmp_name);
        fs::write(&tmp_path, content)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    /// Insert after every entry that is at least as good. Returns the
    /// 1-based rank of the new entry.
    pub fn insert(&mut self, entry: ScoreEntry) -> usize {
        let idx = self
            .entries
            .iter()
            .position(|e| self.ranking.beats(entry.value, e.value))
            .unwrap_or(self.entries.len());
        self.entries.insert(idx, entry);
        idx + 1
    }

    pub fn top(&self, n: usize) -> &[ScoreEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn ranking(&self) -> Ranking {
        self.ranking
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        assert_eq!(
            ScoreEntry::parse_line("120 alice"),
            Some(ScoreEntry::new("alice", 120))
        );
        assert_eq!(
            ScoreEntry::parse_line("  7   bob  "),
            Some(ScoreEntry::new("bob", 7))
        );
        assert_eq!(ScoreEntry::parse_line("alice 120"), None);
        assert_eq!(ScoreEntry::parse_line("120"), None);
        assert_eq!(ScoreEntry::parse_line("-3 carol"), None);
    }

    #[test]
    fn test_name_is_single_token() {
        let entry = ScoreEntry::new("Mary  Ann", 10);
        assert_eq!(entry.name, "Mary_Ann");
        assert_eq!(entry.to_line(), "10 Mary_Ann");
        assert_eq!(ScoreEntry::new("   ", 1).name, ANONYMOUS);
    }

    #[test]
    fn test_insert_highest_first_after_ties() {
        let mut board = Scoreboard::new(Ranking::HighestFirst);
        assert_eq!(board.insert(ScoreEntry::new("a", 50)), 1);
        assert_eq!(board.insert(ScoreEntry::new("b", 80)), 1);
        assert_eq!(board.insert(ScoreEntry::new("c", 50)), 3);
        assert_eq!(board.insert(ScoreEntry::new("d", 10)), 4);
        let names: Vec<&str> = board.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c", "d"]);
    }

    #[test]
    fn test_insert_lowest_first() {
        let mut board = Scoreboard::new(Ranking::LowestFirst);
        board.insert(ScoreEntry::new("slow", 30));
        assert_eq!(board.insert(ScoreEntry::new("fast", 12)), 1);
        assert_eq!(board.insert(ScoreEntry::new("mid", 20)), 2);
        assert_eq!(board.top(1)[0].name, "fast");
    }

    #[test]
    fn test_top_clamps() {
        let mut board = Scoreboard::new(Ranking::HighestFirst);
        for v in 0..15 {
            board.insert(ScoreEntry::new("p", v));
        }
        assert_eq!(board.top(10).len(), 10);
        assert_eq!(board.top(10)[0].value, 14);
        assert_eq!(Scoreboard::new(Ranking::HighestFirst).top(10).len(), 0);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let board = Scoreboard::load(&dir.path().join("nope.txt"), Ranking::HighestFirst).unwrap();
        assert!(board.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("scores_classic.txt");
        let mut board = Scoreboard::new(Ranking::HighestFirst);
        board.insert(ScoreEntry::new("alice", 40));
        board.insert(ScoreEntry::new("bob", 90));
        board.save(&path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "90 bob\n40 alice\n");
        assert!(!dir.path().join("nested").join("scores_classic.txt.tmp").exists());

        let loaded = Scoreboard::load(&path, Ranking::HighestFirst).unwrap();
        assert_eq!(loaded, board);
    }

    #[test]
    fn test_parse_sorts_and_skips_blank_lines() {
        let board = Scoreboard::parse(
            Path::new("scores_target.txt"),
            "30 slow\n\n12 fast\n",
            Ranking::LowestFirst,
        )
        .unwrap();
        let values: Vec<u64> = board.entries().iter().map(|e| e.value).collect();
        assert_eq!(values, vec![12, 30]);
    }

    #[test]
    fn test_parse_error_reports_line() {
        let err = Scoreboard::parse(
            Path::new("scores_classic.txt"),
            "10 a\nbroken\n",
            Ranking::HighestFirst,
        )
        .unwrap_err();
        match err {
            ScoreboardError::Parse { line, content, .. } => {
                assert_eq!(line, 2);
                assert_eq!(content, "broken");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
