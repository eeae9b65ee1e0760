mod entry;
mod manager;

pub use entry::{ScoreEntry, Scoreboard, ANONYMOUS};
pub use manager::{ScoreboardConfig, ScoreboardManager};
