//! High score table
//!
//! Top 10 scores, stored as plain text: one `score,name` pair per line,
//! highest first. The core only hands over a final score at game over;
//! everything else here belongs to the front end.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// High score errors
#[derive(thiserror::Error, Debug)]
pub enum HighScoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    pub name: String,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
    /// Changed since load
    #[serde(skip)]
    dirty: bool,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self::default()
    }

    /// A score makes the table while it has room, or by beating the last entry
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Add a score if it qualifies.
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify.
    pub fn insert(&mut self, score: u64, name: &str) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        // The name must not break the line format
        let name: String = name
            .chars()
            .filter(|c| *c != ',' && *c != '\n' && *c != '\r')
            .collect();
        let entry = HighScoreEntry {
            score,
            name: name.trim().to_string(),
        };

        // Ties go below existing entries
        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_HIGH_SCORES);
        self.dirty = true;

        Some(pos + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Whether there is anything new to save
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Parse the text format. Blank lines are skipped; the result is sorted
    /// highest first and capped at [`MAX_HIGH_SCORES`].
    pub fn parse(text: &str) -> Result<Self, HighScoreError> {
        let mut entries = Vec::new();
        for (i, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let parse_err = |reason: String| HighScoreError::Parse {
                line: i + 1,
                reason,
            };
            let (score, name) = line
                .split_once(',')
                .ok_or_else(|| parse_err("expected `score,name`".to_string()))?;
            let score = score
                .trim()
                .parse::<u64>()
                .map_err(|e| parse_err(format!("bad score {score:?}: {e}")))?;
            entries.push(HighScoreEntry {
                score,
                name: name.trim().to_string(),
            });
        }

        // Stable, so equal scores keep file order
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_HIGH_SCORES);
        Ok(Self {
            entries,
            dirty: false,
        })
    }

    /// Serialize to the text format
    pub fn to_text(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{},{}\n", e.score, e.name))
            .collect()
    }

    /// Load from a file. A missing file is an empty table.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, HighScoreError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No high scores at {}, starting fresh", path.display());
            return Ok(Self::new());
        }
        let scores = Self::parse(&std::fs::read_to_string(path)?)?;
        log::info!("Loaded {} high scores", scores.entries.len());
        Ok(scores)
    }

    /// Write the table if it changed since it was loaded
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<(), HighScoreError> {
        if !self.dirty {
            return Ok(());
        }
        std::fs::write(path, self.to_text())?;
        self.dirty = false;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn full_table() -> HighScores {
        let text: String = (1..=10).map(|i| format!("{},p{}\n", i * 100, i)).collect();
        HighScores::parse(&text).expect("valid table")
    }

    #[test]
    fn test_parse_sorts_descending() {
        let scores = HighScores::parse("10,bob\n\n300, alice \n20,carol\n").expect("parses");
        let order: Vec<_> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(order, vec![300, 20, 10]);
        assert_eq!(scores.entries[0].name, "alice");
        assert!(!scores.is_dirty());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = HighScores::parse("100,ok\nnonsense\n").unwrap_err();
        assert!(matches!(err, HighScoreError::Parse { line: 2, .. }));
        let err = HighScores::parse("lots,ok\n").unwrap_err();
        assert!(matches!(err, HighScoreError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_qualification() {
        let empty = HighScores::new();
        assert!(empty.qualifies(0));

        let full = full_table();
        assert_eq!(full.entries.len(), MAX_HIGH_SCORES);
        assert!(!full.qualifies(100));
        assert!(full.qualifies(101));
    }

    #[test]
    fn test_insert_returns_rank_and_caps_table() {
        let mut scores = full_table();
        assert_eq!(scores.insert(550, "new"), Some(6));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        // The old lowest score fell off
        assert_eq!(scores.entries.last().map(|e| e.score), Some(200));
        assert_eq!(scores.insert(5, "nope"), None);
        assert_eq!(scores.insert(5000, "top"), Some(1));
        assert_eq!(scores.top_score(), Some(5000));
    }

    #[test]
    fn test_names_cannot_break_the_format() {
        let mut scores = HighScores::new();
        scores.insert(10, "a,b\nc");
        let reparsed = HighScores::parse(&scores.to_text()).expect("round trip");
        assert_eq!(reparsed.entries[0].name, "abc");
    }

    #[test]
    fn test_save_only_when_changed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("highscores.txt");

        let mut scores = HighScores::load(&path).expect("missing file is empty");
        assert!(scores.is_empty());
        scores.save(&path).expect("no-op save");
        assert!(!path.exists());

        scores.insert(1234, "ace");
        scores.save(&path).expect("save");
        let loaded = HighScores::load(&path).expect("load");
        assert_eq!(loaded.entries, scores.entries);
        assert!(!scores.is_dirty());
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "900,ace
broken").expect("write");
        let err = HighScores::load(file.path()).unwrap_err();
        assert!(matches!(err, HighScoreError::Parse { line: 2, .. }));
    }
}
