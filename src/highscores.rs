//! Local high score leaderboard
//!
//! One top-10 table per difficulty, persisted as JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::sim::Difficulty;

/// Maximum number of high scores to keep per difficulty
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Hostile words destroyed
    pub words: u32,
    pub max_combo: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score tables, indexed by `Difficulty::index`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    tables: [Vec<HighScoreEntry>; 3],
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries for a difficulty, best first
    pub fn entries(&self, difficulty: Difficulty) -> &[HighScoreEntry] {
        &self.tables[difficulty.index()]
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, difficulty: Difficulty, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        let table = self.entries(difficulty);
        if table.len() < MAX_HIGH_SCORES {
            return true;
        }
        table.last().is_none_or(|e| score > e.score)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, difficulty: Difficulty, score: u64) -> Option<usize> {
        if !self.qualifies(difficulty, score) {
            return None;
        }
        let table = self.entries(difficulty);
        let rank = table.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(table.len()) + 1)
    }

    /// Add a new score (if it qualifies). Returns the rank achieved.
    pub fn add_score(&mut self, difficulty: Difficulty, entry: HighScoreEntry) -> Option<usize> {
        let rank = self.potential_rank(difficulty, entry.score)?;
        let table = &mut self.tables[difficulty.index()];
        table.insert(rank - 1, entry);
        table.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.tables.iter().all(|t| t.is_empty())
    }

    /// Best score for a difficulty
    pub fn top_score(&self, difficulty: Difficulty) -> Option<u64> {
        self.entries(difficulty).first().map(|e| e.score)
    }

    /// Load from a JSON file; a missing or corrupt file starts fresh
    pub fn load_from(path: &Path) -> Self {
        let Ok(json) = std::fs::read_to_string(path) else {
            log::info!("No high scores found, starting fresh");
            return Self::new();
        };
        match serde_json::from_str::<HighScores>(&json) {
            Ok(scores) => {
                let total: usize = scores.tables.iter().map(Vec::len).sum();
                log::info!("Loaded {} high scores", total);
                scores
            }
            Err(e) => {
                log::warn!("High score file {} is invalid ({}), starting fresh", path.display(), e);
                Self::new()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)?;
        log::info!("High scores saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(score: u64) -> HighScoreEntry {
        HighScoreEntry {
            score,
            words: 3,
            max_combo: 2,
            timestamp: 0.0,
        }
    }

    #[test]
    fn test_zero_never_qualifies() {
        let scores = HighScores::new();
        assert!(!scores.qualifies(Difficulty::Easy, 0));
        assert!(scores.qualifies(Difficulty::Easy, 1));
    }

    #[test]
    fn test_ranks_descending() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(Difficulty::Easy, entry(300)), Some(1));
        assert_eq!(scores.add_score(Difficulty::Easy, entry(500)), Some(1));
        assert_eq!(scores.add_score(Difficulty::Easy, entry(400)), Some(2));
        assert_eq!(scores.add_score(Difficulty::Easy, entry(300)), Some(4));
        let listed: Vec<u64> = scores.entries(Difficulty::Easy).iter().map(|e| e.score).collect();
        assert_eq!(listed, [500, 400, 300, 300]);
        assert_eq!(scores.top_score(Difficulty::Easy), Some(500));
    }

    #[test]
    fn test_tables_are_per_difficulty() {
        let mut scores = HighScores::new();
        scores.add_score(Difficulty::Hard, entry(900));
        assert_eq!(scores.top_score(Difficulty::Hard), Some(900));
        assert_eq!(scores.top_score(Difficulty::Easy), None);
        assert!(!scores.is_empty());
    }

    #[test]
    fn test_full_table_trims_and_rejects() {
        let mut scores = HighScores::new();
        for i in 1..=MAX_HIGH_SCORES as u64 {
            scores.add_score(Difficulty::Medium, entry(i * 100));
        }
        assert!(!scores.qualifies(Difficulty::Medium, 100));
        assert_eq!(scores.add_score(Difficulty::Medium, entry(50)), None);
        assert_eq!(scores.potential_rank(Difficulty::Medium, 150), Some(10));
        assert_eq!(scores.add_score(Difficulty::Medium, entry(2000)), Some(1));
        assert_eq!(scores.entries(Difficulty::Medium).len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries(Difficulty::Medium).last().unwrap().score, 200);
    }

    #[test]
    fn test_persists_as_json() {
        let path = std::env::temp_dir().join(format!("word_runner_scores_{}.json", std::process::id()));
        let mut scores = HighScores::new();
        scores.add_score(Difficulty::Medium, entry(700));
        scores.save_to(&path).unwrap();
        let loaded = HighScores::load_from(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded.entries(Difficulty::Medium), scores.entries(Difficulty::Medium));
    }

    #[test]
    fn test_corrupt_file_starts_fresh() {
        let path = std::env::temp_dir().join(format!("word_runner_bad_scores_{}.json", std::process::id()));
        std::fs::write(&path, "not json").unwrap();
        let loaded = HighScores::load_from(&path);
        let _ = std::fs::remove_file(&path);
        assert!(loaded.is_empty());
    }
}
