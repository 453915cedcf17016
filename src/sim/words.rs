//! Word pool partitioned into difficulty tiers by length
//!
//! Loaded once, read-only during a run. A missing or empty list is not
//! fatal: the pool is simply empty and hostile spawns become no-ops.

use std::path::Path;

use super::difficulty::Difficulty;
use crate::consts::*;
use crate::error::{EngineError, Result};

#[derive(Debug, Clone, Default)]
pub struct WordPool {
    tiers: [Vec<String>; 3],
}

impl WordPool {
    /// Empty pool (every tier has no words)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a pool from newline separated text.
    ///
    /// Words are trimmed and upper-cased; anything shorter than
    /// `MIN_WORD_LEN` is dropped. Tiers: <=5 easy, 6-8 medium, >8 hard.
    pub fn from_text(text: &str) -> Self {
        Self::from_words(text.lines())
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut pool = Self::default();
        for word in words {
            let word = word.as_ref().trim().to_uppercase();
            let len = word.chars().count();
            if len < MIN_WORD_LEN {
                continue;
            }
            let tier = if len <= EASY_MAX_LEN {
                Difficulty::Easy
            } else if len <= MEDIUM_MAX_LEN {
                Difficulty::Medium
            } else {
                Difficulty::Hard
            };
            pool.tiers[tier.index()].push(word);
        }
        pool
    }

    /// Load a word list file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| EngineError::PoolUnavailable(format!("{}: {}", path.display(), e)))?;
        let pool = Self::from_text(&text);
        if pool.total() == 0 {
            return Err(EngineError::PoolUnavailable(format!(
                "{}: no usable words",
                path.display()
            )));
        }
        log::info!(
            "Word list loaded: {} entries ({} easy, {} medium, {} hard)",
            pool.total(),
            pool.words(Difficulty::Easy).len(),
            pool.words(Difficulty::Medium).len(),
            pool.words(Difficulty::Hard).len()
        );
        Ok(pool)
    }

    /// Load a word list, degrading to an empty pool on failure
    pub fn load_or_empty(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            log::warn!("{}; hostile spawns disabled", e);
            Self::empty()
        })
    }

    /// Words for a tier, in file order
    pub fn words(&self, difficulty: Difficulty) -> &[String] {
        &self.tiers[difficulty.index()]
    }

    pub fn is_empty(&self, difficulty: Difficulty) -> bool {
        self.tiers[difficulty.index()].is_empty()
    }

    pub fn total(&self) -> usize {
        self.tiers.iter().map(Vec::len).sum()
    }
}
