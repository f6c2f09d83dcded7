//! High score records
//!
//! Tracks the best score ever offered and a top-10 leaderboard of finished
//! timed challenges.

use serde::{Deserialize, Serialize};

use crate::persistence::{self, PersistenceResult, Storage};

/// Maximum number of leaderboard entries to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A finished session on the leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    pub makes: u32,
    pub attempts: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// Best score and leaderboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighScores {
    /// Highest score ever offered
    pub best: u64,
    /// Sorted descending by score
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "arcade_hoops_highscores";

    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a live score; returns true if it set a new best
    pub fn offer(&mut self, score: u64) -> bool {
        if score > self.best {
            log::info!("New high score: {} (was {})", score, self.best);
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Record a finished session; returns the rank achieved (1-indexed)
    pub fn add_session(
        &mut self,
        score: u64,
        makes: u32,
        attempts: u32,
        timestamp: f64,
    ) -> Option<usize> {
        self.offer(score);
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            score,
            makes,
            attempts,
            timestamp,
        };

        // Ties go below existing entries
        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(pos + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load records, starting fresh on missing or unreadable data
    pub fn load_from(storage: &dyn Storage) -> Self {
        match persistence::load_json::<HighScores>(storage, Self::STORAGE_KEY) {
            Ok(Some(mut scores)) => {
                scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
                scores.entries.truncate(MAX_HIGH_SCORES);
                let top = scores.entries.first().map_or(0, |e| e.score);
                scores.best = scores.best.max(top);
                log::info!(
                    "Loaded high scores (best {}, {} entries)",
                    scores.best,
                    scores.entries.len()
                );
                scores
            }
            Ok(None) => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
            Err(e) => {
                log::warn!("Failed to load high scores, starting fresh: {}", e);
                Self::new()
            }
        }
    }

    pub fn save_to(&self, storage: &mut dyn Storage) -> PersistenceResult<()> {
        persistence::save_json(storage, Self::STORAGE_KEY, self)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}
