//! Leaderboard persistence
//!
//! The simulation only talks to `ScoreStore`. Loading never fails: missing or
//! corrupt data comes back as an empty table. Saving is best-effort and the
//! caller decides what to do with the error.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::highscores::HighScores;

/// Storage backend for the high score table
pub trait ScoreStore {
    /// Load the stored table, or an empty one if nothing usable is stored
    fn load(&mut self) -> HighScores;

    /// Persist the table
    fn save(&mut self, scores: &HighScores) -> Result<()>;
}

/// In-memory store (tests, sessions that shouldn't touch disk)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub scores: HighScores,
    /// Number of successful saves
    pub saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn load(&mut self) -> HighScores {
        self.scores.clone()
    }

    fn save(&mut self, scores: &HighScores) -> Result<()> {
        self.scores = scores.clone();
        self.saves += 1;
        Ok(())
    }
}

/// JSON file store
///
/// Writes go to a sibling `.tmp` file first and are renamed over the target.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<HighScores> {
        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("reading high scores from {}", self.path.display()))?;
        let mut scores: HighScores = serde_json::from_str(&json)
            .with_context(|| format!("parsing high scores in {}", self.path.display()))?;
        scores.normalize();
        Ok(scores)
    }
}

impl ScoreStore for JsonFileStore {
    fn load(&mut self) -> HighScores {
        if !self.path.exists() {
            log::info!("No high scores found, starting fresh");
            return HighScores::new();
        }
        match self.read() {
            Ok(scores) => {
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Err(err) => {
                log::warn!("Discarding unreadable high scores: {err:#}");
                HighScores::new()
            }
        }
    }

    fn save(&mut self, scores: &HighScores) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(scores).context("encoding high scores")?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;
        log::info!("High scores saved ({} entries)", scores.entries.len());
        Ok(())
    }
}
