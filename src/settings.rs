//! Player settings and preferences
//!
//! Persisted separately from the leaderboard as a small JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Player settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Silence everything
    pub muted: bool,

    // === Gameplay ===
    /// Start new sessions with autoplay already on
    pub autoplay_on_start: bool,

    // === Storage ===
    /// Where the leaderboard is kept
    pub high_scores_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // Audio
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            // Gameplay
            autoplay_on_start: false,

            // Storage
            high_scores_path: PathBuf::from("highscores.json"),
        }
    }
}

impl Settings {
    /// Volume actually applied to sound effects
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume.clamp(0.0, 1.0) * self.sfx_volume.clamp(0.0, 1.0)
        }
    }

    /// Read settings from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("parsing settings in {}", path.display()))
    }

    /// Load settings, falling back to defaults if the file is missing or bad
    pub fn load(path: &Path) -> Self {
        match Self::from_file(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                if path.exists() {
                    log::warn!("Using default settings: {err:#}");
                } else {
                    log::info!("Using default settings");
                }
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("serializing settings")?;
        fs::write(path, json)
            .with_context(|| format!("writing settings to {}", path.display()))?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
