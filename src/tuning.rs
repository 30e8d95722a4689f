//! Data-driven game balance
//!
//! Everything here can be overridden from a JSON file; missing fields keep
//! their defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Balance knobs for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Enemy grid speed in round 1 (units per tick)
    pub base_enemy_speed: f32,
    /// Per-enemy, per-tick bomb probability in round 1
    pub base_bomb_drop_chance: f64,
    /// Fractional increase of speed and bomb chance per round after the first
    pub speed_increase_per_round: f32,
    /// Per-tick probability that a saucer appears when none is present
    pub saucer_spawn_chance: f64,
    /// Saucer speed (units per tick)
    pub saucer_speed: f32,
    /// Lives at session start
    pub starting_lives: u32,
    /// Minimum ticks between two player shots
    pub shoot_cooldown_ticks: u32,
    /// Ticks between autoplay shots
    pub autoplay_fire_interval: u32,
    /// Chance that a neighbour block erodes when a bullet hits a barrier
    pub bullet_erosion_chance: f64,
    /// Chance that a neighbour block erodes when a bomb hits a barrier
    pub bomb_erosion_chance: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_enemy_speed: 2.0,
            base_bomb_drop_chance: 0.001,
            speed_increase_per_round: 0.5,
            saucer_spawn_chance: 0.002,
            saucer_speed: 2.0,
            starting_lives: 3,
            shoot_cooldown_ticks: 15,
            autoplay_fire_interval: 20,
            bullet_erosion_chance: 0.3,
            bomb_erosion_chance: 0.4,
        }
    }
}

impl Tuning {
    /// Enemy speed for a 1-based round
    pub fn enemy_speed(&self, round: u32) -> f32 {
        self.base_enemy_speed * crate::round_multiplier(round, self.speed_increase_per_round)
    }

    /// Bomb drop chance for a 1-based round
    pub fn bomb_drop_chance(&self, round: u32) -> f64 {
        self.base_bomb_drop_chance
            * crate::round_multiplier(round, self.speed_increase_per_round) as f64
    }

    /// Read tuning from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading tuning from {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("parsing tuning in {}", path.display()))
    }

    /// Read tuning from a JSON file, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        match Self::from_file(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(err) => {
                log::warn!("Using default tuning: {err:#}");
                Self::default()
            }
        }
    }
}
