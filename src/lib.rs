//! Star Raiders - A single-screen invaders-style shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, motion, collisions, session state machine)
//! - `highscores`: Top-5 leaderboard
//! - `persistence`: Leaderboard storage behind the `ScoreStore` trait
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences
//! - `ui`: Read-only view model for whatever draws the game
//! - `audio`: Sound cues for whatever plays them

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use highscores::HighScores;
pub use persistence::{JsonFileStore, MemoryStore, ScoreStore};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 30.0;
    pub const PLAYER_Y: f32 = FIELD_HEIGHT - PLAYER_HEIGHT;
    /// Horizontal step per move-left/move-right key press
    pub const PLAYER_STEP: f32 = 15.0;
    /// Horizontal step per tick when autoplay drives the ship
    pub const AUTOPLAY_STEP: f32 = 3.0;

    /// Player bullets
    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_HEIGHT: f32 = 10.0;
    pub const BULLET_SPEED: f32 = 5.0;

    /// Enemy bombs
    pub const BOMB_WIDTH: f32 = 4.0;
    pub const BOMB_HEIGHT: f32 = 8.0;
    pub const BOMB_SPEED: f32 = 3.0;

    /// Enemy grid layout
    pub const ENEMY_WIDTH: f32 = 40.0;
    pub const ENEMY_HEIGHT: f32 = 20.0;
    pub const ENEMY_COLUMNS: usize = 5;
    pub const ENEMY_ROWS: usize = 3;
    pub const ENEMY_SPACING_X: f32 = 50.0;
    pub const ENEMY_SPACING_Y: f32 = 30.0;
    pub const ENEMY_ORIGIN_X: f32 = 30.0;
    pub const ENEMY_ORIGIN_Y: f32 = 30.0;
    /// Vertical step taken by the whole grid when it bounces off an edge
    pub const ENEMY_DROP: f32 = 20.0;
    /// Points per enemy destroyed
    pub const ENEMY_POINTS: u64 = 10;

    /// Barrier layout
    pub const BARRIER_COUNT: usize = 4;
    pub const BARRIER_ROWS: usize = 4;
    pub const BARRIER_COLUMNS: usize = 6;
    pub const BARRIER_ORIGIN_X: f32 = 80.0;
    pub const BARRIER_SPACING_X: f32 = 150.0;
    pub const BARRIER_Y: f32 = FIELD_HEIGHT - 150.0;
    pub const BLOCK_SIZE: f32 = 10.0;
    /// Max per-axis distance from a hit block for erosion to reach a neighbour
    pub const EROSION_REACH: f32 = 10.0;

    /// Saucer
    pub const SAUCER_WIDTH: f32 = 40.0;
    pub const SAUCER_HEIGHT: f32 = 15.0;
    pub const SAUCER_Y: f32 = 10.0;
    /// Distance outside the playfield where a saucer enters
    pub const SAUCER_ENTRY_MARGIN: f32 = 50.0;
    /// Distance outside the playfield where a saucer is removed
    pub const SAUCER_EXIT_MARGIN: f32 = 60.0;

    /// High score table
    pub const MAX_NAME_LEN: usize = 10;
    pub const PLACEHOLDER_NAME: &str = "Player";
    pub const AUTOPLAY_NAME: &str = "AUTO";
}

/// Horizontal position that centres the player ship
#[inline]
pub fn player_center_x() -> f32 {
    consts::FIELD_WIDTH / 2.0 - consts::PLAYER_WIDTH / 2.0
}

/// Difficulty multiplier for a 1-based round number
///
/// Linear, not compounding: round 1 is 1.0, every later round adds `per_round`.
#[inline]
pub fn round_multiplier(round: u32, per_round: f32) -> f32 {
    1.0 + round.saturating_sub(1) as f32 * per_round
}
