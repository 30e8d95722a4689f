//! Session state and entity records
//!
//! Entities are plain data. All behaviour lives in the sibling modules, which
//! take the `SessionState` aggregate by `&mut`.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::spawn::{create_barriers, create_enemy_grid};
use crate::consts::*;
use crate::highscores::HighScores;
use crate::player_center_x;
use crate::tuning::Tuning;

/// Which screen the session is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended, final score shown, waiting for restart
    GameOver,
    /// Run ended with a qualifying score, leaderboard shown
    HighScores,
    /// Leaderboard shown while the player types a name for the new row
    NameEntry,
}

impl GamePhase {
    /// True on any of the post-run screens
    pub fn is_over(&self) -> bool {
        !matches!(self, GamePhase::Playing)
    }
}

/// Things that happened during a tick or input event, for audio/UI hosts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player shot a bullet
    Fired,
    EnemyDestroyed,
    SaucerSpawned { points: u32 },
    SaucerDestroyed { points: u32 },
    BarrierHit,
    /// A life was lost; `lives_left` > 0 means play continues
    LifeLost { lives_left: u32 },
    /// Enemy grid cleared, `round` is the round now starting
    RoundCleared { round: u32 },
    /// Run ended; `rank` is the leaderboard row taken, if any
    GameOver { score: u64, rank: Option<usize> },
    /// Provisional leaderboard row got its final name
    NameConfirmed { rank: usize },
    AutoplayToggled { enabled: bool },
    Restarted,
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            rect: Rect::new(player_center_x(), PLAYER_Y, PLAYER_WIDTH, PLAYER_HEIGHT),
        }
    }
}

impl Player {
    /// Move horizontally by `dx`, staying inside the playfield
    pub fn shift(&mut self, dx: f32) {
        self.rect.pos.x += dx;
        self.rect.clamp_x(FIELD_WIDTH);
    }

    pub fn recenter(&mut self) {
        self.rect.pos.x = player_center_x();
    }
}

/// Player shot, travels straight up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub rect: Rect,
}

impl Bullet {
    /// Bullet leaving the nose of the player's ship
    pub fn from_player(player: &Player) -> Self {
        Self {
            rect: Rect::new(
                player.rect.center_x() - BULLET_WIDTH / 2.0,
                player.rect.top(),
                BULLET_WIDTH,
                BULLET_HEIGHT,
            ),
        }
    }
}

/// Enemy shot, travels straight down
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bomb {
    pub rect: Rect,
}

impl Bomb {
    /// Bomb dropped from the underside of an enemy
    pub fn from_enemy(enemy: &Enemy) -> Self {
        Self {
            rect: Rect::new(
                enemy.rect.center_x() - BOMB_WIDTH / 2.0,
                enemy.rect.bottom(),
                BOMB_WIDTH,
                BOMB_HEIGHT,
            ),
        }
    }
}

/// One member of the enemy grid. Direction and speed are grid-wide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub rect: Rect,
}

/// A single barrier cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub rect: Rect,
    pub exists: bool,
}

/// A barrier: blocks in template order. Destroyed blocks stay in place with
/// `exists == false` so neighbour lookups keep their geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Barrier {
    pub blocks: Vec<Block>,
}

impl Barrier {
    pub fn living_blocks(&self) -> usize {
        self.blocks.iter().filter(|b| b.exists).count()
    }
}

/// Bonus ship crossing the top of the screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Saucer {
    pub rect: Rect,
    /// +1.0 moving right, -1.0 moving left
    pub direction: f32,
    /// Value awarded when shot, fixed at spawn
    pub points: u32,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Balance values in force
    pub tuning: Tuning,
    /// Session RNG; every random draw goes through here
    pub rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Current round (1-based)
    pub round: u32,
    pub score: u64,
    pub lives: u32,
    pub player: Player,
    /// Player bullets in firing order
    pub bullets: Vec<Bullet>,
    /// Enemy grid in spawn order (the collision tie-break order)
    pub enemies: Vec<Enemy>,
    pub bombs: Vec<Bomb>,
    pub barriers: Vec<Barrier>,
    pub saucer: Option<Saucer>,
    /// +1.0 moving right, -1.0 moving left
    pub enemy_direction: f32,
    /// Derived from the round
    pub enemy_speed: f32,
    /// Derived from the round
    pub bomb_drop_chance: f64,
    /// Ticks until the player may fire again
    pub shoot_cooldown: u32,
    /// Autoplay controller drives the ship
    pub autoplay: bool,
    /// Ticks since the last autoplay shot
    pub autoplay_fire_timer: u32,
    /// Name typed so far during name entry
    pub name_input: String,
    /// Leaderboard row (1-indexed) inserted with a placeholder name
    pub provisional_rank: Option<usize>,
    /// Simulation tick counter (all phases)
    pub time_ticks: u64,
    /// Ticks spent on post-run screens, drives prompt blinking
    pub game_over_ticks: u64,
    /// Leaderboard as loaded from the score store
    pub high_scores: HighScores,
    /// Pending events for the host
    pub events: Vec<GameEvent>,
}

impl SessionState {
    /// Create a new session with the given seed
    pub fn new(seed: u64, tuning: Tuning, high_scores: HighScores) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            round: 1,
            score: 0,
            lives: tuning.starting_lives,
            player: Player::default(),
            bullets: Vec::new(),
            enemies: create_enemy_grid(),
            bombs: Vec::new(),
            barriers: create_barriers(),
            saucer: None,
            enemy_direction: 1.0,
            enemy_speed: tuning.enemy_speed(1),
            bomb_drop_chance: tuning.bomb_drop_chance(1),
            shoot_cooldown: 0,
            autoplay: false,
            autoplay_fire_timer: 0,
            name_input: String::new(),
            provisional_rank: None,
            time_ticks: 0,
            game_over_ticks: 0,
            high_scores,
            events: Vec::new(),
            tuning,
        }
    }

    /// Reinitialise everything a run owns
    ///
    /// Seed, RNG stream, tuning, the autoplay toggle and the loaded leaderboard
    /// carry over; everything else matches a fresh session.
    pub fn reset_run(&mut self) {
        self.phase = GamePhase::Playing;
        self.round = 1;
        self.score = 0;
        self.lives = self.tuning.starting_lives;
        self.player = Player::default();
        self.bullets.clear();
        self.enemies = create_enemy_grid();
        self.bombs.clear();
        self.barriers = create_barriers();
        self.saucer = None;
        self.enemy_direction = 1.0;
        self.enemy_speed = self.tuning.enemy_speed(1);
        self.bomb_drop_chance = self.tuning.bomb_drop_chance(1);
        self.shoot_cooldown = 0;
        self.autoplay_fire_timer = 0;
        self.name_input.clear();
        self.provisional_rank = None;
        self.game_over_ticks = 0;
    }

    /// Fire a bullet if the cooldown allows. Returns true if a bullet spawned.
    pub fn fire(&mut self) -> bool {
        if self.shoot_cooldown > 0 {
            return false;
        }
        self.bullets.push(Bullet::from_player(&self.player));
        self.shoot_cooldown = self.tuning.shoot_cooldown_ticks;
        self.events.push(GameEvent::Fired);
        true
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Living barrier blocks across all barriers
    pub fn living_blocks(&self) -> usize {
        self.barriers.iter().map(Barrier::living_blocks).sum()
    }
}
