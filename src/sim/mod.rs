//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, owned by the session
//! - Stable iteration order (spawn order decides ties)
//! - No rendering, audio or platform dependencies

pub mod autoplay;
pub mod collision;
pub mod input;
pub mod motion;
pub mod rect;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::CollisionReport;
pub use input::{InputEvent, handle_event};
pub use rect::Rect;
pub use spawn::{SAUCER_POINTS, WeightedTable};
pub use state::{
    Barrier, Block, Bomb, Bullet, Enemy, GameEvent, GamePhase, Player, Saucer, SessionState,
};
pub use tick::{lose_life, next_round, restart, start_session, tick};
