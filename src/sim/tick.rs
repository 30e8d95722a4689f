//! Fixed-rate simulation tick
//!
//! Core game loop: autoplay -> motion -> saucer spawn -> collisions -> round and
//! life bookkeeping. Nothing in here blocks or fails; leaderboard saves are
//! best-effort.

use super::state::{GameEvent, GamePhase, SessionState};
use super::{autoplay, collision, motion, spawn};
use crate::consts::*;
use crate::highscores::HighScores;
use crate::persistence::ScoreStore;
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Open a session: load the leaderboard and apply start-up preferences
pub fn start_session(
    seed: u64,
    tuning: Tuning,
    settings: &Settings,
    store: &mut dyn ScoreStore,
) -> SessionState {
    let high_scores: HighScores = store.load();
    log::info!(
        "Session start (seed {seed}, {} high scores loaded)",
        high_scores.entries.len()
    );
    let mut state = SessionState::new(seed, tuning, high_scores);
    state.autoplay = settings.autoplay_on_start;
    state
}

/// Advance the session by one tick
pub fn tick(state: &mut SessionState, store: &mut dyn ScoreStore) {
    state.time_ticks += 1;

    // Post-run screens only animate
    if state.phase.is_over() {
        state.game_over_ticks += 1;
        return;
    }

    if state.autoplay {
        autoplay::drive(state);
    }

    motion::advance(state);
    spawn::maybe_spawn_saucer(state);

    if state.shoot_cooldown > 0 {
        state.shoot_cooldown -= 1;
    }

    let report = collision::resolve(state);
    for _ in 0..report.life_hits {
        lose_life(state, store);
    }

    if state.phase == GamePhase::Playing && state.enemies.is_empty() {
        next_round(state);
    }
}

/// Start the next round: harder grid, fresh barriers, same score and lives
pub fn next_round(state: &mut SessionState) {
    state.round += 1;
    state.enemy_speed = state.tuning.enemy_speed(state.round);
    state.bomb_drop_chance = state.tuning.bomb_drop_chance(state.round);

    state.bullets.clear();
    state.bombs.clear();
    state.saucer = None;
    state.enemy_direction = 1.0;
    state.player.recenter();
    state.enemies = spawn::create_enemy_grid();
    state.barriers = spawn::create_barriers();

    log::info!(
        "Round {} (enemy speed {:.2}, bomb chance {:.4})",
        state.round,
        state.enemy_speed,
        state.bomb_drop_chance
    );
    state.events.push(GameEvent::RoundCleared { round: state.round });
}

/// Take one life. Ends the run when none are left.
///
/// Does nothing once the run is over, so extra hits in the final tick are moot.
pub fn lose_life(state: &mut SessionState, store: &mut dyn ScoreStore) {
    if state.phase != GamePhase::Playing {
        return;
    }
    state.lives = state.lives.saturating_sub(1);
    state.events.push(GameEvent::LifeLost {
        lives_left: state.lives,
    });

    if state.lives > 0 {
        state.player.recenter();
        state.bombs.clear();
        return;
    }

    end_run(state, store);
}

/// Game over: claim a leaderboard row if the score qualifies
fn end_run(state: &mut SessionState, store: &mut dyn ScoreStore) {
    state.game_over_ticks = 0;
    state.name_input.clear();

    let rank = if state.high_scores.qualifies(state.score) {
        let name = if state.autoplay {
            AUTOPLAY_NAME
        } else {
            PLACEHOLDER_NAME
        };
        let rank = state.high_scores.insert(name, state.score);
        save_scores(state, store);
        rank
    } else {
        None
    };
    state.provisional_rank = rank;

    state.phase = match rank {
        Some(_) if !state.autoplay => GamePhase::NameEntry,
        Some(_) => GamePhase::HighScores,
        None => GamePhase::GameOver,
    };

    log::info!(
        "Game over: score {} in round {} (rank {:?})",
        state.score,
        state.round,
        rank
    );
    state.events.push(GameEvent::GameOver {
        score: state.score,
        rank,
    });
}

/// Reset the run to its starting state
pub fn restart(state: &mut SessionState) {
    state.reset_run();
    log::info!("Session restarted (seed {})", state.seed);
    state.events.push(GameEvent::Restarted);
}

/// Persist the leaderboard, logging instead of failing
pub(crate) fn save_scores(state: &SessionState, store: &mut dyn ScoreStore) {
    if let Err(err) = store.save(&state.high_scores) {
        log::warn!("Failed to save high scores: {err:#}");
    }
}
