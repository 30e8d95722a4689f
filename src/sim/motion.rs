//! Per-tick movement rules

use rand::Rng;

use super::state::{Bomb, SessionState};
use crate::consts::*;

/// Advance the enemy grid one tick
///
/// If any enemy sits at or beyond the edge it is heading for, the whole grid
/// reverses and steps down instead of moving sideways. Returns true on a bounce.
pub fn move_enemies(state: &mut SessionState) -> bool {
    let dir = state.enemy_direction;
    let hit_edge = state.enemies.iter().any(|e| {
        (dir < 0.0 && e.rect.left() <= 0.0) || (dir > 0.0 && e.rect.right() >= FIELD_WIDTH)
    });

    if hit_edge {
        state.enemy_direction = -dir;
        for enemy in &mut state.enemies {
            enemy.rect.pos.y += ENEMY_DROP;
        }
    } else {
        let dx = state.enemy_speed * dir;
        for enemy in &mut state.enemies {
            enemy.rect.pos.x += dx;
        }
    }
    hit_edge
}

/// Independent per-enemy roll to drop a bomb
pub fn drop_bombs(state: &mut SessionState) {
    let chance = state.bomb_drop_chance;
    for enemy in &state.enemies {
        if state.rng.random::<f64>() < chance {
            state.bombs.push(Bomb::from_enemy(enemy));
        }
    }
}

/// Move bombs down, dropping any that are fully below the playfield
pub fn move_bombs(state: &mut SessionState) {
    for bomb in &mut state.bombs {
        bomb.rect.pos.y += BOMB_SPEED;
    }
    state.bombs.retain(|b| b.rect.top() < FIELD_HEIGHT);
}

/// Move bullets up, dropping any that are fully above the playfield
pub fn move_bullets(state: &mut SessionState) {
    for bullet in &mut state.bullets {
        bullet.rect.pos.y -= BULLET_SPEED;
    }
    state.bullets.retain(|b| b.rect.bottom() > 0.0);
}

/// Move the saucer along its lane, removing it once it is well off screen
pub fn move_saucer(state: &mut SessionState) {
    let speed = state.tuning.saucer_speed;
    let Some(saucer) = &mut state.saucer else {
        return;
    };
    saucer.rect.pos.x += speed * saucer.direction;
    let x = saucer.rect.left();
    if x < -SAUCER_EXIT_MARGIN || x > FIELD_WIDTH + SAUCER_EXIT_MARGIN {
        state.saucer = None;
    }
}

/// Run every motion rule in tick order
pub fn advance(state: &mut SessionState) {
    move_enemies(state);
    drop_bombs(state);
    move_bombs(state);
    move_bullets(state);
    move_saucer(state);
}
