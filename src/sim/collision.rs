//! Collision detection and response
//!
//! Runs once per tick in a fixed order; earlier passes see entities that
//! later passes no longer do. Removals are marked during each pass and
//! compacted in one sweep afterwards, so indices never shift mid-iteration.
//!
//! Tie-break: a bullet overlapping several enemies destroys the one that
//! comes first in `SessionState::enemies` (spawn order).

use rand::Rng;

use super::rect::Rect;
use super::state::{Barrier, GameEvent, SessionState};
use crate::consts::*;

/// What the resolver did this tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub enemies_destroyed: u32,
    /// Points of the saucer shot down, if any
    pub saucer_points: Option<u32>,
    /// Primary barrier blocks destroyed (bullets and bombs)
    pub barrier_hits: u32,
    /// Life-loss triggers, in the order they occurred
    pub life_hits: u32,
}

/// Drop every item whose mark is set, preserving order
fn compact<T>(items: &mut Vec<T>, removed: &[bool]) {
    let mut idx = 0;
    items.retain(|_| {
        let keep = !removed[idx];
        idx += 1;
        keep
    });
}

/// Hit the first living block `rect` overlaps and erode its neighbours
///
/// Barriers are scanned in order, blocks in template order. Each other living
/// block of the same barrier within `EROSION_REACH` on both axes is destroyed
/// with probability `erosion_chance`, checked against live flags. Returns
/// true if a block was hit (the projectile is spent).
pub fn strike_barriers<R: Rng + ?Sized>(
    rect: &Rect,
    barriers: &mut [Barrier],
    rng: &mut R,
    erosion_chance: f64,
) -> bool {
    for barrier in barriers.iter_mut() {
        let Some(hit) = barrier
            .blocks
            .iter()
            .position(|b| b.exists && rect.overlaps(&b.rect))
        else {
            continue;
        };

        barrier.blocks[hit].exists = false;
        let origin = barrier.blocks[hit].rect.pos;

        for block in barrier.blocks.iter_mut() {
            let near = (block.rect.pos.x - origin.x).abs() <= EROSION_REACH
                && (block.rect.pos.y - origin.y).abs() <= EROSION_REACH;
            if block.exists && near && rng.random::<f64>() < erosion_chance {
                block.exists = false;
            }
        }
        return true;
    }
    false
}

/// Pass 1: each bullet takes out the first enemy it overlaps
fn bullets_vs_enemies(state: &mut SessionState, report: &mut CollisionReport) {
    let mut bullet_spent = vec![false; state.bullets.len()];
    let mut enemy_dead = vec![false; state.enemies.len()];

    for (bi, bullet) in state.bullets.iter().enumerate() {
        let target = (0..state.enemies.len())
            .find(|&ei| !enemy_dead[ei] && bullet.rect.overlaps(&state.enemies[ei].rect));
        if let Some(ei) = target {
            bullet_spent[bi] = true;
            enemy_dead[ei] = true;
            state.score += ENEMY_POINTS;
            report.enemies_destroyed += 1;
            state.events.push(GameEvent::EnemyDestroyed);
        }
    }

    compact(&mut state.bullets, &bullet_spent);
    compact(&mut state.enemies, &enemy_dead);
}

/// Pass 2: first bullet touching the saucer shoots it down
fn bullets_vs_saucer(state: &mut SessionState, report: &mut CollisionReport) {
    let Some(saucer) = &state.saucer else {
        return;
    };
    let Some(bi) = state
        .bullets
        .iter()
        .position(|b| b.rect.overlaps(&saucer.rect))
    else {
        return;
    };

    let points = saucer.points;
    state.bullets.remove(bi);
    state.saucer = None;
    state.score += u64::from(points);
    report.saucer_points = Some(points);
    state.events.push(GameEvent::SaucerDestroyed { points });
}

/// Pass 3: bullets chip barriers
fn bullets_vs_barriers(state: &mut SessionState, report: &mut CollisionReport) {
    let chance = state.tuning.bullet_erosion_chance;
    let mut spent = vec![false; state.bullets.len()];
    for (bi, bullet) in state.bullets.iter().enumerate() {
        if strike_barriers(&bullet.rect, &mut state.barriers, &mut state.rng, chance) {
            spent[bi] = true;
            report.barrier_hits += 1;
            state.events.push(GameEvent::BarrierHit);
        }
    }
    compact(&mut state.bullets, &spent);
}

/// Pass 4: bombs chip barriers
fn bombs_vs_barriers(state: &mut SessionState, report: &mut CollisionReport) {
    let chance = state.tuning.bomb_erosion_chance;
    let mut spent = vec![false; state.bombs.len()];
    for (bi, bomb) in state.bombs.iter().enumerate() {
        if strike_barriers(&bomb.rect, &mut state.barriers, &mut state.rng, chance) {
            spent[bi] = true;
            report.barrier_hits += 1;
            state.events.push(GameEvent::BarrierHit);
        }
    }
    compact(&mut state.bombs, &spent);
}

/// Pass 5: the first bomb touching the ship costs a life
fn bombs_vs_player(state: &mut SessionState, report: &mut CollisionReport) {
    let player = state.player.rect;
    if let Some(bi) = state.bombs.iter().position(|b| b.rect.overlaps(&player)) {
        state.bombs.remove(bi);
        report.life_hits += 1;
    }
}

/// Pass 6: every enemy that has reached the ship's line costs a life
fn enemies_vs_player(state: &mut SessionState, report: &mut CollisionReport) {
    let line = state.player.rect.top();
    let reached = state
        .enemies
        .iter()
        .filter(|e| e.rect.bottom() >= line)
        .count();
    report.life_hits += reached as u32;
}

/// Run every collision pass in order
///
/// Score and entity removals are applied here; life loss is left to the
/// caller, which applies `life_hits` one at a time.
pub fn resolve(state: &mut SessionState) -> CollisionReport {
    let mut report = CollisionReport::default();
    bullets_vs_enemies(state, &mut report);
    bullets_vs_saucer(state, &mut report);
    bullets_vs_barriers(state, &mut report);
    bombs_vs_barriers(state, &mut report);
    bombs_vs_player(state, &mut report);
    enemies_vs_player(state, &mut report);
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::HighScores;
    use crate::sim::spawn::saucer_entering;
    use crate::sim::state::{Block, Bomb, Bullet, Enemy};
    use crate::tuning::Tuning;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn state_with(tuning: Tuning) -> SessionState {
        let mut state = SessionState::new(5, tuning, HighScores::new());
        state.enemies.clear();
        state.barriers.clear();
        state
    }

    fn bullet_at(x: f32, y: f32) -> Bullet {
        Bullet {
            rect: Rect::new(x, y, BULLET_WIDTH, BULLET_HEIGHT),
        }
    }

    fn enemy_at(x: f32, y: f32) -> Enemy {
        Enemy {
            rect: Rect::new(x, y, ENEMY_WIDTH, ENEMY_HEIGHT),
        }
    }

    fn barrier_grid(origin_x: f32, origin_y: f32) -> Barrier {
        let mut blocks = Vec::new();
        for row in 0..3 {
            for col in 0..3 {
                blocks.push(Block {
                    rect: Rect::new(
                        origin_x + col as f32 * BLOCK_SIZE,
                        origin_y + row as f32 * BLOCK_SIZE,
                        BLOCK_SIZE,
                        BLOCK_SIZE,
                    ),
                    exists: true,
                });
            }
        }
        Barrier { blocks }
    }

    #[test]
    fn test_bullet_destroys_enemy_and_scores() {
        let mut state = state_with(Tuning::default());
        state.enemies.push(enemy_at(100.0, 100.0));
        state.bullets.push(bullet_at(110.0, 110.0));

        let report = resolve(&mut state);
        assert_eq!(report.enemies_destroyed, 1);
        assert_eq!(state.score, 10);
        assert!(state.enemies.is_empty());
        assert!(state.bullets.is_empty());
        assert_eq!(state.drain_events(), vec![GameEvent::EnemyDestroyed]);
    }

    #[test]
    fn test_touching_edge_is_not_a_hit() {
        let mut state = state_with(Tuning::default());
        state.enemies.push(enemy_at(100.0, 100.0));
        // bullet.x + bullet.width == enemy.x
        state.bullets.push(bullet_at(100.0 - BULLET_WIDTH, 105.0));

        let report = resolve(&mut state);
        assert_eq!(report.enemies_destroyed, 0);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_bullet_hits_first_enemy_in_spawn_order() {
        let mut state = state_with(Tuning::default());
        // Two overlapping enemies under one bullet
        state.enemies.push(enemy_at(100.0, 100.0));
        state.enemies.push(enemy_at(110.0, 105.0));
        state.bullets.push(bullet_at(120.0, 108.0));

        resolve(&mut state);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].rect.left(), 110.0);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_two_bullets_two_enemies() {
        let mut state = state_with(Tuning::default());
        state.enemies.push(enemy_at(100.0, 100.0));
        state.bullets.push(bullet_at(110.0, 105.0));
        state.bullets.push(bullet_at(115.0, 105.0));
        state.enemies.push(enemy_at(300.0, 100.0));

        resolve(&mut state);
        // First bullet takes the enemy, second finds nothing left to hit
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bullets[0].rect.left(), 115.0);
    }

    #[test]
    fn test_bullet_shoots_saucer() {
        let mut state = state_with(Tuning::default());
        let mut saucer = saucer_entering(1.0, 150);
        saucer.rect.pos.x = 200.0;
        state.saucer = Some(saucer);
        state.bullets.push(bullet_at(210.0, 12.0));

        let report = resolve(&mut state);
        assert_eq!(report.saucer_points, Some(150));
        assert_eq!(state.score, 150);
        assert!(state.saucer.is_none());
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_enemy_pass_runs_before_saucer_pass() {
        let mut state = state_with(Tuning::default());
        let mut saucer = saucer_entering(1.0, 300);
        saucer.rect.pos.x = 100.0;
        state.saucer = Some(saucer);
        state.enemies.push(enemy_at(100.0, 5.0));
        state.bullets.push(bullet_at(110.0, 12.0));

        resolve(&mut state);
        assert_eq!(state.score, 10);
        assert!(state.saucer.is_some());
    }

    #[test]
    fn test_bullet_hits_one_block_without_erosion() {
        let tuning = Tuning {
            bullet_erosion_chance: 0.0,
            ..Tuning::default()
        };
        let mut state = state_with(tuning);
        state.barriers.push(barrier_grid(100.0, 400.0));
        state.barriers.push(barrier_grid(100.0, 400.0));
        // Bullet inside the centre block of both barriers
        state.bullets.push(bullet_at(113.0, 411.0));

        let report = resolve(&mut state);
        assert_eq!(report.barrier_hits, 1);
        assert!(state.bullets.is_empty());
        // Only the first barrier is touched
        assert_eq!(state.barriers[0].living_blocks(), 8);
        assert_eq!(state.barriers[1].living_blocks(), 9);
        assert!(!state.barriers[0].blocks[4].exists);
    }

    #[test]
    fn test_certain_erosion_takes_all_neighbours() {
        let mut barriers = vec![barrier_grid(100.0, 400.0), barrier_grid(130.0, 400.0)];
        let mut rng = Pcg32::seed_from_u64(1);
        let centre = Rect::new(113.0, 411.0, BULLET_WIDTH, BULLET_HEIGHT);

        assert!(strike_barriers(&centre, &mut barriers, &mut rng, 1.0));
        // Centre hit plus all 8 neighbours inside reach
        assert_eq!(barriers[0].living_blocks(), 0);
        // Erosion never crosses into another barrier
        assert_eq!(barriers[1].living_blocks(), 9);
    }

    #[test]
    fn test_erosion_reach_is_one_block() {
        let mut barriers = vec![barrier_grid(100.0, 400.0)];
        let mut rng = Pcg32::seed_from_u64(1);
        // Hit the top-left corner block
        let corner = Rect::new(101.0, 401.0, BULLET_WIDTH, BULLET_HEIGHT);

        assert!(strike_barriers(&corner, &mut barriers, &mut rng, 1.0));
        // Corner + right + below + diagonal gone; the far row and column stay
        let alive: Vec<bool> = barriers[0].blocks.iter().map(|b| b.exists).collect();
        assert_eq!(
            alive,
            vec![false, false, true, false, false, true, true, true, true]
        );
    }

    #[test]
    fn test_dead_blocks_are_passed_through() {
        let mut barriers = vec![barrier_grid(100.0, 400.0)];
        barriers[0].blocks[4].exists = false;
        let mut rng = Pcg32::seed_from_u64(1);
        let centre = Rect::new(113.0, 411.0, 2.0, 2.0);
        assert!(!strike_barriers(&centre, &mut barriers, &mut rng, 1.0));
        assert_eq!(barriers[0].living_blocks(), 8);
    }

    #[test]
    fn test_bomb_erodes_barrier() {
        let tuning = Tuning {
            bomb_erosion_chance: 1.0,
            ..Tuning::default()
        };
        let mut state = state_with(tuning);
        state.barriers.push(barrier_grid(100.0, 400.0));
        state.bombs.push(Bomb {
            rect: Rect::new(113.0, 411.0, BOMB_WIDTH, BOMB_HEIGHT),
        });

        let report = resolve(&mut state);
        assert_eq!(report.barrier_hits, 1);
        assert!(state.bombs.is_empty());
        assert_eq!(state.living_blocks(), 0);
    }

    #[test]
    fn test_bomb_hits_player_once() {
        let mut state = state_with(Tuning::default());
        let ship = state.player.rect;
        for dx in [2.0, 10.0] {
            state.bombs.push(Bomb {
                rect: Rect::new(ship.left() + dx, ship.top() + 2.0, BOMB_WIDTH, BOMB_HEIGHT),
            });
        }

        let report = resolve(&mut state);
        assert_eq!(report.life_hits, 1);
        assert_eq!(state.bombs.len(), 1);
    }

    #[test]
    fn test_each_enemy_at_player_line_counts() {
        let mut state = state_with(Tuning::default());
        let line = state.player.rect.top();
        state.enemies.push(enemy_at(10.0, line - ENEMY_HEIGHT));
        state.enemies.push(enemy_at(300.0, line - ENEMY_HEIGHT + 5.0));
        state.enemies.push(enemy_at(600.0, line - ENEMY_HEIGHT - 1.0));

        let report = resolve(&mut state);
        assert_eq!(report.life_hits, 2);
    }
}
