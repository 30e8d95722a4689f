//! Entity creation: enemy grid, barriers, saucer

use rand::Rng;

use super::rect::Rect;
use super::state::{Barrier, Block, Enemy, GameEvent, Saucer, SessionState};
use crate::consts::*;

/// Saucer point values and their probabilities
pub const SAUCER_POINTS: WeightedTable<u32, 3> =
    WeightedTable::new([(0.3, 300), (0.3, 150), (0.4, 50)]);

/// A discrete distribution sampled with a single uniform draw
///
/// Outcomes are tried in order; the draw falls into the first outcome whose
/// cumulative weight exceeds it. The last outcome absorbs any rounding slack.
#[derive(Debug, Clone, Copy)]
pub struct WeightedTable<T: Copy, const N: usize> {
    outcomes: [(f64, T); N],
}

impl<T: Copy, const N: usize> WeightedTable<T, N> {
    pub const fn new(outcomes: [(f64, T); N]) -> Self {
        Self { outcomes }
    }

    /// Map a draw in `[0, 1)` to an outcome
    pub fn pick(&self, draw: f64) -> T {
        let mut cumulative = 0.0;
        for &(weight, value) in &self.outcomes {
            cumulative += weight;
            if draw < cumulative {
                return value;
            }
        }
        self.outcomes[N - 1].1
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        self.pick(rng.random::<f64>())
    }
}

/// Build the 5x3 enemy grid, column by column
pub fn create_enemy_grid() -> Vec<Enemy> {
    let mut enemies = Vec::with_capacity(ENEMY_COLUMNS * ENEMY_ROWS);
    for col in 0..ENEMY_COLUMNS {
        for row in 0..ENEMY_ROWS {
            enemies.push(Enemy {
                rect: Rect::new(
                    ENEMY_ORIGIN_X + col as f32 * ENEMY_SPACING_X,
                    ENEMY_ORIGIN_Y + row as f32 * ENEMY_SPACING_Y,
                    ENEMY_WIDTH,
                    ENEMY_HEIGHT,
                ),
            });
        }
    }
    enemies
}

/// Whether a template cell is solid: the bottom two rows have a 2-wide notch
/// in the middle.
fn barrier_cell_solid(row: usize, col: usize) -> bool {
    let notch_row = row >= BARRIER_ROWS - 2;
    let notch_col = col == BARRIER_COLUMNS / 2 - 1 || col == BARRIER_COLUMNS / 2;
    !(notch_row && notch_col)
}

/// Build the four barriers from the fixed template, blocks in row-major order
pub fn create_barriers() -> Vec<Barrier> {
    (0..BARRIER_COUNT)
        .map(|b| {
            let origin_x = BARRIER_ORIGIN_X + b as f32 * BARRIER_SPACING_X;
            let mut blocks = Vec::new();
            for row in 0..BARRIER_ROWS {
                for col in 0..BARRIER_COLUMNS {
                    if !barrier_cell_solid(row, col) {
                        continue;
                    }
                    blocks.push(Block {
                        rect: Rect::new(
                            origin_x + col as f32 * BLOCK_SIZE,
                            BARRIER_Y + row as f32 * BLOCK_SIZE,
                            BLOCK_SIZE,
                            BLOCK_SIZE,
                        ),
                        exists: true,
                    });
                }
            }
            Barrier { blocks }
        })
        .collect()
}

/// Create a saucer entering from the left (`direction > 0`) or right edge
pub fn saucer_entering(direction: f32, points: u32) -> Saucer {
    let x = if direction > 0.0 {
        -SAUCER_ENTRY_MARGIN
    } else {
        FIELD_WIDTH + SAUCER_ENTRY_MARGIN
    };
    Saucer {
        rect: Rect::new(x, SAUCER_Y, SAUCER_WIDTH, SAUCER_HEIGHT),
        direction,
        points,
    }
}

/// Roll for a saucer if none is on screen. Returns true if one spawned.
pub fn maybe_spawn_saucer(state: &mut SessionState) -> bool {
    if state.saucer.is_some() {
        return false;
    }
    if state.rng.random::<f64>() >= state.tuning.saucer_spawn_chance {
        return false;
    }
    let direction = if state.rng.random_bool(0.5) { 1.0 } else { -1.0 };
    let points = SAUCER_POINTS.sample(&mut state.rng);
    log::debug!("Saucer spawned: {points} points, direction {direction}");
    state.saucer = Some(saucer_entering(direction, points));
    state.events.push(GameEvent::SaucerSpawned { points });
    true
}
