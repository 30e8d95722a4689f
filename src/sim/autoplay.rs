//! Autoplay controller - steers and fires in place of the player
//!
//! One target per tick: a falling bomb close to the ship's height wins over
//! anything else; otherwise the nearest enemy or saucer by horizontal distance.

use super::state::SessionState;
use crate::consts::*;

/// Bombs lower than this far above the ship count as threats
pub const BOMB_ALERT_HEIGHT: f32 = 100.0;
/// Bomb threats closer than this (horizontally) are dodged instead of tracked
pub const DODGE_DISTANCE: f32 = 30.0;
/// Targets within this horizontal offset are considered lined up
pub const AIM_DEADZONE: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreatKind {
    Bomb,
    Enemy,
    Saucer,
}

/// The entity autoplay reacts to this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threat {
    pub kind: ThreatKind,
    /// Horizontal centre of the threat
    pub center_x: f32,
    /// Horizontal distance from the ship's centre
    pub distance: f32,
}

/// Keep `best` unless the candidate is strictly closer
fn nearer(best: Option<Threat>, kind: ThreatKind, center_x: f32, ship_x: f32) -> Option<Threat> {
    let distance = (center_x - ship_x).abs();
    match best {
        Some(b) if b.distance <= distance => Some(b),
        _ => Some(Threat {
            kind,
            center_x,
            distance,
        }),
    }
}

/// Pick this tick's target. Ties keep the earlier entity.
pub fn pick_threat(state: &SessionState) -> Option<Threat> {
    let ship_x = state.player.rect.center_x();
    let alert_line = state.player.rect.top() - BOMB_ALERT_HEIGHT;

    let bomb = state
        .bombs
        .iter()
        .filter(|b| b.rect.top() > alert_line)
        .fold(None, |best, b| {
            nearer(best, ThreatKind::Bomb, b.rect.center_x(), ship_x)
        });
    if bomb.is_some() {
        return bomb;
    }

    let enemy = state.enemies.iter().fold(None, |best, e| {
        nearer(best, ThreatKind::Enemy, e.rect.center_x(), ship_x)
    });
    state.saucer.iter().fold(enemy, |best, s| {
        nearer(best, ThreatKind::Saucer, s.rect.center_x(), ship_x)
    })
}

/// Horizontal step to take toward (or away from) a threat
pub fn steer_step(ship_x: f32, threat: &Threat) -> f32 {
    if threat.kind == ThreatKind::Bomb && threat.distance < DODGE_DISTANCE {
        if threat.center_x > ship_x {
            -AUTOPLAY_STEP
        } else if threat.center_x < ship_x {
            AUTOPLAY_STEP
        } else {
            0.0
        }
    } else if threat.center_x > ship_x + AIM_DEADZONE {
        AUTOPLAY_STEP
    } else if threat.center_x < ship_x - AIM_DEADZONE {
        -AUTOPLAY_STEP
    } else {
        0.0
    }
}

/// Run the controller for one tick: move, then count down to the next shot
pub fn drive(state: &mut SessionState) {
    if let Some(threat) = pick_threat(state) {
        let step = steer_step(state.player.rect.center_x(), &threat);
        state.player.shift(step);
    }

    state.autoplay_fire_timer += 1;
    if state.autoplay_fire_timer >= state.tuning.autoplay_fire_interval {
        state.fire();
        state.autoplay_fire_timer = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::HighScores;
    use crate::sim::rect::Rect;
    use crate::sim::spawn::saucer_entering;
    use crate::sim::state::{Bomb, Enemy};
    use crate::tuning::Tuning;

    fn state() -> SessionState {
        let mut state = SessionState::new(8, Tuning::default(), HighScores::new());
        state.enemies.clear();
        state
    }

    fn enemy_centered_at(cx: f32) -> Enemy {
        Enemy {
            rect: Rect::new(cx - ENEMY_WIDTH / 2.0, 50.0, ENEMY_WIDTH, ENEMY_HEIGHT),
        }
    }

    fn bomb_centered_at(cx: f32, y: f32) -> Bomb {
        Bomb {
            rect: Rect::new(cx - BOMB_WIDTH / 2.0, y, BOMB_WIDTH, BOMB_HEIGHT),
        }
    }

    #[test]
    fn test_tracks_nearest_enemy() {
        let mut s = state();
        // Ship centre is 400
        s.enemies.push(enemy_centered_at(100.0));
        s.enemies.push(enemy_centered_at(460.0));
        let threat = pick_threat(&s).unwrap();
        assert_eq!(threat.kind, ThreatKind::Enemy);
        assert_eq!(threat.center_x, 460.0);

        drive(&mut s);
        assert_eq!(s.player.rect.center_x(), 403.0);
    }

    #[test]
    fn test_saucer_beats_farther_enemy() {
        let mut s = state();
        s.enemies.push(enemy_centered_at(700.0));
        let mut saucer = saucer_entering(1.0, 300);
        saucer.rect.pos.x = 360.0;
        s.saucer = Some(saucer);
        assert_eq!(pick_threat(&s).unwrap().kind, ThreatKind::Saucer);
    }

    #[test]
    fn test_low_bomb_overrides_enemies() {
        let mut s = state();
        s.enemies.push(enemy_centered_at(400.0));
        s.bombs.push(bomb_centered_at(600.0, 500.0));
        let threat = pick_threat(&s).unwrap();
        assert_eq!(threat.kind, ThreatKind::Bomb);
        // Far bomb: move toward it like any target
        assert_eq!(steer_step(400.0, &threat), AUTOPLAY_STEP);
    }

    #[test]
    fn test_high_bomb_is_ignored() {
        let mut s = state();
        s.enemies.push(enemy_centered_at(420.0));
        s.bombs.push(bomb_centered_at(400.0, 300.0));
        assert_eq!(pick_threat(&s).unwrap().kind, ThreatKind::Enemy);
    }

    #[test]
    fn test_dodges_close_bomb() {
        let mut s = state();
        s.bombs.push(bomb_centered_at(410.0, 520.0));
        drive(&mut s);
        assert_eq!(s.player.rect.center_x(), 397.0);

        let mut s = state();
        s.bombs.push(bomb_centered_at(390.0, 520.0));
        drive(&mut s);
        assert_eq!(s.player.rect.center_x(), 403.0);
    }

    #[test]
    fn test_lined_up_target_holds_position() {
        let mut s = state();
        s.enemies.push(enemy_centered_at(404.0));
        drive(&mut s);
        assert_eq!(s.player.rect.center_x(), 400.0);
    }

    #[test]
    fn test_stays_inside_field() {
        let mut s = state();
        s.player.rect.pos.x = 0.0;
        s.bombs.push(bomb_centered_at(20.0, 550.0));
        drive(&mut s);
        assert_eq!(s.player.rect.left(), 0.0);
    }

    #[test]
    fn test_fires_on_interval() {
        let mut s = state();
        for _ in 0..19 {
            drive(&mut s);
        }
        assert!(s.bullets.is_empty());
        drive(&mut s);
        assert_eq!(s.bullets.len(), 1);
        assert_eq!(s.autoplay_fire_timer, 0);
    }
}
