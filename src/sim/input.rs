//! Discrete input events applied between ticks

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GamePhase, SessionState};
use super::tick::{restart, save_scores};
use crate::consts::*;
use crate::persistence::ScoreStore;

/// One user action, already decoded from whatever the host reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    MoveLeft,
    MoveRight,
    Fire,
    ToggleAutoplay,
    Restart,
    /// Finish typing a leaderboard name
    ConfirmName,
    Backspace,
    /// Typed character during name entry
    Char(char),
    /// Leave the leaderboard screen
    AdvancePastHighScores,
}

/// Apply one input event. Events that make no sense in the current phase are
/// dropped.
pub fn handle_event(state: &mut SessionState, event: InputEvent, store: &mut dyn ScoreStore) {
    match state.phase {
        GamePhase::Playing => handle_playing(state, event),
        GamePhase::NameEntry => handle_name_entry(state, event, store),
        GamePhase::HighScores => match event {
            InputEvent::AdvancePastHighScores => {
                state.phase = GamePhase::GameOver;
                state.game_over_ticks = 0;
            }
            InputEvent::Restart => restart(state),
            _ => {}
        },
        GamePhase::GameOver => {
            if event == InputEvent::Restart {
                restart(state);
            }
        }
    }
}

fn handle_playing(state: &mut SessionState, event: InputEvent) {
    match event {
        InputEvent::ToggleAutoplay => {
            state.autoplay = !state.autoplay;
            state.autoplay_fire_timer = 0;
            log::debug!("Autoplay {}", if state.autoplay { "on" } else { "off" });
            state.events.push(GameEvent::AutoplayToggled {
                enabled: state.autoplay,
            });
        }
        // The controller owns the ship while autoplay is on
        _ if state.autoplay => {}
        InputEvent::MoveLeft => state.player.shift(-PLAYER_STEP),
        InputEvent::MoveRight => state.player.shift(PLAYER_STEP),
        InputEvent::Fire => {
            state.fire();
        }
        _ => {}
    }
}

fn handle_name_entry(state: &mut SessionState, event: InputEvent, store: &mut dyn ScoreStore) {
    match event {
        InputEvent::Char(c) => {
            if (c.is_ascii_alphanumeric() || c == ' ') && state.name_input.len() < MAX_NAME_LEN {
                state.name_input.push(c);
            }
        }
        InputEvent::Backspace => {
            state.name_input.pop();
        }
        InputEvent::ConfirmName => confirm_name(state, store),
        _ => {}
    }
}

/// Give the provisional row its final name and show the leaderboard
fn confirm_name(state: &mut SessionState, store: &mut dyn ScoreStore) {
    let trimmed = state.name_input.trim();
    let name = if trimmed.is_empty() {
        PLACEHOLDER_NAME.to_string()
    } else {
        trimmed.to_string()
    };

    if let Some(rank) = state.provisional_rank.take() {
        if state.high_scores.rename(rank, &name) {
            log::info!("High score #{rank} saved as {name:?}");
            save_scores(state, store);
            state.events.push(GameEvent::NameConfirmed { rank });
        } else {
            log::warn!("Provisional high score #{rank} is gone, name {name:?} dropped");
        }
    }

    state.phase = GamePhase::HighScores;
    state.game_over_ticks = 0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::HighScores;
    use crate::persistence::MemoryStore;
    use crate::sim::tick::lose_life;
    use crate::tuning::Tuning;

    fn state() -> SessionState {
        SessionState::new(5, Tuning::default(), HighScores::new())
    }

    /// Session that just ended with a qualifying human score
    fn in_name_entry(store: &mut MemoryStore) -> SessionState {
        let mut s = state();
        s.score = 250;
        s.lives = 1;
        lose_life(&mut s, store);
        assert_eq!(s.phase, GamePhase::NameEntry);
        s
    }

    fn type_text(s: &mut SessionState, text: &str, store: &mut MemoryStore) {
        for c in text.chars() {
            handle_event(s, InputEvent::Char(c), store);
        }
    }

    #[test]
    fn test_move_steps_and_clamps() {
        let mut s = state();
        let mut store = MemoryStore::new();
        handle_event(&mut s, InputEvent::MoveLeft, &mut store);
        assert_eq!(s.player.rect.left(), 370.0);
        handle_event(&mut s, InputEvent::MoveRight, &mut store);
        handle_event(&mut s, InputEvent::MoveRight, &mut store);
        assert_eq!(s.player.rect.left(), 400.0);

        for _ in 0..100 {
            handle_event(&mut s, InputEvent::MoveRight, &mut store);
        }
        assert_eq!(s.player.rect.right(), FIELD_WIDTH);
    }

    #[test]
    fn test_fire_spawns_bullet() {
        let mut s = state();
        let mut store = MemoryStore::new();
        handle_event(&mut s, InputEvent::Fire, &mut store);
        handle_event(&mut s, InputEvent::Fire, &mut store);
        assert_eq!(s.bullets.len(), 1);
    }

    #[test]
    fn test_autoplay_ignores_manual_controls() {
        let mut s = state();
        let mut store = MemoryStore::new();
        handle_event(&mut s, InputEvent::ToggleAutoplay, &mut store);
        assert!(s.autoplay);
        handle_event(&mut s, InputEvent::MoveLeft, &mut store);
        handle_event(&mut s, InputEvent::Fire, &mut store);
        assert_eq!(s.player.rect.left(), 385.0);
        assert!(s.bullets.is_empty());

        handle_event(&mut s, InputEvent::ToggleAutoplay, &mut store);
        assert!(!s.autoplay);
        assert_eq!(
            s.drain_events(),
            vec![
                GameEvent::AutoplayToggled { enabled: true },
                GameEvent::AutoplayToggled { enabled: false },
            ]
        );
    }

    #[test]
    fn test_name_entry_filters_and_caps() {
        let mut store = MemoryStore::new();
        let mut s = in_name_entry(&mut store);
        type_text(&mut s, "A-b_c!", &mut store);
        assert_eq!(s.name_input, "Abc");
        type_text(&mut s, " defghijkl", &mut store);
        assert_eq!(s.name_input.len(), MAX_NAME_LEN);
        assert_eq!(s.name_input, "Abc defghi");

        handle_event(&mut s, InputEvent::Backspace, &mut store);
        assert_eq!(s.name_input, "Abc defgh");
    }

    #[test]
    fn test_confirm_renames_provisional_row_and_saves() {
        let mut store = MemoryStore::new();
        let mut s = in_name_entry(&mut store);
        assert_eq!(store.saves, 1);
        type_text(&mut s, " ZED ", &mut store);
        handle_event(&mut s, InputEvent::ConfirmName, &mut store);

        assert_eq!(s.phase, GamePhase::HighScores);
        assert_eq!(s.high_scores.entries[0].name, "ZED");
        assert_eq!(s.high_scores.entries[0].score, 250);
        assert_eq!(store.saves, 2);
        assert_eq!(store.scores, s.high_scores);
        assert!(s.drain_events().contains(&GameEvent::NameConfirmed { rank: 1 }));
    }

    #[test]
    fn test_blank_name_keeps_placeholder() {
        let mut store = MemoryStore::new();
        let mut s = in_name_entry(&mut store);
        type_text(&mut s, "   ", &mut store);
        handle_event(&mut s, InputEvent::ConfirmName, &mut store);
        assert_eq!(s.high_scores.entries[0].name, PLACEHOLDER_NAME);
    }

    #[test]
    fn test_confirm_edits_row_by_rank_not_by_name() {
        let mut table = HighScores::new();
        table.insert(PLACEHOLDER_NAME, 250);
        let mut s = SessionState::new(5, Tuning::default(), table);
        let mut store = MemoryStore::new();
        s.score = 250;
        s.lives = 1;
        lose_life(&mut s, &mut store);
        // Equal score lands below the existing row
        assert_eq!(s.provisional_rank, Some(2));

        type_text(&mut s, "NEW", &mut store);
        handle_event(&mut s, InputEvent::ConfirmName, &mut store);
        assert_eq!(s.high_scores.entries[0].name, PLACEHOLDER_NAME);
        assert_eq!(s.high_scores.entries[1].name, "NEW");
    }

    #[test]
    fn test_post_run_navigation_and_restart() {
        let mut store = MemoryStore::new();
        let mut s = in_name_entry(&mut store);

        // Restart is not accepted while typing
        handle_event(&mut s, InputEvent::Restart, &mut store);
        assert_eq!(s.phase, GamePhase::NameEntry);

        handle_event(&mut s, InputEvent::ConfirmName, &mut store);
        handle_event(&mut s, InputEvent::AdvancePastHighScores, &mut store);
        assert_eq!(s.phase, GamePhase::GameOver);

        handle_event(&mut s, InputEvent::Restart, &mut store);
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.score, 0);
        assert_eq!(s.lives, 3);
        assert_eq!(s.high_scores.entries.len(), 1);
        assert!(s.drain_events().contains(&GameEvent::Restarted));
    }

    #[test]
    fn test_restart_from_high_scores() {
        let mut store = MemoryStore::new();
        let mut s = in_name_entry(&mut store);
        handle_event(&mut s, InputEvent::ConfirmName, &mut store);
        handle_event(&mut s, InputEvent::Restart, &mut store);
        assert_eq!(s.phase, GamePhase::Playing);
    }

    #[test]
    fn test_gameplay_keys_ignored_after_game_over() {
        let mut s = state();
        let mut store = MemoryStore::new();
        s.phase = GamePhase::GameOver;
        handle_event(&mut s, InputEvent::Fire, &mut store);
        handle_event(&mut s, InputEvent::ToggleAutoplay, &mut store);
        assert!(s.bullets.is_empty());
        assert!(!s.autoplay);
    }
}
