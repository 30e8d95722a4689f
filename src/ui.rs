//! Read-only view model for the renderer
//!
//! Everything a front end needs to draw the HUD and the post-run screens,
//! derived from `SessionState` without touching it. Blinking is driven by
//! tick counters so it stays in lockstep with the simulation.

use serde::Serialize;

use crate::highscores::HighScoreEntry;
use crate::sim::{GamePhase, SessionState};

/// Period of the "press restart" prompt blink, in ticks
pub const PROMPT_BLINK_PERIOD: u64 = 60;
/// Ticks per period the prompt is visible
pub const PROMPT_VISIBLE_TICKS: u64 = 40;
/// Period of the name-entry cursor blink, in ticks
pub const CURSOR_BLINK_PERIOD: u64 = 30;

/// Always-on status line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hud {
    pub score: u64,
    pub round: u32,
    pub lives: u32,
    pub autoplay: bool,
    /// Leaderboard row the current score would take if the run ended now
    pub rank_if_ended: Option<usize>,
}

impl Hud {
    pub fn from_state(state: &SessionState) -> Self {
        Self {
            score: state.score,
            round: state.round,
            lives: state.lives,
            autoplay: state.autoplay,
            rank_if_ended: state.high_scores.potential_rank(state.score),
        }
    }
}

/// Leaderboard row as shown on screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreRow {
    /// 1-indexed
    pub rank: usize,
    pub name: String,
    pub score: u64,
    /// The row this run just earned
    pub highlighted: bool,
}

/// Full-screen layer drawn over the playfield
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Overlay {
    None,
    GameOver {
        score: u64,
        show_restart_prompt: bool,
    },
    HighScores {
        rows: Vec<ScoreRow>,
        show_continue_prompt: bool,
    },
    NameEntry {
        rows: Vec<ScoreRow>,
        /// Upper-cased input followed by the blinking cursor cell
        text: String,
    },
}

impl Overlay {
    pub fn from_state(state: &SessionState) -> Self {
        let prompt_on = state.game_over_ticks % PROMPT_BLINK_PERIOD < PROMPT_VISIBLE_TICKS;
        match state.phase {
            GamePhase::Playing => Overlay::None,
            GamePhase::GameOver => Overlay::GameOver {
                score: state.score,
                show_restart_prompt: prompt_on,
            },
            GamePhase::HighScores => Overlay::HighScores {
                rows: score_rows(&state.high_scores.entries, state.provisional_rank),
                show_continue_prompt: prompt_on,
            },
            GamePhase::NameEntry => {
                let cursor_on = state.time_ticks % CURSOR_BLINK_PERIOD < CURSOR_BLINK_PERIOD / 2;
                let mut text = state.name_input.to_uppercase();
                text.push(if cursor_on { '_' } else { ' ' });
                Overlay::NameEntry {
                    rows: score_rows(&state.high_scores.entries, state.provisional_rank),
                    text,
                }
            }
        }
    }
}

fn score_rows(entries: &[HighScoreEntry], highlight: Option<usize>) -> Vec<ScoreRow> {
    entries
        .iter()
        .enumerate()
        .map(|(i, e)| ScoreRow {
            rank: i + 1,
            name: e.name.clone(),
            score: e.score,
            highlighted: highlight == Some(i + 1),
        })
        .collect()
}
