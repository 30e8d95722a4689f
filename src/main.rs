//! Star Raiders - headless runner
//!
//! Plays autoplay sessions at the fixed tick rate as fast as possible, keeps
//! the leaderboard on disk and prints a JSON summary of every run.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use star_raiders::audio::{AudioManager, LogSink};
use star_raiders::sim::{self, GamePhase, SessionState};
use star_raiders::ui::Hud;
use star_raiders::{HighScores, JsonFileStore, Settings, Tuning};

#[derive(Parser, Debug)]
#[command(name = "star-raiders")]
#[command(about = "Run deterministic autoplay sessions of Star Raiders")]
struct Cli {
    /// Seed for the first session (later sessions count up from it); random if omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Tick limit per session (60 ticks = one second of play)
    #[arg(long, default_value_t = 36_000)]
    ticks: u64,
    /// Number of sessions to play
    #[arg(long, default_value_t = 1)]
    sessions: u32,
    /// Leaderboard file (overrides the settings file)
    #[arg(long)]
    scores: Option<PathBuf>,
    /// Settings file
    #[arg(long, default_value = "settings.json")]
    settings: PathBuf,
    /// Tuning overrides; defaults are used if the file is missing or invalid
    #[arg(long)]
    tuning: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct SessionSummary {
    seed: u64,
    ticks: u64,
    finished: bool,
    phase: GamePhase,
    hud: Hud,
    rank: Option<usize>,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    sessions: Vec<SessionSummary>,
    best_score: u64,
    sounds_played: u64,
    high_scores: HighScores,
}

fn random_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Run one session until game over or the tick limit
fn play_session(
    state: &mut SessionState,
    max_ticks: u64,
    store: &mut JsonFileStore,
    audio: &mut AudioManager<LogSink>,
) -> Option<usize> {
    let mut rank = None;
    while state.time_ticks < max_ticks && !state.phase.is_over() {
        sim::tick(state, store);
        let events = state.drain_events();
        audio.play_events(&events);
        for event in &events {
            if let sim::GameEvent::GameOver { rank: r, .. } = event {
                rank = *r;
            }
        }
    }
    rank
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let settings = Settings::load(&cli.settings);
    let tuning = cli.tuning.as_deref().map(Tuning::load).unwrap_or_default();
    let scores_path = cli
        .scores
        .clone()
        .unwrap_or_else(|| settings.high_scores_path.clone());
    let mut store = JsonFileStore::new(scores_path);
    log::info!("Leaderboard file: {}", store.path().display());
    let mut audio = AudioManager::with_settings(LogSink::default(), &settings);

    let first_seed = cli.seed.unwrap_or_else(random_seed);
    let mut summaries = Vec::new();
    let mut high_scores = HighScores::new();

    for i in 0..cli.sessions {
        let seed = first_seed.wrapping_add(u64::from(i));
        let mut state = sim::start_session(seed, tuning.clone(), &settings, &mut store);
        // Nobody is at the controls
        state.autoplay = true;

        let rank = play_session(&mut state, cli.ticks, &mut store, &mut audio);
        log::info!(
            "Session {} finished: score {}, round {}, {} ticks",
            i + 1,
            state.score,
            state.round,
            state.time_ticks
        );

        summaries.push(SessionSummary {
            seed,
            ticks: state.time_ticks,
            finished: state.phase.is_over(),
            phase: state.phase,
            hud: Hud::from_state(&state),
            rank,
        });
        high_scores = state.high_scores;
    }

    let summary = RunSummary {
        best_score: summaries.iter().map(|s| s.hud.score).max().unwrap_or(0),
        sessions: summaries,
        sounds_played: audio.sink().played,
        high_scores,
    };
    let json = serde_json::to_string_pretty(&summary).context("encoding run summary")?;
    println!("{json}");
    Ok(())
}
