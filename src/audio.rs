//! Sound cues
//!
//! The simulation only queues `GameEvent`s. This module maps them to sound
//! effects and describes each effect as a procedural tone, so any backend
//! can synthesize it without sample files.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Player fires
    Laser,
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

/// A single oscillator with exponential frequency and gain ramps
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToneSpec {
    pub waveform: Waveform,
    pub start_freq: f32,
    pub end_freq: f32,
    /// Peak gain before the effect volume is applied
    pub start_gain: f32,
    pub end_gain: f32,
    /// Seconds
    pub duration: f32,
}

impl ToneSpec {
    /// Frequency at `t` seconds into the tone
    pub fn frequency_at(&self, t: f32) -> f32 {
        exp_ramp(self.start_freq, self.end_freq, t / self.duration)
    }

    /// Gain at `t` seconds into the tone, before volume scaling
    pub fn gain_at(&self, t: f32) -> f32 {
        exp_ramp(self.start_gain, self.end_gain, t / self.duration)
    }
}

/// Exponential interpolation, `progress` clamped to [0, 1]
fn exp_ramp(from: f32, to: f32, progress: f32) -> f32 {
    let p = progress.clamp(0.0, 1.0);
    from * (to / from).powf(p)
}

impl SoundEffect {
    /// Tone description for this effect
    pub fn tone(&self) -> ToneSpec {
        match self {
            // Descending square-wave zap
            SoundEffect::Laser => ToneSpec {
                waveform: Waveform::Square,
                start_freq: 800.0,
                end_freq: 100.0,
                start_gain: 0.1,
                end_gain: 0.01,
                duration: 0.1,
            },
        }
    }
}

/// Sound cue for a game event, if it has one
pub fn cue_for(event: &GameEvent) -> Option<SoundEffect> {
    match event {
        GameEvent::Fired => Some(SoundEffect::Laser),
        _ => None,
    }
}

/// Something that can actually make noise
pub trait AudioSink {
    /// Play `tone` scaled by `volume` (0.0 - 1.0)
    fn play_tone(&mut self, effect: SoundEffect, tone: &ToneSpec, volume: f32);
}

/// Sink that records cues in the log instead of playing them
#[derive(Debug, Default)]
pub struct LogSink {
    /// Cues played so far
    pub played: u64,
}

impl AudioSink for LogSink {
    fn play_tone(&mut self, effect: SoundEffect, tone: &ToneSpec, volume: f32) {
        self.played += 1;
        log::trace!(
            "{effect:?}: {:?} {}->{} Hz over {}s at volume {volume:.2}",
            tone.waveform,
            tone.start_freq,
            tone.end_freq,
            tone.duration
        );
    }
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    /// Volume applied to every effect, from `Settings::effective_sfx_volume`
    volume: f32,
}

impl<S: AudioSink> AudioManager<S> {
    /// Create a manager with default settings
    pub fn new(sink: S) -> Self {
        Self::with_settings(sink, &Settings::default())
    }

    /// Create a manager with volumes taken from settings
    pub fn with_settings(sink: S, settings: &Settings) -> Self {
        Self {
            sink,
            volume: settings.effective_sfx_volume(),
        }
    }

    /// Pick up changed volume or mute preferences
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.volume = settings.effective_sfx_volume();
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        self.volume
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        if self.volume <= 0.0 {
            return;
        }
        self.sink.play_tone(effect, &effect.tone(), self.volume);
    }

    /// Play the cues for a batch of drained events
    pub fn play_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(cue_for) {
            self.play(effect);
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
