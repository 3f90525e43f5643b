//! Audio cue service
//!
//! Procedurally generated tones through the Web Audio API on wasm32; native
//! builds only log cues. The manager is an owned object with an explicit
//! `init -> play* -> dispose` lifecycle, never process-wide state.

use serde::{Deserialize, Serialize};

use crate::game::GameEvent;
use crate::settings::Settings;

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, GainNode, OscillatorType};

/// Sound cue triggers emitted by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cue {
    /// Button press
    Click,
    /// Right answer
    Correct,
    /// Wrong answer
    Wrong,
    /// Boss beaten
    Win,
    /// Boss battle start / boss takes damage
    BossHit,
    /// Phase failed
    GameOver,
    /// Level passed
    LevelUp,
}

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

#[cfg(target_arch = "wasm32")]
impl From<Wave> for OscillatorType {
    fn from(wave: Wave) -> Self {
        match wave {
            Wave::Sine => OscillatorType::Sine,
            Wave::Square => OscillatorType::Square,
            Wave::Sawtooth => OscillatorType::Sawtooth,
            Wave::Triangle => OscillatorType::Triangle,
        }
    }
}

/// One enveloped oscillator note
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq: f32,
    pub wave: Wave,
    /// Seconds
    pub duration: f64,
    /// Offset from the cue start, seconds
    pub start: f64,
    pub volume: f32,
    /// Exponential pitch slide target
    pub slide: Option<f32>,
}

const fn tone(freq: f32, wave: Wave, duration: f64, start: f64, volume: f32) -> Tone {
    Tone {
        freq,
        wave,
        duration,
        start,
        volume,
        slide: None,
    }
}

const fn slide(freq: f32, wave: Wave, duration: f64, start: f64, volume: f32, to: f32) -> Tone {
    Tone {
        freq,
        wave,
        duration,
        start,
        volume,
        slide: Some(to),
    }
}

/// Wood block tick
const CLICK: [Tone; 1] = [tone(800.0, Wave::Sine, 0.05, 0.0, 0.1)];

/// C major arpeggio chime
const CORRECT: [Tone; 4] = [
    tone(523.25, Wave::Sine, 0.3, 0.0, 0.1),
    tone(659.25, Wave::Sine, 0.3, 0.08, 0.1),
    tone(783.99, Wave::Sine, 0.6, 0.16, 0.1),
    tone(1046.5, Wave::Sine, 0.8, 0.24, 0.05),
];

/// Discordant low buzz
const WRONG: [Tone; 1] = [slide(150.0, Wave::Sawtooth, 0.4, 0.0, 0.15, 80.0)];

/// Victory fanfare
const WIN: [Tone; 4] = [
    tone(523.25, Wave::Square, 0.15, 0.0, 0.1),
    tone(523.25, Wave::Square, 0.15, 0.15, 0.1),
    tone(523.25, Wave::Square, 0.15, 0.30, 0.1),
    tone(783.99, Wave::Square, 0.6, 0.45, 0.15),
];

/// Impact thud
const BOSS_HIT: [Tone; 2] = [
    slide(120.0, Wave::Sawtooth, 0.3, 0.0, 0.3, 40.0),
    slide(800.0, Wave::Square, 0.2, 0.0, 0.05, 100.0),
];

/// Sad descending slide
const GAME_OVER: [Tone; 2] = [
    slide(400.0, Wave::Triangle, 0.8, 0.0, 0.2, 200.0),
    slide(380.0, Wave::Triangle, 0.8, 0.1, 0.2, 180.0),
];

/// Rising triad
const LEVEL_UP: [Tone; 3] = [
    tone(440.0, Wave::Sine, 0.1, 0.0, 0.1),
    tone(554.0, Wave::Sine, 0.1, 0.1, 0.1),
    tone(659.0, Wave::Sine, 0.4, 0.2, 0.1),
];

/// Delay between a correct chime and the boss impact
pub const BOSS_HIT_DELAY: f64 = 0.2;

/// Master gain at full volume
pub const MASTER_GAIN: f32 = 0.3;

impl Cue {
    pub fn tones(&self) -> &'static [Tone] {
        match self {
            Cue::Click => &CLICK,
            Cue::Correct => &CORRECT,
            Cue::Wrong => &WRONG,
            Cue::Win => &WIN,
            Cue::BossHit => &BOSS_HIT,
            Cue::GameOver => &GAME_OVER,
            Cue::LevelUp => &LEVEL_UP,
        }
    }

    /// Total length of the cue in seconds
    pub fn duration(&self) -> f64 {
        self.tones()
            .iter()
            .map(|t| t.start + t.duration)
            .fold(0.0, f64::max)
    }
}

/// Lifecycle of the audio service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioState {
    Uninitialized,
    Ready,
    Disposed,
}

/// Audio manager for the game
pub struct AudioManager {
    state: AudioState,
    master_volume: f32,
    muted: bool,
    cues_played: u64,
    #[cfg(target_arch = "wasm32")]
    ctx: Option<(AudioContext, GainNode)>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    /// Create a silent, uninitialized manager
    pub fn new() -> Self {
        Self {
            state: AudioState::Uninitialized,
            master_volume: 1.0,
            muted: false,
            cues_played: 0,
            #[cfg(target_arch = "wasm32")]
            ctx: None,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.apply_settings(settings);
        audio
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_muted(!settings.sound_enabled);
    }

    /// Open the output (browsers require a user gesture first)
    pub fn init(&mut self) {
        match self.state {
            AudioState::Ready => {
                self.resume();
                return;
            }
            AudioState::Disposed => {
                log::warn!("Audio already disposed - ignoring init");
                return;
            }
            AudioState::Uninitialized => {}
        }

        #[cfg(target_arch = "wasm32")]
        {
            self.ctx = Self::open_context();
            if self.ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
        }

        self.state = AudioState::Ready;
        self.apply_gain();
        log::info!("Audio ready");
    }

    /// Release the output; later cues are ignored
    pub fn dispose(&mut self) {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some((ctx, _)) = self.ctx.take() {
                let _ = ctx.close();
            }
        }
        if self.state == AudioState::Ready {
            log::info!("Audio disposed after {} cues", self.cues_played);
        }
        self.state = AudioState::Disposed;
    }

    pub fn state(&self) -> AudioState {
        self.state
    }

    pub fn cues_played(&self) -> u64 {
        self.cues_played
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
        self.apply_gain();
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.apply_gain();
    }

    /// Flip mute; returns the new muted flag
    pub fn toggle_mute(&mut self) -> bool {
        self.set_muted(!self.muted);
        self.muted
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            MASTER_GAIN * self.master_volume
        }
    }

    /// Play a cue now; false if it was dropped
    pub fn play(&mut self, cue: Cue) -> bool {
        self.play_at(cue, 0.0)
    }

    /// Play a cue `delay` seconds from now
    pub fn play_at(&mut self, cue: Cue, delay: f64) -> bool {
        if self.state != AudioState::Ready || self.effective_volume() <= 0.0 {
            return false;
        }

        #[cfg(target_arch = "wasm32")]
        {
            let Some((ctx, master)) = &self.ctx else {
                return false;
            };
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
            for tone in cue.tones() {
                if Self::play_tone(ctx, master, tone, delay).is_none() {
                    log::warn!("Failed to schedule {:?} tone", cue);
                }
            }
        }

        log::debug!("Cue {:?} (+{:.2}s, {:.2}s long)", cue, delay, cue.duration());
        self.cues_played += 1;
        true
    }

    /// Play every sound cue in a batch of controller events
    pub fn handle_events(&mut self, events: &[GameEvent]) -> usize {
        let mut played = 0;
        let mut after_correct = false;
        for event in events {
            let GameEvent::Sound(cue) = event else {
                continue;
            };
            let delay = if *cue == Cue::BossHit && after_correct {
                BOSS_HIT_DELAY
            } else {
                0.0
            };
            if self.play_at(*cue, delay) {
                played += 1;
            }
            after_correct = *cue == Cue::Correct;
        }
        played
    }

    // === Web Audio backend ===

    #[cfg(target_arch = "wasm32")]
    fn resume(&self) {
        if let Some((ctx, _)) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn apply_gain(&self) {
        if let Some((_, master)) = &self.ctx {
            master.gain().set_value(self.effective_volume());
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn open_context() -> Option<(AudioContext, GainNode)> {
        let ctx = AudioContext::new().ok()?;
        let master = ctx.create_gain().ok()?;
        master.connect_with_audio_node(&ctx.destination()).ok()?;
        Some((ctx, master))
    }

    /// Oscillator with exponential gain envelope, routed through master
    #[cfg(target_arch = "wasm32")]
    fn play_tone(ctx: &AudioContext, master: &GainNode, tone: &Tone, delay: f64) -> Option<()> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;
        let t = ctx.current_time() + delay + tone.start;

        osc.set_type(tone.wave.into());
        osc.frequency().set_value_at_time(tone.freq, t).ok()?;
        if let Some(to) = tone.slide {
            osc.frequency()
                .exponential_ramp_to_value_at_time(to, t + tone.duration)
                .ok()?;
        }

        gain.gain().set_value_at_time(tone.volume, t).ok()?;
        gain.gain()
            .exponential_ramp_to_value_at_time(0.001, t + tone.duration)
            .ok()?;

        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(master).ok()?;

        osc.start_with_when(t).ok()?;
        osc.stop_with_when(t + tone.duration).ok()?;
        Some(())
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    fn resume(&self) {}

    #[cfg(not(target_arch = "wasm32"))]
    fn apply_gain(&self) {
        log::trace!("Master gain {:.2}", self.effective_volume());
    }
}

impl Drop for AudioManager {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle() {
        let mut audio = AudioManager::new();
        assert_eq!(audio.state(), AudioState::Uninitialized);
        assert!(!audio.play(Cue::Click));

        audio.init();
        assert_eq!(audio.state(), AudioState::Ready);
        assert!(audio.play(Cue::Click));

        audio.dispose();
        assert_eq!(audio.state(), AudioState::Disposed);
        assert!(!audio.play(Cue::Click));

        // No resurrection after dispose
        audio.init();
        assert_eq!(audio.state(), AudioState::Disposed);
        assert_eq!(audio.cues_played(), 1);
    }

    #[test]
    fn test_mute_drops_cues() {
        let mut audio = AudioManager::new();
        audio.init();
        assert!(audio.toggle_mute());
        assert!(!audio.play(Cue::Win));
        assert!(!audio.toggle_mute());
        assert!(audio.play(Cue::Win));

        audio.set_master_volume(0.0);
        assert!(!audio.play(Cue::Win));
    }

    #[test]
    fn test_settings_applied() {
        let settings = Settings {
            sound_enabled: false,
            ..Default::default()
        };
        let audio = AudioManager::from_settings(&settings);
        assert!(audio.is_muted());
    }

    #[test]
    fn test_handle_events_plays_sounds_only() {
        let mut audio = AudioManager::new();
        audio.init();
        let events = [
            GameEvent::Sound(Cue::Correct),
            GameEvent::Answered {
                is_correct: true,
                points: 15,
            },
            GameEvent::Sound(Cue::BossHit),
            GameEvent::PhaseChanged {
                from: "MENU",
                to: "WORLD_INTRO",
            },
        ];
        assert_eq!(audio.handle_events(&events), 2);
    }

    #[test]
    fn test_tone_tables() {
        for cue in [
            Cue::Click,
            Cue::Correct,
            Cue::Wrong,
            Cue::Win,
            Cue::BossHit,
            Cue::GameOver,
            Cue::LevelUp,
        ] {
            assert!(!cue.tones().is_empty());
            assert!(cue.tones().iter().all(|t| t.volume > 0.0 && t.duration > 0.0));
        }
        assert!((Cue::Win.duration() - 1.05).abs() < 1e-9);
        assert!((Cue::Click.duration() - 0.05).abs() < 1e-9);
    }
}
