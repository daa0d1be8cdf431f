//! Audio cue dispatch
//!
//! The simulation never plays sound. It records `GameEvent`s, and the
//! frontend hands them to an `AudioManager`, which maps each one to a sound
//! effect or music change and forwards it to an `AudioSink`. Sink failures
//! are logged and dropped here; they never reach the simulation.

use thiserror::Error;

use crate::settings::Settings;
use crate::sim::state::{EncounterPhase, GameEvent};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Grass step while walking
    Footstep,
    /// Player leaves the ground
    Jump,
    /// Net swing starts
    NetSwing,
    /// Net connects with an enemy or the boss
    NetImpact,
    /// Enemy caught
    EnemyDefeat,
    CoinCatch,
    /// Carrot eaten
    BunnyEat,
    /// Carrot powerup active
    PowerUp,
    /// Player loses a life
    BunnyHurt,
    /// Prelude warning and boss landing
    BossArriving,
    /// Boss fires a flame
    FlameLaunch,
    BossDefeat,
}

/// Looping background tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MusicTrack {
    /// Main menu and how-to-play
    Menu,
    /// Boss fight
    Boss,
}

/// Failure reported by an audio backend
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio device unavailable: {0}")]
    Unavailable(String),
    #[error("missing audio asset: {0}")]
    MissingAsset(String),
    #[error("playback failed: {0}")]
    Playback(String),
}

/// Backend that actually makes noise
pub trait AudioSink {
    fn play_effect(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError>;
    fn play_music(&mut self, track: MusicTrack, volume: f32) -> Result<(), AudioError>;
    fn stop_music(&mut self) -> Result<(), AudioError>;
}

/// Sink that accepts everything and plays nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play_effect(&mut self, _effect: SoundEffect, _volume: f32) -> Result<(), AudioError> {
        Ok(())
    }

    fn play_music(&mut self, _track: MusicTrack, _volume: f32) -> Result<(), AudioError> {
        Ok(())
    }

    fn stop_music(&mut self) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Map a simulation event to the effect it should trigger
pub fn effect_for(event: &GameEvent) -> Option<SoundEffect> {
    let effect = match event {
        GameEvent::Footstep => SoundEffect::Footstep,
        GameEvent::Jumped => SoundEffect::Jump,
        GameEvent::NetSwing => SoundEffect::NetSwing,
        GameEvent::NetImpact => SoundEffect::NetImpact,
        GameEvent::EnemyDefeated { .. } => SoundEffect::EnemyDefeat,
        GameEvent::CoinCollected { .. } => SoundEffect::CoinCatch,
        GameEvent::CarrotEaten { .. } => SoundEffect::BunnyEat,
        GameEvent::PowerUpActivated => SoundEffect::PowerUp,
        GameEvent::PlayerHurt { .. } => SoundEffect::BunnyHurt,
        GameEvent::BossWarning | GameEvent::BossArriving => SoundEffect::BossArriving,
        GameEvent::FlameLaunched { .. } => SoundEffect::FlameLaunch,
        GameEvent::BossDefeated => SoundEffect::BossDefeat,
        GameEvent::PhaseChanged { .. }
        | GameEvent::PowerUpExpired
        | GameEvent::EnemySpawned { .. }
        | GameEvent::BossHit { .. } => return None,
    };
    Some(effect)
}

/// Track that should be playing in `phase` (None means silence)
pub fn music_for(phase: EncounterPhase) -> Option<MusicTrack> {
    match phase {
        EncounterPhase::MainMenu | EncounterPhase::HowToPlay => Some(MusicTrack::Menu),
        EncounterPhase::BossFight => Some(MusicTrack::Boss),
        EncounterPhase::Playing
        | EncounterPhase::BossPrelude
        | EncounterPhase::GameOver
        | EncounterPhase::Win => None,
    }
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    settings: Settings,
    /// Track the sink was last told to play
    current_music: Option<MusicTrack>,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self::with_settings(sink, &Settings::default())
    }

    pub fn with_settings(sink: S, settings: &Settings) -> Self {
        Self {
            sink,
            settings: settings.clone(),
            current_music: None,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn is_muted(&self) -> bool {
        self.settings.muted
    }

    pub fn current_music(&self) -> Option<MusicTrack> {
        self.current_music
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.settings.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Flip mute. Muting stops music; unmuting resumes the track for `phase`.
    pub fn toggle_mute(&mut self, phase: EncounterPhase) {
        self.settings.muted = !self.settings.muted;
        log::info!("Audio {}", if self.settings.muted { "muted" } else { "unmuted" });
        if self.settings.muted {
            self.stop_music();
        } else {
            self.sync_music(phase);
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.settings.effective_sfx_volume();
        if vol <= 0.0 {
            return;
        }
        if let Err(e) = self.sink.play_effect(effect, vol) {
            log::warn!("Failed to play {:?}: {}", effect, e);
        }
    }

    /// Start the right track for `phase`, or stop music if it has none
    pub fn sync_music(&mut self, phase: EncounterPhase) {
        let wanted = music_for(phase);
        if self.settings.muted || wanted.is_none() {
            self.stop_music();
            return;
        }
        if wanted == self.current_music {
            return;
        }
        if let Some(track) = wanted {
            let vol = self.settings.effective_music_volume();
            match self.sink.play_music(track, vol) {
                Ok(()) => self.current_music = Some(track),
                Err(e) => log::warn!("Failed to start {:?} music: {}", track, e),
            }
        }
    }

    fn stop_music(&mut self) {
        if self.current_music.take().is_none() {
            return;
        }
        if let Err(e) = self.sink.stop_music() {
            log::warn!("Failed to stop music: {}", e);
        }
    }

    /// Turn a batch of simulation events into sound
    pub fn dispatch(&mut self, events: &[GameEvent]) {
        for event in events {
            if let GameEvent::PhaseChanged { to, .. } = event {
                self.sync_music(*to);
            }
            if let Some(effect) = effect_for(event) {
                self.play(effect);
            }
        }
    }
}
