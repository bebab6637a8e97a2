//! Boundary to the media rendering surface that actually decodes and plays.
//!
//! The controllers decide *what* is loaded; a [`PlayerEngine`] only carries
//! the commands out. There is one engine per [`MediaKind`].

use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// Volume applied whenever a new resource is loaded
pub const DEFAULT_VOLUME: f32 = 0.8;

/// Which media element an engine drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Audio,
    Video,
}

impl MediaKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::Video => "video",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Commands accepted by a media rendering surface.
///
/// Loading replaces whatever resource was loaded before: an engine never holds
/// more than one active resource. Time-update and end-of-media signals travel
/// the other way and are delivered to the owning controller by the caller.
pub trait PlayerEngine {
    /// The element this engine renders into.
    fn kind(&self) -> MediaKind;

    /// Replace the current resource with the one at `locator`.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine refuses the locator outright.
    fn load(&mut self, locator: &str) -> Result<(), EngineError>;

    /// Start or resume playback of the loaded resource.
    ///
    /// # Errors
    ///
    /// Returns an error if playback cannot start (e.g. autoplay is blocked).
    fn play(&mut self) -> Result<(), EngineError>;

    fn pause(&mut self);

    fn seek(&mut self, position_secs: f64);

    /// Set output volume, `0.0..=1.0`.
    fn set_volume(&mut self, volume: f32);

    fn set_muted(&mut self, muted: bool);
}

/// Live position, length and volume of the loaded resource.
///
/// Owned by the engine boundary rather than the durable playback state, and
/// reset every time a new resource is loaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaProgress {
    /// Current position in seconds
    pub current_secs: f64,
    /// Resource length in seconds (0 until metadata arrives)
    pub duration_secs: f64,
    pub volume: f32,
}

impl Default for MediaProgress {
    fn default() -> Self {
        Self::with_volume(DEFAULT_VOLUME)
    }
}

impl MediaProgress {
    #[must_use]
    pub const fn with_volume(volume: f32) -> Self {
        Self {
            current_secs: 0.0,
            duration_secs: 0.0,
            volume,
        }
    }

    /// Record a time update. Non-finite durations (metadata not loaded yet) read as 0.
    pub fn update(&mut self, current_secs: f64, duration_secs: f64) {
        self.current_secs = if current_secs.is_finite() { current_secs.max(0.0) } else { 0.0 };
        self.duration_secs = if duration_secs.is_finite() { duration_secs.max(0.0) } else { 0.0 };
    }

    /// Playback position as a percentage of the duration, 0 when unknown
    #[must_use]
    pub fn percent(&self) -> f64 {
        if self.duration_secs > 0.0 {
            (self.current_secs / self.duration_secs * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        }
    }
}

/// A command observed by [`RecordingEngine`]
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCommand {
    Load(String),
    Play,
    Pause,
    Seek(f64),
    SetVolume(f32),
    SetMuted(bool),
}

/// In-memory engine that records every command it receives.
///
/// Lets the controllers run without a real media backend. Playback can be
/// made to fail to exercise the silent-failure path.
#[derive(Debug, Clone)]
pub struct RecordingEngine {
    kind: MediaKind,
    commands: Vec<EngineCommand>,
    reject_play: bool,
    loaded: Option<String>,
}

impl RecordingEngine {
    #[must_use]
    pub const fn new(kind: MediaKind) -> Self {
        Self {
            kind,
            commands: Vec::new(),
            reject_play: false,
            loaded: None,
        }
    }

    /// Make every subsequent `play` call fail, like a browser blocking autoplay.
    #[must_use]
    pub const fn rejecting_play(mut self) -> Self {
        self.reject_play = true;
        self
    }

    #[must_use]
    pub fn commands(&self) -> &[EngineCommand] {
        &self.commands
    }

    /// The locator of the most recent `load`
    #[must_use]
    pub fn loaded(&self) -> Option<&str> {
        self.loaded.as_deref()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl PlayerEngine for RecordingEngine {
    fn kind(&self) -> MediaKind {
        self.kind
    }

    fn load(&mut self, locator: &str) -> Result<(), EngineError> {
        self.commands.push(EngineCommand::Load(locator.to_string()));
        self.loaded = Some(locator.to_string());
        Ok(())
    }

    fn play(&mut self) -> Result<(), EngineError> {
        self.commands.push(EngineCommand::Play);
        if self.reject_play {
            return Err(EngineError::PlaybackRejected {
                reason: "autoplay blocked".into(),
            });
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.commands.push(EngineCommand::Pause);
    }

    fn seek(&mut self, position_secs: f64) {
        self.commands.push(EngineCommand::Seek(position_secs));
    }

    fn set_volume(&mut self, volume: f32) {
        self.commands.push(EngineCommand::SetVolume(volume));
    }

    fn set_muted(&mut self, muted: bool) {
        self.commands.push(EngineCommand::SetMuted(muted));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_default() {
        let progress = MediaProgress::default();
        assert!(progress.current_secs.abs() < f64::EPSILON);
        assert!(progress.duration_secs.abs() < f64::EPSILON);
        assert!((progress.volume - DEFAULT_VOLUME).abs() < f32::EPSILON);
    }

    #[test]
    fn test_progress_update_non_finite_duration() {
        let mut progress = MediaProgress::default();
        progress.update(3.0, f64::NAN);
        assert!((progress.current_secs - 3.0).abs() < f64::EPSILON);
        assert!(progress.duration_secs.abs() < f64::EPSILON);
        assert!(progress.percent().abs() < f64::EPSILON);
    }

    #[test]
    fn test_progress_percent() {
        let mut progress = MediaProgress::default();
        progress.update(30.0, 120.0);
        assert!((progress.percent() - 25.0).abs() < 1e-9);

        progress.update(150.0, 120.0);
        assert!((progress.percent() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_recording_engine_records() {
        let mut engine = RecordingEngine::new(MediaKind::Audio);
        engine.load("a.mp3").unwrap();
        engine.play().unwrap();
        engine.seek(12.5);
        engine.pause();

        assert_eq!(engine.kind(), MediaKind::Audio);
        assert_eq!(engine.loaded(), Some("a.mp3"));
        assert_eq!(
            engine.commands(),
            [
                EngineCommand::Load("a.mp3".into()),
                EngineCommand::Play,
                EngineCommand::Seek(12.5),
                EngineCommand::Pause,
            ]
        );
    }

    #[test]
    fn test_recording_engine_rejects_play() {
        let mut engine = RecordingEngine::new(MediaKind::Video).rejecting_play();
        let err = engine.play().unwrap_err();
        assert!(matches!(err, EngineError::PlaybackRejected { .. }));
        assert_eq!(engine.commands(), [EngineCommand::Play]);
    }

    #[test]
    fn test_media_kind_display() {
        assert_eq!(MediaKind::Audio.to_string(), "audio");
        assert_eq!(MediaKind::Video.to_string(), "video");
    }
}
