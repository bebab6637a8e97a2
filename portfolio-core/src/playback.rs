use crate::catalog::{Song, Track};
use crate::engine::{MediaProgress, PlayerEngine, DEFAULT_VOLUME};
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

const LOG_TARGET: &str = "portfolio::playback";

/// Manual skip direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Next,
    Previous,
}

/// What the audio player has loaded and whether it should be playing.
///
/// `active_song_index` is only meaningful while a track is active, and
/// `is_playing` is never true without one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlaybackState {
    active_track: Option<Arc<Track>>,
    active_song_index: usize,
    is_playing: bool,
}

impl PlaybackState {
    /// Nothing loaded, not playing
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn active_track(&self) -> Option<&Arc<Track>> {
        self.active_track.as_ref()
    }

    #[must_use]
    pub const fn active_song_index(&self) -> usize {
        self.active_song_index
    }

    #[must_use]
    pub const fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// The song the player has loaded
    #[must_use]
    pub fn active_song(&self) -> Option<&Song> {
        self.active_track
            .as_ref()
            .and_then(|t| t.song(self.active_song_index))
    }

    /// Whether `track` is the active track, regardless of song
    #[must_use]
    pub fn is_active_track(&self, track_id: &str) -> bool {
        self.active_track.as_ref().is_some_and(|t| t.id == track_id)
    }

    /// Whether (`track`, `song_index`) is the active pair
    #[must_use]
    pub fn is_active_pair(&self, track_id: &str, song_index: usize) -> bool {
        self.is_active_track(track_id) && self.active_song_index == song_index
    }

    /// The play affordance on a track or song.
    ///
    /// Repeating the active pair toggles play/pause. Any other pair replaces the
    /// active one and always starts playing.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidSelection`] if the track has no songs or the
    /// index is out of range.
    pub fn select_and_toggle(&self, track: Arc<Track>, song_index: usize) -> Result<Self> {
        if !track.contains_song_index(song_index) {
            return Err(CoreError::InvalidSelection {
                reason: format!(
                    "song index {song_index} out of range for track {} with {} song(s)",
                    track.id,
                    track.song_count()
                ),
            });
        }

        if self.is_active_pair(&track.id, song_index) {
            return Ok(Self {
                is_playing: !self.is_playing,
                ..self.clone()
            });
        }

        Ok(Self {
            active_track: Some(track),
            active_song_index: song_index,
            is_playing: true,
        })
    }

    /// Flip play/pause without touching the active pair.
    ///
    /// Does nothing while no track is active.
    #[must_use]
    pub fn pause_resume(&self) -> Self {
        if self.active_track.is_none() {
            return self.clone();
        }
        Self {
            is_playing: !self.is_playing,
            ..self.clone()
        }
    }

    /// Stop playback, keeping the active pair.
    #[must_use]
    pub fn pause(&self) -> Self {
        Self {
            is_playing: false,
            ..self.clone()
        }
    }

    /// Skip within the active track. Wraps at both ends and keeps the play flag.
    #[must_use]
    pub fn advance(&self, direction: Direction) -> Self {
        let Some(track) = &self.active_track else {
            return self.clone();
        };
        let count = track.song_count();
        if count == 0 {
            return self.clone();
        }

        let index = match direction {
            Direction::Next => (self.active_song_index + 1) % count,
            Direction::Previous => {
                if self.active_song_index == 0 {
                    count - 1
                } else {
                    self.active_song_index - 1
                }
            }
        };

        Self {
            active_song_index: index,
            ..self.clone()
        }
    }

    /// The player finished the active song.
    ///
    /// Continues to the next song, but stops on the last one instead of
    /// wrapping around like a manual skip would.
    #[must_use]
    pub fn on_media_ended(&self) -> Self {
        let Some(track) = &self.active_track else {
            return self.clone();
        };

        if self.active_song_index + 1 < track.song_count() {
            self.advance(Direction::Next)
        } else {
            self.pause()
        }
    }

    /// Check if the active pair changed
    #[must_use]
    pub fn song_changed(&self, other: &Self) -> bool {
        match (&self.active_track, &other.active_track) {
            (Some(a), Some(b)) => a.id != b.id || self.active_song_index != other.active_song_index,
            (None, None) => false,
            _ => true,
        }
    }

    /// Check if the play flag changed
    #[must_use]
    pub const fn playing_changed(&self, other: &Self) -> bool {
        self.is_playing != other.is_playing
    }
}

/// Outcome of applying a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackChange {
    Unchanged,
    /// A different song was loaded
    SongChanged,
    /// Same song, play flag flipped
    PlayingChanged,
}

/// Owns the audio [`PlaybackState`] and the engine that renders it.
///
/// Each transition swaps in the new state, then tells the engine what changed:
/// a new song is loaded (and started if playing), a bare flag flip plays or
/// pauses in place. The declared state follows the user's intent; if the
/// engine refuses to play, the failure is logged and the state stays as is.
pub struct PlaybackController<E: PlayerEngine> {
    state: PlaybackState,
    engine: E,
    progress: MediaProgress,
    default_volume: f32,
}

impl<E: PlayerEngine> PlaybackController<E> {
    #[must_use]
    pub fn new(engine: E) -> Self {
        Self::with_default_volume(engine, DEFAULT_VOLUME)
    }

    /// Create a controller whose engine is reset to `default_volume` on every load
    #[must_use]
    pub fn with_default_volume(engine: E, default_volume: f32) -> Self {
        let default_volume = default_volume.clamp(0.0, 1.0);
        Self {
            state: PlaybackState::new(),
            engine,
            progress: MediaProgress::with_volume(default_volume),
            default_volume,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &PlaybackState {
        &self.state
    }

    #[must_use]
    pub const fn engine(&self) -> &E {
        &self.engine
    }

    #[must_use]
    pub const fn progress(&self) -> &MediaProgress {
        &self.progress
    }

    /// See [`PlaybackState::select_and_toggle`].
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidSelection`] for an empty track or out-of-range index.
    pub fn select_and_toggle(&mut self, track: Arc<Track>, song_index: usize) -> Result<PlaybackChange> {
        let next = self.state.select_and_toggle(track, song_index)?;
        Ok(self.apply(next))
    }

    pub fn pause_resume(&mut self) -> PlaybackChange {
        let next = self.state.pause_resume();
        self.apply(next)
    }

    pub fn pause(&mut self) -> PlaybackChange {
        let next = self.state.pause();
        self.apply(next)
    }

    pub fn advance(&mut self, direction: Direction) -> PlaybackChange {
        let next = self.state.advance(direction);
        self.apply(next)
    }

    /// End-of-media signal from the engine
    pub fn on_media_ended(&mut self) -> PlaybackChange {
        let next = self.state.on_media_ended();
        self.apply(next)
    }

    /// Time-update signal from the engine
    pub fn on_time_update(&mut self, current_secs: f64, duration_secs: f64) {
        self.progress.update(current_secs, duration_secs);
    }

    /// Jump within the loaded song. Ignored while nothing is loaded.
    pub fn seek(&mut self, position_secs: f64) {
        if self.state.active_track.is_none() || !position_secs.is_finite() {
            return;
        }
        let mut position = position_secs.max(0.0);
        if self.progress.duration_secs > 0.0 {
            position = position.min(self.progress.duration_secs);
        }
        self.engine.seek(position);
        self.progress.current_secs = position;
    }

    pub fn set_volume(&mut self, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        self.engine.set_volume(volume);
        self.progress.volume = volume;
    }

    fn apply(&mut self, next: PlaybackState) -> PlaybackChange {
        let previous = std::mem::replace(&mut self.state, next);

        if previous.song_changed(&self.state) {
            if let Some(song) = self.state.active_song() {
                info!(
                    target: LOG_TARGET,
                    "Loading song {} ({}) at index {}",
                    song.title,
                    song.id,
                    self.state.active_song_index
                );
                if let Err(e) = self.engine.load(&song.audio_url) {
                    debug!(target: LOG_TARGET, "Ignoring load failure: {e}");
                }
            }
            self.progress = MediaProgress::with_volume(self.default_volume);
            self.engine.set_volume(self.default_volume);
            if self.state.is_playing {
                self.start();
            }
            return PlaybackChange::SongChanged;
        }

        if previous.playing_changed(&self.state) {
            if self.state.is_playing {
                self.start();
            } else {
                self.engine.pause();
            }
            return PlaybackChange::PlayingChanged;
        }

        PlaybackChange::Unchanged
    }

    fn start(&mut self) {
        if let Err(e) = self.engine.play() {
            debug!(target: LOG_TARGET, "Ignoring playback failure: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::engine::{EngineCommand, MediaKind, RecordingEngine};

    fn track_with(songs: usize) -> Arc<Track> {
        let songs = (0..songs)
            .map(|i| Song::new(format!("s{i}"), format!("song {i}"), "1:00", format!("s{i}.mp3")))
            .collect();
        Arc::new(Track::new("t", "track", "artist", "cover.jpg", songs))
    }

    fn other_track() -> Arc<Track> {
        Arc::new(Track::new(
            "other",
            "other",
            "artist",
            "cover.jpg",
            vec![Song::new("o0", "other 0", "1:00", "o0.mp3")],
        ))
    }

    fn controller() -> PlaybackController<RecordingEngine> {
        PlaybackController::new(RecordingEngine::new(MediaKind::Audio))
    }

    #[test]
    fn test_default_state() {
        let state = PlaybackState::new();
        assert!(state.active_track().is_none());
        assert!(state.active_song().is_none());
        assert!(!state.is_playing());
    }

    #[test]
    fn test_repeat_selection_toggles() {
        let track = track_with(3);
        let state = PlaybackState::new().select_and_toggle(track.clone(), 1).unwrap();
        assert!(state.is_playing());

        let state = state.select_and_toggle(track.clone(), 1).unwrap();
        assert!(!state.is_playing());
        assert!(state.is_active_pair("t", 1));

        let state = state.select_and_toggle(track, 1).unwrap();
        assert!(state.is_playing());
    }

    #[test]
    fn test_new_selection_replaces_and_plays() {
        let track = track_with(3);
        let state = PlaybackState::new()
            .select_and_toggle(track.clone(), 0)
            .unwrap()
            .select_and_toggle(track.clone(), 0)
            .unwrap();
        assert!(!state.is_playing());

        let state = state.select_and_toggle(track, 2).unwrap();
        assert!(state.is_playing());
        assert_eq!(state.active_song_index(), 2);

        let state = state.select_and_toggle(other_track(), 0).unwrap();
        assert!(state.is_playing());
        assert!(state.is_active_track("other"));
        assert_eq!(state.active_song_index(), 0);
    }

    #[test]
    fn test_select_rejects_bad_index() {
        let state = PlaybackState::new();
        let err = state.select_and_toggle(track_with(2), 2).unwrap_err();
        assert!(matches!(err, CoreError::InvalidSelection { .. }));

        let err = state.select_and_toggle(track_with(0), 0).unwrap_err();
        assert!(matches!(err, CoreError::InvalidSelection { .. }));
    }

    #[test]
    fn test_pause_resume_keeps_pair() {
        let state = PlaybackState::new().select_and_toggle(track_with(3), 2).unwrap();
        let paused = state.pause_resume();
        assert!(!paused.is_playing());
        assert_eq!(paused.active_song_index(), 2);
        assert!(paused.pause_resume().is_playing());
    }

    #[test]
    fn test_pause_resume_without_track() {
        let state = PlaybackState::new().pause_resume();
        assert!(!state.is_playing());
        assert!(state.active_track().is_none());
    }

    #[test]
    fn test_advance_wraps_both_ways() {
        let n = 4;
        let start = PlaybackState::new().select_and_toggle(track_with(n), 2).unwrap();

        let mut state = start.clone();
        for _ in 0..n {
            state = state.advance(Direction::Next);
        }
        assert_eq!(state.active_song_index(), 2);

        let first = PlaybackState::new().select_and_toggle(track_with(n), 0).unwrap();
        assert_eq!(first.advance(Direction::Previous).active_song_index(), n - 1);
        assert_eq!(
            first.advance(Direction::Previous).advance(Direction::Next).active_song_index(),
            0
        );
    }

    #[test]
    fn test_advance_keeps_play_flag() {
        let paused = PlaybackState::new()
            .select_and_toggle(track_with(3), 0)
            .unwrap()
            .pause_resume();
        let next = paused.advance(Direction::Next);
        assert!(!next.is_playing());
        assert_eq!(next.active_song_index(), 1);
    }

    #[test]
    fn test_advance_without_track() {
        let state = PlaybackState::new();
        assert_eq!(state.advance(Direction::Next), state);
        assert_eq!(state.advance(Direction::Previous), state);
    }

    #[test]
    fn test_media_ended_continues_then_stops() {
        let n = 3;
        let state = PlaybackState::new().select_and_toggle(track_with(n), n - 2).unwrap();

        let state = state.on_media_ended();
        assert_eq!(state.active_song_index(), n - 1);
        assert!(state.is_playing());

        let state = state.on_media_ended();
        assert_eq!(state.active_song_index(), n - 1);
        assert!(!state.is_playing());
    }

    #[test]
    fn test_media_ended_single_song_track() {
        let state = PlaybackState::new().select_and_toggle(track_with(1), 0).unwrap();
        let state = state.on_media_ended();
        assert_eq!(state.active_song_index(), 0);
        assert!(!state.is_playing());
    }

    #[test]
    fn test_song_changed() {
        let track = track_with(2);
        let none = PlaybackState::new();
        let first = none.select_and_toggle(track.clone(), 0).unwrap();
        let second = first.advance(Direction::Next);
        let other = second.select_and_toggle(other_track(), 0).unwrap();

        assert!(!none.song_changed(&none));
        assert!(none.song_changed(&first));
        assert!(first.song_changed(&second));
        assert!(second.song_changed(&other));
        assert!(!first.song_changed(&first.pause_resume()));
        assert!(first.playing_changed(&first.pause_resume()));
    }

    #[test]
    fn test_controller_loads_and_plays_new_song() {
        let mut controller = controller();
        let change = controller.select_and_toggle(track_with(3), 1).unwrap();

        assert_eq!(change, PlaybackChange::SongChanged);
        assert_eq!(
            controller.engine().commands(),
            [
                EngineCommand::Load("s1.mp3".into()),
                EngineCommand::SetVolume(DEFAULT_VOLUME),
                EngineCommand::Play,
            ]
        );
    }

    #[test]
    fn test_controller_toggle_plays_in_place() {
        let mut controller = controller();
        let track = track_with(3);
        controller.select_and_toggle(track.clone(), 0).unwrap();
        controller.engine.clear();

        let change = controller.select_and_toggle(track.clone(), 0).unwrap();
        assert_eq!(change, PlaybackChange::PlayingChanged);
        assert_eq!(controller.engine().commands(), [EngineCommand::Pause]);

        controller.engine.clear();
        controller.pause_resume();
        assert_eq!(controller.engine().commands(), [EngineCommand::Play]);
    }

    #[test]
    fn test_controller_paused_skip_loads_without_playing() {
        let mut controller = controller();
        controller.select_and_toggle(track_with(3), 0).unwrap();
        controller.pause_resume();
        controller.engine.clear();

        let change = controller.advance(Direction::Next);
        assert_eq!(change, PlaybackChange::SongChanged);
        assert_eq!(
            controller.engine().commands(),
            [
                EngineCommand::Load("s1.mp3".into()),
                EngineCommand::SetVolume(DEFAULT_VOLUME),
            ]
        );
    }

    #[test]
    fn test_controller_swallows_play_failure() {
        let engine = RecordingEngine::new(MediaKind::Audio).rejecting_play();
        let mut controller = PlaybackController::new(engine);

        let change = controller.select_and_toggle(track_with(2), 0).unwrap();
        assert_eq!(change, PlaybackChange::SongChanged);
        // Declared state keeps the user's intent
        assert!(controller.state().is_playing());
        assert!(controller.engine().commands().contains(&EngineCommand::Play));
    }

    #[test]
    fn test_controller_noop_without_track() {
        let mut controller = controller();
        assert_eq!(controller.advance(Direction::Next), PlaybackChange::Unchanged);
        assert_eq!(controller.pause_resume(), PlaybackChange::Unchanged);
        assert_eq!(controller.on_media_ended(), PlaybackChange::Unchanged);
        controller.seek(10.0);
        assert!(controller.engine().commands().is_empty());
    }

    #[test]
    fn test_controller_rejected_selection_leaves_engine_alone() {
        let mut controller = controller();
        assert!(controller.select_and_toggle(track_with(1), 5).is_err());
        assert!(controller.state().active_track().is_none());
        assert!(controller.engine().commands().is_empty());
    }

    #[test]
    fn test_controller_progress_resets_on_load() {
        let mut controller = controller();
        controller.select_and_toggle(track_with(3), 0).unwrap();
        controller.on_time_update(42.0, 180.0);
        controller.set_volume(0.3);
        assert!((controller.progress().current_secs - 42.0).abs() < f64::EPSILON);
        assert!((controller.progress().volume - 0.3).abs() < f32::EPSILON);

        controller.advance(Direction::Next);
        assert!(controller.progress().current_secs.abs() < f64::EPSILON);
        assert!(controller.progress().duration_secs.abs() < f64::EPSILON);
        assert!((controller.progress().volume - DEFAULT_VOLUME).abs() < f32::EPSILON);
    }

    #[test]
    fn test_controller_seek_clamps() {
        let mut controller = controller();
        controller.select_and_toggle(track_with(1), 0).unwrap();
        controller.on_time_update(0.0, 60.0);
        controller.engine.clear();

        controller.seek(90.0);
        controller.seek(-5.0);
        assert_eq!(
            controller.engine().commands(),
            [EngineCommand::Seek(60.0), EngineCommand::Seek(0.0)]
        );
    }

    #[test]
    fn test_controller_volume_clamps() {
        let mut controller = controller();
        controller.set_volume(1.7);
        assert_eq!(controller.engine().commands(), [EngineCommand::SetVolume(1.0)]);
    }

    #[test]
    fn test_liminal_scenario() {
        let catalog = Catalog::sample();
        let track = catalog.track_by_id("track-1").unwrap().clone();
        assert_eq!(track.title, "a comforting enclosure");
        assert_eq!(track.song_count(), 3);

        let mut controller = controller();

        controller.select_and_toggle(track, 0).unwrap();
        assert!(controller.state().is_playing());
        assert_eq!(controller.state().active_song_index(), 0);

        controller.advance(Direction::Next);
        assert_eq!(controller.state().active_song_index(), 1);

        controller.advance(Direction::Next);
        assert_eq!(controller.state().active_song_index(), 2);

        controller.on_media_ended();
        assert!(!controller.state().is_playing());
        assert_eq!(controller.state().active_song_index(), 2);

        controller.advance(Direction::Previous);
        assert_eq!(controller.state().active_song_index(), 1);
        assert!(!controller.state().is_playing());
        assert_eq!(
            controller.state().active_song().map(|s| s.title.as_str()),
            Some("submerged memories")
        );
    }
}
