use crate::catalog::{Catalog, Folder, Track, Video};
use crate::engine::PlayerEngine;
use crate::error::{CoreError, Result};
use crate::navigation::{NavigationState, Section, View};
use crate::playback::{Direction, PlaybackChange, PlaybackController, PlaybackState};
use crate::video::{VideoController, VideoPlayerState};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info};

const LOG_TARGET: &str = "portfolio::session";

/// State changes published to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The view, section or selection changed
    NavigationChanged { section: Section, view: View },
    /// A different song was loaded into the audio player
    SongChanged {
        track_id: String,
        song_index: usize,
        is_playing: bool,
    },
    /// Same song, play flag flipped
    PlaybackToggled { is_playing: bool },
    /// The video modal opened on a clip
    VideoOpened { video_id: String },
    /// The video modal closed
    VideoClosed,
}

/// One browsing session: catalog, navigation, audio player and video modal.
///
/// Every transition runs to completion on the caller's thread. Observers
/// receive a [`SessionEvent`] for each visible change via [`Session::subscribe`].
///
/// While the video modal is open it owns the media focus: opening it pauses
/// the audio player, and audio transitions are ignored until it closes.
pub struct Session<A: PlayerEngine, V: PlayerEngine> {
    catalog: Arc<Catalog>,
    navigation: NavigationState,
    audio: PlaybackController<A>,
    video: VideoController<V>,
    event_tx: broadcast::Sender<SessionEvent>,
}

impl<A: PlayerEngine, V: PlayerEngine> Session<A, V> {
    /// Create a session with default navigation and nothing playing
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, audio: PlaybackController<A>, video: VideoController<V>) -> Self {
        let (event_tx, _) = broadcast::channel(64);
        Self {
            catalog,
            navigation: NavigationState::new(),
            audio,
            video,
            event_tx,
        }
    }

    /// Subscribe to session events
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    #[must_use]
    pub const fn playback(&self) -> &PlaybackState {
        self.audio.state()
    }

    #[must_use]
    pub const fn audio(&self) -> &PlaybackController<A> {
        &self.audio
    }

    #[must_use]
    pub const fn video_player(&self) -> &VideoPlayerState {
        self.video.state()
    }

    #[must_use]
    pub const fn video(&self) -> &VideoController<V> {
        &self.video
    }

    #[must_use]
    pub fn page_title(&self) -> String {
        self.navigation.page_title()
    }

    // Navigation

    pub fn select_section(&mut self, target: Section) {
        let next = self.navigation.select_section(target);
        self.set_navigation(next);
    }

    /// # Errors
    ///
    /// Returns an error if the folder list is not showing.
    pub fn open_folder(&mut self, folder: Arc<Folder>) -> Result<()> {
        let next = self.navigation.open_folder(folder)?;
        self.set_navigation(next);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`CoreError::UnknownId`] for an unknown folder, or the error from
    /// [`NavigationState::open_folder`].
    pub fn open_folder_by_id(&mut self, folder_id: &str) -> Result<()> {
        let folder = self
            .catalog
            .folder_by_id(folder_id)
            .cloned()
            .ok_or_else(|| unknown("folder", folder_id))?;
        self.open_folder(folder)
    }

    /// # Errors
    ///
    /// Returns an error if the track list is not showing or the track is not in
    /// the selected folder.
    pub fn open_track(&mut self, track: Arc<Track>) -> Result<()> {
        let next = self.navigation.open_track(track)?;
        self.set_navigation(next);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`CoreError::UnknownId`] for an unknown track, or the error from
    /// [`NavigationState::open_track`].
    pub fn open_track_by_id(&mut self, track_id: &str) -> Result<()> {
        let track = self.lookup_track(track_id)?;
        self.open_track(track)
    }

    pub fn go_back(&mut self) {
        let next = self.navigation.go_back();
        self.set_navigation(next);
    }

    // Audio playback

    /// # Errors
    ///
    /// Returns [`CoreError::InvalidSelection`] for an empty track or bad index.
    pub fn select_and_toggle(&mut self, track: Arc<Track>, song_index: usize) -> Result<()> {
        if self.audio_locked("select") {
            return Ok(());
        }
        let change = self.audio.select_and_toggle(track, song_index)?;
        self.publish_playback(change);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`CoreError::UnknownId`] for an unknown track, or the error from
    /// [`Session::select_and_toggle`].
    pub fn play_song_by_id(&mut self, track_id: &str, song_index: usize) -> Result<()> {
        let track = self.lookup_track(track_id)?;
        self.select_and_toggle(track, song_index)
    }

    pub fn pause_resume(&mut self) {
        if self.audio_locked("pause/resume") {
            return;
        }
        let change = self.audio.pause_resume();
        self.publish_playback(change);
    }

    pub fn advance(&mut self, direction: Direction) {
        if self.audio_locked("skip") {
            return;
        }
        let change = self.audio.advance(direction);
        self.publish_playback(change);
    }

    /// End-of-media signal from the audio engine
    pub fn on_audio_ended(&mut self) {
        let change = self.audio.on_media_ended();
        self.publish_playback(change);
    }

    /// Time-update signal from the audio engine
    pub fn on_audio_time_update(&mut self, current_secs: f64, duration_secs: f64) {
        self.audio.on_time_update(current_secs, duration_secs);
    }

    pub fn seek_audio(&mut self, position_secs: f64) {
        if self.audio_locked("seek") {
            return;
        }
        self.audio.seek(position_secs);
    }

    pub fn set_audio_volume(&mut self, volume: f32) {
        if self.audio_locked("change volume") {
            return;
        }
        self.audio.set_volume(volume);
    }

    // Video modal

    /// Open the modal on a clip, pausing the audio player first.
    pub fn open_video(&mut self, video: Arc<Video>) {
        let change = self.audio.pause();
        self.publish_playback(change);

        let video_id = video.id.clone();
        self.video.open(video);
        self.publish(SessionEvent::VideoOpened { video_id });
    }

    /// # Errors
    ///
    /// Returns [`CoreError::UnknownId`] for an unknown video.
    pub fn open_video_by_id(&mut self, video_id: &str) -> Result<()> {
        let video = self
            .catalog
            .video_by_id(video_id)
            .cloned()
            .ok_or_else(|| unknown("video", video_id))?;
        self.open_video(video);
        Ok(())
    }

    pub fn close_video(&mut self) {
        if !self.video.state().is_open() {
            return;
        }
        self.video.close();
        self.publish(SessionEvent::VideoClosed);
    }

    pub fn toggle_video_play(&mut self) {
        self.video.toggle_play();
    }

    pub fn toggle_video_mute(&mut self) {
        self.video.toggle_mute();
    }

    pub fn toggle_video_fullscreen(&mut self) {
        self.video.toggle_fullscreen();
    }

    /// Time-update signal from the video engine
    pub fn on_video_time_update(&mut self, current_secs: f64, duration_secs: f64) {
        self.video.on_time_update(current_secs, duration_secs);
    }

    /// End-of-media signal from the video engine
    pub fn on_video_ended(&mut self) {
        self.video.on_ended();
    }

    fn lookup_track(&self, track_id: &str) -> Result<Arc<Track>> {
        self.catalog
            .track_by_id(track_id)
            .cloned()
            .ok_or_else(|| unknown("track", track_id))
    }

    fn audio_locked(&self, action: &str) -> bool {
        let locked = self.video.state().is_open();
        if locked {
            debug!(target: LOG_TARGET, "Ignoring audio {action} while the video modal is open");
        }
        locked
    }

    fn set_navigation(&mut self, next: NavigationState) {
        if next == self.navigation {
            return;
        }
        self.navigation = next;
        info!(
            target: LOG_TARGET,
            "Navigated to {} ({})",
            self.navigation.view(),
            self.navigation.page_title()
        );
        self.publish(SessionEvent::NavigationChanged {
            section: self.navigation.section(),
            view: self.navigation.view(),
        });
    }

    fn publish_playback(&self, change: PlaybackChange) {
        let state = self.audio.state();
        let event = match change {
            PlaybackChange::Unchanged => return,
            PlaybackChange::SongChanged => match state.active_track() {
                Some(track) => SessionEvent::SongChanged {
                    track_id: track.id.clone(),
                    song_index: state.active_song_index(),
                    is_playing: state.is_playing(),
                },
                None => return,
            },
            PlaybackChange::PlayingChanged => SessionEvent::PlaybackToggled {
                is_playing: state.is_playing(),
            },
        };
        self.publish(event);
    }

    fn publish(&self, event: SessionEvent) {
        // No subscribers is fine
        let _ = self.event_tx.send(event);
    }
}

fn unknown(kind: &'static str, id: &str) -> CoreError {
    CoreError::UnknownId {
        kind,
        id: id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EngineCommand, MediaKind, RecordingEngine};
    use tokio::sync::broadcast::error::TryRecvError;

    type TestSession = Session<RecordingEngine, RecordingEngine>;

    fn session() -> TestSession {
        Session::new(
            Arc::new(Catalog::sample()),
            PlaybackController::new(RecordingEngine::new(MediaKind::Audio)),
            VideoController::new(RecordingEngine::new(MediaKind::Video)),
        )
    }

    fn drain(rx: &mut broadcast::Receiver<SessionEvent>) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        loop {
            match rx.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
                Err(TryRecvError::Lagged(_)) => {}
            }
        }
        events
    }

    #[test]
    fn test_initial_session() {
        let session = session();
        assert_eq!(session.navigation(), &NavigationState::new());
        assert_eq!(session.playback(), &PlaybackState::new());
        assert!(!session.video_player().is_open());
        assert_eq!(session.page_title(), "portfolio");
    }

    #[test]
    fn test_liminal_scenario_by_id() {
        let mut session = session();
        let mut rx = session.subscribe();

        session.open_folder_by_id("folder-2").unwrap();
        session.open_track_by_id("track-1").unwrap();
        assert_eq!(session.page_title(), "a comforting enclosure");

        session.play_song_by_id("track-1", 0).unwrap();
        assert!(session.playback().is_playing());
        session.advance(Direction::Next);
        session.advance(Direction::Next);
        assert_eq!(session.playback().active_song_index(), 2);

        session.on_audio_ended();
        assert!(!session.playback().is_playing());
        assert_eq!(session.playback().active_song_index(), 2);

        session.advance(Direction::Previous);
        assert_eq!(session.playback().active_song_index(), 1);
        assert!(!session.playback().is_playing());

        let events = drain(&mut rx);
        assert_eq!(
            events,
            vec![
                SessionEvent::NavigationChanged {
                    section: Section::Audio,
                    view: View::TrackList,
                },
                SessionEvent::NavigationChanged {
                    section: Section::Audio,
                    view: View::TrackDetail,
                },
                SessionEvent::SongChanged {
                    track_id: "track-1".into(),
                    song_index: 0,
                    is_playing: true,
                },
                SessionEvent::SongChanged {
                    track_id: "track-1".into(),
                    song_index: 1,
                    is_playing: true,
                },
                SessionEvent::SongChanged {
                    track_id: "track-1".into(),
                    song_index: 2,
                    is_playing: true,
                },
                SessionEvent::PlaybackToggled { is_playing: false },
                SessionEvent::SongChanged {
                    track_id: "track-1".into(),
                    song_index: 1,
                    is_playing: false,
                },
            ]
        );
    }

    #[test]
    fn test_unknown_ids() {
        let mut session = session();
        let err = session.open_folder_by_id("folder-x").unwrap_err();
        assert!(matches!(err, CoreError::UnknownId { kind: "folder", .. }));

        let err = session.play_song_by_id("track-x", 0).unwrap_err();
        assert!(matches!(err, CoreError::UnknownId { kind: "track", .. }));

        let err = session.open_video_by_id("sfx-x").unwrap_err();
        assert!(matches!(err, CoreError::UnknownId { kind: "video", .. }));
    }

    #[test]
    fn test_noop_back_publishes_nothing() {
        let mut session = session();
        let mut rx = session.subscribe();
        session.go_back();
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn test_audio_keeps_playing_across_sections() {
        let mut session = session();
        session.play_song_by_id("track-m1", 0).unwrap();
        session.select_section(Section::Video);
        assert_eq!(session.navigation().view(), View::VideoGallery);
        assert!(session.playback().is_playing());

        session.select_section(Section::Audio);
        assert_eq!(session.navigation().view(), View::FolderList);
        assert!(session.playback().is_active_track("track-m1"));
    }

    #[test]
    fn test_video_modal_takes_media_focus() {
        let mut session = session();
        session.play_song_by_id("track-2", 1).unwrap();
        session.select_section(Section::Video);

        let mut rx = session.subscribe();
        session.open_video_by_id("sfx-2").unwrap();
        assert!(session.video_player().is_playing());
        assert!(!session.playback().is_playing());
        assert_eq!(session.audio().engine().commands().last(), Some(&EngineCommand::Pause));

        // Audio controls are ignored while the modal is open
        session.pause_resume();
        session.advance(Direction::Next);
        session.play_song_by_id("track-3", 0).unwrap();
        assert!(!session.playback().is_playing());
        assert!(session.playback().is_active_pair("track-2", 1));

        session.close_video();
        assert!(!session.video_player().is_open());

        session.pause_resume();
        assert!(session.playback().is_playing());

        assert_eq!(
            drain(&mut rx),
            vec![
                SessionEvent::PlaybackToggled { is_playing: false },
                SessionEvent::VideoOpened {
                    video_id: "sfx-2".into()
                },
                SessionEvent::VideoClosed,
                SessionEvent::PlaybackToggled { is_playing: true },
            ]
        );
    }

    #[test]
    fn test_video_modal_without_audio() {
        let mut session = session();
        let mut rx = session.subscribe();
        session.open_video_by_id("sfx-1").unwrap();
        session.toggle_video_mute();
        session.on_video_time_update(3.0, 15.0);
        assert!(session.video_player().is_muted());
        assert!((session.video_player().progress_percent() - 20.0).abs() < 1e-9);

        session.on_video_ended();
        assert!(!session.video_player().is_playing());

        session.close_video();
        session.close_video();
        assert_eq!(
            drain(&mut rx),
            vec![
                SessionEvent::VideoOpened {
                    video_id: "sfx-1".into()
                },
                SessionEvent::VideoClosed,
            ]
        );
    }

    #[test]
    fn test_back_from_track_detail_keeps_playback() {
        let mut session = session();
        session.open_folder_by_id("folder-2").unwrap();
        session.open_track_by_id("track-3").unwrap();
        session.play_song_by_id("track-3", 2).unwrap();

        session.go_back();
        assert_eq!(session.navigation().view(), View::TrackList);
        assert!(session.navigation().selected_track().is_none());
        assert_eq!(session.navigation().selected_folder().unwrap().id, "folder-2");
        assert!(session.playback().is_active_pair("track-3", 2));
    }

    #[test]
    fn test_rejected_track_open_keeps_view() {
        let mut session = session();
        session.open_folder_by_id("folder-1").unwrap();
        let err = session.open_track_by_id("track-1").unwrap_err();
        assert!(matches!(err, CoreError::InvalidSelection { .. }));
        assert_eq!(session.navigation().view(), View::TrackList);
    }
}
