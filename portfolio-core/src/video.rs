//! Modal player for SFX gallery clips.

use crate::catalog::Video;
use crate::engine::{MediaProgress, PlayerEngine};
use std::sync::Arc;
use tracing::{debug, info};

const LOG_TARGET: &str = "portfolio::video";

/// State of the video modal
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VideoPlayerState {
    open: Option<Arc<Video>>,
    is_playing: bool,
    is_muted: bool,
    is_fullscreen: bool,
    progress: MediaProgress,
}

impl VideoPlayerState {
    #[must_use]
    pub const fn video(&self) -> Option<&Arc<Video>> {
        self.open.as_ref()
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open.is_some()
    }

    #[must_use]
    pub const fn is_playing(&self) -> bool {
        self.is_playing
    }

    #[must_use]
    pub const fn is_muted(&self) -> bool {
        self.is_muted
    }

    #[must_use]
    pub const fn is_fullscreen(&self) -> bool {
        self.is_fullscreen
    }

    #[must_use]
    pub const fn progress(&self) -> &MediaProgress {
        &self.progress
    }

    /// Playback position as a percentage of the clip
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        self.progress.percent()
    }
}

/// Drives the video engine for the gallery modal.
///
/// Opening a clip autoplays it; clips never advance to the next one.
pub struct VideoController<E: PlayerEngine> {
    state: VideoPlayerState,
    engine: E,
}

impl<E: PlayerEngine> VideoController<E> {
    #[must_use]
    pub fn new(engine: E) -> Self {
        Self {
            state: VideoPlayerState::default(),
            engine,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &VideoPlayerState {
        &self.state
    }

    #[must_use]
    pub const fn engine(&self) -> &E {
        &self.engine
    }

    /// Open the modal on `video`, replacing any clip already open.
    pub fn open(&mut self, video: Arc<Video>) {
        info!(target: LOG_TARGET, "Opening video {} ({})", video.title, video.id);
        if let Err(e) = self.engine.load(&video.video_url) {
            debug!(target: LOG_TARGET, "Ignoring load failure: {e}");
        }
        self.engine.set_muted(false);
        self.state = VideoPlayerState {
            open: Some(video),
            is_playing: true,
            ..VideoPlayerState::default()
        };
        self.start();
    }

    /// Close the modal and stop the clip.
    pub fn close(&mut self) {
        if self.state.open.is_none() {
            return;
        }
        self.engine.pause();
        self.state = VideoPlayerState::default();
    }

    pub fn toggle_play(&mut self) {
        if self.state.open.is_none() {
            return;
        }
        if self.state.is_playing {
            self.engine.pause();
        } else {
            self.start();
        }
        self.state.is_playing = !self.state.is_playing;
    }

    pub fn toggle_mute(&mut self) {
        if self.state.open.is_none() {
            return;
        }
        self.state.is_muted = !self.state.is_muted;
        self.engine.set_muted(self.state.is_muted);
    }

    /// Fullscreen is rendered by the presentation layer; only the flag lives here.
    pub fn toggle_fullscreen(&mut self) {
        if self.state.open.is_none() {
            return;
        }
        self.state.is_fullscreen = !self.state.is_fullscreen;
    }

    pub fn on_time_update(&mut self, current_secs: f64, duration_secs: f64) {
        if self.state.open.is_none() {
            return;
        }
        self.state.progress.update(current_secs, duration_secs);
    }

    pub fn on_ended(&mut self) {
        if self.state.open.is_none() {
            return;
        }
        self.state.is_playing = false;
    }

    fn start(&mut self) {
        if let Err(e) = self.engine.play() {
            debug!(target: LOG_TARGET, "Ignoring playback failure: {e}");
        }
    }
}
