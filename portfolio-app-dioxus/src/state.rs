use crate::engine::WebviewEngine;
use dioxus::prelude::*;
use portfolio_core::{Direction, Section, Session};
use tracing::warn;

const LOG_TARGET: &str = "portfolio::state";

pub type PortfolioSession = Session<WebviewEngine, WebviewEngine>;

/// Shared handle to the session, provided as context to every component.
///
/// Components read through `session` and mutate only through these methods.
/// Rejected calls (stale ids, out-of-range songs) are logged and dropped; the
/// view keeps showing the last valid state.
#[derive(Clone, Copy)]
pub struct AppState {
    pub session: Signal<PortfolioSession>,
}

impl AppState {
    #[must_use]
    pub const fn new(session: Signal<PortfolioSession>) -> Self {
        Self { session }
    }

    pub fn select_section(&mut self, section: Section) {
        self.session.write().select_section(section);
    }

    pub fn go_back(&mut self) {
        self.session.write().go_back();
    }

    pub fn open_folder(&mut self, folder_id: &str) {
        if let Err(e) = self.session.write().open_folder_by_id(folder_id) {
            warn!(target: LOG_TARGET, "Could not open folder {folder_id}: {e}");
        }
    }

    pub fn open_track(&mut self, track_id: &str) {
        if let Err(e) = self.session.write().open_track_by_id(track_id) {
            warn!(target: LOG_TARGET, "Could not open track {track_id}: {e}");
        }
    }

    pub fn play(&mut self, track_id: &str, song_index: usize) {
        if let Err(e) = self.session.write().play_song_by_id(track_id, song_index) {
            warn!(target: LOG_TARGET, "Could not play {track_id}[{song_index}]: {e}");
        }
    }

    pub fn pause_resume(&mut self) {
        self.session.write().pause_resume();
    }

    pub fn advance(&mut self, direction: Direction) {
        self.session.write().advance(direction);
    }

    pub fn seek_audio(&mut self, position_secs: f64) {
        self.session.write().seek_audio(position_secs);
    }

    pub fn set_audio_volume(&mut self, volume: f32) {
        self.session.write().set_audio_volume(volume);
    }

    pub fn on_audio_time_update(&mut self, current_secs: f64, duration_secs: f64) {
        self.session
            .write()
            .on_audio_time_update(current_secs, duration_secs);
    }

    pub fn on_audio_ended(&mut self) {
        self.session.write().on_audio_ended();
    }

    pub fn open_video(&mut self, video_id: &str) {
        if let Err(e) = self.session.write().open_video_by_id(video_id) {
            warn!(target: LOG_TARGET, "Could not open video {video_id}: {e}");
        }
    }

    pub fn close_video(&mut self) {
        self.session.write().close_video();
    }

    pub fn toggle_video_play(&mut self) {
        self.session.write().toggle_video_play();
    }

    pub fn toggle_video_mute(&mut self) {
        self.session.write().toggle_video_mute();
    }

    pub fn toggle_video_fullscreen(&mut self) {
        self.session.write().toggle_video_fullscreen();
    }

    pub fn on_video_time_update(&mut self, current_secs: f64, duration_secs: f64) {
        self.session
            .write()
            .on_video_time_update(current_secs, duration_secs);
    }

    pub fn on_video_ended(&mut self) {
        self.session.write().on_video_ended();
    }
}
