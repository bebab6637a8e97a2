use crate::state::PortfolioSession;
use dioxus::prelude::*;
use portfolio_core::SessionEvent;
use tokio::sync::broadcast::error::RecvError;
use tracing::info;

const LOG_TARGET: &str = "portfolio::bridge";

/// Log every session event.
///
/// Rendering does not depend on this: components re-render from the session
/// signal directly. This keeps a readable trail of what the user did.
pub fn use_session_event_log(session: Signal<PortfolioSession>) {
    use_future(move || async move {
        let mut rx = session.read().subscribe();

        loop {
            match rx.recv().await {
                Ok(event) => log_session_event(&event),
                Err(RecvError::Closed) => {
                    info!(target: LOG_TARGET, "Session event channel closed");
                    break;
                }
                Err(RecvError::Lagged(n)) => {
                    info!(target: LOG_TARGET, "Missed {} session events", n);
                }
            }
        }
    });
}

fn log_session_event(event: &SessionEvent) {
    match event {
        SessionEvent::NavigationChanged { section, view } => {
            info!(target: LOG_TARGET, "Now showing {view} ({section:?} section)");
        }
        SessionEvent::SongChanged {
            track_id,
            song_index,
            is_playing,
        } => {
            info!(
                target: LOG_TARGET,
                "Song changed: {track_id}[{song_index}] ({})",
                if *is_playing { "playing" } else { "paused" }
            );
        }
        SessionEvent::PlaybackToggled { is_playing } => {
            info!(
                target: LOG_TARGET,
                "Playback {}",
                if *is_playing { "resumed" } else { "paused" }
            );
        }
        SessionEvent::VideoOpened { video_id } => {
            info!(target: LOG_TARGET, "Video opened: {video_id}");
        }
        SessionEvent::VideoClosed => {
            info!(target: LOG_TARGET, "Video closed");
        }
    }
}
