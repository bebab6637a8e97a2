use crate::state::AppState;
use dioxus::prelude::*;
use portfolio_core::Track;
use std::sync::Arc;

/// Tracks of the selected folder.
#[component]
pub fn TrackList() -> Element {
    let state = use_context::<AppState>();
    let tracks: Vec<Arc<Track>> = state
        .session
        .read()
        .navigation()
        .selected_folder()
        .map(|f| f.tracks.clone())
        .unwrap_or_default();

    rsx! {
        div {
            class: "track-grid",
            for (index, track) in tracks.into_iter().enumerate() {
                TrackCard { key: "{track.id}", track, delay_ms: index * 80 }
            }
        }
    }
}

#[component]
fn TrackCard(track: Arc<Track>, delay_ms: usize) -> Element {
    let mut state = use_context::<AppState>();
    let is_playing = {
        let session = state.session.read();
        let playback = session.playback();
        playback.is_active_track(&track.id) && playback.is_playing()
    };

    let open_id = track.id.clone();
    let play_id = track.id.clone();

    rsx! {
        div {
            class: "track-card fade-in-up",
            style: "animation-delay: {delay_ms}ms;",
            onclick: move |_| state.open_track(&open_id),

            div {
                class: "cover",
                img { src: "{track.cover_image}", alt: "{track.title}" }

                button {
                    class: if is_playing { "play-button playing" } else { "play-button" },
                    title: if is_playing { "Pause" } else { "Play" },
                    onclick: move |evt: MouseEvent| {
                        evt.stop_propagation();
                        state.play(&play_id, 0);
                    },
                    if is_playing { "❚❚" } else { "▶" }
                }
            }

            div {
                class: "card-info",
                h3 { "{track.title}" }
                p { class: "muted small", "{track.artist}" }
            }
        }
    }
}
