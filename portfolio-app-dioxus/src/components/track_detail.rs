use crate::state::AppState;
use dioxus::prelude::*;

/// Cover, summary and song list of the selected track.
#[component]
pub fn TrackDetail() -> Element {
    let mut state = use_context::<AppState>();

    let (track, active_index, is_playing) = {
        let session = state.session.read();
        let Some(track) = session.navigation().selected_track().cloned() else {
            return rsx! {};
        };
        let playback = session.playback();
        let active_index = playback
            .is_active_track(&track.id)
            .then(|| playback.active_song_index());
        (track, active_index, playback.is_playing())
    };

    let track_playing = active_index.is_some() && is_playing;
    let summary = track.summary();
    let header_id = track.id.clone();

    rsx! {
        div {
            class: "track-detail fade-in-up",

            div {
                class: "track-header",
                img { class: "track-cover", src: "{track.cover_image}", alt: "{track.title}" }

                div {
                    class: "track-meta",
                    p { class: "muted small", "track" }
                    h2 { "{track.title}" }
                    p { class: "muted", "{summary}" }

                    button {
                        class: if track_playing { "play-button large playing" } else { "play-button large" },
                        title: if track_playing { "Pause" } else { "Play" },
                        onclick: move |_| state.play(&header_id, 0),
                        if track_playing { "❚❚" } else { "▶" }
                    }
                }
            }

            div {
                class: "song-list",
                for (index, song) in track.songs.iter().enumerate() {
                    {
                        let current = active_index == Some(index);
                        let number = index + 1;
                        let row_id = track.id.clone();
                        rsx! {
                            div {
                                key: "{song.id}",
                                class: if current { "song-row current" } else { "song-row" },
                                onclick: move |_| state.play(&row_id, index),

                                span {
                                    class: "song-index",
                                    if current && is_playing { "♪" } else { "{number}" }
                                }
                                span { class: "song-title", "{song.title}" }
                                span { class: "muted small", "{song.duration}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
