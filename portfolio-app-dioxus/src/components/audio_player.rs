use crate::engine::{read_media_time, AUDIO_ELEMENT_ID};
use crate::state::AppState;
use dioxus::prelude::*;
use portfolio_core::{format_clock, Direction};

/// Bottom bar for the active song: seek, transport, time and volume.
#[component]
pub fn AudioPlayer() -> Element {
    let mut state = use_context::<AppState>();

    let (track, song_title, is_playing, progress) = {
        let session = state.session.read();
        let playback = session.playback();
        let Some(track) = playback.active_track().cloned() else {
            return rsx! {};
        };
        let song_title = playback
            .active_song()
            .map(|s| s.title.clone())
            .unwrap_or_default();
        (track, song_title, playback.is_playing(), *session.audio().progress())
    };

    let max = progress.duration_secs.max(0.0);
    let current = format_clock(progress.current_secs);
    let total = format_clock(progress.duration_secs);
    let volume_pct = (progress.volume * 100.0).round();

    rsx! {
        div {
            class: "audio-player",

            input {
                class: "seek-bar",
                r#type: "range",
                min: "0",
                max: "{max}",
                step: "0.1",
                value: "{progress.current_secs}",
                oninput: move |evt: FormEvent| {
                    if let Ok(position) = evt.value().parse::<f64>() {
                        state.seek_audio(position);
                    }
                },
            }

            div {
                class: "player-row",

                div {
                    class: "now-playing",
                    img { src: "{track.cover_image}", alt: "{track.title}" }
                    div {
                        p { class: "song-title", "{song_title}" }
                        p { class: "muted small", "{track.artist}" }
                    }
                }

                div {
                    class: "transport",
                    button {
                        class: "round-button",
                        title: "Previous",
                        onclick: move |_| state.advance(Direction::Previous),
                        "⏮"
                    }
                    button {
                        class: if is_playing { "play-button playing" } else { "play-button" },
                        title: if is_playing { "Pause" } else { "Play" },
                        onclick: move |_| state.pause_resume(),
                        if is_playing { "❚❚" } else { "▶" }
                    }
                    button {
                        class: "round-button",
                        title: "Next",
                        onclick: move |_| state.advance(Direction::Next),
                        "⏭"
                    }
                }

                div {
                    class: "time muted small",
                    "{current} / {total}"
                }

                div {
                    class: "volume",
                    span { class: "muted small", "vol" }
                    input {
                        r#type: "range",
                        min: "0",
                        max: "100",
                        value: "{volume_pct}",
                        oninput: move |evt: FormEvent| {
                            if let Ok(pct) = evt.value().parse::<f32>() {
                                state.set_audio_volume(pct / 100.0);
                            }
                        },
                    }
                }
            }
        }
    }
}

/// The `<audio>` element the audio engine drives.
///
/// Always mounted, hidden. Its media events feed back into the session.
#[component]
pub fn AudioElement() -> Element {
    let mut state = use_context::<AppState>();

    let sync_time = move || {
        spawn(async move {
            if let Some((current, duration)) = read_media_time(AUDIO_ELEMENT_ID).await {
                state.on_audio_time_update(current, duration);
            }
        });
    };

    rsx! {
        audio {
            id: AUDIO_ELEMENT_ID,
            class: "hidden",
            preload: "metadata",
            ontimeupdate: move |_| sync_time(),
            onloadedmetadata: move |_| sync_time(),
            onended: move |_| state.on_audio_ended(),
        }
    }
}
