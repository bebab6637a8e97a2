use crate::engine::{read_media_time, VIDEO_ELEMENT_ID};
use crate::state::AppState;
use dioxus::desktop::use_window;
use dioxus::prelude::*;
use portfolio_core::{format_clock, Video};
use std::sync::Arc;
use tracing::debug;

const LOG_TARGET: &str = "portfolio::sfx";

/// Flat grid of every clip in the catalog.
#[component]
pub fn SfxGallery() -> Element {
    let state = use_context::<AppState>();
    let videos: Vec<Arc<Video>> = state.session.read().catalog().videos().to_vec();

    rsx! {
        div {
            class: "sfx-grid",
            for (index, video) in videos.into_iter().enumerate() {
                SfxCard { key: "{video.id}", video, delay_ms: index * 60 }
            }
        }
    }
}

#[component]
fn SfxCard(video: Arc<Video>, delay_ms: usize) -> Element {
    let mut state = use_context::<AppState>();
    let video_id = video.id.clone();

    rsx! {
        div {
            class: "sfx-card fade-in-up",
            style: "animation-delay: {delay_ms}ms;",
            onclick: move |_| state.open_video(&video_id),

            div {
                class: "cover",
                img { src: "{video.thumbnail}", alt: "{video.title}" }
                span { class: "duration-badge", "{video.duration}" }
            }
            div {
                class: "card-info",
                h3 { "{video.title}" }
            }
        }
    }
}

/// Modal player for the open clip.
///
/// The `<video>` element stays mounted while the modal is closed so the
/// engine always has a target; closing only hides it.
#[component]
pub fn VideoModal() -> Element {
    let mut state = use_context::<AppState>();
    let window = use_window();

    let player = state.session.read().video_player().clone();
    let is_fullscreen = player.is_fullscreen();

    // Mirror the fullscreen flag onto the OS window
    use_effect(move || {
        let fullscreen = state.session.read().video_player().is_fullscreen();
        if window.fullscreen().is_some() != fullscreen {
            debug!(target: LOG_TARGET, "Window fullscreen: {fullscreen}");
            window.set_fullscreen(fullscreen);
        }
    });

    let sync_time = move || {
        spawn(async move {
            if let Some((current, duration)) = read_media_time(VIDEO_ELEMENT_ID).await {
                state.on_video_time_update(current, duration);
            }
        });
    };

    let title = player
        .video()
        .map(|v| v.title.clone())
        .unwrap_or_default();
    let duration = player
        .video()
        .map(|v| v.duration.clone())
        .unwrap_or_default();
    let current = format_clock(player.progress().current_secs);
    let percent = player.progress_percent();
    let is_playing = player.is_playing();
    let is_muted = player.is_muted();

    let overlay_class = match (player.is_open(), is_fullscreen) {
        (false, _) => "video-overlay hidden",
        (true, false) => "video-overlay",
        (true, true) => "video-overlay fullscreen",
    };

    rsx! {
        div {
            class: overlay_class,
            onclick: move |_| state.close_video(),

            div {
                class: "video-modal",
                onclick: move |evt: MouseEvent| evt.stop_propagation(),

                div {
                    class: "video-header",
                    h3 { "{title}" }
                    button {
                        class: "round-button",
                        title: "Close",
                        onclick: move |_| state.close_video(),
                        "✕"
                    }
                }

                video {
                    id: VIDEO_ELEMENT_ID,
                    class: "video-frame",
                    playsinline: true,
                    onclick: move |_| state.toggle_video_play(),
                    ontimeupdate: move |_| sync_time(),
                    onloadedmetadata: move |_| sync_time(),
                    onended: move |_| state.on_video_ended(),
                }

                div {
                    class: "video-progress",
                    div { class: "video-progress-fill", style: "width: {percent}%;" }
                }

                div {
                    class: "video-controls",
                    button {
                        class: "round-button",
                        title: if is_playing { "Pause" } else { "Play" },
                        onclick: move |_| state.toggle_video_play(),
                        if is_playing { "❚❚" } else { "▶" }
                    }
                    button {
                        class: "round-button",
                        title: if is_muted { "Unmute" } else { "Mute" },
                        onclick: move |_| state.toggle_video_mute(),
                        if is_muted { "🔇" } else { "🔊" }
                    }
                    span {
                        class: "muted small",
                        "{current} / {duration}"
                    }
                    button {
                        class: "round-button",
                        title: if is_fullscreen { "Exit fullscreen" } else { "Fullscreen" },
                        onclick: move |_| state.toggle_video_fullscreen(),
                        if is_fullscreen { "⤡" } else { "⤢" }
                    }
                }
            }
        }
    }
}
