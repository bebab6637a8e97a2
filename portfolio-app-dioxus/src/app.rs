use crate::components::{
    AudioElement, AudioPlayer, FolderGrid, Header, SfxGallery, TrackDetail, TrackList, VideoModal,
};
use crate::state::AppState;
use dioxus::prelude::*;
use portfolio_core::View;

/// Root application component.
///
/// Picks the content for the current view. The media elements are mounted
/// once here so the engines always have a target, whatever is on screen.
#[component]
pub fn App() -> Element {
    let state = use_context::<AppState>();
    let session = state.session.read();
    let view = session.navigation().view();
    let has_active_track = session.playback().active_track().is_some();

    rsx! {
        div {
            class: "app",

            Header {}

            main {
                class: "content",
                match view {
                    View::FolderList => rsx! { FolderGrid {} },
                    View::TrackList => rsx! { TrackList {} },
                    View::TrackDetail => rsx! { TrackDetail {} },
                    View::VideoGallery => rsx! { SfxGallery {} },
                }
            }

            if has_active_track {
                AudioPlayer {}
            }

            AudioElement {}
            VideoModal {}
        }
    }
}
