use crate::state::AppState;
use dioxus::prelude::*;
use portfolio_core::Folder;
use std::sync::Arc;

/// Grid of every folder in the catalog.
#[component]
pub fn FolderGrid() -> Element {
    let state = use_context::<AppState>();
    let folders: Vec<Arc<Folder>> = state.session.read().catalog().folders().to_vec();

    rsx! {
        div {
            class: "folder-grid",
            for (index, folder) in folders.into_iter().enumerate() {
                FolderCard { key: "{folder.id}", folder, delay_ms: index * 80 }
            }
        }
    }
}

#[component]
fn FolderCard(folder: Arc<Folder>, delay_ms: usize) -> Element {
    let mut state = use_context::<AppState>();
    let folder_id = folder.id.clone();
    let track_count = folder.tracks.len();

    rsx! {
        div {
            class: "folder-card fade-in-up",
            style: "animation-delay: {delay_ms}ms;",
            onclick: move |_| state.open_folder(&folder_id),

            div {
                class: "cover-grid",
                for (i, image) in folder.cover_grid().iter().enumerate() {
                    img { key: "{i}", src: "{image}", alt: "" }
                }
            }

            div {
                class: "card-info",
                h3 { "{folder.name}" }
                p { class: "muted small", "{folder.artist} · {track_count} tracks" }
            }
        }
    }
}
