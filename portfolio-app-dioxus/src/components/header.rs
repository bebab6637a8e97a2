use crate::state::AppState;
use dioxus::prelude::*;
use portfolio_core::{Section, UiConfig};

/// Fixed header: back button, section toggle and page title.
#[component]
pub fn Header() -> Element {
    let mut state = use_context::<AppState>();
    let ui = use_context::<UiConfig>();

    let (section, title, shows_back) = {
        let session = state.session.read();
        let nav = session.navigation();
        (nav.section(), nav.page_title(), nav.shows_back())
    };

    let toggle_class = |target: Section| {
        if section == target {
            "section-toggle active"
        } else {
            "section-toggle"
        }
    };

    rsx! {
        header {
            class: "header",

            div {
                class: "header-left",

                if shows_back {
                    button {
                        class: "round-button",
                        title: "Go back",
                        onclick: move |_| state.go_back(),
                        "←"
                    }
                }

                div {
                    class: "section-toggles",
                    button {
                        class: toggle_class(Section::Audio),
                        onclick: move |_| state.select_section(Section::Audio),
                        "[u]"
                    }
                    span { class: "muted", "/" }
                    button {
                        class: toggle_class(Section::Video),
                        onclick: move |_| state.select_section(Section::Video),
                        "[s]"
                    }
                }

                div {
                    class: "page-title",
                    h1 { "{title}" }
                    span { class: "muted small", "{ui.artist_label}" }
                }
            }
        }
    }
}
