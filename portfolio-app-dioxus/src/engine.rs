//! `PlayerEngine` backed by the webview's media elements.

use dioxus::prelude::*;
use portfolio_core::{EngineError, MediaKind, PlayerEngine};
use tracing::debug;

const LOG_TARGET: &str = "portfolio::engine";

/// DOM id of the always-mounted `<audio>` element
pub const AUDIO_ELEMENT_ID: &str = "portfolio-audio";
/// DOM id of the always-mounted `<video>` element inside the modal
pub const VIDEO_ELEMENT_ID: &str = "portfolio-video";

/// Sends commands to a `<audio>`/`<video>` element through `document::eval`.
///
/// Commands are fire-and-forget. A rejected `play()` promise is caught on the
/// JS side, so autoplay blocks never surface here.
#[derive(Debug, Clone)]
pub struct WebviewEngine {
    kind: MediaKind,
    element_id: &'static str,
}

impl WebviewEngine {
    #[must_use]
    pub const fn audio() -> Self {
        Self {
            kind: MediaKind::Audio,
            element_id: AUDIO_ELEMENT_ID,
        }
    }

    #[must_use]
    pub const fn video() -> Self {
        Self {
            kind: MediaKind::Video,
            element_id: VIDEO_ELEMENT_ID,
        }
    }

    fn run(&self, body: &str) {
        let script = format!(
            "const el = document.getElementById({id}); if (el) {{ {body} }}",
            id = js_string(self.element_id)
        );
        debug!(target: LOG_TARGET, "{}: {body}", self.kind);
        let _ = document::eval(&script);
    }
}

impl PlayerEngine for WebviewEngine {
    fn kind(&self) -> MediaKind {
        self.kind
    }

    fn load(&mut self, locator: &str) -> Result<(), EngineError> {
        self.run(&format!("el.src = {}; el.load();", js_string(locator)));
        Ok(())
    }

    fn play(&mut self) -> Result<(), EngineError> {
        self.run("el.play().catch(() => {});");
        Ok(())
    }

    fn pause(&mut self) {
        self.run("el.pause();");
    }

    fn seek(&mut self, position_secs: f64) {
        self.run(&format!("el.currentTime = {position_secs};"));
    }

    fn set_volume(&mut self, volume: f32) {
        self.run(&format!("el.volume = {volume};"));
    }

    fn set_muted(&mut self, muted: bool) {
        self.run(&format!("el.muted = {muted};"));
    }
}

/// Ask the element for `[currentTime, duration]`.
///
/// Returns `None` if the element is missing or the webview does not answer.
pub async fn read_media_time(element_id: &str) -> Option<(f64, f64)> {
    let script = format!(
        "const el = document.getElementById({id}); \
         return el ? [el.currentTime || 0, el.duration || 0] : null;",
        id = js_string(element_id)
    );
    let value = document::eval(&script).await.ok()?;
    serde_json::from_value::<Option<(f64, f64)>>(value).ok().flatten()
}

/// Quote a Rust string as a JS string literal
fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}
