//! Which view is on screen and what the user has drilled into.
//!
//! The audio section is a depth-3 tree (folders, tracks, track detail) and the
//! video gallery is a single sibling view, so back-navigation only ever goes
//! one level up and no history is kept.

use crate::catalog::{Folder, Track};
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Title shown on the folder list
pub const PORTFOLIO_TITLE: &str = "portfolio";
/// Fallback title for a track list without a folder
pub const TRACKS_TITLE: &str = "tracks";
/// Fallback title for a track detail without a track
pub const TRACK_TITLE: &str = "track";
/// Title shown on the video gallery
pub const SFX_TITLE: &str = "sfx work";

/// Top-level section toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    #[default]
    Audio,
    Video,
}

/// The view currently rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    FolderList,
    TrackList,
    TrackDetail,
    VideoGallery,
}

impl View {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FolderList => "folder list",
            Self::TrackList => "track list",
            Self::TrackDetail => "track detail",
            Self::VideoGallery => "video gallery",
        }
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Navigation state. Every transition returns a new value; the old one is untouched.
///
/// Invariants: the track list always has a folder selected, the track detail
/// always has a track selected, and the video gallery only appears in the
/// video section.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavigationState {
    section: Section,
    view: View,
    selected_folder: Option<Arc<Folder>>,
    selected_track: Option<Arc<Track>>,
}

impl NavigationState {
    /// Start of a session: folder list in the audio section, nothing selected
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn section(&self) -> Section {
        self.section
    }

    #[must_use]
    pub const fn view(&self) -> View {
        self.view
    }

    #[must_use]
    pub const fn selected_folder(&self) -> Option<&Arc<Folder>> {
        self.selected_folder.as_ref()
    }

    #[must_use]
    pub const fn selected_track(&self) -> Option<&Arc<Track>> {
        self.selected_track.as_ref()
    }

    /// Switch sections.
    ///
    /// Entering the video section keeps the audio selection in memory but shows
    /// the gallery. Entering the audio section always lands on the folder list
    /// with the selection cleared; there is no resuming a previous drill-down.
    #[must_use]
    pub fn select_section(&self, target: Section) -> Self {
        match target {
            Section::Video => Self {
                section: Section::Video,
                view: View::VideoGallery,
                ..self.clone()
            },
            Section::Audio => Self::new(),
        }
    }

    /// Drill into a folder from the folder list.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] unless the folder list is showing.
    pub fn open_folder(&self, folder: Arc<Folder>) -> Result<Self> {
        if self.view != View::FolderList {
            return Err(CoreError::InvalidTransition {
                from: self.view,
                action: "open a folder",
            });
        }
        Ok(Self {
            view: View::TrackList,
            selected_folder: Some(folder),
            ..self.clone()
        })
    }

    /// Drill into a track from the track list.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] unless the track list is showing,
    /// and [`CoreError::InvalidSelection`] if the track is not in the selected folder.
    pub fn open_track(&self, track: Arc<Track>) -> Result<Self> {
        if self.view != View::TrackList {
            return Err(CoreError::InvalidTransition {
                from: self.view,
                action: "open a track",
            });
        }
        let belongs = self
            .selected_folder
            .as_ref()
            .is_some_and(|folder| folder.contains_track(&track.id));
        if !belongs {
            return Err(CoreError::InvalidSelection {
                reason: format!("track {} is not in the selected folder", track.id),
            });
        }
        Ok(Self {
            view: View::TrackDetail,
            selected_track: Some(track),
            ..self.clone()
        })
    }

    /// Go up one level. A no-op on the folder list.
    #[must_use]
    pub fn go_back(&self) -> Self {
        match self.view {
            View::TrackDetail => Self {
                view: View::TrackList,
                selected_track: None,
                ..self.clone()
            },
            View::TrackList => Self {
                view: View::FolderList,
                selected_folder: None,
                ..self.clone()
            },
            // Same landing spot as switching sections: nothing stays selected
            View::VideoGallery => Self::new(),
            View::FolderList => self.clone(),
        }
    }

    /// Title for the header
    #[must_use]
    pub fn page_title(&self) -> String {
        match self.view {
            View::FolderList => PORTFOLIO_TITLE.to_string(),
            View::TrackList => self
                .selected_folder
                .as_ref()
                .map_or_else(|| TRACKS_TITLE.to_string(), |f| f.name.clone()),
            View::TrackDetail => self
                .selected_track
                .as_ref()
                .map_or_else(|| TRACK_TITLE.to_string(), |t| t.title.clone()),
            View::VideoGallery => SFX_TITLE.to_string(),
        }
    }

    /// Whether the header offers a back button
    #[must_use]
    pub fn shows_back(&self) -> bool {
        self.view != View::FolderList || self.section == Section::Video
    }
}
