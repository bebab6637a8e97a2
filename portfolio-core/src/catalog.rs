//! Read-only catalog of folders, tracks, songs and SFX videos.
//!
//! Records are built once and shared through [`Arc`], so navigation and
//! playback state point at catalog entries instead of copying them.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

const LOG_TARGET: &str = "portfolio::catalog";

/// Number of cover images shown in a folder's grid
pub const COVER_GRID_SIZE: usize = 4;

/// A single playable audio item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: String,
    pub title: String,
    /// Display duration, e.g. "3:45"
    pub duration: String,
    /// Playable media locator (URL)
    pub audio_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_at: Option<String>,
}

impl Song {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        duration: impl Into<String>,
        audio_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            duration: duration.into(),
            audio_url: audio_url.into(),
            added_at: None,
        }
    }

    #[must_use]
    pub fn with_added_at(mut self, added_at: impl Into<String>) -> Self {
        self.added_at = Some(added_at.into());
        self
    }
}

/// A named collection of songs sharing cover art
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub cover_image: String,
    pub songs: Vec<Song>,
    /// Aggregate display duration, e.g. "7m 24s"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Track {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
        cover_image: impl Into<String>,
        songs: Vec<Song>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            cover_image: cover_image.into(),
            songs,
            total_duration: None,
            created_at: None,
        }
    }

    #[must_use]
    pub fn with_total_duration(mut self, total_duration: impl Into<String>) -> Self {
        self.total_duration = Some(total_duration.into());
        self
    }

    #[must_use]
    pub fn with_created_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = Some(created_at.into());
        self
    }

    #[must_use]
    pub fn song_count(&self) -> usize {
        self.songs.len()
    }

    #[must_use]
    pub fn song(&self, index: usize) -> Option<&Song> {
        self.songs.get(index)
    }

    #[must_use]
    pub fn contains_song_index(&self, index: usize) -> bool {
        index < self.songs.len()
    }

    /// Header line for the track detail view, e.g. "justbenzo · 3 tracks · 7m 24s"
    #[must_use]
    pub fn summary(&self) -> String {
        let count = self.songs.len();
        let noun = if count == 1 { "track" } else { "tracks" };
        match &self.total_duration {
            Some(total) => format!("{} · {count} {noun} · {total}", self.artist),
            None => format!("{} · {count} {noun}", self.artist),
        }
    }
}

/// Top-level grouping of tracks in the audio section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    pub name: String,
    pub artist: String,
    #[serde(default)]
    pub cover_images: Vec<String>,
    #[serde(default)]
    pub tracks: Vec<Arc<Track>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Folder {
    /// Cover images shown in the folder grid (at most [`COVER_GRID_SIZE`])
    #[must_use]
    pub fn cover_grid(&self) -> &[String] {
        let end = self.cover_images.len().min(COVER_GRID_SIZE);
        &self.cover_images[..end]
    }

    #[must_use]
    pub fn contains_track(&self, track_id: &str) -> bool {
        self.tracks.iter().any(|t| t.id == track_id)
    }
}

/// A short clip in the flat SFX gallery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    pub video_url: String,
    /// Display duration, e.g. "0:15"
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    folders: Vec<Arc<Folder>>,
    #[serde(default)]
    videos: Vec<Arc<Video>>,
}

/// Immutable collection of every folder and video
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    folders: Vec<Arc<Folder>>,
    videos: Vec<Arc<Video>>,
}

impl Catalog {
    /// Build a catalog, checking that ids are unique and no track is empty.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::CatalogInvalid`] describing the first problem found.
    pub fn new(folders: Vec<Arc<Folder>>, videos: Vec<Arc<Video>>) -> Result<Self> {
        let catalog = Self { folders, videos };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse a catalog from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or the catalog fails validation.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content).map_err(|e| CoreError::CatalogInvalid {
            message: e.to_string(),
        })?;
        Self::new(file.folders, file.videos)
    }

    /// Load a catalog from a TOML file on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&content)?;
        info!(
            target: LOG_TARGET,
            "Loaded catalog from {}: {} folder(s), {} video(s)",
            path.display(),
            catalog.folders.len(),
            catalog.videos.len()
        );
        Ok(catalog)
    }

    fn validate(&self) -> Result<()> {
        let mut folder_ids = HashSet::new();
        let mut track_ids = HashSet::new();
        for folder in &self.folders {
            if !folder_ids.insert(folder.id.as_str()) {
                return Err(invalid(format!("duplicate folder id {}", folder.id)));
            }
            for track in &folder.tracks {
                if !track_ids.insert(track.id.as_str()) {
                    return Err(invalid(format!("duplicate track id {}", track.id)));
                }
                if track.songs.is_empty() {
                    return Err(invalid(format!("track {} has no songs", track.id)));
                }
            }
        }

        let mut video_ids = HashSet::new();
        for video in &self.videos {
            if !video_ids.insert(video.id.as_str()) {
                return Err(invalid(format!("duplicate video id {}", video.id)));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn folders(&self) -> &[Arc<Folder>] {
        &self.folders
    }

    #[must_use]
    pub fn videos(&self) -> &[Arc<Video>] {
        &self.videos
    }

    #[must_use]
    pub fn folder_by_id(&self, id: &str) -> Option<&Arc<Folder>> {
        self.folders.iter().find(|f| f.id == id)
    }

    /// Find a track in any folder
    #[must_use]
    pub fn track_by_id(&self, id: &str) -> Option<&Arc<Track>> {
        self.folders
            .iter()
            .flat_map(|f| f.tracks.iter())
            .find(|t| t.id == id)
    }

    #[must_use]
    pub fn video_by_id(&self, id: &str) -> Option<&Arc<Video>> {
        self.videos.iter().find(|v| v.id == id)
    }

    /// The folder that owns the given track
    #[must_use]
    pub fn folder_of_track(&self, track_id: &str) -> Option<&Arc<Folder>> {
        self.folders.iter().find(|f| f.contains_track(track_id))
    }

    /// The built-in portfolio shipped with the app.
    #[must_use]
    pub fn sample() -> Self {
        Self {
            folders: vec![
                Arc::new(Folder {
                    id: "folder-1".into(),
                    name: "miscellaneous".into(),
                    artist: ARTIST.into(),
                    cover_images: vec![
                        art::GRADIENT.into(),
                        art::CITY.into(),
                        art::ABSTRACT.into(),
                        art::SPACE.into(),
                    ],
                    tracks: miscellaneous_tracks(),
                    created_at: Some("2024-01-01".into()),
                }),
                Arc::new(Folder {
                    id: "folder-2".into(),
                    name: "Liminal".into(),
                    artist: ARTIST.into(),
                    cover_images: vec![
                        art::POOL.into(),
                        art::GRASS.into(),
                        art::DESERT.into(),
                        art::DOORWAY.into(),
                    ],
                    tracks: liminal_tracks(),
                    created_at: Some("2023-12-01".into()),
                }),
            ],
            videos: sfx_videos(),
        }
    }
}

fn invalid(message: String) -> CoreError {
    CoreError::CatalogInvalid { message }
}

const ARTIST: &str = "justbenzo";

const SAMPLE_MP3_URL: &str = "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-1.mp3";
const SAMPLE_MP3_URL_2: &str = "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-2.mp3";
const SAMPLE_MP3_URL_3: &str = "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-3.mp3";
const SAMPLE_VIDEO_URL: &str =
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4";

mod art {
    pub const POOL: &str =
        "https://images.unsplash.com/photo-1576013551627-0cc20b96c2a7?w=400&h=400&fit=crop";
    pub const DESERT: &str =
        "https://images.unsplash.com/photo-1509316785289-025f5b846b35?w=400&h=400&fit=crop";
    pub const DOORWAY: &str =
        "https://images.unsplash.com/photo-1518837695005-2083093ee35b?w=400&h=400&fit=crop";
    pub const MUSHROOMS: &str =
        "https://images.unsplash.com/photo-1518882605630-8eb565f5e673?w=400&h=400&fit=crop";
    pub const GRASS: &str =
        "https://images.unsplash.com/photo-1558618666-fcd25c85cd64?w=400&h=400&fit=crop";
    pub const SPACE: &str =
        "https://images.unsplash.com/photo-1419242902214-272b3f66ee7a?w=400&h=400&fit=crop";
    pub const ABSTRACT: &str =
        "https://images.unsplash.com/photo-1550684848-fac1c5b4e853?w=400&h=400&fit=crop";
    pub const GRADIENT: &str =
        "https://images.unsplash.com/photo-1557682250-33bd709cbe85?w=400&h=400&fit=crop";
    pub const CITY: &str =
        "https://images.unsplash.com/photo-1514565131-fce0801e5785?w=400&h=400&fit=crop";

    pub const SFX_1: &str = "https://files.catbox.moe/sq8dhd.mp4";
    pub const SFX_2: &str =
        "https://images.unsplash.com/photo-1511379938547-c1f69419868d?w=640&h=360&fit=crop";
    pub const SFX_3: &str =
        "https://images.unsplash.com/photo-1598488035139-bdbb2231ce04?w=640&h=360&fit=crop";
    pub const SFX_4: &str =
        "https://images.unsplash.com/photo-1516280440614-6697288d5d38?w=640&h=360&fit=crop";
}

fn track(
    id: &str,
    title: &str,
    cover: &str,
    total: &str,
    created: &str,
    songs: Vec<Song>,
) -> Arc<Track> {
    Arc::new(
        Track::new(id, title, ARTIST, cover, songs)
            .with_total_duration(total)
            .with_created_at(created),
    )
}

fn liminal_tracks() -> Vec<Arc<Track>> {
    vec![
        track(
            "track-1",
            "a comforting enclosure",
            art::POOL,
            "7m 24s",
            "2024-01-15",
            vec![
                Song::new("song-1-1", "a comforting enclosure", "7:24", SAMPLE_MP3_URL)
                    .with_added_at("27 minutes ago"),
                Song::new("song-1-2", "submerged memories", "4:12", SAMPLE_MP3_URL_2),
                Song::new("song-1-3", "floating dreams", "3:45", SAMPLE_MP3_URL_3),
            ],
        ),
        track(
            "track-2",
            "don't believe the grass",
            art::GRASS,
            "5m 18s",
            "2024-01-10",
            vec![
                Song::new("song-2-1", "don't believe the grass", "5:18", SAMPLE_MP3_URL_2),
                Song::new("song-2-2", "whispers in the wind", "3:33", SAMPLE_MP3_URL_3),
            ],
        ),
        track(
            "track-3",
            "beware the sand",
            art::DESERT,
            "6m 42s",
            "2024-01-05",
            vec![
                Song::new("song-3-1", "beware the sand", "6:42", SAMPLE_MP3_URL_3),
                Song::new("song-3-2", "desert winds", "4:20", SAMPLE_MP3_URL),
                Song::new("song-3-3", "mirage", "2:55", SAMPLE_MP3_URL_2),
            ],
        ),
        track(
            "track-4",
            "space hides in tall grass",
            art::DOORWAY,
            "8m 15s",
            "2024-01-01",
            vec![
                Song::new("song-4-1", "space hides in tall grass", "8:15", SAMPLE_MP3_URL),
                Song::new("song-4-2", "cosmic doorway", "5:30", SAMPLE_MP3_URL_2),
            ],
        ),
        track(
            "track-5",
            "the water holds memories",
            art::MUSHROOMS,
            "4m 56s",
            "2023-12-20",
            vec![
                Song::new("song-5-1", "the water holds memories", "4:56", SAMPLE_MP3_URL_2),
                Song::new("song-5-2", "underwater garden", "3:22", SAMPLE_MP3_URL_3),
                Song::new("song-5-3", "fungal dreams", "2:48", SAMPLE_MP3_URL),
            ],
        ),
    ]
}

fn miscellaneous_tracks() -> Vec<Arc<Track>> {
    vec![
        track(
            "track-m1",
            "neon reflections",
            art::CITY,
            "5m 30s",
            "2024-02-01",
            vec![Song::new("song-m1-1", "neon reflections", "5:30", SAMPLE_MP3_URL)],
        ),
        track(
            "track-m2",
            "abstract thoughts",
            art::ABSTRACT,
            "3m 45s",
            "2024-01-25",
            vec![Song::new("song-m2-1", "abstract thoughts", "3:45", SAMPLE_MP3_URL_2)],
        ),
    ]
}

fn video(
    id: &str,
    title: &str,
    thumbnail: &str,
    url: &str,
    duration: &str,
    created: &str,
) -> Arc<Video> {
    Arc::new(Video {
        id: id.into(),
        title: title.into(),
        thumbnail: thumbnail.into(),
        video_url: url.into(),
        duration: duration.into(),
        created_at: Some(created.into()),
    })
}

fn sfx_videos() -> Vec<Arc<Video>> {
    vec![
        video("sfx-1", "Ambient Drone Texture", art::SFX_1, art::SFX_1, "0:15", "2024-02-01"),
        video("sfx-2", "Cinematic Impact", art::SFX_2, SAMPLE_VIDEO_URL, "0:08", "2024-01-28"),
        video("sfx-3", "Synth Wave Pulse", art::SFX_3, SAMPLE_VIDEO_URL, "0:12", "2024-01-25"),
        video("sfx-4", "Atmospheric Layer", art::SFX_4, SAMPLE_VIDEO_URL, "0:20", "2024-01-20"),
        video("sfx-5", "Glitch Transition", art::SFX_1, SAMPLE_VIDEO_URL, "0:05", "2024-01-15"),
        video("sfx-6", "Bass Drop", art::SFX_2, SAMPLE_VIDEO_URL, "0:10", "2024-01-10"),
    ]
}
