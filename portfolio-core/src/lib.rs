pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod navigation;
pub mod paths;
pub mod playback;
pub mod session;
pub mod time;
pub mod video;

pub use catalog::{Catalog, Folder, Song, Track, Video, COVER_GRID_SIZE};
pub use config::{
    CatalogConfig, LoggingConfig, PlayerConfig, PortfolioConfig, UiConfig, WindowConfig,
    CONFIG_TEMPLATE,
};

/// Re-export toml error type for config parsing error handling
pub use toml::de::Error as TomlParseError;
pub use engine::{
    EngineCommand, MediaKind, MediaProgress, PlayerEngine, RecordingEngine, DEFAULT_VOLUME,
};
pub use error::{CoreError, EngineError, Result};
pub use navigation::{NavigationState, Section, View};
pub use paths::{config_dir, config_path, log_file_path, CONFIG_DIR_NAME, CONFIG_FILE_NAME};
pub use playback::{Direction, PlaybackChange, PlaybackController, PlaybackState};
pub use session::{Session, SessionEvent};
pub use time::format_clock;
pub use video::{VideoController, VideoPlayerState};
