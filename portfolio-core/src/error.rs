use crate::navigation::View;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    // Configuration errors
    #[error("Config file not found at {path}. A template has been created.")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid config: {message}")]
    ConfigInvalid { message: String },

    #[error("Failed to parse config file: {0}")]
    ConfigParseError(#[from] toml::de::Error),

    // Catalog errors
    #[error("Invalid catalog: {message}")]
    CatalogInvalid { message: String },

    #[error("No {kind} with id {id}")]
    UnknownId { kind: &'static str, id: String },

    // Caller bugs: the core refuses the call instead of corrupting state
    #[error("Invalid selection: {reason}")]
    InvalidSelection { reason: String },

    #[error("Cannot {action} from the {from} view")]
    InvalidTransition { from: View, action: &'static str },

    // IO errors
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Failures reported by a player engine.
///
/// These never reach the navigation layer: the controllers log and drop them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Playback was rejected: {reason}")]
    PlaybackRejected { reason: String },

    #[error("Failed to load {locator}: {reason}")]
    LoadFailed { locator: String, reason: String },
}

pub type Result<T> = std::result::Result<T, CoreError>;
