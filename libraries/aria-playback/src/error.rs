//! Error types for the fallible edges of the playback engine
//!
//! The store itself never fails: malformed input degrades to defaults or
//! no-ops. Errors only surface from catalog loading, configuration and the
//! playback device.

use thiserror::Error;

/// Playback engine errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Catalog JSON could not be parsed or is missing required fields
    #[error("Catalog parse error: {0}")]
    CatalogParse(#[from] serde_json::Error),

    /// Two catalog entries share the same id
    #[error("Duplicate track id in catalog: {0}")]
    DuplicateTrackId(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    /// Configuration loaded but failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Playback device reported a failure
    #[error("Device error: {0}")]
    Device(#[from] DeviceError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure reported by a [`PlaybackDevice`](crate::PlaybackDevice)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    /// The device refused to start playback (e.g. not allowed without a user gesture)
    #[error("start of playback rejected: {0}")]
    PlayRejected(String),

    /// The source locator could not be loaded
    #[error("failed to load source {source_locator}: {reason}")]
    Load {
        source_locator: String,
        reason: String,
    },
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
