//! Error types for the album player

use thiserror::Error;

/// Player errors
#[derive(Debug, Error)]
pub enum PlayerError {
    /// Requested track is outside the playlist
    #[error("Track index {index} out of range for {count} tracks")]
    TrackOutOfRange { index: usize, count: usize },

    /// Key-value storage rejected a write
    #[error("Storage error: {0}")]
    Storage(String),

    /// Player config could not be parsed
    #[error("Invalid player config: {0}")]
    Config(#[from] serde_json::Error),

    /// A required page element is missing
    #[error("Missing element: {0}")]
    MissingElement(String),
}

/// Result type for player operations
pub type Result<T> = std::result::Result<T, PlayerError>;
