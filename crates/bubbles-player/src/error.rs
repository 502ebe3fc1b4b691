//! Error types for bubbles-player.

use thiserror::Error;

/// Result type for bubbles-player operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or driving playback.
#[derive(Debug, Error)]
pub enum Error {
    /// Resetting mid-playback would corrupt the order model.
    #[error("cannot reset while playback is running")]
    ResetWhilePlaying,

    /// The presentation dropped a swap transition before signalling completion.
    #[error("swap transition for ({i}, {j}) was dropped before it completed")]
    TransitionDropped { i: usize, j: usize },

    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Configuration JSON could not be parsed.
    #[error("configuration JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Event sequence or value generation error.
    #[error(transparent)]
    Steps(#[from] bubbles_steps::Error),

    /// The playback task panicked or was cancelled.
    #[error("playback task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
