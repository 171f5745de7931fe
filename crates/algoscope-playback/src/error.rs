//! Error types for algoscope-playback.

use thiserror::Error;

/// Result type for playback operations.
pub type Result<T> = std::result::Result<T, PlaybackError>;

/// Errors raised when playback has to (re)generate its trace.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// Play or step was requested with no trace and no registered source.
    #[error("no trace loaded and no trace source registered")]
    NoTrace,

    /// The trace source could not build a trace from the current structure.
    #[error(transparent)]
    Source(#[from] algoscope_core::Error),
}
