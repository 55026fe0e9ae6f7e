//! Error types for meeting segmentation runs.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for segmentation and evaluation.
///
/// Every variant is fatal for the meeting being processed: no partial
/// segmentation is ever returned alongside an error.
#[derive(Error, Debug)]
pub enum SegmentError {
    /// Requested segment count is outside `[1, n]`.
    #[error("Invalid segment count: K={k} must be within [1, {n}]")]
    InvalidK {
        /// The requested number of segments.
        k: usize,
        /// The number of utterances in the meeting.
        n: usize,
    },

    /// The embedding source failed or returned unusable vectors.
    #[error("Embeddings unavailable: {0}")]
    EmbeddingUnavailable(String),

    /// The meeting has no utterances.
    #[error("Empty meeting: {0}")]
    EmptyMeeting(String),

    /// Reference boundaries are out of range or not strictly increasing.
    #[error("Invalid reference segmentation: {0}")]
    InvalidReference(String),

    /// A segmentation covers a different number of utterances than its meeting.
    #[error("Length mismatch: segmentation covers {found} utterances, expected {expected}")]
    LengthMismatch {
        /// Number of utterances in the meeting.
        expected: usize,
        /// Number of utterances the segmentation covers.
        found: usize,
    },

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for segmentation operations.
pub type Result<T> = std::result::Result<T, SegmentError>;

impl From<serde_json::Error> for SegmentError {
    fn from(err: serde_json::Error) -> Self {
        SegmentError::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for SegmentError {
    fn from(err: reqwest::Error) -> Self {
        SegmentError::EmbeddingUnavailable(err.to_string())
    }
}
