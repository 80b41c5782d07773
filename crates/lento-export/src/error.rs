//! Error types for lento-export

use std::io;
use thiserror::Error;

/// Export error type
#[derive(Error, Debug)]
pub enum ExportError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Unsupported format or feature not enabled
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Invalid audio data
    #[error("Invalid audio data: {0}")]
    InvalidData(String),

    /// The external transcoding engine could not be loaded
    #[error("Failed to load transcoding engine: {0}")]
    EngineLoad(String),

    /// The external transcoding engine ran but failed
    #[error("Transcoding failed: {0}")]
    Transcode(String),
}

/// Result type for export operations
pub type Result<T> = std::result::Result<T, ExportError>;

// From impl for the WAV codec's error at the API boundary; hound errors
// are I/O-shaped once the spec has been validated.
impl From<hound::Error> for ExportError {
    fn from(e: hound::Error) -> Self {
        ExportError::Io(io::Error::other(e))
    }
}
