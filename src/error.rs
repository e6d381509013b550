//! Error types for the castle crate.
//!
//! Board, history and drag operations are infallible: absent ids and stray
//! events are no-ops. Errors only come from the edges of the crate, namely
//! settings I/O, reference image probing, file watching and replay scripts.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur at the I/O boundary of the crate
#[derive(Error, Debug)]
pub enum CastleError {
    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error from serde_json
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reference illustration could not be decoded
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Settings file watcher failed
    #[error("Watch error: {0}")]
    Watch(#[from] notify::Error),

    /// Atomic save could not move the temp file into place
    #[error("Could not persist {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Replay script is structurally valid JSON but semantically wrong
    #[error("Invalid script: {0}")]
    InvalidScript(String),
}

/// Result type alias for castle operations
pub type CastleResult<T> = Result<T, CastleError>;
