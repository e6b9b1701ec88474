//! Error types for the orbit crate

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for orbit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while setting up or driving the demo
#[derive(Debug, Error)]
pub enum Error {
    /// Orbit layout cannot be turned into a body arena
    #[error("Invalid orbit layout: {0}")]
    InvalidLayout(String),

    /// Parameter channel is at capacity; the change was dropped
    #[error("Parameter channel full (capacity {capacity})")]
    QueueFull { capacity: usize },

    /// Receiving side of the parameter channel is gone
    #[error("Parameter channel disconnected")]
    Disconnected,

    /// Config file could not be read
    #[error("Failed to read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid RON for [`crate::DemoConfig`]
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] ron::error::SpannedError),
}
