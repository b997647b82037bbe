//! Error types for Pulse2JACK core.

use thiserror::Error;

/// Core error type for bridge list operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Malformed bridge record {line:?}: expected 4 fields, found {fields}")]
    MalformedRecord { line: String, fields: usize },

    #[error("Invalid channel count {value:?} (must be a positive integer)")]
    InvalidChannelCount { value: String },

    #[error("Invalid bridge direction {value:?} (must be \"source\" or \"sink\")")]
    InvalidDirection { value: String },

    #[error("Row {index} out of range (list has {len} rows)")]
    RowOutOfRange { index: usize, len: usize },

    #[error("Bridge list is not valid for saving")]
    InvalidBridgeList,

    #[error("Could not determine home directory")]
    NoHomeDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings store error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Result type alias for Pulse2JACK core operations.
pub type Result<T> = std::result::Result<T, Error>;
