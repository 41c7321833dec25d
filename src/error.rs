/// Error types for the photo vault
///
/// Most failures in the vault are advisory: they are reported to the
/// notification sink and logged, never propagated as fatal errors.
/// `PhotoError` covers the ones that callers do get to see.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PhotoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Reading or converting a file blob failed
    #[error("Failed to encode {name}: {reason}")]
    Encoding { name: String, reason: String },

    /// The serialized collection does not fit in the store
    #[error("Storage quota exceeded: {needed} bytes needed, {quota} available")]
    QuotaExceeded { needed: usize, quota: usize },

    #[error("A photo with id {0} already exists")]
    DuplicateId(String),

    #[error("Malformed data URI")]
    InvalidDataUri,

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PhotoError>;
