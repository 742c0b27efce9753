//! Error types for the editor
//!
//! Missing targets and malformed connections are not errors: the store
//! ignores them. Only document import and export can fail.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SerializeError {
    /// Input did not describe a complete diagram; nothing was imported
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// NaN or infinity has no JSON encoding
    #[error("Non-finite number: {0}")]
    NonFiniteNumber(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Serialization error: {0}")]
    Serialize(#[from] SerializeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
