//! Error types for document decoding

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Document must be a JSON object")]
    NotAnObject,

    #[error("Document version must be a string")]
    InvalidVersion,

    #[error("Unsupported document version: {0}")]
    UnsupportedVersion(String),

    #[error("Document blocks must be an array")]
    InvalidBlocks,
}
