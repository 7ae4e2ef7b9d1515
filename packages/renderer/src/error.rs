use funnel_model::DecodeError;
use thiserror::Error;

/// Errors that can occur during public rendering
#[derive(Error, Debug)]
pub enum RenderError {
    /// Missing or unpublished funnel
    #[error("Funnel not found: {0}")]
    NotFound(String),

    #[error("Stored document is unreadable: {0}")]
    Decode(#[from] DecodeError),
}
