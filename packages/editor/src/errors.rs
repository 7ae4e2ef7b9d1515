//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::commands::MutationError),

    /// Write failed; the document is still dirty
    #[error("Save failed: {0}")]
    Save(#[source] funnel_store::StoreError),
}
