use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Funnel not found: {0}")]
    NotFound(String),

    #[error("Funnel already exists: {0}")]
    AlreadyExists(String),

    #[error("Slug already in use: {0}")]
    SlugTaken(String),

    #[error("Invalid funnel id: {0}")]
    InvalidId(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Remote store returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid store URL: {0}")]
    InvalidUrl(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
