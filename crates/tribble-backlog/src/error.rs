use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BacklogError {
    #[error("store error: {0}")]
    Store(#[from] tribble_store::StoreError),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("invalid config at {}: {reason}", .path.display())]
    Config { path: PathBuf, reason: String },
}

pub type BacklogResult<T> = Result<T, BacklogError>;
