use std::path::PathBuf;

use thiserror::Error;

pub type StoreResult<T> = core::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed document {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Plant not found: {0}")]
    NotFound(String),
    #[error("Task not found: {0}")]
    TaskNotFound(String),
    #[error("invalid watering time '{0}', expected HH:MM")]
    InvalidTime(String),
    #[error("unsupported language code '{0}'")]
    InvalidLanguage(String),
    #[error("unknown flower kind '{0}'")]
    InvalidFlowerKind(String),
    #[error("unknown unit '{0}'")]
    InvalidUnit(String),
    #[error("date out of range: {0}")]
    DateOutOfRange(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("background task failed: {0}")]
    Background(String),
}
