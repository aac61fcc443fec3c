use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GrabError {
    #[error("Source {source_id} unavailable: {reason}")]
    SourceUnavailable { source_id: String, reason: String },

    #[error("Failed to decode feed for {source_id}: {reason}")]
    DecodeFailed { source_id: String, reason: String },

    #[error("Failed to fetch {url}: {reason}")]
    FetchFailed { url: String, reason: String },

    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to hash {path}: {source}")]
    HashFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to delete {path}: {source}")]
    DeleteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, GrabError>;
