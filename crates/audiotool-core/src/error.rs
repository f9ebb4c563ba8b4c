//! Error types for audiotool-core

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for audiotool operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse {path}: {message}")]
    Parse {
        path: PathBuf,
        message: String,
    },

    #[error("Failed to save {path}: {message}")]
    Save {
        path: PathBuf,
        message: String,
    },

    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    #[error("Unsupported image format: {0}")]
    UnsupportedImage(String),

    #[error("Unknown tag key: {0}")]
    UnknownKey(String),

    #[error("Tag key '{key}' cannot hold a {given} value")]
    ValueType {
        key: &'static str,
        given: &'static str,
    },
}

/// Result type alias for audiotool operations
pub type Result<T> = std::result::Result<T, Error>;
