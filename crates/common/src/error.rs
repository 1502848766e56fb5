//! Error types shared across Inkstream crates.

use std::path::PathBuf;

/// Top-level error type for Inkstream operations.
#[derive(Debug, thiserror::Error)]
pub enum InkstreamError {
    #[error("Sample error: {message}")]
    Sample { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Transform error: {message}")]
    Transform { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using InkstreamError.
pub type InkResult<T> = Result<T, InkstreamError>;

impl InkstreamError {
    pub fn sample(msg: impl Into<String>) -> Self {
        Self::Sample {
            message: msg.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    pub fn transform(msg: impl Into<String>) -> Self {
        Self::Transform {
            message: msg.into(),
        }
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported {
            message: msg.into(),
        }
    }
}
