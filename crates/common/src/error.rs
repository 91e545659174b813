//! Error types shared across ClipScribe crates.

use std::path::PathBuf;

/// Top-level error type for ClipScribe operations.
#[derive(Debug, thiserror::Error)]
pub enum ClipscribeError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Malformed timestamp: {raw:?}")]
    MalformedTimestamp { raw: String },

    #[error("Caption error: {message}")]
    Caption { message: String },

    #[error("Audio error: {message}")]
    Audio { message: String },

    #[error("Transcription error: {message}")]
    Transcription { message: String },

    #[error("Service error: {message}")]
    Service { message: String },

    #[error("All {failed} transcription chunks failed")]
    AllChunksFailed { failed: usize },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using ClipscribeError.
pub type ClipscribeResult<T> = Result<T, ClipscribeError>;

impl ClipscribeError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: msg.into(),
        }
    }

    pub fn malformed_timestamp(raw: impl Into<String>) -> Self {
        Self::MalformedTimestamp { raw: raw.into() }
    }

    pub fn caption(msg: impl Into<String>) -> Self {
        Self::Caption {
            message: msg.into(),
        }
    }

    pub fn audio(msg: impl Into<String>) -> Self {
        Self::Audio {
            message: msg.into(),
        }
    }

    pub fn transcription(msg: impl Into<String>) -> Self {
        Self::Transcription {
            message: msg.into(),
        }
    }

    pub fn service(msg: impl Into<String>) -> Self {
        Self::Service {
            message: msg.into(),
        }
    }
}
