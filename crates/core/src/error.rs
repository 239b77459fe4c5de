//! Error types for the Slate core crate.

use thiserror::Error;

/// Top-level error type for all Slate operations.
#[derive(Debug, Error)]
pub enum SlateError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transparent Classroom API error: {0}")]
    Api(String),

    #[error("authentication error: {0}")]
    Auth(String),

    #[error("Google Sheets error: {0}")]
    Sheets(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// A convenience Result alias that defaults to [`SlateError`].
pub type Result<T> = std::result::Result<T, SlateError>;
