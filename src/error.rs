//! Error types for the gofile-dl library.

use thiserror::Error;

/// Errors that can occur while resolving, fetching, or downloading content.
#[derive(Error, Debug)]
pub enum Error {
    /// No content identifier could be extracted from the input.
    #[error("invalid Gofile URL: {0}")]
    InvalidUrl(String),

    /// HTTP transport error or non-success response status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body did not match the expected envelope shape.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The upstream reported a status other than "ok".
    #[error("Gofile reported status {0:?}")]
    Status(String),

    /// The content is password protected and no password was supplied.
    #[error("content is password protected")]
    PasswordRequired,

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Download operation failed.
    #[error("download failed: {0}")]
    Download(String),

    /// Configuration file or value error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for gofile-dl operations.
pub type Result<T> = std::result::Result<T, Error>;
