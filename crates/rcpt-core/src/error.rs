//! Error types for the rcpt-core library.

use thiserror::Error;

/// Main error type for the rcpt library.
#[derive(Error, Debug)]
pub enum RcptError {
    /// Remote extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Image decoding error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// The image format is not accepted by the extraction API.
    #[error("unsupported image format: {0}")]
    UnsupportedImage(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors from the remote extraction collaborator.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// No API key was provided.
    #[error("API key is missing")]
    MissingApiKey,

    /// The API answered with a non-success status.
    #[error("API request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    /// Transport-level failure reaching the API.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body did not contain parseable receipt JSON.
    #[error("malformed model response: {0}")]
    MalformedResponse(String),
}

/// Result type for the rcpt library.
pub type Result<T> = std::result::Result<T, RcptError>;
