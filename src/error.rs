//! # Error Types
//!
//! The rendering engine itself never fails. These errors only surface at the
//! edges: encoding and writing images, parsing user configuration, and
//! running the HTTP server.

use thiserror::Error;

/// Main error type for mosaico operations
#[derive(Debug, Error)]
pub enum MosaicoError {
    /// I/O error wrapper (file writes, socket binding)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// Invalid user configuration (colours, shapes, option files)
    #[error("Config error: {0}")]
    Config(String),

    /// HTTP server error
    #[error("Server error: {0}")]
    Server(String),
}

impl From<image::ImageError> for MosaicoError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => MosaicoError::Io(e),
            other => MosaicoError::Image(other.to_string()),
        }
    }
}
