//! Error types for elevation loading.

use thiserror::Error;

/// Result type alias using ElevationError.
pub type ElevationResult<T> = Result<T, ElevationError>;

#[derive(Debug, Error)]
pub enum ElevationError {
    #[error("Tile fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Tile fetch returned HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Tile decode failed: {0}")]
    Decode(String),

    #[error("Unexpected tile dimensions: {width}x{height}")]
    BadDimensions { width: u32, height: u32 },

    #[error("Analysis cancelled")]
    Cancelled,
}

impl From<image::ImageError> for ElevationError {
    fn from(err: image::ImageError) -> Self {
        ElevationError::Decode(err.to_string())
    }
}
