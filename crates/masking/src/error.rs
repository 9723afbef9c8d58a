//! Error types for mask construction.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MaskError {
    #[error("Overpass request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Overpass returned HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("Failed to parse Overpass response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to rasterize mask: {0}")]
    Rasterize(String),
}

pub type MaskResult<T> = Result<T, MaskError>;
