//! Validation errors for geographic inputs.

use thiserror::Error;

/// Result type alias using GeoError.
pub type GeoResult<T> = Result<T, GeoError>;

/// Errors raised while validating geographic inputs, before any analysis
/// buffers are allocated.
#[derive(Debug, Error)]
pub enum GeoError {
    #[error("Invalid bounding box: {0}")]
    InvalidBoundingBox(String),

    #[error("Invalid polygon: {0}")]
    InvalidPolygon(String),
}
