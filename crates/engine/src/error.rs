//! Engine-level errors.

use scout_common::GeoError;
use thiserror::Error;

/// Result type alias using EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that abort an analysis run.
///
/// Degradable conditions (missing elevation tiles, an unreachable Overpass
/// endpoint) are reported as [`crate::Warning`]s on the outcome instead.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("An analysis run is already in progress")]
    AnalysisInProgress,

    #[error("Scope requires an area-of-interest polygon")]
    AoiRequired,

    #[error("Scope requires a viewport bounding box")]
    BboxRequired,

    #[error("Invalid request geometry: {0}")]
    InvalidRequest(#[from] GeoError),

    #[error("Elevation error: {0}")]
    Elevation(#[from] elevation::ElevationError),

    #[error("Mask error: {0}")]
    Mask(#[from] masking::MaskError),

    #[error("Render error: {0}")]
    Render(#[from] renderer::RenderError),

    #[error("Analysis cancelled")]
    Cancelled,
}
