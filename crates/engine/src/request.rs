//! Analysis request parameters.

use scout_common::{AoiPolygon, BoundingBox};
use serde::Deserialize;
use terrain::TimeOfDay;

/// Lower clamp for the development exclusion buffer, meters.
pub const MIN_DEVELOPMENT_BUFFER_M: f64 = 20.0;
/// Upper clamp for the development exclusion buffer, meters.
pub const MAX_DEVELOPMENT_BUFFER_M: f64 = 120.0;

/// Which geometry bounds the analysis raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisScope {
    /// AOI bounds when a polygon is present, otherwise the viewport.
    Auto,
    /// The AOI polygon's bounding box; scores outside the ring are masked.
    Aoi,
    /// The viewport bounding box, unmasked.
    Viewport,
}

/// Everything a caller can vary between runs.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub scope: AnalysisScope,
    /// Current map viewport, required unless an AOI governs the run.
    pub viewport: Option<BoundingBox>,
    /// Optional sketched area of interest.
    pub aoi: Option<AoiPolygon>,
    /// Fractional map zoom the grid resolution derives from.
    pub zoom_hint: f64,
    /// Direction the wind blows from, degrees clockwise from north.
    pub wind_from_deg: f64,
    pub time_of_day: TimeOfDay,
    /// Zero out scores on buildings, roads and their surroundings.
    pub exclude_development: bool,
    /// Exclusion radius around development, clamped to [20, 120] m.
    pub development_buffer_m: f64,
}

impl Default for AnalysisRequest {
    fn default() -> Self {
        Self {
            scope: AnalysisScope::Auto,
            viewport: None,
            aoi: None,
            zoom_hint: 13.0,
            wind_from_deg: 270.0,
            time_of_day: TimeOfDay::Evening,
            exclude_development: true,
            development_buffer_m: 80.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_deserializes_lowercase() {
        let scope: AnalysisScope = serde_json::from_str(r#""viewport""#).unwrap();
        assert_eq!(scope, AnalysisScope::Viewport);
        let scope: AnalysisScope = serde_json::from_str(r#""auto""#).unwrap();
        assert_eq!(scope, AnalysisScope::Auto);
    }

    #[test]
    fn test_default_request() {
        let request = AnalysisRequest::default();
        assert_eq!(request.scope, AnalysisScope::Auto);
        assert_eq!(request.wind_from_deg, 270.0);
        assert_eq!(request.time_of_day, TimeOfDay::Evening);
        assert!(request.exclude_development);
        assert_eq!(request.development_buffer_m, 80.0);
    }
}
