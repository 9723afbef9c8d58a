//! Output documents: hotspot GeoJSON and the printed run summary.

use engine::AnalysisOutcome;
use serde_json::{json, Value};
use terrain::Hotspot;

/// Hotspots as a GeoJSON FeatureCollection of point features.
pub fn hotspots_geojson(hotspots: &[Hotspot]) -> Value {
    let features: Vec<Value> = hotspots
        .iter()
        .map(|h| {
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": [h.lon, h.lat],
                },
                "properties": {
                    "score": h.score,
                },
            })
        })
        .collect();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

/// Machine-readable run summary for stdout.
pub fn run_summary(outcome: &AnalysisOutcome) -> Value {
    let corners: Vec<Value> = outcome
        .grid
        .corners
        .iter()
        .map(|c| json!([c.lon, c.lat]))
        .collect();

    json!({
        "run_id": outcome.run_id.to_string(),
        "started_at": outcome.started_at.to_rfc3339(),
        "finished_at": outcome.finished_at.to_rfc3339(),
        "elapsed_ms": outcome.elapsed_ms(),
        "zoom": outcome.zoom,
        "width": outcome.grid.width,
        "height": outcome.grid.height,
        "meters_per_pixel": outcome.meters_per_pixel,
        "corners": corners,
        "hotspots": outcome.hotspots.len(),
        "warnings": outcome.warnings,
    })
}
