//! The product of one analysis run.

use chrono::{DateTime, Utc};
use scout_common::{BoundingBox, TileGrid};
use terrain::Hotspot;
use uuid::Uuid;

use crate::warnings::Warning;

/// Everything a completed run produced.
///
/// The score raster and the encoded overlay are both kept so callers can
/// either composite the PNG directly or probe individual pixel scores.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Geographic bounds of the raster (the governing scope's bbox).
    pub bbox: BoundingBox,
    /// Integer analysis zoom the grid resolved to.
    pub zoom: u32,
    /// Ground resolution at the bbox center latitude.
    pub meters_per_pixel: f64,
    pub grid: TileGrid,
    /// Row-major masked suitability scores in [0, 1].
    pub scores: Vec<f32>,
    /// PNG-encoded RGBA overlay aligned to the grid.
    pub overlay_png: Vec<u8>,
    /// Up to 20 spaced local maxima, best first.
    pub hotspots: Vec<Hotspot>,
    pub warnings: Vec<Warning>,
}

impl AnalysisOutcome {
    /// Wall-clock duration of the run in milliseconds.
    pub fn elapsed_ms(&self) -> i64 {
        self.finished_at
            .signed_duration_since(self.started_at)
            .num_milliseconds()
    }
}
