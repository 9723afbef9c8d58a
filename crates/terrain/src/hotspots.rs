//! Spaced hotspot extraction from the score raster.
//!
//! Candidates are probed on a coarse lattice, kept only where they are a
//! local maximum of a sparse sample window, then thinned greedily by
//! great-circle distance so the output never stacks markers on one ridge.

use scout_common::{AoiPolygon, LonLat, TileGrid};
use serde::Serialize;
use tracing::debug;

/// Lattice step between probe pixels.
const SCAN_STRIDE: usize = 8;
/// Pixels skipped along every raster edge.
const SCAN_MARGIN: usize = 8;
/// Half-width of the local-maximum window.
const WINDOW_RADIUS: i64 = 8;
/// Sample step inside the window (5x5 sparse samples over +/-8 px).
const WINDOW_STEP: usize = 4;
/// Minimum score for a candidate.
const MIN_SCORE: f32 = 0.5;
/// Minimum great-circle separation between kept hotspots.
const MIN_SEPARATION_M: f64 = 150.0;
/// Hard cap on returned hotspots.
const MAX_HOTSPOTS: usize = 20;

/// A high-scoring, spatially separated candidate location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hotspot {
    pub lon: f64,
    pub lat: f64,
    pub score: f32,
}

/// Extract up to 20 spaced local maxima from a score raster.
///
/// A pixel on the probe lattice becomes a candidate when its score is at
/// least 0.5 and no sparse window sample beats it (ties survive, so plateau
/// tops still produce a candidate). Candidates outside `aoi` are dropped
/// when one is given. Spacing is greedy in scan order: a candidate within
/// 150 m of an already kept one is discarded even if it scores higher. The
/// result is sorted by descending score and truncated to 20.
pub fn extract_hotspots(
    scores: &[f32],
    grid: &TileGrid,
    aoi: Option<&AoiPolygon>,
) -> Vec<Hotspot> {
    let width = grid.width as usize;
    let height = grid.height as usize;
    debug_assert_eq!(scores.len(), width * height);

    let mut kept: Vec<Hotspot> = Vec::new();

    for y in (SCAN_MARGIN..height.saturating_sub(SCAN_MARGIN)).step_by(SCAN_STRIDE) {
        for x in (SCAN_MARGIN..width.saturating_sub(SCAN_MARGIN)).step_by(SCAN_STRIDE) {
            let score = scores[y * width + x];
            if score < MIN_SCORE || !is_local_max(scores, width, x, y) {
                continue;
            }

            let point = grid.pixel_to_lonlat(x as u32, y as u32);
            if let Some(aoi) = aoi {
                if !aoi.contains(&point) {
                    continue;
                }
            }

            let too_close = kept
                .iter()
                .any(|k| LonLat::new(k.lon, k.lat).distance_m(&point) < MIN_SEPARATION_M);
            if too_close {
                continue;
            }

            kept.push(Hotspot {
                lon: point.lon,
                lat: point.lat,
                score,
            });
        }
    }

    kept.sort_by(|a, b| b.score.total_cmp(&a.score));
    kept.truncate(MAX_HOTSPOTS);

    debug!(hotspots = kept.len(), "Extracted hotspots");
    kept
}

/// Non-strict maximum over the sparse sample window.
fn is_local_max(scores: &[f32], width: usize, x: usize, y: usize) -> bool {
    let center = scores[y * width + x];
    for dy in (-WINDOW_RADIUS..=WINDOW_RADIUS).step_by(WINDOW_STEP) {
        for dx in (-WINDOW_RADIUS..=WINDOW_RADIUS).step_by(WINDOW_STEP) {
            if dx == 0 && dy == 0 {
                continue;
            }
            let nx = (x as i64 + dx) as usize;
            let ny = (y as i64 + dy) as usize;
            if center < scores[ny * width + nx] {
                return false;
            }
        }
    }
    true
}
