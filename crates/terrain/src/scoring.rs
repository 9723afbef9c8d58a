//! Multi-factor suitability scoring.
//!
//! Each pixel gets four component scores in [0, 1]: bench (moderate slope),
//! saddle (flat topographic position with mixed aspects), wind (leeward
//! alignment) and thermal (aspect preference by time of day). The final
//! score is their weighted mean, clamped to [0, 1].

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::derivatives::TerrainDerivatives;

const WEIGHT_BENCH: f64 = 1.2;
const WEIGHT_SADDLE: f64 = 1.6;
const WEIGHT_WIND: f64 = 1.2;
const WEIGHT_THERMAL: f64 = 1.0;
const WEIGHT_SUM: f64 = WEIGHT_BENCH + WEIGHT_SADDLE + WEIGHT_WIND + WEIGHT_THERMAL;

/// Diurnal regime for the thermal aspect term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    /// Midday heating, favors south-facing aspects.
    Day,
    /// Evening cooling, favors north-facing aspects.
    Evening,
}

/// Inputs governing the wind and thermal terms.
#[derive(Debug, Clone, Copy)]
pub struct ScoreParams {
    /// Direction the wind blows from, degrees clockwise from north.
    pub wind_from_deg: f64,
    pub time_of_day: TimeOfDay,
}

/// Triangular preference for bench slopes: peak at 6 degrees, zero
/// outside [2, 12].
pub fn bench_term(slope_deg: f64) -> f64 {
    if (2.0..=12.0).contains(&slope_deg) {
        1.0 - (slope_deg - 6.0).abs() / 10.0
    } else {
        0.0
    }
}

/// Saddle affinity: small |TPI| scaled by the local aspect variance.
pub fn saddle_term(tpi_m: f64, aspect_variance: f64) -> f64 {
    let positional = (1.0 - tpi_m.abs() / 12.0).max(0.0);
    (positional * aspect_variance).clamp(0.0, 1.0)
}

/// Leeward alignment: 1 on the sheltered aspect, 0 facing straight into
/// the wind, linear in the angular distance between.
pub fn wind_term(aspect_deg: f64, leeward_deg: f64) -> f64 {
    let diff = ((aspect_deg - leeward_deg + 540.0) % 360.0 - 180.0).abs();
    1.0 - diff / 180.0
}

/// Cosine aspect preference: peaks at 180 degrees (south) for day and at
/// 0 degrees (north) for evening.
pub fn thermal_term(aspect_deg: f64, time_of_day: TimeOfDay) -> f64 {
    match time_of_day {
        TimeOfDay::Day => (1.0 + (aspect_deg - 180.0).to_radians().cos()) / 2.0,
        TimeOfDay::Evening => (1.0 + aspect_deg.to_radians().cos()) / 2.0,
    }
}

/// Combine the derivative rasters into a score raster in [0, 1].
pub fn score_terrain(derivs: &TerrainDerivatives, params: &ScoreParams) -> Vec<f32> {
    let leeward = (params.wind_from_deg + 180.0) % 360.0;
    let time_of_day = params.time_of_day;

    (0..derivs.slope.len())
        .into_par_iter()
        .map(|i| {
            let aspect = derivs.aspect[i] as f64;

            let bench = bench_term(derivs.slope[i] as f64);
            let saddle = saddle_term(derivs.tpi[i] as f64, derivs.aspect_variance[i] as f64);
            let wind = wind_term(aspect, leeward);
            let thermal = thermal_term(aspect, time_of_day);

            let score = (WEIGHT_BENCH * bench
                + WEIGHT_SADDLE * saddle
                + WEIGHT_WIND * wind
                + WEIGHT_THERMAL * thermal)
                / WEIGHT_SUM;
            score.clamp(0.0, 1.0) as f32
        })
        .collect()
}
