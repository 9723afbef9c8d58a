//! Slope, aspect, topographic position and aspect-variance rasters.
//!
//! All four derivatives are computed from the elevation mosaic in raster
//! space, with rows growing southward:
//!
//! - `slope = atan(sqrt(dzdx^2 + dzdy^2))` in degrees, where `dzdx` and
//!   `dzdy` are central differences over `2 * meters_per_pixel`
//! - `aspect = atan2(-dzdx, dzdy)` in degrees, normalized to [0, 360),
//!   0 = downhill facing north
//! - `tpi = z - mean(z)` over a 9x9 window centered on the pixel, in meters
//! - `aspect_variance = 1 - R` over the same window, where `R` is the
//!   resultant length of the aspect angles treated as unit vectors
//!
//! Border pixels that cannot fit the stencil keep their zero defaults:
//! 1 px for slope/aspect, 4 px for TPI and aspect variance.

use rayon::prelude::*;
use tracing::debug;

/// Half-width of the TPI / aspect-variance window (9x9 including center).
const WINDOW_RADIUS: i64 = 4;

/// Derivative rasters sharing the source mosaic's dimensions.
#[derive(Debug, Clone)]
pub struct TerrainDerivatives {
    pub width: usize,
    pub height: usize,
    /// Slope in degrees, >= 0.
    pub slope: Vec<f32>,
    /// Downhill direction in degrees [0, 360), 0 = north.
    pub aspect: Vec<f32>,
    /// Topographic position index in meters, signed.
    pub tpi: Vec<f32>,
    /// Circular variance of aspect in [0, 1].
    pub aspect_variance: Vec<f32>,
}

/// Compute all derivative rasters for an elevation mosaic.
///
/// `meters_per_pixel` is the ground resolution at the latitude of the
/// analysed area; the same value scales both axes.
///
/// # Arguments
///
/// * `elev` - Row-major elevation raster in meters, `width * height` long
/// * `meters_per_pixel` - Ground resolution used for the gradient step
pub fn compute_derivatives(
    elev: &[f32],
    width: usize,
    height: usize,
    meters_per_pixel: f64,
) -> TerrainDerivatives {
    debug_assert_eq!(elev.len(), width * height);

    let (slope, aspect) = compute_gradients(elev, width, height, meters_per_pixel);
    let (tpi, aspect_variance) = compute_position(elev, &aspect, width, height);

    debug!(
        width,
        height,
        meters_per_pixel = format!("{:.2}", meters_per_pixel),
        "Computed terrain derivatives"
    );

    TerrainDerivatives {
        width,
        height,
        slope,
        aspect,
        tpi,
        aspect_variance,
    }
}

fn compute_gradients(
    elev: &[f32],
    width: usize,
    height: usize,
    meters_per_pixel: f64,
) -> (Vec<f32>, Vec<f32>) {
    let step = 2.0 * meters_per_pixel;

    (0..height)
        .into_par_iter()
        .flat_map(|y| {
            let mut row = vec![(0.0f32, 0.0f32); width];
            if y >= 1 && y + 1 < height {
                for x in 1..width - 1 {
                    let i = y * width + x;
                    let dzdx = (elev[i + 1] - elev[i - 1]) as f64 / step;
                    let dzdy = (elev[i + width] - elev[i - width]) as f64 / step;

                    let slope = (dzdx * dzdx + dzdy * dzdy).sqrt().atan().to_degrees();
                    let mut aspect = (-dzdx).atan2(dzdy).to_degrees();
                    if aspect < 0.0 {
                        aspect += 360.0;
                    }
                    row[x] = (slope as f32, aspect as f32);
                }
            }
            row
        })
        .unzip()
}

fn compute_position(
    elev: &[f32],
    aspect: &[f32],
    width: usize,
    height: usize,
) -> (Vec<f32>, Vec<f32>) {
    let radius = WINDOW_RADIUS as usize;

    (0..height)
        .into_par_iter()
        .flat_map(|y| {
            let mut row = vec![(0.0f32, 0.0f32); width];
            if y >= radius && y + radius < height {
                for x in radius..width - radius {
                    let mut sum = 0.0f64;
                    let mut sum_cos = 0.0f64;
                    let mut sum_sin = 0.0f64;
                    let mut count = 0u32;

                    for dy in -WINDOW_RADIUS..=WINDOW_RADIUS {
                        for dx in -WINDOW_RADIUS..=WINDOW_RADIUS {
                            let ny = (y as i64 + dy) as usize;
                            let nx = (x as i64 + dx) as usize;
                            let j = ny * width + nx;
                            sum += elev[j] as f64;
                            let theta = (aspect[j] as f64).to_radians();
                            sum_cos += theta.cos();
                            sum_sin += theta.sin();
                            count += 1;
                        }
                    }

                    let i = y * width + x;
                    let mean = sum / count as f64;
                    let resultant =
                        (sum_cos * sum_cos + sum_sin * sum_sin).sqrt() / count as f64;
                    row[x] = ((elev[i] as f64 - mean) as f32, (1.0 - resultant) as f32);
                }
            }
            row
        })
        .unzip()
}
