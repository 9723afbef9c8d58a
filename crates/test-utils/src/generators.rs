//! Test data generators for creating synthetic terrain.
//!
//! These generators create predictable, verifiable elevation patterns
//! that can be used across the test suite.

/// Creates an elevation grid filled with a constant value.
///
/// Useful for edge cases: a flat surface has zero slope, zero TPI and zero
/// aspect variance everywhere in the interior.
///
/// # Arguments
///
/// * `width` - Number of columns
/// * `height` - Number of rows
/// * `value` - Elevation in meters
///
/// # Returns
///
/// A `Vec<f32>` in row-major order filled with the constant value.
pub fn create_flat_elevation(width: usize, height: usize, value: f32) -> Vec<f32> {
    vec![value; width * height]
}

/// Creates an east-rising ramp: `elevation = col * step`.
///
/// Every interior pixel has the same gradient, so slope is uniform and the
/// downhill direction faces due west (aspect 270 under the scorer's sign
/// convention).
///
/// # Arguments
///
/// * `width` - Number of columns
/// * `height` - Number of rows
/// * `step` - Elevation gain per column in meters
pub fn create_ramp_elevation(width: usize, height: usize, step: f32) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for _row in 0..height {
        for col in 0..width {
            data.push(col as f32 * step);
        }
    }
    data
}

/// Creates a radial peak centered in the grid.
///
/// Elevation falls off linearly from `peak` at the center to 0 at the
/// nearest edge, giving a cone whose summit is a strong positive TPI
/// anomaly.
///
/// # Arguments
///
/// * `width` - Number of columns
/// * `height` - Number of rows
/// * `peak` - Summit elevation in meters
pub fn create_peak_elevation(width: usize, height: usize, peak: f32) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;
    let max_dist = cx.min(cy);

    for row in 0..height {
        for col in 0..width {
            let dx = col as f32 - cx;
            let dy = row as f32 - cy;
            let dist = (dx * dx + dy * dy).sqrt();
            let elev = (peak * (1.0 - dist / max_dist)).max(0.0);
            data.push(elev);
        }
    }
    data
}

/// Creates a saddle surface: `elevation = base + relief * (dx^2 - dy^2)`.
///
/// The center pixel is a mountain-pass shape: higher ground east and west,
/// lower ground north and south. Aspects around the center point in all
/// directions, which drives aspect variance up.
///
/// # Arguments
///
/// * `width` - Number of columns
/// * `height` - Number of rows
/// * `relief` - Curvature scale in meters (per squared unit offset)
pub fn create_saddle_elevation(width: usize, height: usize, relief: f32) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;

    for row in 0..height {
        for col in 0..width {
            let dx = (col as f32 - cx) / cx;
            let dy = (row as f32 - cy) / cy;
            data.push(1000.0 + relief * (dx * dx - dy * dy));
        }
    }
    data
}

/// Creates rough terrain from a deterministic hash.
///
/// Values lie in `[base, base + amplitude)`. Same seed, same terrain.
///
/// # Arguments
///
/// * `width` - Number of columns
/// * `height` - Number of rows
/// * `seed` - Seed value for deterministic generation
/// * `base` - Minimum elevation in meters
/// * `amplitude` - Elevation spread in meters
pub fn create_noise_elevation(
    width: usize,
    height: usize,
    seed: u32,
    base: f32,
    amplitude: f32,
) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let hash = simple_hash(col as u32, row as u32, seed);
            let unit = (hash % 10_000) as f32 / 10_000.0;
            data.push(base + unit * amplitude);
        }
    }
    data
}

/// Simple deterministic hash for reproducible test data.
fn simple_hash(x: u32, y: u32, seed: u32) -> u32 {
    let mut h = seed;
    h = h.wrapping_mul(31).wrapping_add(x);
    h = h.wrapping_mul(31).wrapping_add(y);
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^= h >> 16;
    h
}
