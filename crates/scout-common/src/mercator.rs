//! Web-Mercator pixel and tile arithmetic.
//!
//! Follows the standard slippy-map scheme: 256 px tiles, origin at the
//! north-west corner of the projection, y growing southward.

use std::f64::consts::PI;

use crate::geo::LonLat;

/// Edge length of a map tile in pixels.
pub const TILE_SIZE: u32 = 256;

/// Zoom bounds for analysis rasters. Coarser than 12 washes out the
/// landforms the scorer keys on; finer than 14 explodes the tile count.
pub const MIN_ANALYSIS_ZOOM: u32 = 12;
pub const MAX_ANALYSIS_ZOOM: u32 = 14;

/// Clamp a (possibly fractional) display-zoom hint into the analysis range.
pub fn analysis_zoom(hint: f64) -> u32 {
    let z = hint.floor() as i64;
    z.clamp(MIN_ANALYSIS_ZOOM as i64, MAX_ANALYSIS_ZOOM as i64) as u32
}

/// Width of the world map in pixels at a zoom level.
pub fn world_pixel_span(zoom: u32) -> f64 {
    (TILE_SIZE * 2u32.pow(zoom)) as f64
}

/// Forward Web-Mercator: geographic coordinate to global pixel space.
pub fn lonlat_to_global_pixel(p: LonLat, zoom: u32) -> (f64, f64) {
    let scale = world_pixel_span(zoom);
    let x = (p.lon + 180.0) / 360.0 * scale;
    let sin_lat = p.lat.to_radians().sin();
    let y = (0.5 - ((1.0 + sin_lat) / (1.0 - sin_lat)).ln() / (4.0 * PI)) * scale;
    (x, y)
}

/// Inverse of [`lonlat_to_global_pixel`].
pub fn global_pixel_to_lonlat(x: f64, y: f64, zoom: u32) -> LonLat {
    let scale = world_pixel_span(zoom);
    let lon = x / scale * 360.0 - 180.0;
    let n = PI - 2.0 * PI * y / scale;
    let lat = (0.5 * (n.exp() - (-n).exp())).atan().to_degrees();
    LonLat::new(lon, lat)
}

/// Slippy tile column containing a longitude.
pub fn tile_x(lon: f64, zoom: u32) -> u32 {
    let n = 2u32.pow(zoom) as f64;
    ((lon + 180.0) / 360.0 * n).floor() as u32
}

/// Slippy tile row containing a latitude (rows grow southward).
pub fn tile_y(lat: f64, zoom: u32) -> u32 {
    let n = 2u32.pow(zoom) as f64;
    let lat_rad = lat.to_radians();
    ((1.0 - lat_rad.tan().asinh() / PI) / 2.0 * n).floor() as u32
}

/// Ground resolution in meters per pixel at a latitude and zoom level.
pub fn ground_resolution(lat: f64, zoom: u32) -> f64 {
    156_543.03392 * lat.to_radians().cos() / 2u32.pow(zoom) as f64
}
