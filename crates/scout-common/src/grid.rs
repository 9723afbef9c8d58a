//! Analysis tile grid resolution.
//!
//! An analysis run rasterizes the exact envelope of the slippy tiles covering
//! the requested area, so every output raster is georeferenced by tile
//! arithmetic alone: the envelope's four corner coordinates are the
//! placement contract handed to consumers.

use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;
use crate::geo::LonLat;
use crate::mercator::{self, TILE_SIZE};

/// A tile coordinate (z/x/y).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub z: u32,
    pub x: u32,
    pub y: u32,
}

impl TileCoord {
    pub fn new(z: u32, x: u32, y: u32) -> Self {
        Self { z, x, y }
    }
}

/// The raster footprint covering a bounding box at a fixed zoom: inclusive
/// tile ranges, the global-pixel origin of the top-left tile, mosaic
/// dimensions, and the geographic corners of the envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileGrid {
    pub zoom: u32,
    pub min_tx: u32,
    pub max_tx: u32,
    pub min_ty: u32,
    pub max_ty: u32,
    /// Global pixel coordinate of the mosaic's top-left corner.
    pub origin_x: f64,
    pub origin_y: f64,
    /// Mosaic dimensions in pixels (always multiples of the tile size).
    pub width: u32,
    pub height: u32,
    /// Envelope corners: top-left, top-right, bottom-right, bottom-left.
    pub corners: [LonLat; 4],
}

impl TileGrid {
    /// Resolve the tile envelope for a bounding box at an analysis zoom.
    pub fn resolve(bbox: &BoundingBox, zoom: u32) -> Self {
        let min_tx = mercator::tile_x(bbox.west, zoom);
        let max_tx = mercator::tile_x(bbox.east, zoom);
        let min_ty = mercator::tile_y(bbox.north, zoom);
        let max_ty = mercator::tile_y(bbox.south, zoom);

        let width = (max_tx - min_tx + 1) * TILE_SIZE;
        let height = (max_ty - min_ty + 1) * TILE_SIZE;

        let origin_x = (min_tx * TILE_SIZE) as f64;
        let origin_y = (min_ty * TILE_SIZE) as f64;
        let right = ((max_tx + 1) * TILE_SIZE) as f64;
        let bottom = ((max_ty + 1) * TILE_SIZE) as f64;

        let corners = [
            mercator::global_pixel_to_lonlat(origin_x, origin_y, zoom),
            mercator::global_pixel_to_lonlat(right, origin_y, zoom),
            mercator::global_pixel_to_lonlat(right, bottom, zoom),
            mercator::global_pixel_to_lonlat(origin_x, bottom, zoom),
        ];

        Self {
            zoom,
            min_tx,
            max_tx,
            min_ty,
            max_ty,
            origin_x,
            origin_y,
            width,
            height,
            corners,
        }
    }

    pub fn tiles_x(&self) -> u32 {
        self.max_tx - self.min_tx + 1
    }

    pub fn tiles_y(&self) -> u32 {
        self.max_ty - self.min_ty + 1
    }

    pub fn tile_count(&self) -> usize {
        self.tiles_x() as usize * self.tiles_y() as usize
    }

    /// Number of pixels in the mosaic.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Iterate the grid's tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = TileCoord> {
        let zoom = self.zoom;
        let (x0, x1) = (self.min_tx, self.max_tx);
        let (y0, y1) = (self.min_ty, self.max_ty);
        (y0..=y1).flat_map(move |y| (x0..=x1).map(move |x| TileCoord::new(zoom, x, y)))
    }

    /// Pixel offset of a tile's top-left corner within the mosaic.
    pub fn tile_offset(&self, coord: &TileCoord) -> (u32, u32) {
        (
            (coord.x - self.min_tx) * TILE_SIZE,
            (coord.y - self.min_ty) * TILE_SIZE,
        )
    }

    /// Geographic position of a mosaic pixel.
    pub fn pixel_to_lonlat(&self, x: u32, y: u32) -> LonLat {
        mercator::global_pixel_to_lonlat(
            self.origin_x + x as f64,
            self.origin_y + y as f64,
            self.zoom,
        )
    }

    /// Mosaic-local pixel position of a geographic coordinate.
    pub fn project(&self, p: LonLat) -> (f64, f64) {
        let (gx, gy) = mercator::lonlat_to_global_pixel(p, self.zoom);
        (gx - self.origin_x, gy - self.origin_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_single_tile() {
        // A box strictly inside one zoom-12 tile resolves to a 1x1 grid.
        let zoom = 12;
        let tx = mercator::tile_x(-84.324, zoom);
        let ty = mercator::tile_y(34.872, zoom);
        let nw = mercator::global_pixel_to_lonlat(
            (tx * TILE_SIZE) as f64 + 10.0,
            (ty * TILE_SIZE) as f64 + 10.0,
            zoom,
        );
        let se = mercator::global_pixel_to_lonlat(
            (tx * TILE_SIZE) as f64 + 200.0,
            (ty * TILE_SIZE) as f64 + 200.0,
            zoom,
        );
        let bbox = BoundingBox::new(nw.lon, se.lat, se.lon, nw.lat);

        let grid = TileGrid::resolve(&bbox, zoom);
        assert_eq!(grid.min_tx, tx);
        assert_eq!(grid.max_tx, tx);
        assert_eq!(grid.min_ty, ty);
        assert_eq!(grid.max_ty, ty);
        assert_eq!(grid.width, 256);
        assert_eq!(grid.height, 256);
        assert_eq!(grid.tile_count(), 1);
    }

    #[test]
    fn test_resolve_corners_are_envelope_bounds() {
        let bbox = BoundingBox::new(-84.40, 34.80, -84.25, 34.92);
        let grid = TileGrid::resolve(&bbox, 13);

        let [tl, tr, br, bl] = grid.corners;
        // Corners come straight from the inverse projection of the envelope.
        let expect_tl = mercator::global_pixel_to_lonlat(grid.origin_x, grid.origin_y, 13);
        assert!((tl.lon - expect_tl.lon).abs() < 1e-12);
        assert!((tl.lat - expect_tl.lat).abs() < 1e-12);

        // Envelope is axis-aligned in pixel space.
        assert!((tl.lat - tr.lat).abs() < 1e-9);
        assert!((bl.lat - br.lat).abs() < 1e-9);
        assert!((tl.lon - bl.lon).abs() < 1e-9);
        assert!((tr.lon - br.lon).abs() < 1e-9);

        // The envelope contains the requested box.
        assert!(tl.lon <= bbox.west && br.lon >= bbox.east);
        assert!(tl.lat >= bbox.north && br.lat <= bbox.south);
    }

    #[test]
    fn test_resolve_multi_tile_dimensions() {
        let bbox = BoundingBox::new(-84.50, 34.75, -84.20, 34.95);
        let grid = TileGrid::resolve(&bbox, 13);

        assert_eq!(grid.width, grid.tiles_x() * TILE_SIZE);
        assert_eq!(grid.height, grid.tiles_y() * TILE_SIZE);
        assert!(grid.tile_count() > 1);
        assert_eq!(grid.tiles().count(), grid.tile_count());
    }

    #[test]
    fn test_tile_offset() {
        let bbox = BoundingBox::new(-84.50, 34.75, -84.20, 34.95);
        let grid = TileGrid::resolve(&bbox, 12);
        let first = grid.tiles().next().unwrap();
        assert_eq!(grid.tile_offset(&first), (0, 0));

        let next = TileCoord::new(12, grid.min_tx + 1, grid.min_ty);
        if next.x <= grid.max_tx {
            assert_eq!(grid.tile_offset(&next), (256, 0));
        }
    }

    #[test]
    fn test_pixel_projection_roundtrip() {
        let bbox = BoundingBox::new(-84.40, 34.80, -84.25, 34.92);
        let grid = TileGrid::resolve(&bbox, 14);

        let p = grid.pixel_to_lonlat(100, 200);
        let (px, py) = grid.project(p);
        assert!((px - 100.0).abs() < 1e-6);
        assert!((py - 200.0).abs() < 1e-6);
    }
}
