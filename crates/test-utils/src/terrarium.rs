//! In-memory Terrarium tile encoding for fake tile sources.

use std::io::Cursor;

use image::{ImageOutputFormat, Rgb, RgbImage};
use scout_common::mercator::TILE_SIZE;

/// Encode one elevation value into Terrarium RGB channels.
///
/// The decoder computes `r*256 + g + b/256 - 32768`, so encoding quantizes
/// to 1/256 m steps.
pub fn elevation_to_terrarium(elev: f32) -> (u8, u8, u8) {
    let n = ((elev as f64 + 32768.0) * 256.0)
        .round()
        .clamp(0.0, 16_777_215.0) as u32;
    let r = (n >> 16) as u8;
    let g = ((n >> 8) & 0xff) as u8;
    let b = (n & 0xff) as u8;
    (r, g, b)
}

/// Render a full 256x256 elevation block to an in-memory Terrarium PNG.
///
/// # Panics
///
/// Panics if `elev` is not exactly `TILE_SIZE * TILE_SIZE` values.
pub fn create_terrarium_tile_png(elev: &[f32]) -> Vec<u8> {
    let size = TILE_SIZE as usize;
    assert_eq!(elev.len(), size * size, "tile must be {}x{}", size, size);

    let mut img = RgbImage::new(TILE_SIZE, TILE_SIZE);
    for y in 0..size {
        for x in 0..size {
            let (r, g, b) = elevation_to_terrarium(elev[y * size + x]);
            img.put_pixel(x as u32, y as u32, Rgb([r, g, b]));
        }
    }

    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
        .expect("png encode");
    bytes
}

/// Carve a tile-sized block out of a larger mosaic-shaped elevation grid.
///
/// Lets a test build one synthetic landscape and serve it tile by tile.
pub fn extract_tile_block(
    mosaic: &[f32],
    mosaic_width: usize,
    off_x: usize,
    off_y: usize,
) -> Vec<f32> {
    let size = TILE_SIZE as usize;
    let mut block = Vec::with_capacity(size * size);
    for row in 0..size {
        let start = (off_y + row) * mosaic_width + off_x;
        block.extend_from_slice(&mosaic[start..start + size]);
    }
    block
}
