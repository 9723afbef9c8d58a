//! Terrarium RGB elevation decoding.
//!
//! Terrarium tiles pack elevation into the red/green/blue channels:
//! `meters = R*256 + G + B/256 - 32768`, giving 1/256 m resolution over
//! the range [-32768, 32768).

use scout_common::mercator::TILE_SIZE;

use crate::error::{ElevationError, ElevationResult};

/// Decode one Terrarium-encoded pixel to meters.
#[inline]
pub fn decode_elevation(r: u8, g: u8, b: u8) -> f32 {
    (r as f32) * 256.0 + (g as f32) + (b as f32) / 256.0 - 32768.0
}

/// Decode a Terrarium PNG tile into a row-major block of elevations.
///
/// The tile must be exactly `TILE_SIZE` by `TILE_SIZE` pixels; anything else
/// is treated as a corrupt tile.
pub fn decode_tile(bytes: &[u8]) -> ElevationResult<Vec<f32>> {
    let img = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = img.dimensions();
    if width != TILE_SIZE || height != TILE_SIZE {
        return Err(ElevationError::BadDimensions { width, height });
    }

    let raw = img.as_raw();
    let mut block = Vec::with_capacity((TILE_SIZE * TILE_SIZE) as usize);
    for px in raw.chunks_exact(4) {
        block.push(decode_elevation(px[0], px[1], px[2]));
    }
    Ok(block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{create_flat_elevation, create_terrarium_tile_png};

    #[test]
    fn test_decode_channel_extremes() {
        // All-zero channels hit the encoding floor.
        assert_eq!(decode_elevation(0, 0, 0), -32768.0);
        // All-max channels hit the ceiling just below 32769.
        let max = decode_elevation(255, 255, 255);
        assert!((max - (65280.0 + 255.0 + 255.0 / 256.0 - 32768.0)).abs() < 1e-3);
        // Sea level.
        assert_eq!(decode_elevation(128, 0, 0), 0.0);
    }

    #[test]
    fn test_decode_fractional_meters() {
        // B contributes 1/256 m per step.
        assert_eq!(decode_elevation(128, 0, 128), 0.5);
        assert_eq!(decode_elevation(128, 10, 64), 10.25);
    }

    #[test]
    fn test_decode_tile_roundtrip() {
        let elev = create_flat_elevation(256, 256, 1543.75);
        let png = create_terrarium_tile_png(&elev);

        let block = decode_tile(&png).unwrap();
        assert_eq!(block.len(), 256 * 256);
        for &v in &block {
            assert!((v - 1543.75).abs() <= 1.0 / 256.0);
        }
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_tile(b"not a png").is_err());
    }

    #[test]
    fn test_decode_rejects_wrong_dimensions() {
        // A 1x1 PNG decodes fine but is not a tile.
        let img = image::RgbaImage::new(1, 1);
        let mut bytes = Vec::new();
        img.write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageOutputFormat::Png,
        )
        .unwrap();

        match decode_tile(&bytes) {
            Err(ElevationError::BadDimensions { width: 1, height: 1 }) => {}
            other => panic!("expected BadDimensions, got {:?}", other.map(|v| v.len())),
        }
    }
}
