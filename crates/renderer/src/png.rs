//! PNG encoding for the RGBA overlay.
//!
//! The overlay is a continuous-tone heatmap, so it always encodes as
//! truecolor-with-alpha (color type 6), 8 bits per channel, unfiltered
//! scanlines compressed with zlib.

use std::io::Write;

use tracing::debug;

use crate::error::RenderResult;

/// Encode an RGBA buffer (4 bytes per pixel, row-major) as a PNG.
pub fn create_png(pixels: &[u8], width: usize, height: usize) -> RenderResult<Vec<u8>> {
    debug_assert_eq!(pixels.len(), width * height * 4);

    let mut png = Vec::new();

    // PNG signature
    png.extend_from_slice(&[137, 80, 78, 71, 13, 10, 26, 10]);

    // IHDR chunk
    let mut ihdr_data = Vec::with_capacity(13);
    ihdr_data.extend_from_slice(&(width as u32).to_be_bytes());
    ihdr_data.extend_from_slice(&(height as u32).to_be_bytes());
    ihdr_data.push(8); // bit depth
    ihdr_data.push(6); // color type (RGBA)
    ihdr_data.push(0); // compression method
    ihdr_data.push(0); // filter method
    ihdr_data.push(0); // interlace method
    write_chunk(&mut png, b"IHDR", &ihdr_data);

    // IDAT chunk (image data)
    let idat_data = deflate_idat_rgba(pixels, width, height)?;
    write_chunk(&mut png, b"IDAT", &idat_data);

    // IEND chunk
    write_chunk(&mut png, b"IEND", &[]);

    debug!(width, height, bytes = png.len(), "Encoded overlay PNG");
    Ok(png)
}

/// Write a PNG chunk: length, type, data, CRC over type + data.
fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

/// Deflate RGBA scanlines for the IDAT chunk, filter type 0 on every row.
fn deflate_idat_rgba(pixels: &[u8], width: usize, height: usize) -> RenderResult<Vec<u8>> {
    let mut uncompressed = Vec::with_capacity(height * (1 + width * 4));
    for y in 0..height {
        uncompressed.push(0); // filter type: none
        let row_start = y * width * 4;
        uncompressed.extend_from_slice(&pixels[row_start..row_start + width * 4]);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
    encoder.write_all(&uncompressed)?;
    Ok(encoder.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_signature_and_ihdr() {
        let pixels = vec![0u8; 4 * 4 * 4];
        let png = create_png(&pixels, 4, 4).unwrap();

        assert_eq!(&png[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
        // IHDR: 13-byte payload, width and height big-endian.
        assert_eq!(&png[8..12], &13u32.to_be_bytes());
        assert_eq!(&png[12..16], b"IHDR");
        assert_eq!(&png[16..20], &4u32.to_be_bytes());
        assert_eq!(&png[20..24], &4u32.to_be_bytes());
        assert_eq!(png[24], 8); // bit depth
        assert_eq!(png[25], 6); // color type RGBA
        assert_eq!(&png[png.len() - 8..png.len() - 4], b"IEND");
    }

    #[test]
    fn test_png_roundtrip() {
        // 2x2 with distinct colors, including transparency.
        let pixels: Vec<u8> = vec![
            255, 0, 0, 255, //
            0, 255, 0, 128, //
            0, 0, 255, 255, //
            0, 0, 0, 0,
        ];
        let png = create_png(&pixels, 2, 2).unwrap();

        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (2, 2));
        assert_eq!(decoded.into_raw(), pixels);
    }

    #[test]
    fn test_png_roundtrip_larger() {
        let width = 64;
        let height = 48;
        let mut pixels = Vec::with_capacity(width * height * 4);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[
                    (x * 4) as u8,
                    (y * 5) as u8,
                    ((x + y) * 2) as u8,
                    200,
                ]);
            }
        }
        let png = create_png(&pixels, width, height).unwrap();

        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(
            decoded.dimensions(),
            (width as u32, height as u32)
        );
        assert_eq!(decoded.into_raw(), pixels);
    }
}
