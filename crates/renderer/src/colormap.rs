//! Score-to-color mapping for the heatmap overlay.

use rayon::prelude::*;

/// Scores below this render fully transparent so weak pixels don't wash
/// out the basemap.
pub const ALPHA_THRESHOLD: f64 = 0.35;

/// Map a suitability score to an RGBA pixel.
///
/// The color ramp covers the whole [0, 1] range in four bands
/// (blue-green, green-cyan fade, green-red blend, red), though with the
/// current threshold the visible part starts in the second band. Opacity
/// rises from 30 just above the threshold to 230 at a perfect score, on a
/// slightly superlinear curve.
pub fn score_to_rgba(value: f32) -> [u8; 4] {
    let t = (value as f64).clamp(0.0, 1.0);
    if t < ALPHA_THRESHOLD {
        return [0, 0, 0, 0];
    }

    let (r, g, b) = if t < 0.25 {
        (0.0, 4.0 * t, 1.0)
    } else if t < 0.5 {
        (0.0, 1.0, 1.0 - 4.0 * (t - 0.25))
    } else if t < 0.75 {
        (4.0 * (t - 0.5), 1.0, 0.0)
    } else {
        (1.0, 1.0 - 4.0 * (t - 0.75), 0.0)
    };

    let ramp = (t - ALPHA_THRESHOLD) / (1.0 - ALPHA_THRESHOLD);
    let alpha = (ramp.powf(1.2) * 200.0).round() + 30.0;

    [
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
        alpha.min(255.0) as u8,
    ]
}

/// Render the score raster into an RGBA buffer (4 bytes per pixel,
/// row-major, straight alpha).
pub fn render_overlay(scores: &[f32]) -> Vec<u8> {
    scores
        .par_iter()
        .flat_map_iter(|&s| score_to_rgba(s))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_threshold_is_transparent() {
        assert_eq!(score_to_rgba(0.0), [0, 0, 0, 0]);
        assert_eq!(score_to_rgba(0.2), [0, 0, 0, 0]);
        assert_eq!(score_to_rgba(0.349), [0, 0, 0, 0]);
        assert_eq!(score_to_rgba(-1.0), [0, 0, 0, 0]);
    }

    #[test]
    fn test_threshold_pixel() {
        // A stored f32 of 0.35 widens to just under the f64 threshold, the
        // same way a 32-bit score buffer behaves, so the first visible
        // pixel sits just above it: green-cyan band, near-minimum opacity.
        assert_eq!(score_to_rgba(0.35), [0, 0, 0, 0]);

        let [r, g, b, a] = score_to_rgba(0.36);
        assert_eq!((r, g), (0, 255));
        assert!(b > 128, "still mostly cyan, got {}", b);
        assert!(a >= 30 && a <= 40, "near-threshold alpha, got {}", a);
    }

    #[test]
    fn test_band_colors() {
        assert_eq!(score_to_rgba(0.5), [0, 255, 0, 64]);
        assert_eq!(score_to_rgba(0.75), [255, 255, 0, 142]);
        assert_eq!(score_to_rgba(1.0), [255, 0, 0, 230]);
    }

    #[test]
    fn test_clamps_above_one() {
        assert_eq!(score_to_rgba(1.5), score_to_rgba(1.0));
    }

    #[test]
    fn test_alpha_monotonic() {
        let mut last = 0u8;
        for i in 35..=100 {
            let a = score_to_rgba(i as f32 / 100.0)[3];
            assert!(a >= last, "alpha regressed at t={}", i);
            last = a;
        }
    }

    #[test]
    fn test_render_overlay_layout() {
        let scores = vec![0.0, 0.5, 1.0];
        let rgba = render_overlay(&scores);
        assert_eq!(rgba.len(), 12);
        assert_eq!(&rgba[0..4], &[0, 0, 0, 0]);
        assert_eq!(&rgba[4..8], &[0, 255, 0, 64]);
        assert_eq!(&rgba[8..12], &[255, 0, 0, 230]);
    }
}
