//! Mask rasterization and application.
//!
//! Masks are drawn white-on-transparent into an RGBA pixmap and reduced to
//! their alpha channel. Anti-aliased edge pixels carry partial alpha; the
//! two apply functions interpret that differently on purpose. The AOI mask
//! keeps every pixel the polygon touches (zero only where alpha is exactly
//! zero), while the development mask excludes every pixel a feature touches
//! (zero wherever alpha is nonzero).

use scout_common::{AoiPolygon, TileGrid};
use tiny_skia::{FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};
use tracing::debug;

use crate::error::{MaskError, MaskResult};
use crate::features::{FeatureKind, VectorFeature};

/// A rasterized mask: the alpha channel of the drawn geometry.
#[derive(Debug, Clone)]
pub struct Mask {
    pub width: u32,
    pub height: u32,
    pub alpha: Vec<u8>,
}

impl Mask {
    fn from_pixmap(pixmap: &Pixmap) -> Self {
        let alpha = pixmap.data().chunks_exact(4).map(|px| px[3]).collect();
        Self {
            width: pixmap.width(),
            height: pixmap.height(),
            alpha,
        }
    }

    /// Whether the drawn geometry touches this pixel at all.
    pub fn covered(&self, x: u32, y: u32) -> bool {
        self.alpha[(y * self.width + x) as usize] > 0
    }
}

fn new_pixmap(grid: &TileGrid) -> MaskResult<Pixmap> {
    Pixmap::new(grid.width, grid.height).ok_or_else(|| {
        MaskError::Rasterize(format!(
            "cannot allocate {}x{} pixmap",
            grid.width, grid.height
        ))
    })
}

fn white_paint<'a>() -> Paint<'a> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(255, 255, 255, 255);
    paint.anti_alias = true;
    paint
}

/// Rasterize the area-of-interest polygon.
///
/// Vertices are projected into mosaic pixels and rounded to integers before
/// the fill, so the mask edge lands on whole-pixel boundaries.
pub fn rasterize_aoi(aoi: &AoiPolygon, grid: &TileGrid) -> MaskResult<Mask> {
    let mut pixmap = new_pixmap(grid)?;
    let paint = white_paint();

    let mut pb = PathBuilder::new();
    for (i, p) in aoi.ring().iter().enumerate() {
        let (x, y) = grid.project(*p);
        let (x, y) = (x.round() as f32, y.round() as f32);
        if i == 0 {
            pb.move_to(x, y);
        } else {
            pb.line_to(x, y);
        }
    }
    pb.close();

    if let Some(path) = pb.finish() {
        pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    Ok(Mask::from_pixmap(&pixmap))
}

/// Rasterize development features with a buffer distance in meters.
///
/// Footprints are filled and, when the buffer exceeds one pixel, outlined
/// with a stroke twice the buffer wide so the exclusion extends past the
/// footprint edge. Roads are stroked with a class-weighted width, at least
/// 2 px.
pub fn rasterize_development(
    features: &[VectorFeature],
    grid: &TileGrid,
    buffer_m: f64,
    meters_per_pixel: f64,
) -> MaskResult<Mask> {
    let mut pixmap = new_pixmap(grid)?;
    let paint = white_paint();
    let px_buffer = (buffer_m / meters_per_pixel).round().max(1.0);

    for feature in features {
        if feature.points.len() < 2 {
            continue;
        }

        let mut pb = PathBuilder::new();
        for (i, p) in feature.points.iter().enumerate() {
            let (x, y) = grid.project(*p);
            if i == 0 {
                pb.move_to(x as f32, y as f32);
            } else {
                pb.line_to(x as f32, y as f32);
            }
        }

        match feature.kind {
            FeatureKind::Footprint => {
                pb.close();
                if let Some(path) = pb.finish() {
                    pixmap.fill_path(
                        &path,
                        &paint,
                        FillRule::Winding,
                        Transform::identity(),
                        None,
                    );
                    if px_buffer > 1.0 {
                        let stroke = round_stroke((px_buffer * 2.0) as f32);
                        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
                    }
                }
            }
            FeatureKind::Road(class) => {
                if let Some(path) = pb.finish() {
                    let width = (px_buffer * class.width_multiplier()).round().max(2.0);
                    let stroke = round_stroke(width as f32);
                    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
                }
            }
        }
    }

    debug!(
        features = features.len(),
        px_buffer, "Rasterized development mask"
    );
    Ok(Mask::from_pixmap(&pixmap))
}

fn round_stroke(width: f32) -> Stroke {
    Stroke {
        width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Stroke::default()
    }
}

/// Zero scores outside the AOI (where the mask alpha is exactly zero).
pub fn apply_aoi_mask(scores: &mut [f32], mask: &Mask) {
    debug_assert_eq!(scores.len(), mask.alpha.len());
    for (score, &alpha) in scores.iter_mut().zip(&mask.alpha) {
        if alpha == 0 {
            *score = 0.0;
        }
    }
}

/// Zero scores touched by development (where the mask alpha is nonzero).
pub fn apply_development_mask(scores: &mut [f32], mask: &Mask) {
    debug_assert_eq!(scores.len(), mask.alpha.len());
    for (score, &alpha) in scores.iter_mut().zip(&mask.alpha) {
        if alpha > 0 {
            *score = 0.0;
        }
    }
}
