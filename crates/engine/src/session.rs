//! The analysis engine: scope resolution, staged execution, single-flight.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use elevation::{ElevationError, MosaicLoader, TerrariumTileSource, TileSource};
use masking::{
    apply_aoi_mask, apply_development_mask, rasterize_aoi, rasterize_development, FeatureSource,
    Mask, MaskResult, OverpassFeatureSource,
};
use renderer::{create_png, render_overlay};
use scout_common::{mercator, AoiPolygon, BoundingBox, CancelToken, TileGrid};
use terrain::{compute_derivatives, extract_hotspots, score_terrain, ScoreParams};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::request::{
    AnalysisRequest, AnalysisScope, MAX_DEVELOPMENT_BUFFER_M, MIN_DEVELOPMENT_BUFFER_M,
};
use crate::result::AnalysisOutcome;
use crate::warnings::Warning;

/// Runs analyses one at a time against shared tile and feature sources.
pub struct AnalysisEngine {
    tile_source: Arc<dyn TileSource>,
    feature_source: Arc<dyn FeatureSource>,
    config: EngineConfig,
    running: AtomicBool,
}

impl AnalysisEngine {
    /// Build an engine over the configured HTTP sources.
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        let timeout = Duration::from_secs(config.http_timeout_secs);
        let tile_source: Arc<dyn TileSource> =
            Arc::new(TerrariumTileSource::new(&config.terrarium_url, timeout)?);
        let feature_source: Arc<dyn FeatureSource> =
            Arc::new(OverpassFeatureSource::new(&config.overpass_url, timeout)?);
        Ok(Self::with_sources(config, tile_source, feature_source))
    }

    /// Build an engine over caller-supplied sources.
    pub fn with_sources(
        config: EngineConfig,
        tile_source: Arc<dyn TileSource>,
        feature_source: Arc<dyn FeatureSource>,
    ) -> Self {
        Self {
            tile_source,
            feature_source,
            config,
            running: AtomicBool::new(false),
        }
    }

    /// Run one full analysis: elevation, derivatives, scoring, masking,
    /// hotspots, overlay.
    ///
    /// The engine admits one run at a time; a concurrent call fails fast
    /// with [`EngineError::AnalysisInProgress`] rather than queueing. The
    /// cancellation token is honored between stages and during tile loading.
    pub async fn analyze(
        &self,
        request: &AnalysisRequest,
        cancel: &CancelToken,
    ) -> EngineResult<AnalysisOutcome> {
        let _guard = RunGuard::acquire(&self.running)?;

        let run_id = Uuid::new_v4();
        let started_at = Utc::now();

        let (bbox, governing_aoi) = resolve_scope(request)?;
        bbox.validate()?;

        let zoom = mercator::analysis_zoom(request.zoom_hint);
        let grid = TileGrid::resolve(&bbox, zoom);
        let meters_per_pixel = mercator::ground_resolution(bbox.center_lat(), zoom);
        let wind_from_deg = request.wind_from_deg.rem_euclid(360.0);

        info!(
            run_id = %run_id,
            zoom = zoom,
            width = grid.width,
            height = grid.height,
            tiles = grid.tile_count(),
            "Starting terrain analysis"
        );

        let mut warnings = Vec::new();

        let loader = MosaicLoader::new(self.tile_source.clone(), self.config.max_concurrent_tiles);
        let (mosaic, stats) = match loader.load(&grid, cancel).await {
            Ok(loaded) => loaded,
            Err(ElevationError::Cancelled) => return Err(EngineError::Cancelled),
            Err(e) => return Err(e.into()),
        };
        if stats.failed_tiles > 0 {
            warnings.push(Warning::ElevationTilesMissing {
                failed: stats.failed_tiles,
                total: stats.total_tiles,
            });
        }
        ensure_active(cancel)?;

        let derivs = compute_derivatives(
            &mosaic.data,
            grid.width as usize,
            grid.height as usize,
            meters_per_pixel,
        );
        ensure_active(cancel)?;

        let params = ScoreParams {
            wind_from_deg,
            time_of_day: request.time_of_day,
        };
        let mut scores = score_terrain(&derivs, &params);
        ensure_active(cancel)?;

        // Without the AOI mask the scope would lie, so failure here is fatal.
        if let Some(aoi) = governing_aoi {
            let mask = rasterize_aoi(aoi, &grid)?;
            apply_aoi_mask(&mut scores, &mask);
        }

        // Development exclusion degrades to a warning on failure.
        if request.exclude_development {
            let buffer_m = request
                .development_buffer_m
                .clamp(MIN_DEVELOPMENT_BUFFER_M, MAX_DEVELOPMENT_BUFFER_M);
            match self
                .development_mask(&bbox, &grid, buffer_m, meters_per_pixel)
                .await
            {
                Ok(mask) => apply_development_mask(&mut scores, &mask),
                Err(e) => {
                    warn!(error = %e, "Development mask skipped");
                    warnings.push(Warning::DevelopmentMaskUnavailable {
                        reason: e.to_string(),
                    });
                }
            }
        }
        ensure_active(cancel)?;

        let hotspots = extract_hotspots(&scores, &grid, governing_aoi);
        let overlay = render_overlay(&scores);
        let overlay_png = create_png(&overlay, grid.width as usize, grid.height as usize)?;

        let finished_at = Utc::now();
        let outcome = AnalysisOutcome {
            run_id,
            started_at,
            finished_at,
            bbox,
            zoom,
            meters_per_pixel,
            grid,
            scores,
            overlay_png,
            hotspots,
            warnings,
        };

        info!(
            run_id = %run_id,
            elapsed_ms = outcome.elapsed_ms(),
            hotspots = outcome.hotspots.len(),
            warnings = outcome.warnings.len(),
            "Analysis complete"
        );

        Ok(outcome)
    }

    /// Fetch development features for the bbox and rasterize the exclusion
    /// mask.
    async fn development_mask(
        &self,
        bbox: &BoundingBox,
        grid: &TileGrid,
        buffer_m: f64,
        meters_per_pixel: f64,
    ) -> MaskResult<Mask> {
        let features = self.feature_source.fetch_features(bbox).await?;
        debug!(features = features.len(), "Fetched development features");
        rasterize_development(&features, grid, buffer_m, meters_per_pixel)
    }
}

/// Pick the bbox that bounds the raster and the ring (if any) that masks it.
fn resolve_scope(request: &AnalysisRequest) -> EngineResult<(BoundingBox, Option<&AoiPolygon>)> {
    match request.scope {
        AnalysisScope::Aoi => {
            let aoi = request.aoi.as_ref().ok_or(EngineError::AoiRequired)?;
            Ok((aoi.bbox(), Some(aoi)))
        }
        AnalysisScope::Viewport => {
            let bbox = request.viewport.ok_or(EngineError::BboxRequired)?;
            Ok((bbox, None))
        }
        AnalysisScope::Auto => match request.aoi.as_ref() {
            Some(aoi) => Ok((aoi.bbox(), Some(aoi))),
            None => {
                let bbox = request.viewport.ok_or(EngineError::BboxRequired)?;
                Ok((bbox, None))
            }
        },
    }
}

fn ensure_active(cancel: &CancelToken) -> EngineResult<()> {
    if cancel.is_cancelled() {
        return Err(EngineError::Cancelled);
    }
    Ok(())
}

/// Clears the running flag when the run ends, normally or by error.
struct RunGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> RunGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> EngineResult<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| EngineError::AnalysisInProgress)?;
        Ok(Self { flag })
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}
