//! Mosaic assembly: concurrent tile fetch and decode, serial blitting.

use std::sync::Arc;

use futures::{stream, StreamExt};
use scout_common::mercator::TILE_SIZE;
use scout_common::{CancelToken, TileGrid};
use tracing::{info, warn};

use crate::error::{ElevationError, ElevationResult};
use crate::source::TileSource;
use crate::terrarium;

/// A decoded elevation raster covering a full tile grid.
#[derive(Debug, Clone)]
pub struct ElevationMosaic {
    pub width: u32,
    pub height: u32,
    pub zoom: u32,
    /// Global pixel coordinate of the top-left corner.
    pub origin_x: f64,
    pub origin_y: f64,
    /// Row-major elevations in meters.
    pub data: Vec<f32>,
}

/// Tile accounting for one mosaic load.
#[derive(Debug, Clone, Copy)]
pub struct LoadStats {
    pub total_tiles: usize,
    pub failed_tiles: usize,
}

/// Loads every tile of a grid with bounded concurrency and assembles the
/// results into one mosaic.
pub struct MosaicLoader {
    source: Arc<dyn TileSource>,
    max_concurrent: usize,
}

impl MosaicLoader {
    pub fn new(source: Arc<dyn TileSource>, max_concurrent: usize) -> Self {
        Self {
            source,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Fetch and decode every tile of the grid.
    ///
    /// Fetch and decode run concurrently up to the configured limit; blits
    /// serialize on the collecting task, so completion order does not matter
    /// and the blocks never overlap. A failed tile leaves its footprint at
    /// 0.0 and is only counted. The cancellation token is checked between
    /// tile completions.
    pub async fn load(
        &self,
        grid: &TileGrid,
        cancel: &CancelToken,
    ) -> ElevationResult<(ElevationMosaic, LoadStats)> {
        if cancel.is_cancelled() {
            return Err(ElevationError::Cancelled);
        }

        let mut data = vec![0.0f32; grid.pixel_count()];
        let total_tiles = grid.tile_count();
        let mut failed = 0usize;

        let mut completed = stream::iter(grid.tiles())
            .map(|coord| {
                let source = self.source.clone();
                async move {
                    let block = match source.fetch_tile(coord).await {
                        Ok(bytes) => terrarium::decode_tile(&bytes),
                        Err(e) => Err(e),
                    };
                    (coord, block)
                }
            })
            .buffer_unordered(self.max_concurrent);

        while let Some((coord, block)) = completed.next().await {
            if cancel.is_cancelled() {
                return Err(ElevationError::Cancelled);
            }

            match block {
                Ok(block) => {
                    let (off_x, off_y) = grid.tile_offset(&coord);
                    blit(
                        &mut data,
                        grid.width as usize,
                        off_x as usize,
                        off_y as usize,
                        &block,
                    );
                }
                Err(e) => {
                    failed += 1;
                    warn!(
                        z = coord.z,
                        x = coord.x,
                        y = coord.y,
                        error = %e,
                        "Elevation tile unavailable, leaving region at 0"
                    );
                }
            }
        }

        info!(
            tiles = total_tiles,
            failed = failed,
            width = grid.width,
            height = grid.height,
            "Elevation mosaic assembled"
        );

        Ok((
            ElevationMosaic {
                width: grid.width,
                height: grid.height,
                zoom: grid.zoom,
                origin_x: grid.origin_x,
                origin_y: grid.origin_y,
                data,
            },
            LoadStats {
                total_tiles,
                failed_tiles: failed,
            },
        ))
    }
}

/// Copy a decoded tile block into the mosaic at its pixel offset.
fn blit(data: &mut [f32], mosaic_width: usize, off_x: usize, off_y: usize, block: &[f32]) {
    let size = TILE_SIZE as usize;
    for row in 0..size {
        let dst = (off_y + row) * mosaic_width + off_x;
        data[dst..dst + size].copy_from_slice(&block[row * size..(row + 1) * size]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bytes::Bytes;
    use scout_common::{BoundingBox, TileCoord};
    use test_utils::{create_flat_elevation, create_terrarium_tile_png};

    struct FakeSource {
        elevation: f32,
        fail: Vec<(u32, u32)>,
    }

    #[async_trait]
    impl TileSource for FakeSource {
        async fn fetch_tile(&self, coord: TileCoord) -> ElevationResult<Bytes> {
            if self.fail.contains(&(coord.x, coord.y)) {
                return Err(ElevationError::HttpStatus {
                    status: 404,
                    url: format!("fake/{}/{}/{}", coord.z, coord.x, coord.y),
                });
            }
            let block = create_flat_elevation(256, 256, self.elevation);
            Ok(Bytes::from(create_terrarium_tile_png(&block)))
        }
    }

    fn test_grid() -> TileGrid {
        TileGrid::resolve(&BoundingBox::new(-84.45, 34.78, -84.27, 34.93), 12)
    }

    #[tokio::test]
    async fn test_load_fills_every_tile() {
        let grid = test_grid();
        let loader = MosaicLoader::new(
            Arc::new(FakeSource {
                elevation: 320.0,
                fail: vec![],
            }),
            4,
        );

        let (mosaic, stats) = loader.load(&grid, &CancelToken::new()).await.unwrap();
        assert_eq!(stats.failed_tiles, 0);
        assert_eq!(stats.total_tiles, grid.tile_count());
        assert_eq!(mosaic.data.len(), grid.pixel_count());
        // 320.0 survives Terrarium quantization exactly.
        assert!(mosaic.data.iter().all(|&v| v == 320.0));
    }

    #[tokio::test]
    async fn test_failed_tile_leaves_zero_footprint() {
        let grid = test_grid();
        let loader = MosaicLoader::new(
            Arc::new(FakeSource {
                elevation: 500.0,
                fail: vec![(grid.min_tx, grid.min_ty)],
            }),
            2,
        );

        let (mosaic, stats) = loader.load(&grid, &CancelToken::new()).await.unwrap();
        assert_eq!(stats.failed_tiles, 1);

        // The failed tile's block stays at 0.0.
        let w = grid.width as usize;
        for row in 0..256 {
            for col in 0..256 {
                assert_eq!(mosaic.data[row * w + col], 0.0);
            }
        }
        // A pixel from a neighboring tile is populated.
        assert_eq!(mosaic.data[256], 500.0);
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let grid = test_grid();
        let loader = MosaicLoader::new(
            Arc::new(FakeSource {
                elevation: 100.0,
                fail: vec![],
            }),
            4,
        );

        let token = CancelToken::new();
        token.cancel();
        match loader.load(&grid, &token).await {
            Err(ElevationError::Cancelled) => {}
            other => panic!("expected Cancelled, got {:?}", other.map(|_| ())),
        }
    }
}
