//! Tile sources: where encoded elevation tiles come from.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use scout_common::TileCoord;
use tracing::debug;

use crate::error::{ElevationError, ElevationResult};

/// Default Terrarium endpoint (AWS open elevation tiles).
pub const DEFAULT_TERRARIUM_URL: &str =
    "https://s3.amazonaws.com/elevation-tiles-prod/terrarium/{z}/{x}/{y}.png";

/// Abstraction over tile retrieval so tests can substitute fakes.
#[async_trait]
pub trait TileSource: Send + Sync {
    /// Fetch the encoded tile bytes for a coordinate.
    async fn fetch_tile(&self, coord: TileCoord) -> ElevationResult<Bytes>;
}

/// HTTP source for Terrarium-encoded PNG tiles.
///
/// A tile is fetched once; there is no retry. Callers treat a failed tile as
/// a zero-elevation footprint, so retrying would only delay the run to hide
/// a warning.
pub struct TerrariumTileSource {
    client: Client,
    url_template: String,
}

impl TerrariumTileSource {
    /// Build a source over a `{z}/{x}/{y}` URL template.
    pub fn new(url_template: impl Into<String>, timeout: Duration) -> ElevationResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            url_template: url_template.into(),
        })
    }

    fn url_for(&self, coord: TileCoord) -> String {
        self.url_template
            .replace("{z}", &coord.z.to_string())
            .replace("{x}", &coord.x.to_string())
            .replace("{y}", &coord.y.to_string())
    }
}

#[async_trait]
impl TileSource for TerrariumTileSource {
    async fn fetch_tile(&self, coord: TileCoord) -> ElevationResult<Bytes> {
        let url = self.url_for(coord);
        debug!(url = %url, "Fetching elevation tile");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ElevationError::HttpStatus {
                status: status.as_u16(),
                url,
            });
        }

        Ok(response.bytes().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_template_substitution() {
        let source =
            TerrariumTileSource::new(DEFAULT_TERRARIUM_URL, Duration::from_secs(30)).unwrap();
        let url = source.url_for(TileCoord::new(13, 2177, 3223));
        assert_eq!(
            url,
            "https://s3.amazonaws.com/elevation-tiles-prod/terrarium/13/2177/3223.png"
        );
    }
}
