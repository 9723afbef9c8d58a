//! Overpass API client for development features.
//!
//! One query collects everything the development mask excludes: building
//! footprints, developed landuse, selected amenities and leisure grounds,
//! and the drivable road network. The query asks for inline way geometry
//! (`out geom`); relation members do not carry top-level geometry in that
//! form and are skipped during parsing.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use scout_common::{BoundingBox, LonLat};
use serde::Deserialize;
use tracing::debug;

use crate::error::{MaskError, MaskResult};
use crate::features::{FeatureKind, RoadClass, VectorFeature};

/// Default public Overpass endpoint.
pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

const LANDUSE_VALUES: &str = "residential|commercial|industrial|retail|parking";
const AMENITY_VALUES: &str = "school|university|hospital|parking";
const LEISURE_VALUES: &str = "pitch|golf_course";
const HIGHWAY_VALUES: &str =
    "motorway|trunk|primary|secondary|tertiary|unclassified|residential|service|track";

/// Abstraction over development-feature retrieval so tests can substitute
/// fakes.
#[async_trait]
pub trait FeatureSource: Send + Sync {
    /// Fetch development features intersecting a bounding box.
    async fn fetch_features(&self, bbox: &BoundingBox) -> MaskResult<Vec<VectorFeature>>;
}

/// HTTP source querying an Overpass interpreter endpoint.
pub struct OverpassFeatureSource {
    client: Client,
    endpoint: String,
}

impl OverpassFeatureSource {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> MaskResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl FeatureSource for OverpassFeatureSource {
    async fn fetch_features(&self, bbox: &BoundingBox) -> MaskResult<Vec<VectorFeature>> {
        let query = development_query(bbox);
        debug!(endpoint = %self.endpoint, "Fetching development features");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("data", query.as_str())])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(MaskError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let raw: OverpassResponse = serde_json::from_slice(&body)?;
        Ok(parse_features(raw))
    }
}

/// Build the Overpass QL query for a bounding box. Overpass bbox filters
/// take (south, west, north, east).
pub fn development_query(bbox: &BoundingBox) -> String {
    let (s, w, n, e) = (bbox.south, bbox.west, bbox.north, bbox.east);
    format!(
        "[out:json][timeout:25];\n\
         (\n\
           way[\"building\"]({s},{w},{n},{e});\n\
           relation[\"building\"]({s},{w},{n},{e});\n\
           way[\"landuse\"][\"landuse\"~\"{LANDUSE_VALUES}\"]({s},{w},{n},{e});\n\
           relation[\"landuse\"][\"landuse\"~\"{LANDUSE_VALUES}\"]({s},{w},{n},{e});\n\
           way[\"amenity\"~\"{AMENITY_VALUES}\"]({s},{w},{n},{e});\n\
           relation[\"amenity\"~\"{AMENITY_VALUES}\"]({s},{w},{n},{e});\n\
           way[\"leisure\"~\"{LEISURE_VALUES}\"]({s},{w},{n},{e});\n\
           relation[\"leisure\"~\"{LEISURE_VALUES}\"]({s},{w},{n},{e});\n\
           way[\"highway\"][\"highway\"~\"{HIGHWAY_VALUES}\"]({s},{w},{n},{e});\n\
         );\n\
         out geom;"
    )
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    #[serde(default)]
    tags: HashMap<String, String>,
    #[serde(default)]
    geometry: Vec<OverpassVertex>,
}

#[derive(Debug, Deserialize)]
struct OverpassVertex {
    lon: f64,
    lat: f64,
}

/// Footprint tags win over `highway` when both are present.
fn classify(tags: &HashMap<String, String>) -> Option<FeatureKind> {
    if ["building", "landuse", "amenity", "leisure"]
        .iter()
        .any(|k| tags.contains_key(*k))
    {
        return Some(FeatureKind::Footprint);
    }
    tags.get("highway")
        .map(|value| FeatureKind::Road(RoadClass::from_highway(value)))
}

fn parse_features(raw: OverpassResponse) -> Vec<VectorFeature> {
    raw.elements
        .into_iter()
        .filter(|el| !el.geometry.is_empty())
        .filter_map(|el| {
            let kind = classify(&el.tags)?;
            let points = el
                .geometry
                .iter()
                .map(|v| LonLat::new(v.lon, v.lat))
                .collect();
            Some(VectorFeature { kind, points })
        })
        .collect()
}
