//! Engine configuration.

use elevation::DEFAULT_TERRARIUM_URL;
use masking::DEFAULT_OVERPASS_URL;
use serde::Deserialize;

/// Settings for the external services and concurrency of one engine.
///
/// Every field has a working default, so a config file only needs to name
/// the values it overrides.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Elevation tile URL template with `{z}`, `{x}`, `{y}` placeholders.
    pub terrarium_url: String,
    /// Overpass API endpoint for development features.
    pub overpass_url: String,
    /// Per-request HTTP timeout in seconds.
    pub http_timeout_secs: u64,
    /// Upper bound on elevation tiles fetched at once.
    pub max_concurrent_tiles: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            terrarium_url: DEFAULT_TERRARIUM_URL.to_string(),
            overpass_url: DEFAULT_OVERPASS_URL.to_string(),
            http_timeout_secs: 30,
            max_concurrent_tiles: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert!(config.terrarium_url.contains("{z}"));
        assert_eq!(config.http_timeout_secs, 30);
        assert_eq!(config.max_concurrent_tiles, 4);
    }

    #[test]
    fn test_partial_deserialize_keeps_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"max_concurrent_tiles": 8}"#).unwrap();
        assert_eq!(config.max_concurrent_tiles, 8);
        assert_eq!(config.overpass_url, DEFAULT_OVERPASS_URL);
        assert_eq!(config.terrarium_url, DEFAULT_TERRARIUM_URL);
    }
}
