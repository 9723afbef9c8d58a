//! Parsing of command-line analysis inputs.

use std::path::Path;

use anyhow::{bail, Context, Result};
use engine::{AnalysisScope, EngineConfig};
use scout_common::{AoiPolygon, LonLat};
use terrain::TimeOfDay;
use tracing::debug;

/// Parse a wind origin: degrees, or a cardinal name off the compass rose.
pub fn parse_wind(value: &str) -> Result<f64> {
    let deg = match value.trim().to_uppercase().as_str() {
        "N" => 0.0,
        "NE" => 45.0,
        "E" => 90.0,
        "SE" => 135.0,
        "S" => 180.0,
        "SW" => 225.0,
        "W" => 270.0,
        "NW" => 315.0,
        other => other
            .parse::<f64>()
            .with_context(|| format!("Invalid wind direction: '{}'", value))?,
    };
    Ok(deg)
}

pub fn parse_time(value: &str) -> Result<TimeOfDay> {
    match value.trim().to_lowercase().as_str() {
        "day" => Ok(TimeOfDay::Day),
        "evening" => Ok(TimeOfDay::Evening),
        other => bail!("Invalid time of day: '{}' (expected day or evening)", other),
    }
}

pub fn parse_scope(value: &str) -> Result<AnalysisScope> {
    match value.trim().to_lowercase().as_str() {
        "auto" => Ok(AnalysisScope::Auto),
        "aoi" => Ok(AnalysisScope::Aoi),
        "viewport" => Ok(AnalysisScope::Viewport),
        other => bail!("Invalid scope: '{}' (expected auto, aoi or viewport)", other),
    }
}

/// Parse an AOI ring from inline JSON (`[[lon,lat],...]`) or a file path.
pub fn parse_aoi(value: &str) -> Result<AoiPolygon> {
    let text = if value.trim_start().starts_with('[') {
        value.to_string()
    } else {
        std::fs::read_to_string(value)
            .with_context(|| format!("Failed to read AOI file: {}", value))?
    };

    let pairs: Vec<[f64; 2]> =
        serde_json::from_str(&text).context("AOI must be a JSON array of [lon, lat] pairs")?;
    let ring = pairs
        .iter()
        .map(|[lon, lat]| LonLat::new(*lon, *lat))
        .collect();
    Ok(AoiPolygon::new(ring)?)
}

/// Load engine settings from a YAML file.
pub fn load_engine_config(path: &Path) -> Result<EngineConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: EngineConfig = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    debug!(path = %path.display(), "Loaded engine config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_wind_cardinals() {
        assert_eq!(parse_wind("N").unwrap(), 0.0);
        assert_eq!(parse_wind("ne").unwrap(), 45.0);
        assert_eq!(parse_wind("E").unwrap(), 90.0);
        assert_eq!(parse_wind("sw").unwrap(), 225.0);
        assert_eq!(parse_wind(" W ").unwrap(), 270.0);
        assert_eq!(parse_wind("NW").unwrap(), 315.0);
    }

    #[test]
    fn test_parse_wind_degrees() {
        assert_eq!(parse_wind("137.5").unwrap(), 137.5);
        assert_eq!(parse_wind("0").unwrap(), 0.0);
        assert!(parse_wind("northish").is_err());
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("day").unwrap(), TimeOfDay::Day);
        assert_eq!(parse_time("Evening").unwrap(), TimeOfDay::Evening);
        assert!(parse_time("noon").is_err());
    }

    #[test]
    fn test_parse_scope() {
        assert_eq!(parse_scope("auto").unwrap(), AnalysisScope::Auto);
        assert_eq!(parse_scope("AOI").unwrap(), AnalysisScope::Aoi);
        assert_eq!(parse_scope("viewport").unwrap(), AnalysisScope::Viewport);
        assert!(parse_scope("everything").is_err());
    }

    #[test]
    fn test_parse_aoi_inline() {
        let aoi =
            parse_aoi("[[-84.40,34.80],[-84.30,34.80],[-84.30,34.90],[-84.40,34.90]]").unwrap();
        assert_eq!(aoi.ring().len(), 4);
        assert!(aoi.contains(&LonLat::new(-84.35, 34.85)));
    }

    #[test]
    fn test_parse_aoi_rejects_degenerate_ring() {
        assert!(parse_aoi("[[-84.40,34.80],[-84.30,34.80]]").is_err());
        assert!(parse_aoi("not json").is_err());
    }

    #[test]
    fn test_parse_aoi_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "[[-84.40,34.80],[-84.30,34.80],[-84.30,34.90],[-84.40,34.90]]"
        )
        .unwrap();

        let aoi = parse_aoi(file.path().to_str().unwrap()).unwrap();
        assert_eq!(aoi.ring().len(), 4);
    }

    #[test]
    fn test_load_engine_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "overpass_url: http://localhost:9000/api\nmax_concurrent_tiles: 2\n"
        )
        .unwrap();

        let config = load_engine_config(file.path()).unwrap();
        assert_eq!(config.overpass_url, "http://localhost:9000/api");
        assert_eq!(config.max_concurrent_tiles, 2);
        // Unlisted fields keep their defaults.
        assert_eq!(config.http_timeout_secs, 30);
    }

    #[test]
    fn test_load_engine_config_missing_file() {
        assert!(load_engine_config(Path::new("/nonexistent/engine.yaml")).is_err());
    }
}
