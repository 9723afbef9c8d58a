//! Bounding box type and validation.

use serde::{Deserialize, Serialize};

use crate::error::GeoError;
use crate::geo::LonLat;

/// A geographic bounding box, coordinates in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl BoundingBox {
    /// Create a new bounding box from edge coordinates.
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// Parse a bbox parameter string: "west,south,east,north"
    pub fn from_csv(s: &str) -> Result<Self, GeoError> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(GeoError::InvalidBoundingBox(format!(
                "expected 'west,south,east,north', got '{}'",
                s
            )));
        }

        let mut vals = [0.0f64; 4];
        for (i, part) in parts.iter().enumerate() {
            vals[i] = part.parse().map_err(|_| {
                GeoError::InvalidBoundingBox(format!("not a number: '{}'", part))
            })?;
        }

        Ok(Self::new(vals[0], vals[1], vals[2], vals[3]))
    }

    /// Tightest bounding box around a polygon ring.
    pub fn of_ring(ring: &[LonLat]) -> Result<Self, GeoError> {
        if ring.is_empty() {
            return Err(GeoError::InvalidPolygon("empty ring".to_string()));
        }

        let mut bbox = Self::new(
            f64::INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::NEG_INFINITY,
        );
        for p in ring {
            bbox.west = bbox.west.min(p.lon);
            bbox.south = bbox.south.min(p.lat);
            bbox.east = bbox.east.max(p.lon);
            bbox.north = bbox.north.max(p.lat);
        }

        Ok(bbox)
    }

    /// Width of the bounding box in degrees.
    pub fn width(&self) -> f64 {
        self.east - self.west
    }

    /// Height of the bounding box in degrees.
    pub fn height(&self) -> f64 {
        self.north - self.south
    }

    /// Latitude of the box's horizontal midline.
    pub fn center_lat(&self) -> f64 {
        (self.south + self.north) / 2.0
    }

    /// Check if a point is contained within this bbox.
    pub fn contains(&self, p: &LonLat) -> bool {
        p.lon >= self.west && p.lon <= self.east && p.lat >= self.south && p.lat <= self.north
    }

    /// Reject malformed or degenerate boxes before any raster is allocated.
    pub fn validate(&self) -> Result<(), GeoError> {
        let coords = [self.west, self.south, self.east, self.north];
        if coords.iter().any(|c| !c.is_finite()) {
            return Err(GeoError::InvalidBoundingBox(
                "coordinates must be finite".to_string(),
            ));
        }
        if self.west >= self.east || self.south >= self.north {
            return Err(GeoError::InvalidBoundingBox(format!(
                "zero-area or inverted box: {},{},{},{}",
                self.west, self.south, self.east, self.north
            )));
        }
        if self.west < -180.0 || self.east > 180.0 {
            return Err(GeoError::InvalidBoundingBox(format!(
                "longitude out of range: {}..{}",
                self.west, self.east
            )));
        }
        if self.south < -90.0 || self.north > 90.0 {
            return Err(GeoError::InvalidBoundingBox(format!(
                "latitude out of range: {}..{}",
                self.south, self.north
            )));
        }
        Ok(())
    }
}
