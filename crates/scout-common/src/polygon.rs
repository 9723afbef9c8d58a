//! Area-of-interest polygon and point containment.

use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;
use crate::error::GeoError;
use crate::geo::LonLat;

/// A simple polygon ring, implicitly closed.
///
/// Accepts GeoJSON-style explicitly closed rings (first vertex repeated at
/// the end); the duplicate is dropped on construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AoiPolygon {
    ring: Vec<LonLat>,
}

impl AoiPolygon {
    pub fn new(mut ring: Vec<LonLat>) -> Result<Self, GeoError> {
        if ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }
        if ring.len() < 3 {
            return Err(GeoError::InvalidPolygon(format!(
                "ring needs at least 3 vertices, got {}",
                ring.len()
            )));
        }
        if ring.iter().any(|p| !p.lon.is_finite() || !p.lat.is_finite()) {
            return Err(GeoError::InvalidPolygon(
                "ring contains non-finite coordinates".to_string(),
            ));
        }
        Ok(Self { ring })
    }

    pub fn ring(&self) -> &[LonLat] {
        &self.ring
    }

    /// Tightest bounding box around the ring.
    pub fn bbox(&self) -> BoundingBox {
        let mut bbox = BoundingBox::new(
            f64::INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::NEG_INFINITY,
        );
        for p in &self.ring {
            bbox.west = bbox.west.min(p.lon);
            bbox.south = bbox.south.min(p.lat);
            bbox.east = bbox.east.max(p.lon);
            bbox.north = bbox.north.max(p.lat);
        }
        bbox
    }

    /// Ray-casting containment test. Points exactly on an edge may land on
    /// either side.
    pub fn contains(&self, p: &LonLat) -> bool {
        let mut inside = false;
        let mut j = self.ring.len() - 1;
        for i in 0..self.ring.len() {
            let a = self.ring[i];
            let b = self.ring[j];
            let crosses = (a.lat > p.lat) != (b.lat > p.lat)
                && p.lon < (b.lon - a.lon) * (p.lat - a.lat) / (b.lat - a.lat) + a.lon;
            if crosses {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> AoiPolygon {
        AoiPolygon::new(vec![
            LonLat::new(0.0, 0.0),
            LonLat::new(4.0, 0.0),
            LonLat::new(2.0, 4.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_rejects_degenerate_rings() {
        assert!(AoiPolygon::new(vec![]).is_err());
        assert!(AoiPolygon::new(vec![LonLat::new(0.0, 0.0), LonLat::new(1.0, 1.0)]).is_err());
        // A closed 3-point "ring" is really 2 vertices.
        assert!(AoiPolygon::new(vec![
            LonLat::new(0.0, 0.0),
            LonLat::new(1.0, 1.0),
            LonLat::new(0.0, 0.0),
        ])
        .is_err());
    }

    #[test]
    fn test_accepts_closed_ring() {
        let poly = AoiPolygon::new(vec![
            LonLat::new(0.0, 0.0),
            LonLat::new(4.0, 0.0),
            LonLat::new(2.0, 4.0),
            LonLat::new(0.0, 0.0),
        ])
        .unwrap();
        assert_eq!(poly.ring().len(), 3);
    }

    #[test]
    fn test_contains_interior_and_exterior() {
        let poly = triangle();
        assert!(poly.contains(&LonLat::new(2.0, 1.0)));
        assert!(!poly.contains(&LonLat::new(5.0, 1.0)));
        assert!(!poly.contains(&LonLat::new(2.0, 5.0)));
        assert!(!poly.contains(&LonLat::new(-1.0, -1.0)));
    }

    #[test]
    fn test_bbox() {
        let bbox = triangle().bbox();
        assert_eq!(bbox.west, 0.0);
        assert_eq!(bbox.south, 0.0);
        assert_eq!(bbox.east, 4.0);
        assert_eq!(bbox.north, 4.0);
    }
}
