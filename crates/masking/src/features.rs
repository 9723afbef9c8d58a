//! Vector features that contribute to the development mask.

use scout_common::LonLat;

/// Road importance, used to scale the exclusion stroke width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoadClass {
    /// motorway / trunk / primary
    Major,
    /// secondary / tertiary
    Mid,
    /// residential / unclassified / service / track
    Minor,
    Other,
}

impl RoadClass {
    /// Classify an OSM `highway` tag value. Matching is by substring, so
    /// link variants (`motorway_link`) inherit their parent class.
    pub fn from_highway(value: &str) -> Self {
        if ["motorway", "trunk", "primary"].iter().any(|k| value.contains(k)) {
            RoadClass::Major
        } else if value.contains("secondary") || value.contains("tertiary") {
            RoadClass::Mid
        } else if ["residential", "unclassified", "service", "track"]
            .iter()
            .any(|k| value.contains(k))
        {
            RoadClass::Minor
        } else {
            RoadClass::Other
        }
    }

    pub fn width_multiplier(self) -> f64 {
        match self {
            RoadClass::Major => 1.6,
            RoadClass::Mid => 1.3,
            RoadClass::Minor => 1.1,
            RoadClass::Other => 1.0,
        }
    }
}

/// How a feature is drawn into the mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    /// Building footprints, developed landuse, amenities and leisure
    /// grounds. Filled as a closed polygon, with an optional buffer ring.
    Footprint,
    /// Road centerlines, stroked with a class-dependent width.
    Road(RoadClass),
}

/// A single feature geometry in WGS84 coordinates.
#[derive(Debug, Clone)]
pub struct VectorFeature {
    pub kind: FeatureKind,
    pub points: Vec<LonLat>,
}
