//! Spatial masks applied to the score raster.
//!
//! Two masks can constrain an analysis: the area-of-interest polygon (scores
//! outside it are zeroed) and a development mask built from OpenStreetMap
//! features (scores on or near buildings, developed land and roads are
//! zeroed). Both are rasterized with anti-aliasing and interpreted through
//! their alpha channel.

pub mod error;
pub mod features;
pub mod overpass;
pub mod rasterize;

pub use error::{MaskError, MaskResult};
pub use features::{FeatureKind, RoadClass, VectorFeature};
pub use overpass::{FeatureSource, OverpassFeatureSource, DEFAULT_OVERPASS_URL};
pub use rasterize::{
    apply_aoi_mask, apply_development_mask, rasterize_aoi, rasterize_development, Mask,
};
