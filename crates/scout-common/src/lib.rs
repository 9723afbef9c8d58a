//! Common geographic types and utilities shared across terrain-scout crates.

pub mod bbox;
pub mod cancel;
pub mod error;
pub mod geo;
pub mod grid;
pub mod mercator;
pub mod polygon;

pub use bbox::BoundingBox;
pub use cancel::CancelToken;
pub use error::{GeoError, GeoResult};
pub use geo::LonLat;
pub use grid::{TileCoord, TileGrid};
pub use polygon::AoiPolygon;
