//! Terrain analysis over elevation mosaics.
//!
//! Takes the raw elevation raster produced by the `elevation` crate and
//! derives slope, aspect, topographic position and aspect variance, combines
//! them into a single suitability score per pixel, and extracts a spaced set
//! of high-scoring hotspot coordinates.

pub mod derivatives;
pub mod hotspots;
pub mod scoring;

pub use derivatives::{compute_derivatives, TerrainDerivatives};
pub use hotspots::{extract_hotspots, Hotspot};
pub use scoring::{score_terrain, ScoreParams, TimeOfDay};
