//! Elevation tile fetching, Terrarium decoding and mosaic assembly.

pub mod error;
pub mod mosaic;
pub mod source;
pub mod terrarium;

pub use error::{ElevationError, ElevationResult};
pub use mosaic::{ElevationMosaic, LoadStats, MosaicLoader};
pub use source::{TerrariumTileSource, TileSource, DEFAULT_TERRARIUM_URL};
