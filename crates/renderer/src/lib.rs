//! Heatmap rendering for the suitability score raster.
//!
//! Maps scores through a fixed colormap with an alpha threshold, then
//! encodes the RGBA buffer as a PNG for use as a georeferenced overlay.

pub mod colormap;
pub mod error;
pub mod png;

pub use colormap::{render_overlay, score_to_rgba, ALPHA_THRESHOLD};
pub use error::{RenderError, RenderResult};
pub use png::create_png;
