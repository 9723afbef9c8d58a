//! Non-fatal conditions surfaced on a completed run.

use std::fmt;

use serde::Serialize;

/// A degraded-quality condition that did not abort the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// Some elevation tiles failed; their footprints analyze as elevation 0.
    ElevationTilesMissing { failed: usize, total: usize },
    /// The development mask could not be built; developed areas keep their
    /// scores.
    DevelopmentMaskUnavailable { reason: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::ElevationTilesMissing { failed, total } => {
                write!(f, "{} of {} elevation tiles failed to load", failed, total)
            }
            Warning::DevelopmentMaskUnavailable { reason } => {
                write!(f, "Development mask unavailable: {}", reason)
            }
        }
    }
}
