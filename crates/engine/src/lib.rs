//! Analysis orchestration: one entry point that runs the full terrain
//! suitability pipeline from a request to a rendered overlay.

pub mod config;
pub mod error;
pub mod request;
pub mod result;
pub mod session;
pub mod warnings;

pub use config::EngineConfig;
pub use error::{EngineError, EngineResult};
pub use request::{AnalysisRequest, AnalysisScope};
pub use result::AnalysisOutcome;
pub use session::AnalysisEngine;
pub use warnings::Warning;
