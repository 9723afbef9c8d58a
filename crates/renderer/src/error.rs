//! Error types for overlay rendering.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] std::io::Error),
}

pub type RenderResult<T> = Result<T, RenderError>;
